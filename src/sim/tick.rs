//! Per-frame simulation
//!
//! `frame` is the whole lifecycle for one animation frame: it decides from
//! scene visibility and match phase whether to hold, step or freeze, and
//! tells the caller whether to paint. `step` is one frame of physics.

use super::collision::{self, PaddleHit};
use super::rng::RandomSource;
use super::state::{GameState, MatchPhase, Side};

/// What happened during one physics step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepEvents {
    pub wall_bounce: bool,
    pub paddle_hit: Option<PaddleHit>,
    /// Side that won a point this step
    pub point: Option<Side>,
    /// Ball left past the player's baseline and was re-served without a point
    pub replay: bool,
    /// The match ended this step
    pub match_over: bool,
}

/// Result of a frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Paint this frame
    pub render: bool,
    /// The scene just became visible and the ball was re-held
    pub activated: bool,
    /// Physics ran this frame
    pub step: Option<StepEvents>,
}

impl FrameReport {
    /// Whether scoreboard text may have changed
    pub fn scoreboard_dirty(&self) -> bool {
        self.activated
            || self.step.as_ref().is_some_and(|s| {
                s.paddle_hit.is_some() || s.point.is_some() || s.replay || s.match_over
            })
    }
}

/// Run one animation frame of the match lifecycle
pub fn frame(state: &mut GameState, active: bool, rng: &mut dyn RandomSource) -> FrameReport {
    if !active {
        // Soft pause: nothing moves, nothing is painted
        state.was_active = false;
        if state.phase == MatchPhase::Rallying {
            state.phase = MatchPhase::Idle;
        }
        return FrameReport::default();
    }

    let mut report = FrameReport {
        render: true,
        ..Default::default()
    };

    if state.phase == MatchPhase::MatchOver {
        // Frozen final frame
        return report;
    }

    if !state.was_active {
        state.was_active = true;
        state.phase = MatchPhase::Idle;
        state.hold_ball();
        report.activated = true;
        log::info!(
            "Court visible, ball held (score {}-{})",
            state.score.player,
            state.score.opponent
        );
    }

    if state.phase == MatchPhase::Rallying {
        report.step = Some(step(state, rng));
    }
    report
}

/// Begin play if the match is waiting. Returns true when a serve happened.
pub fn start_match(state: &mut GameState, rng: &mut dyn RandomSource) -> bool {
    if state.phase != MatchPhase::Idle {
        return false;
    }
    state.phase = MatchPhase::Rallying;
    state.serve(rng);
    log::info!("Match started");
    true
}

/// Advance physics by one frame: opponent, ball, collisions, scoring
pub fn step(state: &mut GameState, rng: &mut dyn RandomSource) -> StepEvents {
    let mut events = StepEvents::default();
    if state.phase != MatchPhase::Rallying {
        return events;
    }

    state
        .opponent_ai
        .update(&mut state.opponent, &state.ball, &state.tuning, rng);

    state.ball.advance();
    events.wall_bounce = collision::reflect_walls(&mut state.ball, state.tuning.width);
    events.paddle_hit = collision::resolve_paddles(state, rng);

    if state.ball.pos.y <= state.tuning.opponent_goal_line {
        state.score.award_player();
        events.point = Some(Side::Player);
        log::info!("Point to player ({} pts)", state.score.player);

        if state.score.player_won(state.tuning.win_points) {
            state.phase = MatchPhase::MatchOver;
            events.match_over = true;
            log::info!("Match over: player wins {}-{}", state.score.player, state.score.opponent);
        } else {
            state.serve(rng);
        }
    } else if state.ball.pos.y > state.tuning.height + state.tuning.player_replay_slack {
        // Balls lost past the player's baseline are replayed, not scored
        events.replay = true;
        log::info!("Ball out past player baseline, replaying serve");
        state.serve(rng);
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Tuning;
    use crate::sim::rng::ScriptedRandom;
    use glam::Vec2;
    use proptest::prelude::*;

    fn started_state(rng: &mut ScriptedRandom) -> GameState {
        let mut state = GameState::new(Tuning::default());
        frame(&mut state, true, rng);
        assert!(start_match(&mut state, rng));
        state
    }

    #[test]
    fn test_idle_until_started() {
        let mut rng = ScriptedRandom::constant(0.9);
        let mut state = GameState::new(Tuning::default());
        for _ in 0..10 {
            let report = frame(&mut state, true, &mut rng);
            assert!(report.render);
            assert!(report.step.is_none());
        }
        assert_eq!(state.ball.pos, state.center());
        assert_eq!(state.ball.vel, Vec2::ZERO);
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut rng = ScriptedRandom::constant(0.9);
        let mut state = started_state(&mut rng);
        let vel = state.ball.vel;
        frame(&mut state, true, &mut rng);
        assert!(!start_match(&mut state, &mut rng));
        assert_eq!(state.phase, MatchPhase::Rallying);
        assert_eq!(state.ball.vel.y, vel.y);
    }

    #[test]
    fn test_started_frame_steps() {
        let mut rng = ScriptedRandom::constant(0.9);
        let mut state = started_state(&mut rng);
        let before = state.ball.pos;
        let report = frame(&mut state, true, &mut rng);
        assert!(report.step.is_some());
        assert_eq!(state.ball.pos, before + Vec2::new(2.2, 3.2));
    }

    #[test]
    fn test_player_point_and_serve() {
        let mut rng = ScriptedRandom::constant(0.9);
        let mut state = started_state(&mut rng);
        state.rally = 4;
        // Wide of the opponent so nothing returns it
        state.ball.pos = Vec2::new(20.0, -18.0);
        state.ball.vel = Vec2::new(0.0, -3.0);

        let events = step(&mut state, &mut rng);
        assert_eq!(events.point, Some(Side::Player));
        assert!(!events.match_over);
        assert_eq!(state.score.player, 1);
        assert_eq!(state.ball.pos, state.center());
        assert_eq!(state.rally, 0);
    }

    #[test]
    fn test_replay_past_player_baseline() {
        let mut rng = ScriptedRandom::constant(0.9);
        let mut state = started_state(&mut rng);
        state.rally = 3;
        state.ball.pos = Vec2::new(20.0, 548.0);
        state.ball.vel = Vec2::new(0.0, 3.0);

        let events = step(&mut state, &mut rng);
        assert!(events.replay);
        assert_eq!(events.point, None);
        assert_eq!(state.score.player, 0);
        assert_eq!(state.score.opponent, 0);
        assert_eq!(state.rally, 0);
        assert_eq!(state.ball.pos, state.center());
    }

    #[test]
    fn test_match_over_freezes() {
        let mut rng = ScriptedRandom::constant(0.9);
        let mut state = started_state(&mut rng);
        state.score.player = 2;
        // Wide of the opponent so nothing returns it
        state.ball.pos = Vec2::new(20.0, -18.0);
        state.ball.vel = Vec2::new(0.0, -3.0);

        let events = step(&mut state, &mut rng);
        assert!(events.match_over);
        assert_eq!(state.phase, MatchPhase::MatchOver);

        let frozen = state.ball;
        for _ in 0..5 {
            let report = frame(&mut state, true, &mut rng);
            assert!(report.render);
            assert!(report.step.is_none());
        }
        assert_eq!(state.ball, frozen);
        assert!(!start_match(&mut state, &mut rng));

        // Leaving and re-entering keeps the final state
        frame(&mut state, false, &mut rng);
        frame(&mut state, true, &mut rng);
        assert_eq!(state.phase, MatchPhase::MatchOver);
        assert_eq!(state.ball, frozen);
    }

    #[test]
    fn test_leaving_scene_unstarts_and_reentry_holds() {
        let mut rng = ScriptedRandom::constant(0.9);
        let mut state = started_state(&mut rng);
        state.score.player = 1;
        for _ in 0..5 {
            frame(&mut state, true, &mut rng);
        }

        let report = frame(&mut state, false, &mut rng);
        assert!(!report.render);
        assert_eq!(state.phase, MatchPhase::Idle);

        let report = frame(&mut state, true, &mut rng);
        assert!(report.activated);
        assert!(report.scoreboard_dirty());
        assert_eq!(state.ball.vel, Vec2::ZERO);
        assert_eq!(state.ball.pos, state.center());
        assert_eq!(state.score.player, 1, "scores survive a pause");
    }

    #[test]
    fn test_start_before_activation_is_reheld() {
        let mut rng = ScriptedRandom::constant(0.9);
        let mut state = GameState::new(Tuning::default());
        assert!(start_match(&mut state, &mut rng));
        frame(&mut state, true, &mut rng);
        assert_eq!(state.phase, MatchPhase::Idle);
        assert!(start_match(&mut state, &mut rng));
    }

    proptest! {
        #[test]
        fn prop_inactive_frames_change_nothing(
            x in 0.0f32..900.0,
            y in 0.0f32..520.0,
            vx in -5.0f32..5.0,
            vy in -5.0f32..5.0,
            player_pts in 0u8..3,
            started in any::<bool>(),
            frames in 1usize..50,
        ) {
            let mut rng = ScriptedRandom::constant(0.3);
            let mut state = GameState::new(Tuning::default());
            if started {
                start_match(&mut state, &mut rng);
            }
            state.ball.pos = Vec2::new(x, y);
            state.ball.vel = Vec2::new(vx, vy);
            state.score.player = player_pts;
            let ball = state.ball;
            let player = state.player;
            let opponent = state.opponent;
            let score = state.score;

            for _ in 0..frames {
                let report = frame(&mut state, false, &mut rng);
                prop_assert!(!report.render);
            }
            prop_assert_eq!(state.ball, ball);
            prop_assert_eq!(state.player, player);
            prop_assert_eq!(state.opponent, opponent);
            prop_assert_eq!(state.score, score);
        }
    }
}
