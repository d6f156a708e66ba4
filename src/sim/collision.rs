//! Collision detection and bounce response
//!
//! Arcade model: side walls mirror the horizontal velocity, paddles send the
//! ball back with a deflection proportional to how far off-center it struck.
//! Every paddle return ends in a speed clamp, so the ball can never run away.

use glam::Vec2;

use super::rng::RandomSource;
use super::state::{Ball, GameState, Paddle, Side};
use crate::settings::Tuning;

/// Outcome of a paddle return
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleHit {
    pub side: Side,
    /// Contact offset from paddle center, -1 (left edge) to 1 (right edge)
    pub hit_point: f32,
    pub power_shot: bool,
}

/// Mirror horizontal velocity when the ball reaches a side wall while still
/// heading into it. Returns true on a bounce.
pub fn reflect_walls(ball: &mut Ball, court_width: f32) -> bool {
    let into_left = ball.pos.x <= ball.radius && ball.vel.x < 0.0;
    let into_right = ball.pos.x >= court_width - ball.radius && ball.vel.x > 0.0;
    if into_left || into_right {
        ball.vel.x = -ball.vel.x;
        true
    } else {
        false
    }
}

/// Ball descending onto the bottom paddle. Only the top face is tested, so a
/// paddle sliding under a ball that has already dipped below it still saves.
pub fn touches_player_paddle(ball: &Ball, paddle: &Paddle) -> bool {
    ball.vel.y > 0.0
        && ball.pos.y + ball.radius >= paddle.top()
        && ball.pos.x >= paddle.left()
        && ball.pos.x <= paddle.right()
}

/// Ball rising into the top paddle's bottom face, same one-sided test as the
/// player. Only the centered `hitbox_fraction` of the paddle width returns the
/// ball.
pub fn touches_opponent_paddle(ball: &Ball, paddle: &Paddle, hitbox_fraction: f32) -> bool {
    let inset = paddle.size.x * (1.0 - hitbox_fraction) / 2.0;
    ball.vel.y < 0.0
        && ball.pos.y - ball.radius <= paddle.bottom()
        && ball.pos.x >= paddle.left() + inset
        && ball.pos.x <= paddle.right() - inset
}

/// Trim the horizontal component so `|vel| <= cap`, keeping the vertical
/// component (and with it the minimum return speed) intact.
pub fn limit_speed(vel: Vec2, cap: f32) -> Vec2 {
    if vel.length_squared() <= cap * cap {
        return vel;
    }
    let vy = vel.y.clamp(-cap, cap);
    let vx_room = (cap * cap - vy * vy).max(0.0).sqrt();
    Vec2::new(vel.x.clamp(-vx_room, vx_room), vy)
}

/// Compute the post-return velocity for a ball struck by `paddle`
pub fn bounce_off_paddle(
    ball: &mut Ball,
    paddle: &Paddle,
    side: Side,
    tuning: &Tuning,
    rng: &mut dyn RandomSource,
) -> PaddleHit {
    let half_width = paddle.size.x / 2.0;
    let hit_point = ((ball.pos.x - paddle.center_x()) / half_width).clamp(-1.0, 1.0);

    // Only the player gets power shots
    let power_shot = side == Side::Player && rng.chance(tuning.power_shot_chance);
    let (boost, cap, deflection, vy_bonus) = if power_shot {
        (
            tuning.power_boost,
            tuning.power_max_speed,
            tuning.power_deflection,
            tuning.power_vy_bonus,
        )
    } else {
        (1.0, tuning.max_speed, tuning.deflection, 0.0)
    };

    let vx = ((ball.vel.x + hit_point * deflection) * boost).clamp(-cap, cap);
    let vy_speed = (ball.vel.y.abs() * boost + vy_bonus)
        .max(tuning.min_return_speed)
        .min(cap);
    let vy = match side {
        Side::Player => -vy_speed,
        Side::Opponent => vy_speed,
    };
    ball.vel = limit_speed(Vec2::new(vx, vy), cap);

    PaddleHit {
        side,
        hit_point,
        power_shot,
    }
}

/// Detect and resolve a paddle return for this frame. On a hit the ball is
/// pushed just clear of the paddle face so the next frame cannot re-trigger
/// it, and the rally counter advances.
pub fn resolve_paddles(state: &mut GameState, rng: &mut dyn RandomSource) -> Option<PaddleHit> {
    let hit = if touches_player_paddle(&state.ball, &state.player) {
        state.ball.pos.y = state.player.top() - state.ball.radius - 1.0;
        bounce_off_paddle(
            &mut state.ball,
            &state.player,
            Side::Player,
            &state.tuning,
            rng,
        )
    } else if touches_opponent_paddle(
        &state.ball,
        &state.opponent,
        state.tuning.opponent_hitbox_fraction,
    ) {
        state.ball.pos.y = state.opponent.bottom() + state.ball.radius + 1.0;
        bounce_off_paddle(
            &mut state.ball,
            &state.opponent,
            Side::Opponent,
            &state.tuning,
            rng,
        )
    } else {
        return None;
    };

    state.rally += 1;
    if hit.power_shot {
        log::debug!("Power shot! rally={}", state.rally);
    } else {
        log::debug!("{:?} return, rally={}", hit.side, state.rally);
    }
    Some(hit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::ScriptedRandom;
    use proptest::prelude::*;

    /// Sample that never triggers a power shot (chance is 0.25)
    const NO_POWER: f32 = 0.9;
    /// Sample that always triggers a power shot
    const POWER: f32 = 0.1;

    fn rallying_state() -> GameState {
        let mut state = GameState::new(Tuning::default());
        state.phase = crate::sim::MatchPhase::Rallying;
        state
    }

    #[test]
    fn test_wall_reflection() {
        let mut ball = Ball::new(Vec2::new(5.0, 100.0), 7.0);
        ball.vel = Vec2::new(-2.0, 3.0);
        assert!(reflect_walls(&mut ball, 900.0));
        assert_eq!(ball.vel, Vec2::new(2.0, 3.0));

        // Already heading back in: no second flip
        assert!(!reflect_walls(&mut ball, 900.0));
        assert_eq!(ball.vel.x, 2.0);

        ball.pos.x = 895.0;
        assert!(reflect_walls(&mut ball, 900.0));
        assert_eq!(ball.vel.x, -2.0);
    }

    #[test]
    fn test_player_return_goes_up() {
        let mut state = rallying_state();
        let top = state.player.top();
        state.ball.pos = Vec2::new(state.player.center_x(), top - state.ball.radius);
        state.ball.vel = Vec2::new(1.0, 3.0);

        let hit = resolve_paddles(&mut state, &mut ScriptedRandom::constant(NO_POWER))
            .expect("ball on paddle");
        assert_eq!(hit.side, Side::Player);
        assert!(!hit.power_shot);
        assert_eq!(hit.hit_point, 0.0);
        assert_eq!(state.rally, 1);
        assert_eq!(state.ball.pos.y, top - state.ball.radius - 1.0);
        assert_eq!(state.ball.vel, Vec2::new(1.0, -3.0));
    }

    #[test]
    fn test_return_enforces_minimum_speed() {
        let mut state = rallying_state();
        state.ball.pos = Vec2::new(state.player.center_x(), state.player.top());
        state.ball.vel = Vec2::new(0.0, 0.5);
        resolve_paddles(&mut state, &mut ScriptedRandom::constant(NO_POWER));
        assert_eq!(state.ball.vel.y, -state.tuning.min_return_speed);
    }

    #[test]
    fn test_edge_hit_deflects() {
        let mut state = rallying_state();
        state.ball.pos = Vec2::new(state.player.right(), state.player.top());
        state.ball.vel = Vec2::new(0.0, 3.0);
        let hit = resolve_paddles(&mut state, &mut ScriptedRandom::constant(NO_POWER)).unwrap();
        assert_eq!(hit.hit_point, 1.0);
        assert!((state.ball.vel.x - state.tuning.deflection).abs() < 1e-5);
    }

    #[test]
    fn test_power_shot() {
        let mut state = rallying_state();
        state.ball.pos = Vec2::new(state.player.center_x(), state.player.top());
        state.ball.vel = Vec2::new(2.0, 4.0);
        let hit = resolve_paddles(&mut state, &mut ScriptedRandom::constant(POWER)).unwrap();
        assert!(hit.power_shot);
        // vy = min(7, 4 * 1.5 + 0.6) = 6.6, vx trimmed to keep |v| <= 7
        assert!((state.ball.vel.y + 6.6).abs() < 1e-5);
        assert!(state.ball.speed() <= state.tuning.power_max_speed + 1e-4);
        assert!(state.ball.vel.x > 0.0);
    }

    #[test]
    fn test_opponent_never_power_shots() {
        let mut state = rallying_state();
        let mut rng = ScriptedRandom::constant(POWER);
        state.ball.pos = Vec2::new(state.opponent.center_x(), state.opponent.bottom());
        state.ball.vel = Vec2::new(0.0, -4.0);
        let hit = resolve_paddles(&mut state, &mut rng).unwrap();
        assert_eq!(hit.side, Side::Opponent);
        assert!(!hit.power_shot);
        assert_eq!(rng.draws(), 0);
        assert_eq!(state.ball.vel.y, 4.0);
        assert_eq!(
            state.ball.pos.y,
            state.opponent.bottom() + state.ball.radius + 1.0
        );
    }

    #[test]
    fn test_opponent_hitbox_is_middle_half() {
        let mut state = rallying_state();
        let paddle = state.opponent;
        state.ball.vel = Vec2::new(0.0, -3.0);
        state.ball.pos.y = paddle.bottom();

        // 20% in from the left edge: outside the middle half
        state.ball.pos.x = paddle.left() + paddle.size.x * 0.2;
        assert!(!touches_opponent_paddle(&state.ball, &paddle, 0.5));

        state.ball.pos.x = paddle.left() + paddle.size.x * 0.3;
        assert!(touches_opponent_paddle(&state.ball, &paddle, 0.5));

        state.ball.pos.x = paddle.left() + paddle.size.x * 0.8;
        assert!(!touches_opponent_paddle(&state.ball, &paddle, 0.5));
    }

    #[test]
    fn test_no_hit_when_moving_away() {
        let mut state = rallying_state();
        state.ball.pos = Vec2::new(state.player.center_x(), state.player.top());
        state.ball.vel = Vec2::new(0.0, -3.0);
        assert!(resolve_paddles(&mut state, &mut ScriptedRandom::constant(NO_POWER)).is_none());
        assert_eq!(state.rally, 0);
    }

    #[test]
    fn test_late_save_below_player_paddle() {
        let mut state = rallying_state();
        let top = state.player.top();
        state.ball.pos = Vec2::new(state.player.center_x(), state.player.bottom() + 10.0);
        state.ball.vel = Vec2::new(0.0, 3.0);

        let hit = resolve_paddles(&mut state, &mut ScriptedRandom::constant(NO_POWER))
            .expect("paddle under the ball returns it");
        assert_eq!(hit.side, Side::Player);
        assert_eq!(state.ball.pos.y, top - state.ball.radius - 1.0);
        assert!(state.ball.vel.y < 0.0);
        assert_eq!(state.rally, 1);
    }

    #[test]
    fn test_late_save_above_opponent_paddle() {
        let mut state = rallying_state();
        state.ball.pos = Vec2::new(state.opponent.center_x(), -5.0);
        state.ball.vel = Vec2::new(0.0, -3.0);

        let hit = resolve_paddles(&mut state, &mut ScriptedRandom::constant(NO_POWER))
            .expect("paddle under the ball returns it");
        assert_eq!(hit.side, Side::Opponent);
        assert_eq!(
            state.ball.pos.y,
            state.opponent.bottom() + state.ball.radius + 1.0
        );
        assert!(state.ball.vel.y > 0.0);
    }

    #[test]
    fn test_no_late_save_outside_paddle() {
        let mut state = rallying_state();
        state.ball.pos = Vec2::new(
            state.player.right() + state.ball.radius + 5.0,
            state.player.bottom() + 10.0,
        );
        state.ball.vel = Vec2::new(0.0, 3.0);
        assert!(resolve_paddles(&mut state, &mut ScriptedRandom::constant(NO_POWER)).is_none());
    }

    #[test]
    fn test_limit_speed_keeps_vertical() {
        let vel = limit_speed(Vec2::new(5.5, 5.5), 5.5);
        assert_eq!(vel.y, 5.5);
        assert!(vel.x.abs() < 1e-3);
        let slow = Vec2::new(1.0, 2.0);
        assert_eq!(limit_speed(slow, 5.5), slow);
    }

    proptest! {
        #[test]
        fn prop_speed_never_exceeds_cap(
            bounces in prop::collection::vec(
                (any::<bool>(), -1.0f32..1.0, 0.0f32..1.0),
                1..60,
            ),
            start_vx in -3.0f32..3.0,
            start_vy in 1.0f32..4.0,
        ) {
            let mut state = rallying_state();
            state.ball.vel = Vec2::new(start_vx, start_vy);
            let cap = state.tuning.power_max_speed;
            for (player_side, offset, sample) in bounces {
                let mut rng = ScriptedRandom::constant(sample);
                if player_side {
                    state.ball.vel.y = state.ball.vel.y.abs();
                    state.ball.pos = Vec2::new(
                        state.player.center_x() + offset * state.player.size.x / 2.0,
                        state.player.top(),
                    );
                } else {
                    state.ball.vel.y = -state.ball.vel.y.abs();
                    state.ball.pos = Vec2::new(
                        state.opponent.center_x() + offset * state.opponent.size.x / 4.0,
                        state.opponent.bottom(),
                    );
                }
                let hit = resolve_paddles(&mut state, &mut rng);
                prop_assert!(hit.is_some());
                prop_assert!(state.ball.speed() <= cap + 1e-4);
                prop_assert!(state.ball.vel.y.abs() >= state.tuning.min_return_speed - 1e-4);
                if !hit.unwrap().power_shot {
                    prop_assert!(state.ball.speed() <= state.tuning.max_speed + 1e-4);
                }
            }
        }

        #[test]
        fn prop_vertical_velocity_points_away(
            vx in -7.0f32..7.0,
            vy in 0.1f32..7.0,
            offset in -1.0f32..=1.0,
            sample in 0.0f32..1.0,
        ) {
            let tuning = Tuning::default();
            let paddle = Paddle::centered(tuning.width, 400.0, Vec2::new(150.0, 24.0));

            let mut ball = Ball::new(Vec2::new(paddle.center_x() + offset * 75.0, 400.0), 7.0);
            ball.vel = Vec2::new(vx, vy);
            bounce_off_paddle(&mut ball, &paddle, Side::Player, &tuning, &mut ScriptedRandom::constant(sample));
            prop_assert!(ball.vel.y < 0.0);

            ball.vel = Vec2::new(vx, -vy);
            bounce_off_paddle(&mut ball, &paddle, Side::Opponent, &tuning, &mut ScriptedRandom::constant(sample));
            prop_assert!(ball.vel.y > 0.0);
        }
    }
}
