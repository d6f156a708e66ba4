//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives in `GameState`. Display values
//! (score terms, rally text) are derived from it, never stored beside it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::opponent::OpponentController;
use super::rng::RandomSource;
use super::score::Score;
use crate::settings::Tuning;
use crate::sprite::{SpriteImage, paddle_height};

/// Which end of the court
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Bottom paddle, driven by pointer input
    Player,
    /// Top paddle, driven by the opponent controller
    Opponent,
}

/// Match lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Ball held at center, waiting for the player to enter the court
    Idle,
    /// Ball in play
    Rallying,
    /// Win threshold reached; physics frozen
    MatchOver,
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
        }
    }

    /// Integrate one frame of motion
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// A paddle (top-left anchored rectangle)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Paddle {
    /// Paddle horizontally centered on the court
    pub fn centered(court_width: f32, y: f32, size: Vec2) -> Self {
        Self {
            pos: Vec2::new(court_width / 2.0 - size.x / 2.0, y),
            size,
        }
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    /// Keep the paddle fully inside `[0, court_width]`
    pub fn clamp_x(&mut self, court_width: f32) {
        let max_x = (court_width - self.size.x).max(0.0);
        self.pos.x = self.pos.x.max(0.0).min(max_x);
    }

    /// Center the paddle under `x`, then clamp
    pub fn center_on(&mut self, x: f32, court_width: f32) {
        self.pos.x = x - self.size.x / 2.0;
        self.clamp_x(court_width);
    }
}

/// Complete match state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub ball: Ball,
    /// Bottom paddle
    pub player: Paddle,
    /// Top paddle
    pub opponent: Paddle,
    pub score: Score,
    /// Successful paddle returns since the last serve
    pub rally: u32,
    pub phase: MatchPhase,
    /// Whether the hosting scene was visible on the previous frame
    pub was_active: bool,
    pub opponent_ai: OpponentController,
}

impl GameState {
    /// Fresh match: paddles centered, ball held
    pub fn new(tuning: Tuning) -> Self {
        let paddle_size = Vec2::new(tuning.paddle_width, tuning.paddle_default_height);
        let player_y = tuning.height - paddle_size.y - tuning.paddle_inset;
        let mut state = Self {
            ball: Ball::new(Vec2::ZERO, tuning.ball_radius),
            player: Paddle::centered(tuning.width, player_y, paddle_size),
            opponent: Paddle::centered(tuning.width, tuning.paddle_inset, paddle_size),
            score: Score::default(),
            rally: 0,
            phase: MatchPhase::Idle,
            was_active: false,
            opponent_ai: OpponentController::default(),
            tuning,
        };
        state.hold_ball();
        state
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.tuning.width / 2.0, self.tuning.height / 2.0)
    }

    /// Center the ball with zero velocity and clear the rally
    pub fn hold_ball(&mut self) {
        self.ball.pos = self.center();
        self.ball.vel = Vec2::ZERO;
        self.rally = 0;
    }

    /// Center the ball with a fresh random diagonal velocity
    pub fn serve(&mut self, rng: &mut dyn RandomSource) {
        let vx_sign = if rng.coin_flip() { 1.0 } else { -1.0 };
        let vy_sign = if rng.coin_flip() { 1.0 } else { -1.0 };
        self.ball.pos = self.center();
        self.ball.vel = Vec2::new(
            self.tuning.serve_vx * vx_sign,
            self.tuning.serve_vy * vy_sign,
        );
        self.rally = 0;
        log::debug!("Serve: vel=({:.1}, {:.1})", self.ball.vel.x, self.ball.vel.y);
    }

    /// Re-derive paddle heights from sprite aspect ratios and re-seat both
    /// paddles against their baselines. A sprite that is not ready leaves the
    /// current height untouched.
    pub fn fit_paddles(
        &mut self,
        player_sprite: Option<&dyn SpriteImage>,
        opponent_sprite: Option<&dyn SpriteImage>,
    ) {
        let tuning = &self.tuning;
        if let Some(h) = paddle_height(player_sprite, tuning.paddle_width, tuning.paddle_min_height)
        {
            self.player.size = Vec2::new(tuning.paddle_width, h);
        }
        if let Some(h) =
            paddle_height(opponent_sprite, tuning.paddle_width, tuning.paddle_min_height)
        {
            self.opponent.size = Vec2::new(tuning.paddle_width, h);
        }
        self.player.pos.y = tuning.height - self.player.size.y - tuning.paddle_inset;
        self.opponent.pos.y = tuning.paddle_inset;
    }

    pub fn is_started(&self) -> bool {
        self.phase == MatchPhase::Rallying
    }

    pub fn is_over(&self) -> bool {
        self.phase == MatchPhase::MatchOver
    }
}
