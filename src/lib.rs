//! Court Rally - the tennis mini-game scene of a story page
//!
//! Core modules:
//! - `sim`: Simulation (ball, paddles, collisions, opponent AI, scoring, frame lifecycle)
//! - `renderer`: Surface abstraction and the per-frame painter
//! - `sprite`: Polled sprite readiness and paddle sizing
//! - `input`: Pointer/touch to playfield mapping, match start
//! - `clock`: Tick source abstraction driving the frame loop
//! - `game`: Owner tying state, randomness and the hosting scene together
//! - `settings`: Data-driven tuning
//! - `platform`: Browser wiring (wasm32 only)

pub mod clock;
pub mod game;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod sprite;

pub use game::{SceneHost, Sprites, TennisGame};
pub use settings::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Logical canvas size used when the host does not provide one
    pub const CANVAS_WIDTH: f32 = 900.0;
    pub const CANVAS_HEIGHT: f32 = 520.0;

    /// Paddle defaults (height is replaced by the sprite aspect once loaded)
    pub const PADDLE_WIDTH: f32 = 150.0;
    pub const PADDLE_DEFAULT_HEIGHT: f32 = 24.0;
    pub const PADDLE_MIN_HEIGHT: f32 = 18.0;
    /// Gap between a paddle and its baseline edge of the canvas
    pub const PADDLE_INSET: f32 = 12.0;
    /// Fraction of the opponent paddle width that returns the ball (centered)
    pub const OPPONENT_HITBOX_FRACTION: f32 = 0.5;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 7.0;
    /// Serve speed per axis (sign picked at random)
    pub const SERVE_VX: f32 = 2.2;
    pub const SERVE_VY: f32 = 3.2;
    /// Vertical speed never drops below this after a paddle return
    pub const MIN_RETURN_SPEED: f32 = 2.6;
    /// Speed cap for ordinary returns
    pub const MAX_SPEED: f32 = 5.5;
    /// Speed cap for power shots (also the absolute cap)
    pub const POWER_MAX_SPEED: f32 = 7.0;
    /// Horizontal deflection per unit of hit offset
    pub const DEFLECTION: f32 = 1.4;
    pub const POWER_DEFLECTION: f32 = 2.2;
    pub const POWER_BOOST: f32 = 1.5;
    pub const POWER_VY_BONUS: f32 = 0.6;
    pub const POWER_SHOT_CHANCE: f32 = 0.25;

    /// Opponent AI: max paddle travel per frame
    pub const AI_SPEED: f32 = 2.6;
    /// Opponent AI: frames between re-aims
    pub const AI_REAIM_MIN_FRAMES: f32 = 20.0;
    pub const AI_REAIM_MAX_FRAMES: f32 = 60.0;
    /// Opponent AI: aim offset is uniform in [-range, range]
    pub const AI_OFFSET_RANGE: f32 = 60.0;

    /// Ball past this y (above the top edge) scores for the player
    pub const OPPONENT_GOAL_LINE: f32 = -20.0;
    /// Ball this far below the bottom edge is replayed without a point
    pub const PLAYER_REPLAY_SLACK: f32 = 30.0;
    /// Points needed to win the match
    pub const WIN_POINTS: u8 = 3;
    /// Delay the outer page waits before advancing after a win
    pub const COMPLETE_DELAY_MS: u32 = 1100;
}
