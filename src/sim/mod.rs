//! Match simulation
//!
//! All gameplay logic lives here and stays free of DOM and drawing:
//! - One step per animation frame, no wall-clock time
//! - Randomness only through an injected `RandomSource`
//! - Display text derived from counters, never stored

pub mod collision;
pub mod opponent;
pub mod rng;
pub mod score;
pub mod state;
pub mod tick;

pub use collision::{PaddleHit, bounce_off_paddle, limit_speed, reflect_walls, resolve_paddles};
pub use opponent::OpponentController;
pub use rng::{PcgRandom, RandomSource, ScriptedRandom};
pub use score::{SCORE_TERMS, Score, Scoreboard, score_term};
pub use state::{Ball, GameState, MatchPhase, Paddle, Side};
pub use tick::{FrameReport, StepEvents, frame, start_match, step};
