//! Game tuning
//!
//! One flat set of playfield and physics constants. Hosts may override any
//! subset through JSON (the web mount reads the canvas `data-tuning`
//! attribute); missing fields keep their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a tuning override is rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("invalid tuning: {0}")]
    Inconsistent(String),
}

/// Playfield, physics and opponent constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    /// Logical surface width
    pub width: f32,
    /// Logical surface height
    pub height: f32,

    // === Paddles ===
    pub paddle_width: f32,
    /// Height used until the sprite reports its aspect ratio
    pub paddle_default_height: f32,
    /// Floor for sprite-derived heights
    pub paddle_min_height: f32,
    pub paddle_inset: f32,
    pub opponent_hitbox_fraction: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub serve_vx: f32,
    pub serve_vy: f32,
    pub min_return_speed: f32,
    pub max_speed: f32,
    pub power_max_speed: f32,
    pub deflection: f32,
    pub power_deflection: f32,
    pub power_boost: f32,
    pub power_vy_bonus: f32,
    /// Probability (0-1) that a player return becomes a power shot
    pub power_shot_chance: f32,

    // === Opponent ===
    pub ai_speed: f32,
    pub ai_reaim_min_frames: f32,
    pub ai_reaim_max_frames: f32,
    pub ai_offset_range: f32,

    // === Match ===
    pub opponent_goal_line: f32,
    pub player_replay_slack: f32,
    pub win_points: u8,
    pub complete_delay_ms: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_default_height: PADDLE_DEFAULT_HEIGHT,
            paddle_min_height: PADDLE_MIN_HEIGHT,
            paddle_inset: PADDLE_INSET,
            opponent_hitbox_fraction: OPPONENT_HITBOX_FRACTION,

            ball_radius: BALL_RADIUS,
            serve_vx: SERVE_VX,
            serve_vy: SERVE_VY,
            min_return_speed: MIN_RETURN_SPEED,
            max_speed: MAX_SPEED,
            power_max_speed: POWER_MAX_SPEED,
            deflection: DEFLECTION,
            power_deflection: POWER_DEFLECTION,
            power_boost: POWER_BOOST,
            power_vy_bonus: POWER_VY_BONUS,
            power_shot_chance: POWER_SHOT_CHANCE,

            ai_speed: AI_SPEED,
            ai_reaim_min_frames: AI_REAIM_MIN_FRAMES,
            ai_reaim_max_frames: AI_REAIM_MAX_FRAMES,
            ai_offset_range: AI_OFFSET_RANGE,

            opponent_goal_line: OPPONENT_GOAL_LINE,
            player_replay_slack: PLAYER_REPLAY_SLACK,
            win_points: WIN_POINTS,
            complete_delay_ms: COMPLETE_DELAY_MS,
        }
    }
}

impl Tuning {
    /// Defaults sized to a specific surface
    pub fn with_surface(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Parse a (possibly partial) JSON override and validate the result
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would break clamping or collision math
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("paddle_width", self.paddle_width),
            ("paddle_default_height", self.paddle_default_height),
            ("paddle_min_height", self.paddle_min_height),
            ("ball_radius", self.ball_radius),
            ("max_speed", self.max_speed),
            ("power_max_speed", self.power_max_speed),
            ("ai_speed", self.ai_speed),
            ("ai_reaim_min_frames", self.ai_reaim_min_frames),
        ];
        for (field, value) in positive {
            // `!(v > 0)` also catches NaN
            if !(value > 0.0) {
                return Err(TuningError::NonPositive { field, value });
            }
        }

        if self.paddle_width > self.width {
            return Err(TuningError::Inconsistent(format!(
                "paddle_width {} exceeds width {}",
                self.paddle_width, self.width
            )));
        }
        if self.power_max_speed < self.max_speed {
            return Err(TuningError::Inconsistent(
                "power_max_speed is below max_speed".to_string(),
            ));
        }
        if self.min_return_speed > self.max_speed {
            return Err(TuningError::Inconsistent(
                "min_return_speed is above max_speed".to_string(),
            ));
        }
        if self.ai_reaim_max_frames < self.ai_reaim_min_frames {
            return Err(TuningError::Inconsistent(
                "ai_reaim_max_frames is below ai_reaim_min_frames".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.power_shot_chance) {
            return Err(TuningError::Inconsistent(format!(
                "power_shot_chance {} outside 0-1",
                self.power_shot_chance
            )));
        }
        if !(0.0..=1.0).contains(&self.opponent_hitbox_fraction) {
            return Err(TuningError::Inconsistent(format!(
                "opponent_hitbox_fraction {} outside 0-1",
                self.opponent_hitbox_fraction
            )));
        }
        if self.win_points == 0 {
            return Err(TuningError::Inconsistent("win_points must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Horizontal center of the playfield
    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }
}
