//! Opponent paddle controller
//!
//! Chases a deliberately noisy target: the ball's x while it travels toward
//! the top, the court center otherwise, plus an offset that is re-rolled only
//! every 20-60 frames. Travel per frame is capped at `ai_speed`.

use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use super::state::{Ball, Paddle};
use crate::settings::Tuning;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpponentController {
    /// Frames left before the next re-aim
    pub timer: f32,
    /// Lateral aim error currently held
    pub offset: f32,
}

impl OpponentController {
    /// Advance one frame, moving `paddle` toward the current target
    pub fn update(
        &mut self,
        paddle: &mut Paddle,
        ball: &Ball,
        tuning: &Tuning,
        rng: &mut dyn RandomSource,
    ) {
        self.timer -= 1.0;
        if self.timer <= 0.0 {
            self.offset = rng.range(-tuning.ai_offset_range, tuning.ai_offset_range);
            self.timer = rng.range(tuning.ai_reaim_min_frames, tuning.ai_reaim_max_frames);
        }

        let target_x = self.target_x(paddle, ball, tuning);
        let dx = (target_x - paddle.pos.x).clamp(-tuning.ai_speed, tuning.ai_speed);
        paddle.pos.x += dx;
        paddle.clamp_x(tuning.width);
    }

    /// Desired left edge of the paddle
    pub fn target_x(&self, paddle: &Paddle, ball: &Ball, tuning: &Tuning) -> f32 {
        let base = if ball.vel.y < 0.0 {
            ball.pos.x
        } else {
            tuning.center_x()
        };
        base + self.offset - paddle.size.x / 2.0
    }
}
