//! Surface that records draw calls instead of painting

use glam::Vec2;

use super::{Rect, Surface};
use crate::sprite::FixedSprite;

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { width: f32, height: f32 },
    FillRect { rect: Rect, color: String },
    FillCircle { center: Vec2, radius: f32, color: String },
    Sprite { rect: Rect },
}

impl DrawCommand {
    pub fn is_sprite(&self) -> bool {
        matches!(self, DrawCommand::Sprite { .. })
    }

    pub fn is_rect(&self) -> bool {
        matches!(self, DrawCommand::FillRect { .. })
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
    /// Frames started (one per `clear`)
    pub frames: u64,
}

impl RecordingSurface {
    /// Commands of the most recent frame
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear { .. }))
            .unwrap_or(0);
        &self.commands[start..]
    }
}

impl Surface for RecordingSurface {
    type Sprite = FixedSprite;

    fn clear(&mut self, width: f32, height: f32) {
        self.frames += 1;
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            color: color.to_string(),
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color: color.to_string(),
        });
    }

    fn draw_sprite(&mut self, _sprite: &FixedSprite, rect: Rect) {
        self.commands.push(DrawCommand::Sprite { rect });
    }
}
