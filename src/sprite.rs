//! Paddle sprites
//!
//! Sprite images load asynchronously and may fail at any point, so readiness
//! is always asked of the image itself at the moment it matters. Nothing here
//! caches a loaded flag.

use glam::Vec2;

/// An image that may or may not be drawable yet
pub trait SpriteImage {
    /// Natural pixel size, only once the image has finished loading and
    /// reports a non-zero width
    fn natural_size(&self) -> Option<Vec2>;

    fn is_ready(&self) -> bool {
        self.natural_size().is_some()
    }
}

/// Paddle height for a fixed `width`, following the sprite's aspect ratio.
/// `None` when there is no ready sprite. Degenerate ratios fall back to
/// `min_height`.
pub fn paddle_height(
    sprite: Option<&dyn SpriteImage>,
    width: f32,
    min_height: f32,
) -> Option<f32> {
    let size = sprite?.natural_size()?;
    let height = width * size.y / size.x;
    if height.is_finite() {
        Some(height.max(min_height))
    } else {
        Some(min_height)
    }
}

/// Sprite with a settable size, for headless runs and tests
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedSprite {
    pub size: Option<Vec2>,
}

impl FixedSprite {
    pub fn loaded(width: f32, height: f32) -> Self {
        Self {
            size: Some(Vec2::new(width, height)),
        }
    }

    pub fn pending() -> Self {
        Self { size: None }
    }
}

impl SpriteImage for FixedSprite {
    fn natural_size(&self) -> Option<Vec2> {
        self.size.filter(|s| s.x > 0.0)
    }
}
