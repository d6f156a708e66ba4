//! Frame painter
//!
//! `draw_frame` is a pure function of the game state onto a `Surface`. The
//! browser implements `Surface` over a Canvas 2D context; tests and the
//! headless binary use `RecordingSurface`.

pub mod recording;

use glam::Vec2;

use crate::sim::{GameState, Paddle};
use crate::sprite::SpriteImage;

pub use recording::{DrawCommand, RecordingSurface};

/// Court tint painted over the cleared surface
pub const BACKGROUND_COLOR: &str = "rgba(255, 160, 190, 0.25)";
/// Fallback fill for the player paddle while its sprite is unavailable
pub const PLAYER_COLOR: &str = "#ff6b9a";
/// Fallback fill for the opponent paddle
pub const OPPONENT_COLOR: &str = "#ff9dbb";
pub const BALL_COLOR: &str = "#ff7aa8";

/// Axis-aligned rectangle, top-left anchored
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }
}

impl From<&Paddle> for Rect {
    fn from(paddle: &Paddle) -> Self {
        Self {
            pos: paddle.pos,
            size: paddle.size,
        }
    }
}

/// A 2D drawing target
pub trait Surface {
    type Sprite: SpriteImage;

    fn clear(&mut self, width: f32, height: f32);
    fn fill_rect(&mut self, rect: Rect, color: &str);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str);
    fn draw_sprite(&mut self, sprite: &Self::Sprite, rect: Rect);
}

/// Paint one frame: background, both paddles, ball
pub fn draw_frame<S: Surface>(
    surface: &mut S,
    state: &GameState,
    player_sprite: Option<&S::Sprite>,
    opponent_sprite: Option<&S::Sprite>,
) {
    let (w, h) = (state.tuning.width, state.tuning.height);
    surface.clear(w, h);
    surface.fill_rect(Rect::new(0.0, 0.0, w, h), BACKGROUND_COLOR);

    draw_paddle(surface, &state.player, player_sprite, PLAYER_COLOR);
    draw_paddle(surface, &state.opponent, opponent_sprite, OPPONENT_COLOR);

    surface.fill_circle(state.ball.pos, state.ball.radius, BALL_COLOR);
}

/// Sprite if it is drawable right now, otherwise a solid rectangle
fn draw_paddle<S: Surface>(
    surface: &mut S,
    paddle: &Paddle,
    sprite: Option<&S::Sprite>,
    fallback: &str,
) {
    let rect = Rect::from(paddle);
    match sprite {
        Some(sprite) if sprite.is_ready() => surface.draw_sprite(sprite, rect),
        _ => surface.fill_rect(rect, fallback),
    }
}
