//! Pointer and touch input
//!
//! The canvas is drawn at a fixed logical resolution but displayed at
//! whatever CSS size the page gives it, so client coordinates are rescaled
//! before they touch the paddle.

use crate::sim::{GameState, RandomSource, start_match};

/// Displayed bounds of the drawing surface (client pixels)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRect {
    pub left: f32,
    pub width: f32,
}

/// Map a client x coordinate onto the playfield. `None` when the surface
/// has no displayed width (hidden or collapsed).
pub fn pointer_to_playfield_x(client_x: f32, rect: SurfaceRect, logical_width: f32) -> Option<f32> {
    if !(rect.width > 0.0) || !client_x.is_finite() {
        return None;
    }
    let scale = logical_width / rect.width;
    Some((client_x - rect.left) * scale)
}

/// Center the player paddle under the pointer
pub fn pointer_moved(state: &mut GameState, client_x: f32, rect: SurfaceRect) {
    if let Some(x) = pointer_to_playfield_x(client_x, rect, state.tuning.width) {
        state.player.center_on(x, state.tuning.width);
    }
}

/// Pointer or touch entered the court: start the match once
pub fn pointer_entered(state: &mut GameState, rng: &mut dyn RandomSource) -> bool {
    start_match(state, rng)
}
