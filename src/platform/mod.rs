//! Platform layer
//!
//! Browser wiring lives in `web` (wasm32 only). Native builds have no
//! platform layer; the binary drives the game headlessly.

#[cfg(target_arch = "wasm32")]
pub mod web;
