//! The mini-game as the hosting page sees it
//!
//! `TennisGame` owns all match state. The page only answers "is the court
//! scene showing?" and forwards pointer events; it never writes entity state.

use crate::input::{self, SurfaceRect};
use crate::renderer::{Surface, draw_frame};
use crate::settings::Tuning;
use crate::sim::{FrameReport, GameState, RandomSource, Scoreboard, tick};
use crate::sprite::SpriteImage;

/// The scene system around the game
pub trait SceneHost {
    /// Whether the court scene is the one in view
    fn is_active(&self) -> bool;

    /// Called once when the player wins the match
    fn notify_complete(&self);
}

/// Player-side and opponent-side paddle images
#[derive(Debug, Clone)]
pub struct Sprites<T> {
    pub player: Option<T>,
    pub opponent: Option<T>,
}

impl<T> Default for Sprites<T> {
    fn default() -> Self {
        Self {
            player: None,
            opponent: None,
        }
    }
}

impl<T: SpriteImage> Sprites<T> {
    fn player_image(&self) -> Option<&dyn SpriteImage> {
        self.player.as_ref().map(|s| s as &dyn SpriteImage)
    }

    fn opponent_image(&self) -> Option<&dyn SpriteImage> {
        self.opponent.as_ref().map(|s| s as &dyn SpriteImage)
    }
}

/// Game instance holding all match state
pub struct TennisGame<R: RandomSource> {
    state: GameState,
    rng: R,
    completion_sent: bool,
}

impl<R: RandomSource> TennisGame<R> {
    pub fn new(tuning: Tuning, rng: R) -> Self {
        Self::with_state(GameState::new(tuning), rng)
    }

    /// Resume from a prepared state (scripted scenarios, headless runs)
    pub fn with_state(state: GameState, rng: R) -> Self {
        let completion_sent = state.is_over();
        Self {
            state,
            rng,
            completion_sent,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scoreboard(&self) -> Scoreboard {
        Scoreboard::new(&self.state.score, self.state.rally)
    }

    /// Whether the completion notification has gone out
    pub fn is_complete(&self) -> bool {
        self.completion_sent
    }

    /// Run one animation frame: lifecycle, physics, completion, paint
    pub fn frame<H, S>(
        &mut self,
        host: &H,
        surface: &mut S,
        sprites: &Sprites<S::Sprite>,
    ) -> FrameReport
    where
        H: SceneHost + ?Sized,
        S: Surface,
    {
        let active = host.is_active();
        if active {
            self.state
                .fit_paddles(sprites.player_image(), sprites.opponent_image());
        }

        let report = tick::frame(&mut self.state, active, &mut self.rng);

        let won = report.step.as_ref().is_some_and(|s| s.match_over);
        if won && !self.completion_sent {
            self.completion_sent = true;
            log::info!("Court scene complete");
            host.notify_complete();
        }

        if report.render {
            draw_frame(
                surface,
                &self.state,
                sprites.player.as_ref(),
                sprites.opponent.as_ref(),
            );
        }
        report
    }

    /// Pointer or touch moved over the court
    pub fn pointer_moved(&mut self, client_x: f32, rect: SurfaceRect) {
        input::pointer_moved(&mut self.state, client_x, rect);
    }

    /// Pointer or touch entered the court. True if this started the match.
    pub fn pointer_entered(&mut self) -> bool {
        input::pointer_entered(&mut self.state, &mut self.rng)
    }
}
