//! Score keeping and tennis terms

use serde::{Deserialize, Serialize};

/// Display terms indexed by point count; anything past the table is "Game"
pub const SCORE_TERMS: [&str; 5] = ["Love", "15", "30", "40", "Game"];

/// Tennis term for a point count
pub fn score_term(points: u8) -> &'static str {
    SCORE_TERMS
        .get(points as usize)
        .copied()
        .unwrap_or("Game")
}

/// Point counters for both sides
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player: u8,
    pub opponent: u8,
}

impl Score {
    pub fn award_player(&mut self) {
        self.player = self.player.saturating_add(1);
    }

    /// True once the player has reached `win_points`
    pub fn player_won(&self, win_points: u8) -> bool {
        self.player >= win_points
    }
}

/// Text shown in the scoreboard, derived from the counters on demand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scoreboard {
    /// Raw player point count
    pub points: String,
    pub player_term: &'static str,
    pub opponent_term: &'static str,
    pub rally: String,
}

impl Scoreboard {
    pub fn new(score: &Score, rally: u32) -> Self {
        Self {
            points: score.player.to_string(),
            player_term: score_term(score.player),
            opponent_term: score_term(score.opponent),
            rally: rally.to_string(),
        }
    }
}
