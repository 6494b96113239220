use serde::{Deserialize, Serialize};

use crate::*;

/// Fixed board presets the menu cycles through.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    /// Cycling order used by the menu.
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Expert];

    pub const fn config(self) -> GameConfig {
        match self {
            Self::Beginner => GameConfig::new(9, 9, 10),
            Self::Intermediate => GameConfig::new(16, 16, 40),
            Self::Expert => GameConfig::new(16, 30, 99),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Expert => "Expert",
        }
    }

    const fn index(self) -> i32 {
        match self {
            Self::Beginner => 0,
            Self::Intermediate => 1,
            Self::Expert => 2,
        }
    }
}

/// Pre-game screen state: the selected preset plus the player's pending
/// request to start.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuState {
    difficulty: Difficulty,
    confirmed: bool,
}

impl MenuState {
    pub fn new() -> Self {
        Self::with_difficulty(Difficulty::Beginner)
    }

    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            confirmed: false,
        }
    }

    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub const fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    /// Cycles the preset by `delta` steps, wrapping symmetrically at both
    /// ends.
    pub fn select_difficulty(&mut self, delta: i32) {
        let len = Difficulty::ALL.len() as i32;
        let index = (self.difficulty.index() + delta.rem_euclid(len)).rem_euclid(len);
        self.difficulty = Difficulty::ALL[index as usize];
    }

    /// Requests a game start; the controller turns this into a session.
    pub fn confirm(&mut self) {
        self.confirmed = true;
    }

    pub(crate) fn take_confirmed(&mut self) -> bool {
        std::mem::take(&mut self.confirmed)
    }
}

impl Default for MenuState {
    fn default() -> Self {
        Self::new()
    }
}
