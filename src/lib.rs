//! Core engine for a grid-based mine-detection puzzle.
//!
//! The crate owns field generation, reveal and flag semantics, win/loss
//! detection, and the menu/game state machine. Rendering and raw key
//! decoding stay outside: a frontend maps keys to [`InputEvent`]s, feeds
//! them through [`App::handle_event`], and draws from the read-only
//! [`App::screen`] snapshot between events, so every snapshot it sees is
//! fully settled.

use serde::{Deserialize, Serialize};

pub use app::*;
pub use error::*;
pub use field::*;
pub use generator::*;
pub use menu::*;
pub use session::*;
pub use tile::*;
pub use types::*;

mod app;
mod error;
mod field;
mod generator;
mod menu;
mod session;
mod tile;
mod types;

/// Field parameters: grid dimensions plus the number of mines to place.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub height: Coord,
    pub width: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new(height: Coord, width: Coord, mines: CellCount) -> Self {
        Self {
            height,
            width,
            mines,
        }
    }

    /// Rejects empty grids and mine counts that leave no safe tile; a
    /// mine-free field is legal.
    pub fn validate(self) -> Result<Self> {
        if self.height == 0 || self.width == 0 {
            return Err(GameError::EmptyField);
        }
        if self.mines >= self.total_tiles() {
            return Err(GameError::TooManyMines);
        }
        Ok(self)
    }

    pub const fn total_tiles(self) -> CellCount {
        area(self.width, self.height)
    }

    /// Tiles that must be revealed to win.
    pub const fn safe_tiles(self) -> CellCount {
        self.total_tiles().saturating_sub(self.mines)
    }
}
