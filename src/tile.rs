use serde::{Deserialize, Serialize};

/// Sentinel tile value marking a mine; non-mine tiles hold their 0-8
/// adjacent-mine count.
pub const MINE: i8 = -1;

/// Player-visible state of one tile, driven by reveal and flag commands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileStatus {
    Hidden,
    Revealed,
    Flagged,
}

impl Default for TileStatus {
    fn default() -> Self {
        Self::Hidden
    }
}

/// One board cell: a value fixed at generation time plus its current
/// status. The value never changes over the life of a field.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    value: i8,
    status: TileStatus,
}

impl Tile {
    pub(crate) const fn new(value: i8) -> Self {
        Self {
            value,
            status: TileStatus::Hidden,
        }
    }

    /// `MINE` or the adjacent-mine count.
    pub const fn value(self) -> i8 {
        self.value
    }

    pub const fn status(self) -> TileStatus {
        self.status
    }

    pub const fn is_mine(self) -> bool {
        self.value == MINE
    }

    pub(crate) fn set_status(&mut self, status: TileStatus) {
        self.status = status;
    }
}
