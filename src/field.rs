use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::generator::values_from_mines;
use crate::*;

/// Outcome of a flag command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Toggled,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Toggled)
    }
}

/// Outcome of a reveal command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// The target was already revealed; nothing changed.
    AlreadyRevealed,
    /// The target held a mine; it is now revealed and no other tile moved.
    Mine,
    /// The target (and, from a zero tile, its flood-filled region) was
    /// revealed; carries the number of newly revealed tiles.
    Cleared(CellCount),
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::AlreadyRevealed)
    }
}

/// Rectangular tile grid with reveal/flag semantics and remaining-tile
/// bookkeeping. Values are fixed at construction; only statuses change
/// afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineField {
    tiles: Array2<Tile>,
    config: GameConfig,
    tiles_remaining: CellCount,
    flags_placed: CellCount,
}

impl MineField {
    /// Generates a random field for `config` from `seed`.
    pub fn generate(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_generator(RandomFieldGenerator::new(seed), config)
    }

    /// Builds a field through any [`FieldGenerator`].
    pub fn with_generator<G: FieldGenerator>(generator: G, config: GameConfig) -> Result<Self> {
        Ok(Self::from_values(generator.generate(config)?, config))
    }

    /// Builds a deterministic field with mines at exactly the given
    /// coordinates; adjacency values are derived from them.
    ///
    /// # Panics
    ///
    /// Panics if a mine coordinate lies outside the field.
    pub fn with_mines(height: Coord, width: Coord, mines: &[Coord2]) -> Result<Self> {
        let mut mask = Array2::from_elem((height as usize, width as usize), false);
        for &(x, y) in mines {
            assert!(
                x < width && y < height,
                "mine coordinate ({x}, {y}) outside {width}x{height} field",
            );
            mask[(x, y).to_index()] = true;
        }
        let placed = mask.iter().filter(|&&mine| mine).count() as CellCount;
        let config = GameConfig::new(height, width, placed).validate()?;
        Ok(Self::from_values(values_from_mines(&mask), config))
    }

    fn from_values(values: Array2<i8>, config: GameConfig) -> Self {
        debug_assert_eq!(
            values.iter().filter(|&&value| value == MINE).count(),
            config.mines as usize,
        );
        Self {
            tiles: values.mapv(Tile::new),
            config,
            tiles_remaining: config.safe_tiles(),
            flags_placed: 0,
        }
    }

    pub const fn config(&self) -> GameConfig {
        self.config
    }

    pub const fn height(&self) -> Coord {
        self.config.height
    }

    pub const fn width(&self) -> Coord {
        self.config.width
    }

    pub const fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    /// Safe tiles still unrevealed; the game is won when this reaches 0.
    pub const fn tiles_remaining(&self) -> CellCount {
        self.tiles_remaining
    }

    pub const fn flags_placed(&self) -> CellCount {
        self.flags_placed
    }

    /// Mines not yet flagged; negative once the player over-flags.
    pub fn mines_left(&self) -> isize {
        self.config.mines as isize - self.flags_placed as isize
    }

    /// Snapshot of one tile.
    ///
    /// # Panics
    ///
    /// Panics if `coords` lies outside the field; callers clamp first.
    pub fn tile_at(&self, coords: Coord2) -> Tile {
        self.tiles[coords.to_index()]
    }

    /// Reveals a tile, flood-filling outward from zero-valued tiles.
    ///
    /// A Flagged target is revealed exactly like a Hidden one, clearing the
    /// flag on the way; flag state never blocks a reveal. Revealing a mine
    /// leaves every other tile and `tiles_remaining` untouched.
    ///
    /// # Panics
    ///
    /// Panics if `coords` lies outside the field; callers clamp first.
    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if self.tile_at(coords).status() == TileStatus::Revealed {
            return RevealOutcome::AlreadyRevealed;
        }

        self.mark_revealed(coords);
        let target = self.tile_at(coords);
        if target.is_mine() {
            log::debug!("mine struck at {coords:?}");
            return RevealOutcome::Mine;
        }

        let mut cleared: CellCount = 1;
        self.tiles_remaining -= 1;
        if target.value() == 0 {
            // the Revealed status doubles as the visited mark
            let mut worklist = vec![coords];
            while let Some(center) = worklist.pop() {
                for pos in self.tiles.neighbors(center) {
                    if self.tile_at(pos).status() == TileStatus::Revealed {
                        continue;
                    }
                    self.mark_revealed(pos);
                    cleared += 1;
                    self.tiles_remaining -= 1;
                    if self.tile_at(pos).value() == 0 {
                        worklist.push(pos);
                    }
                }
            }
            log::trace!("flood fill from {coords:?} cleared {cleared} tiles");
        }
        RevealOutcome::Cleared(cleared)
    }

    /// Toggles a flag: its own inverse on Hidden and Flagged tiles, a no-op
    /// on Revealed ones.
    ///
    /// # Panics
    ///
    /// Panics if `coords` lies outside the field; callers clamp first.
    pub fn flag(&mut self, coords: Coord2) -> FlagOutcome {
        let tile = &mut self.tiles[coords.to_index()];
        match tile.status() {
            TileStatus::Hidden => {
                tile.set_status(TileStatus::Flagged);
                self.flags_placed += 1;
                FlagOutcome::Toggled
            }
            TileStatus::Flagged => {
                tile.set_status(TileStatus::Hidden);
                self.flags_placed -= 1;
                FlagOutcome::Toggled
            }
            TileStatus::Revealed => FlagOutcome::NoChange,
        }
    }

    fn mark_revealed(&mut self, coords: Coord2) {
        let tile = &mut self.tiles[coords.to_index()];
        if tile.status() == TileStatus::Flagged {
            self.flags_placed -= 1;
        }
        tile.set_status(TileStatus::Revealed);
    }
}
