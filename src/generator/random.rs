use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

/// Purely random placement: each mine is drawn uniformly over the tiles
/// still free. The same seed and config always yield the same field.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomFieldGenerator {
    seed: u64,
}

impl RandomFieldGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl FieldGenerator for RandomFieldGenerator {
    fn generate(self, config: GameConfig) -> Result<Array2<i8>> {
        let config = config.validate()?;
        let size = (config.height as usize, config.width as usize);

        let mut mines: Array2<bool> = Array2::default(size);
        let mut free_tiles = config.total_tiles();
        let mut rng = SmallRng::seed_from_u64(self.seed);
        {
            let tiles = mines.as_slice_mut().expect("layout should be standard");
            for _ in 0..config.mines {
                // map a draw over the free slots onto the flat grid,
                // skipping slots already mined
                let mut place: CellCount = rng.random_range(0..free_tiles);
                for (i, tile) in tiles.iter_mut().enumerate() {
                    if *tile {
                        place += 1;
                    }
                    if i as CellCount == place {
                        *tile = true;
                        free_tiles -= 1;
                        break;
                    }
                }
            }
        }

        Ok(values_from_mines(&mines))
    }
}
