use ndarray::Array2;

use crate::*;

pub use random::*;

mod random;

/// Produces the value grid for a new field: [`MINE`] at every mine
/// position, the exact 8-neighborhood mine count everywhere else.
///
/// Implementations must validate the config before placing anything, and
/// are consumed per board so that a fresh generator (and seed) backs every
/// field.
pub trait FieldGenerator {
    fn generate(self, config: GameConfig) -> Result<Array2<i8>>;
}

/// Expands a mine mask into the value grid described by [`FieldGenerator`].
pub(crate) fn values_from_mines(mines: &Array2<bool>) -> Array2<i8> {
    Array2::from_shape_fn(mines.dim(), |(row, col)| {
        if mines[[row, col]] {
            MINE
        } else {
            let center = (col as Coord, row as Coord);
            mines
                .neighbors(center)
                .filter(|&pos| mines[pos.to_index()])
                .count() as i8
        }
    })
}
