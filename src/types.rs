use ndarray::Array2;

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-tile counts.
pub type CellCount = u16;

/// Two-dimensional board coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// Conversion from board coordinates to the row-major `[y, x]` index used
/// by the tile grid.
pub trait GridIndex {
    type Output;
    fn to_index(self) -> Self::Output;
}

impl GridIndex for Coord2 {
    type Output = [usize; 2];

    fn to_index(self) -> Self::Output {
        [self.1 as usize, self.0 as usize]
    }
}

pub const fn area(width: Coord, height: Coord) -> CellCount {
    let w = width as CellCount;
    let h = height as CellCount;
    w.saturating_mul(h)
}

pub trait GridNeighbors {
    fn neighbors(&self, center: Coord2) -> NeighborIter;
}

impl<T> GridNeighbors for Array2<T> {
    fn neighbors(&self, center: Coord2) -> NeighborIter {
        let (height, width) = self.dim();
        NeighborIter::new(center, (width as Coord, height as Coord))
    }
}

const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only while it stays
/// inside `bounds`.
fn offset(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let x = coords.0.checked_add_signed(delta.0)?;
    let y = coords.1.checked_add_signed(delta.1)?;
    (x < bounds.0 && y < bounds.1).then_some((x, y))
}

/// Iterator over the up-to-8 in-bounds grid neighbors of a coordinate
/// (Chebyshev distance 1, edges clipped, no wraparound).
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&delta) = OFFSETS.get(usize::from(self.index)) {
            self.index += 1;
            if let Some(pos) = offset(self.center, delta, self.bounds) {
                return Some(pos);
            }
        }
        None
    }
}
