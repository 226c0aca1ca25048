use serde::{Deserialize, Serialize};

/// Single coordinate axis used for grid rows, columns, and positions.
pub type Coord = u8;

/// Count type used for total-cell counts and attempt budgets.
pub type CellCount = u16;

/// Row-major position of a cell, `row * cols + col`.
pub type CellIndex = CellCount;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub rows: Coord,
    pub cols: Coord,
}

impl GridSize {
    pub const fn new(rows: Coord, cols: Coord) -> Self {
        Self { rows, cols }
    }

    pub const fn total_cells(self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn is_empty(self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    pub const fn contains(self, index: CellIndex) -> bool {
        index < self.total_cells()
    }

    /// Converts a row-major index into `(row, col)`, `None` when out of range.
    pub const fn coords_of(self, index: CellIndex) -> Option<Coord2> {
        if !self.contains(index) {
            return None;
        }
        let cols = self.cols as CellIndex;
        Some(((index / cols) as Coord, (index % cols) as Coord))
    }

    pub const fn index_of(self, (row, col): Coord2) -> Option<CellIndex> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(row as CellIndex * self.cols as CellIndex + col as CellIndex)
    }

    pub(crate) fn to_nd_shape(self) -> (usize, usize) {
        (self.rows.into(), self.cols.into())
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::new(4, 4)
    }
}
