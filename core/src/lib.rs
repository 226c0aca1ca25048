#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use capture::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use layout::*;
pub use mapper::*;
pub use selection::*;
pub use session::*;
pub use types::*;
pub use validator::*;

mod capture;
mod cell;
mod error;
mod generator;
mod layout;
mod mapper;
mod selection;
mod session;
mod types;
mod validator;

/// How the target is derived and which cell attributes it compares.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variant {
    /// Target shape drawn from the whole shape set, tint ignored.
    ShapeOnly,
    /// Target copied from a shape-bearing cell, shape and tint compared.
    #[default]
    ShapeAndTint,
}

impl Variant {
    pub const fn default_shape_probability(self) -> f64 {
        match self {
            Self::ShapeOnly => 0.5,
            Self::ShapeAndTint => 0.6,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChallengeConfig {
    pub size: GridSize,
    pub max_attempts: CellCount,
    pub variant: Variant,
    /// Probability of a cell carrying a shape, `None` uses the variant default.
    pub shape_probability: Option<f64>,
    pub shapes: Vec<Shape>,
    pub tints: Vec<Tint>,
    /// Makes `ShapeOnly` draw its target from the grid as well.
    pub require_satisfiable: bool,
    /// Upper bound on grid resampling when a target must come from the grid.
    pub max_regenerations: CellCount,
}

impl ChallengeConfig {
    pub const DEFAULT_MAX_ATTEMPTS: CellCount = 3;
    pub const DEFAULT_MAX_REGENERATIONS: CellCount = 64;

    pub fn new(size: GridSize, variant: Variant) -> Self {
        Self {
            size,
            variant,
            ..Default::default()
        }
    }

    pub fn shape_probability(&self) -> f64 {
        self.shape_probability
            .unwrap_or_else(|| self.variant.default_shape_probability())
    }

    pub const fn total_cells(&self) -> CellCount {
        self.size.total_cells()
    }

    /// Whether the target has to be taken from an existing shape-bearing cell.
    pub const fn needs_satisfiable_target(&self) -> bool {
        matches!(self.variant, Variant::ShapeAndTint) || self.require_satisfiable
    }

    pub fn validate(&self) -> Result<()> {
        if self.size.is_empty() {
            return Err(ChallengeError::EmptyGridSize);
        }
        if self.max_attempts == 0 {
            return Err(ChallengeError::NoAttempts);
        }
        if self.shapes.is_empty() {
            return Err(ChallengeError::EmptyShapeSet);
        }
        if self.tints.is_empty() {
            return Err(ChallengeError::EmptyTintSet);
        }
        let probability = self.shape_probability();
        if !(0.0..=1.0).contains(&probability) {
            return Err(ChallengeError::InvalidShapeProbability);
        }
        Ok(())
    }
}

impl Default for ChallengeConfig {
    fn default() -> Self {
        Self {
            size: GridSize::default(),
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            variant: Variant::default(),
            shape_probability: None,
            shapes: Shape::ALL.to_vec(),
            tints: Tint::ALL.to_vec(),
            require_satisfiable: false,
            max_regenerations: Self::DEFAULT_MAX_REGENERATIONS,
        }
    }
}

/// Row-major grid of cells, fixed once generated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    size: GridSize,
    cells: Array2<Cell>,
}

impl Grid {
    pub fn empty(size: GridSize) -> Self {
        Self {
            size,
            cells: Array2::default(size.to_nd_shape()),
        }
    }

    /// Builds a grid by calling `f` once per cell in row-major order.
    pub fn from_fn(size: GridSize, mut f: impl FnMut(CellIndex) -> Cell) -> Self {
        let cols = CellIndex::from(size.cols);
        let cells = Array2::from_shape_fn(size.to_nd_shape(), |(row, col)| {
            // both fit in `Coord`, as they come from `size`
            f(row as CellIndex * cols + col as CellIndex)
        });
        Self { size, cells }
    }

    /// Builds a grid that is empty except for the listed cells.
    pub fn from_cells(size: GridSize, cells: &[(CellIndex, Cell)]) -> Result<Self> {
        let mut grid = Self::empty(size);
        for &(index, cell) in cells {
            let coords = size
                .coords_of(index)
                .ok_or(ChallengeError::InvalidCellIndex)?;
            grid.cells[coords.to_nd_index()] = cell;
        }
        Ok(grid)
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn total_cells(&self) -> CellCount {
        self.size.total_cells()
    }

    pub fn validate_index(&self, index: CellIndex) -> Result<CellIndex> {
        if self.size.contains(index) {
            Ok(index)
        } else {
            Err(ChallengeError::InvalidCellIndex)
        }
    }

    pub fn get(&self, index: CellIndex) -> Option<Cell> {
        let coords = self.size.coords_of(index)?;
        Some(self.cells[coords.to_nd_index()])
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (CellIndex, Cell)> + '_ {
        (0..self.total_cells()).zip(self.cells.iter().copied())
    }

    pub fn shape_bearing_count(&self) -> CellCount {
        self.count_where(|cell| cell.has_shape())
    }

    pub fn count_matching(&self, target: &TargetCriterion) -> CellCount {
        self.count_where(|cell| target.matches(cell))
    }

    fn count_where(&self, pred: impl Fn(Cell) -> bool) -> CellCount {
        let count = self.cells.iter().filter(|&&cell| pred(cell)).count();
        // bounded by `total_cells`, which is a `CellCount`
        count as CellCount
    }
}

impl Index<CellIndex> for Grid {
    type Output = Cell;

    fn index(&self, index: CellIndex) -> &Self::Output {
        let cols = CellIndex::from(self.size.cols);
        &self.cells[[usize::from(index / cols), usize::from(index % cols)]]
    }
}

/// One generated grid with its target, live until reset or a terminal state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub grid: Grid,
    pub target: TargetCriterion,
}

impl Challenge {
    pub fn new(grid: Grid, target: TargetCriterion) -> Self {
        Self { grid, target }
    }

    pub fn correct_set(&self) -> Selection {
        correct_set(&self.grid, &self.target)
    }

    pub fn is_satisfiable(&self) -> bool {
        self.grid.count_matching(&self.target) > 0
    }

    pub fn is_correct(&self, selection: &Selection) -> bool {
        is_correct(&self.grid, &self.target, selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_classic_layout() {
        let config = ChallengeConfig::default();

        assert_eq!(config.size, GridSize::new(4, 4));
        assert_eq!(config.total_cells(), 16);
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.shape_probability(), 0.6);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn shape_probability_follows_variant_unless_overridden() {
        let mut config = ChallengeConfig::new(GridSize::new(2, 2), Variant::ShapeOnly);
        assert_eq!(config.shape_probability(), 0.5);

        config.shape_probability = Some(0.25);
        assert_eq!(config.shape_probability(), 0.25);
    }

    #[test]
    fn validate_rejects_misconfiguration() {
        let base = ChallengeConfig::default();

        let mut config = base.clone();
        config.size = GridSize::new(0, 4);
        assert_eq!(config.validate(), Err(ChallengeError::EmptyGridSize));

        let mut config = base.clone();
        config.max_attempts = 0;
        assert_eq!(config.validate(), Err(ChallengeError::NoAttempts));

        let mut config = base.clone();
        config.shapes.clear();
        assert_eq!(config.validate(), Err(ChallengeError::EmptyShapeSet));

        let mut config = base.clone();
        config.tints.clear();
        assert_eq!(config.validate(), Err(ChallengeError::EmptyTintSet));

        let mut config = base.clone();
        config.shape_probability = Some(1.5);
        assert_eq!(
            config.validate(),
            Err(ChallengeError::InvalidShapeProbability)
        );

        let mut config = base;
        config.shape_probability = Some(f64::NAN);
        assert_eq!(
            config.validate(),
            Err(ChallengeError::InvalidShapeProbability)
        );
    }

    #[test]
    fn partial_json_config_keeps_defaults() {
        let config: ChallengeConfig =
            serde_json::from_str(r#"{"size":{"rows":3,"cols":5},"variant":"ShapeOnly"}"#)
                .unwrap();

        assert_eq!(config.size, GridSize::new(3, 5));
        assert_eq!(config.variant, Variant::ShapeOnly);
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.shapes, Shape::ALL.to_vec());
        assert!(!config.require_satisfiable);
    }

    #[test]
    fn grid_from_cells_places_marks_row_major() {
        let size = GridSize::new(4, 4);
        let grid = Grid::from_cells(
            size,
            &[
                (2, Cell::marked(Shape::Square, Tint::Red)),
                (7, Cell::marked(Shape::Circle, Tint::Blue)),
            ],
        )
        .unwrap();

        assert_eq!(grid.cell_at((0, 2)), Cell::marked(Shape::Square, Tint::Red));
        assert_eq!(grid.cell_at((1, 3)), Cell::marked(Shape::Circle, Tint::Blue));
        assert_eq!(grid[7], Cell::marked(Shape::Circle, Tint::Blue));
        assert_eq!(grid.get(16), None);
        assert_eq!(grid.shape_bearing_count(), 2);
    }

    #[test]
    fn grid_from_cells_rejects_out_of_range_index() {
        let result = Grid::from_cells(GridSize::new(2, 2), &[(4, Cell::Empty)]);

        assert_eq!(result, Err(ChallengeError::InvalidCellIndex));
    }

    #[test]
    fn grid_from_fn_visits_indices_in_order() {
        let size = GridSize::new(2, 3);
        let grid = Grid::from_fn(size, |index| {
            if index % 2 == 0 {
                Cell::marked(Shape::Triangle, Tint::Green)
            } else {
                Cell::Empty
            }
        });

        let marked: Vec<CellIndex> = grid
            .iter()
            .filter(|(_, cell)| cell.has_shape())
            .map(|(index, _)| index)
            .collect();
        assert_eq!(marked, [0, 2, 4]);
    }
}
