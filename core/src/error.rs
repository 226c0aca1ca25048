use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ChallengeError {
    #[error("No shape-bearing cell after {attempts} generation attempts")]
    EmptyGrid { attempts: CellCount },
    #[error("Invalid cell index")]
    InvalidCellIndex,
    #[error("Challenge already ended, no further interaction is accepted")]
    AlreadyEnded,
    #[error("Grid must have at least one row and one column")]
    EmptyGridSize,
    #[error("At least one attempt must be allowed")]
    NoAttempts,
    #[error("Shape set is empty")]
    EmptyShapeSet,
    #[error("Tint set is empty")]
    EmptyTintSet,
    #[error("Shape probability must be within [0, 1]")]
    InvalidShapeProbability,
}

pub type Result<T> = core::result::Result<T, ChallengeError>;
