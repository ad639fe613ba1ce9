use thiserror::Error;

use crate::solvers::Solver;

/// Errors raised by maze construction, generation and search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    /// Width or height of zero, or a grid with more wall records than `u32` weights.
    #[error("unsupported maze dimensions {width}x{height}")]
    InvalidDimensions { width: u16, height: u16 },

    /// A search was requested before the generator exhausted its worklist.
    #[error("cannot search the maze while it is still being generated")]
    GenerationInProgress,

    /// A search step or move was requested with no search started.
    #[error("no search is in progress")]
    NoActiveSearch,

    /// A search ran out of nodes without reaching the target. The generator always
    /// produces a connected maze, so this means the wall set or the connectivity
    /// sets are corrupted.
    #[error("{solver} became inconsistent: {reason}")]
    Inconsistent { solver: Solver, reason: String },
}

impl MazeError {
    /// Whether the caller can carry on after this error with the state untouched.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            MazeError::GenerationInProgress | MazeError::NoActiveSearch
        )
    }
}

impl From<MazeError> for std::io::Error {
    fn from(err: MazeError) -> Self {
        let kind = match err {
            MazeError::InvalidDimensions { .. } => std::io::ErrorKind::InvalidInput,
            _ => std::io::ErrorKind::Other,
        };
        std::io::Error::new(kind, err)
    }
}
