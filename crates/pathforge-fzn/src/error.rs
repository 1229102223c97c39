//! Error types for model serialization and result parsing

use thiserror::Error;

/// Errors raised while dumping a model or reading solver output
#[derive(Debug, Error)]
pub enum FznError {
    /// Model file or result file could not be written or read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed assignment line (1-based line number)
    #[error("parse error on line {line}: {content}")]
    Parse { line: usize, content: String },

    /// Solver reported a status other than search completion
    #[error("no solution found, solver says {status}")]
    NoSolution { status: String },

    /// Stream ended without a solution boundary or a status line
    #[error("no solution was found; no solver status was found either")]
    MissingStatus,
}

impl FznError {
    /// True if the solver proved the model unsatisfiable.
    pub fn is_unsatisfiable(&self) -> bool {
        matches!(self, FznError::NoSolution { status } if status.contains("UNSATISFIABLE"))
    }
}

/// Result type alias for FlatZinc operations
pub type Result<T> = std::result::Result<T, FznError>;
