//! Error types for the optimizer

use pathforge_config::ConfigError;
use pathforge_core::PathForgeError;
use pathforge_fzn::FznError;
use thiserror::Error;

use crate::backend::SolverError;

/// Errors that abort a search.
///
/// "No path at this length" is not an error; only `NoFeasiblePath` reports
/// that every length up to the bound was tried.
#[derive(Debug, Error)]
pub enum OptimizerError {
    /// The model file could not be created or written
    #[error("model serialization failed: {0}")]
    ModelSerialization(#[source] FznError),

    /// The solver could not be started or exited with an error
    #[error(transparent)]
    Solver(#[from] SolverError),

    /// The solver output is malformed or reports an unexpected status
    #[error("unexpected solver output: {0}")]
    SolverOutput(#[source] FznError),

    /// The problem cannot be encoded
    #[error(transparent)]
    Problem(#[from] PathForgeError),

    /// The solver assignment does not fit the model
    #[error("cannot decode solver solution: {0}")]
    Decode(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No path up to the maximal length satisfies the constraints
    #[error("no feasible data path for data set {dataset_id} (tried path lengths 1..={max_depth})")]
    NoFeasiblePath { dataset_id: String, max_depth: usize },
}
