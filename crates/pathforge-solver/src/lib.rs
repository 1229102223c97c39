//! PathForge Solver
//!
//! This crate turns a planning problem into a FlatZinc model, runs an
//! external solver on it and decodes the result:
//! - `DataPathCsp`: builds the model for one path length and decodes solutions
//! - `SolverBackend`: the seam to the solver process (`ProcessSolver`)
//! - `ModelFile`: transient model file, removed when dropped
//! - `Optimizer`: iterative deepening over path lengths

pub mod backend;
pub mod csp;
pub mod error;
pub mod model_file;
pub mod optimizer;

#[cfg(test)]
pub(crate) mod test_utils;

pub use backend::{ProcessSolver, SolverBackend, SolverError};
pub use csp::{Candidate, DataPathCsp, DecodedSolution};
pub use error::OptimizerError;
pub use model_file::ModelFile;
pub use optimizer::Optimizer;
