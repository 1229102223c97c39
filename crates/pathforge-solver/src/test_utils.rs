//! Test utilities for pathforge-solver
//!
//! Provides a canned-output solver backend and re-exports the problem
//! fixtures from pathforge-test.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::backend::{SolverBackend, SolverError};

pub use pathforge_test::modules::{COPIER_MODULE, READER_MODULE, REDACT_ACTION};
pub use pathforge_test::{
    cost_attributes, multi_cluster_problem, single_cluster_read_problem, unreachable_problem,
    write_problem,
};

/// Result stream of an unsatisfiable model.
pub const UNSAT_OUTPUT: &str = "=====UNSATISFIABLE=====\n";

/// A solver double returning canned result streams.
///
/// Replies are returned in order; the last one is repeated once the list is
/// exhausted. Every model it is run on is recorded.
#[derive(Debug, Default)]
pub struct MockSolver {
    replies: Vec<Option<String>>,
    models: RefCell<Vec<String>>,
    paths: RefCell<Vec<PathBuf>>,
}

impl MockSolver {
    pub fn new<I, S>(outputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: outputs.into_iter().map(|o| Some(o.into())).collect(),
            ..Self::default()
        }
    }

    /// A solver that always reports unsatisfiable.
    pub fn unsatisfiable() -> Self {
        Self::new([UNSAT_OUTPUT])
    }

    /// A solver that always exits with code 1.
    pub fn failing() -> Self {
        Self {
            replies: vec![None],
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.models.borrow().len()
    }

    /// Text of every model the solver was run on, in order.
    pub fn models(&self) -> Vec<String> {
        self.models.borrow().clone()
    }

    /// Paths of every model file the solver was run on.
    pub fn model_paths(&self) -> Vec<PathBuf> {
        self.paths.borrow().clone()
    }
}

impl SolverBackend for MockSolver {
    fn run(&self, model_file: &Path) -> Result<String, SolverError> {
        let text = std::fs::read_to_string(model_file).map_err(|source| SolverError::Spawn {
            program: "mock".to_string(),
            source,
        })?;
        let call = self.models.borrow().len();
        self.models.borrow_mut().push(text);
        self.paths.borrow_mut().push(model_file.to_path_buf());

        let reply = self
            .replies
            .get(call)
            .or_else(|| self.replies.last())
            .cloned()
            .flatten();
        reply.ok_or_else(|| SolverError::Failed {
            program: "mock".to_string(),
            code: Some(1),
            stderr: "mock failure".to_string(),
        })
    }
}
