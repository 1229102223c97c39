//! Iterative deepening over path lengths.

use std::time::Instant;

use pathforge_config::OptimizerConfig;
use pathforge_core::{ProblemData, Solution};
use tracing::{debug, error, info, trace};

use crate::backend::SolverBackend;
use crate::csp::{DataPathCsp, DecodedSolution};
use crate::error::OptimizerError;
use crate::model_file::ModelFile;

/// Finds the shortest data path satisfying a problem.
///
/// Path lengths `1..=max_data_path_depth` are tried in order; the first
/// length whose model the solver can satisfy wins. An unsatisfiable model
/// moves on to the next length, any other failure aborts the search.
///
/// # Example
///
/// ```no_run
/// use pathforge_config::OptimizerConfig;
/// use pathforge_core::{Cluster, ProblemData};
/// use pathforge_solver::{Optimizer, ProcessSolver};
///
/// let problem = ProblemData::new("s3/allData", Cluster::new("thegreendragon", "theshire"));
/// let config = OptimizerConfig::new().with_solver_path("/usr/bin/fzn-gecode");
/// let solver = ProcessSolver::from_config(&config.solver)?;
///
/// let optimizer = Optimizer::new(&problem, solver, config)?;
/// let solution = optimizer.solve()?;
/// println!("{solution}");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Optimizer<'a, B> {
    csp: DataPathCsp<'a>,
    backend: B,
    config: OptimizerConfig,
}

impl<'a, B: SolverBackend> Optimizer<'a, B> {
    /// Creates an optimizer; fails if the configuration is invalid.
    pub fn new(
        problem: &'a ProblemData,
        backend: B,
        config: OptimizerConfig,
    ) -> Result<Self, OptimizerError> {
        config.validate()?;
        Ok(Self {
            csp: DataPathCsp::new(problem),
            backend,
            config,
        })
    }

    pub fn csp(&self) -> &DataPathCsp<'a> {
        &self.csp
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Returns the shortest feasible path.
    pub fn solve(&self) -> Result<Solution, OptimizerError> {
        self.solve_with_score().map(|decoded| decoded.solution)
    }

    /// Returns the shortest feasible path and its objective value.
    pub fn solve_with_score(&self) -> Result<DecodedSolution, OptimizerError> {
        let problem = self.csp.problem();
        let max_depth = self.config.max_data_path_depth;
        let start = Instant::now();
        info!(
            event = "solve_start",
            dataset = %problem.dataset_id(),
            candidate_count = self.csp.candidates().len(),
            cluster_count = problem.clusters.len(),
            max_depth = max_depth,
        );

        for len in 1..=max_depth {
            let decoded = self.attempt(len)?;
            if !decoded.is_empty() {
                info!(
                    event = "solve_end",
                    path_length = len,
                    score = ?decoded.score,
                    duration_ms = start.elapsed().as_millis() as u64,
                );
                return Ok(decoded);
            }
        }

        error!(
            event = "no_feasible_path",
            dataset = %problem.dataset_id(),
            max_depth = max_depth,
        );
        Err(OptimizerError::NoFeasiblePath {
            dataset_id: problem.dataset_id().to_string(),
            max_depth,
        })
    }

    /// Builds, solves and decodes the model for one path length.
    ///
    /// The model file is removed before the solver result is inspected,
    /// unless the configuration keeps model files.
    pub fn attempt(&self, len: usize) -> Result<DecodedSolution, OptimizerError> {
        let model = self.csp.build_model(len)?;
        let file = ModelFile::create(&self.config.model_dir(), &model)
            .map_err(OptimizerError::ModelSerialization)?;
        debug!(
            event = "attempt_start",
            path_length = len,
            model = %file.path().display(),
            constraints = model.constraint_count(),
        );

        let output = self.backend.run(file.path());
        if self.config.keep_model_files {
            match file.keep() {
                Ok(path) => debug!(event = "model_kept", model = %path.display()),
                Err(e) => debug!(event = "model_keep_failed", error = %e),
            }
        } else {
            drop(file);
        }
        let output = output?;
        trace!(event = "solver_output", path_length = len, output = %output);

        let decoded = self.csp.decode_solution(&output, len)?;
        debug!(
            event = "attempt_end",
            path_length = len,
            output_bytes = output.len(),
            found = !decoded.is_empty(),
        );
        Ok(decoded)
    }
}

#[cfg(test)]
#[path = "optimizer_tests.rs"]
mod tests;
