//! Planning entry points that hide the solver wiring.

use pathforge_config::OptimizerConfig;
use pathforge_core::ProblemData;
use pathforge_solver::{DecodedSolution, Optimizer, OptimizerError, ProcessSolver};

/// Configuration file read by [`plan`] from the working directory.
pub const CONFIG_FILE: &str = "pathforge.toml";

/// Plans the shortest data path for `problem`.
///
/// Reads `pathforge.toml` when present (defaults otherwise), then applies
/// the `CSP_PATH` and `DATA_DIR` environment overrides.
pub fn plan(problem: &ProblemData) -> Result<DecodedSolution, OptimizerError> {
    let config = OptimizerConfig::load(CONFIG_FILE)
        .unwrap_or_default()
        .with_env_overrides();
    plan_with_config(problem, config)
}

/// Plans the shortest data path for `problem` with an explicit configuration.
pub fn plan_with_config(
    problem: &ProblemData,
    config: OptimizerConfig,
) -> Result<DecodedSolution, OptimizerError> {
    #[cfg(feature = "console")]
    crate::console::init();

    let solver = ProcessSolver::from_config(&config.solver)?;
    let optimizer = Optimizer::new(problem, solver, config)?;
    optimizer.solve_with_score()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathforge_config::ConfigError;
    use pathforge_test::single_cluster_read_problem;

    #[test]
    fn test_missing_solver_is_config_error() {
        let problem = single_cluster_read_problem();
        let err = plan_with_config(&problem, OptimizerConfig::new()).unwrap_err();

        assert!(matches!(err, OptimizerError::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_zero_depth_is_rejected_before_solving() {
        let problem = single_cluster_read_problem();
        let config = OptimizerConfig::new()
            .with_solver_path("/nonexistent/fzn-solver")
            .with_max_depth(0);

        let err = plan_with_config(&problem, config).unwrap_err();
        assert!(matches!(err, OptimizerError::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_binary_aborts_search() {
        let dir = tempfile::tempdir().unwrap();
        let problem = single_cluster_read_problem();
        let config = OptimizerConfig::new()
            .with_solver_path("/nonexistent/fzn-solver")
            .with_model_dir(dir.path());

        let err = plan_with_config(&problem, config).unwrap_err();
        assert!(matches!(err, OptimizerError::Solver(_)));
        // the model file is removed even though the solver never ran
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
