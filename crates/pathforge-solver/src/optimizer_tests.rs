//! Tests for the iterative-deepening search.

use super::*;
use crate::backend::ProcessSolver;
use crate::test_utils::*;
use pathforge_config::SOLVER_PATH_ENV;
use pathforge_core::DataFlow;

const READ_SOLUTION: &str = "\
moduleType = array1d(1..1, [0]);
moduleCluster = array1d(1..1, [0]);
storageAccount = array1d(1..1, [0]);
moduleSourceInterface = array1d(1..1, [1]);
moduleSinkInterface = array1d(1..1, [2]);
----------
==========
";

fn config_in(dir: &tempfile::TempDir) -> OptimizerConfig {
    OptimizerConfig::new().with_model_dir(dir.path())
}

#[test]
fn test_single_read_hop() {
    let dir = tempfile::tempdir().unwrap();
    let problem = single_cluster_read_problem();
    let solver = MockSolver::new([READ_SOLUTION]);
    let optimizer = Optimizer::new(&problem, &solver, config_in(&dir)).unwrap();

    let solution = optimizer.solve().unwrap();

    assert_eq!(solver.calls(), 1);
    assert_eq!(solution.len(), 1);
    let edge = &solution.data_path[0];
    assert_eq!(edge.module.name, READER_MODULE);
    assert_eq!(edge.module.capabilities[edge.capability_index].capability, "read");
    assert_eq!(edge.cluster, "thegreendragon");
    assert!(edge.storage_account.is_none());
    assert!(edge.actions.is_empty());
    assert_eq!(edge.source.connection.as_ref().unwrap().protocol, "s3");
    assert!(edge.sink.is_virtual);
}

#[test]
fn test_model_file_removed_after_attempt() {
    let dir = tempfile::tempdir().unwrap();
    let problem = single_cluster_read_problem();
    let solver = MockSolver::new([READ_SOLUTION]);
    let optimizer = Optimizer::new(&problem, &solver, config_in(&dir)).unwrap();

    optimizer.solve().unwrap();

    let paths = solver.model_paths();
    assert_eq!(paths.len(), 1);
    assert!(paths[0].starts_with(dir.path()));
    assert!(!paths[0].exists());
    assert!(solver.models()[0].contains("solve satisfy;"));
}

#[test]
fn test_keep_model_files() {
    let dir = tempfile::tempdir().unwrap();
    let problem = single_cluster_read_problem();
    let solver = MockSolver::new([READ_SOLUTION]);
    let config = config_in(&dir).with_keep_model_files(true);
    let optimizer = Optimizer::new(&problem, &solver, config).unwrap();

    optimizer.solve().unwrap();

    assert!(solver.model_paths()[0].exists());
}

#[test]
fn test_unreachable_interface_tries_every_length() {
    let dir = tempfile::tempdir().unwrap();
    let problem = unreachable_problem();
    let solver = MockSolver::unsatisfiable();
    let optimizer = Optimizer::new(&problem, &solver, config_in(&dir)).unwrap();

    let err = optimizer.solve().unwrap_err();

    assert_eq!(solver.calls(), 4);
    match err {
        OptimizerError::NoFeasiblePath {
            dataset_id,
            max_depth,
        } => {
            assert_eq!(dataset_id, problem.dataset_id());
            assert_eq!(max_depth, 4);
        }
        other => panic!("unexpected error: {other}"),
    }
    let models = solver.models();
    for (idx, model) in models.iter().enumerate() {
        let len = idx + 1;
        assert!(model.contains(&format!("array [1..{len}] of var 0..1: moduleType")));
    }
}

#[test]
fn test_empty_completion_moves_to_next_length() {
    let dir = tempfile::tempdir().unwrap();
    let problem = single_cluster_read_problem();
    let copy_then_read = "\
moduleType = array1d(1..2, [1, 0]);
moduleCluster = array1d(1..2, [0, 0]);
storageAccount = array1d(1..2, [0, 0]);
moduleSourceInterface = array1d(1..2, [1, 4]);
moduleSinkInterface = array1d(1..2, [4, 2]);
----------
==========
";
    let solver = MockSolver::new(["==========\n", copy_then_read]);
    let optimizer = Optimizer::new(&problem, &solver, config_in(&dir)).unwrap();

    let solution = optimizer.solve().unwrap();

    assert_eq!(solver.calls(), 2);
    assert_eq!(solution.len(), 2);
    assert_eq!(solution.data_path[0].module.name, COPIER_MODULE);
    assert_eq!(solution.data_path[1].module.name, READER_MODULE);
    assert_eq!(solution.data_path[0].sink, solution.data_path[1].source);
    assert_eq!(
        solution.data_path[1].source.connection.as_ref().unwrap().data_format,
        "parquet"
    );
}

#[test]
fn test_max_depth_bounds_the_search() {
    let dir = tempfile::tempdir().unwrap();
    let problem = unreachable_problem();
    let solver = MockSolver::unsatisfiable();
    let config = config_in(&dir).with_max_depth(2);
    let optimizer = Optimizer::new(&problem, &solver, config).unwrap();

    let err = optimizer.solve().unwrap_err();

    assert_eq!(solver.calls(), 2);
    assert!(err.to_string().contains("1..=2"));
}

#[test]
fn test_solver_failure_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let problem = unreachable_problem();
    let solver = MockSolver::failing();
    let optimizer = Optimizer::new(&problem, &solver, config_in(&dir)).unwrap();

    let err = optimizer.solve().unwrap_err();

    assert_eq!(solver.calls(), 1);
    assert!(matches!(err, OptimizerError::Solver(_)));
    assert!(!solver.model_paths()[0].exists());
}

#[test]
fn test_unknown_status_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let problem = single_cluster_read_problem();
    let solver = MockSolver::new(["=====UNKNOWN=====\n"]);
    let optimizer = Optimizer::new(&problem, &solver, config_in(&dir)).unwrap();

    let err = optimizer.solve().unwrap_err();

    assert_eq!(solver.calls(), 1);
    assert!(matches!(err, OptimizerError::SolverOutput(_)));
}

#[test]
fn test_malformed_output_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let problem = single_cluster_read_problem();
    let solver = MockSolver::new(["moduleType\n----------\n"]);
    let optimizer = Optimizer::new(&problem, &solver, config_in(&dir)).unwrap();

    assert!(matches!(
        optimizer.solve().unwrap_err(),
        OptimizerError::SolverOutput(_)
    ));
}

#[test]
fn test_out_of_range_index_is_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let problem = single_cluster_read_problem();
    let output = READ_SOLUTION.replace(
        "moduleCluster = array1d(1..1, [0])",
        "moduleCluster = array1d(1..1, [7])",
    );
    let solver = MockSolver::new([output]);
    let optimizer = Optimizer::new(&problem, &solver, config_in(&dir)).unwrap();

    assert!(matches!(
        optimizer.solve().unwrap_err(),
        OptimizerError::Decode(_)
    ));
}

#[test]
fn test_invalid_config_is_rejected() {
    let problem = single_cluster_read_problem();
    let solver = MockSolver::unsatisfiable();
    let config = OptimizerConfig::new().with_max_depth(0);

    assert!(matches!(
        Optimizer::new(&problem, &solver, config),
        Err(OptimizerError::Config(_))
    ));
}

#[test]
fn test_missing_model_dir_is_serialization_error() {
    let dir = tempfile::tempdir().unwrap();
    let problem = single_cluster_read_problem();
    let solver = MockSolver::unsatisfiable();
    let config = OptimizerConfig::new().with_model_dir(dir.path().join("missing"));
    let optimizer = Optimizer::new(&problem, &solver, config).unwrap();

    assert!(matches!(
        optimizer.solve().unwrap_err(),
        OptimizerError::ModelSerialization(_)
    ));
    assert_eq!(solver.calls(), 0);
}

#[test]
fn test_write_flow_path_is_reversed() {
    let dir = tempfile::tempdir().unwrap();
    let problem = write_problem();
    assert_eq!(problem.context.flow, DataFlow::Write);
    // copier first in model order, writer second
    let output = "\
moduleType = array1d(1..2, [1, 0]);
moduleCluster = array1d(1..2, [0, 0]);
storageAccount = array1d(1..2, [0, 0]);
moduleSourceInterface = array1d(1..2, [1, 2]);
moduleSinkInterface = array1d(1..2, [2, 3]);
----------
==========
";
    let solver = MockSolver::new([UNSAT_OUTPUT, output]);
    let optimizer = Optimizer::new(&problem, &solver, config_in(&dir)).unwrap();

    let solution = optimizer.solve().unwrap();

    assert_eq!(solution.len(), 2);
    assert_eq!(solution.data_path[0].module.name, "arrow-flight-writer");
    assert_eq!(solution.data_path[1].module.name, COPIER_MODULE);
}

#[test]
fn test_score_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let problem = single_cluster_read_problem();
    let output = READ_SOLUTION.replace("----------", "jointGoal = 250;\n----------");
    let solver = MockSolver::new([output]);
    let optimizer = Optimizer::new(&problem, &solver, config_in(&dir)).unwrap();

    let decoded = optimizer.solve_with_score().unwrap();

    assert_eq!(decoded.score, Some(250));
}

/// Runs the read scenario against a real FlatZinc solver when one is
/// configured through the environment.
#[test]
fn test_real_solver_single_read_hop() {
    let Ok(path) = std::env::var(SOLVER_PATH_ENV) else {
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let problem = single_cluster_read_problem();
    let solver = ProcessSolver::new(path);
    let optimizer = Optimizer::new(&problem, solver, config_in(&dir)).unwrap();

    let solution = optimizer.solve().unwrap();

    assert_eq!(solution.len(), 1);
    assert_eq!(solution.data_path[0].module.name, READER_MODULE);
    assert_eq!(solution.data_path[0].cluster, "thegreendragon");
}
