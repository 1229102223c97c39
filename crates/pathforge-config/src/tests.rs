//! Tests for optimizer configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        max_data_path_depth = 2
        model_dir = "/var/lib/pathforge"
        keep_model_files = true

        [solver]
        path = "/opt/solver/fzn-cp"
        args = ["-a", "--time", "30000"]
    "#;

    let config = OptimizerConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.max_data_path_depth, 2);
    assert_eq!(config.model_dir(), PathBuf::from("/var/lib/pathforge"));
    assert!(config.keep_model_files);
    assert_eq!(
        config.solver.executable().unwrap(),
        Path::new("/opt/solver/fzn-cp")
    );
    assert_eq!(config.solver.args.len(), 3);
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        max_data_path_depth: 3
        solver:
          path: /usr/bin/fzn-gecode
    "#;

    let config = OptimizerConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.max_data_path_depth, 3);
    assert!(config.solver.args.is_empty());
    assert!(!config.keep_model_files);
}

#[test]
fn test_defaults() {
    let config = OptimizerConfig::from_toml_str("").unwrap();
    assert_eq!(config, OptimizerConfig::default());
    assert_eq!(config.max_data_path_depth, MAX_DATA_PATH_DEPTH);
    assert_eq!(config.model_dir(), std::env::temp_dir());
    assert!(matches!(
        config.solver.executable(),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn test_builder() {
    let config = OptimizerConfig::new()
        .with_solver_path("/bin/solver")
        .with_solver_arg("-a")
        .with_max_depth(6)
        .with_model_dir("/tmp/models")
        .with_keep_model_files(true);

    assert_eq!(config.solver.path, Some(PathBuf::from("/bin/solver")));
    assert_eq!(config.solver.args, vec!["-a".to_string()]);
    assert_eq!(config.max_data_path_depth, 6);
    assert_eq!(config.model_dir(), PathBuf::from("/tmp/models"));
    assert!(config.keep_model_files);
    assert!(config.validate().is_ok());
}

#[test]
fn test_overrides() {
    let config = OptimizerConfig::new()
        .with_solver_path("/bin/old")
        .with_overrides_from(|key| match key {
            SOLVER_PATH_ENV => Some("/bin/new".to_string()),
            DATA_DIR_ENV => Some(String::new()),
            _ => None,
        });
    assert_eq!(config.solver.path, Some(PathBuf::from("/bin/new")));
    assert_eq!(config.model_dir, None);
}

#[test]
fn test_validate_rejects_zero_depth() {
    let err = OptimizerConfig::new().with_max_depth(0).validate().unwrap_err();
    assert!(err.to_string().contains("max_data_path_depth"));
}

#[test]
fn test_load_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let toml_path = dir.path().join("pathforge.toml");
    std::fs::write(&toml_path, "max_data_path_depth = 5\n").unwrap();
    assert_eq!(OptimizerConfig::load(&toml_path).unwrap().max_data_path_depth, 5);

    let yaml_path = dir.path().join("pathforge.yaml");
    std::fs::write(&yaml_path, "keep_model_files: true\n").unwrap();
    assert!(OptimizerConfig::from_yaml_file(&yaml_path).unwrap().keep_model_files);

    assert!(matches!(
        OptimizerConfig::load(dir.path().join("missing.toml")),
        Err(ConfigError::Io(_))
    ));
    assert!(matches!(
        OptimizerConfig::from_toml_str("max_data_path_depth = \"deep\""),
        Err(ConfigError::Toml(_))
    ));
}
