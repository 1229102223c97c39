//! Loading problem and configuration files.

use std::path::{Path, PathBuf};

use pathforge::{ConfigError, OptimizerConfig, ProblemData};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unsupported file type: {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(PathBuf),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Reads a problem from a JSON or YAML file, chosen by extension.
pub fn load_problem(path: &Path) -> Result<ProblemData, InputError> {
    let contents = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    match extension(path).as_deref() {
        Some("json") => serde_json::from_str(&contents).map_err(|source| InputError::Json {
            path: path.to_path_buf(),
            source,
        }),
        Some("yaml" | "yml") => serde_yaml::from_str(&contents).map_err(|source| InputError::Yaml {
            path: path.to_path_buf(),
            source,
        }),
        _ => Err(InputError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Reads the optimizer configuration; TOML unless the extension says YAML.
///
/// Without a path the defaults are used. Environment overrides apply in
/// both cases.
pub fn load_config(path: Option<&Path>) -> Result<OptimizerConfig, InputError> {
    let config = match path {
        None => OptimizerConfig::default(),
        Some(path) => match extension(path).as_deref() {
            Some("yaml" | "yml") => OptimizerConfig::from_yaml_file(path)?,
            _ => OptimizerConfig::from_toml_file(path)?,
        },
    };
    Ok(config.with_env_overrides())
}
