//! Configuration system for PathForge.
//!
//! Load optimizer configuration from TOML or YAML files to choose the
//! solver executable and the search depth without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use pathforge_config::OptimizerConfig;
//!
//! let config = OptimizerConfig::from_toml_str(r#"
//!     max_data_path_depth = 3
//!     keep_model_files = true
//!
//!     [solver]
//!     path = "/usr/bin/fzn-gecode"
//!     args = ["-a"]
//! "#).unwrap();
//!
//! assert_eq!(config.max_data_path_depth, 3);
//! assert_eq!(config.solver.args, vec!["-a"]);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use pathforge_config::OptimizerConfig;
//!
//! let config = OptimizerConfig::load("pathforge.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default bound on the number of modules in a data path.
pub const MAX_DATA_PATH_DEPTH: usize = 4;

/// Environment variable naming the solver executable.
pub const SOLVER_PATH_ENV: &str = "CSP_PATH";

/// Environment variable naming the directory for model files.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main optimizer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct OptimizerConfig {
    /// External solver invocation.
    #[serde(default)]
    pub solver: SolverConfig,

    /// Longest path length tried before giving up.
    #[serde(default = "default_depth")]
    pub max_data_path_depth: usize,

    /// Directory for transient model files; the system temp dir when unset.
    #[serde(default)]
    pub model_dir: Option<PathBuf>,

    /// Keep model files after solving, for debugging.
    #[serde(default)]
    pub keep_model_files: bool,
}

fn default_depth() -> usize {
    MAX_DATA_PATH_DEPTH
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            solver: SolverConfig::default(),
            max_data_path_depth: MAX_DATA_PATH_DEPTH,
            model_dir: None,
            keep_model_files: false,
        }
    }
}

impl OptimizerConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the solver executable.
    pub fn with_solver_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.solver.path = Some(path.into());
        self
    }

    /// Adds an argument passed to the solver before the model file.
    pub fn with_solver_arg(mut self, arg: impl Into<String>) -> Self {
        self.solver.args.push(arg.into());
        self
    }

    /// Sets the longest path length tried.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_data_path_depth = depth;
        self
    }

    /// Sets the directory for model files.
    pub fn with_model_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.model_dir = Some(dir.into());
        self
    }

    /// Keeps model files after solving.
    pub fn with_keep_model_files(mut self, keep: bool) -> Self {
        self.keep_model_files = keep;
        self
    }

    /// Applies `CSP_PATH` and `DATA_DIR` from the environment, when set.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary variable lookup.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup(SOLVER_PATH_ENV).filter(|p| !p.is_empty()) {
            self.solver.path = Some(PathBuf::from(path));
        }
        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
            self.model_dir = Some(PathBuf::from(dir));
        }
        self
    }

    /// Checks that the configuration can drive a search.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_data_path_depth == 0 {
            return Err(ConfigError::Invalid(
                "max_data_path_depth must be at least 1".to_string(),
            ));
        }
        if let Some(dir) = &self.model_dir {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::Invalid("model_dir is empty".to_string()));
            }
        }
        Ok(())
    }

    /// Directory model files are written to.
    pub fn model_dir(&self) -> PathBuf {
        self.model_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

/// External solver invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Solver executable, e.g. a FlatZinc front end such as `fzn-gecode`.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Arguments passed before the model file.
    #[serde(default)]
    pub args: Vec<String>,
}

impl SolverConfig {
    /// The solver executable, or an error when none is configured.
    pub fn executable(&self) -> Result<&Path, ConfigError> {
        self.path.as_deref().ok_or_else(|| {
            ConfigError::Invalid(format!(
                "no solver configured; set solver.path or {SOLVER_PATH_ENV}"
            ))
        })
    }
}

#[cfg(test)]
mod tests;
