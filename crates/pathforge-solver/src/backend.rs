//! The seam between the model builder and the external solver.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use pathforge_config::{ConfigError, SolverConfig};
use thiserror::Error;
use tracing::debug;

/// Solver invocation failures.
#[derive(Debug, Error)]
pub enum SolverError {
    /// The executable is missing or cannot be started
    #[error("failed to run solver {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The solver ran but exited unsuccessfully
    #[error("solver {program} exited with code {code:?}: {stderr}")]
    Failed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
}

/// Runs a solver on a model file and returns its result stream.
pub trait SolverBackend: fmt::Debug {
    fn run(&self, model_file: &Path) -> Result<String, SolverError>;
}

impl<T: SolverBackend + ?Sized> SolverBackend for &T {
    fn run(&self, model_file: &Path) -> Result<String, SolverError> {
        (**self).run(model_file)
    }
}

impl<T: SolverBackend + ?Sized> SolverBackend for Box<T> {
    fn run(&self, model_file: &Path) -> Result<String, SolverError> {
        (**self).run(model_file)
    }
}

/// Runs a FlatZinc solver executable as a subprocess.
///
/// The model file is passed as the last argument; standard output is the
/// result stream.
#[derive(Debug, Clone)]
pub struct ProcessSolver {
    program: PathBuf,
    args: Vec<String>,
}

impl ProcessSolver {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Builds a solver from configuration; fails if no executable is set.
    pub fn from_config(config: &SolverConfig) -> Result<Self, ConfigError> {
        let program = config.executable()?;
        Ok(Self {
            program: program.to_path_buf(),
            args: config.args.clone(),
        })
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl SolverBackend for ProcessSolver {
    fn run(&self, model_file: &Path) -> Result<String, SolverError> {
        let program = self.program.display().to_string();
        debug!(
            event = "solver_spawn",
            program = %program,
            model = %model_file.display(),
        );

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(model_file)
            .output()
            .map_err(|source| SolverError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(SolverError::Failed {
                program,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
