//! The `plan` and `model` subcommands.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use pathforge::{
    DataPathCsp, DecodedSolution, FznError, OptimizerError, ResolvedEdge,
};
use serde::Serialize;
use thiserror::Error;

use crate::input::{load_config, load_problem, InputError};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Optimizer(#[from] OptimizerError),

    #[error("cannot write model: {0}")]
    Model(#[from] FznError),

    #[error("path length must be at least 1")]
    ZeroLength,

    #[error("cannot encode result: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug)]
pub struct PlanArgs {
    pub problem: PathBuf,
    pub config: Option<PathBuf>,
    pub solver: Option<PathBuf>,
    pub max_depth: Option<usize>,
    pub json: bool,
}

/// Machine-readable plan output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanReport<'a> {
    dataset_id: &'a str,
    path_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<i64>,
    data_path: &'a [ResolvedEdge],
}

pub fn plan(args: &PlanArgs) -> Result<(), CliError> {
    let problem = load_problem(&args.problem)?;
    let mut config = load_config(args.config.as_deref())?;
    if let Some(solver) = &args.solver {
        config = config.with_solver_path(solver);
    }
    if let Some(depth) = args.max_depth {
        config = config.with_max_depth(depth);
    }

    let decoded = pathforge::plan_with_config(&problem, config)?;
    let mut out = io::stdout().lock();
    if args.json {
        let report = PlanReport {
            dataset_id: problem.dataset_id(),
            path_length: decoded.solution.len(),
            score: decoded.score,
            data_path: &decoded.solution.data_path,
        };
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        write_plan(&mut out, problem.dataset_id(), &decoded)?;
    }
    Ok(())
}

fn write_plan<W: Write>(out: &mut W, dataset_id: &str, decoded: &DecodedSolution) -> io::Result<()> {
    writeln!(
        out,
        "{} {} ({} modules)",
        "Data path for".bright_cyan(),
        dataset_id.white().bold(),
        decoded.solution.len()
    )?;
    for (idx, edge) in decoded.solution.iter().enumerate() {
        writeln!(out, "  {:>2}. {}", idx + 1, edge)?;
    }
    if let Some(score) = decoded.score {
        writeln!(out, "{} {}", "Score:".bright_cyan(), score.bright_magenta())?;
    }
    Ok(())
}

pub fn model(problem: &Path, length: usize, output: Option<&Path>) -> Result<(), CliError> {
    if length == 0 {
        return Err(CliError::ZeroLength);
    }
    let problem = load_problem(problem)?;
    let csp = DataPathCsp::new(&problem);
    let model = csp.build_model(length)?;
    match output {
        Some(path) => model.dump(path)?,
        None => {
            let mut out = io::stdout().lock();
            model.write_to(&mut out)?;
        }
    }
    Ok(())
}
