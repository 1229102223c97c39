//! Reader for the solver's result stream.
//!
//! Solvers print one block of `name = value;` lines per improving solution,
//! each closed by ten dashes. Ten `=` signs mean the search space was fully
//! explored. Any other line starting with `====` is a status such as
//! `=====UNSATISFIABLE=====` or `=====UNKNOWN=====`. Lines starting with `%`
//! are statistics.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{FznError, Result};
use crate::types::TRUE;

/// Line closing one solution block.
pub const SOLUTION_SEPARATOR: &str = "----------";
/// Line reporting that the search completed.
pub const SEARCH_COMPLETE: &str = "==========";

/// Values of one solution, by variable name.
///
/// Scalars map to a single value, arrays to one value per element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpSolution(BTreeMap<String, Vec<String>>);

impl CpSolution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.0.insert(name.into(), values);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }

    /// Value of a scalar variable.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.value_at(name, 0)
    }

    /// Element `index` (0-based) of an array variable.
    pub fn value_at(&self, name: &str, index: usize) -> Option<&str> {
        self.0.get(name)?.get(index).map(String::as_str)
    }

    /// Element `index` (0-based) parsed as an integer.
    pub fn int_at(&self, name: &str, index: usize) -> Option<i64> {
        self.value_at(name, index)?.parse().ok()
    }

    /// Element `index` (0-based) read as a boolean.
    pub fn bool_at(&self, name: &str, index: usize) -> Option<bool> {
        self.value_at(name, index).map(|v| v == TRUE)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// Parses a result stream and returns the last solution block.
///
/// Assignments after a block separator start a fresh block; earlier blocks
/// are discarded. A stream that completes without reporting any assignment
/// yields an empty solution. A stream that ends without a completion line
/// yields the last closed block, or [`FznError::MissingStatus`] if there is
/// none.
pub fn read_solutions(output: &str) -> Result<CpSolution> {
    let mut current = CpSolution::new();
    let mut last_completed: Option<CpSolution> = None;
    let mut block_closed = false;

    for (idx, raw) in output.lines().enumerate() {
        let line: String = raw.split_whitespace().collect();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }
        if line == SEARCH_COMPLETE {
            return Ok(current);
        }
        if line.starts_with("====") {
            return Err(FznError::NoSolution { status: line });
        }
        if line == SOLUTION_SEPARATOR {
            block_closed = true;
            last_completed = Some(current.clone());
            continue;
        }
        if block_closed {
            current = CpSolution::new();
            block_closed = false;
        }
        let (name, values) = parse_assignment(&line, idx + 1)?;
        current.insert(name, values);
    }

    last_completed.ok_or(FznError::MissingStatus)
}

/// Like [`read_solutions`], reading the stream from a file.
pub fn read_solutions_from_file(path: impl AsRef<Path>) -> Result<CpSolution> {
    let output = std::fs::read_to_string(path)?;
    read_solutions(&output)
}

fn parse_assignment(line: &str, line_number: usize) -> Result<(String, Vec<String>)> {
    let parse_error = || FznError::Parse {
        line: line_number,
        content: line.to_string(),
    };
    let mut parts = line.split('=');
    let (Some(name), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(parse_error());
    };
    if name.is_empty() {
        return Err(parse_error());
    }
    let value = value.strip_suffix(';').unwrap_or(value);
    if !value.starts_with("array") {
        return Ok((name.to_string(), vec![value.to_string()]));
    }
    let (Some(left), Some(right)) = (value.find('['), value.find(']')) else {
        return Err(parse_error());
    };
    if left > right {
        return Err(parse_error());
    }
    let inner = &value[left + 1..right];
    let values = if inner.is_empty() {
        Vec::new()
    } else {
        inner.split(',').map(str::to_string).collect()
    };
    Ok((name.to_string(), values))
}

#[cfg(test)]
#[path = "solution_tests.rs"]
mod tests;
