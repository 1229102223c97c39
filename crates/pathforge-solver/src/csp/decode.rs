//! Decoding solver assignments back into a data path.

use pathforge_core::{DataFlow, Edge, Interface, Node, ResolvedEdge, Solution};
use pathforge_fzn::{read_solutions, CpSolution, FznError};
use tracing::{debug, warn};

use super::{
    DataPathCsp, CLUSTER_VAR, JOINT_GOAL_VAR, MODULE_VAR, SINK_INTERFACE_VAR,
    SOURCE_INTERFACE_VAR, STORAGE_VAR,
};
use crate::error::OptimizerError;

/// A decoded path and its objective value, if the model had goals.
///
/// An empty solution means no path of the attempted length exists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedSolution {
    pub solution: Solution,
    pub score: Option<i64>,
}

impl DecodedSolution {
    pub fn is_empty(&self) -> bool {
        self.solution.is_empty()
    }
}

impl DataPathCsp<'_> {
    /// Decodes a solver result stream for a path of `len` modules.
    ///
    /// An unsatisfiable model yields an empty solution; malformed output and
    /// any other status are errors.
    pub fn decode_solution(
        &self,
        output: &str,
        len: usize,
    ) -> Result<DecodedSolution, OptimizerError> {
        let assignment = match read_solutions(output) {
            Ok(assignment) => assignment,
            Err(e) if e.is_unsatisfiable() => {
                debug!(event = "unsatisfiable", path_length = len);
                return Ok(DecodedSolution::default());
            }
            Err(e) => {
                if let FznError::NoSolution { status } = &e {
                    warn!(event = "solver_status", path_length = len, status = %status);
                }
                return Err(OptimizerError::SolverOutput(e));
            }
        };
        self.decode_assignment(&assignment, len)
    }

    /// Builds the path from the assignment of the output variables.
    pub fn decode_assignment(
        &self,
        assignment: &CpSolution,
        len: usize,
    ) -> Result<DecodedSolution, OptimizerError> {
        if assignment.is_empty() {
            return Ok(DecodedSolution::default());
        }

        let interface_at = |var: &str, pos: usize| -> Result<Option<Interface>, OptimizerError> {
            let idx = index_at(assignment, var, pos, self.interfaces.len())?;
            Ok(self
                .interfaces
                .get_index(idx)
                .filter(|i| !i.is_empty())
                .cloned())
        };

        let mut data_path = Vec::with_capacity(len);
        let mut source = Node::new(interface_at(SOURCE_INTERFACE_VAR, 0)?, false);
        for pos in 0..len {
            let candidate_idx = index_at(assignment, MODULE_VAR, pos, self.candidates.len())?;
            let candidate = &self.candidates[candidate_idx];
            let cluster_idx = index_at(assignment, CLUSTER_VAR, pos, self.problem.clusters.len())?;
            let cluster = &self.problem.clusters[cluster_idx];
            let storage_bound = self.problem.storage_accounts.len() + 1;
            let storage_idx = index_at(assignment, STORAGE_VAR, pos, storage_bound)?;
            let sink = Node::new(interface_at(SINK_INTERFACE_VAR, pos)?, candidate.virtual_sink);
            let actions = self
                .required_actions
                .iter()
                .filter(|(var, _)| assignment.bool_at(var, pos) == Some(true))
                .map(|(_, action)| action.clone())
                .collect();

            data_path.push(ResolvedEdge {
                edge: Edge {
                    source,
                    sink: sink.clone(),
                    module: candidate.module.clone(),
                    capability_index: candidate.capability_index,
                },
                cluster: cluster.name.clone(),
                actions,
                storage_account: self.problem.storage_accounts.get(storage_idx).cloned(),
            });
            source = sink;
        }

        let mut solution = Solution::new(data_path);
        if self.problem.context.flow == DataFlow::Write {
            solution = solution.reversed();
        }
        let score = assignment.int_at(JOINT_GOAL_VAR, 0);
        Ok(DecodedSolution { solution, score })
    }
}

/// Integer value of `var` at 0-based `pos`, checked against `bound`.
fn index_at(
    assignment: &CpSolution,
    var: &str,
    pos: usize,
    bound: usize,
) -> Result<usize, OptimizerError> {
    let value = assignment.int_at(var, pos).ok_or_else(|| {
        OptimizerError::Decode(format!("missing value for {var} at position {}", pos + 1))
    })?;
    usize::try_from(value)
        .ok()
        .filter(|idx| *idx < bound)
        .ok_or_else(|| {
            OptimizerError::Decode(format!(
                "{var} at position {} is {value}, outside 0..{bound}",
                pos + 1
            ))
        })
}
