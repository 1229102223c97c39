//! Interface compatibility along the path and storage allocation.

use pathforge_core::{DataFlow, Interface};
use pathforge_fzn::literal::{set_literal, var_at_pos};
use pathforge_fzn::{FznModel, Predicate};

use super::{
    Candidate, DataPathCsp, MODULE_VAR, SINK_INTERFACE_VAR, SOURCE_INTERFACE_VAR, STORAGE_VAR,
};

/// Module-side matching; a missing interface is the empty one.
fn side_accepts(module_side: Option<&Interface>, other: &Interface) -> bool {
    match module_side {
        Some(interface) => interface.accepts(other),
        None => other.is_empty(),
    }
}

impl Candidate<'_> {
    fn supports_source(&self, interface: &Interface) -> bool {
        let physical = self
            .capability
            .supported_interfaces
            .iter()
            .any(|io| side_accepts(io.source.as_ref(), interface));
        physical
            || (self.virtual_source
                && self.capability.api.as_ref().is_some_and(|api| api.accepts(interface)))
    }

    fn supports_sink(&self, interface: &Interface) -> bool {
        let physical = self
            .capability
            .supported_interfaces
            .iter()
            .any(|io| side_accepts(io.sink.as_ref(), interface));
        physical
            || (self.virtual_sink
                && self.capability.api.as_ref().is_some_and(|api| api.accepts(interface)))
    }
}

impl DataPathCsp<'_> {
    /// Indices of the enumerated interfaces that `reference` accepts.
    fn matching_interfaces(&self, reference: &Interface) -> Vec<usize> {
        self.interfaces
            .iter()
            .enumerate()
            .filter(|(_, interface)| reference.accepts(interface))
            .map(|(idx, _)| idx)
            .collect()
    }

    pub(super) fn add_interface_constraints(&self, model: &mut FznModel, len: usize) {
        for (intf_idx, interface) in self.interfaces.iter().enumerate() {
            let intf_idx = intf_idx as i64;
            for (cand_idx, candidate) in self.candidates.iter().enumerate() {
                let cand_idx = cand_idx as i64;
                if !candidate.supports_source(interface) {
                    model.prevent_assignments(
                        &[(MODULE_VAR, cand_idx), (SOURCE_INTERFACE_VAR, intf_idx)],
                        len,
                    );
                }
                if !candidate.supports_sink(interface) {
                    model.prevent_assignments(
                        &[(MODULE_VAR, cand_idx), (SINK_INTERFACE_VAR, intf_idx)],
                        len,
                    );
                }
            }
        }

        let dataset = &self.problem.data_details.interface;
        let requirement = self.problem.context.requirements.clone().unwrap_or_default();
        let mut start = self.matching_interfaces(dataset);
        let mut end = self.matching_interfaces(&requirement);
        if self.problem.context.flow == DataFlow::Write {
            std::mem::swap(&mut start, &mut end);
        }

        model.add_constraint(
            Predicate::SetIn,
            vec![
                var_at_pos(SOURCE_INTERFACE_VAR, 1),
                set_literal(start.iter().map(|i| i.to_string())),
            ],
            Vec::new(),
        );
        for pos in 1..len {
            model.add_constraint(
                Predicate::IntEq,
                vec![
                    var_at_pos(SINK_INTERFACE_VAR, pos),
                    var_at_pos(SOURCE_INTERFACE_VAR, pos + 1),
                ],
                Vec::new(),
            );
        }
        model.add_constraint(
            Predicate::SetIn,
            vec![
                var_at_pos(SINK_INTERFACE_VAR, len),
                set_literal(end.iter().map(|i| i.to_string())),
            ],
            Vec::new(),
        );

        self.add_storage_constraints(model, len);
    }

    /// A real storage account is allocated exactly where the selected
    /// candidate writes to a physical sink.
    fn add_storage_constraints(&self, model: &mut FznModel, len: usize) {
        let none = self.no_storage_account();
        if self.problem.writes_to_existing_dataset() {
            for pos in 1..=len {
                model.add_constraint(
                    Predicate::IntEq,
                    vec![var_at_pos(STORAGE_VAR, pos), none.to_string()],
                    Vec::new(),
                );
            }
            return;
        }

        let no_storage_needed: Vec<i64> = self
            .candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| c.virtual_sink || !c.has_sink)
            .map(|(idx, _)| idx as i64)
            .collect();
        let no_storage = model.set_in_indicator(MODULE_VAR, &no_storage_needed, len);
        let real_storage = model.equality_indicator(STORAGE_VAR, none, len, false);
        for pos in 1..=len {
            model.add_constraint(
                Predicate::BoolNot,
                vec![var_at_pos(&real_storage, pos), var_at_pos(&no_storage, pos)],
                Vec::new(),
            );
        }
    }
}
