//! Governance actions and the actions storage regions demand.

use std::collections::BTreeSet;

use pathforge_core::Action;
use pathforge_fzn::literal::var_at_pos;
use pathforge_fzn::{FznModel, FznType, Predicate};

use super::{action_var, DataPathCsp, MODULE_VAR, STORAGE_VAR};

impl DataPathCsp<'_> {
    /// Declares the output array marking where `action` is applied.
    ///
    /// An action can only be applied where the selected candidate supports it.
    fn action_indicator(&self, model: &mut FznModel, action: &Action, len: usize) -> String {
        let var = action_var(action);
        if model.is_declared(&var) {
            return var;
        }
        model.add_variable_array(&var, FznType::Bool, len, false, true);

        let supporting: Vec<i64> = self
            .candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| c.supports_action(&action.name))
            .map(|(idx, _)| idx as i64)
            .collect();
        let supported = model.set_in_indicator(MODULE_VAR, &supporting, len);
        for pos in 1..=len {
            model.add_constraint(
                Predicate::BoolLe,
                vec![var_at_pos(&var, pos), var_at_pos(&supported, pos)],
                Vec::new(),
            );
        }
        var
    }

    pub(super) fn add_governance_action_constraints(&self, model: &mut FznModel, len: usize) {
        let mut requested = BTreeSet::new();
        for action in &self.problem.actions {
            let var = self.action_indicator(model, action, len);
            model.exactly_one(&var, len);
            requested.insert(var);
        }

        if self.problem.writes_to_existing_dataset() {
            return;
        }

        let mut bounded = BTreeSet::new();
        for (sa_idx, account) in self.problem.storage_accounts.iter().enumerate() {
            let sa_idx = sa_idx as i64;
            let Some(required) = self.problem.storage_requirements.get(&account.region) else {
                model.prevent_assignments(&[(STORAGE_VAR, sa_idx)], len);
                continue;
            };
            for action in required {
                let var = self.action_indicator(model, action, len);
                if !requested.contains(&var) && bounded.insert(var.clone()) {
                    model.at_most_one(&var, len);
                }
                // storing in this account forces the action somewhere on the path
                let chosen = model.equality_indicator(STORAGE_VAR, sa_idx, len, true);
                let chosen_anywhere = model.or_of_indicators(&chosen);
                let applied_anywhere = model.or_of_indicators(&var);
                model.add_constraint(
                    Predicate::BoolLe,
                    vec![chosen_anywhere, applied_anywhere],
                    Vec::new(),
                );
            }
        }
    }
}
