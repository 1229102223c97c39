//! Deploy decisions and deployment restrictions from policy evaluation.

use pathforge_core::domain::TRANSFORM_CAPABILITY;
use pathforge_core::{DeployStatus, PathForgeError, Restrictions};
use pathforge_fzn::FznModel;

use super::{DataPathCsp, CLUSTER_VAR, MODULE_VAR, STORAGE_VAR};
use crate::error::OptimizerError;

impl DataPathCsp<'_> {
    /// Forbids `var == value` together with a module capability violating
    /// the module restrictions.
    fn enforce_module_restrictions(
        &self,
        model: &mut FznModel,
        restrictions: &Restrictions,
        var: &str,
        value: i64,
        len: usize,
    ) {
        let attributes = &self.problem.attributes;
        for (cand_idx, candidate) in self.candidates.iter().enumerate() {
            if !restrictions.allows_module(attributes, candidate.module, candidate.capability_index) {
                model.prevent_assignments(&[(var, value), (MODULE_VAR, cand_idx as i64)], len);
            }
        }
    }

    fn enforce_cluster_restrictions(
        &self,
        model: &mut FznModel,
        restrictions: &Restrictions,
        var: &str,
        value: i64,
        len: usize,
    ) {
        let attributes = &self.problem.attributes;
        for (cluster_idx, cluster) in self.problem.clusters.iter().enumerate() {
            if !restrictions.allows_cluster(attributes, cluster) {
                model.prevent_assignments(&[(var, value), (CLUSTER_VAR, cluster_idx as i64)], len);
            }
        }
    }

    fn enforce_storage_restrictions(
        &self,
        model: &mut FznModel,
        restrictions: &Restrictions,
        var: &str,
        value: i64,
        len: usize,
    ) {
        let attributes = &self.problem.attributes;
        for (sa_idx, account) in self.problem.storage_accounts.iter().enumerate() {
            if !restrictions.allows_storage_account(attributes, account) {
                model.prevent_assignments(&[(var, value), (STORAGE_VAR, sa_idx as i64)], len);
            }
        }
    }

    /// Applies every policy decision.
    ///
    /// Module restrictions of a capability type were already applied when
    /// candidates were enumerated. Restrictions of `transform` also bind
    /// wherever a governance action is applied.
    pub(super) fn add_policy_restrictions(
        &self,
        model: &mut FznModel,
        len: usize,
    ) -> Result<(), OptimizerError> {
        for (capability, decision) in &self.problem.configuration.decisions {
            let restrictions = &decision.restrictions;
            let mut relevant = Vec::new();
            for (cand_idx, candidate) in self.candidates.iter().enumerate() {
                if &candidate.capability.capability != capability {
                    continue;
                }
                let cand_idx = cand_idx as i64;
                relevant.push(cand_idx);
                self.enforce_cluster_restrictions(model, restrictions, MODULE_VAR, cand_idx, len);
                self.enforce_storage_restrictions(model, restrictions, MODULE_VAR, cand_idx, len);
            }

            if capability == TRANSFORM_CAPABILITY {
                for var in self.required_actions.keys() {
                    self.enforce_module_restrictions(model, restrictions, var, 1, len);
                    self.enforce_cluster_restrictions(model, restrictions, var, 1, len);
                    self.enforce_storage_restrictions(model, restrictions, var, 1, len);
                }
            }

            if decision.deploy == DeployStatus::True {
                if relevant.is_empty() {
                    return Err(PathForgeError::CapabilityNotSupported(capability.clone()).into());
                }
                let deployed = model.set_in_indicator(MODULE_VAR, &relevant, len);
                model.at_least_one(&deployed, len);
            }
        }
        Ok(())
    }
}
