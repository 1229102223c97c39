//! Optimization goals over infrastructure attributes.
//!
//! Each goal contributes a `goal<Attr>Sum` integer; the weighted sum of all
//! of them is `jointGoal`, which the solver minimizes.

use pathforge_core::{AttributeOptimization, InstanceType, PathForgeError};
use pathforge_fzn::literal::{array_literal, repeated, sanitize_identifier, var_at_pos, var_positions};
use pathforge_fzn::{Annotation, FznModel, FznType, Predicate, SolveGoal};

use super::{DataPathCsp, CLUSTER_VAR, JOINT_GOAL_VAR, MODULE_VAR, STORAGE_VAR};
use crate::error::OptimizerError;

const STORAGE_LOCATIONS_VAR: &str = "storageLocations";
const REAL_SA_LOCATIONS_VAR: &str = "realSaLocations";
const MAX_REAL_SA_VAR: &str = "maxRealSA";
const AFTER_MAX_REAL_SA_VAR: &str = "afterMaxRealSA";
const C2C_SELECTOR_VAR: &str = "c2cSelector";
const LAST_DATA_STORE_VAR: &str = "lastDataStore";
const CLUSTER_AFTER_LAST_DATA_STORE_VAR: &str = "clusterAfterLastDataStore";
const S2C_SELECTOR_VAR: &str = "s2cSelector";

fn type_label(instance_type: InstanceType) -> &'static str {
    match instance_type {
        InstanceType::Module => "Module",
        InstanceType::Cluster => "Cluster",
        InstanceType::StorageAccount => "StorageAccount",
        InstanceType::InterRegion => "InterRegion",
    }
}

fn int_list(values: &[i64]) -> String {
    array_literal(values.iter().map(|v| v.to_string()))
}

impl DataPathCsp<'_> {
    pub(super) fn add_optimization_goals(
        &self,
        model: &mut FznModel,
        len: usize,
    ) -> Result<(), OptimizerError> {
        let strategy = &self.problem.configuration.optimization_strategy;
        if strategy.is_empty() || self.candidates.is_empty() || self.problem.clusters.is_empty() {
            model.set_solve_target(SolveGoal::Satisfy, "", Vec::new());
            return Ok(());
        }

        let mut goal_sums = Vec::with_capacity(strategy.len());
        let mut weights = Vec::with_capacity(strategy.len());
        for goal in strategy {
            goal_sums.push(self.add_goal(model, goal, len)?);
            weights.push(goal.signed_weight());
        }
        model.weighted_sum(JOINT_GOAL_VAR, &goal_sums, &weights, true);
        model.set_solve_target(SolveGoal::Minimize, JOINT_GOAL_VAR, Vec::new());
        Ok(())
    }

    /// Declares the variables computing one goal; returns its sum variable.
    fn add_goal(
        &self,
        model: &mut FznModel,
        goal: &AttributeOptimization,
        len: usize,
    ) -> Result<String, OptimizerError> {
        let attribute = &goal.attribute;
        let instance_types = self.problem.attributes.instance_types(attribute);
        let Some(first) = instance_types.first() else {
            return Err(PathForgeError::Attribute(format!(
                "no infrastructure data for attribute {attribute}"
            ))
            .into());
        };

        let sanitized = sanitize_identifier(attribute);
        let goal_var = format!("goal{sanitized}");
        if *first == InstanceType::InterRegion {
            self.set_inter_region_goal(model, attribute, &sanitized, &goal_var, len)?;
        } else {
            self.set_simple_goal(model, attribute, &sanitized, &instance_types, &goal_var, len)?;
        }
        Ok(model.sum_of_var_array(&format!("{goal_var}Sum"), &goal_var))
    }

    /// `goal[j]` is the sum, over the path, of the attribute values of the
    /// selected instances of the j-th instance type.
    fn set_simple_goal(
        &self,
        model: &mut FznModel,
        attribute: &str,
        sanitized: &str,
        instance_types: &[InstanceType],
        goal_var: &str,
        len: usize,
    ) -> Result<(), OptimizerError> {
        model.add_variable_array(goal_var, FznType::Int, instance_types.len(), true, false);
        for (idx, instance_type) in instance_types.iter().enumerate() {
            let (selector, values) = self.attribute_mapping(attribute, *instance_type)?;
            let param = format!("{selector}{sanitized}");
            model.add_param_array(&param, FznType::Int, values.len(), int_list(&values));

            let per_type = format!("{goal_var}{}", type_label(*instance_type));
            model.add_variable_array(&per_type, FznType::Int, len, true, false);
            let index = model.shifted_selector(selector, len);
            for pos in 1..=len {
                let per_type_at_pos = var_at_pos(&per_type, pos);
                model.add_constraint(
                    Predicate::ArrayIntElement,
                    vec![var_at_pos(&index, pos), param.clone(), per_type_at_pos.clone()],
                    vec![Annotation::DefinesVar(per_type_at_pos)],
                );
            }
            model.constrain_weighted_sum(
                &var_at_pos(goal_var, idx + 1),
                &var_positions(&per_type, len),
                &vec![1; len],
            );
        }
        Ok(())
    }

    /// Normalized attribute values indexed like the selector variable.
    fn attribute_mapping(
        &self,
        attribute: &str,
        instance_type: InstanceType,
    ) -> Result<(&'static str, Vec<i64>), OptimizerError> {
        let attributes = &self.problem.attributes;
        let mapping = match instance_type {
            InstanceType::Module => {
                let values = self
                    .candidates
                    .iter()
                    .map(|c| attributes.normalized_value(attribute, &c.module.name))
                    .collect::<Result<Vec<_>, _>>()?;
                (MODULE_VAR, values)
            }
            InstanceType::Cluster => {
                let values = self
                    .problem
                    .clusters
                    .iter()
                    .map(|c| attributes.normalized_value(attribute, &c.name))
                    .collect::<Result<Vec<_>, _>>()?;
                (CLUSTER_VAR, values)
            }
            InstanceType::StorageAccount => {
                let mut values = self
                    .problem
                    .storage_accounts
                    .iter()
                    .map(|sa| attributes.normalized_value(attribute, &sa.name))
                    .collect::<Result<Vec<_>, _>>()?;
                // no storage account costs nothing
                values.push(0);
                (STORAGE_VAR, values)
            }
            InstanceType::InterRegion => {
                return Err(PathForgeError::Attribute(format!(
                    "attribute {attribute} mixes inter-region and instance values"
                ))
                .into())
            }
        };
        Ok(mapping)
    }

    /// Normalized attribute value between two regions; a region with itself
    /// defaults to 0 when not listed.
    fn value_between(&self, attribute: &str, from: &str, to: &str) -> Result<i64, OptimizerError> {
        let attributes = &self.problem.attributes;
        if from == to && attributes.attribute_between(attribute, from, to).is_none() {
            return Ok(0);
        }
        Ok(attributes.normalized_value_between(attribute, from, to)?)
    }

    /// Charges an inter-region attribute on the hops data travels without
    /// being stored.
    ///
    /// `goal[p]` for `p <= len` is the value from the cluster at `p` to the
    /// next cluster (the workload cluster after the last position) if `p` is
    /// at or after the last data store, and 0 before it. `goal[len+1]` is the
    /// value from the last data store to the cluster reading it.
    fn set_inter_region_goal(
        &self,
        model: &mut FznModel,
        attribute: &str,
        sanitized: &str,
        goal_var: &str,
        len: usize,
    ) -> Result<(), OptimizerError> {
        self.set_inter_region_common_vars(model, len);

        let clusters = &self.problem.clusters;
        let mut c2c = Vec::with_capacity(clusters.len() * clusters.len());
        for from in clusters {
            for to in clusters {
                c2c.push(self.value_between(attribute, &from.region, &to.region)?);
            }
        }
        let c2c_param = format!("cluster2cluster{sanitized}");
        model.add_param_array(&c2c_param, FznType::Int, c2c.len(), int_list(&c2c));

        let mut s2c = Vec::with_capacity(clusters.len() * (self.problem.storage_accounts.len() + 2));
        for account in &self.problem.storage_accounts {
            for cluster in clusters {
                s2c.push(self.value_between(attribute, &account.region, &cluster.region)?);
            }
        }
        s2c.extend(vec![0; clusters.len()]);
        let geography = &self.problem.data_details.geography;
        for cluster in clusters {
            s2c.push(self.value_between(attribute, geography, &cluster.region)?);
        }
        let s2c_param = format!("sa2cluster{sanitized}");
        model.add_param_array(&s2c_param, FznType::Int, s2c.len(), int_list(&s2c));

        model.add_variable_array(goal_var, FznType::Int, len + 1, true, false);
        let selected = format!("{c2c_param}SelectedValue");
        model.add_variable_array(&selected, FznType::Int, len, true, false);
        for pos in 1..=len {
            let selected_at_pos = var_at_pos(&selected, pos);
            model.add_constraint(
                Predicate::ArrayIntElement,
                vec![var_at_pos(C2C_SELECTOR_VAR, pos), c2c_param.clone(), selected_at_pos.clone()],
                vec![Annotation::DefinesVar(selected_at_pos)],
            );
        }
        model.assign_with_selector(
            goal_var,
            AFTER_MAX_REAL_SA_VAR,
            &var_positions(&selected, len),
            &repeated(0, len),
            len,
        );

        model.add_constraint(
            Predicate::ArrayIntElement,
            vec![
                S2C_SELECTOR_VAR.to_string(),
                s2c_param,
                var_at_pos(goal_var, len + 1),
            ],
            Vec::new(),
        );
        Ok(())
    }

    /// Variables shared by all inter-region goals of one model.
    ///
    /// Storage locations are numbered like `storageAccount`, with `S` for
    /// none and `S+1` for the data set itself, which always comes first.
    fn set_inter_region_common_vars(&self, model: &mut FznModel, len: usize) {
        if model.is_declared(REAL_SA_LOCATIONS_VAR) {
            return;
        }
        let none = self.no_storage_account();
        let dataset = none + 1;
        let cluster_count = self.cluster_count();
        let locations = len + 1;

        let mut stored = vec![dataset.to_string()];
        stored.extend(var_positions(STORAGE_VAR, len));
        model.add_variable(
            locations,
            STORAGE_LOCATIONS_VAR,
            FznType::range(0, dataset),
            Some(array_literal(&stored)),
            vec![Annotation::IsDefinedVar],
        );

        let real = model.equality_indicator(STORAGE_LOCATIONS_VAR, none, locations, false);
        let not_real = model.equality_indicator(STORAGE_LOCATIONS_VAR, none, locations, true);
        model.add_variable_array(
            REAL_SA_LOCATIONS_VAR,
            FznType::range(0, locations as i64),
            locations,
            true,
            false,
        );
        for pos in 1..=locations {
            let at_pos = var_at_pos(REAL_SA_LOCATIONS_VAR, pos);
            model.add_constraint(
                Predicate::IntEqReif,
                vec![at_pos.clone(), pos.to_string(), var_at_pos(&real, pos)],
                Vec::new(),
            );
            model.add_constraint(
                Predicate::IntEqReif,
                vec![at_pos, "0".to_string(), var_at_pos(&not_real, pos)],
                Vec::new(),
            );
        }

        model.add_scalar_variable(MAX_REAL_SA_VAR, FznType::range(1, locations as i64), true, false);
        model.add_constraint(
            Predicate::ArrayIntMaximum,
            vec![MAX_REAL_SA_VAR.to_string(), REAL_SA_LOCATIONS_VAR.to_string()],
            vec![Annotation::DefinesVar(MAX_REAL_SA_VAR.to_string())],
        );

        let workload = self.workload_cluster.to_string();
        model.add_variable_array(AFTER_MAX_REAL_SA_VAR, FznType::Bool, len, true, false);
        model.add_variable_array(
            C2C_SELECTOR_VAR,
            FznType::range(1, cluster_count * cluster_count),
            len,
            true,
            false,
        );
        for pos in 1..=len {
            let after_at_pos = var_at_pos(AFTER_MAX_REAL_SA_VAR, pos);
            model.add_constraint(
                Predicate::IntLeReif,
                vec![MAX_REAL_SA_VAR.to_string(), pos.to_string(), after_at_pos.clone()],
                vec![Annotation::DefinesVar(after_at_pos)],
            );
            let next_cluster = if pos < len {
                var_at_pos(CLUSTER_VAR, pos + 1)
            } else {
                workload.clone()
            };
            model.constrain_weighted_sum(
                &var_at_pos(C2C_SELECTOR_VAR, pos),
                &[var_at_pos(CLUSTER_VAR, pos), next_cluster, "1".to_string()],
                &[cluster_count, 1, 1],
            );
        }

        model.add_scalar_variable(LAST_DATA_STORE_VAR, FznType::range(0, dataset), true, false);
        model.add_constraint(
            Predicate::ArrayVarIntElement,
            vec![
                MAX_REAL_SA_VAR.to_string(),
                STORAGE_LOCATIONS_VAR.to_string(),
                LAST_DATA_STORE_VAR.to_string(),
            ],
            vec![Annotation::DefinesVar(LAST_DATA_STORE_VAR.to_string())],
        );

        // the cluster reading location p is the module at p, or the workload
        let mut readers = var_positions(CLUSTER_VAR, len);
        readers.push(workload);
        model.add_scalar_variable(
            CLUSTER_AFTER_LAST_DATA_STORE_VAR,
            FznType::range(0, cluster_count - 1),
            true,
            false,
        );
        model.add_constraint(
            Predicate::ArrayVarIntElement,
            vec![
                MAX_REAL_SA_VAR.to_string(),
                array_literal(&readers),
                CLUSTER_AFTER_LAST_DATA_STORE_VAR.to_string(),
            ],
            vec![Annotation::DefinesVar(CLUSTER_AFTER_LAST_DATA_STORE_VAR.to_string())],
        );

        model.add_scalar_variable(
            S2C_SELECTOR_VAR,
            FznType::range(1, cluster_count * (dataset + 1)),
            true,
            false,
        );
        model.constrain_weighted_sum(
            S2C_SELECTOR_VAR,
            &[
                LAST_DATA_STORE_VAR.to_string(),
                CLUSTER_AFTER_LAST_DATA_STORE_VAR.to_string(),
                "1".to_string(),
            ],
            &[cluster_count, 1, 1],
        );
    }
}
