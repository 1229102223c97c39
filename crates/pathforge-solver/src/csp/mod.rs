//! Translation between a planning problem and a FlatZinc model.
//!
//! For a path of length `L` the model has, per position, which module
//! capability is used (`moduleType`), the cluster it runs on
//! (`moduleCluster`), the storage account it writes to (`storageAccount`,
//! where the value `S` means none) and its source and sink interfaces.
//! All of these are 0-based indices into the enumerations built by
//! [`DataPathCsp::new`], which are listed in the model header.

mod actions;
mod decode;
mod goals;
mod interfaces;
mod restrictions;

use std::collections::BTreeMap;
use std::path::Path;

use indexmap::IndexSet;
use pathforge_core::domain::DeployStatus;
use pathforge_core::{Action, Interface, Module, ModuleCapability, ProblemData};
use pathforge_fzn::literal::sanitize_identifier;
use pathforge_fzn::{FznModel, FznType, Predicate, TRUE};
use tracing::{debug, warn};

pub use decode::DecodedSolution;

use crate::error::OptimizerError;
use crate::model_file::ModelFile;

/// Selected module capability per position.
pub const MODULE_VAR: &str = "moduleType";
/// Selected cluster per position.
pub const CLUSTER_VAR: &str = "moduleCluster";
/// Selected storage account per position.
pub const STORAGE_VAR: &str = "storageAccount";
/// Selected source interface per position.
pub const SOURCE_INTERFACE_VAR: &str = "moduleSourceInterface";
/// Selected sink interface per position.
pub const SINK_INTERFACE_VAR: &str = "moduleSinkInterface";
/// Weighted objective, present only when goals are set.
pub const JOINT_GOAL_VAR: &str = "jointGoal";

/// Name of the boolean array marking where an action is applied.
pub fn action_var(action: &Action) -> String {
    format!("action_{}", sanitize_identifier(&action.name))
}

/// One capability of one module, as enumerated for the model.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub module: &'a Module,
    pub capability: &'a ModuleCapability,
    pub capability_index: usize,
    /// Reads through its API rather than from a physical source.
    pub virtual_source: bool,
    /// Serves data through its API rather than writing to storage.
    pub virtual_sink: bool,
    pub has_source: bool,
    pub has_sink: bool,
}

impl<'a> Candidate<'a> {
    fn new(module: &'a Module, capability_index: usize) -> Option<Self> {
        let capability = module.capabilities.get(capability_index)?;
        let mut has_source = capability.has_physical_source();
        let mut has_sink = capability.has_physical_sink();
        let mut virtual_source = false;
        let mut virtual_sink = false;
        if (!has_source || !has_sink) && capability.api.is_some() {
            virtual_source = !has_source;
            virtual_sink = !has_sink;
            has_source = true;
            has_sink = true;
        }
        Some(Self {
            module,
            capability,
            capability_index,
            virtual_source,
            virtual_sink,
            has_source,
            has_sink,
        })
    }

    /// Interfaces this candidate declares (physical and API).
    fn interfaces(&self) -> impl Iterator<Item = &'a Interface> {
        let capability: &'a ModuleCapability = self.capability;
        let api = capability
            .api
            .as_ref()
            .filter(|_| self.virtual_source || self.virtual_sink);
        capability
            .supported_interfaces
            .iter()
            .flat_map(|io| io.source.iter().chain(io.sink.iter()))
            .chain(api)
    }

    fn supports_action(&self, name: &str) -> bool {
        self.capability.supports_action(name)
    }
}

/// Builds the data-path model for any path length and decodes solutions.
#[derive(Debug)]
pub struct DataPathCsp<'a> {
    problem: &'a ProblemData,
    candidates: Vec<Candidate<'a>>,
    interfaces: IndexSet<Interface>,
    /// Action variable name to the action it stands for.
    required_actions: BTreeMap<String, Action>,
    workload_cluster: usize,
    header: Vec<String>,
}

impl<'a> DataPathCsp<'a> {
    /// Enumerates candidates and interfaces for `problem`.
    ///
    /// Capabilities that policy forbids, or whose module violates the module
    /// restrictions of its capability type, are left out.
    pub fn new(problem: &'a ProblemData) -> Self {
        let mut interfaces = IndexSet::new();
        interfaces.insert(Interface::default());
        interfaces.insert(problem.data_details.interface.clone());
        interfaces.insert(problem.context.requirements.clone().unwrap_or_default());

        let mut header = vec!["Encoding of modules and their capabilities:".to_string()];
        let mut candidates = Vec::new();
        for module in problem.modules.values() {
            for (idx, capability) in module.capabilities.iter().enumerate() {
                let allowed = problem
                    .configuration
                    .decision(&capability.capability)
                    .map_or(true, |d| {
                        d.deploy != DeployStatus::False
                            && d.restrictions.allows_module(&problem.attributes, module, idx)
                    });
                let code = match Candidate::new(module, idx).filter(|_| allowed) {
                    Some(candidate) => {
                        interfaces.extend(candidate.interfaces().cloned());
                        candidates.push(candidate);
                        (candidates.len() - 1).to_string()
                    }
                    None => "<forbidden>".to_string(),
                };
                header.push(format!(
                    "{code} - Module: {}, Capability: {idx} ({})",
                    module.name, capability.capability
                ));
            }
        }

        header.push("Encoding of interfaces:".to_string());
        for (idx, interface) in interfaces.iter().enumerate() {
            header.push(format!("{idx} - {interface}"));
        }
        header.push("Encoding of clusters:".to_string());
        for (idx, cluster) in problem.clusters.iter().enumerate() {
            header.push(format!("{idx} - {}", cluster.name));
        }
        header.push("Encoding of storage accounts:".to_string());
        for (idx, account) in problem.storage_accounts.iter().enumerate() {
            header.push(format!("{idx} - {}", account.name));
        }
        header.push(format!(
            "{} - No storage account",
            problem.storage_accounts.len()
        ));

        let workload_cluster = problem.workload_cluster_index().unwrap_or_else(|| {
            warn!(
                event = "workload_cluster_unknown",
                cluster = %problem.workload_cluster.name,
            );
            0
        });

        let required_actions = Self::collect_required_actions(problem);

        debug!(
            event = "encoding",
            dataset = %problem.dataset_id(),
            candidates = candidates.len(),
            interfaces = interfaces.len(),
            clusters = problem.clusters.len(),
            storage_accounts = problem.storage_accounts.len(),
            actions = required_actions.len(),
        );

        Self {
            problem,
            candidates,
            interfaces,
            required_actions,
            workload_cluster,
            header,
        }
    }

    fn collect_required_actions(problem: &ProblemData) -> BTreeMap<String, Action> {
        let mut actions = BTreeMap::new();
        if !problem.writes_to_existing_dataset() {
            for account in &problem.storage_accounts {
                if let Some(required) = problem.storage_requirements.get(&account.region) {
                    for action in required {
                        actions.insert(action_var(action), action.clone());
                    }
                }
            }
        }
        for action in &problem.actions {
            actions.insert(action_var(action), action.clone());
        }
        actions
    }

    pub fn problem(&self) -> &ProblemData {
        self.problem
    }

    pub fn candidates(&self) -> &[Candidate<'a>] {
        &self.candidates
    }

    pub fn interfaces(&self) -> &IndexSet<Interface> {
        &self.interfaces
    }

    /// Action variables and the actions they stand for.
    pub fn required_actions(&self) -> &BTreeMap<String, Action> {
        &self.required_actions
    }

    /// The value of `storageAccount` meaning "no storage account".
    pub fn no_storage_account(&self) -> i64 {
        self.problem.storage_accounts.len() as i64
    }

    fn cluster_count(&self) -> i64 {
        self.problem.clusters.len() as i64
    }

    /// Builds the model for a path of `len` modules.
    pub fn build_model(&self, len: usize) -> Result<FznModel, OptimizerError> {
        let mut model = FznModel::new();
        for line in &self.header {
            model.add_header_comment(line.clone());
        }

        let candidate_count = self.candidates.len() as i64;
        let interface_count = self.interfaces.len() as i64;
        model.add_variable_array(MODULE_VAR, FznType::range(0, candidate_count - 1), len, false, true);
        model.add_variable_array(
            CLUSTER_VAR,
            FznType::range(0, self.cluster_count() - 1),
            len,
            false,
            true,
        );
        model.add_variable_array(
            STORAGE_VAR,
            FznType::range(0, self.no_storage_account()),
            len,
            false,
            true,
        );
        let interface_type = FznType::range(0, interface_count - 1);
        model.add_variable_array(SOURCE_INTERFACE_VAR, interface_type, len, false, true);
        model.add_variable_array(SINK_INTERFACE_VAR, interface_type, len, false, true);

        if self.candidates.is_empty() || self.problem.clusters.is_empty() {
            // an empty disjunction can never hold
            model.add_constraint(
                Predicate::ArrayBoolOr,
                vec!["[]".to_string(), TRUE.to_string()],
                Vec::new(),
            );
        }

        self.add_interface_constraints(&mut model, len);
        self.add_governance_action_constraints(&mut model, len);
        self.add_policy_restrictions(&mut model, len)?;
        self.add_optimization_goals(&mut model, len)?;

        debug!(
            event = "model_built",
            path_length = len,
            variables = model.variable_count(),
            constraints = model.constraint_count(),
        );
        Ok(model)
    }

    /// Builds the model for `len` and dumps it to a file in `dir`.
    pub fn write_model(&self, len: usize, dir: &Path) -> Result<ModelFile, OptimizerError> {
        let model = self.build_model(len)?;
        ModelFile::create(dir, &model).map_err(OptimizerError::ModelSerialization)
    }
}
