//! The complete input of one planning request.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::infrastructure::{AttributeManager, Cluster, StorageAccount};
use super::module::Module;
use super::policy::PolicyEvaluation;
use super::taxonomy::{Action, DataFlow, Interface};

/// What the workload asks for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataContext {
    /// Identifier of the requested data set, used in error reports.
    pub dataset_id: String,
    #[serde(default)]
    pub flow: DataFlow,
    /// Interface the workload consumes (read) or produces (write).
    #[serde(default)]
    pub requirements: Option<Interface>,
    /// Write flows only: the data set does not exist yet and needs storage.
    #[serde(default)]
    pub is_new_dataset: bool,
}

/// Catalog facts about the data set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataDetails {
    pub interface: Interface,
    /// Region the data resides in.
    #[serde(default)]
    pub geography: String,
}

/// Read-only facts the optimizer plans with.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemData {
    pub context: DataContext,
    #[serde(default)]
    pub data_details: DataDetails,
    /// Candidate modules, keyed by name.
    #[serde(default)]
    pub modules: BTreeMap<String, Module>,
    #[serde(default)]
    pub clusters: Vec<Cluster>,
    #[serde(default)]
    pub storage_accounts: Vec<StorageAccount>,
    pub workload_cluster: Cluster,
    /// Governance actions the request as a whole requires.
    #[serde(default)]
    pub actions: Vec<Action>,
    /// Actions required before data may be stored in a region.
    #[serde(default)]
    pub storage_requirements: BTreeMap<String, Vec<Action>>,
    #[serde(default)]
    pub configuration: PolicyEvaluation,
    #[serde(default)]
    pub attributes: AttributeManager,
}

impl ProblemData {
    /// Creates a read request for `dataset_id` with a workload on `workload_cluster`.
    pub fn new(dataset_id: impl Into<String>, workload_cluster: Cluster) -> Self {
        Self {
            context: DataContext {
                dataset_id: dataset_id.into(),
                ..DataContext::default()
            },
            workload_cluster,
            ..Self::default()
        }
    }

    pub fn with_flow(mut self, flow: DataFlow) -> Self {
        self.context.flow = flow;
        self
    }

    pub fn with_requirements(mut self, interface: Interface) -> Self {
        self.context.requirements = Some(interface);
        self
    }

    pub fn with_new_dataset(mut self, is_new: bool) -> Self {
        self.context.is_new_dataset = is_new;
        self
    }

    pub fn with_data_details(mut self, interface: Interface, geography: impl Into<String>) -> Self {
        self.data_details = DataDetails {
            interface,
            geography: geography.into(),
        };
        self
    }

    /// Adds a module, replacing any module with the same name.
    pub fn with_module(mut self, module: Module) -> Self {
        self.modules.insert(module.name.clone(), module);
        self
    }

    pub fn with_cluster(mut self, cluster: Cluster) -> Self {
        self.clusters.push(cluster);
        self
    }

    pub fn with_storage_account(mut self, account: StorageAccount) -> Self {
        self.storage_accounts.push(account);
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_storage_requirement(mut self, region: impl Into<String>, actions: Vec<Action>) -> Self {
        self.storage_requirements.insert(region.into(), actions);
        self
    }

    pub fn with_configuration(mut self, configuration: PolicyEvaluation) -> Self {
        self.configuration = configuration;
        self
    }

    pub fn with_attributes(mut self, attributes: AttributeManager) -> Self {
        self.attributes = attributes;
        self
    }

    /// Identifier of the requested data set.
    pub fn dataset_id(&self) -> &str {
        &self.context.dataset_id
    }

    /// Position of the workload cluster among the candidate clusters.
    pub fn workload_cluster_index(&self) -> Option<usize> {
        self.clusters
            .iter()
            .position(|c| c.name == self.workload_cluster.name)
    }

    /// True for write flows into an existing data set, which need no storage.
    pub fn writes_to_existing_dataset(&self) -> bool {
        self.context.flow == DataFlow::Write && !self.context.is_new_dataset
    }
}
