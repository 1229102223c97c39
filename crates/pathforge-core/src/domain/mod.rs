//! Domain model for data-path planning problems
//!
//! These types describe what the optimizer reasons about:
//! - `Interface`, `Action`, `DataFlow`: taxonomy primitives
//! - `Module`, `ModuleCapability`: deployable processing steps
//! - `Cluster`, `StorageAccount`, `AttributeManager`: infrastructure
//! - `PolicyEvaluation`: deploy decisions, restrictions and goals
//! - `ProblemData`: everything above, bundled for one request

mod infrastructure;
mod module;
mod policy;
mod problem;
mod taxonomy;

#[cfg(test)]
mod tests;

pub use infrastructure::{
    AttributeManager, Cluster, InfrastructureAttribute, InstanceType, Metric, RangeType,
    StorageAccount, NORMALIZATION_FACTOR,
};
pub use module::{Module, ModuleCapability, ModuleInOut};
pub use policy::{
    AttributeOptimization, Decision, DeployStatus, OptimizationDirective, PolicyEvaluation,
    Restriction, Restrictions, TRANSFORM_CAPABILITY,
};
pub use problem::{DataContext, DataDetails, ProblemData};
pub use taxonomy::{Action, DataFlow, Interface};
