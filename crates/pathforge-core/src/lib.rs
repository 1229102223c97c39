//! PathForge Core - problem and solution model for data-path planning
//!
//! This crate provides the plain data the optimizer consumes and produces:
//! - Domain types for modules, interfaces, clusters and storage accounts
//! - Policy-evaluation output (deploy decisions, restrictions, goals)
//! - Infrastructure attributes used by optimization goals
//! - The solution graph (nodes, edges, resolved edges)

pub mod domain;
pub mod error;
pub mod solution;

pub use domain::{
    Action, AttributeManager, AttributeOptimization, Cluster, DataContext, DataDetails, DataFlow,
    Decision, DeployStatus, InfrastructureAttribute, InstanceType, Interface, Metric, Module,
    ModuleCapability, ModuleInOut, OptimizationDirective, PolicyEvaluation, ProblemData,
    RangeType, Restriction, Restrictions, StorageAccount,
};
pub use error::{PathForgeError, Result};
pub use solution::{Edge, Node, ResolvedEdge, Solution};
