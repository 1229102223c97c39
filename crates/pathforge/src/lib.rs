//! PathForge - policy-compliant data-path planning
//!
//! Describe the modules, clusters and storage a data set can flow through,
//! then call [`plan`] to get the shortest path an external FlatZinc solver
//! can satisfy.
//!
//! # Example
//!
//! ```rust
//! use pathforge::prelude::*;
//!
//! let problem = ProblemData::new("s3/allData", Cluster::new("thegreendragon", "theshire"))
//!     .with_requirements(Interface::new("arrow-flight", "arrow"))
//!     .with_data_details(Interface::new("s3", "csv"), "theshire");
//!
//! let csp = DataPathCsp::new(&problem);
//! let model = csp.build_model(1).unwrap();
//! assert!(model.to_fzn_string().contains("moduleType"));
//! ```

// Problem and solution model
pub use pathforge_core::{
    Action, AttributeManager, AttributeOptimization, Cluster, DataFlow, Decision, DeployStatus,
    Edge, Interface, Module, ModuleCapability, ModuleInOut, Node, OptimizationDirective,
    PathForgeError, PolicyEvaluation, ProblemData, ResolvedEdge, Restriction, Restrictions,
    Solution, StorageAccount,
};

// Configuration
pub use pathforge_config::{ConfigError, OptimizerConfig, SolverConfig};

// Constraint model
pub use pathforge_fzn::{FznError, FznModel};

// Model building and search
pub use pathforge_solver::{
    DataPathCsp, DecodedSolution, Optimizer, OptimizerError, ProcessSolver, SolverBackend,
    SolverError,
};

#[cfg(feature = "console")]
pub mod console;

mod planner;
pub use planner::{plan, plan_with_config, CONFIG_FILE};

pub mod prelude {
    pub use super::{plan, plan_with_config};
    pub use super::{
        Action, Cluster, DataFlow, Decision, DeployStatus, Interface, Module, ModuleCapability,
        ModuleInOut, PolicyEvaluation, ProblemData, Solution, StorageAccount,
    };
    pub use super::{DataPathCsp, DecodedSolution, Optimizer, OptimizerConfig, OptimizerError};
}
