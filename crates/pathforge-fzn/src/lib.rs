//! PathForge FlatZinc - a flat constraint-model IR
//!
//! This crate provides:
//! - `FznModel`: parameters, variables, constraints and one solve item,
//!   serialized to FlatZinc text
//! - Constraint macros compiling conditionals into indicator variables
//! - `read_solutions`: the reader for a solver's result stream
//!
//! # Example
//!
//! ```
//! use pathforge_fzn::{FznModel, FznType, SolveGoal};
//!
//! let mut model = FznModel::new();
//! model.add_variable_array("x", FznType::range(0, 3), 2, false, true);
//! let ind = model.equality_indicator("x", 2, 2, true);
//! model.set_solve_target(SolveGoal::Satisfy, "", Vec::new());
//!
//! assert_eq!(ind, "ind_x_int_eq_reif_2");
//! assert_eq!(model.constraint_count(), 2);
//! assert!(model.to_fzn_string().ends_with("solve satisfy;\n"));
//! ```

pub mod error;
pub mod literal;
mod macros;
pub mod model;
pub mod solution;
pub mod types;

pub use error::{FznError, Result};
pub use model::{Constraint, FznModel, Param, SolveItem, Variable};
pub use solution::{read_solutions, read_solutions_from_file, CpSolution};
pub use types::{Annotation, FznType, Predicate, SolveGoal, FALSE, TRUE};
