//! Shared test fixtures for PathForge crates.
//!
//! This crate provides ready-made problem data for testing.
//! It depends on `pathforge-core` only, so every crate can use it.
//!
//! - [`modules`] - Interfaces and module fixtures (reader, copier, writer)
//! - [`problems`] - Complete planning problems
//! - [`attributes`] - Infrastructure attributes for optimization goals
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! pathforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use pathforge_test::problems::single_cluster_read_problem;
//! use pathforge_test::modules::{reader_module, copier_module};
//! ```

pub mod attributes;
pub mod modules;
pub mod problems;

pub use attributes::cost_attributes;
pub use modules::{arrow_flight, copier_module, reader_module, s3_csv, s3_parquet, writer_module};
pub use problems::{
    multi_cluster_problem, single_cluster_read_problem, unreachable_problem, write_problem,
};
