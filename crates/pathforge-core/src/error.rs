//! Error types for PathForge

use thiserror::Error;

/// Main error type for problem-model operations
#[derive(Debug, Error)]
pub enum PathForgeError {
    /// Infrastructure attribute or metric is missing or malformed
    #[error("Attribute error: {0}")]
    Attribute(String),

    /// A policy requires a capability that no module provides
    #[error("capability {0} is required, but it is not supported by any module")]
    CapabilityNotSupported(String),

    /// Problem data is inconsistent
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),
}

/// Result type alias for PathForge operations
pub type Result<T> = std::result::Result<T, PathForgeError>;
