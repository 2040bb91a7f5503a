//! Error types for the physics facade

use thiserror::Error;

/// Physics facade errors
#[derive(Debug, Error)]
pub enum PhysicsError {
    /// Rigid body not found
    #[error("Rigid body not found: {0:?}")]
    BodyNotFound(crate::body::BodyHandle),

    /// Body creation failed
    #[error("Failed to create rigid body: {0}")]
    BodyCreationFailed(String),

    /// Invalid configuration
    #[error("Invalid simulation configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for physics operations
pub type Result<T> = std::result::Result<T, PhysicsError>;
