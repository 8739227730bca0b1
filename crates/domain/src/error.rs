//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`SmartHomeError`] via `#[from]` (no `String` variants).

/// Top-level error shared by every crate in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum SmartHomeError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// A collaborator behind a port (audit sink, file writer, …) failed.
    #[error("sink error")]
    Sink(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("identifier must not be empty")]
    EmptyId,

    #[error("{kind} '{id}' is already registered")]
    Duplicate { kind: &'static str, id: String },
}

/// A lookup by key did not match any registration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} '{id}' not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
