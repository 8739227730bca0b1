//! Audit-log error type.

use smarthome_domain::error::SmartHomeError;

/// Errors originating from the JSON audit log.
#[derive(Debug, thiserror::Error)]
pub enum AuditLogError {
    /// Reading or writing the log file failed.
    #[error("audit log I/O error")]
    Io(#[from] std::io::Error),

    /// Records could not be encoded or decoded.
    #[error("audit log JSON error")]
    Json(#[from] serde_json::Error),

    /// A writer panicked while holding the record buffer.
    #[error("audit log buffer poisoned")]
    Poisoned,
}

impl From<AuditLogError> for SmartHomeError {
    fn from(err: AuditLogError) -> Self {
        Self::Sink(Box::new(err))
    }
}
