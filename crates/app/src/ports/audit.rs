//! Audit sink port — the append-only destination for [`AuditRecord`]s.
//!
//! Recording is fire-and-forget from the core's point of view: a failing sink
//! is logged and never aborts the operation that produced the record.

use std::sync::Arc;

use smarthome_domain::audit::AuditRecord;
use smarthome_domain::error::SmartHomeError;

/// Destination for audit records produced by commands, rules and the scheduler.
pub trait AuditSink: Send + Sync {
    /// Append one record.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Sink`] when the backing store rejects the
    /// record. Callers in the core log the error and carry on.
    fn record(&self, record: AuditRecord) -> Result<(), SmartHomeError>;
}

impl<T: AuditSink + ?Sized> AuditSink for Arc<T> {
    fn record(&self, record: AuditRecord) -> Result<(), SmartHomeError> {
        (**self).record(record)
    }
}

impl<T: AuditSink + ?Sized> AuditSink for Box<T> {
    fn record(&self, record: AuditRecord) -> Result<(), SmartHomeError> {
        (**self).record(record)
    }
}

/// Sink that drops every record. Used when no audit destination is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardAudit;

impl AuditSink for DiscardAudit {
    fn record(&self, _record: AuditRecord) -> Result<(), SmartHomeError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct SpyAudit {
        records: Mutex<Vec<AuditRecord>>,
    }

    impl AuditSink for SpyAudit {
        fn record(&self, record: AuditRecord) -> Result<(), SmartHomeError> {
            self.records.lock().unwrap().push(record);
            Ok(())
        }
    }

    #[test]
    fn should_forward_records_through_shared_handle() {
        let spy = Arc::new(SpyAudit::default());
        let sink: Box<dyn AuditSink> = Box::new(Arc::clone(&spy));

        sink.record(AuditRecord::new("Controller", "execute")).unwrap();

        assert_eq!(spy.records.lock().unwrap().len(), 1);
    }

    #[test]
    fn should_accept_and_drop_records_when_discarding() {
        assert!(DiscardAudit.record(AuditRecord::new("x", "y")).is_ok());
    }
}
