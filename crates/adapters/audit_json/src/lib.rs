//! # smarthome-adapter-audit-json
//!
//! Implements the `AuditSink` port from `smarthome-app`.
//!
//! Records are appended to an in-memory buffer and mirrored as structured
//! `tracing` events (target `audit`). [`JsonAuditLog::flush`] writes the
//! whole buffer as a JSON array; [`JsonAuditLog::load`] reads one back.
//!
//! ## Dependency rule
//!
//! Depends on `smarthome-domain` and `smarthome-app` (port traits).

mod error;

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use smarthome_app::ports::AuditSink;
use smarthome_domain::audit::AuditRecord;
use smarthome_domain::error::SmartHomeError;

pub use error::AuditLogError;

/// Append-only audit log backed by memory, optionally flushed to a file.
#[derive(Debug, Default)]
pub struct JsonAuditLog {
    records: Mutex<Vec<AuditRecord>>,
    path: Option<PathBuf>,
}

impl JsonAuditLog {
    /// A log that only keeps records in memory.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// A log that writes to `path` on [`flush`](Self::flush).
    #[must_use]
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            records: Mutex::default(),
            path: Some(path.into()),
        }
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Snapshot of every record so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AuditLogError::Poisoned`] if a writer panicked.
    pub fn records(&self) -> Result<Vec<AuditRecord>, AuditLogError> {
        Ok(self.lock()?.clone())
    }

    /// # Errors
    ///
    /// Returns [`AuditLogError::Poisoned`] if a writer panicked.
    pub fn len(&self) -> Result<usize, AuditLogError> {
        Ok(self.lock()?.len())
    }

    /// # Errors
    ///
    /// Returns [`AuditLogError::Poisoned`] if a writer panicked.
    pub fn is_empty(&self) -> Result<bool, AuditLogError> {
        Ok(self.lock()?.is_empty())
    }

    /// Write every record to the configured path as a pretty JSON array.
    ///
    /// The file is written next to its destination and renamed into place,
    /// so readers never see a half-written log. Returns the number of records
    /// written, or zero when the log has no path.
    ///
    /// # Errors
    ///
    /// Returns [`AuditLogError::Io`] or [`AuditLogError::Json`] when the file
    /// cannot be written.
    pub fn flush(&self) -> Result<usize, AuditLogError> {
        let Some(path) = &self.path else {
            return Ok(0);
        };
        let records = self.records()?;
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let staging = path.with_extension("json.tmp");
        {
            let mut writer = BufWriter::new(File::create(&staging)?);
            serde_json::to_writer_pretty(&mut writer, &records)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        fs::rename(&staging, path)?;
        tracing::info!(path = %path.display(), count = records.len(), "audit log flushed");
        Ok(records.len())
    }

    /// Read a log previously written by [`flush`](Self::flush).
    ///
    /// # Errors
    ///
    /// Returns [`AuditLogError::Io`] when the file cannot be opened and
    /// [`AuditLogError::Json`] when it is not a JSON array of records.
    pub fn load(path: impl AsRef<Path>) -> Result<Vec<AuditRecord>, AuditLogError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<AuditRecord>>, AuditLogError> {
        self.records.lock().map_err(|_| AuditLogError::Poisoned)
    }
}

impl AuditSink for JsonAuditLog {
    fn record(&self, record: AuditRecord) -> Result<(), SmartHomeError> {
        tracing::info!(
            target: "audit",
            source = %record.source,
            action = %record.action,
            subject = record.target.as_deref().unwrap_or("-"),
            result = record.result.as_deref().unwrap_or("-"),
            "audit record"
        );
        self.lock()?.push(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("smarthome-audit-{}", uuid::Uuid::new_v4()))
            .join("audit.json")
    }

    #[test]
    fn should_keep_records_in_arrival_order() {
        let log = JsonAuditLog::in_memory();
        log.record(AuditRecord::new("Controller", "execute")).unwrap();
        log.record(AuditRecord::new("Controller", "undo")).unwrap();

        let actions: Vec<_> = log
            .records()
            .unwrap()
            .into_iter()
            .map(|record| record.action)
            .collect();
        assert_eq!(actions, ["execute", "undo"]);
        assert_eq!(log.len().unwrap(), 2);
    }

    #[test]
    fn should_write_nothing_when_flushing_without_path() {
        let log = JsonAuditLog::in_memory();
        log.record(AuditRecord::new("x", "y")).unwrap();
        assert_eq!(log.flush().unwrap(), 0);
    }

    #[test]
    fn should_flush_records_that_load_back_identically() {
        let path = scratch_path();
        let log = JsonAuditLog::with_path(&path);
        let record = AuditRecord::new("SecurityMode", "Motion detected - Camera started recording")
            .target("hallway");
        log.record(record.clone()).unwrap();

        assert_eq!(log.flush().unwrap(), 1);
        let loaded = JsonAuditLog::load(&path).unwrap();

        assert_eq!(loaded, vec![record]);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn should_return_io_error_when_loading_missing_file() {
        let result = JsonAuditLog::load(scratch_path());
        assert!(matches!(result, Err(AuditLogError::Io(_))));
    }

    #[test]
    fn should_be_usable_as_shared_sink() {
        let log = std::sync::Arc::new(JsonAuditLog::in_memory());
        let sink: Box<dyn AuditSink> = Box::new(std::sync::Arc::clone(&log));

        sink.record(AuditRecord::new("Scheduler", "execute")).unwrap();

        assert!(!log.is_empty().unwrap());
    }
}
