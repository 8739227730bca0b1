//! Audit record — an immutable, structured entry in the append-only log.
//!
//! Records are produced when commands run, automation rules fire, or the
//! scheduler releases work. They are handed to the audit sink port and never
//! read back by the core.

use serde::{Deserialize, Serialize};

use crate::id::RecordId;
use crate::time::Timestamp;

/// A single structured log entry: who did what, to what, with which outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: RecordId,
    pub timestamp: Timestamp,
    pub source: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

impl AuditRecord {
    /// Create a record stamped with the current wall-clock time.
    #[must_use]
    pub fn new(source: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(),
            timestamp: crate::time::now(),
            source: source.into(),
            action: action.into(),
            target: None,
            result: None,
        }
    }

    #[must_use]
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    #[must_use]
    pub fn result(mut self, result: impl Into<String>) -> Self {
        self.result = Some(result.into());
        self
    }
}

impl std::fmt::Display for AuditRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.source, self.action)?;
        if let Some(target) = &self.target {
            write!(f, " -> {target}")?;
        }
        if let Some(result) = &self.result {
            write!(f, " ({result})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_omit_absent_target_and_result_when_serialized() {
        let record = AuditRecord::new("Controller", "undo");
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("target").is_none());
        assert!(json.get("result").is_none());
        assert_eq!(json["source"], "Controller");
    }

    #[test]
    fn should_include_target_and_result_when_set() {
        let record = AuditRecord::new("SecurityMode", "Motion detected - Camera started recording")
            .target("hallway")
            .result("ok");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["target"], "hallway");
        assert_eq!(json["result"], "ok");
    }

    #[test]
    fn should_display_compact_line() {
        let record = AuditRecord::new("Scheduler", "released")
            .target("turn_on(lamp)")
            .result("ok");
        assert_eq!(
            record.to_string(),
            "[Scheduler] released -> turn_on(lamp) (ok)"
        );
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let record = AuditRecord::new("Controller", "execute").target("lock(door)");
        let json = serde_json::to_string(&record).unwrap();
        let parsed: AuditRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
