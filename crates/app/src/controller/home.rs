//! Mutable home state handed to released scheduler actions and to rules.

use std::collections::VecDeque;

use smarthome_domain::audit::AuditRecord;
use smarthome_domain::registry::Registry;

use super::history::History;
use crate::command::Command;
use crate::ports::AuditSink;

/// Everything the controller owns except the scheduler and the rules:
/// the device registry, the pending queue, the undo history and the audit
/// sink.
pub struct Home {
    registry: Registry,
    pending: VecDeque<Box<dyn Command>>,
    history: History,
    audit: Box<dyn AuditSink>,
}

impl Home {
    pub(crate) fn new(
        registry: Registry,
        audit: Box<dyn AuditSink>,
        history_cap: Option<usize>,
    ) -> Self {
        Self {
            registry,
            pending: VecDeque::new(),
            history: History::with_cap(history_cap),
            audit,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Append a command to the pending FIFO.
    pub fn queue(&mut self, command: Box<dyn Command>) {
        self.pending.push_back(command);
    }

    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Apply a command and push it onto the undo history.
    pub fn execute(&mut self, mut command: Box<dyn Command>, source: &str) {
        command.apply(&mut self.registry);
        tracing::debug!(%command, source, "executed");
        self.record(AuditRecord::new(source, "execute").target(command.to_string()));
        self.history.push(command);
    }

    /// Apply a command without making it undoable. Used for rule-issued work.
    pub fn apply_untracked(&mut self, command: &mut dyn Command) {
        command.apply(&mut self.registry);
        tracing::debug!(%command, "applied outside history");
    }

    /// Forward a record to the audit sink. Sink failures are logged only.
    pub fn record(&self, record: AuditRecord) {
        if let Err(err) = self.audit.record(record) {
            tracing::warn!(error = %err, "audit sink rejected record");
        }
    }

    pub(crate) fn drain_pending(&mut self) -> usize {
        let mut executed = 0;
        while let Some(command) = self.pending.pop_front() {
            self.execute(command, "Controller");
            executed += 1;
        }
        executed
    }

    pub(crate) fn undo(&mut self) -> bool {
        let Some(mut command) = self.history.pop() else {
            tracing::debug!("nothing to undo");
            return false;
        };
        command.revert(&mut self.registry);
        tracing::debug!(%command, "undone");
        self.record(AuditRecord::new("Controller", "undo").target(command.to_string()));
        true
    }
}

impl std::fmt::Debug for Home {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Home")
            .field("registry", &self.registry)
            .field("pending", &self.pending.len())
            .field("history", &self.history.len())
            .finish_non_exhaustive()
    }
}
