//! Undo history: a LIFO stack of executed commands with an optional cap.

use std::collections::VecDeque;

use crate::command::Command;

#[derive(Debug, Default)]
pub struct History {
    entries: VecDeque<Box<dyn Command>>,
    cap: Option<usize>,
}

impl History {
    /// History that discards its oldest entry once more than `cap` are held.
    /// `None` keeps everything.
    #[must_use]
    pub fn with_cap(cap: Option<usize>) -> Self {
        Self {
            entries: VecDeque::new(),
            cap,
        }
    }

    pub fn push(&mut self, command: Box<dyn Command>) {
        self.entries.push_back(command);
        if let Some(cap) = self.cap {
            while self.entries.len() > cap {
                if let Some(evicted) = self.entries.pop_front() {
                    tracing::debug!(
                        command = %evicted,
                        cap,
                        "history cap reached, dropping oldest"
                    );
                }
            }
        }
    }

    /// Most recently executed command.
    pub fn pop(&mut self) -> Option<Box<dyn Command>> {
        self.entries.pop_back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
