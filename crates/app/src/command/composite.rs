//! Composite command: an ordered batch applied and undone as one unit.

use std::fmt;

use smarthome_domain::registry::Registry;

use super::Command;

/// Applies its children in insertion order and reverts them in reverse.
///
/// Children are best-effort: a child that turns out to be a no-op does not
/// stop the ones after it.
#[derive(Debug, Default)]
pub struct MacroCommand {
    commands: Vec<Box<dyn Command>>,
}

impl MacroCommand {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a child command.
    #[must_use]
    pub fn with(mut self, command: Box<dyn Command>) -> Self {
        self.push(command);
        self
    }

    pub fn push(&mut self, command: Box<dyn Command>) {
        self.commands.push(command);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl FromIterator<Box<dyn Command>> for MacroCommand {
    fn from_iter<I: IntoIterator<Item = Box<dyn Command>>>(iter: I) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}

impl Command for MacroCommand {
    fn apply(&mut self, registry: &mut Registry) {
        for command in &mut self.commands {
            command.apply(registry);
        }
    }

    fn revert(&mut self, registry: &mut Registry) {
        for command in self.commands.iter_mut().rev() {
            command.revert(registry);
        }
    }
}

impl fmt::Display for MacroCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("macro[")?;
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{command}")?;
        }
        f.write_str("]")
    }
}
