//! Automation rules — stateful evaluators that inspect live device state and
//! issue commands, either immediately or deferred through the scheduler.
//!
//! A rule is identified by its [`AutomationMode`]. Rules start inactive,
//! become active on [`activate`](AutomationRule::activate), and calling
//! `activate` again on an active rule simply re-evaluates. Commands issued by
//! rules are applied outside the user's undo history.

mod energy_saving;
mod security;

use smarthome_domain::automation::{AutomationMode, RuleState};
use smarthome_domain::id::GroupId;

use crate::controller::Home;
use crate::scheduler::Scheduler;

pub use energy_saving::EnergySavingRule;
pub use security::SecurityRule;

/// Polymorphic automation rule.
pub trait AutomationRule: Send {
    fn mode(&self) -> AutomationMode;

    fn state(&self) -> RuleState;

    /// Evaluate `groups` against current device state and mark the rule
    /// active.
    fn activate(&mut self, groups: &[GroupId], home: &mut Home, scheduler: &mut Scheduler<Home>);

    /// Mark the rule inactive and forget its bookkeeping. Effects already
    /// applied and work already scheduled are left alone.
    fn deactivate(&mut self);
}

impl std::fmt::Debug for dyn AutomationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutomationRule")
            .field("mode", &self.mode())
            .field("state", &self.state())
            .finish()
    }
}
