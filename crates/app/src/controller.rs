//! Controller — the top-level orchestrator.
//!
//! The controller owns the [`Home`] state (registry, pending queue, undo
//! history, audit sink), a [`Scheduler`] over that state, and the registered
//! automation rules. It drives the tick / evaluate / execute cycle.

mod history;
mod home;

use smarthome_domain::audit::AuditRecord;
use smarthome_domain::automation::{AutomationMode, DEFAULT_ENERGY_SAVING_COOLDOWN, RuleState};
use smarthome_domain::command_spec::CommandSpec;
use smarthome_domain::device::Device;
use smarthome_domain::error::{NotFoundError, SmartHomeError};
use smarthome_domain::id::{DeviceId, GroupId};
use smarthome_domain::registry::Registry;
use smarthome_domain::time::{LogicalTime, Span};

use crate::automation::{AutomationRule, EnergySavingRule, SecurityRule};
use crate::command::{self, Command, MacroCommand, TurnOffCommand, TurnOnCommand};
use crate::ports::{AuditSink, DiscardAudit};
use crate::scheduler::{Scheduler, TaskResult, TaskToken};

pub use history::History;
pub use home::Home;

/// Top-level orchestrator of devices, commands, scheduling and automation.
#[derive(Debug)]
pub struct Controller {
    home: Home,
    scheduler: Scheduler<Home>,
    rules: Vec<Box<dyn AutomationRule>>,
}

impl Default for Controller {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Controller {
    /// Create a builder for constructing a [`Controller`].
    #[must_use]
    pub fn builder() -> ControllerBuilder {
        ControllerBuilder::default()
    }

    #[must_use]
    pub fn home(&self) -> &Home {
        &self.home
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        self.home.registry()
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        self.home.registry_mut()
    }

    /// Current logical time.
    #[must_use]
    pub fn now(&self) -> LogicalTime {
        self.scheduler.now()
    }

    #[must_use]
    pub fn scheduled_count(&self) -> usize {
        self.scheduler.len()
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.home.pending_len()
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.home.history_len()
    }

    // -- devices and groups ------------------------------------------------

    /// Register a device.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Validation`] for an empty or duplicate id.
    pub fn add_device(&mut self, device: Box<dyn Device>) -> Result<(), SmartHomeError> {
        let id = device.id().clone();
        self.home.registry_mut().add_device(device)?;
        tracing::info!(device = %id, "device added");
        Ok(())
    }

    /// Remove a device and drop it from every group.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when no such device exists.
    pub fn remove_device(&mut self, id: &DeviceId) -> Result<Box<dyn Device>, SmartHomeError> {
        let device = self.home.registry_mut().remove_device(id).ok_or_else(|| NotFoundError {
            entity: "Device",
            id: id.to_string(),
        })?;
        tracing::info!(device = %id, "device removed");
        Ok(device)
    }

    /// Create an empty group.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Validation`] for an empty or duplicate id.
    pub fn create_group(&mut self, id: GroupId) -> Result<(), SmartHomeError> {
        self.home.registry_mut().create_group(id)
    }

    /// Delete a group. Its member devices stay registered.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when no such group exists.
    pub fn delete_group(&mut self, id: &GroupId) -> Result<(), SmartHomeError> {
        self.home.registry_mut().delete_group(id).ok_or_else(|| NotFoundError {
            entity: "Group",
            id: id.to_string(),
        })?;
        Ok(())
    }

    /// Add a registered device to a group. Returns `false` if it already was
    /// a member.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the group or device is
    /// unknown.
    pub fn add_device_to_group(
        &mut self,
        group: &GroupId,
        device: &DeviceId,
    ) -> Result<bool, SmartHomeError> {
        self.home.registry_mut().add_to_group(group, device)
    }

    /// Remove a device from a group. Returns `false` if it was not a member.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the group is unknown.
    pub fn remove_device_from_group(
        &mut self,
        group: &GroupId,
        device: &DeviceId,
    ) -> Result<bool, SmartHomeError> {
        self.home.registry_mut().remove_from_group(group, device)
    }

    // -- commands ----------------------------------------------------------

    /// Append a command to the pending FIFO.
    #[tracing::instrument(skip_all, fields(command = %command))]
    pub fn queue_command(&mut self, command: Box<dyn Command>) {
        self.home.queue(command);
    }

    /// Build a command from its spec and queue it.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the spec names an unknown
    /// device or group.
    pub fn queue_spec(&mut self, spec: &CommandSpec) -> Result<(), SmartHomeError> {
        let command = command::build(spec, self.home.registry())?;
        self.queue_command(command);
        Ok(())
    }

    /// Apply every pending command in FIFO order and push each onto the undo
    /// history. Returns how many ran.
    #[tracing::instrument(skip(self))]
    pub fn execute_queued_commands(&mut self) -> usize {
        let executed = self.home.drain_pending();
        tracing::debug!(executed, "pending queue drained");
        executed
    }

    /// Revert the most recently executed command. Returns `false` when the
    /// history is empty.
    #[tracing::instrument(skip(self))]
    pub fn undo_last_command(&mut self) -> bool {
        self.home.undo()
    }

    /// Apply a command now and make it undoable, bypassing the queue.
    pub fn execute_now(&mut self, command: Box<dyn Command>) {
        self.home.execute(command, "Controller");
    }

    /// Switch every registered device on as a single undoable command.
    pub fn turn_all_on(&mut self) {
        let batch = self.every_device(|id| Box::new(TurnOnCommand::new(id)));
        self.execute_now(Box::new(batch));
    }

    /// Switch every registered device off as a single undoable command.
    pub fn turn_all_off(&mut self) {
        let batch = self.every_device(|id| Box::new(TurnOffCommand::new(id)));
        self.execute_now(Box::new(batch));
    }

    fn every_device(&self, make: impl Fn(DeviceId) -> Box<dyn Command>) -> MacroCommand {
        self.registry()
            .devices()
            .map(|device| make(device.id().clone()))
            .collect()
    }

    // -- scheduling --------------------------------------------------------

    /// Defer a command by `delay` logical units. When released it is applied
    /// and pushed onto the undo history. A negative delay is ignored.
    #[tracing::instrument(skip_all, fields(delay = delay, command = %command))]
    pub fn schedule_command(
        &mut self,
        delay: Span,
        command: Box<dyn Command>,
    ) -> Option<TaskToken> {
        self.scheduler
            .schedule_after(delay, move |home: &mut Home, _: &mut Scheduler<Home>| {
                home.execute(command, "Scheduler");
                Ok(())
            })
    }

    /// Build a command from its spec and defer it.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the spec names an unknown
    /// device or group.
    pub fn schedule_spec(
        &mut self,
        delay: Span,
        spec: &CommandSpec,
    ) -> Result<Option<TaskToken>, SmartHomeError> {
        let command = command::build(spec, self.home.registry())?;
        Ok(self.schedule_command(delay, command))
    }

    /// Defer an arbitrary action over the home state.
    pub fn schedule_action<F>(&mut self, delay: Span, action: F) -> Option<TaskToken>
    where
        F: FnOnce(&mut Home, &mut Scheduler<Home>) -> TaskResult + Send + 'static,
    {
        self.scheduler.schedule_after(delay, action)
    }

    /// Cancel a pending scheduled entry.
    pub fn cancel_scheduled(&mut self, token: TaskToken) -> bool {
        self.scheduler.cancel(token)
    }

    /// Advance logical time and release every entry now due. Returns the
    /// number released. A negative `elapsed` is ignored.
    #[tracing::instrument(skip(self))]
    pub fn tick_scheduler(&mut self, elapsed: Span) -> usize {
        self.scheduler.tick(elapsed, &mut self.home)
    }

    // -- automation --------------------------------------------------------

    /// Register a rule, replacing (and returning) any rule with the same mode.
    pub fn register_rule(
        &mut self,
        rule: Box<dyn AutomationRule>,
    ) -> Option<Box<dyn AutomationRule>> {
        let mode = rule.mode();
        match self.rules.iter().position(|existing| existing.mode() == mode) {
            Some(index) => Some(std::mem::replace(&mut self.rules[index], rule)),
            None => {
                self.rules.push(rule);
                None
            }
        }
    }

    #[must_use]
    pub fn rule_state(&self, mode: AutomationMode) -> Option<RuleState> {
        self.rules
            .iter()
            .find(|rule| rule.mode() == mode)
            .map(|rule| rule.state())
    }

    /// Activate the rule for `mode` against a snapshot of the current groups.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when no rule is registered for
    /// `mode`.
    #[tracing::instrument(skip(self))]
    pub fn activate(&mut self, mode: AutomationMode) -> Result<(), SmartHomeError> {
        let groups = self.home.registry().group_ids();
        let rule = rule_mut(&mut self.rules, mode)?;
        rule.activate(&groups, &mut self.home, &mut self.scheduler);
        self.home
            .record(AuditRecord::new("Controller", "activate").target(mode.to_string()));
        Ok(())
    }

    /// Deactivate the rule for `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when no rule is registered for
    /// `mode`.
    #[tracing::instrument(skip(self))]
    pub fn deactivate(&mut self, mode: AutomationMode) -> Result<(), SmartHomeError> {
        rule_mut(&mut self.rules, mode)?.deactivate();
        self.home
            .record(AuditRecord::new("Controller", "deactivate").target(mode.to_string()));
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when no security rule is
    /// registered.
    pub fn activate_security_mode(&mut self) -> Result<(), SmartHomeError> {
        self.activate(AutomationMode::Security)
    }

    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when no security rule is
    /// registered.
    pub fn deactivate_security_mode(&mut self) -> Result<(), SmartHomeError> {
        self.deactivate(AutomationMode::Security)
    }

    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when no energy-saving rule is
    /// registered.
    pub fn activate_energy_saving_mode(&mut self) -> Result<(), SmartHomeError> {
        self.activate(AutomationMode::EnergySaving)
    }

    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when no energy-saving rule is
    /// registered.
    pub fn deactivate_energy_saving_mode(&mut self) -> Result<(), SmartHomeError> {
        self.deactivate(AutomationMode::EnergySaving)
    }

    /// Re-evaluate every active rule against the current groups.
    pub fn check_automations(&mut self) {
        let groups = self.home.registry().group_ids();
        for rule in &mut self.rules {
            if rule.state() == RuleState::Active {
                rule.activate(&groups, &mut self.home, &mut self.scheduler);
            }
        }
    }

    // -- reporting ---------------------------------------------------------

    /// Multi-line summary of devices, groups, rules and queues.
    #[must_use]
    pub fn status_report(&self) -> String {
        let registry = self.registry();
        let mut out = format!("Time: {}\n", self.now());
        out.push_str(&format!("Devices ({}):\n", registry.device_count()));
        for device in registry.devices() {
            out.push_str(&format!("  {} [{}]: {}\n", device.id(), device.kind(), device.status()));
        }
        for group in registry.groups() {
            if let Some(status) = registry.group_status(&group.id) {
                out.push_str(&status);
            }
        }
        for rule in &self.rules {
            let state = match rule.state() {
                RuleState::Active => "active",
                RuleState::Inactive => "inactive",
            };
            out.push_str(&format!("Automation {}: {state}\n", rule.mode()));
        }
        out.push_str(&format!(
            "Pending: {}  History: {}  Scheduled: {}\n",
            self.pending_count(),
            self.history_len(),
            self.scheduled_count()
        ));
        out
    }
}

fn rule_mut(
    rules: &mut [Box<dyn AutomationRule>],
    mode: AutomationMode,
) -> Result<&mut Box<dyn AutomationRule>, SmartHomeError> {
    rules
        .iter_mut()
        .find(|rule| rule.mode() == mode)
        .ok_or_else(|| {
            NotFoundError {
                entity: "AutomationRule",
                id: mode.to_string(),
            }
            .into()
        })
}

/// Step-by-step builder for [`Controller`].
///
/// By default the controller starts with an empty registry, discards audit
/// records, keeps an unbounded history and registers both the security and
/// the energy-saving rule.
pub struct ControllerBuilder {
    registry: Registry,
    audit: Box<dyn AuditSink>,
    history_cap: Option<usize>,
    cooldown: Span,
    default_rules: bool,
}

impl Default for ControllerBuilder {
    fn default() -> Self {
        Self {
            registry: Registry::new(),
            audit: Box::new(DiscardAudit),
            history_cap: None,
            cooldown: DEFAULT_ENERGY_SAVING_COOLDOWN,
            default_rules: true,
        }
    }
}

impl ControllerBuilder {
    #[must_use]
    pub fn registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    #[must_use]
    pub fn audit(mut self, audit: impl AuditSink + 'static) -> Self {
        self.audit = Box::new(audit);
        self
    }

    #[must_use]
    pub fn history_cap(mut self, cap: Option<usize>) -> Self {
        self.history_cap = cap;
        self
    }

    /// Cooldown for the default energy-saving rule.
    #[must_use]
    pub fn energy_saving_cooldown(mut self, cooldown: Span) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Start without any registered rule.
    #[must_use]
    pub fn without_default_rules(mut self) -> Self {
        self.default_rules = false;
        self
    }

    #[must_use]
    pub fn build(self) -> Controller {
        let mut rules: Vec<Box<dyn AutomationRule>> = Vec::new();
        if self.default_rules {
            rules.push(Box::new(SecurityRule::new()));
            rules.push(Box::new(EnergySavingRule::with_cooldown(self.cooldown)));
        }
        Controller {
            home: Home::new(self.registry, self.audit, self.history_cap),
            scheduler: Scheduler::new(),
            rules,
        }
    }
}
