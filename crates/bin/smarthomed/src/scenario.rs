//! Scenario files — a home layout plus a script of controller operations.
//!
//! ```toml
//! [[devices]]
//! kind = "light"
//! variant = "dimmable"
//! id = "lamp"
//! description = "Living Room Lamp"
//!
//! [[groups]]
//! name = "living_room"
//! members = ["lamp"]
//!
//! [[steps]]
//! op = "queue"
//! command = { type = "turn_on", device = "lamp" }
//!
//! [[steps]]
//! op = "execute"
//! ```

use std::path::Path;

use serde::Deserialize;
use smarthome_adapter_virtual::DeviceFactory;
use smarthome_app::controller::Controller;
use smarthome_domain::automation::AutomationMode;
use smarthome_domain::command_spec::CommandSpec;
use smarthome_domain::error::{NotFoundError, SmartHomeError};
use smarthome_domain::id::{DeviceId, GroupId};
use smarthome_domain::time::Span;

/// A device to create through the factory.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceEntry {
    pub kind: String,
    pub variant: String,
    pub id: DeviceId,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupEntry {
    pub name: GroupId,
    #[serde(default)]
    pub members: Vec<DeviceId>,
}

/// One scripted controller operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Build a command and append it to the pending queue.
    Queue { command: CommandSpec },
    /// Drain the pending queue.
    Execute,
    /// Undo the most recent command.
    Undo,
    /// Defer a command by `delay` logical units.
    Schedule { delay: Span, command: CommandSpec },
    /// Advance logical time.
    Tick { elapsed: Span },
    Activate { mode: AutomationMode },
    Deactivate { mode: AutomationMode },
    /// Re-evaluate every active rule.
    CheckAutomations,
    /// Simulate a motion sensor reading.
    SetMotion { device: DeviceId, detected: bool },
    AllOn,
    AllOff,
    /// Capture the controller's status report.
    Status,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub devices: Vec<DeviceEntry>,
    pub groups: Vec<GroupEntry>,
    pub steps: Vec<Step>,
}

/// What a finished run produced.
#[derive(Debug, Default)]
pub struct RunReport {
    pub steps_run: usize,
    /// Every `status` step's report, in order.
    pub reports: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("failed to read scenario file")]
    Io(#[from] std::io::Error),
    #[error("failed to parse scenario file")]
    Parse(#[from] toml::de::Error),
    #[error("scenario step {step} failed")]
    Step {
        step: usize,
        #[source]
        source: SmartHomeError,
    },
    #[error("failed to set up the home")]
    Setup(#[source] SmartHomeError),
}

impl Scenario {
    /// # Errors
    ///
    /// Returns [`ScenarioError::Io`] or [`ScenarioError::Parse`] when the
    /// file cannot be read or is malformed.
    pub fn from_file(path: &Path) -> Result<Self, ScenarioError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// # Errors
    ///
    /// Returns [`ScenarioError::Parse`] when `content` is not a valid
    /// scenario.
    pub fn parse(content: &str) -> Result<Self, ScenarioError> {
        Ok(toml::from_str(content)?)
    }

    /// Create every device and group on `controller`.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Setup`] for an unknown device type, a
    /// duplicate id, or a group member that was never declared.
    pub fn build_home(
        &self,
        factory: &DeviceFactory,
        controller: &mut Controller,
    ) -> Result<(), ScenarioError> {
        for entry in &self.devices {
            let device = factory
                .create(&entry.kind, &entry.variant, entry.id.clone(), &entry.description)
                .map_err(ScenarioError::Setup)?;
            controller.add_device(device).map_err(ScenarioError::Setup)?;
        }
        for group in &self.groups {
            controller
                .create_group(group.name.clone())
                .map_err(ScenarioError::Setup)?;
            for member in &group.members {
                controller
                    .add_device_to_group(&group.name, member)
                    .map_err(ScenarioError::Setup)?;
            }
        }
        tracing::info!(
            devices = self.devices.len(),
            groups = self.groups.len(),
            "home built"
        );
        Ok(())
    }

    /// Build the home and run every step in order, stopping at the first
    /// failing step.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Setup`] when the home cannot be built and
    /// [`ScenarioError::Step`] with the 1-based index of a failing step.
    pub fn run(
        &self,
        factory: &DeviceFactory,
        controller: &mut Controller,
    ) -> Result<RunReport, ScenarioError> {
        self.build_home(factory, controller)?;
        let mut report = RunReport::default();
        for (index, step) in self.steps.iter().enumerate() {
            run_step(step, controller, &mut report).map_err(|source| ScenarioError::Step {
                step: index + 1,
                source,
            })?;
            report.steps_run += 1;
        }
        Ok(report)
    }
}

fn run_step(
    step: &Step,
    controller: &mut Controller,
    report: &mut RunReport,
) -> Result<(), SmartHomeError> {
    tracing::debug!(?step, now = controller.now(), "running step");
    match step {
        Step::Queue { command } => controller.queue_spec(command)?,
        Step::Execute => {
            controller.execute_queued_commands();
        }
        Step::Undo => {
            if !controller.undo_last_command() {
                tracing::info!("nothing to undo");
            }
        }
        Step::Schedule { delay, command } => {
            if controller.schedule_spec(*delay, command)?.is_none() {
                tracing::warn!(delay, %command, "negative delay, command not scheduled");
            }
        }
        Step::Tick { elapsed } => {
            controller.tick_scheduler(*elapsed);
        }
        Step::Activate { mode } => controller.activate(*mode)?,
        Step::Deactivate { mode } => controller.deactivate(*mode)?,
        Step::CheckAutomations => controller.check_automations(),
        Step::SetMotion { device, detected } => set_motion(controller, device, *detected)?,
        Step::AllOn => controller.turn_all_on(),
        Step::AllOff => controller.turn_all_off(),
        Step::Status => report.reports.push(controller.status_report()),
    }
    Ok(())
}

fn set_motion(
    controller: &mut Controller,
    id: &DeviceId,
    detected: bool,
) -> Result<(), SmartHomeError> {
    let device = controller
        .registry_mut()
        .device_mut(id)
        .ok_or_else(|| NotFoundError {
            entity: "Device",
            id: id.to_string(),
        })?;
    match device.as_motion_sensor_mut() {
        Some(sensor) => sensor.set_motion_detected(detected),
        None => tracing::warn!(device = %id, "device has no motion sensor, ignoring"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HALLWAY: &str = r#"
        [[devices]]
        kind = "camera"
        variant = "wired"
        id = "cam"
        description = "Hallway Camera"

        [[devices]]
        kind = "sensor"
        variant = "motion"
        id = "pir"

        [[groups]]
        name = "hallway"
        members = ["cam", "pir"]

        [[steps]]
        op = "all_on"

        [[steps]]
        op = "set_motion"
        device = "pir"
        detected = true

        [[steps]]
        op = "activate"
        mode = "security"

        [[steps]]
        op = "status"
    "#;

    #[test]
    fn should_parse_devices_groups_and_steps() {
        let scenario = Scenario::parse(HALLWAY).unwrap();
        assert_eq!(scenario.devices.len(), 2);
        assert_eq!(scenario.groups[0].members.len(), 2);
        assert!(matches!(
            scenario.steps[2],
            Step::Activate {
                mode: AutomationMode::Security
            }
        ));
    }

    #[test]
    fn should_parse_command_specs_inside_steps() {
        let scenario = Scenario::parse(
            r#"
            [[steps]]
            op = "schedule"
            delay = 30
            command = { type = "set_brightness", device = "lamp", level = 40 }
            "#,
        )
        .unwrap();
        match &scenario.steps[0] {
            Step::Schedule { delay, command } => {
                assert_eq!(*delay, 30);
                assert_eq!(command.to_string(), "set_brightness(lamp, 40)");
            }
            other => panic!("unexpected step {other:?}"),
        }
    }

    #[test]
    fn should_run_steps_and_collect_status_reports() {
        let scenario = Scenario::parse(HALLWAY).unwrap();
        let mut controller = Controller::default();

        let report = scenario
            .run(&DeviceFactory::default(), &mut controller)
            .unwrap();

        assert_eq!(report.steps_run, 4);
        assert_eq!(report.reports.len(), 1);
        assert!(report.reports[0].contains("Recording: ON"));
    }

    #[test]
    fn should_fail_setup_when_device_type_unknown() {
        let scenario = Scenario::parse(
            r#"
            [[devices]]
            kind = "toaster"
            variant = "smart"
            id = "t"
            "#,
        )
        .unwrap();

        let result = scenario.run(&DeviceFactory::default(), &mut Controller::default());

        assert!(matches!(
            result,
            Err(ScenarioError::Setup(SmartHomeError::NotFound(_)))
        ));
    }

    #[test]
    fn should_report_failing_step_index() {
        let scenario = Scenario::parse(
            r#"
            [[steps]]
            op = "execute"

            [[steps]]
            op = "queue"
            command = { type = "turn_on", device = "ghost" }
            "#,
        )
        .unwrap();

        let result = scenario.run(&DeviceFactory::default(), &mut Controller::default());

        assert!(matches!(result, Err(ScenarioError::Step { step: 2, .. })));
    }

    #[test]
    fn should_reject_unknown_operation() {
        let result = Scenario::parse(
            r#"
            [[steps]]
            op = "explode"
            "#,
        );
        assert!(matches!(result, Err(ScenarioError::Parse(_))));
    }
}
