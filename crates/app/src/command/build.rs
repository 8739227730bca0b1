//! Turning a declarative [`CommandSpec`] into a live command.

use smarthome_domain::command_spec::CommandSpec;
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::id::DeviceId;
use smarthome_domain::registry::Registry;

use super::{
    Command, DisableNightVisionCommand, EnableNightVisionCommand, GroupOffCommand,
    GroupOnCommand, LockCommand, MacroCommand, SetBrightnessCommand, SetTargetTemperatureCommand,
    SetThermostatModeCommand, StartRecordingCommand, StopRecordingCommand, TurnOffCommand,
    TurnOnCommand, UnlockCommand,
};

/// Build a command from its spec, checking that every target exists.
///
/// Only existence is checked. A target that lacks the needed capability
/// yields a command that does nothing when applied.
///
/// # Errors
///
/// Returns [`SmartHomeError::NotFound`] when a device or group named by the
/// spec (or by any nested macro entry) is not registered.
pub fn build(spec: &CommandSpec, registry: &Registry) -> Result<Box<dyn Command>, SmartHomeError> {
    let device = |id: &DeviceId| registry.require_device(id).map(|_| id.clone());

    let command: Box<dyn Command> = match spec {
        CommandSpec::TurnOn { device: id } => Box::new(TurnOnCommand::new(device(id)?)),
        CommandSpec::TurnOff { device: id } => Box::new(TurnOffCommand::new(device(id)?)),
        CommandSpec::GroupOn { group } => {
            registry.require_group(group)?;
            Box::new(GroupOnCommand::new(group.clone()))
        }
        CommandSpec::GroupOff { group } => {
            registry.require_group(group)?;
            Box::new(GroupOffCommand::new(group.clone()))
        }
        CommandSpec::Lock { device: id } => Box::new(LockCommand::new(device(id)?)),
        CommandSpec::Unlock { device: id } => Box::new(UnlockCommand::new(device(id)?)),
        CommandSpec::EnableNightVision { device: id } => {
            Box::new(EnableNightVisionCommand::new(device(id)?))
        }
        CommandSpec::DisableNightVision { device: id } => {
            Box::new(DisableNightVisionCommand::new(device(id)?))
        }
        CommandSpec::StartRecording { device: id } => {
            Box::new(StartRecordingCommand::new(device(id)?))
        }
        CommandSpec::StopRecording { device: id } => {
            Box::new(StopRecordingCommand::new(device(id)?))
        }
        CommandSpec::SetBrightness { device: id, level } => {
            Box::new(SetBrightnessCommand::new(device(id)?, *level))
        }
        CommandSpec::SetTargetTemperature { device: id, celsius } => {
            Box::new(SetTargetTemperatureCommand::new(device(id)?, *celsius))
        }
        CommandSpec::SetThermostatMode { device: id, mode } => {
            Box::new(SetThermostatModeCommand::new(device(id)?, *mode))
        }
        CommandSpec::Macro { commands } => Box::new(
            commands
                .iter()
                .map(|child| build(child, registry))
                .collect::<Result<MacroCommand, _>>()?,
        ),
    };
    Ok(command)
}
