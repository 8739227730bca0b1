//! Command spec — a declarative, serializable description of a command.
//!
//! Specs are what configuration files and front-ends produce. The `app`
//! crate turns a spec into a live, reversible command after resolving its
//! target in the registry.

use serde::{Deserialize, Serialize};

use crate::device::ThermostatMode;
use crate::id::{DeviceId, GroupId};

/// Every command the engine knows how to build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommandSpec {
    TurnOn {
        device: DeviceId,
    },
    TurnOff {
        device: DeviceId,
    },
    GroupOn {
        group: GroupId,
    },
    GroupOff {
        group: GroupId,
    },
    Lock {
        device: DeviceId,
    },
    Unlock {
        device: DeviceId,
    },
    EnableNightVision {
        device: DeviceId,
    },
    DisableNightVision {
        device: DeviceId,
    },
    StartRecording {
        device: DeviceId,
    },
    StopRecording {
        device: DeviceId,
    },
    SetBrightness {
        device: DeviceId,
        /// Percentage in `0..=100`.
        level: u8,
    },
    SetTargetTemperature {
        device: DeviceId,
        celsius: f32,
    },
    SetThermostatMode {
        device: DeviceId,
        mode: ThermostatMode,
    },
    /// An ordered batch applied and reverted as one unit.
    Macro {
        commands: Vec<CommandSpec>,
    },
}

impl std::fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TurnOn { device } => write!(f, "turn_on({device})"),
            Self::TurnOff { device } => write!(f, "turn_off({device})"),
            Self::GroupOn { group } => write!(f, "group_on({group})"),
            Self::GroupOff { group } => write!(f, "group_off({group})"),
            Self::Lock { device } => write!(f, "lock({device})"),
            Self::Unlock { device } => write!(f, "unlock({device})"),
            Self::EnableNightVision { device } => write!(f, "enable_night_vision({device})"),
            Self::DisableNightVision { device } => write!(f, "disable_night_vision({device})"),
            Self::StartRecording { device } => write!(f, "start_recording({device})"),
            Self::StopRecording { device } => write!(f, "stop_recording({device})"),
            Self::SetBrightness { device, level } => write!(f, "set_brightness({device}, {level})"),
            Self::SetTargetTemperature { device, celsius } => {
                write!(f, "set_target_temperature({device}, {celsius})")
            }
            Self::SetThermostatMode { device, mode } => {
                write!(f, "set_thermostat_mode({device}, {mode})")
            }
            Self::Macro { commands } => write!(f, "macro({} commands)", commands.len()),
        }
    }
}
