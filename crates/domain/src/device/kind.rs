//! Device families and thermostat modes.

use serde::{Deserialize, Serialize};

/// Broad family a device belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    Light,
    Camera,
    MotionSensor,
    DoorLock,
    Thermostat,
}

impl std::fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => f.write_str("light"),
            Self::Camera => f.write_str("camera"),
            Self::MotionSensor => f.write_str("motion_sensor"),
            Self::DoorLock => f.write_str("door_lock"),
            Self::Thermostat => f.write_str("thermostat"),
        }
    }
}

/// Operating mode of a thermostat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThermostatMode {
    #[default]
    Off,
    Cooling,
    Heating,
}

impl std::fmt::Display for ThermostatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Off => f.write_str("off"),
            Self::Cooling => f.write_str("cooling"),
            Self::Heating => f.write_str("heating"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_thermostat_mode_to_off() {
        assert_eq!(ThermostatMode::default(), ThermostatMode::Off);
    }

    #[test]
    fn should_display_lowercase_mode_name() {
        assert_eq!(ThermostatMode::Cooling.to_string(), "cooling");
        assert_eq!(ThermostatMode::Heating.to_string(), "heating");
    }

    #[test]
    fn should_deserialize_mode_from_lowercase_string() {
        let mode: ThermostatMode = serde_json::from_str("\"heating\"").unwrap();
        assert_eq!(mode, ThermostatMode::Heating);
    }

    #[test]
    fn should_display_snake_case_kind() {
        assert_eq!(DeviceKind::MotionSensor.to_string(), "motion_sensor");
        assert_eq!(DeviceKind::DoorLock.to_string(), "door_lock");
    }
}
