//! Thermostat commands. Both restore the prior value unconditionally on undo.

use std::fmt;

use smarthome_domain::device::ThermostatMode;
use smarthome_domain::id::DeviceId;
use smarthome_domain::registry::Registry;

use super::Command;

#[derive(Debug, Clone)]
pub struct SetTargetTemperatureCommand {
    device: DeviceId,
    celsius: f32,
    prior: Option<f32>,
}

impl SetTargetTemperatureCommand {
    #[must_use]
    pub fn new(device: DeviceId, celsius: f32) -> Self {
        Self {
            device,
            celsius,
            prior: None,
        }
    }
}

impl Command for SetTargetTemperatureCommand {
    fn apply(&mut self, registry: &mut Registry) {
        self.prior = registry
            .device_mut(&self.device)
            .and_then(|device| device.as_thermostat_mut())
            .map(|thermostat| {
                let prior = thermostat.target_temperature();
                thermostat.set_target_temperature(self.celsius);
                prior
            });
    }

    fn revert(&mut self, registry: &mut Registry) {
        if let Some(prior) = self.prior
            && let Some(thermostat) = registry
                .device_mut(&self.device)
                .and_then(|device| device.as_thermostat_mut())
        {
            thermostat.set_target_temperature(prior);
        }
    }
}

impl fmt::Display for SetTargetTemperatureCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "set_target_temperature({}, {})", self.device, self.celsius)
    }
}

#[derive(Debug, Clone)]
pub struct SetThermostatModeCommand {
    device: DeviceId,
    mode: ThermostatMode,
    prior: Option<ThermostatMode>,
}

impl SetThermostatModeCommand {
    #[must_use]
    pub fn new(device: DeviceId, mode: ThermostatMode) -> Self {
        Self {
            device,
            mode,
            prior: None,
        }
    }
}

impl Command for SetThermostatModeCommand {
    fn apply(&mut self, registry: &mut Registry) {
        self.prior = registry
            .device_mut(&self.device)
            .and_then(|device| device.as_thermostat_mut())
            .map(|thermostat| {
                let prior = thermostat.mode();
                thermostat.set_mode(self.mode);
                prior
            });
    }

    fn revert(&mut self, registry: &mut Registry) {
        if let Some(prior) = self.prior
            && let Some(thermostat) = registry
                .device_mut(&self.device)
                .and_then(|device| device.as_thermostat_mut())
        {
            thermostat.set_mode(prior);
        }
    }
}

impl fmt::Display for SetThermostatModeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "set_thermostat_mode({}, {})", self.device, self.mode)
    }
}
