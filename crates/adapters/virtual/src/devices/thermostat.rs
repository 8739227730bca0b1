//! Virtual thermostats.
//!
//! A heater never cools and a cooler never heats: asking for the other mode
//! selects the device's own mode instead. The target temperature is clamped
//! to the range of the active mode.

use std::ops::RangeInclusive;

use smarthome_domain::device::{Climate, Device, DeviceKind, ThermostatMode};
use smarthome_domain::id::DeviceId;

pub const DEFAULT_TARGET_CELSIUS: f32 = 24.0;
const COOLING_RANGE: RangeInclusive<f32> = 19.0..=26.0;
const HEATING_RANGE: RangeInclusive<f32> = 25.0..=32.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThermostatFlavor {
    Heater,
    Cooler,
}

impl ThermostatFlavor {
    fn native_mode(self) -> ThermostatMode {
        match self {
            Self::Heater => ThermostatMode::Heating,
            Self::Cooler => ThermostatMode::Cooling,
        }
    }

    fn coerce(self, mode: ThermostatMode) -> ThermostatMode {
        match mode {
            ThermostatMode::Off => ThermostatMode::Off,
            _ => self.native_mode(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Thermostat {
    id: DeviceId,
    description: String,
    flavor: ThermostatFlavor,
    mode: ThermostatMode,
    last_active_mode: ThermostatMode,
    target: f32,
    current: f32,
}

impl Thermostat {
    #[must_use]
    pub fn new(id: DeviceId, description: impl Into<String>, flavor: ThermostatFlavor) -> Self {
        Self {
            id,
            description: description.into(),
            flavor,
            mode: ThermostatMode::Off,
            last_active_mode: flavor.native_mode(),
            target: DEFAULT_TARGET_CELSIUS,
            current: DEFAULT_TARGET_CELSIUS,
        }
    }

    #[must_use]
    pub fn flavor(&self) -> ThermostatFlavor {
        self.flavor
    }

    #[must_use]
    pub fn current_temperature(&self) -> f32 {
        self.current
    }

    /// Feed a new room temperature reading.
    pub fn set_current_temperature(&mut self, celsius: f32) {
        self.current = celsius;
    }

    fn clamp_for_mode(mode: ThermostatMode, celsius: f32) -> f32 {
        match mode {
            ThermostatMode::Cooling => celsius.clamp(*COOLING_RANGE.start(), *COOLING_RANGE.end()),
            ThermostatMode::Heating => celsius.clamp(*HEATING_RANGE.start(), *HEATING_RANGE.end()),
            ThermostatMode::Off => celsius,
        }
    }
}

impl Device for Thermostat {
    fn id(&self) -> &DeviceId {
        &self.id
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::Thermostat
    }

    fn turn_on(&mut self) {
        self.mode = self.last_active_mode;
    }

    fn turn_off(&mut self) {
        if self.mode != ThermostatMode::Off {
            self.last_active_mode = self.mode;
        }
        self.mode = ThermostatMode::Off;
    }

    fn is_on(&self) -> bool {
        self.mode != ThermostatMode::Off
    }

    fn status(&self) -> String {
        match self.mode {
            ThermostatMode::Off => format!("{} | OFF", self.description),
            mode => format!(
                "{} | {} | Target: {:.1}°C | Current: {:.1}°C",
                self.description,
                mode.to_string().to_uppercase(),
                self.target,
                self.current
            ),
        }
    }

    fn as_thermostat(&self) -> Option<&dyn Climate> {
        Some(self)
    }

    fn as_thermostat_mut(&mut self) -> Option<&mut dyn Climate> {
        Some(self)
    }
}

impl Climate for Thermostat {
    fn mode(&self) -> ThermostatMode {
        self.mode
    }

    fn set_mode(&mut self, mode: ThermostatMode) {
        let accepted = self.flavor.coerce(mode);
        if accepted != mode {
            tracing::debug!(thermostat = %self.id, requested = %mode, %accepted, "mode coerced");
        }
        self.mode = accepted;
        if accepted != ThermostatMode::Off {
            self.last_active_mode = accepted;
        }
    }

    fn target_temperature(&self) -> f32 {
        self.target
    }

    fn set_target_temperature(&mut self, celsius: f32) {
        self.target = Self::clamp_for_mode(self.mode, celsius);
    }
}
