//! Virtual lights.

use smarthome_domain::device::{Device, DeviceKind, Dimmable};
use smarthome_domain::id::DeviceId;

use super::on_off;

/// Plain on/off light.
#[derive(Debug, Clone)]
pub struct VirtualLight {
    id: DeviceId,
    description: String,
    on: bool,
}

impl VirtualLight {
    #[must_use]
    pub fn new(id: DeviceId, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
            on: false,
        }
    }
}

impl Device for VirtualLight {
    fn id(&self) -> &DeviceId {
        &self.id
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::Light
    }

    fn turn_on(&mut self) {
        self.on = true;
    }

    fn turn_off(&mut self) {
        self.on = false;
    }

    fn is_on(&self) -> bool {
        self.on
    }

    fn status(&self) -> String {
        format!("{} | {}", self.description, on_off(self.on))
    }
}

/// Brightness level a dimmable light jumps to when switched on.
pub const DEFAULT_ON_BRIGHTNESS: u8 = 80;

/// Light with a brightness percentage. Brightness zero means off.
#[derive(Debug, Clone)]
pub struct DimmableLight {
    id: DeviceId,
    description: String,
    brightness: u8,
}

impl DimmableLight {
    #[must_use]
    pub fn new(id: DeviceId, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
            brightness: 0,
        }
    }

    fn level_name(&self) -> &'static str {
        match self.brightness {
            0 => "OFF",
            1..=50 => "DIMMED LOW",
            51..=99 => "DIMMED HIGH",
            _ => "ON",
        }
    }
}

impl Device for DimmableLight {
    fn id(&self) -> &DeviceId {
        &self.id
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::Light
    }

    fn turn_on(&mut self) {
        self.brightness = DEFAULT_ON_BRIGHTNESS;
    }

    fn turn_off(&mut self) {
        self.brightness = 0;
    }

    fn is_on(&self) -> bool {
        self.brightness > 0
    }

    fn status(&self) -> String {
        format!(
            "{} | {} ({}%)",
            self.description,
            self.level_name(),
            self.brightness
        )
    }

    fn as_dimmable(&self) -> Option<&dyn Dimmable> {
        Some(self)
    }

    fn as_dimmable_mut(&mut self) -> Option<&mut dyn Dimmable> {
        Some(self)
    }
}

impl Dimmable for DimmableLight {
    fn brightness(&self) -> u8 {
        self.brightness
    }

    fn set_brightness(&mut self, level: u8) {
        self.brightness = level.min(100);
    }
}
