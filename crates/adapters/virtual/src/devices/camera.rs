//! Virtual cameras, wired or battery powered.

use smarthome_domain::device::{Device, DeviceKind, NightVision, Recording};
use smarthome_domain::id::DeviceId;

use super::on_off;

/// Percentage gained or lost per [`VirtualCamera::update_battery`] step.
const BATTERY_STEP: u8 = 5;

/// Battery pack of a wireless camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Battery {
    pub percentage: u8,
    pub charging: bool,
}

#[derive(Debug, Clone)]
pub struct VirtualCamera {
    id: DeviceId,
    description: String,
    on: bool,
    recording: bool,
    night_vision: bool,
    battery: Option<Battery>,
}

impl VirtualCamera {
    /// Mains-powered camera.
    #[must_use]
    pub fn wired(id: DeviceId, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
            on: false,
            recording: false,
            night_vision: false,
            battery: None,
        }
    }

    /// Battery-powered camera.
    #[must_use]
    pub fn wireless(id: DeviceId, description: impl Into<String>, battery: Battery) -> Self {
        Self {
            battery: Some(Battery {
                percentage: battery.percentage.min(100),
                ..battery
            }),
            ..Self::wired(id, description)
        }
    }

    #[must_use]
    pub fn battery(&self) -> Option<Battery> {
        self.battery
    }

    /// Plug in or unplug the charger. No effect on a wired camera.
    pub fn set_charging(&mut self, charging: bool) {
        if let Some(battery) = &mut self.battery {
            battery.charging = charging;
        }
    }

    /// Advance the battery by one step: charging gains charge and keeps the
    /// camera on, draining loses charge and switches the camera off once
    /// empty.
    pub fn update_battery(&mut self) {
        let Some(battery) = &mut self.battery else {
            return;
        };
        if battery.charging {
            battery.percentage = battery.percentage.saturating_add(BATTERY_STEP).min(100);
            self.on = true;
        } else {
            battery.percentage = battery.percentage.saturating_sub(BATTERY_STEP);
            if battery.percentage == 0 {
                self.on = false;
                tracing::debug!(camera = %self.id, "battery drained, camera off");
            }
        }
    }
}

impl Device for VirtualCamera {
    fn id(&self) -> &DeviceId {
        &self.id
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::Camera
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
        if !self.on {
            return format!("{} | OFF", self.description);
        }
        let mut status = format!("{} | ON", self.description);
        if let Some(battery) = self.battery {
            status.push_str(&format!(
                " | Battery: {}% | Charging: {}",
                battery.percentage,
                on_off(battery.charging)
            ));
        }
        status.push_str(&format!(
            " | Night Vision: {} | Recording: {}",
            on_off(self.night_vision),
            on_off(self.recording)
        ));
        status
    }

    fn as_recorder(&self) -> Option<&dyn Recording> {
        Some(self)
    }

    fn as_recorder_mut(&mut self) -> Option<&mut dyn Recording> {
        Some(self)
    }

    fn as_night_vision(&self) -> Option<&dyn NightVision> {
        Some(self)
    }

    fn as_night_vision_mut(&mut self) -> Option<&mut dyn NightVision> {
        Some(self)
    }
}

impl Recording for VirtualCamera {
    fn is_recording(&self) -> bool {
        self.recording
    }

    fn start_recording(&mut self) {
        self.recording = true;
    }

    fn stop_recording(&mut self) {
        self.recording = false;
    }
}

impl NightVision for VirtualCamera {
    fn is_night_vision_enabled(&self) -> bool {
        self.night_vision
    }

    fn enable_night_vision(&mut self) {
        self.night_vision = true;
    }

    fn disable_night_vision(&mut self) {
        self.night_vision = false;
    }
}
