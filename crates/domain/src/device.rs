//! Device — a controllable thing in the home, plus its optional capabilities.
//!
//! Every device supports the uniform power contract (`turn_on`, `turn_off`,
//! `is_on`, `status`). Kind-specific behaviour is discovered through the
//! `as_*` capability queries, which return `None` for devices that lack the
//! capability. Callers treat `None` as a silent no-op.

mod capability;
mod kind;

pub use capability::{Climate, Dimmable, Lockable, MotionSensing, NightVision, Recording};
pub use kind::{DeviceKind, ThermostatMode};

use crate::id::DeviceId;

/// The uniform contract every device exposes to the core.
pub trait Device: Send {
    /// Registry key of this device.
    fn id(&self) -> &DeviceId;

    /// Broad family of the device, used for reporting.
    fn kind(&self) -> DeviceKind;

    fn turn_on(&mut self);

    fn turn_off(&mut self);

    fn is_on(&self) -> bool;

    /// Human readable one-line status.
    fn status(&self) -> String;

    fn as_motion_sensor(&self) -> Option<&dyn MotionSensing> {
        None
    }

    fn as_motion_sensor_mut(&mut self) -> Option<&mut dyn MotionSensing> {
        None
    }

    fn as_recorder(&self) -> Option<&dyn Recording> {
        None
    }

    fn as_recorder_mut(&mut self) -> Option<&mut dyn Recording> {
        None
    }

    fn as_night_vision(&self) -> Option<&dyn NightVision> {
        None
    }

    fn as_night_vision_mut(&mut self) -> Option<&mut dyn NightVision> {
        None
    }

    fn as_lock(&self) -> Option<&dyn Lockable> {
        None
    }

    fn as_lock_mut(&mut self) -> Option<&mut dyn Lockable> {
        None
    }

    fn as_dimmable(&self) -> Option<&dyn Dimmable> {
        None
    }

    fn as_dimmable_mut(&mut self) -> Option<&mut dyn Dimmable> {
        None
    }

    fn as_thermostat(&self) -> Option<&dyn Climate> {
        None
    }

    fn as_thermostat_mut(&mut self) -> Option<&mut dyn Climate> {
        None
    }
}

impl std::fmt::Debug for dyn Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Device")
            .field("id", self.id())
            .field("kind", &self.kind())
            .field("on", &self.is_on())
            .finish()
    }
}
