//! Virtual motion sensor.

use smarthome_domain::device::{Device, DeviceKind, MotionSensing};
use smarthome_domain::id::DeviceId;

use super::on_off;

#[derive(Debug, Clone)]
pub struct MotionSensor {
    id: DeviceId,
    description: String,
    on: bool,
    motion: bool,
}

impl MotionSensor {
    #[must_use]
    pub fn new(id: DeviceId, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
            on: true,
            motion: false,
        }
    }
}

impl Device for MotionSensor {
    fn id(&self) -> &DeviceId {
        &self.id
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::MotionSensor
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
        let reading = if self.motion {
            "motion detected"
        } else {
            "no motion"
        };
        format!("{} | {} | {reading}", self.description, on_off(self.on))
    }

    fn as_motion_sensor(&self) -> Option<&dyn MotionSensing> {
        Some(self)
    }

    fn as_motion_sensor_mut(&mut self) -> Option<&mut dyn MotionSensing> {
        Some(self)
    }
}

impl MotionSensing for MotionSensor {
    fn motion_detected(&self) -> bool {
        self.motion
    }

    fn set_motion_detected(&mut self, detected: bool) {
        self.motion = detected;
    }
}
