//! Brightness command for dimmable lights.

use std::fmt;

use smarthome_domain::id::DeviceId;
use smarthome_domain::registry::Registry;

use super::Command;

/// Set a light's brightness. Undo restores the previous level unconditionally.
#[derive(Debug, Clone)]
pub struct SetBrightnessCommand {
    device: DeviceId,
    level: u8,
    prior: Option<u8>,
}

impl SetBrightnessCommand {
    #[must_use]
    pub fn new(device: DeviceId, level: u8) -> Self {
        Self {
            device,
            level,
            prior: None,
        }
    }
}

impl Command for SetBrightnessCommand {
    fn apply(&mut self, registry: &mut Registry) {
        self.prior = registry
            .device_mut(&self.device)
            .and_then(|device| device.as_dimmable_mut())
            .map(|light| {
                let prior = light.brightness();
                light.set_brightness(self.level);
                prior
            });
    }

    fn revert(&mut self, registry: &mut Registry) {
        if let Some(prior) = self.prior
            && let Some(light) = registry
                .device_mut(&self.device)
                .and_then(|device| device.as_dimmable_mut())
        {
            light.set_brightness(prior);
        }
    }
}

impl fmt::Display for SetBrightnessCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "set_brightness({}, {})", self.device, self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    fn brightness(registry: &Registry) -> u8 {
        registry
            .device(&DeviceId::new("lamp"))
            .and_then(|device| device.as_dimmable())
            .unwrap()
            .brightness()
    }

    #[test]
    fn should_restore_previous_level_when_reverted() {
        let mut registry = testing::home();
        SetBrightnessCommand::new(DeviceId::new("lamp"), 30).apply(&mut registry);
        let mut command = SetBrightnessCommand::new(DeviceId::new("lamp"), 75);

        command.apply(&mut registry);
        assert_eq!(brightness(&registry), 75);
        command.revert(&mut registry);

        assert_eq!(brightness(&registry), 30);
    }

    #[test]
    fn should_ignore_device_that_cannot_dim() {
        let mut registry = testing::home();
        let mut command = SetBrightnessCommand::new(DeviceId::new("door"), 50);

        command.apply(&mut registry);
        command.revert(&mut registry);

        assert!(!testing::is_on(&registry, "door"));
    }
}
