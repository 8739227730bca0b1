//! On/off commands for single devices and whole groups.

use std::fmt;

use smarthome_domain::id::{DeviceId, GroupId};
use smarthome_domain::registry::Registry;

use super::Command;

/// Switch a device on. Undo switches it back off only if it was off before.
#[derive(Debug, Clone)]
pub struct TurnOnCommand {
    device: DeviceId,
    was_on: Option<bool>,
}

impl TurnOnCommand {
    #[must_use]
    pub fn new(device: DeviceId) -> Self {
        Self {
            device,
            was_on: None,
        }
    }
}

impl Command for TurnOnCommand {
    fn apply(&mut self, registry: &mut Registry) {
        self.was_on = registry.device_mut(&self.device).map(|device| {
            let was_on = device.is_on();
            device.turn_on();
            was_on
        });
    }

    fn revert(&mut self, registry: &mut Registry) {
        if self.was_on == Some(false)
            && let Some(device) = registry.device_mut(&self.device)
        {
            device.turn_off();
        }
    }
}

impl fmt::Display for TurnOnCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "turn_on({})", self.device)
    }
}

/// Switch a device off. Undo switches it back on only if it was on before.
#[derive(Debug, Clone)]
pub struct TurnOffCommand {
    device: DeviceId,
    was_on: Option<bool>,
}

impl TurnOffCommand {
    #[must_use]
    pub fn new(device: DeviceId) -> Self {
        Self {
            device,
            was_on: None,
        }
    }
}

impl Command for TurnOffCommand {
    fn apply(&mut self, registry: &mut Registry) {
        self.was_on = registry.device_mut(&self.device).map(|device| {
            let was_on = device.is_on();
            device.turn_off();
            was_on
        });
    }

    fn revert(&mut self, registry: &mut Registry) {
        if self.was_on == Some(true)
            && let Some(device) = registry.device_mut(&self.device)
        {
            device.turn_on();
        }
    }
}

impl fmt::Display for TurnOffCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "turn_off({})", self.device)
    }
}

/// Switch every member of a group on.
///
/// The captured state is the group's aggregate `is_on` (all members on), so
/// undo switches the whole group off unless every member was already on.
#[derive(Debug, Clone)]
pub struct GroupOnCommand {
    group: GroupId,
    was_on: Option<bool>,
}

impl GroupOnCommand {
    #[must_use]
    pub fn new(group: GroupId) -> Self {
        Self {
            group,
            was_on: None,
        }
    }
}

impl Command for GroupOnCommand {
    fn apply(&mut self, registry: &mut Registry) {
        self.was_on = registry.group_is_on(&self.group);
        registry.turn_group_on(&self.group);
    }

    fn revert(&mut self, registry: &mut Registry) {
        if self.was_on == Some(false) {
            registry.turn_group_off(&self.group);
        }
    }
}

impl fmt::Display for GroupOnCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group_on({})", self.group)
    }
}

/// Switch every member of a group off.
#[derive(Debug, Clone)]
pub struct GroupOffCommand {
    group: GroupId,
    was_on: Option<bool>,
}

impl GroupOffCommand {
    #[must_use]
    pub fn new(group: GroupId) -> Self {
        Self {
            group,
            was_on: None,
        }
    }
}

impl Command for GroupOffCommand {
    fn apply(&mut self, registry: &mut Registry) {
        self.was_on = registry.group_is_on(&self.group);
        registry.turn_group_off(&self.group);
    }

    fn revert(&mut self, registry: &mut Registry) {
        if self.was_on == Some(true) {
            registry.turn_group_on(&self.group);
        }
    }
}

impl fmt::Display for GroupOffCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group_off({})", self.group)
    }
}
