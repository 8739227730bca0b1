//! Virtual door lock. Being "on" means unlocked.

use smarthome_domain::device::{Device, DeviceKind, Lockable};
use smarthome_domain::id::DeviceId;

#[derive(Debug, Clone)]
pub struct DoorLock {
    id: DeviceId,
    description: String,
    locked: bool,
}

impl DoorLock {
    /// A new lock starts locked.
    #[must_use]
    pub fn new(id: DeviceId, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
            locked: true,
        }
    }
}

impl Device for DoorLock {
    fn id(&self) -> &DeviceId {
        &self.id
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::DoorLock
    }

    fn turn_on(&mut self) {
        self.locked = false;
    }

    fn turn_off(&mut self) {
        self.locked = true;
    }

    fn is_on(&self) -> bool {
        !self.locked
    }

    fn status(&self) -> String {
        let state = if self.locked { "LOCKED" } else { "UNLOCKED" };
        format!("{} | {state}", self.description)
    }

    fn as_lock(&self) -> Option<&dyn Lockable> {
        Some(self)
    }

    fn as_lock_mut(&mut self) -> Option<&mut dyn Lockable> {
        Some(self)
    }
}

impl Lockable for DoorLock {
    fn is_locked(&self) -> bool {
        self.locked
    }

    fn lock(&mut self) {
        self.locked = true;
    }

    fn unlock(&mut self) {
        self.locked = false;
    }
}
