//! Registry — the single owner of every device and group in the home.
//!
//! Devices live in an arena keyed by [`DeviceId`]. Groups and commands hold
//! ids, never references, and resolve them here at use time. Iteration order
//! is the key order, which keeps group snapshots and reports deterministic.

use std::collections::BTreeMap;

use crate::device::Device;
use crate::error::{NotFoundError, SmartHomeError, ValidationError};
use crate::group::DeviceGroup;
use crate::id::{DeviceId, GroupId};

/// Arena of devices plus the groups that reference them.
#[derive(Debug, Default)]
pub struct Registry {
    devices: BTreeMap<DeviceId, Box<dyn Device>>,
    groups: BTreeMap<GroupId, DeviceGroup>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a device under its own id.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Validation`] when the id is empty or
    /// already taken.
    pub fn add_device(&mut self, device: Box<dyn Device>) -> Result<(), SmartHomeError> {
        let id = device.id().clone();
        if id.is_empty() {
            return Err(ValidationError::EmptyId.into());
        }
        if self.devices.contains_key(&id) {
            return Err(ValidationError::Duplicate {
                kind: "Device",
                id: id.to_string(),
            }
            .into());
        }
        self.devices.insert(id, device);
        Ok(())
    }

    /// Remove a device and drop it from every group it belonged to.
    pub fn remove_device(&mut self, id: &DeviceId) -> Option<Box<dyn Device>> {
        let removed = self.devices.remove(id)?;
        for group in self.groups.values_mut() {
            group.remove_member(id);
        }
        Some(removed)
    }

    #[must_use]
    pub fn device(&self, id: &DeviceId) -> Option<&dyn Device> {
        self.devices.get(id).map(|device| &**device)
    }

    pub fn device_mut(&mut self, id: &DeviceId) -> Option<&mut dyn Device> {
        match self.devices.get_mut(id) {
            Some(device) => Some(&mut **device),
            None => None,
        }
    }

    /// Look up a device, returning an error if it is not registered.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when no device with `id` exists.
    pub fn require_device(&self, id: &DeviceId) -> Result<&dyn Device, SmartHomeError> {
        self.device(id).ok_or_else(|| {
            NotFoundError {
                entity: "Device",
                id: id.to_string(),
            }
            .into()
        })
    }

    pub fn devices(&self) -> impl Iterator<Item = &dyn Device> {
        self.devices.values().map(|device| &**device)
    }

    #[must_use]
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// Register a new, empty group.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Validation`] when the id is empty or the
    /// group already exists.
    pub fn create_group(&mut self, id: GroupId) -> Result<(), SmartHomeError> {
        if self.groups.contains_key(&id) {
            return Err(ValidationError::Duplicate {
                kind: "Group",
                id: id.to_string(),
            }
            .into());
        }
        let group = DeviceGroup::builder().id(id).build()?;
        self.groups.insert(group.id.clone(), group);
        Ok(())
    }

    /// Delete a group. Member devices are untouched.
    pub fn delete_group(&mut self, id: &GroupId) -> Option<DeviceGroup> {
        self.groups.remove(id)
    }

    #[must_use]
    pub fn group(&self, id: &GroupId) -> Option<&DeviceGroup> {
        self.groups.get(id)
    }

    /// Look up a group, returning an error if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when no group with `id` exists.
    pub fn require_group(&self, id: &GroupId) -> Result<&DeviceGroup, SmartHomeError> {
        self.group(id).ok_or_else(|| {
            NotFoundError {
                entity: "Group",
                id: id.to_string(),
            }
            .into()
        })
    }

    pub fn groups(&self) -> impl Iterator<Item = &DeviceGroup> {
        self.groups.values()
    }

    /// Snapshot of the current group ids, in registry order.
    #[must_use]
    pub fn group_ids(&self) -> Vec<GroupId> {
        self.groups.keys().cloned().collect()
    }

    /// Add a registered device to an existing group.
    ///
    /// Returns `Ok(false)` when the device was already a member.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when either the group or the
    /// device is unknown.
    pub fn add_to_group(
        &mut self,
        group_id: &GroupId,
        device_id: &DeviceId,
    ) -> Result<bool, SmartHomeError> {
        self.require_device(device_id)?;
        let group = self.groups.get_mut(group_id).ok_or_else(|| NotFoundError {
            entity: "Group",
            id: group_id.to_string(),
        })?;
        Ok(group.add_member(device_id.clone()))
    }

    /// Remove a device from a group.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the group is unknown.
    pub fn remove_from_group(
        &mut self,
        group_id: &GroupId,
        device_id: &DeviceId,
    ) -> Result<bool, SmartHomeError> {
        let group = self.groups.get_mut(group_id).ok_or_else(|| NotFoundError {
            entity: "Group",
            id: group_id.to_string(),
        })?;
        Ok(group.remove_member(device_id))
    }

    /// Resolvable members of a group, in membership order.
    ///
    /// Yields nothing for an unknown group.
    pub fn group_members<'a>(
        &'a self,
        id: &GroupId,
    ) -> impl Iterator<Item = &'a dyn Device> + use<'a> {
        self.groups
            .get(id)
            .map(DeviceGroup::members)
            .unwrap_or_default()
            .iter()
            .filter_map(|member| self.device(member))
    }

    /// Whether every resolvable member is on (vacuously `true` when the
    /// group is empty). `None` for an unknown group.
    #[must_use]
    pub fn group_is_on(&self, id: &GroupId) -> Option<bool> {
        self.groups.get(id)?;
        Some(self.group_members(id).all(|device| device.is_on()))
    }

    /// Turn every member on. Returns `false` for an unknown group.
    pub fn turn_group_on(&mut self, id: &GroupId) -> bool {
        self.for_each_member(id, |device| device.turn_on())
    }

    /// Turn every member off. Returns `false` for an unknown group.
    pub fn turn_group_off(&mut self, id: &GroupId) -> bool {
        self.for_each_member(id, |device| device.turn_off())
    }

    fn for_each_member(&mut self, id: &GroupId, mut op: impl FnMut(&mut dyn Device)) -> bool {
        let Some(group) = self.groups.get(id) else {
            return false;
        };
        for member in group.members() {
            if let Some(device) = self.devices.get_mut(member) {
                op(&mut **device);
            }
        }
        true
    }

    /// Multi-line status of a group, one member per line.
    #[must_use]
    pub fn group_status(&self, id: &GroupId) -> Option<String> {
        self.groups.get(id)?;
        let mut out = format!("Group: {id}\n");
        for device in self.group_members(id) {
            out.push_str(&format!("  {}: {}\n", device.id(), device.status()));
        }
        Some(out)
    }
}
