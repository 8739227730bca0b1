//! Device group — a named, ordered set of device handles (a room, a zone).
//!
//! Groups never own devices. They hold [`DeviceId`]s that are resolved
//! through the [`Registry`](crate::registry::Registry) at use time, so a
//! device removed from the registry simply stops being visible through its
//! groups.

use serde::{Deserialize, Serialize};

use crate::error::{SmartHomeError, ValidationError};
use crate::id::{DeviceId, GroupId};

/// A logical grouping of devices controlled as one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceGroup {
    pub id: GroupId,
    members: Vec<DeviceId>,
}

impl DeviceGroup {
    /// Create a builder for constructing a [`DeviceGroup`].
    #[must_use]
    pub fn builder() -> DeviceGroupBuilder {
        DeviceGroupBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Validation`] when `id` is empty.
    pub fn validate(&self) -> Result<(), SmartHomeError> {
        if self.id.is_empty() {
            return Err(ValidationError::EmptyId.into());
        }
        Ok(())
    }

    /// Members in insertion order. This is the scan order used by
    /// automation rules ("first matching member wins").
    #[must_use]
    pub fn members(&self) -> &[DeviceId] {
        &self.members
    }

    #[must_use]
    pub fn contains(&self, device_id: &DeviceId) -> bool {
        self.members.contains(device_id)
    }

    /// Add a member. Returns `false` if it was already present.
    pub fn add_member(&mut self, device_id: DeviceId) -> bool {
        if self.contains(&device_id) {
            return false;
        }
        self.members.push(device_id);
        true
    }

    /// Remove a member. Returns `false` if it was not present.
    pub fn remove_member(&mut self, device_id: &DeviceId) -> bool {
        let before = self.members.len();
        self.members.retain(|member| member != device_id);
        self.members.len() != before
    }
}

/// Step-by-step builder for [`DeviceGroup`].
#[derive(Debug, Default)]
pub struct DeviceGroupBuilder {
    id: Option<GroupId>,
    members: Vec<DeviceId>,
}

impl DeviceGroupBuilder {
    #[must_use]
    pub fn id(mut self, id: impl Into<GroupId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn member(mut self, device_id: impl Into<DeviceId>) -> Self {
        let device_id = device_id.into();
        if !self.members.contains(&device_id) {
            self.members.push(device_id);
        }
        self
    }

    /// Consume the builder, validate, and return a [`DeviceGroup`].
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Validation`] if `id` is missing or empty.
    pub fn build(self) -> Result<DeviceGroup, SmartHomeError> {
        let group = DeviceGroup {
            id: self.id.unwrap_or_else(|| GroupId::new("")),
            members: self.members,
        };
        group.validate()?;
        Ok(group)
    }
}
