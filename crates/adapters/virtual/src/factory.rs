//! Keyed device factory.
//!
//! Creators are registered under a `kind::variant` key (for example
//! `light::dimmable`). Keys are normalised to lowercase with whitespace
//! removed, so `"Light :: Dimmable"` finds the same creator.

use std::collections::BTreeMap;

use smarthome_domain::device::Device;
use smarthome_domain::error::{NotFoundError, SmartHomeError, ValidationError};
use smarthome_domain::id::DeviceId;

use crate::devices::{
    Battery, DimmableLight, DoorLock, MotionSensor, Thermostat, ThermostatFlavor, VirtualCamera,
    VirtualLight,
};

/// Builds a device from its id and free-form description.
pub type Creator = Box<dyn Fn(DeviceId, &str) -> Box<dyn Device> + Send + Sync>;

/// Battery a freshly created wireless camera starts with.
const WIRELESS_START: Battery = Battery {
    percentage: 100,
    charging: false,
};

/// Table of device creators keyed by `kind::variant`.
pub struct DeviceFactory {
    creators: BTreeMap<String, Creator>,
}

impl Default for DeviceFactory {
    /// A factory with every virtual device registered.
    fn default() -> Self {
        let mut factory = Self::empty();
        factory.register("light", "basic", |id, description| {
            Box::new(VirtualLight::new(id, description))
        });
        factory.register("light", "dimmable", |id, description| {
            Box::new(DimmableLight::new(id, description))
        });
        factory.register("camera", "wired", |id, description| {
            Box::new(VirtualCamera::wired(id, description))
        });
        factory.register("camera", "wireless", |id, description| {
            Box::new(VirtualCamera::wireless(id, description, WIRELESS_START))
        });
        factory.register("sensor", "motion", |id, description| {
            Box::new(MotionSensor::new(id, description))
        });
        factory.register("lock", "door", |id, description| {
            Box::new(DoorLock::new(id, description))
        });
        factory.register("thermostat", "heater", |id, description| {
            Box::new(Thermostat::new(id, description, ThermostatFlavor::Heater))
        });
        factory.register("thermostat", "cooler", |id, description| {
            Box::new(Thermostat::new(id, description, ThermostatFlavor::Cooler))
        });
        factory
    }
}

impl DeviceFactory {
    /// A factory with no creators.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            creators: BTreeMap::new(),
        }
    }

    /// Normalise `kind` and `variant` into a lookup key.
    #[must_use]
    pub fn key(kind: &str, variant: &str) -> String {
        format!("{kind}::{variant}")
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect()
    }

    /// Register (or replace) the creator for `kind::variant`.
    pub fn register<F>(&mut self, kind: &str, variant: &str, creator: F)
    where
        F: Fn(DeviceId, &str) -> Box<dyn Device> + Send + Sync + 'static,
    {
        let key = Self::key(kind, variant);
        if self.creators.insert(key.clone(), Box::new(creator)).is_some() {
            tracing::debug!(%key, "replaced device creator");
        }
    }

    #[must_use]
    pub fn is_registered(&self, kind: &str, variant: &str) -> bool {
        self.creators.contains_key(&Self::key(kind, variant))
    }

    /// Registered keys in sorted order.
    #[must_use]
    pub fn supported(&self) -> Vec<&str> {
        self.creators.keys().map(String::as_str).collect()
    }

    /// Build a device.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Validation`] for an empty id and
    /// [`SmartHomeError::NotFound`] when no creator is registered for the
    /// key.
    pub fn create(
        &self,
        kind: &str,
        variant: &str,
        id: DeviceId,
        description: &str,
    ) -> Result<Box<dyn Device>, SmartHomeError> {
        if id.is_empty() {
            return Err(ValidationError::EmptyId.into());
        }
        let key = Self::key(kind, variant);
        let creator = self.creators.get(&key).ok_or_else(|| NotFoundError {
            entity: "DeviceType",
            id: key.clone(),
        })?;
        tracing::debug!(%key, device = %id, "creating device");
        Ok(creator(id, description))
    }
}

impl std::fmt::Debug for DeviceFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceFactory")
            .field("creators", &self.supported())
            .finish()
    }
}
