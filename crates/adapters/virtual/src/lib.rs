//! # smarthome-adapter-virtual
//!
//! Simulated devices and the keyed factory that builds them.
//!
//! ## Provided devices
//!
//! | Factory key | Type | Capabilities |
//! |-------------|------|--------------|
//! | `light::basic` | [`VirtualLight`] | on/off |
//! | `light::dimmable` | [`DimmableLight`] | on/off, brightness |
//! | `camera::wired` | [`VirtualCamera`] | recording, night vision |
//! | `camera::wireless` | [`VirtualCamera`] | recording, night vision, battery |
//! | `sensor::motion` | [`MotionSensor`] | motion sensing |
//! | `lock::door` | [`DoorLock`] | lock/unlock (on = unlocked) |
//! | `thermostat::heater` | [`Thermostat`] | mode (never cools), target temperature |
//! | `thermostat::cooler` | [`Thermostat`] | mode (never heats), target temperature |
//!
//! ## Dependency rule
//!
//! Depends on `smarthome-domain` only.

mod devices;
mod factory;

pub use devices::{
    Battery, DimmableLight, DoorLock, MotionSensor, Thermostat, ThermostatFlavor, VirtualCamera,
    VirtualLight,
};
pub use factory::{Creator, DeviceFactory};
