//! Virtual device implementations.
//!
//! Every device carries a free-form description (e.g. `"Living Room Light"`)
//! that prefixes its status line.

mod camera;
mod light;
mod lock;
mod sensor;
mod thermostat;

pub use camera::{Battery, VirtualCamera};
pub use light::{DimmableLight, VirtualLight};
pub use lock::DoorLock;
pub use sensor::MotionSensor;
pub use thermostat::{Thermostat, ThermostatFlavor};

fn on_off(on: bool) -> &'static str {
    if on { "ON" } else { "OFF" }
}
