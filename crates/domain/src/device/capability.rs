//! Narrow capability sets only some device kinds support.

use super::kind::ThermostatMode;

/// Reports whether motion is currently detected.
pub trait MotionSensing {
    fn motion_detected(&self) -> bool;

    fn set_motion_detected(&mut self, detected: bool);
}

/// Camera recording control.
pub trait Recording {
    fn is_recording(&self) -> bool;

    fn start_recording(&mut self);

    fn stop_recording(&mut self);
}

/// Camera night-vision control.
pub trait NightVision {
    fn is_night_vision_enabled(&self) -> bool;

    fn enable_night_vision(&mut self);

    fn disable_night_vision(&mut self);
}

/// Door lock control.
pub trait Lockable {
    fn is_locked(&self) -> bool;

    fn lock(&mut self);

    fn unlock(&mut self);
}

/// Brightness control, as a percentage in `0..=100`.
pub trait Dimmable {
    fn brightness(&self) -> u8;

    /// Set the brightness; implementations clamp to `0..=100`.
    fn set_brightness(&mut self, level: u8);
}

/// Thermostat mode and target temperature control.
///
/// Implementations may coerce a requested mode (a heater refuses to cool)
/// and clamp the target temperature to the range allowed by the active mode.
pub trait Climate {
    fn mode(&self) -> ThermostatMode;

    fn set_mode(&mut self, mode: ThermostatMode);

    fn target_temperature(&self) -> f32;

    fn set_target_temperature(&mut self, celsius: f32);
}
