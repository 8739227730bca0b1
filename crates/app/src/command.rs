//! Reversible commands.
//!
//! A [`Command`] is a unit of work against the [`Registry`] that can be
//! undone. Each command holds the id of its target, never a reference, and
//! resolves it at use time. `apply` captures whatever prior state `revert`
//! needs; `revert` is only meaningful relative to the most recent `apply`
//! and does nothing before the first one.
//!
//! A target that no longer exists, or that lacks the capability a command
//! needs, turns the command into a silent no-op.

/// Defines a command that flips one boolean capability of a device and
/// undoes the flip only when the captured prior state equals `$prior`.
macro_rules! capability_toggle {
    (
        $(#[doc = $doc:expr])*
        $name:ident => $label:literal,
        via $as_mut:ident,
        read $read:ident,
        apply $apply:ident,
        revert $revert:ident when prior is $prior:literal
    ) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone)]
        pub struct $name {
            device: ::smarthome_domain::id::DeviceId,
            prior: Option<bool>,
        }

        impl $name {
            #[must_use]
            pub fn new(device: ::smarthome_domain::id::DeviceId) -> Self {
                Self {
                    device,
                    prior: None,
                }
            }
        }

        impl $crate::command::Command for $name {
            fn apply(&mut self, registry: &mut ::smarthome_domain::registry::Registry) {
                self.prior = registry
                    .device_mut(&self.device)
                    .and_then(|device| device.$as_mut())
                    .map(|target| {
                        let prior = target.$read();
                        target.$apply();
                        prior
                    });
            }

            fn revert(&mut self, registry: &mut ::smarthome_domain::registry::Registry) {
                if self.prior == Some($prior)
                    && let Some(target) = registry
                        .device_mut(&self.device)
                        .and_then(|device| device.$as_mut())
                {
                    target.$revert();
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, concat!($label, "({})"), self.device)
            }
        }
    };
}

mod build;
mod camera;
mod composite;
mod light;
mod lock;
mod power;
mod thermostat;

use std::fmt;

use smarthome_domain::registry::Registry;

pub use build::build;
pub use camera::{
    DisableNightVisionCommand, EnableNightVisionCommand, StartRecordingCommand,
    StopRecordingCommand,
};
pub use composite::MacroCommand;
pub use light::SetBrightnessCommand;
pub use lock::{LockCommand, UnlockCommand};
pub use power::{GroupOffCommand, GroupOnCommand, TurnOffCommand, TurnOnCommand};
pub use thermostat::{SetTargetTemperatureCommand, SetThermostatModeCommand};

/// Reversible unit of work. `Display` renders a short description used in
/// logs and audit records, e.g. `turn_on(lamp)`.
pub trait Command: fmt::Display + Send {
    /// Perform the effect and capture the state needed to revert it.
    fn apply(&mut self, registry: &mut Registry);

    /// Restore the state captured by the most recent [`apply`](Self::apply).
    fn revert(&mut self, registry: &mut Registry);
}

impl fmt::Debug for dyn Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Command({self})")
    }
}
