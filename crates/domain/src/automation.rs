//! Automation modes supported by the home.
//!
//! A mode is the identity of an automation rule: the controller keeps at
//! most one rule per mode and activates rules by mode.

use serde::{Deserialize, Serialize};

/// Logical time units an energy-saving rule waits before switching off a
/// group that reports no motion.
pub const DEFAULT_ENERGY_SAVING_COOLDOWN: i64 = 600;

/// The automation modes a rule can implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutomationMode {
    /// Start camera recording when motion is detected or a door is unlocked.
    Security,
    /// Switch idle groups off after a cooldown.
    EnergySaving,
}

/// Lifecycle state of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleState {
    #[default]
    Inactive,
    Active,
}

impl std::fmt::Display for AutomationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Security => f.write_str("security"),
            Self::EnergySaving => f.write_str("energy_saving"),
        }
    }
}
