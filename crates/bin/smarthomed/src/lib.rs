//! # smarthomed — smart-home simulation daemon
//!
//! Composition root that wires the controller, virtual devices and the JSON
//! audit log together and replays a scripted scenario.
//!
//! ## Responsibilities
//! - Parse configuration (CLI args, env vars, config file)
//! - Build the device factory and the audit log (adapters)
//! - Construct the controller, injecting the audit sink via its port trait
//! - Build the home described by the scenario and run its steps
//! - Flush the audit log on exit
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer. No domain logic belongs here.

pub mod config;
pub mod scenario;
