//! # smarthome-domain
//!
//! Pure domain model for the smarthome automation core.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, logical time
//! - Define the **Device** contract and its optional **capabilities**
//!   (motion sensing, recording, night vision, locking, dimming, climate)
//! - Define **Groups** (named, ordered sets of device handles)
//! - Own device lifetime in the [`registry::Registry`] arena
//! - Define **Command specs** (declarative descriptions of reversible commands)
//! - Define **Audit records** (structured, append-only log entries)
//! - Define the supported **automation modes**
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod audit;
pub mod automation;
pub mod command_spec;
pub mod device;
pub mod group;
pub mod registry;
