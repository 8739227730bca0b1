//! # smarthome-app
//!
//! Application layer — the execution core and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement:
//!   - `AuditSink`: fire-and-forget structured audit records
//! - Provide the **logical-time scheduler** (deferred work, cancellation)
//! - Provide the **reversible command** framework and every concrete command
//! - Provide the **automation rules** (security, energy saving)
//! - Provide the **controller** that owns the pending queue, the undo history,
//!   the scheduler and the rules, and drives the tick/evaluate/execute cycle
//!
//! ## Dependency rule
//! Depends on `smarthome-domain` only (plus `tracing`).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.
//!
//! ## Concurrency
//! Everything here is single-threaded and synchronous. [`controller::Controller`]
//! is `Send`, so a multi-threaded host wraps the whole controller in one mutex
//! held for the duration of each tick/execute/undo call.

pub mod automation;
pub mod command;
pub mod controller;
pub mod ports;
pub mod scheduler;

#[cfg(test)]
mod testing;
