//! Incubator firmware library.
//!
//! Exposes the pure-logic modules for integration testing and host-side
//! simulation.  ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod clock;
pub mod config;
pub mod control;
pub mod error;
pub mod remote;
pub mod scheduler;
pub mod timers;

pub mod adapters;
pub mod drivers;
pub mod sensors;
