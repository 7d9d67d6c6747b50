//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the lifecycle rules for the LED toggle
//! controller.  All interaction with hardware happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod commands;
pub mod events;
pub mod keys;
pub mod lifecycle;
pub mod ports;
pub mod service;
