//! Adapter implementations of the tracking ports.

pub mod memory;
pub mod postgres;
