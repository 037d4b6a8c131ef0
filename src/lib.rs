//! Tasktrack: task status lifecycle engine.
//!
//! This crate tracks a unit of work ("task") through a fixed set of lifecycle
//! statuses, enforcing who may trigger each transition, recording an
//! append-only audit history of every change, and deriving time-in-status
//! metrics from that history.
//!
//! # Architecture
//!
//! Tasktrack follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`tracking`]: Status state machine, audit history, and projections

pub mod tracking;
