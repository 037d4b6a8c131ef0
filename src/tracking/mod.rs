//! Task status lifecycle tracking.
//!
//! This module implements the status tracking engine: a role-gated state
//! machine over task statuses, an append-only audit history with
//! time-in-status bookkeeping, and read-only projections (history,
//! statistics, progress, recent changes). The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
