//! Step definitions for status transition BDD scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
