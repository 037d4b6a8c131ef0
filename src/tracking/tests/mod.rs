//! Unit tests for the status tracking engine.

mod support;
