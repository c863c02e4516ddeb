//! Integration test utilities for the scheduler API
//!
//! Spawns a real server on a local port and drives it over HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
