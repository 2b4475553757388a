//! Backend test support utilities
//!
//! Shared by the backend's unit tests and integration test binaries: logging
//! bootstrap, Problem Details assertions and unique name generation.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
