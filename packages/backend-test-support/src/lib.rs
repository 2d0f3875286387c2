//! Shared helpers for the backend's test suites: logging init, problem
//! details assertions and unique test data.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
