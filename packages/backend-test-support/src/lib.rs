//! Shared helpers for the backend's unit and integration tests: a one-time
//! logging bootstrap, Problem Details assertions and unique test names.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;

pub use problem_details::{assert_problem_details, ProblemDetailsLike};
pub use unique_helpers::unique_str;
