//! Environment-driven configuration.

pub mod cache;
pub mod db;
