#![allow(dead_code)]

// tests/common/mod.rs

// Logging is installed once per test binary; TEST_LOG raises the level.
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}
