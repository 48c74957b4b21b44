//! Test logging bootstrap.
//!
//! Level comes from `TEST_LOG`, then `RUST_LOG`, then `warn`. Output goes
//! through the test writer so the harness captures it per test.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

fn filter_from_env() -> EnvFilter {
    std::env::var("TEST_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the test subscriber once. Safe to call from every test binary
/// and from `#[ctor]` hooks.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let _ = fmt()
            .with_env_filter(filter_from_env())
            .with_test_writer()
            .without_time()
            .with_target(false)
            .try_init();
    });
}
