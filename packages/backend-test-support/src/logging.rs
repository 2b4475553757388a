//! Test logging bootstrap.
//!
//! Idempotent and race-safe; call it from a `ctor` or at the top of a test.
//! Filter precedence: `TEST_LOG`, then `RUST_LOG`, then `warn`.
//!
//! ```bash
//! TEST_LOG=info cargo test -p scaffold-backend --test store_tests
//! ```

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // captured by the test harness
            .without_time()
            .try_init()
            .ok(); // something else may own the global subscriber
    });
}
