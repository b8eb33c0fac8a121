//! Tracing initialization.
//!
//! The library only emits `tracing` events; installing a subscriber is left to
//! the host process. These helpers cover binaries and tests that just want
//! sensible console output.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install a compact stderr subscriber filtered by `RUST_LOG` (default
/// `info`). Safe to call multiple times.
pub fn init() {
    INIT.call_once(|| {
        if let Err(e) = tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_ansi(false)
            .with_target(true)
            .with_writer(std::io::stderr)
            .compact()
            .try_init()
        {
            eprintln!("Failed to initialize tracing: {e}");
        }
    });
}

/// Like [`init`] but writes through the test harness so output is captured
/// per test.
pub fn init_for_tests() {
    INIT.call_once(|| {
        // Another test harness may already have installed a global subscriber.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_test_writer()
            .compact()
            .try_init();
    });
}
