//! Logging setup on `tracing` and `tracing-subscriber`.
//!
//! The level filter is read from `RUST_LOG`.

use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber.
///
/// # Environment
/// - `RUST_LOG`: level filter (default `info`), e.g. `RUST_LOG=debug` or
///   `RUST_LOG=icu_roster=trace`
///
/// Output goes to stderr so stdout stays free for results.
///
/// # Example
/// ```no_run
/// use icu_roster::logging;
/// logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}

/// Installs a debug-level subscriber for tests.
///
/// Safe to call from every test; only the first call installs it.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
