// ==========================================
// Logging initialisation
// ==========================================
// Uses tracing and tracing-subscriber.
// Log level is configured through the environment.
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// Initialise the logging system.
///
/// # Environment
/// - RUST_LOG: level filter (default: info),
///   e.g. RUST_LOG=debug or RUST_LOG=survey_calendar=trace
///
/// # Example
/// ```no_run
/// use survey_calendar::logging;
/// logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}

/// Initialise logging for tests.
///
/// Verbose by default and safe to call from multiple tests.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
