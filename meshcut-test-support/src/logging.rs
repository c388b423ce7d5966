//! Test logging initialisation.
//!
//! Tests call [`init_test_logging`] to see library spans and events while
//! debugging. Output goes through the test harness writer so it is captured
//! per test unless `--nocapture` is passed.

use std::sync::OnceLock;

use tracing_subscriber::{
    EnvFilter, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Environment variable holding the `EnvFilter` directive for tests.
pub const LOG_FILTER_ENV_KEY: &str = "MESHCUT_LOG";

static INITIALISED: OnceLock<()> = OnceLock::new();

/// Installs a global fmt subscriber filtered by `MESHCUT_LOG` (default
/// `warn`). Safe to call from every test; only the first call has an effect
/// and a subscriber installed elsewhere is left in place.
///
/// # Examples
/// ```
/// meshcut_test_support::logging::init_test_logging();
/// meshcut_test_support::logging::init_test_logging();
/// ```
pub fn init_test_logging() {
    INITIALISED.get_or_init(|| {
        let filter =
            EnvFilter::try_from_env(LOG_FILTER_ENV_KEY).unwrap_or_else(|_| EnvFilter::new("warn"));
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_span_events(FmtSpan::CLOSE)
            .with_test_writer();
        // Another harness may already own the global slot; keep it.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init();
    });
}
