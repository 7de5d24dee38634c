//! Tracing Bootstrap for Tests
//!
//! Installs a tracing subscriber once per test binary so client and
//! adapter logs show up in test output. Filtering honors `RUST_LOG`,
//! defaulting to `info`.

use once_cell::sync::Lazy;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static TRACING: Lazy<()> = Lazy::new(|| {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_test_writer(),
        )
        .try_init();
});

/// Initializes tracing for the current test binary.
///
/// Safe to call from every test; only the first call installs the
/// subscriber.
pub fn init_tracing() {
    Lazy::force(&TRACING);
}
