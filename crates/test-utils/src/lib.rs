//! Shared helpers for the `speech-installer` integration tests.

pub mod builders;
pub mod fake_runner;

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Route installer logs into the test harness's captured output.
///
/// Safe to call from every test; only the first call installs the
/// subscriber. The level comes from `RUST_LOG` and falls back to `info`,
/// so `RUST_LOG=speech_installer=debug,transcript=info` narrows a noisy run.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Fail the test if `f` has not finished within ten seconds.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(std::time::Duration::from_secs(10), f)
        .await
        .expect("test did not finish within 10 seconds")
}
