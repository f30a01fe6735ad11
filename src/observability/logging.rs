//! Structured logging.
//!
//! # Responsibilities
//! - Install a `tracing` subscriber for binaries, demos and tests
//!
//! # Design Decisions
//! - The library only emits events; installing a subscriber is opt-in
//! - Log level comes from `RUST_LOG`, defaulting to `confstar=info`

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "confstar=info";

/// Install the global subscriber.
///
/// Fails if one is already installed.
pub fn init_logging() -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_fails_when_subscriber_installed() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        assert!(init_logging().is_err());
    }
}
