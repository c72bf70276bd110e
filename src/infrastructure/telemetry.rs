//! # Telemetry
//!
//! Tracing subscriber setup for binaries and tests embedding the client.
//!
//! The library itself only emits `tracing` events; installing a subscriber
//! is left to the application. These helpers install a global `fmt`
//! subscriber filtered by `RUST_LOG` (default `info`).

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Default filter directive when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Installs the global tracing subscriber.
///
/// Returns `false` if a subscriber was already installed, in which case
/// the existing one is kept.
pub fn init_tracing(format: LogFormat) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Pretty => builder.try_init().is_ok(),
        LogFormat::Json => builder.json().try_init().is_ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_harmless() {
        init_tracing(LogFormat::Pretty);
        assert!(!init_tracing(LogFormat::Json));
    }

    #[test]
    fn default_format_is_pretty() {
        assert_eq!(LogFormat::default(), LogFormat::Pretty);
    }
}
