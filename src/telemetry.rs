// SPDX-License-Identifier: PMPL-1.0-or-later

//! Tracing subscriber setup for the CLI.
//!
//! The library only emits events; installing a subscriber is left to the
//! binary (or to whatever application embeds the crate).

use once_cell::sync::OnceCell;
use std::io::{self, IsTerminal};
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::EnvFilter;

static TELEMETRY_GUARD: OnceCell<()> = OnceCell::new();

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log filter: {0}")]
    Filter(String),
    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(SetGlobalDefaultError),
}

/// Installs a stderr `fmt` subscriber once; later calls are no-ops.
///
/// `RUST_LOG` wins over `filter` when set.
pub fn initialise(filter: &str) -> Result<(), TelemetryError> {
    TELEMETRY_GUARD
        .get_or_try_init(|| install_subscriber(filter))
        .map(|_| ())
}

fn build_filter(env: Option<String>, fallback: &str) -> Result<EnvFilter, TelemetryError> {
    match env {
        Some(directive) if !directive.trim().is_empty() => EnvFilter::try_new(directive),
        _ => EnvFilter::try_new(fallback),
    }
    .map_err(|err| TelemetryError::Filter(err.to_string()))
}

fn install_subscriber(filter: &str) -> Result<(), TelemetryError> {
    let filter = build_filter(std::env::var("RUST_LOG").ok(), filter)?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .finish();

    tracing::subscriber::set_global_default(subscriber).map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_filter() {
        assert!(matches!(
            build_filter(None, "mies_i18n=notalevel"),
            Err(TelemetryError::Filter(_))
        ));
    }

    #[test]
    fn environment_directive_wins() {
        assert!(build_filter(Some("debug".to_string()), "mies_i18n=notalevel").is_ok());
        assert!(build_filter(Some("  ".to_string()), "info").is_ok());
    }
}
