//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

use crate::config::DatabaseConfig;

const FALLBACK_LEVEL: &str = "info";

/// Builds the filter for `directives`, falling back to `info` when they
/// don't parse.
pub fn env_filter(directives: &str) -> EnvFilter {
    EnvFilter::try_new(directives).unwrap_or_else(|err| {
        eprintln!("invalid log directives {directives:?} ({err}), using {FALLBACK_LEVEL}");
        EnvFilter::new(FALLBACK_LEVEL)
    })
}

/// Installs the global tracing subscriber filtered by `config.log_level`.
///
/// With `json` set, events are written as JSON lines instead of the
/// human-readable format. Fails if a global subscriber is already installed.
pub fn init_tracing(config: &DatabaseConfig, json: bool) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter(&config.log_level))
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .try_init()
}
