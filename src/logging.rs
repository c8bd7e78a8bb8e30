//! Tracing setup for hosts embedding the narrator.
//!
//! The filter sits behind a reload layer so the level from
//! [`NarratorConfig::log_level`](crate::config::NarratorConfig) can be applied
//! once the config has been read.

use crate::config::LogLevel;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

pub type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

/// Install the global subscriber. Returns `None` when one is already set.
pub fn init_tracing() -> Option<ReloadHandle> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    let installed = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .try_init();
    if let Err(err) = installed {
        warn!("Tracing subscriber already installed: {err}");
        return None;
    }
    info!("Logging initialized; override level with config.log_level or RUST_LOG");
    Some(handle)
}

pub fn set_log_level(handle: &ReloadHandle, level: LogLevel) {
    let level = level.as_filter_str();
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(err) = handle.modify(|filter| *filter = parsed) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}
