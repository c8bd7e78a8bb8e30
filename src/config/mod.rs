//! Configuration loading for the narrator.
//!
//! All user-tunable settings are centralized here and loaded from a sectioned
//! TOML file when the host provides one. Any missing or invalid entries fall
//! back to defaults so playback still works.

mod defaults;
mod io;
mod models;
mod tables;

pub use io::{load_config, parse_config, serialize_config};
pub use models::{LogLevel, NarratorConfig, PlatformOverride};
pub(crate) use models::MIN_TTS_RATE;
