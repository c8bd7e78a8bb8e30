use crate::speech::VoiceSettings;
use crate::surface::{ScrollBlock, ScrollOptions};
use serde::Deserialize;
use std::time::Duration;

/// Limits for speech controls.
pub(crate) const MIN_TTS_RATE: f32 = 0.1;
pub(crate) const MAX_TTS_RATE: f32 = 10.0;
const MIN_TTS_PITCH: f32 = 0.0;
const MAX_TTS_PITCH: f32 = 2.0;
const MIN_TTS_VOLUME: f32 = 0.0;
const MAX_TTS_VOLUME: f32 = 1.0;

/// Narrator configuration; deserializable from TOML.
#[derive(Debug, Clone, PartialEq, Deserialize, serde::Serialize)]
pub struct NarratorConfig {
    #[serde(default = "crate::config::defaults::default_word_duration_ms")]
    pub word_duration_ms: u64,
    #[serde(default = "crate::config::defaults::default_boundary_grace_ms")]
    pub boundary_grace_ms: u64,
    #[serde(default = "crate::config::defaults::default_tts_rate")]
    pub tts_rate: f32,
    #[serde(default = "crate::config::defaults::default_tts_pitch")]
    pub tts_pitch: f32,
    #[serde(default = "crate::config::defaults::default_tts_volume")]
    pub tts_volume: f32,
    #[serde(default = "crate::config::defaults::default_auto_scroll")]
    pub auto_scroll: bool,
    #[serde(default = "crate::config::defaults::default_center_spoken_word")]
    pub center_spoken_word: bool,
    #[serde(default = "crate::config::defaults::default_highlight_class")]
    pub highlight_class: String,
    #[serde(default)]
    pub platform: PlatformOverride,
    #[serde(default = "crate::config::defaults::default_log_level")]
    pub log_level: LogLevel,
}

impl Default for NarratorConfig {
    fn default() -> Self {
        NarratorConfig {
            word_duration_ms: crate::config::defaults::default_word_duration_ms(),
            boundary_grace_ms: crate::config::defaults::default_boundary_grace_ms(),
            tts_rate: crate::config::defaults::default_tts_rate(),
            tts_pitch: crate::config::defaults::default_tts_pitch(),
            tts_volume: crate::config::defaults::default_tts_volume(),
            auto_scroll: crate::config::defaults::default_auto_scroll(),
            center_spoken_word: crate::config::defaults::default_center_spoken_word(),
            highlight_class: crate::config::defaults::default_highlight_class(),
            platform: PlatformOverride::Auto,
            log_level: crate::config::defaults::default_log_level(),
        }
    }
}

impl NarratorConfig {
    /// Clamp numeric settings into the ranges speech engines accept.
    pub fn clamped(mut self) -> Self {
        self.tts_rate = self.tts_rate.clamp(MIN_TTS_RATE, MAX_TTS_RATE);
        self.tts_pitch = self.tts_pitch.clamp(MIN_TTS_PITCH, MAX_TTS_PITCH);
        self.tts_volume = self.tts_volume.clamp(MIN_TTS_VOLUME, MAX_TTS_VOLUME);
        self.word_duration_ms = self.word_duration_ms.max(1);
        self
    }

    pub fn voice(&self) -> VoiceSettings {
        VoiceSettings {
            rate: self.tts_rate,
            pitch: self.tts_pitch,
            volume: self.tts_volume,
        }
    }

    pub fn base_word_duration(&self) -> Duration {
        Duration::from_millis(self.word_duration_ms)
    }

    pub fn boundary_grace(&self) -> Duration {
        Duration::from_millis(self.boundary_grace_ms)
    }

    pub fn scroll_options(&self) -> Option<ScrollOptions> {
        if !self.auto_scroll {
            return None;
        }
        let block = if self.center_spoken_word {
            ScrollBlock::Center
        } else {
            ScrollBlock::Nearest
        };
        Some(ScrollOptions {
            smooth: true,
            block,
        })
    }
}

/// Forces the handheld heuristic one way or the other.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PlatformOverride {
    #[default]
    Auto,
    Desktop,
    Handheld,
}

impl std::fmt::Display for PlatformOverride {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PlatformOverride::Auto => "auto",
            PlatformOverride::Desktop => "desktop",
            PlatformOverride::Handheld => "handheld",
        };
        write!(f, "{}", label)
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
