use super::defaults;
use super::models::{LogLevel, NarratorConfig, PlatformOverride};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    speech: SpeechConfig,
    #[serde(default)]
    highlight: HighlightConfig,
    #[serde(default)]
    platform: PlatformConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

impl From<ConfigTables> for NarratorConfig {
    fn from(tables: ConfigTables) -> Self {
        NarratorConfig {
            word_duration_ms: tables.highlight.word_duration_ms,
            boundary_grace_ms: tables.highlight.boundary_grace_ms,
            tts_rate: tables.speech.rate,
            tts_pitch: tables.speech.pitch,
            tts_volume: tables.speech.volume,
            auto_scroll: tables.highlight.auto_scroll,
            center_spoken_word: tables.highlight.center_spoken_word,
            highlight_class: tables.highlight.class,
            platform: tables.platform.class,
            log_level: tables.logging.log_level,
        }
    }
}

impl From<&NarratorConfig> for ConfigTables {
    fn from(config: &NarratorConfig) -> Self {
        ConfigTables {
            speech: SpeechConfig {
                rate: config.tts_rate,
                pitch: config.tts_pitch,
                volume: config.tts_volume,
            },
            highlight: HighlightConfig {
                word_duration_ms: config.word_duration_ms,
                boundary_grace_ms: config.boundary_grace_ms,
                auto_scroll: config.auto_scroll,
                center_spoken_word: config.center_spoken_word,
                class: config.highlight_class.clone(),
            },
            platform: PlatformConfig {
                class: config.platform,
            },
            logging: LoggingConfig {
                log_level: config.log_level,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct SpeechConfig {
    #[serde(default = "defaults::default_tts_rate")]
    rate: f32,
    #[serde(default = "defaults::default_tts_pitch")]
    pitch: f32,
    #[serde(default = "defaults::default_tts_volume")]
    volume: f32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        SpeechConfig {
            rate: defaults::default_tts_rate(),
            pitch: defaults::default_tts_pitch(),
            volume: defaults::default_tts_volume(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct HighlightConfig {
    #[serde(default = "defaults::default_word_duration_ms")]
    word_duration_ms: u64,
    #[serde(default = "defaults::default_boundary_grace_ms")]
    boundary_grace_ms: u64,
    #[serde(default = "defaults::default_auto_scroll")]
    auto_scroll: bool,
    #[serde(default = "defaults::default_center_spoken_word")]
    center_spoken_word: bool,
    #[serde(default = "defaults::default_highlight_class")]
    class: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        HighlightConfig {
            word_duration_ms: defaults::default_word_duration_ms(),
            boundary_grace_ms: defaults::default_boundary_grace_ms(),
            auto_scroll: defaults::default_auto_scroll(),
            center_spoken_word: defaults::default_center_spoken_word(),
            class: defaults::default_highlight_class(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
struct PlatformConfig {
    #[serde(default)]
    class: PlatformOverride,
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}
