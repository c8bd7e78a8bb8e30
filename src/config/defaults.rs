pub(crate) fn default_word_duration_ms() -> u64 {
    400
}

pub(crate) fn default_boundary_grace_ms() -> u64 {
    250
}

pub(crate) fn default_tts_rate() -> f32 {
    1.0
}

pub(crate) fn default_tts_pitch() -> f32 {
    1.0
}

pub(crate) fn default_tts_volume() -> f32 {
    1.0
}

pub(crate) fn default_auto_scroll() -> bool {
    true
}

pub(crate) fn default_center_spoken_word() -> bool {
    true
}

pub(crate) fn default_highlight_class() -> String {
    "highlight".to_string()
}

pub(crate) fn default_log_level() -> crate::config::LogLevel {
    crate::config::LogLevel::Info
}
