use crate::config::MIN_TTS_RATE;
use crate::highlight::HighlightMode;
use crate::platform::PlatformClass;
use crate::speech::{UtteranceId, VoiceSettings};
use crate::surface::SourceRef;
use crate::text_utils::split_words;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use ts_rs::TS;

/// Opaque identifier of an episode (one modal, one set of controls).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EpisodeId(pub String);

impl From<&str> for EpisodeId {
    fn from(id: &str) -> Self {
        EpisodeId(id.to_string())
    }
}

impl std::fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generation number of a session; timers carry it so ticks armed for a
/// replaced session are recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "s{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PlaybackState {
    #[default]
    Idle,
    Speaking,
    Paused,
    Ended,
}

#[derive(Debug, Clone)]
pub struct PlaybackSession {
    pub(crate) id: SessionId,
    pub(crate) episode: EpisodeId,
    pub(crate) source: SourceRef,
    pub(crate) source_text: String,
    pub(crate) words: Vec<String>,
    pub(crate) word_cursor: usize,
    pub(crate) state: PlaybackState,
    pub(crate) mode: HighlightMode,
    pub(crate) boundary_fired: bool,
    pub(crate) voice: VoiceSettings,
    pub(crate) utterance: Option<UtteranceId>,
    pub(crate) word_timer_running: bool,
}

impl PlaybackSession {
    pub(crate) fn new(
        id: SessionId,
        episode: EpisodeId,
        source: SourceRef,
        source_text: String,
        mode: HighlightMode,
        voice: VoiceSettings,
    ) -> Self {
        let words = split_words(&source_text);
        Self {
            id,
            episode,
            source,
            source_text,
            words,
            word_cursor: 0,
            state: PlaybackState::Idle,
            mode,
            boundary_fired: false,
            voice,
            utterance: None,
            word_timer_running: false,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, PlaybackState::Speaking | PlaybackState::Paused)
    }

    pub fn rate_factor(&self) -> f32 {
        self.voice.rate.max(MIN_TTS_RATE)
    }

    /// Interval of the fallback word timer at this session's rate.
    pub fn word_duration(&self, base: Duration) -> Duration {
        let millis = (base.as_millis() as f64 / f64::from(self.rate_factor())).round() as u64;
        Duration::from_millis(millis.max(1))
    }

    pub fn words_remaining(&self) -> usize {
        self.words.len().saturating_sub(self.word_cursor)
    }

    /// Step the fallback cursor; returns the index that should be marked.
    pub(crate) fn advance_cursor(&mut self) -> Option<usize> {
        if self.word_cursor >= self.words.len() {
            return None;
        }
        let idx = self.word_cursor;
        self.word_cursor += 1;
        Some(idx)
    }

    pub fn snapshot(&self, platform: PlatformClass) -> SessionSnapshot {
        SessionSnapshot {
            episode: self.episode.clone(),
            state: self.state,
            mode: self.mode,
            platform,
            word_cursor: self.word_cursor,
            word_count: self.words.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct SessionSnapshot {
    pub episode: EpisodeId,
    pub state: PlaybackState,
    pub mode: HighlightMode,
    pub platform: PlatformClass,
    pub word_cursor: usize,
    pub word_count: usize,
}
