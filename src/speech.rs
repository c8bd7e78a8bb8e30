//! The platform speech output channel.
//!
//! There is exactly one channel per page. Whatever the host binds here (the
//! browser's speech synthesis, a native engine) is driven only by the runtime;
//! callbacks come back as [`SpeechEvent`]s tagged with the utterance they
//! belong to.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Identifies one request to speak a block of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UtteranceId(pub u64);

impl std::fmt::Display for UtteranceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "u{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VoiceSettings {
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub voice: VoiceSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum BoundaryKind {
    Word,
    Sentence,
}

/// Callbacks from the speech engine.
///
/// `char_index` is a UTF-16 code unit offset into the utterance text, which is
/// what web speech engines report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum SpeechEvent {
    Started {
        utterance: UtteranceId,
    },
    Boundary {
        utterance: UtteranceId,
        kind: BoundaryKind,
        char_index: usize,
    },
    Paused {
        utterance: UtteranceId,
    },
    Resumed {
        utterance: UtteranceId,
    },
    Ended {
        utterance: UtteranceId,
    },
    Failed {
        utterance: UtteranceId,
        reason: String,
    },
}

impl SpeechEvent {
    pub fn utterance(&self) -> UtteranceId {
        match self {
            SpeechEvent::Started { utterance }
            | SpeechEvent::Boundary { utterance, .. }
            | SpeechEvent::Paused { utterance }
            | SpeechEvent::Resumed { utterance }
            | SpeechEvent::Ended { utterance }
            | SpeechEvent::Failed { utterance, .. } => *utterance,
        }
    }
}

/// Speech output the runtime drives. Cancelling is global: it silences
/// whatever is playing, whichever episode started it.
pub trait SpeechChannel {
    fn speak(&mut self, id: UtteranceId, utterance: &Utterance);
    fn cancel(&mut self);
    fn pause(&mut self);
    fn resume(&mut self);
}
