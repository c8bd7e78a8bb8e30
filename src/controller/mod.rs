//! Speech playback controller.
//!
//! A pure reducer: every user action, speech callback and timer tick arrives
//! as a [`Message`], mutates the session map, and yields the [`Effect`]s the
//! runtime must carry out against the speech channel, the page, and the timer
//! queue. Handlers never overlap, so no locking is involved.

mod playback;
mod tracking;

use crate::config::NarratorConfig;
use crate::error::PlaybackError;
use crate::highlight::HighlightedText;
use crate::platform::PlatformClass;
use crate::session::{EpisodeId, PlaybackSession, SessionId, SessionSnapshot};
use crate::speech::{SpeechEvent, UtteranceId, VoiceSettings};
use crate::surface::{ControlVisibility, ScrollOptions, SourceRef};
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Start {
        episode: EpisodeId,
        source: SourceRef,
        text: String,
    },
    Pause(EpisodeId),
    Resume(EpisodeId),
    Stop(EpisodeId),
    TogglePause(EpisodeId),
    Speech(SpeechEvent),
    GraceElapsed(SessionId),
    WordTick(SessionId),
}

/// Describes work that must be performed outside the pure reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    CancelSpeech,
    Speak {
        utterance: UtteranceId,
        text: String,
        voice: VoiceSettings,
    },
    PauseSpeech,
    ResumeSpeech,
    Render {
        source: SourceRef,
        text: HighlightedText,
    },
    Restore {
        source: SourceRef,
        text: String,
    },
    ScrollToMarker {
        source: SourceRef,
        options: ScrollOptions,
    },
    SetControls {
        episode: EpisodeId,
        controls: ControlVisibility,
    },
    ArmGraceTimer {
        session: SessionId,
        delay: Duration,
    },
    ArmWordTimer {
        session: SessionId,
        period: Duration,
    },
    DisarmWordTimer {
        session: SessionId,
    },
    DisarmTimers {
        session: SessionId,
    },
}

#[derive(Debug, Default)]
struct Counters {
    session: u64,
    utterance: u64,
}

impl Counters {
    fn next_session(&mut self) -> SessionId {
        self.session = self.session.wrapping_add(1);
        SessionId(self.session)
    }

    fn next_utterance(&mut self) -> UtteranceId {
        self.utterance = self.utterance.wrapping_add(1);
        UtteranceId(self.utterance)
    }
}

pub struct SpeechController {
    config: NarratorConfig,
    platform: PlatformClass,
    sessions: HashMap<EpisodeId, PlaybackSession>,
    counters: Counters,
}

impl SpeechController {
    pub fn new(config: NarratorConfig, platform: PlatformClass) -> Self {
        Self {
            config: config.clamped(),
            platform,
            sessions: HashMap::new(),
            counters: Counters::default(),
        }
    }

    pub fn config(&self) -> &NarratorConfig {
        &self.config
    }

    pub fn platform(&self) -> PlatformClass {
        self.platform
    }

    pub fn reduce(&mut self, message: Message) -> Result<Vec<Effect>, PlaybackError> {
        let mut effects = Vec::new();

        match message {
            Message::Start {
                episode,
                source,
                text,
            } => self.handle_start(episode, source, text, &mut effects)?,
            Message::Pause(episode) => self.handle_pause(&episode, &mut effects),
            Message::Resume(episode) => self.handle_resume(&episode, &mut effects)?,
            Message::Stop(episode) => self.handle_stop(&episode, &mut effects),
            Message::TogglePause(episode) => self.handle_toggle_pause(&episode, &mut effects)?,
            Message::Speech(event) => self.handle_speech_event(event, &mut effects),
            Message::GraceElapsed(session) => self.handle_grace_elapsed(session, &mut effects),
            Message::WordTick(session) => self.handle_word_tick(session, &mut effects),
        }

        Ok(effects)
    }

    pub fn snapshot(&self, episode: &EpisodeId) -> Option<SessionSnapshot> {
        self.sessions
            .get(episode)
            .map(|session| session.snapshot(self.platform))
    }

    /// Episode owning the session that is speaking or paused, if any.
    pub fn active_episode(&self) -> Option<&EpisodeId> {
        self.sessions
            .values()
            .find(|session| session.is_active())
            .map(|session| &session.episode)
    }

    fn active_session_by_id(&mut self, id: SessionId) -> Option<&mut PlaybackSession> {
        self.sessions
            .values_mut()
            .find(|session| session.id == id && session.is_active())
    }

    fn active_session_by_utterance(
        &mut self,
        utterance: UtteranceId,
    ) -> Option<&mut PlaybackSession> {
        self.sessions
            .values_mut()
            .find(|session| session.utterance == Some(utterance) && session.is_active())
    }
}

#[cfg(test)]
mod tests;
