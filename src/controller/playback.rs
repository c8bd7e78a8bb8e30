use super::{Effect, SpeechController};
use crate::error::PlaybackError;
use crate::highlight::HighlightMode;
use crate::session::{EpisodeId, PlaybackSession, PlaybackState};
use crate::surface::{ControlVisibility, SourceRef};
use crate::text_utils::remaining_text;
use tracing::{debug, info};

impl SpeechController {
    pub(super) fn handle_start(
        &mut self,
        episode: EpisodeId,
        source: SourceRef,
        text: String,
        effects: &mut Vec<Effect>,
    ) -> Result<(), PlaybackError> {
        if text.trim().is_empty() {
            return Err(PlaybackError::EmptySourceText { episode });
        }

        self.end_active_session(effects, "replaced by a new session");
        effects.push(Effect::CancelSpeech);

        let mode = if self.platform.is_handheld() {
            HighlightMode::FallbackTimer
        } else {
            HighlightMode::NativeBoundary
        };
        let id = self.counters.next_session();
        let utterance = self.counters.next_utterance();
        let mut session = PlaybackSession::new(
            id,
            episode.clone(),
            source,
            text,
            mode,
            self.config.voice(),
        );
        session.state = PlaybackState::Speaking;
        session.utterance = Some(utterance);

        effects.push(Effect::Speak {
            utterance,
            text: session.source_text.clone(),
            voice: session.voice,
        });
        effects.push(Effect::SetControls {
            episode: episode.clone(),
            controls: ControlVisibility::SPEAKING,
        });
        match mode {
            HighlightMode::FallbackTimer => {
                session.word_timer_running = true;
                effects.push(Effect::ArmWordTimer {
                    session: id,
                    period: session.word_duration(self.config.base_word_duration()),
                });
            }
            HighlightMode::NativeBoundary => effects.push(Effect::ArmGraceTimer {
                session: id,
                delay: self.config.boundary_grace(),
            }),
        }

        info!(
            episode = %episode,
            session = %id,
            %utterance,
            %mode,
            platform = %self.platform,
            word_count = session.words.len(),
            "Started playback"
        );
        self.sessions.insert(episode, session);
        Ok(())
    }

    pub(super) fn handle_pause(&mut self, episode: &EpisodeId, effects: &mut Vec<Effect>) {
        let handheld = self.platform.is_handheld();
        let Some(session) = self.sessions.get_mut(episode) else {
            debug!(episode = %episode, "Pause ignored; no session");
            return;
        };
        if session.state != PlaybackState::Speaking {
            debug!(episode = %episode, state = ?session.state, "Pause ignored; not speaking");
            return;
        }

        if handheld {
            // Engine-level pause is unreliable here: stop outright and
            // resume later from the word cursor.
            effects.push(Effect::CancelSpeech);
            effects.push(Effect::DisarmTimers {
                session: session.id,
            });
            session.utterance = None;
            session.word_timer_running = false;
        } else {
            effects.push(Effect::PauseSpeech);
        }
        session.state = PlaybackState::Paused;
        effects.push(Effect::SetControls {
            episode: episode.clone(),
            controls: ControlVisibility::PAUSED,
        });
        info!(
            episode = %episode,
            cursor = session.word_cursor,
            handheld,
            "Paused playback"
        );
    }

    pub(super) fn handle_resume(
        &mut self,
        episode: &EpisodeId,
        effects: &mut Vec<Effect>,
    ) -> Result<(), PlaybackError> {
        let handheld = self.platform.is_handheld();
        let base_word_duration = self.config.base_word_duration();
        let Some(session) = self.sessions.get_mut(episode) else {
            debug!(episode = %episode, "Resume ignored; no session");
            return Ok(());
        };
        if session.state != PlaybackState::Paused {
            debug!(episode = %episode, state = ?session.state, "Resume ignored; not paused");
            return Ok(());
        }

        if handheld {
            let remaining = remaining_text(&session.words, session.word_cursor);
            if remaining.is_empty() {
                return Err(PlaybackError::NoResumableContent {
                    episode: episode.clone(),
                    cursor: session.word_cursor,
                    word_count: session.words.len(),
                });
            }
            let utterance = self.counters.next_utterance();
            session.utterance = Some(utterance);
            session.word_timer_running = true;
            effects.push(Effect::Speak {
                utterance,
                text: remaining,
                voice: session.voice,
            });
            // The cursor stays absolute, so the next tick marks the word that
            // was due when playback paused.
            effects.push(Effect::ArmWordTimer {
                session: session.id,
                period: session.word_duration(base_word_duration),
            });
        } else {
            effects.push(Effect::ResumeSpeech);
        }
        session.state = PlaybackState::Speaking;
        effects.push(Effect::SetControls {
            episode: episode.clone(),
            controls: ControlVisibility::SPEAKING,
        });
        info!(
            episode = %episode,
            cursor = session.word_cursor,
            remaining = session.words_remaining(),
            handheld,
            "Resumed playback"
        );
        Ok(())
    }

    pub(super) fn handle_stop(&mut self, episode: &EpisodeId, effects: &mut Vec<Effect>) {
        effects.push(Effect::CancelSpeech);
        let ended = self.end_active_session(effects, "stopped");
        if ended.as_ref() != Some(episode) {
            effects.push(Effect::SetControls {
                episode: episode.clone(),
                controls: ControlVisibility::IDLE,
            });
        }
        debug!(episode = %episode, "Stop handled");
    }

    pub(super) fn handle_toggle_pause(
        &mut self,
        episode: &EpisodeId,
        effects: &mut Vec<Effect>,
    ) -> Result<(), PlaybackError> {
        match self.sessions.get(episode).map(|session| session.state) {
            Some(PlaybackState::Speaking) => {
                self.handle_pause(episode, effects);
                Ok(())
            }
            Some(PlaybackState::Paused) => self.handle_resume(episode, effects),
            _ => {
                debug!(episode = %episode, "Toggle ignored; nothing playing");
                Ok(())
            }
        }
    }

    /// Tear down whichever session is speaking or paused: timers released,
    /// container restored, controls reset, session discarded.
    pub(super) fn end_active_session(
        &mut self,
        effects: &mut Vec<Effect>,
        reason: &str,
    ) -> Option<EpisodeId> {
        let episode = self.active_episode()?.clone();
        let mut session = self.sessions.remove(&episode)?;
        session.state = PlaybackState::Ended;

        effects.push(Effect::DisarmTimers {
            session: session.id,
        });
        effects.push(Effect::Restore {
            source: session.source,
            text: session.source_text,
        });
        effects.push(Effect::SetControls {
            episode: episode.clone(),
            controls: ControlVisibility::IDLE,
        });
        info!(
            episode = %episode,
            session = %session.id,
            cursor = session.word_cursor,
            reason,
            "Playback session ended"
        );
        Some(episode)
    }
}
