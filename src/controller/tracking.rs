use super::{Effect, SpeechController};
use crate::highlight::{HighlightMode, HighlightedText};
use crate::session::{PlaybackState, SessionId};
use crate::speech::{BoundaryKind, SpeechEvent};
use crate::surface::ControlVisibility;
use tracing::{debug, info, trace, warn};

impl SpeechController {
    pub(super) fn handle_speech_event(&mut self, event: SpeechEvent, effects: &mut Vec<Effect>) {
        let utterance = event.utterance();
        let handheld = self.platform.is_handheld();
        let scroll = self.config.scroll_options();
        let Some(session) = self.active_session_by_utterance(utterance) else {
            debug!(%utterance, ?event, "Ignoring speech event for stale utterance");
            return;
        };

        match event {
            SpeechEvent::Started { .. } => {
                debug!(episode = %session.episode, %utterance, "Speech output started");
            }
            SpeechEvent::Boundary {
                kind: BoundaryKind::Sentence,
                ..
            } => {
                trace!(%utterance, "Ignoring sentence boundary");
            }
            SpeechEvent::Boundary {
                kind: BoundaryKind::Word,
                char_index,
                ..
            } => {
                if session.mode != HighlightMode::NativeBoundary {
                    trace!(%utterance, char_index, "Word boundary after timer fallback; ignored");
                    return;
                }
                if !session.boundary_fired {
                    debug!(episode = %session.episode, "Native word boundaries confirmed");
                }
                session.boundary_fired = true;
                let Some(marked) = HighlightedText::at_offset(&session.source_text, char_index)
                else {
                    debug!(char_index, "Boundary offset does not start a word");
                    return;
                };
                effects.push(Effect::Render {
                    source: session.source.clone(),
                    text: marked,
                });
                if let Some(options) = scroll {
                    effects.push(Effect::ScrollToMarker {
                        source: session.source.clone(),
                        options,
                    });
                }
            }
            SpeechEvent::Paused { .. } => {
                if session.state == PlaybackState::Speaking && !handheld {
                    session.state = PlaybackState::Paused;
                    effects.push(Effect::SetControls {
                        episode: session.episode.clone(),
                        controls: ControlVisibility::PAUSED,
                    });
                    info!(episode = %session.episode, "Speech paused by the platform");
                }
            }
            SpeechEvent::Resumed { .. } => {
                if session.state == PlaybackState::Paused && !handheld {
                    session.state = PlaybackState::Speaking;
                    effects.push(Effect::SetControls {
                        episode: session.episode.clone(),
                        controls: ControlVisibility::SPEAKING,
                    });
                    info!(episode = %session.episode, "Speech resumed by the platform");
                }
            }
            SpeechEvent::Ended { .. } => {
                self.end_active_session(effects, "speech finished");
            }
            SpeechEvent::Failed { reason, .. } => {
                warn!(episode = %session.episode, %utterance, %reason, "Speech output failed");
                self.end_active_session(effects, "speech failed");
            }
        }
    }

    pub(super) fn handle_grace_elapsed(&mut self, id: SessionId, effects: &mut Vec<Effect>) {
        let base_word_duration = self.config.base_word_duration();
        let Some(session) = self.active_session_by_id(id) else {
            debug!(session = %id, "Grace window elapsed for a finished session");
            return;
        };
        if session.mode != HighlightMode::NativeBoundary || session.boundary_fired {
            return;
        }

        session.mode = HighlightMode::FallbackTimer;
        session.word_timer_running = true;
        let period = session.word_duration(base_word_duration);
        effects.push(Effect::ArmWordTimer {
            session: id,
            period,
        });
        info!(
            episode = %session.episode,
            period_ms = period.as_millis() as u64,
            "No word boundary within grace window; highlighting on a timer"
        );
    }

    pub(super) fn handle_word_tick(&mut self, id: SessionId, effects: &mut Vec<Effect>) {
        let scroll = self.config.scroll_options();
        let Some(session) = self.active_session_by_id(id) else {
            debug!(session = %id, "Dropping word tick for a finished session");
            effects.push(Effect::DisarmTimers { session: id });
            return;
        };
        if session.mode != HighlightMode::FallbackTimer || !session.word_timer_running {
            return;
        }
        if session.state == PlaybackState::Paused {
            trace!(episode = %session.episode, "Paused; tick skipped");
            return;
        }

        if let Some(idx) = session.advance_cursor() {
            if let Some(marked) = HighlightedText::at_word(&session.words, idx) {
                effects.push(Effect::Render {
                    source: session.source.clone(),
                    text: marked,
                });
                if let Some(options) = scroll {
                    effects.push(Effect::ScrollToMarker {
                        source: session.source.clone(),
                        options,
                    });
                }
            }
            trace!(episode = %session.episode, idx, "Highlighted word");
        }

        if session.words_remaining() == 0 {
            session.word_timer_running = false;
            effects.push(Effect::DisarmWordTimer { session: id });
            debug!(
                episode = %session.episode,
                word_count = session.words.len(),
                "Every word highlighted; waiting for speech to finish"
            );
        }
    }
}
