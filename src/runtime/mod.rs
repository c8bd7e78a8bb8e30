//! Drives a [`SpeechController`] against a real speech channel and page.
//!
//! The runtime owns the timer queue and turns every [`Effect`] the reducer
//! emits into a call on the speech channel, the surface, or the queue. Hosts
//! forward button presses, speech callbacks, and a periodic [`poll`] here.
//!
//! [`poll`]: NarratorRuntime::poll

mod clock;
#[cfg(test)]
mod fakes;
mod timers;

pub use clock::{Clock, ManualClock, SystemClock};

use crate::config::NarratorConfig;
use crate::controller::{Effect, Message, SpeechController};
use crate::error::PlaybackError;
use crate::platform::PlatformClass;
use crate::session::{EpisodeId, SessionSnapshot};
use crate::speech::{SpeechChannel, SpeechEvent, Utterance};
use crate::surface::{EpisodeSurface, SourceRef};
use std::time::Instant;
use timers::{TimerKind, TimerQueue};
use tracing::{debug, trace, warn};

pub struct NarratorRuntime<S, V, C = SystemClock> {
    controller: SpeechController,
    speech: S,
    surface: V,
    clock: C,
    timers: TimerQueue,
}

impl<S: SpeechChannel, V: EpisodeSurface> NarratorRuntime<S, V, SystemClock> {
    pub fn with_system_clock(
        config: NarratorConfig,
        platform: PlatformClass,
        speech: S,
        surface: V,
    ) -> Self {
        Self::new(config, platform, speech, surface, SystemClock)
    }
}

impl<S: SpeechChannel, V: EpisodeSurface, C: Clock> NarratorRuntime<S, V, C> {
    pub fn new(
        config: NarratorConfig,
        platform: PlatformClass,
        speech: S,
        surface: V,
        clock: C,
    ) -> Self {
        Self {
            controller: SpeechController::new(config, platform),
            speech,
            surface,
            clock,
            timers: TimerQueue::default(),
        }
    }

    /// Read `source` from the page and speak it for `episode`.
    pub fn start(&mut self, source: &SourceRef, episode: &EpisodeId) -> Result<(), PlaybackError> {
        let Some(text) = self.surface.read_text(source) else {
            let err = PlaybackError::MissingSourceElement {
                source_ref: source.clone(),
            };
            warn!(episode = %episode, "{err}");
            return Err(err);
        };
        self.dispatch(Message::Start {
            episode: episode.clone(),
            source: source.clone(),
            text,
        })
    }

    pub fn pause(&mut self, episode: &EpisodeId) {
        let _ = self.dispatch(Message::Pause(episode.clone()));
    }

    pub fn resume(&mut self, episode: &EpisodeId) -> Result<(), PlaybackError> {
        self.dispatch(Message::Resume(episode.clone()))
    }

    pub fn stop(&mut self, episode: &EpisodeId) {
        let _ = self.dispatch(Message::Stop(episode.clone()));
    }

    pub fn toggle_pause(&mut self, episode: &EpisodeId) -> Result<(), PlaybackError> {
        self.dispatch(Message::TogglePause(episode.clone()))
    }

    pub fn speech_event(&mut self, event: SpeechEvent) {
        let _ = self.dispatch(Message::Speech(event));
    }

    /// Fire every timer that is due, earliest first. Returns how many fired.
    pub fn poll(&mut self) -> usize {
        let now = self.clock.now();
        let mut fired = 0;
        while let Some((session, kind)) = self.timers.pop_due(now) {
            fired += 1;
            let message = match kind {
                TimerKind::Grace => Message::GraceElapsed(session),
                TimerKind::WordTick { .. } => Message::WordTick(session),
            };
            let _ = self.dispatch(message);
        }
        if fired > 0 {
            trace!(fired, "Timers fired");
        }
        fired
    }

    /// When the host should call [`poll`](Self::poll) next.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub fn snapshot(&self, episode: &EpisodeId) -> Option<SessionSnapshot> {
        self.controller.snapshot(episode)
    }

    pub fn controller(&self) -> &SpeechController {
        &self.controller
    }

    fn dispatch(&mut self, message: Message) -> Result<(), PlaybackError> {
        let effects = self.controller.reduce(message).inspect_err(|err| {
            warn!("Playback request rejected: {err}");
        })?;
        for effect in effects {
            self.run_effect(effect);
        }
        Ok(())
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::CancelSpeech => self.speech.cancel(),
            Effect::Speak {
                utterance,
                text,
                voice,
            } => {
                debug!(%utterance, chars = text.chars().count(), "Speaking");
                self.speech.speak(utterance, &Utterance { text, voice });
            }
            Effect::PauseSpeech => self.speech.pause(),
            Effect::ResumeSpeech => self.speech.resume(),
            Effect::Render { source, text } => {
                let class = &self.controller.config().highlight_class;
                self.surface.render(&source, &text, class);
            }
            Effect::Restore { source, text } => self.surface.restore(&source, &text),
            Effect::ScrollToMarker { source, options } => {
                self.surface.scroll_to_marker(&source, options)
            }
            Effect::SetControls { episode, controls } => {
                self.surface.set_controls(&episode, controls)
            }
            Effect::ArmGraceTimer { session, delay } => {
                self.timers.arm_grace(session, self.clock.now(), delay)
            }
            Effect::ArmWordTimer { session, period } => {
                self.timers.arm_interval(session, self.clock.now(), period)
            }
            Effect::DisarmWordTimer { session } => self.timers.disarm_interval(session),
            Effect::DisarmTimers { session } => self.timers.disarm_session(session),
        }
    }

    #[cfg(test)]
    fn speech(&self) -> &S {
        &self.speech
    }

    #[cfg(test)]
    fn surface(&self) -> &V {
        &self.surface
    }

    #[cfg(test)]
    fn has_pending_timers(&self) -> bool {
        !self.timers.is_empty()
    }
}
