//! Read-aloud narration for episode pages.
//!
//! A page shows several episodes, each with a text container and
//! listen/pause/resume controls. [`NarratorRuntime`] speaks one episode at a
//! time through a [`SpeechChannel`] and keeps the spoken word marked in the
//! container, using the engine's word boundaries where they arrive and a
//! fixed-interval timer where they do not (always on handheld devices).
//!
//! The decision logic lives in [`SpeechController`], a pure reducer from
//! [`Message`] to [`Effect`]; the runtime carries the effects out.

pub mod config;
pub mod controller;
pub mod error;
pub mod highlight;
pub mod logging;
pub mod platform;
pub mod runtime;
pub mod session;
pub mod speech;
pub mod surface;
pub mod text_utils;

pub use config::{LogLevel, NarratorConfig, PlatformOverride, load_config};
pub use controller::{Effect, Message, SpeechController};
pub use error::PlaybackError;
pub use highlight::{HighlightMode, HighlightedText};
pub use logging::{init_tracing, set_log_level};
pub use platform::PlatformClass;
pub use runtime::{Clock, ManualClock, NarratorRuntime, SystemClock};
pub use session::{EpisodeId, PlaybackState, SessionSnapshot};
pub use speech::{BoundaryKind, SpeechChannel, SpeechEvent, Utterance, UtteranceId, VoiceSettings};
pub use surface::{ControlVisibility, EpisodeSurface, ScrollBlock, ScrollOptions, SourceRef};
