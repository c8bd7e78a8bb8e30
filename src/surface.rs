//! The page side: episode text containers and their listen/pause/resume
//! controls.

use crate::highlight::HighlightedText;
use crate::session::EpisodeId;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Identifier of a text container on the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SourceRef(pub String);

impl From<&str> for SourceRef {
    fn from(id: &str) -> Self {
        SourceRef(id.to_string())
    }
}

impl std::fmt::Display for SourceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which of an episode's three playback buttons are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct ControlVisibility {
    pub listen: bool,
    pub pause: bool,
    pub resume: bool,
}

impl ControlVisibility {
    pub const IDLE: Self = Self {
        listen: true,
        pause: false,
        resume: false,
    };
    pub const SPEAKING: Self = Self {
        listen: false,
        pause: true,
        resume: false,
    };
    pub const PAUSED: Self = Self {
        listen: false,
        pause: false,
        resume: true,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ScrollBlock {
    Center,
    Nearest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct ScrollOptions {
    pub smooth: bool,
    pub block: ScrollBlock,
}

/// DOM-facing side of the narrator.
pub trait EpisodeSurface {
    /// Current plain text of the container, or `None` if it does not exist.
    fn read_text(&self, source: &SourceRef) -> Option<String>;
    /// Replace the container's text with a marked rendering; the spoken word
    /// carries `highlight_class`.
    fn render(&mut self, source: &SourceRef, text: &HighlightedText, highlight_class: &str);
    /// Put back the untagged text.
    fn restore(&mut self, source: &SourceRef, text: &str);
    fn scroll_to_marker(&mut self, source: &SourceRef, options: ScrollOptions);
    fn set_controls(&mut self, episode: &EpisodeId, controls: ControlVisibility);
}
