//! Handheld detection.
//!
//! Word-boundary callbacks and pause/resume are unreliable on phones and
//! tablets, so the controller treats those platforms differently. The
//! classification is a user-agent heuristic plus a touch-point check for
//! tablets that report a desktop user agent.

use crate::config::PlatformOverride;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use ts_rs::TS;

static RE_HANDHELD_AGENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)android|webos|iphone|ipad|ipod|blackberry|iemobile|opera mini|mobile")
        .expect("handheld user-agent pattern is valid")
});

static RE_MAC_AGENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)macintosh").expect("mac user-agent pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PlatformClass {
    Desktop,
    Handheld,
}

impl PlatformClass {
    pub fn detect(user_agent: &str, max_touch_points: u32) -> Self {
        if RE_HANDHELD_AGENT.is_match(user_agent) {
            return PlatformClass::Handheld;
        }
        // iPadOS identifies as a Mac but exposes multi-touch.
        if RE_MAC_AGENT.is_match(user_agent) && max_touch_points > 1 {
            return PlatformClass::Handheld;
        }
        PlatformClass::Desktop
    }

    pub fn resolve(override_class: PlatformOverride, user_agent: &str, max_touch_points: u32) -> Self {
        match override_class {
            PlatformOverride::Auto => Self::detect(user_agent, max_touch_points),
            PlatformOverride::Desktop => PlatformClass::Desktop,
            PlatformOverride::Handheld => PlatformClass::Handheld,
        }
    }

    pub fn is_handheld(self) -> bool {
        matches!(self, PlatformClass::Handheld)
    }
}

impl std::fmt::Display for PlatformClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PlatformClass::Desktop => "desktop",
            PlatformClass::Handheld => "handheld",
        };
        write!(f, "{}", label)
    }
}
