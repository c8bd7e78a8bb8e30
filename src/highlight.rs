//! Marked renderings of episode text.
//!
//! Both highlight strategies produce the same shape: the text before the
//! spoken word, the word itself, and the text after it. Surfaces either use
//! the parts directly or ask for HTML with [`HighlightedText::to_html`].

use crate::text_utils::{utf16_to_byte_offset, word_span_at};
use serde::Serialize;
use ts_rs::TS;

/// How the spoken word is located.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum HighlightMode {
    /// The engine reports where each word starts.
    NativeBoundary,
    /// Words are stepped through on a fixed interval.
    FallbackTimer,
}

impl std::fmt::Display for HighlightMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            HighlightMode::NativeBoundary => "native-boundary",
            HighlightMode::FallbackTimer => "fallback-timer",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct HighlightedText {
    pub before: String,
    pub word: String,
    pub after: String,
}

impl HighlightedText {
    /// Mark the word starting at a UTF-16 offset into `source`.
    pub fn at_offset(source: &str, utf16_offset: usize) -> Option<Self> {
        let start = utf16_to_byte_offset(source, utf16_offset)?;
        let span = word_span_at(source, start)?;
        Some(Self {
            before: source[..span.start].to_string(),
            word: source[span.clone()].to_string(),
            after: source[span.end..].to_string(),
        })
    }

    /// Mark `words[idx]` in the single-space join of `words`.
    pub fn at_word(words: &[String], idx: usize) -> Option<Self> {
        let word = words.get(idx)?.clone();
        let mut before = words[..idx].join(" ");
        if idx > 0 {
            before.push(' ');
        }
        let mut after = String::new();
        if idx + 1 < words.len() {
            after.push(' ');
            after.push_str(&words[idx + 1..].join(" "));
        }
        Some(Self {
            before,
            word,
            after,
        })
    }

    /// The text with the marker removed.
    pub fn plain(&self) -> String {
        format!("{}{}{}", self.before, self.word, self.after)
    }

    pub fn to_html(&self, class: &str) -> String {
        format!(
            "{}<span class=\"{}\">{}</span>{}",
            escape_html(&self.before),
            escape_html(class),
            escape_html(&self.word),
            escape_html(&self.after)
        )
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
