use crate::highlight::HighlightedText;
use crate::session::EpisodeId;
use crate::speech::{SpeechChannel, Utterance, UtteranceId};
use crate::surface::{ControlVisibility, EpisodeSurface, ScrollOptions, SourceRef};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SpeechCall {
    Speak(UtteranceId, String),
    Cancel,
    Pause,
    Resume,
}

#[derive(Debug, Default)]
pub(crate) struct RecordingSpeech {
    pub(crate) calls: Vec<SpeechCall>,
}

impl RecordingSpeech {
    pub(crate) fn last_spoken(&self) -> Option<(UtteranceId, &str)> {
        self.calls.iter().rev().find_map(|call| match call {
            SpeechCall::Speak(id, text) => Some((*id, text.as_str())),
            _ => None,
        })
    }
}

impl SpeechChannel for RecordingSpeech {
    fn speak(&mut self, id: UtteranceId, utterance: &Utterance) {
        self.calls.push(SpeechCall::Speak(id, utterance.text.clone()));
    }

    fn cancel(&mut self) {
        self.calls.push(SpeechCall::Cancel);
    }

    fn pause(&mut self) {
        self.calls.push(SpeechCall::Pause);
    }

    fn resume(&mut self) {
        self.calls.push(SpeechCall::Resume);
    }
}

/// In-memory page: container text, the currently marked markup, and the
/// visible controls per episode.
#[derive(Debug, Default)]
pub(crate) struct FakeSurface {
    pub(crate) texts: HashMap<SourceRef, String>,
    pub(crate) markup: HashMap<SourceRef, String>,
    pub(crate) marked: HashMap<SourceRef, String>,
    pub(crate) controls: HashMap<EpisodeId, ControlVisibility>,
    pub(crate) scrolls: usize,
}

impl FakeSurface {
    pub(crate) fn with_text(mut self, source: &str, text: &str) -> Self {
        self.texts.insert(source.into(), text.to_string());
        self
    }

    pub(crate) fn marked(&self, source: &str) -> Option<&str> {
        self.marked.get(&SourceRef::from(source)).map(String::as_str)
    }

    pub(crate) fn text(&self, source: &str) -> Option<&str> {
        self.texts.get(&SourceRef::from(source)).map(String::as_str)
    }

    pub(crate) fn controls(&self, episode: &str) -> Option<ControlVisibility> {
        self.controls.get(&EpisodeId::from(episode)).copied()
    }
}

impl EpisodeSurface for FakeSurface {
    fn read_text(&self, source: &SourceRef) -> Option<String> {
        self.texts.get(source).cloned()
    }

    fn render(&mut self, source: &SourceRef, text: &HighlightedText, highlight_class: &str) {
        self.texts.insert(source.clone(), text.plain());
        self.markup
            .insert(source.clone(), text.to_html(highlight_class));
        self.marked.insert(source.clone(), text.word.clone());
    }

    fn restore(&mut self, source: &SourceRef, text: &str) {
        self.texts.insert(source.clone(), text.to_string());
        self.markup.remove(source);
        self.marked.remove(source);
    }

    fn scroll_to_marker(&mut self, _source: &SourceRef, _options: ScrollOptions) {
        self.scrolls += 1;
    }

    fn set_controls(&mut self, episode: &EpisodeId, controls: ControlVisibility) {
        self.controls.insert(episode.clone(), controls);
    }
}
