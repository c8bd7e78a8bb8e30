use crate::session::EpisodeId;
use crate::surface::SourceRef;
use thiserror::Error;

/// Failures of a single user-triggered playback operation.
///
/// None of these are fatal: the operation is abandoned and the previous UI
/// state stays as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("text container {source_ref} does not exist")]
    MissingSourceElement { source_ref: SourceRef },

    #[error("episode {episode} has no text to read")]
    EmptySourceText { episode: EpisodeId },

    #[error("episode {episode} has nothing left to read (cursor {cursor} of {word_count} words)")]
    NoResumableContent {
        episode: EpisodeId,
        cursor: usize,
        word_count: usize,
    },
}
