//! Text splitting helpers for speech alignment.

use std::ops::Range;

/// Whitespace-delimited tokens, in reading order.
pub fn split_words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Text still to be spoken when resuming from `cursor`.
pub fn remaining_text(words: &[String], cursor: usize) -> String {
    words.get(cursor..).map(|rest| rest.join(" ")).unwrap_or_default()
}

/// Map a UTF-16 code unit offset (as speech engines report it) to a byte
/// offset. Offsets that land inside a code point or past the end are rejected.
pub fn utf16_to_byte_offset(text: &str, utf16_offset: usize) -> Option<usize> {
    let mut units = 0usize;
    for (byte_idx, ch) in text.char_indices() {
        if units == utf16_offset {
            return Some(byte_idx);
        }
        if units > utf16_offset {
            return None;
        }
        units += ch.len_utf16();
    }
    (units == utf16_offset).then_some(text.len())
}

/// Byte range of the word starting at `byte_offset`, running to the next
/// whitespace or the end of the text.
pub fn word_span_at(text: &str, byte_offset: usize) -> Option<Range<usize>> {
    let tail = text.get(byte_offset..)?;
    let len = tail.find(char::is_whitespace).unwrap_or(tail.len());
    (len > 0).then_some(byte_offset..byte_offset + len)
}
