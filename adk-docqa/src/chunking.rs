//! Text splitting helpers.
//!
//! - [`WordChunker`] splits whitespace-tokenized text into consecutive word windows
//! - [`char_window`] / [`char_prefix`] take character-bounded slices without
//!   splitting a code point
//! - [`split_sentences`] is the `". "` sentence heuristic used for justification

use serde::{Deserialize, Serialize};

/// Default number of words per chunk.
pub const DEFAULT_MAX_WORDS: usize = 500;

/// Splits text into consecutive, non-overlapping windows of `max_words` words.
///
/// Words are whitespace-separated tokens; each chunk re-joins its words with a
/// single space. Every chunk except possibly the last holds exactly
/// `max_words` words. Empty or whitespace-only text yields no chunks.
///
/// # Example
///
/// ```rust
/// use adk_docqa::WordChunker;
///
/// let chunks = WordChunker::new(2).chunk("a b c d e");
/// assert_eq!(chunks, vec!["a b", "c d", "e"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordChunker {
    max_words: usize,
}

impl Default for WordChunker {
    fn default() -> Self {
        Self { max_words: DEFAULT_MAX_WORDS }
    }
}

impl WordChunker {
    /// Create a chunker. A `max_words` of zero is treated as one.
    pub fn new(max_words: usize) -> Self {
        Self { max_words: max_words.max(1) }
    }

    /// Maximum number of words per chunk.
    pub fn max_words(&self) -> usize {
        self.max_words
    }

    /// Split `text` into word windows, preserving order.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let words: Vec<&str> = text.split_whitespace().collect();
        words.chunks(self.max_words).map(|window| window.join(" ")).collect()
    }
}

/// Byte offset of the `n`-th character of `text`, or `text.len()` past the end.
fn byte_offset(text: &str, n: usize) -> usize {
    text.char_indices().nth(n).map(|(i, _)| i).unwrap_or(text.len())
}

/// The slice of `text` covering characters `[start, start + len)`.
///
/// Both bounds are clamped to the end of the text.
pub fn char_window(text: &str, start: usize, len: usize) -> &str {
    let from = byte_offset(text, start);
    let rest = &text[from..];
    &rest[..byte_offset(rest, len)]
}

/// The first `len` characters of `text` (the whole text if it is shorter).
pub fn char_prefix(text: &str, len: usize) -> &str {
    char_window(text, 0, len)
}

/// A piece of the document produced by [`split_sentences`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence<'a> {
    /// 0-based position among all split pieces, including discarded ones.
    pub index: usize,
    /// The trimmed piece.
    pub text: &'a str,
}

/// Split text on the literal delimiter `". "` and keep trimmed pieces of at
/// least `min_chars` characters.
///
/// There is no abbreviation or decimal handling. Indices refer to positions in
/// the full split, so they stay stable when short pieces are dropped.
pub fn split_sentences(text: &str, min_chars: usize) -> Vec<Sentence<'_>> {
    text.split(". ")
        .enumerate()
        .map(|(index, piece)| Sentence { index, text: piece.trim() })
        .filter(|s| s.text.chars().count() >= min_chars)
        .collect()
}
