//! Splitting raw document text into bounded, retrievable segments.
//!
//! Legal documents arrive as one long extracted string (a contract, an
//! arbitration award, a statute). Before anything can be indexed, that string
//! has to be cut into pieces small enough to hand to a retrieval model but
//! large enough to carry meaning on their own. This module owns that cut.
//!
//! The splitter works from a priority table of structural delimiters. Legal
//! text has strong conventions for marking structure ("Article 7.",
//! "Section 12(b)", "Clause 4"), so those boundaries are tried first, then
//! progressively weaker ones (paragraph breaks, line breaks, sentence ends,
//! spaces). The first delimiter that occurs anywhere in the text is the one
//! used for the whole document; consecutive pieces are then packed greedily
//! into segments of at most `max_size` characters.
//!
//! Text with no recognizable structure at all (no spaces even) falls back to
//! fixed-width windows with `overlap` characters of shared context between
//! neighbours.
//!
//! Splitting is a pure function of its inputs: the same text and the same
//! configuration always produce the same segments.
//!
//! ```
//! use docket_ai_context::text::TextSplitter;
//!
//! let splitter = TextSplitter::new(200, 40);
//! let text = "This agreement sets out the obligations of both parties in detail.\n\n\
//!             Payment is due within thirty days of the invoice date, without setoff.";
//! let segments = splitter.split_text(text);
//! assert!(!segments.is_empty());
//! for segment in &segments {
//!     assert!(segment.chars().count() > 50);
//! }
//! ```

use serde::Serialize;

/// Structural delimiters tried in priority order when splitting a document.
///
/// The first entry that occurs anywhere in the text decides how the whole
/// document is split. Heading-style markers come first because a split at
/// "\n\nArticle " keeps an article and its body together; paragraph and line
/// breaks are next; a sentence boundary and a bare space are the last resort
/// before fixed-width slicing.
pub const DEFAULT_LEGAL_DELIMITERS: &[&str] = &[
    "\n\nArticle ",
    "\n\nSection ",
    "\n\nClause ",
    "\n\n",
    "\n",
    ". ",
    " ",
];

/// Segments at or below this many characters (after trimming) are discarded.
///
/// A fragment like a bare heading or page number carries no retrievable
/// content, and indexing it would only add noise to term statistics.
pub const MIN_SEGMENT_CHARS: usize = 50;

/// Default maximum segment size in characters.
pub const DEFAULT_MAX_SIZE: usize = 1500;

/// Default overlap in characters between fixed-width fallback windows.
pub const DEFAULT_OVERLAP: usize = 300;

/// Splits raw document text into bounded segments along structural boundaries.
///
/// Sizes and the overlap are measured in characters rather than bytes, so a
/// document with multi-byte punctuation or accented text never gets cut
/// inside a code point.
#[derive(Debug, Clone)]
pub struct TextSplitter {
    max_size: usize,
    overlap: usize,
    delimiters: Vec<String>,
}

impl Default for TextSplitter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SIZE, DEFAULT_OVERLAP)
    }
}

/// A single segment with its position within the source document.
///
/// Produced by [`TextSplitter::split_text_indexed`]; mostly useful for
/// serializing splitter output (the CLI emits these as JSON).
#[derive(Debug, Clone, Serialize)]
pub struct SplitSegment {
    /// 0-based position of this segment within its document.
    pub sequence: usize,
    /// Trimmed segment text.
    pub text: String,
}

impl TextSplitter {
    /// Create a splitter with the given segment size and fallback overlap,
    /// using [`DEFAULT_LEGAL_DELIMITERS`].
    pub fn new(max_size: usize, overlap: usize) -> Self {
        Self {
            max_size,
            overlap,
            delimiters: DEFAULT_LEGAL_DELIMITERS
                .iter()
                .map(|d| d.to_string())
                .collect(),
        }
    }

    /// Replace the delimiter priority table.
    ///
    /// Entries are plain strings, not patterns, consulted in order; the first
    /// one contained anywhere in the input wins.
    pub fn with_delimiters<I, S>(mut self, delimiters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.delimiters = delimiters.into_iter().map(Into::into).collect();
        self
    }

    /// Maximum segment size in characters.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Overlap in characters between fixed-width fallback windows.
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Split `text` into trimmed segments of (intended) at most `max_size`
    /// characters, each longer than [`MIN_SEGMENT_CHARS`].
    ///
    /// A single piece between two delimiters can exceed `max_size` on its
    /// own; it is emitted as-is rather than cut mid-word. Pieces at or below
    /// the minimum length are dropped, so a very short document legitimately
    /// produces zero segments.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        let raw = match self
            .delimiters
            .iter()
            .find(|delimiter| text.contains(delimiter.as_str()))
        {
            Some(delimiter) => self.split_on_delimiter(text, delimiter),
            None => self.split_fixed_windows(text),
        };

        raw.into_iter()
            .map(|segment| segment.trim().to_string())
            .filter(|segment| segment.chars().count() > MIN_SEGMENT_CHARS)
            .collect()
    }

    /// Like [`split_text`](Self::split_text), but pairs each segment with its
    /// 0-based sequence number.
    pub fn split_text_indexed(&self, text: &str) -> Vec<SplitSegment> {
        self.split_text(text)
            .into_iter()
            .enumerate()
            .map(|(sequence, text)| SplitSegment { sequence, text })
            .collect()
    }

    /// Split on `delimiter` and greedily pack consecutive pieces.
    ///
    /// Every piece after the first is re-prefixed with the delimiter it was
    /// split on, so packed segments read as contiguous text. The running
    /// buffer is flushed whenever appending the next piece would push it past
    /// `max_size`.
    fn split_on_delimiter(&self, text: &str, delimiter: &str) -> Vec<String> {
        let delimiter_chars = delimiter.chars().count();
        let mut segments = Vec::new();
        let mut buffer = String::new();
        let mut buffer_chars = 0usize;

        for (i, piece) in text.split(delimiter).enumerate() {
            let piece_chars = piece.chars().count()
                + if i > 0 { delimiter_chars } else { 0 };

            if buffer_chars + piece_chars <= self.max_size {
                if i > 0 {
                    buffer.push_str(delimiter);
                }
                buffer.push_str(piece);
                buffer_chars += piece_chars;
            } else {
                if !buffer.is_empty() {
                    segments.push(std::mem::take(&mut buffer));
                }
                buffer = if i > 0 {
                    format!("{delimiter}{piece}")
                } else {
                    piece.to_string()
                };
                buffer_chars = piece_chars;
            }
        }
        if !buffer.is_empty() {
            segments.push(buffer);
        }

        segments
    }

    /// Fixed-width fallback for text containing none of the delimiters.
    ///
    /// Windows of `max_size` characters advance by `max_size - overlap`,
    /// clamped to at least 1 so an overlap at or above the window size cannot
    /// stall the loop.
    fn split_fixed_windows(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let step = self.max_size.saturating_sub(self.overlap).max(1);
        let mut segments = Vec::new();

        let mut start = 0;
        while start < chars.len() {
            let end = (start + self.max_size).min(chars.len());
            segments.push(chars[start..end].iter().collect());
            start += step;
        }

        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(n: usize) -> String {
        (0..n)
            .map(|i| format!("The arbitral tribunal shall decide issue number {i} on the merits. "))
            .collect()
    }

    #[test]
    fn splits_at_article_boundaries_first() {
        let text = format!(
            "Article 1. Scope.\n\n{}\n\nArticle 2. Fees.\n\n{}",
            sentence(3),
            sentence(3)
        );
        let splitter = TextSplitter::new(300, 60);
        let segments = splitter.split_text(&text);

        // "\n\nArticle " outranks the plain paragraph break, so every segment
        // after the first begins at an article heading.
        assert!(!segments.is_empty());
        for segment in segments.iter().skip(1) {
            assert!(
                segment.starts_with("Article "),
                "segment did not start at an article boundary: {segment:?}"
            );
        }
    }

    #[test]
    fn respects_max_size_when_pieces_are_small() {
        let text = sentence(40);
        let splitter = TextSplitter::new(200, 40);
        let segments = splitter.split_text(&text);

        assert!(segments.len() > 1);
        for segment in &segments {
            assert!(segment.chars().count() <= 200);
        }
    }

    #[test]
    fn drops_segments_at_or_below_minimum_length() {
        // Both article bodies trim to well under the minimum, so the whole
        // document yields nothing.
        let text = "Article 1. Terms.\n\nArticle 2. Payment.";
        let splitter = TextSplitter::new(30, 10);
        let segments = splitter.split_text(text);
        assert!(segments.is_empty());
    }

    #[test]
    fn fixed_window_fallback_when_no_delimiter_matches() {
        let text: String = "x".repeat(250);
        let splitter = TextSplitter::new(100, 25);
        let segments = splitter.split_text(&text);

        // Windows of 100 advancing by 75: starts at 0, 75, 150, 225.
        assert_eq!(segments.len(), 4);
        assert!(segments.iter().all(|s| s.chars().count() <= 100));
        assert_eq!(segments[0], "x".repeat(100));
        assert_eq!(segments[3], "x".repeat(25).to_string());
    }

    #[test]
    fn fallback_step_is_clamped_when_overlap_swallows_the_window() {
        let text: String = "y".repeat(120);
        let splitter = TextSplitter::new(60, 60);
        let segments = splitter.split_text(&text);

        // Step would be 0; the clamp advances one character at a time instead
        // of looping forever. Windows starting at 0..=69 still have more than
        // 50 characters left, so exactly 70 survive the length filter.
        assert_eq!(segments.len(), 70);
    }

    #[test]
    fn splitting_is_deterministic() {
        let text = format!("Preamble text goes here.\n\n{}", sentence(20));
        let splitter = TextSplitter::new(400, 80);
        assert_eq!(splitter.split_text(&text), splitter.split_text(&text));
    }

    #[test]
    fn oversized_single_piece_is_emitted_whole() {
        // One piece longer than max_size with no inner delimiter occurrence
        // of higher priority; it must come through intact, not truncated.
        let long_word = "a".repeat(120);
        let text = format!("{long_word} {long_word}");
        let splitter = TextSplitter::new(100, 20);
        let segments = splitter.split_text(&text);

        assert_eq!(segments.len(), 2);
        assert!(segments.iter().any(|s| s.chars().count() > 100));
    }

    #[test]
    fn multibyte_text_never_splits_inside_a_code_point() {
        let text: String = "é".repeat(200);
        let splitter = TextSplitter::new(80, 20);
        // Would panic on a byte-indexed slice; char windows are safe.
        let segments = splitter.split_text(&text);
        assert!(!segments.is_empty());
    }

    #[test]
    fn indexed_segments_are_numbered_in_order() {
        let text = sentence(30);
        let splitter = TextSplitter::new(250, 50);
        let indexed = splitter.split_text_indexed(&text);

        assert!(!indexed.is_empty());
        for (i, segment) in indexed.iter().enumerate() {
            assert_eq!(segment.sequence, i);
        }
    }
}
