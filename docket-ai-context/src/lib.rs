pub mod text;

// Re-export the splitter and its tuning constants for external use
pub use text::{
    DEFAULT_LEGAL_DELIMITERS, DEFAULT_MAX_SIZE, DEFAULT_OVERLAP, MIN_SEGMENT_CHARS, SplitSegment,
    TextSplitter,
};
