//! Subtitle rename module for pairing subtitle files with video files.
//!
//! Filenames are reduced to a normalized key, subtitles are paired with the
//! most similar video in the same directory, and each paired subtitle is
//! renamed to the video's base name.

mod error;
mod matcher;
mod normalize;
mod rename;
mod similarity;

pub use error::SubtitleError;
pub use matcher::{
    DirectoryEntry, MATCH_THRESHOLD, MatchPair, MatchReport, MediaKind, SUBTITLE_EXTENSION, UnmatchedSubtitle,
    VIDEO_EXTENSIONS, find_matches, find_matching_pairs, match_entries, scan_directory,
};
pub use normalize::{normalize, strip_extension};
pub use rename::{RenameMode, RenameOutcome, apply_renames};
pub use similarity::similarity_ratio;
