//! Pairing subtitle files with the most similar video file in a directory.

use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

use crate::subtitle::SubtitleError;
use crate::subtitle::normalize::{normalize, strip_extension};
use crate::subtitle::similarity::similarity_ratio;

/// A subtitle is paired only when its best score is strictly above this.
pub const MATCH_THRESHOLD: f64 = 0.3;

/// Video file extensions, compared case-insensitively.
pub const VIDEO_EXTENSIONS: [&str; 3] = ["mp4", "mkv", "avi"];

/// Subtitle file suffix, compared case-sensitively.
pub const SUBTITLE_EXTENSION: &str = ".srt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Subtitle,
}

impl MediaKind {
    /// Classify a filename by its extension.
    ///
    /// Only a lowercase `.srt` suffix counts as a subtitle,
    /// so `Movie.SRT` is neither a subtitle nor a video.
    #[must_use]
    pub fn from_filename(filename: &str) -> Option<Self> {
        if filename.ends_with(SUBTITLE_EXTENSION) {
            return Some(Self::Subtitle);
        }
        let extension = Path::new(filename).extension()?.to_str()?.to_lowercase();
        VIDEO_EXTENSIONS
            .contains(&extension.as_str())
            .then_some(Self::Video)
    }
}

/// A classified file from the scanned directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub kind: MediaKind,
}

impl DirectoryEntry {
    /// Create an entry if the filename is a video or a subtitle.
    #[must_use]
    pub fn from_filename(name: &str) -> Option<Self> {
        MediaKind::from_filename(name).map(|kind| Self {
            name: name.to_string(),
            kind,
        })
    }
}

/// A subtitle accepted for renaming after the video it matched best.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchPair {
    pub subtitle: String,
    pub video: String,
    pub score: f64,
}

impl MatchPair {
    /// New subtitle filename: the video name with a `.srt` extension.
    #[must_use]
    pub fn target_name(&self) -> String {
        format!("{}{SUBTITLE_EXTENSION}", strip_extension(&self.video))
    }
}

/// A subtitle that did not score above the threshold against any video.
#[derive(Debug, Clone, PartialEq)]
pub struct UnmatchedSubtitle {
    pub subtitle: String,
    pub best_video: Option<String>,
    pub best_score: f64,
}

/// Result of matching: accepted pairs and dropped subtitles, both in listing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchReport {
    pub pairs: Vec<MatchPair>,
    pub unmatched: Vec<UnmatchedSubtitle>,
}

/// List the videos and subtitles directly inside the given directory.
///
/// Entries keep the order the filesystem lists them in.
/// Sub-directories and files with non-UTF-8 names are skipped.
///
/// # Errors
/// Returns `SubtitleError::DirectoryAccess` if the path is not a readable directory.
pub fn scan_directory(directory: &Path) -> Result<Vec<DirectoryEntry>, SubtitleError> {
    let access_error = |source: io::Error| SubtitleError::DirectoryAccess {
        path: directory.to_path_buf(),
        source,
    };

    let metadata = fs::metadata(directory).map_err(access_error)?;
    if !metadata.is_dir() {
        return Err(access_error(io::Error::new(
            io::ErrorKind::NotADirectory,
            "Path is not a directory",
        )));
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(directory).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|error| access_error(error.into()))?;
        if !entry.path().is_file() {
            continue;
        }
        if let Some(media) = entry.file_name().to_str().and_then(DirectoryEntry::from_filename) {
            entries.push(media);
        }
    }
    Ok(entries)
}

/// Pair each subtitle with its most similar video.
///
/// Videos are compared in listing order and a later video only replaces
/// the current best with a strictly higher score, so ties go to the first one.
#[must_use]
pub fn match_entries(entries: &[DirectoryEntry]) -> MatchReport {
    let videos: Vec<(&str, String)> = entries
        .iter()
        .filter(|entry| entry.kind == MediaKind::Video)
        .map(|entry| (entry.name.as_str(), normalize(&entry.name)))
        .collect();

    let mut report = MatchReport::default();
    for subtitle in entries.iter().filter(|entry| entry.kind == MediaKind::Subtitle) {
        let key = normalize(&subtitle.name);
        let mut best_video: Option<&str> = None;
        let mut best_score = 0.0;
        for (video, video_key) in &videos {
            let score = similarity_ratio(&key, video_key);
            if score > best_score {
                best_score = score;
                best_video = Some(*video);
            }
        }

        match best_video {
            Some(video) if best_score > MATCH_THRESHOLD => report.pairs.push(MatchPair {
                subtitle: subtitle.name.clone(),
                video: video.to_string(),
                score: best_score,
            }),
            _ => report.unmatched.push(UnmatchedSubtitle {
                subtitle: subtitle.name.clone(),
                best_video: best_video.map(ToString::to_string),
                best_score,
            }),
        }
    }
    report
}

/// Scan the directory and match its subtitles, keeping unmatched subtitles in the report.
///
/// # Errors
/// Returns `SubtitleError::DirectoryAccess` if the directory cannot be read.
pub fn find_matches(directory: &Path) -> Result<MatchReport, SubtitleError> {
    let entries = scan_directory(directory)?;
    Ok(match_entries(&entries))
}

/// Scan the directory and return the accepted subtitle and video pairs.
///
/// # Errors
/// Returns `SubtitleError::DirectoryAccess` if the directory cannot be read.
pub fn find_matching_pairs(directory: &Path) -> Result<Vec<MatchPair>, SubtitleError> {
    find_matches(directory).map(|report| report.pairs)
}
