//! Renaming matched subtitles after their videos.

use std::io;
use std::path::Path;
use std::{fmt, fs};

use crate::subtitle::{MatchPair, SubtitleError};

/// Whether renames are only reported or also performed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RenameMode {
    /// Report the intended renames without touching the filesystem.
    #[default]
    Preview,
    /// Rename the subtitle files.
    Execute,
}

impl fmt::Display for RenameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preview => write!(f, "preview"),
            Self::Execute => write!(f, "execute"),
        }
    }
}

/// Result of handling one matched pair.
#[derive(Debug)]
pub struct RenameOutcome {
    pub pair: MatchPair,
    /// New subtitle filename.
    pub target: String,
    /// True only when the file was actually renamed.
    pub applied: bool,
    pub error: Option<SubtitleError>,
}

/// Rename each subtitle to its paired video name with a `.srt` extension.
///
/// In preview mode nothing is renamed.
/// In execute mode a failed rename is stored in that pair's outcome
/// and the remaining pairs are still processed.
#[must_use]
pub fn apply_renames(directory: &Path, pairs: Vec<MatchPair>, mode: RenameMode) -> Vec<RenameOutcome> {
    pairs
        .into_iter()
        .map(|pair| {
            let target = pair.target_name();
            match mode {
                RenameMode::Preview => RenameOutcome {
                    pair,
                    target,
                    applied: false,
                    error: None,
                },
                RenameMode::Execute => {
                    let from = directory.join(&pair.subtitle);
                    let to = directory.join(&target);
                    match rename_file(&from, &to) {
                        Ok(()) => RenameOutcome {
                            pair,
                            target,
                            applied: true,
                            error: None,
                        },
                        Err(source) => RenameOutcome {
                            pair,
                            target,
                            applied: false,
                            error: Some(SubtitleError::Rename { from, to, source }),
                        },
                    }
                }
            }
        })
        .collect()
}

/// Rename without replacing an existing file.
///
/// An existing target is only accepted when it is the source file itself,
/// which covers case-only renames on case-insensitive filesystems.
fn rename_file(from: &Path, to: &Path) -> io::Result<()> {
    if from != to && to.try_exists()? && !same_file::is_same_file(from, to)? {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Target file already exists: {}", to.display()),
        ));
    }
    fs::rename(from, to)
}
