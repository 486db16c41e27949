use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from scanning a directory and renaming subtitles.
#[derive(Debug, Error)]
pub enum SubtitleError {
    /// The directory is missing, not a directory or cannot be listed.
    #[error("Failed to read directory '{}': {source}", .path.display())]
    DirectoryAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A single rename failed at the filesystem level.
    #[error("Failed to rename '{}' to '{}': {source}", .from.display(), .to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}
