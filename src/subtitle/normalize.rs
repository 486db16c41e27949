//! Filename normalization into comparable keys.

use std::sync::LazyLock;

use regex::Regex;

static RE_RESOLUTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b\d{3,4}p?\b").expect("Failed to compile resolution regex"));

static RE_QUALITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(HD|SD|HQ)\b").expect("Failed to compile quality marker regex"));

static RE_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[._-]").expect("Failed to compile separator regex"));

/// Return the filename without its extension.
///
/// The extension starts at the last `.`, unless that dot is only preceded by other dots,
/// in which case the name has no extension.
///
/// ```rust
/// use subtitle_rename::subtitle::strip_extension;
///
/// assert_eq!(strip_extension("Movie.2020.mkv"), "Movie.2020");
/// assert_eq!(strip_extension("archive.tar.gz"), "archive.tar");
/// assert_eq!(strip_extension(".hidden"), ".hidden");
/// assert_eq!(strip_extension("README"), "README");
/// ```
#[must_use]
pub fn strip_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(index) if filename[..index].chars().any(|c| c != '.') => &filename[..index],
        _ => filename,
    }
}

/// Reduce a filename to the lowercase key used for similarity scoring.
///
/// Removes the extension, resolution numbers like `720p` or `1080`,
/// and the quality markers `HD`, `SD` and `HQ`.
/// Dots, underscores and dashes become spaces.
/// Only leading and trailing whitespace is trimmed.
#[must_use]
pub fn normalize(filename: &str) -> String {
    let name = strip_extension(filename);
    let name = RE_RESOLUTION.replace_all(name, "");
    let name = RE_QUALITY.replace_all(&name, "");
    let name = RE_SEPARATORS.replace_all(&name, " ");
    name.to_lowercase().trim().to_string()
}
