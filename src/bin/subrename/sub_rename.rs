use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;

use subtitle_rename::print_warning;
use subtitle_rename::subtitle::{self, MatchReport, RenameMode, RenameOutcome, SubtitleError};

use crate::Args;
use crate::config::Config;

#[derive(Debug, Default)]
pub struct SubRename {
    root: PathBuf,
    config: Config,
}

impl SubRename {
    /// Init new instance with CLI args.
    pub fn new(args: &Args) -> Result<Self> {
        let root = subtitle_rename::resolve_input_path(args.path.as_deref())?;
        let config = Config::from_args(args)?;
        Ok(Self { root, config })
    }

    /// Run renaming with given args.
    #[inline]
    pub fn run_with_args(args: Args) -> Result<()> {
        Self::new(&args)?.run()
    }

    /// Match subtitles to videos and rename or preview them.
    pub fn run(&self) -> Result<()> {
        let mut stdout = io::stdout().lock();
        self.run_with_output(&mut stdout)
    }

    /// Run and write the per-pair lines to the given output.
    fn run_with_output(&self, out: &mut impl Write) -> Result<()> {
        if self.config.debug {
            writeln!(out, "{}", self.config)?;
            writeln!(out, "Directory: {}", self.root.display())?;
        }

        let MatchReport { pairs, unmatched } = subtitle::find_matches(&self.root)
            .with_context(|| format!("Failed to match subtitles in {}", self.root.display()))?;

        if self.config.verbose {
            for dropped in &unmatched {
                match &dropped.best_video {
                    Some(video) => print_warning!(
                        "No match for {} (best: {video} {:.2})",
                        dropped.subtitle,
                        dropped.best_score
                    ),
                    None => print_warning!("No match for {}", dropped.subtitle),
                }
            }
        }

        let outcomes = subtitle::apply_renames(&self.root, pairs, self.config.mode);
        for outcome in &outcomes {
            writeln!(out, "{}", outcome_line(outcome, self.config.mode))?;
            if self.config.verbose {
                writeln!(out, "  matched {} ({:.2})", outcome.pair.video, outcome.pair.score)?;
            }
        }

        if self.config.verbose {
            self.write_summary(out, &outcomes)?;
        }
        Ok(())
    }

    fn write_summary(&self, out: &mut impl Write, outcomes: &[RenameOutcome]) -> io::Result<()> {
        if outcomes.is_empty() {
            return writeln!(out, "No subtitles to rename");
        }
        match self.config.mode {
            RenameMode::Preview => writeln!(out, "Dryrun: would have renamed {}", file_count(outcomes.len())),
            RenameMode::Execute => {
                let num_renamed = outcomes.iter().filter(|outcome| outcome.applied).count();
                writeln!(out, "{}", format!("Renamed {}", file_count(num_renamed)).green())?;
                let num_failed = outcomes.len() - num_renamed;
                if num_failed > 0 {
                    writeln!(out, "{}", format!("Failed to rename {}", file_count(num_failed)).red())?;
                }
                Ok(())
            }
        }
    }
}

/// Format the console line for one rename outcome.
fn outcome_line(outcome: &RenameOutcome, mode: RenameMode) -> String {
    let subtitle = &outcome.pair.subtitle;
    let target = &outcome.target;
    match (&outcome.error, mode) {
        (Some(SubtitleError::Rename { source, .. }), _) => {
            format!("Error renaming {subtitle}: {source}").red().to_string()
        }
        (Some(error), _) => format!("Error renaming {subtitle}: {error}").red().to_string(),
        (None, RenameMode::Preview) => format!("{} {subtitle} -> {target}", "Would rename:".cyan()),
        (None, RenameMode::Execute) => format!("{} {subtitle} -> {target}", "Renamed:".green()),
    }
}

fn file_count(count: usize) -> String {
    format!("{count} {}", if count == 1 { "file" } else { "files" })
}

#[cfg(test)]
mod sub_rename_tests {
    use super::*;

    use std::fs::{self, File};
    use std::path::Path;

    use tempfile::tempdir;

    use subtitle_rename::subtitle::MatchPair;

    fn run_lines(root: &Path, config: Config) -> Vec<String> {
        let sub_rename = SubRename {
            root: root.to_path_buf(),
            config,
        };
        let mut output = Vec::new();
        sub_rename.run_with_output(&mut output).unwrap();
        String::from_utf8(output).unwrap().lines().map(ToString::to_string).collect()
    }

    fn sorted_names(directory: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(directory)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    fn outcome(applied: bool, error: Option<SubtitleError>) -> RenameOutcome {
        RenameOutcome {
            pair: MatchPair {
                subtitle: "Movie.HI.srt".to_string(),
                video: "Movie.720p.mkv".to_string(),
                score: 0.8,
            },
            target: "Movie.720p.srt".to_string(),
            applied,
            error,
        }
    }

    #[test]
    fn test_preview_line() {
        let line = outcome_line(&outcome(false, None), RenameMode::Preview);
        assert!(line.contains("Would rename:"));
        assert!(line.contains("Movie.HI.srt -> Movie.720p.srt"));
    }

    #[test]
    fn test_renamed_line() {
        let line = outcome_line(&outcome(true, None), RenameMode::Execute);
        assert!(line.contains("Renamed:"));
        assert!(line.contains("Movie.HI.srt -> Movie.720p.srt"));
    }

    #[test]
    fn test_error_line_contains_os_error() {
        let error = SubtitleError::Rename {
            from: PathBuf::from("Movie.HI.srt"),
            to: PathBuf::from("Movie.720p.srt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        let line = outcome_line(&outcome(false, Some(error)), RenameMode::Execute);
        assert!(line.contains("Error renaming Movie.HI.srt: permission denied"));
    }

    #[test]
    fn test_file_count() {
        assert_eq!(file_count(0), "0 files");
        assert_eq!(file_count(1), "1 file");
        assert_eq!(file_count(3), "3 files");
    }

    #[test]
    fn test_run_on_missing_directory_fails() {
        let sub_rename = SubRename {
            root: PathBuf::from("/nonexistent/subtitle/dir"),
            config: Config::default(),
        };
        assert!(sub_rename.run().is_err());
    }

    #[test]
    fn test_run_on_file_path_fails() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("Movie.mkv");
        File::create(&file).unwrap();
        let sub_rename = SubRename {
            root: file,
            config: Config::default(),
        };
        assert!(sub_rename.run_with_output(&mut Vec::new()).is_err());
    }

    #[test]
    fn test_run_empty_directory_prints_nothing() {
        let dir = tempdir().unwrap();
        assert!(run_lines(dir.path(), Config::default()).is_empty());
    }

    #[test]
    fn test_run_preview_prints_one_line_per_pair() {
        let dir = tempdir().unwrap();
        for name in ["Show.S01E01.720p.mkv", "Show.S01E01.HI.srt", "Show.S01E02.mkv", "show_s01e02.srt", "xyz.srt"] {
            File::create(dir.path().join(name)).unwrap();
        }
        let before = sorted_names(dir.path());

        let lines = run_lines(dir.path(), Config::default());

        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|line| line.contains("Would rename:")));
        assert!(lines.iter().any(|line| line.contains("Show.S01E01.HI.srt -> Show.S01E01.720p.srt")));
        assert!(lines.iter().any(|line| line.contains("show_s01e02.srt -> Show.S01E02.srt")));
        assert_eq!(sorted_names(dir.path()), before);
    }

    #[test]
    fn test_run_execute_renames_and_reports_each_pair() {
        let dir = tempdir().unwrap();
        for name in ["Film.mkv", "Film.srt", "Film.en.srt"] {
            File::create(dir.path().join(name)).unwrap();
        }
        let config = Config {
            mode: RenameMode::Execute,
            ..Default::default()
        };

        let lines = run_lines(dir.path(), config);

        assert_eq!(lines.len(), 2);
        assert!(lines.iter().any(|line| line.contains("Renamed:") && line.contains("Film.srt -> Film.srt")));
        assert!(lines.iter().any(|line| line.contains("Error renaming Film.en.srt:")));
        assert_eq!(sorted_names(dir.path()), vec!["Film.en.srt", "Film.mkv", "Film.srt"]);
    }
}
