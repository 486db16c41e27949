use std::{fmt, fs};

use anyhow::Context;
use serde::Deserialize;

use subtitle_rename::subtitle::RenameMode;

use crate::Args;

/// Final config created from CLI arguments and user config file.
#[derive(Debug, Default)]
pub struct Config {
    pub(crate) debug: bool,
    pub(crate) mode: RenameMode,
    pub(crate) verbose: bool,
}

/// Config from the user config file
#[derive(Debug, Default, Deserialize)]
struct SubRenameConfig {
    #[serde(default)]
    debug: bool,
    #[serde(default)]
    execute: bool,
    #[serde(default)]
    verbose: bool,
}

/// Wrapper needed for parsing the config file section.
#[derive(Debug, Default, Deserialize)]
struct UserConfig {
    #[serde(default)]
    subrename: SubRenameConfig,
}

impl SubRenameConfig {
    /// Try to read user config from the file if it exists.
    /// Otherwise, fall back to default config.
    ///
    /// # Errors
    /// Returns an error if config file exists but cannot be read or parsed.
    fn get_user_config() -> anyhow::Result<Self> {
        let Some(path) = subtitle_rename::config_path() else {
            return Ok(Self::default());
        };

        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse config file {}:\n{e}", path.display())),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(error) => Err(anyhow::anyhow!(
                "Failed to read config file {}: {error}",
                path.display()
            )),
        }
    }

    /// Parse config from a TOML string.
    ///
    /// # Errors
    /// Returns an error if the TOML string is invalid.
    fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        toml::from_str::<UserConfig>(toml_str)
            .map(|config| config.subrename)
            .context("Failed to parse subrename config TOML")
    }
}

impl Config {
    /// Create config from given command line args and user config file.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be read or parsed.
    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        let user_config = SubRenameConfig::get_user_config()?;
        Ok(Self::from_args_and_user_config(args, &user_config))
    }

    fn from_args_and_user_config(args: &Args, user_config: &SubRenameConfig) -> Self {
        let mode = if args.execute || user_config.execute {
            RenameMode::Execute
        } else {
            RenameMode::Preview
        };
        Self {
            debug: args.debug || user_config.debug,
            mode,
            verbose: args.verbose || user_config.verbose,
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Config:")?;
        writeln!(f, "  debug:   {}", subtitle_rename::colorize_bool(self.debug))?;
        writeln!(f, "  mode:    {}", self.mode)?;
        write!(f, "  verbose: {}", subtitle_rename::colorize_bool(self.verbose))
    }
}

#[cfg(test)]
mod sub_rename_config_tests {
    use super::*;

    #[test]
    fn from_toml_str_parses_empty_config() {
        let config = SubRenameConfig::from_toml_str("").unwrap();
        assert!(!config.debug);
        assert!(!config.execute);
        assert!(!config.verbose);
    }

    #[test]
    fn from_toml_str_parses_subrename_section() {
        let toml = r"
[subrename]
debug = true
execute = true
verbose = true
";
        let config = SubRenameConfig::from_toml_str(toml).unwrap();
        assert!(config.debug);
        assert!(config.execute);
        assert!(config.verbose);
    }

    #[test]
    fn from_toml_str_ignores_other_sections() {
        let toml = r"
[other_section]
verbose = true

[subrename]
execute = true
";
        let config = SubRenameConfig::from_toml_str(toml).unwrap();
        assert!(config.execute);
        assert!(!config.verbose);
    }

    #[test]
    fn from_toml_str_invalid_toml_returns_error() {
        let result = SubRenameConfig::from_toml_str("this is not valid toml {{{");
        assert!(result.is_err());
    }

    #[test]
    fn from_toml_str_wrong_type_returns_error() {
        let toml = r#"
[subrename]
execute = "yes"
"#;
        assert!(SubRenameConfig::from_toml_str(toml).is_err());
    }
}
