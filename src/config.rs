//! Configuration management for unmerged-commits.
//!
//! Settings are layered, highest precedence first:
//! - command line flags
//! - environment variables (`UNMERGED_COMMITS_*`)
//! - TOML configuration file, only when `--config` names one
//! - built-in defaults, including the branch table from [`crate::sequences`]
//!
//! ## Example
//!
//! ```rust
//! use unmerged_commits::Config;
//!
//! let defaults = Config::default();
//! let env_config = Config::load_from_env();
//!
//! // Environment takes precedence over defaults
//! let merged = defaults.merge(env_config);
//! assert!(!merged.sequences().is_empty());
//! ```
//!
//! ## File format
//!
//! ```toml
//! repo = "/src/kv_engine"
//! color = "never"
//!
//! [[sequences]]
//! name = "release-train"
//! edges = [
//!     { downstream = "couchbase/alice", upstream = "couchbase/mad-hatter" },
//!     { downstream = "couchbase/mad-hatter", upstream = "couchbase/master" },
//! ]
//! ```

use crate::{
    error::ConfigError,
    models::{Args, ColorChoice, Sequence},
    parsed_property::ParsedProperty,
    sequences::builtin_sequences,
};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const ENV_REPO: &str = "UNMERGED_COMMITS_REPO";
pub const ENV_COLOR: &str = "UNMERGED_COMMITS_COLOR";

/// Temporary struct for deserializing TOML configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct ConfigFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    repo: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<ColorChoice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sequences: Option<Vec<Sequence>>,
}

/// Application configuration assembled from CLI arguments, environment variables, config file, and defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Checkout that `git cherry` runs in.
    pub repo: Option<ParsedProperty<PathBuf>>,
    /// When to color the report.
    pub color: Option<ParsedProperty<ColorChoice>>,
    /// Release-branch sequences to check, in order.
    pub sequences: Option<ParsedProperty<Vec<Sequence>>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repo: Some(ParsedProperty::Default(PathBuf::from("."))),
            color: Some(ParsedProperty::Default(ColorChoice::Auto)),
            sequences: Some(ParsedProperty::Default(builtin_sequences())),
        }
    }
}

impl Config {
    /// A layer with nothing set.
    pub fn empty() -> Self {
        Self {
            repo: None,
            color: None,
            sequences: None,
        }
    }

    /// Resolve the full configuration for a run.
    pub fn resolve(args: &Args) -> Result<Self, ConfigError> {
        let file = Self::load_from_file(args.config.as_deref())?;

        let config = Self::default()
            .merge(file)
            .merge(Self::load_from_env())
            .merge(Self::from_args(args));

        if let Some(repo) = &config.repo {
            tracing::debug!(repo = %repo.display(), source = %repo.describe_source(), "resolved repo");
        }
        if let Some(sequences) = &config.sequences {
            tracing::debug!(
                count = sequences.len(),
                source = %sequences.describe_source(),
                "resolved sequences"
            );
        }

        Ok(config)
    }

    /// Load the config file named by `--config`.
    ///
    /// No file is looked up implicitly: without a path the layer is empty,
    /// so a bare run always uses the built-in branch table. A named file
    /// must exist.
    pub fn load_from_file(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = explicit else {
            return Ok(Self::empty());
        };

        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        Self::load_from_path(path)
    }

    fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let config_file: ConfigFile =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let file = path.to_path_buf();
        Ok(Self {
            repo: config_file
                .repo
                .map(|v| ParsedProperty::File(v, file.clone())),
            color: config_file
                .color
                .map(|v| ParsedProperty::File(v, file.clone())),
            sequences: config_file
                .sequences
                .map(|v| ParsedProperty::File(v, file.clone())),
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Values that do not parse are ignored.
    pub fn load_from_env() -> Self {
        Self {
            repo: std::env::var(ENV_REPO)
                .ok()
                .filter(|v| !v.is_empty())
                .map(|v| ParsedProperty::Env(PathBuf::from(v), ENV_REPO.to_string())),
            color: std::env::var(ENV_COLOR).ok().and_then(|s| {
                ColorChoice::parse(&s).map(|v| ParsedProperty::Env(v, ENV_COLOR.to_string()))
            }),
            // the branch table is configured via file only
            sequences: None,
        }
    }

    pub fn from_args(args: &Args) -> Self {
        Self {
            repo: args
                .repo
                .clone()
                .map(|v| ParsedProperty::Cli(v, "--repo".to_string())),
            color: args
                .color
                .map(|v| ParsedProperty::Cli(v, "--color".to_string())),
            sequences: None,
        }
    }

    /// Merge this config with another, preferring values from other when they exist
    pub fn merge(self, other: Self) -> Self {
        Self {
            repo: other.repo.or(self.repo),
            color: other.color.or(self.color),
            sequences: other.sequences.or(self.sequences),
        }
    }

    pub fn repo_path(&self) -> PathBuf {
        self.repo
            .as_ref()
            .map(|p| p.value().clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn color_choice(&self) -> ColorChoice {
        self.color.as_ref().map(|c| *c.value()).unwrap_or_default()
    }

    pub fn sequences(&self) -> &[Sequence] {
        self.sequences
            .as_ref()
            .map(|s| s.value().as_slice())
            .unwrap_or_default()
    }

    /// Render the branch table in config file syntax.
    pub fn sequences_to_toml(&self) -> Result<String, ConfigError> {
        let file = ConfigFile {
            sequences: Some(self.sequences().to_vec()),
            ..ConfigFile::default()
        };
        toml::to_string_pretty(&file).map_err(|e| ConfigError::SerializeError {
            message: e.to_string(),
        })
    }
}
