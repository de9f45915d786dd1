//! Skip-list configuration.
//!
//! Entries of the organized directory whose names match a skip rule are left
//! in place. Category directories (`Images`, `Code`, ...) are always skipped
//! regardless of configuration; the rules here cover everything else.
//!
//! # Configuration File Format
//!
//! ```toml
//! [skip]
//! filenames = [".DS_Store", "Thumbs.db"]
//! patterns = ["*.part", "~$*"]
//! regex = ["^\\.~lock\\..*#$"]
//! ```
//!
//! Every field is optional. Without any configuration only `.DS_Store` is
//! skipped, besides `.sortdirrc.toml` itself, which is never moved.

use glob::Pattern;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Name of the per-directory configuration file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = ".sortdirrc.toml";

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    /// Invalid TOML syntax or structure.
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Invalid glob pattern '{pattern}': {reason}")]
    InvalidGlobPattern { pattern: String, reason: String },

    #[error("Invalid regex pattern '{pattern}': {reason}")]
    InvalidRegexPattern { pattern: String, reason: String },

    #[error("IO error reading configuration {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level configuration file contents.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SortConfig {
    #[serde(default)]
    pub skip: SkipConfig,
}

/// Rules for entries that should never be moved.
#[derive(Debug, Clone, Deserialize)]
pub struct SkipConfig {
    /// Exact file names to skip. Defaults to `.DS_Store`.
    #[serde(default = "default_skip_filenames")]
    pub filenames: Vec<String>,

    /// Glob patterns matched against the entry name.
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Regex patterns matched against the entry name.
    #[serde(default)]
    pub regex: Vec<String>,
}

fn default_skip_filenames() -> Vec<String> {
    vec![".DS_Store".to_string()]
}

impl Default for SkipConfig {
    fn default() -> Self {
        Self {
            filenames: default_skip_filenames(),
            patterns: Vec::new(),
            regex: Vec::new(),
        }
    }
}

impl SortConfig {
    /// Load configuration, with fallback to defaults.
    ///
    /// Lookup order:
    /// 1. `config_path`, if given (must exist)
    /// 2. `.sortdirrc.toml` in the current directory
    /// 3. `~/.config/sortdir/config.toml`
    /// 4. Built-in defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("sortdir")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        debug!("no configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        debug!(path = %path.display(), "loading configuration");
        toml::from_str(&content).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Compile the skip rules for matching.
    pub fn compile(self) -> Result<SkipRules, ConfigError> {
        SkipRules::new(self.skip)
    }
}

/// Compiled skip rules, checked once per directory entry.
#[derive(Debug, Clone)]
pub struct SkipRules {
    filenames: HashSet<String>,
    patterns: Vec<Pattern>,
    regexes: Vec<Regex>,
}

impl SkipRules {
    fn new(config: SkipConfig) -> Result<Self, ConfigError> {
        let patterns = config
            .patterns
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|e| ConfigError::InvalidGlobPattern {
                    pattern: pattern.clone(),
                    reason: e.msg.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let regexes = config
            .regex
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ConfigError::InvalidRegexPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            filenames: config.filenames.into_iter().collect(),
            patterns,
            regexes,
        })
    }

    /// True if an entry with this name must be left where it is.
    ///
    /// The local configuration file is always kept in place, so running in
    /// the directory that holds it does not lose the configuration.
    pub fn should_skip(&self, file_name: &str) -> bool {
        file_name == LOCAL_CONFIG_FILE
            || self.filenames.contains(file_name)
            || self.patterns.iter().any(|p| p.matches(file_name))
            || self.regexes.iter().any(|r| r.is_match(file_name))
    }
}

impl Default for SkipRules {
    fn default() -> Self {
        Self {
            filenames: default_skip_filenames().into_iter().collect(),
            patterns: Vec::new(),
            regexes: Vec::new(),
        }
    }
}
