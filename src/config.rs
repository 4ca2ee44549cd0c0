use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::output::OutputFormat;
use crate::percolation::MergePolicy;

/// Community size used when none is given.
pub const DEFAULT_K: usize = 4;

/// Graph file read when none is given.
pub const DEFAULT_INPUT: &str = "input.txt";

pub const DEFAULT_LOG_FILTER: &str = "info";

pub(crate) const READ_BUFFER_SIZE: usize = 8 * 1024 * 1024;

/// Settings of one run, loadable from a YAML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct RunConfig {
    pub k: usize,
    pub input: PathBuf,
    pub policy: MergePolicy,
    pub format: OutputFormat,
    pub output: Option<PathBuf>, // Stdout when absent.
    pub log_file: Option<PathBuf>, // Stderr when absent.
    pub log_level: String
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            k: DEFAULT_K,
            input: PathBuf::from(DEFAULT_INPUT),
            policy: MergePolicy::default(),
            format: OutputFormat::default(),
            output: None,
            log_file: None,
            log_level: DEFAULT_LOG_FILTER.to_string()
        }
    }
}

impl RunConfig {
    pub fn from_yaml_str(text: &str) -> Result<RunConfig> {
        serde_yaml::from_str(text).context("invalid run configuration")
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<RunConfig> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        RunConfig::from_yaml_str(&text)
            .with_context(|| format!("failed to load config file {}", path.display()))
    }

    /// Reject settings the algorithms do not guard against.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.k >= 2, "k must be at least 2, got {}", self.k);
        Ok(())
    }
}
