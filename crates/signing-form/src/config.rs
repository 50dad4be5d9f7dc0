//! Form configuration
//!
//! Loaded from a TOML file such as:
//!
//! ```toml
//! max_signers = 10
//! signing_mode = "sequential"
//!
//! [replay]
//! step_delay_ms = 0
//! settle_delay_ms = 50
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use signing_sync::ReplayTiming;
use tracing::debug;

use crate::error::{Error, Result};

/// How signers receive the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum SigningMode {
    /// One after another, in signing order
    Sequential,

    /// Everyone at once; the order is kept but not enforced
    #[default]
    Parallel,
}

impl SigningMode {
    /// Whether the signing order is enforced when the document goes out
    pub fn enforces_order(&self) -> bool {
        matches!(self, SigningMode::Sequential)
    }
}

impl FromStr for SigningMode {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sequential" | "ordered" | "in-order" => Ok(SigningMode::Sequential),
            "parallel" | "any" | "any-order" => Ok(SigningMode::Parallel),
            _ => Err(Error::InvalidMode {
                mode: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for SigningMode {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl fmt::Display for SigningMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SigningMode::Sequential => write!(f, "sequential"),
            SigningMode::Parallel => write!(f, "parallel"),
        }
    }
}

/// Timing of drag-surface replays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Pause between single steps, in milliseconds
    #[serde(default)]
    pub step_delay_ms: u64,
    /// Pause before the drop, in milliseconds
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
}

fn default_settle_delay_ms() -> u64 {
    50
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            step_delay_ms: 0,
            settle_delay_ms: default_settle_delay_ms(),
        }
    }
}

impl From<ReplayConfig> for ReplayTiming {
    fn from(config: ReplayConfig) -> Self {
        ReplayTiming {
            step_delay: Duration::from_millis(config.step_delay_ms),
            settle_delay: Duration::from_millis(config.settle_delay_ms),
        }
    }
}

/// Settings of a signer form
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormConfig {
    /// Most signers the form accepts; unlimited when absent
    #[serde(default)]
    pub max_signers: Option<usize>,
    /// Initial signing mode
    #[serde(default)]
    pub signing_mode: SigningMode,
    /// Drag-surface replay timing
    #[serde(default)]
    pub replay: ReplayConfig,
}

impl FormConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a configuration file
    ///
    /// # Errors
    ///
    /// [`Error::ConfigNotFound`] when `path` does not exist and
    /// [`Error::InvalidConfig`] when it does not parse.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content).map_err(|e| Error::InvalidConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), "Loaded form configuration");
        Ok(config)
    }
}
