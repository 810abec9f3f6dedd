//! Configuration for link detection.
//!
//! Loaded from `links.yaml` in the par-term config directory. Every field has a
//! serde default so partial files are accepted.

pub mod defaults;
mod persistence;

use crate::error::ConfigError;
use crate::link::LinkKind;
use serde::{Deserialize, Serialize};

/// Which rows a scan covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanScope {
    /// From the top row of the viewport to the end of the buffer
    #[default]
    Viewport,
    /// The whole buffer including scrollback
    Scrollback,
}

/// Settings for generic word links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordLinkConfig {
    #[serde(default = "defaults::bool_true")]
    pub enabled: bool,

    /// Words shorter than this many characters are dropped. 0 keeps every word.
    #[serde(default = "defaults::word_min_length")]
    pub min_length: usize,

    /// Drop repeated words reported on the same row (first occurrence wins).
    /// Repeats on different rows are always kept. Off by default.
    #[serde(default)]
    pub dedupe_within_row: bool,
}

impl Default for WordLinkConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::bool_true(),
            min_length: defaults::word_min_length(),
            dedupe_within_row: false,
        }
    }
}

/// Settings for a link kind that only has an on/off switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindToggle {
    #[serde(default = "defaults::bool_true")]
    pub enabled: bool,
}

impl Default for KindToggle {
    fn default() -> Self {
        Self {
            enabled: defaults::bool_true(),
        }
    }
}

/// Link detection configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkConfig {
    #[serde(default = "defaults::scan_scope")]
    pub scan_scope: ScanScope,

    /// Maximum rows visited by a scan, counted up from the bottom of the buffer.
    #[serde(default = "defaults::max_scan_rows")]
    pub max_scan_rows: usize,

    #[serde(default)]
    pub word_links: WordLinkConfig,

    #[serde(default)]
    pub web_links: KindToggle,

    #[serde(default)]
    pub file_links: KindToggle,

    /// Reuse the last snapshot while the buffer generation is unchanged.
    #[serde(default = "defaults::bool_true")]
    pub cache_snapshots: bool,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            scan_scope: defaults::scan_scope(),
            max_scan_rows: defaults::max_scan_rows(),
            word_links: WordLinkConfig::default(),
            web_links: KindToggle::default(),
            file_links: KindToggle::default(),
            cache_snapshots: defaults::bool_true(),
        }
    }
}

impl LinkConfig {
    /// Whether detection for `kind` is switched on.
    pub fn is_enabled(&self, kind: LinkKind) -> bool {
        match kind {
            LinkKind::Word => self.word_links.enabled,
            LinkKind::Web => self.web_links.enabled,
            LinkKind::File => self.file_links.enabled,
        }
    }

    /// Kinds that are switched on, in snapshot field order.
    pub fn enabled_kinds(&self) -> Vec<LinkKind> {
        LinkKind::ALL
            .into_iter()
            .filter(|kind| self.is_enabled(*kind))
            .collect()
    }

    /// Check field values that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_scan_rows == 0 {
            return Err(ConfigError::Validation(
                "max_scan_rows must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse a config from YAML text and validate it.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: LinkConfig = serde_yaml_ng::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }
}
