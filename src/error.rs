//! Typed error types for par-term-links.
//!
//! Detector failures are contained by the manager and never reach a caller;
//! activation failures and disposal are surfaced through [`LinkError`].

use thiserror::Error;

/// Failure reported by a [`LinkDetector`](crate::detector::LinkDetector) for one row.
///
/// The manager logs these and treats the row as having no links of that kind.
#[derive(Debug, Error)]
pub enum DetectError {
    /// The detector ran but could not produce a result.
    #[error("link detection failed: {0}")]
    Failed(String),

    /// The row is not readable right now (e.g. trimmed from scrollback mid-scan).
    #[error("row {0} is not available")]
    RowUnavailable(usize),

    /// The detector task panicked.
    #[error("link detector panicked on row {0}")]
    Panicked(usize),
}

/// Failure raised by a link's activation action.
#[derive(Debug, Error)]
pub enum ActivationError {
    /// The link target does not exist (file removed, path not resolvable).
    #[error("link target not found: {0}")]
    NotFound(String),

    /// The action ran and failed.
    #[error("failed to open link: {0}")]
    Failed(String),

    /// An I/O error occurred while opening the target.
    #[error("I/O error opening link: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors returned by the [`LinkManager`](crate::manager::LinkManager) public API.
#[derive(Debug, Error)]
pub enum LinkError {
    /// The manager was disposed before the call completed.
    #[error("link manager has been disposed")]
    Disposed,

    /// The most recent link was found but its action failed.
    #[error("failed to activate link '{text}': {source}")]
    Activation {
        /// Text of the link whose action failed.
        text: String,
        /// Underlying activation error.
        #[source]
        source: ActivationError,
    },
}

/// Errors that can occur when loading, saving, or validating
/// [`LinkConfig`](crate::config::LinkConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing the config file.
    #[error("I/O error reading link config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file contained invalid YAML.
    #[error("YAML parse error in link config: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// A field value failed semantic validation.
    #[error("link config validation error: {0}")]
    Validation(String),
}
