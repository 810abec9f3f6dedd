//! Link detection and recency tracking for par-term.
//!
//! This crate aggregates links found in the terminal buffer by pluggable
//! per-kind detectors (word, web, file) and provides:
//!
//! - a full snapshot of detected links grouped by kind, most recent row first
//! - "open the most recent link of kind K" for the open-last-link commands
//!
//! Link recognition and the effect of opening a link are supplied by the
//! embedding terminal through [`LinkDetector`] and [`LinkAction`].

pub mod buffer;
pub mod config;
pub mod detector;
pub mod error;
pub mod link;
pub mod manager;

// Re-export main types for convenience
pub use buffer::{LinkBuffer, ScanRange};
pub use config::{KindToggle, LinkConfig, ScanScope, WordLinkConfig};
pub use detector::{DetectorSet, LinkDetector};
pub use error::{ActivationError, ConfigError, DetectError, LinkError};
pub use link::{BufferPoint, BufferRange, Link, LinkAction, LinkKind, LinkSnapshot};
pub use manager::LinkManager;
