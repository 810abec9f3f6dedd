//! Default value functions used as `#[serde(default = "...")]` attributes on
//! [`LinkConfig`](super::LinkConfig) fields.

use super::ScanScope;

pub fn bool_true() -> bool {
    true
}

pub fn scan_scope() -> ScanScope {
    ScanScope::Viewport
}

/// Upper bound on rows visited by one scan, counted from the bottom of the buffer.
pub fn max_scan_rows() -> usize {
    1000
}

/// No minimum length: every detected word link is kept unless configured otherwise.
pub fn word_min_length() -> usize {
    0
}
