//! Pluggable per-kind link detectors.
//!
//! A detector recognizes links of one [`LinkKind`] on a single buffer row. The
//! recognition logic (URL regexes, path resolution, word boundaries) lives in
//! the embedding terminal; this crate only drives detectors and merges their
//! output.

use crate::error::DetectError;
use crate::link::{Link, LinkKind};
use async_trait::async_trait;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// Recognizes links of one kind on a buffer row.
///
/// Implementations must be `Send + Sync`; the manager calls detectors for
/// different kinds on the same row concurrently.
#[async_trait]
pub trait LinkDetector: Send + Sync {
    /// Detect links on `row` (0-based buffer line).
    ///
    /// Returns `Ok(None)` when the row has no links of this kind. Links are
    /// returned in the order the detector found them; that order is kept in
    /// snapshots.
    async fn detect(&self, row: usize) -> Result<Option<Vec<Link>>, DetectError>;
}

/// Detector table keyed by [`LinkKind`].
///
/// A kind with no registered detector never produces links.
#[derive(Clone, Default)]
pub struct DetectorSet {
    word: Option<Arc<dyn LinkDetector>>,
    web: Option<Arc<dyn LinkDetector>>,
    file: Option<Arc<dyn LinkDetector>>,
}

impl DetectorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`set`](Self::set).
    pub fn with_detector(mut self, kind: LinkKind, detector: Arc<dyn LinkDetector>) -> Self {
        self.set(kind, detector);
        self
    }

    /// Register `detector` for `kind`, replacing any previous one.
    pub fn set(&mut self, kind: LinkKind, detector: Arc<dyn LinkDetector>) {
        *self.slot_mut(kind) = Some(detector);
    }

    /// Unregister the detector for `kind`, returning it.
    pub fn remove(&mut self, kind: LinkKind) -> Option<Arc<dyn LinkDetector>> {
        self.slot_mut(kind).take()
    }

    pub fn get(&self, kind: LinkKind) -> Option<&Arc<dyn LinkDetector>> {
        match kind {
            LinkKind::Word => self.word.as_ref(),
            LinkKind::Web => self.web.as_ref(),
            LinkKind::File => self.file.as_ref(),
        }
    }

    pub fn contains(&self, kind: LinkKind) -> bool {
        self.get(kind).is_some()
    }

    fn slot_mut(&mut self, kind: LinkKind) -> &mut Option<Arc<dyn LinkDetector>> {
        match kind {
            LinkKind::Word => &mut self.word,
            LinkKind::Web => &mut self.web,
            LinkKind::File => &mut self.file,
        }
    }

    /// Run the `kind` detector on `row`.
    ///
    /// Failures (errors and panics) are logged and reported as no links, so
    /// one bad row never aborts a scan.
    pub async fn detect(&self, kind: LinkKind, row: usize) -> Vec<Link> {
        let Some(detector) = self.get(kind) else {
            return Vec::new();
        };

        let result = match AssertUnwindSafe(detector.detect(row)).catch_unwind().await {
            Ok(result) => result,
            Err(_) => Err(DetectError::Panicked(row)),
        };

        match result {
            Ok(links) => links.unwrap_or_default(),
            Err(e) => {
                log::warn!("{} link detector failed on row {}: {}", kind, row, e);
                Vec::new()
            }
        }
    }
}
