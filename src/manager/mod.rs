//! Link aggregation across detectors and recency queries.
//!
//! [`LinkManager`] drives the per-kind detectors over the scan range, merges
//! their output into a [`LinkSnapshot`] and answers "open the most recent link
//! of kind K".
//!
//! Rows are visited bottom-up. All detectors for a row are awaited together
//! before the next row starts, so snapshot order never depends on which
//! detector finishes first.
//!
//! ## Module layout
//!
//! - [`cache`]: last snapshot, keyed by buffer generation
//! - [`row_filter`]: per-row cleanup of word links

mod cache;
mod row_filter;


use crate::buffer::{LinkBuffer, ScanRange};
use crate::config::LinkConfig;
use crate::detector::{DetectorSet, LinkDetector};
use crate::error::{ConfigError, LinkError};
use crate::link::{Link, LinkKind, LinkSnapshot};
use cache::{SnapshotCache, SnapshotKey};
use parking_lot::{Mutex, RwLock};
use row_filter::filter_row;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Rows scanned between cooperative yields to the runtime.
const YIELD_EVERY_ROWS: usize = 64;

/// Aggregates links from the word, web and file detectors of one terminal.
///
/// Shared as `Arc<LinkManager>`; every method takes `&self` and concurrent
/// calls are independent.
pub struct LinkManager {
    buffer: Arc<dyn LinkBuffer>,
    detectors: RwLock<DetectorSet>,
    config: RwLock<LinkConfig>,
    cache: Mutex<SnapshotCache>,
    /// Bumped after every detector or config change.
    epoch: AtomicU64,
    disposed: AtomicBool,
}

/// State captured when a call starts. Scans only read from their own plan.
struct ScanPlan {
    range: ScanRange,
    key: Option<SnapshotKey>,
    detectors: DetectorSet,
    config: LinkConfig,
}

impl ScanPlan {
    /// Filtered links of one kind on one row.
    async fn detect(&self, kind: LinkKind, row: usize) -> Vec<Link> {
        if !self.config.is_enabled(kind) {
            return Vec::new();
        }
        let links = self.detectors.detect(kind, row).await;
        filter_row(kind, links, &self.config.word_links)
    }

    /// All kinds on one row, detectors running concurrently.
    async fn scan_row(&self, row: usize) -> LinkSnapshot {
        let (word_links, web_links, file_links) = futures::join!(
            self.detect(LinkKind::Word, row),
            self.detect(LinkKind::Web, row),
            self.detect(LinkKind::File, row),
        );
        LinkSnapshot {
            word_links,
            web_links,
            file_links,
        }
    }
}

impl LinkManager {
    /// Create a manager with the default config.
    pub fn new(buffer: Arc<dyn LinkBuffer>, detectors: DetectorSet) -> Self {
        Self::with_config(buffer, detectors, LinkConfig::default())
    }

    pub fn with_config(
        buffer: Arc<dyn LinkBuffer>,
        detectors: DetectorSet,
        config: LinkConfig,
    ) -> Self {
        Self {
            buffer,
            detectors: RwLock::new(detectors),
            config: RwLock::new(config),
            cache: Mutex::new(SnapshotCache::default()),
            epoch: AtomicU64::new(0),
            disposed: AtomicBool::new(false),
        }
    }

    /// Collect every link in the scan range, grouped by kind, most recent row first.
    ///
    /// A failing detector only loses its own row. Returns
    /// [`LinkError::Disposed`] if the manager is disposed before the scan
    /// finishes; a partial snapshot is never returned.
    pub async fn get_links(&self) -> Result<LinkSnapshot, LinkError> {
        self.ensure_live()?;
        let plan = self.plan();

        if let Some(snapshot) = self.cached(&plan) {
            log::trace!("Link snapshot cache hit for rows {:?}", plan.range);
            return Ok(snapshot);
        }

        let mut snapshot = LinkSnapshot::new();
        for (scanned, row) in plan.range.rows_recent_first().enumerate() {
            let row_links = plan.scan_row(row).await;
            self.ensure_live()?;

            if !row_links.is_empty() {
                log::trace!(
                    "Row {}: {} word, {} web, {} file links",
                    row,
                    row_links.word_links.len(),
                    row_links.web_links.len(),
                    row_links.file_links.len()
                );
            }
            snapshot.append(row_links);

            if (scanned + 1) % YIELD_EVERY_ROWS == 0 {
                tokio::task::yield_now().await;
            }
        }

        log::debug!(
            "Scanned rows {}..{}: {} word, {} web, {} file links",
            plan.range.top(),
            plan.range.bottom(),
            snapshot.word_links.len(),
            snapshot.web_links.len(),
            snapshot.file_links.len()
        );

        self.remember(&plan, &snapshot);
        Ok(snapshot)
    }

    /// Activate the most recent link of `kind` and return it.
    ///
    /// The link chosen is always the first element of `get_links()` for that
    /// kind. Without a cached snapshot the scan stops at the first row that has
    /// one. Returns `Ok(None)` without activating anything when there is no such
    /// link. An activation failure is returned as [`LinkError::Activation`].
    pub async fn open_recent_link(&self, kind: LinkKind) -> Result<Option<Link>, LinkError> {
        self.ensure_live()?;
        let plan = self.plan();

        let link = match self.cached(&plan) {
            Some(snapshot) => snapshot.most_recent(kind).cloned(),
            None => self.find_recent(&plan, kind).await?,
        };

        let Some(link) = link else {
            log::debug!("No {} link to open in rows {:?}", kind, plan.range);
            return Ok(None);
        };

        log::info!("Opening recent {} link: {}", kind, link.text());
        if let Err(source) = link.activate().await {
            log::error!("Failed to open {} link {:?}: {}", kind, link.text(), source);
            return Err(LinkError::Activation {
                text: link.text().to_string(),
                source,
            });
        }

        Ok(Some(link))
    }

    /// Links found on a single buffer row, grouped by kind.
    ///
    /// Rows outside the current scan range yield an empty snapshot.
    pub async fn links_for_row(&self, row: usize) -> Result<LinkSnapshot, LinkError> {
        self.ensure_live()?;
        let plan = self.plan();
        if !plan.range.contains(row) {
            return Ok(LinkSnapshot::new());
        }

        let links = plan.scan_row(row).await;
        self.ensure_live()?;
        Ok(links)
    }

    /// Register `detector` for `kind`, replacing the current one.
    pub fn set_detector(&self, kind: LinkKind, detector: Arc<dyn LinkDetector>) {
        self.detectors.write().set(kind, detector);
        self.bump_epoch();
    }

    /// Unregister the detector for `kind`.
    pub fn remove_detector(&self, kind: LinkKind) -> Option<Arc<dyn LinkDetector>> {
        let removed = self.detectors.write().remove(kind);
        self.bump_epoch();
        removed
    }

    pub fn config(&self) -> LinkConfig {
        self.config.read().clone()
    }

    /// Replace the config. Invalid configs are rejected and the current one kept.
    pub fn set_config(&self, config: LinkConfig) -> Result<(), ConfigError> {
        config.validate()?;
        *self.config.write() = config;
        self.bump_epoch();
        Ok(())
    }

    /// Stop the manager. In-flight and later calls fail with [`LinkError::Disposed`].
    pub fn dispose(&self) {
        if !self.disposed.swap(true, Ordering::AcqRel) {
            log::debug!("Link manager disposed");
        }
        self.cache.lock().clear();
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    fn ensure_live(&self) -> Result<(), LinkError> {
        if self.is_disposed() {
            Err(LinkError::Disposed)
        } else {
            Ok(())
        }
    }

    fn bump_epoch(&self) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
        self.cache.lock().clear();
    }

    fn plan(&self) -> ScanPlan {
        // Epoch before settings: a concurrent change then only makes the key stale.
        let epoch = self.epoch.load(Ordering::Acquire);
        let config = self.config.read().clone();
        let detectors = self.detectors.read().clone();

        // Generation before range: a concurrent write then fails the post-scan check.
        let generation = self.buffer.generation();
        let range =
            ScanRange::resolve(self.buffer.as_ref(), config.scan_scope, config.max_scan_rows);

        let key = if config.cache_snapshots {
            generation.map(|generation| SnapshotKey {
                generation,
                range,
                epoch,
            })
        } else {
            None
        };

        ScanPlan {
            range,
            key,
            detectors,
            config,
        }
    }

    fn cached(&self, plan: &ScanPlan) -> Option<LinkSnapshot> {
        let key = plan.key.as_ref()?;
        self.cache.lock().get(key).cloned()
    }

    /// Cache a finished scan if the buffer did not change while it ran.
    fn remember(&self, plan: &ScanPlan, snapshot: &LinkSnapshot) {
        let Some(key) = plan.key else {
            return;
        };
        if self.is_disposed() {
            return;
        }
        if self.buffer.generation() != Some(key.generation) {
            log::trace!("Buffer changed during link scan, not caching");
            return;
        }
        self.cache.lock().store(key, snapshot.clone());
    }

    async fn find_recent(
        &self,
        plan: &ScanPlan,
        kind: LinkKind,
    ) -> Result<Option<Link>, LinkError> {
        if !plan.config.is_enabled(kind) {
            return Ok(None);
        }

        for (scanned, row) in plan.range.rows_recent_first().enumerate() {
            let links = plan.detect(kind, row).await;
            self.ensure_live()?;

            if let Some(link) = links.into_iter().next() {
                log::debug!("Most recent {} link on row {}: {:?}", kind, row, link.text());
                return Ok(Some(link));
            }

            if (scanned + 1) % YIELD_EVERY_ROWS == 0 {
                tokio::task::yield_now().await;
            }
        }

        Ok(None)
    }
}
