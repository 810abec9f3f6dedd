//! Shared integration test helpers for par-term-links.
//!
//! Provides a fixture buffer, a fixture detector store that places links on rows
//! by index, and a recording link action.
//!
//! ```ignore
//! mod common;
//! use common::{FixtureBuffer, FixtureLinks, RecordingAction};
//! ```

#![allow(dead_code)]

use async_trait::async_trait;
use par_term_links::{
    ActivationError, BufferRange, DetectError, DetectorSet, Link, LinkAction, LinkBuffer,
    LinkDetector, LinkKind, LinkManager,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Default terminal geometry used by the suites: 80x30 with no scrollback.
pub const ROWS: usize = 30;

/// Buffer with adjustable height, viewport and generation.
pub struct FixtureBuffer {
    length: AtomicUsize,
    viewport_top: AtomicUsize,
    generation: AtomicU64,
    tracks_generation: bool,
}

impl FixtureBuffer {
    pub fn new(length: usize) -> Arc<Self> {
        Arc::new(Self {
            length: AtomicUsize::new(length),
            viewport_top: AtomicUsize::new(0),
            generation: AtomicU64::new(1),
            tracks_generation: true,
        })
    }

    /// A buffer that reports no generation, so nothing is ever cached.
    pub fn untracked(length: usize) -> Arc<Self> {
        Arc::new(Self {
            length: AtomicUsize::new(length),
            viewport_top: AtomicUsize::new(0),
            generation: AtomicU64::new(0),
            tracks_generation: false,
        })
    }

    pub fn set_length(&self, length: usize) {
        self.length.store(length, Ordering::SeqCst);
        self.touch();
    }

    pub fn set_viewport_top(&self, row: usize) {
        self.viewport_top.store(row, Ordering::SeqCst);
    }

    /// Simulate a buffer write.
    pub fn touch(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

impl LinkBuffer for FixtureBuffer {
    fn length(&self) -> usize {
        self.length.load(Ordering::SeqCst)
    }

    fn viewport_top(&self) -> usize {
        self.viewport_top.load(Ordering::SeqCst)
    }

    fn generation(&self) -> Option<u64> {
        self.tracks_generation
            .then(|| self.generation.load(Ordering::SeqCst))
    }
}

/// Link action that counts activations and can be told to fail.
#[derive(Default)]
pub struct RecordingAction {
    calls: AtomicUsize,
    fail: bool,
}

impl RecordingAction {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail: true,
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LinkAction for RecordingAction {
    async fn activate(&self, text: &str) -> Result<(), ActivationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(ActivationError::NotFound(text.to_string()))
        } else {
            Ok(())
        }
    }
}

/// Build a link on the row given by `range`.
pub fn link(range: BufferRange, text: &str, action: &Arc<RecordingAction>) -> Link {
    Link::new(range, text, action.clone())
}

/// Links to place, one per row by index, like the row-keyed fixture the
/// manager's behavior was first specified against.
#[derive(Default)]
pub struct DetectedLinks {
    pub word_links: Vec<Link>,
    pub web_links: Vec<Link>,
    pub file_links: Vec<Link>,
}

/// Row-keyed link store backing the fixture detectors.
#[derive(Default)]
pub struct FixtureLinks {
    rows: Mutex<HashMap<(LinkKind, usize), Vec<Link>>>,
    calls: Mutex<Vec<(LinkKind, usize)>>,
    failing_rows: Mutex<Vec<(LinkKind, usize)>>,
}

impl FixtureLinks {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Replace all links; element `i` of each list is reported on row `i`.
    pub fn set_links(&self, links: DetectedLinks) {
        let mut rows = self.rows.lock();
        rows.clear();
        for (kind, list) in [
            (LinkKind::Word, links.word_links),
            (LinkKind::Web, links.web_links),
            (LinkKind::File, links.file_links),
        ] {
            for (row, link) in list.into_iter().enumerate() {
                rows.insert((kind, row), vec![link]);
            }
        }
    }

    /// Put several links of `kind` on one row.
    pub fn put(&self, kind: LinkKind, row: usize, links: Vec<Link>) {
        self.rows.lock().insert((kind, row), links);
    }

    /// Make the `kind` detector fail on `row`.
    pub fn fail_on(&self, kind: LinkKind, row: usize) {
        self.failing_rows.lock().push((kind, row));
    }

    /// Detector calls made so far, in call order.
    pub fn calls(&self) -> Vec<(LinkKind, usize)> {
        self.calls.lock().clone()
    }

    pub fn calls_for(&self, kind: LinkKind) -> usize {
        self.calls.lock().iter().filter(|(k, _)| *k == kind).count()
    }

    pub fn reset_calls(&self) {
        self.calls.lock().clear();
    }

    /// Detector set with one fixture detector per kind.
    pub fn detectors(self: &Arc<Self>) -> DetectorSet {
        LinkKind::ALL
            .into_iter()
            .fold(DetectorSet::new(), |set, kind| {
                set.with_detector(
                    kind,
                    Arc::new(FixtureDetector {
                        kind,
                        store: Arc::clone(self),
                    }),
                )
            })
    }
}

struct FixtureDetector {
    kind: LinkKind,
    store: Arc<FixtureLinks>,
}

#[async_trait]
impl LinkDetector for FixtureDetector {
    async fn detect(&self, row: usize) -> Result<Option<Vec<Link>>, DetectError> {
        self.store.calls.lock().push((self.kind, row));
        if self.store.failing_rows.lock().contains(&(self.kind, row)) {
            return Err(DetectError::Failed(format!("fixture failure on row {row}")));
        }
        Ok(self.store.rows.lock().get(&(self.kind, row)).cloned())
    }
}

/// Manager over an 80x30 fixture buffer with fixture detectors for every kind.
pub fn fixture_manager() -> (Arc<LinkManager>, Arc<FixtureBuffer>, Arc<FixtureLinks>) {
    let buffer = FixtureBuffer::new(ROWS);
    let links = FixtureLinks::new();
    let manager = Arc::new(LinkManager::new(buffer.clone(), links.detectors()));
    (manager, buffer, links)
}

pub fn texts(links: &[Link]) -> Vec<&str> {
    links.iter().map(Link::text).collect()
}
