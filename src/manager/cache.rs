//! Memoized snapshot keyed by buffer generation.

use crate::buffer::ScanRange;
use crate::link::LinkSnapshot;

/// Identifies the buffer state and manager settings a snapshot was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SnapshotKey {
    /// Buffer content generation
    pub generation: u64,
    pub range: ScanRange,
    /// Bumped whenever detectors or config change
    pub epoch: u64,
}

/// Holds at most one snapshot: the last full scan.
#[derive(Debug, Default)]
pub(crate) struct SnapshotCache {
    entry: Option<(SnapshotKey, LinkSnapshot)>,
}

impl SnapshotCache {
    pub fn get(&self, key: &SnapshotKey) -> Option<&LinkSnapshot> {
        match &self.entry {
            Some((cached, snapshot)) if cached == key => Some(snapshot),
            _ => None,
        }
    }

    pub fn store(&mut self, key: SnapshotKey, snapshot: LinkSnapshot) {
        self.entry = Some((key, snapshot));
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(generation: u64) -> SnapshotKey {
        SnapshotKey {
            generation,
            range: ScanRange::new(0, 10),
            epoch: 0,
        }
    }

    #[test]
    fn test_hit_requires_matching_key() {
        let mut cache = SnapshotCache::default();
        assert!(cache.get(&key(1)).is_none());

        cache.store(key(1), LinkSnapshot::new());
        assert!(cache.get(&key(1)).is_some());
        assert!(cache.get(&key(2)).is_none());

        let moved = SnapshotKey {
            range: ScanRange::new(1, 11),
            ..key(1)
        };
        assert!(cache.get(&moved).is_none());

        let reconfigured = SnapshotKey { epoch: 1, ..key(1) };
        assert!(cache.get(&reconfigured).is_none());

        cache.clear();
        assert!(cache.get(&key(1)).is_none());
    }
}
