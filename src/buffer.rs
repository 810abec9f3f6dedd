//! Read-only view of the terminal buffer being scanned for links.

use crate::config::ScanScope;

/// The portion of terminal state the link manager needs to plan a scan.
///
/// Implemented by the terminal view that owns the buffer. Row indices are
/// 0-based buffer lines: 0 is the oldest scrollback line and `length() - 1` is
/// the bottom row of the screen.
pub trait LinkBuffer: Send + Sync {
    /// Total number of lines (scrollback plus screen).
    fn length(&self) -> usize;

    /// Buffer line shown at the top of the viewport.
    fn viewport_top(&self) -> usize;

    /// Content generation counter, bumped on every buffer mutation.
    ///
    /// Returning `None` disables snapshot memoization for this buffer.
    fn generation(&self) -> Option<u64> {
        None
    }
}

/// Half-open interval `[top, bottom)` of buffer rows covered by one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanRange {
    top: usize,
    bottom: usize,
}

impl ScanRange {
    pub fn new(top: usize, bottom: usize) -> Self {
        Self {
            top: top.min(bottom),
            bottom,
        }
    }

    /// Compute the rows to scan from the buffer's current state.
    ///
    /// `Viewport` scans from the viewport's top row to the end of the buffer;
    /// `Scrollback` scans the whole buffer. Both are capped to the last
    /// `max_rows` lines.
    pub fn resolve(buffer: &dyn LinkBuffer, scope: ScanScope, max_rows: usize) -> Self {
        let bottom = buffer.length();
        let floor = bottom.saturating_sub(max_rows);
        let top = match scope {
            ScanScope::Viewport => buffer.viewport_top().max(floor),
            ScanScope::Scrollback => floor,
        };
        Self::new(top, bottom)
    }

    /// First row scanned from the top (inclusive).
    pub fn top(&self) -> usize {
        self.top
    }

    /// One past the bottom-most row.
    pub fn bottom(&self) -> usize {
        self.bottom
    }

    pub fn len(&self) -> usize {
        self.bottom.saturating_sub(self.top)
    }

    pub fn is_empty(&self) -> bool {
        self.top == self.bottom
    }

    pub fn contains(&self, row: usize) -> bool {
        row >= self.top && row < self.bottom
    }

    /// Rows in recency order: bottom-most first.
    pub fn rows_recent_first(&self) -> impl Iterator<Item = usize> + use<> {
        (self.top..self.bottom).rev()
    }
}
