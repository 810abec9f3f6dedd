//! Link value types: kinds, buffer coordinates, links and snapshots.

use crate::error::ActivationError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Category of a detected link.
///
/// Each detector produces links of exactly one kind, and each kind has its own
/// partition in a [`LinkSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// Generic clickable token (a word under the cursor, a symbol name, ...)
    Word,
    /// Web URL
    Web,
    /// File path, optionally with a line/column suffix
    File,
}

impl LinkKind {
    /// All kinds, in snapshot field order.
    pub const ALL: [LinkKind; 3] = [LinkKind::Word, LinkKind::Web, LinkKind::File];

    /// Lowercase identifier used in config files and command arguments.
    pub fn as_str(self) -> &'static str {
        match self {
            LinkKind::Word => "word",
            LinkKind::Web => "web",
            LinkKind::File => "file",
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinkKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "word" => Ok(LinkKind::Word),
            "web" => Ok(LinkKind::Web),
            "file" => Ok(LinkKind::File),
            other => Err(format!("Unknown link kind: {other}")),
        }
    }
}

/// A cell position in buffer coordinates (1-based column `x`, 1-based row `y`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferPoint {
    /// Column, 1-based
    pub x: usize,
    /// Row, 1-based
    pub y: usize,
}

impl BufferPoint {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Rectangular text span covered by a link. `end` is inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferRange {
    pub start: BufferPoint,
    pub end: BufferPoint,
}

impl BufferRange {
    pub fn new(start: BufferPoint, end: BufferPoint) -> Self {
        Self { start, end }
    }

    /// Span on a single row from column `start_x` to `end_x`.
    pub fn on_row(y: usize, start_x: usize, end_x: usize) -> Self {
        Self {
            start: BufferPoint::new(start_x, y),
            end: BufferPoint::new(end_x, y),
        }
    }

    /// Whether the span crosses a row boundary (wrapped line).
    pub fn is_multiline(&self) -> bool {
        self.start.y != self.end.y
    }
}

/// The effect performed when a link is opened.
///
/// Implementations open a file in an editor, hand a URL to the browser, run a
/// search for a word, and so on. Activation may suspend and may fail; callers
/// can invoke it more than once.
#[async_trait]
pub trait LinkAction: Send + Sync {
    /// Perform the link's effect for the matched `text`.
    async fn activate(&self, text: &str) -> Result<(), ActivationError>;
}

/// An activatable link found in the terminal buffer.
///
/// Links are immutable once produced by a detector. Cloning is cheap; clones
/// share the same action.
#[derive(Clone)]
pub struct Link {
    range: BufferRange,
    text: String,
    action: Arc<dyn LinkAction>,
}

impl Link {
    pub fn new(range: BufferRange, text: impl Into<String>, action: Arc<dyn LinkAction>) -> Self {
        Self {
            range,
            text: text.into(),
            action,
        }
    }

    pub fn range(&self) -> BufferRange {
        self.range
    }

    /// The literal matched text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Run this link's action.
    pub async fn activate(&self) -> Result<(), ActivationError> {
        self.action.activate(&self.text).await
    }

    /// Whether `a` and `b` are the same detected link: equal span and text,
    /// and sharing one action instance.
    pub fn same_link(a: &Link, b: &Link) -> bool {
        a == b && Arc::ptr_eq(&a.action, &b.action)
    }
}

impl PartialEq for Link {
    fn eq(&self, other: &Self) -> bool {
        self.range == other.range && self.text == other.text
    }
}

impl Eq for Link {}

impl fmt::Debug for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Link")
            .field("range", &self.range)
            .field("text", &self.text)
            .finish_non_exhaustive()
    }
}

/// All links found across a scan, partitioned by kind.
///
/// Each sequence is in recency order: links from later rows come first, and
/// links from the same row keep the order their detector reported them in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSnapshot {
    pub word_links: Vec<Link>,
    pub web_links: Vec<Link>,
    pub file_links: Vec<Link>,
}

impl LinkSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// The ordered links of one kind.
    pub fn links(&self, kind: LinkKind) -> &[Link] {
        match kind {
            LinkKind::Word => &self.word_links,
            LinkKind::Web => &self.web_links,
            LinkKind::File => &self.file_links,
        }
    }

    /// The most recent link of `kind`, if any.
    pub fn most_recent(&self, kind: LinkKind) -> Option<&Link> {
        self.links(kind).first()
    }

    /// Total number of links across all kinds.
    pub fn len(&self) -> usize {
        self.word_links.len() + self.web_links.len() + self.file_links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn extend(&mut self, kind: LinkKind, links: impl IntoIterator<Item = Link>) {
        let target = match kind {
            LinkKind::Word => &mut self.word_links,
            LinkKind::Web => &mut self.web_links,
            LinkKind::File => &mut self.file_links,
        };
        target.extend(links);
    }

    /// Move all of `other`'s links after this snapshot's, kind by kind.
    pub(crate) fn append(&mut self, other: LinkSnapshot) {
        self.extend(LinkKind::Word, other.word_links);
        self.extend(LinkKind::Web, other.web_links);
        self.extend(LinkKind::File, other.file_links);
    }
}
