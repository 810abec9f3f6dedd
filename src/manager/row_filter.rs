//! Per-row cleanup applied to detector output before merging.

use crate::config::WordLinkConfig;
use crate::link::{Link, LinkKind};
use std::collections::HashSet;

/// Filter one row's links of `kind`.
///
/// Word links shorter than `min_length` characters are dropped, and with
/// `dedupe_within_row` only the first link for each text is kept. Web and file
/// links pass through untouched. Order is preserved.
pub(crate) fn filter_row(
    kind: LinkKind,
    mut links: Vec<Link>,
    words: &WordLinkConfig,
) -> Vec<Link> {
    if kind != LinkKind::Word {
        return links;
    }

    let mut seen: HashSet<String> = HashSet::new();
    links.retain(|link| {
        if link.text().chars().count() < words.min_length {
            return false;
        }
        !words.dedupe_within_row || seen.insert(link.text().to_string())
    });
    links
}
