//! Image ordering.
//!
//! Puzzle logs come in two naming conventions. The convention is decided once
//! per log from its first fragment and then applied to every fragment; a log
//! mixing both conventions will be mis-ordered for the minority subset.

/// How fragments of one log are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortStrategy {
    /// Names like `p-bbjb-bbbb.jpg`: order is the word after the last `-`.
    PositionEncoded,
    /// Order is the file name itself (`cuddly0.jpg`, `cuddly1.jpg`, ...).
    FilenameEncoded,
}

/// Length of the extension dropped from sort keys (`.jpg`, `.png`, ...).
const EXTENSION_LEN: usize = 4;

impl SortStrategy {
    /// Picks the strategy from a log's first fragment: if the text after the
    /// last `p-` has exactly two `-`-separated parts, names are position-encoded.
    pub fn detect(first: &str) -> Self {
        let tail = first.rsplit("p-").next().unwrap_or(first);
        if tail.split('-').count() == 2 {
            SortStrategy::PositionEncoded
        } else {
            SortStrategy::FilenameEncoded
        }
    }

    /// Sort key for one fragment.
    pub fn key<'a>(&self, fragment: &'a str) -> &'a str {
        let word = match self {
            SortStrategy::PositionEncoded => fragment.rsplit('-').next(),
            SortStrategy::FilenameEncoded => fragment.rsplit('/').next(),
        }
        .unwrap_or(fragment);
        strip_extension(word)
    }

    /// Stable sort by [`SortStrategy::key`].
    pub fn sort(&self, fragments: &mut [String]) {
        fragments.sort_by(|a, b| self.key(a).cmp(self.key(b)));
    }
}

/// Drops the last `EXTENSION_LEN` characters; shorter words give an empty key.
fn strip_extension(word: &str) -> &str {
    let keep = word.chars().count().saturating_sub(EXTENSION_LEN);
    match word.char_indices().nth(keep) {
        Some((end, _)) => &word[..end],
        None => word,
    }
}
