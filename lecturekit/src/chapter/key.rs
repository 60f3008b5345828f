//! Chapter keys.

use serde::Serialize;
use std::fmt;

/// The chapter identifier captured from a file name.
///
/// Keys keep the digits exactly as written ("06" and "6" are different
/// keys). `Ord` is plain string order; numeric ordering is available through
/// [`ChapterOrder::Numeric`](crate::config::ChapterOrder::Numeric).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ChapterKey(String);

impl ChapterKey {
    /// Create a key from captured text.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as written in the file name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the key as a number, if it fits in a `u64`.
    pub fn number(&self) -> Option<u64> {
        self.0.parse().ok()
    }

    /// The key without leading zeros ("007" -> "7", "0" -> "0").
    pub(crate) fn significant_digits(&self) -> &str {
        let trimmed = self.0.trim_start_matches('0');
        if trimmed.is_empty() && !self.0.is_empty() {
            "0"
        } else {
            trimmed
        }
    }
}

impl fmt::Display for ChapterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
