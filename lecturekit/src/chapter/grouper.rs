//! Partitioning scanned files into chapter groups.

use std::collections::BTreeMap;

use crate::chapter::{ChapterKey, PatternSet};
use crate::config::ChapterOrder;
use crate::scan::FileEntry;

/// Files sharing one chapter key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterGroup {
    /// Chapter key.
    pub key: ChapterKey,
    /// Prefix from the strictest pattern that matched a file of this group.
    pub prefix: String,
    /// Files in ascending file name order.
    pub files: Vec<FileEntry>,
}

/// The full partition of a directory listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChapterPlan {
    /// Groups in processing order.
    pub groups: Vec<ChapterGroup>,
    /// Files that matched no pattern, in file name order.
    pub unmatched: Vec<FileEntry>,
}

impl ChapterPlan {
    /// Total number of files placed in a group.
    pub fn grouped_files(&self) -> usize {
        self.groups.iter().map(|group| group.files.len()).sum()
    }
}

struct GroupBuilder {
    prefix: String,
    rank: usize,
    files: Vec<FileEntry>,
}

/// Partition `entries` into chapter groups.
///
/// Every entry ends up in exactly one group or in `unmatched`. Entries are
/// visited in file name order, which makes both the within-group order and
/// the "first seen" prefix choice independent of how the directory was
/// listed. A looser pattern never replaces a prefix recorded by a stricter
/// one; a stricter pattern always does.
pub fn group_by_chapter(
    mut entries: Vec<FileEntry>,
    patterns: &PatternSet,
    order: ChapterOrder,
) -> ChapterPlan {
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    let mut builders: BTreeMap<ChapterKey, GroupBuilder> = BTreeMap::new();
    let mut unmatched = Vec::new();

    for entry in entries {
        let Some(found) = patterns.classify(&entry.name) else {
            unmatched.push(entry);
            continue;
        };

        match builders.get_mut(&found.key) {
            Some(builder) => {
                if found.rank < builder.rank {
                    builder.prefix = found.prefix;
                    builder.rank = found.rank;
                }
                builder.files.push(entry);
            }
            None => {
                builders.insert(
                    found.key,
                    GroupBuilder {
                        prefix: found.prefix,
                        rank: found.rank,
                        files: vec![entry],
                    },
                );
            }
        }
    }

    let mut groups: Vec<ChapterGroup> = builders
        .into_iter()
        .map(|(key, builder)| ChapterGroup {
            key,
            prefix: builder.prefix,
            files: builder.files,
        })
        .collect();

    groups.sort_by(|a, b| order.compare(&a.key, &b.key));

    ChapterPlan { groups, unmatched }
}
