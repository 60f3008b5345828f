//! Page concatenation.
//!
//! The first appended document becomes the base. Every later document is
//! renumbered past the base's highest object id, its objects are moved in,
//! and its pages are hung off the base page tree in their original order.

use lopdf::{Document, Object, ObjectId};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::error::{LectureKitError, Result};
use crate::io::LoadedPdf;
use crate::utils::format_file_size;

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Bounds the parent walk on malformed, cyclic page trees.
const MAX_TREE_DEPTH: usize = 64;

/// Statistics about a merge operation.
#[derive(Debug, Clone)]
pub struct MergeStatistics {
    /// Number of PDFs merged.
    pub files_merged: usize,

    /// Total number of pages in merged document.
    pub total_pages: usize,

    /// Time spent appending documents.
    pub merge_time: Duration,

    /// Total size of input files.
    pub input_size: u64,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }
}

/// Accumulates documents into one, in the order they are appended.
pub struct DocumentMerger {
    merged: Option<Document>,
    max_id: u32,
    files: Vec<PathBuf>,
    total_pages: usize,
    input_size: u64,
    started: Instant,
}

impl DocumentMerger {
    /// Create an empty merger.
    pub fn new() -> Self {
        Self {
            merged: None,
            max_id: 0,
            files: Vec::new(),
            total_pages: 0,
            input_size: 0,
            started: Instant::now(),
        }
    }

    /// Whether nothing has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.merged.is_none()
    }

    /// Paths of the appended files, in append order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Append every page of `loaded` after the pages appended so far.
    ///
    /// # Errors
    ///
    /// Returns an error if either page tree is malformed.
    pub fn append(&mut self, loaded: LoadedPdf) -> Result<()> {
        let LoadedPdf {
            mut document,
            path,
            page_count,
            file_size,
        } = loaded;

        match self.merged.as_mut() {
            None => {
                self.max_id = document.max_id;
                self.merged = Some(document);
            }
            Some(merged) => {
                document.renumber_objects_with(self.max_id + 1);
                self.max_id = document.max_id;

                let page_ids: Vec<ObjectId> = document.get_pages().into_values().collect();
                for &page_id in &page_ids {
                    flatten_inherited(&mut document, page_id)?;
                }

                merged.objects.extend(document.objects);
                attach_pages(merged, &page_ids)?;
            }
        }

        debug!(file = %path.display(), pages = page_count, "appended document");

        self.files.push(path);
        self.total_pages += page_count;
        self.input_size += file_size;
        Ok(())
    }

    /// Finish the merge and hand back the combined document.
    ///
    /// Objects only reachable from the appended documents' own catalogs are
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns [`LectureKitError::NoFilesToMerge`] if nothing was appended.
    pub fn finish(self) -> Result<(Document, MergeStatistics)> {
        let mut merged = self.merged.ok_or(LectureKitError::NoFilesToMerge)?;
        merged.max_id = merged.max_id.max(self.max_id);
        merged.prune_objects();

        let statistics = MergeStatistics {
            files_merged: self.files.len(),
            total_pages: self.total_pages,
            merge_time: self.started.elapsed(),
            input_size: self.input_size,
        };

        Ok((merged, statistics))
    }
}

impl Default for DocumentMerger {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy inheritable attributes from the page's ancestors onto the page, so
/// it renders the same once it is moved under a different parent.
fn flatten_inherited(doc: &mut Document, page_id: ObjectId) -> Result<()> {
    let page = doc.get_dictionary(page_id)?;
    let mut missing: Vec<&[u8]> = INHERITABLE
        .iter()
        .copied()
        .filter(|key| !page.has(key))
        .collect();
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    let mut inherited = Vec::new();

    for _ in 0..MAX_TREE_DEPTH {
        let Some(node_id) = parent else { break };
        if missing.is_empty() {
            break;
        }

        let node = doc.get_dictionary(node_id)?;
        missing.retain(|key| match node.get(key) {
            Ok(value) => {
                inherited.push((key.to_vec(), value.clone()));
                false
            }
            Err(_) => true,
        });
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    if !inherited.is_empty() {
        let page = doc.get_dictionary_mut(page_id)?;
        for (key, value) in inherited {
            page.set(key, value);
        }
    }

    Ok(())
}

/// Append `page_ids` to the root `Kids` array and point each page at the root.
fn attach_pages(merged: &mut Document, page_ids: &[ObjectId]) -> Result<()> {
    let pages_id = merged
        .catalog_mut()
        .map_err(|e| LectureKitError::merge_failed(format!("Failed to get catalog: {e}")))?
        .get(b"Pages")
        .and_then(Object::as_reference)
        .map_err(|e| {
            LectureKitError::merge_failed(format!("Failed to get pages reference: {e}"))
        })?;

    let pages = merged
        .get_dictionary_mut(pages_id)
        .map_err(|e| LectureKitError::merge_failed(format!("Failed to get pages object: {e}")))?;

    let Ok(Object::Array(kids)) = pages.get_mut(b"Kids") else {
        return Err(LectureKitError::merge_failed(
            "Pages dictionary missing Kids array",
        ));
    };
    kids.extend(page_ids.iter().map(|&id| Object::Reference(id)));

    let current_count = pages.get(b"Count").and_then(Object::as_i64).unwrap_or(0);
    pages.set("Count", Object::Integer(current_count + page_ids.len() as i64));

    for &page_id in page_ids {
        merged
            .get_dictionary_mut(page_id)
            .map_err(|e| LectureKitError::merge_failed(format!("Failed to get page: {e}")))?
            .set("Parent", Object::Reference(pages_id));
    }

    Ok(())
}
