//! Shared helpers for lecturekit integration tests.
//!
//! Fixtures are generated on the fly with lopdf. Each page carries a
//! `LkLabel` string so a test can tell which source pages ended up in a
//! merged output, and in which order.

use lopdf::{Document, Object, dictionary};
use std::path::Path;

/// Write a PDF to `path` with one page per label.
pub fn write_pdf(path: &Path, labels: &[&str]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = labels
        .iter()
        .map(|label| {
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "LkLabel" => Object::string_literal(*label),
            })
            .into()
        })
        .collect();

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc.save(path).expect("Failed to write fixture PDF");
}

/// Page labels of the PDF at `path`, in page order.
pub fn page_labels(path: &Path) -> Vec<String> {
    let doc = Document::load(path).expect("Failed to load merged PDF");
    doc.get_pages()
        .into_values()
        .map(|id| {
            let page = doc.get_dictionary(id).expect("page is a dictionary");
            let label = page
                .get(b"LkLabel")
                .and_then(Object::as_str)
                .expect("page has a label");
            String::from_utf8_lossy(label).into_owned()
        })
        .collect()
}

/// Sorted file names directly inside `dir`.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to list directory")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fixture_labels_survive_a_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fixture.pdf");
        write_pdf(&path, &["one", "two"]);

        assert_eq!(page_labels(&path), vec!["one", "two"]);
        assert_eq!(file_names(dir.path()), vec!["fixture.pdf"]);
    }
}
