//! Synthetic PDFs for unit tests.
//!
//! Every page carries a `LkLabel` string entry so tests can check which
//! source pages ended up in a merged document, and in which order.

use lopdf::{Document, Object, dictionary};
use std::path::Path;

pub(crate) fn labeled_document(labels: &[&str]) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = labels
        .iter()
        .map(|label| {
            let page = dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
                "LkLabel" => Object::string_literal(*label),
            };
            doc.add_object(page).into()
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

    doc
}

pub(crate) fn write_labeled_pdf(path: &Path, labels: &[&str]) {
    labeled_document(labels).save(path).unwrap();
}

pub(crate) fn labels_of(doc: &Document) -> Vec<String> {
    doc.get_pages()
        .into_values()
        .map(|page_id| {
            let page = doc.get_object(page_id).unwrap().as_dict().unwrap();
            let label = page.get(b"LkLabel").unwrap().as_str().unwrap();
            String::from_utf8_lossy(label).into_owned()
        })
        .collect()
}

pub(crate) fn read_labels(path: &Path) -> Vec<String> {
    labels_of(&Document::load(path).unwrap())
}
