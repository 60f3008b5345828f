#![no_main]

use lecturekit::ChapterProfile;
use lecturekit::chapter::{NamingTemplate, PatternSet};
use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;

static PATTERNS: OnceLock<PatternSet> = OnceLock::new();

fn patterns() -> &'static PatternSet {
    PATTERNS.get_or_init(|| PatternSet::compile(&ChapterProfile::by_chapter("21").patterns).unwrap())
}

fuzz_target!(|data: &[u8]| {
    let s = std::str::from_utf8(data).unwrap_or("");

    // Any name either classifies to a non-empty chapter or to nothing.
    if let Some(found) = patterns().classify(s) {
        assert!(!found.key.as_str().is_empty());
    }

    // Arbitrary templates must parse or fail cleanly, and accepted ones
    // must never render a path separator.
    if let Ok(template) = NamingTemplate::parse(s)
        && let Some(found) = patterns().classify("18 - Ch 6 - 01. Intro.pdf")
    {
        let rendered = template.render("21", &found.key, &found.prefix);
        assert!(!rendered.contains('/'));
        assert!(template.output_matcher("21").is_ok());
    }
});
