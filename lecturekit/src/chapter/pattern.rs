//! Filename pattern matching.
//!
//! A [`PatternSet`] is an ordered list of compiled [`ChapterPattern`]s.
//! Classification tries them in order and stops at the first match, so a
//! file is always counted under exactly one pattern.

use anyhow::{Context, bail};
use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::debug;

use crate::chapter::ChapterKey;
use crate::config::PatternSpec;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder regex is valid")
});

/// The outcome of classifying one file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterMatch {
    /// Chapter the file belongs to.
    pub key: ChapterKey,
    /// Rendered prefix, e.g. `"18 - Ch 6"`.
    pub prefix: String,
    /// Position of the matching pattern in its set; lower is stricter.
    pub rank: usize,
}

/// A compiled filename pattern.
#[derive(Debug, Clone)]
pub struct ChapterPattern {
    name: String,
    regex: Regex,
    prefix: String,
}

impl ChapterPattern {
    /// Compile a pattern specification.
    ///
    /// # Errors
    ///
    /// Returns an error if the regex is invalid, has no `chapter` named
    /// group, or the prefix refers to a group the regex does not define.
    pub fn compile(spec: &PatternSpec) -> anyhow::Result<Self> {
        let regex = Regex::new(&spec.regex)
            .with_context(|| format!("Pattern '{}' does not compile", spec.name))?;

        let groups: Vec<&str> = regex.capture_names().flatten().collect();
        if !groups.contains(&"chapter") {
            bail!(
                "Pattern '{}' must define a named group 'chapter', e.g. (?P<chapter>\\d+)",
                spec.name
            );
        }

        for placeholder in PLACEHOLDER.captures_iter(&spec.prefix) {
            let group = &placeholder[1];
            if !groups.contains(&group) {
                bail!(
                    "Prefix of pattern '{}' uses {{{group}}} but the regex has no such group",
                    spec.name
                );
            }
        }

        Ok(Self {
            name: spec.name.clone(),
            regex,
            prefix: spec.prefix.clone(),
        })
    }

    /// Pattern name.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn capture(&self, file_name: &str) -> Option<(ChapterKey, String)> {
        let caps = self.regex.captures(file_name)?;
        let chapter = caps.name("chapter")?.as_str();
        Some((ChapterKey::new(chapter), self.render_prefix(&caps)))
    }

    fn render_prefix(&self, caps: &Captures<'_>) -> String {
        PLACEHOLDER
            .replace_all(&self.prefix, |placeholder: &Captures<'_>| {
                caps.name(&placeholder[1])
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default()
            })
            .into_owned()
    }
}

/// An ordered list of patterns.
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<ChapterPattern>,
}

impl PatternSet {
    /// Compile every specification, keeping their order.
    pub fn compile(specs: &[PatternSpec]) -> anyhow::Result<Self> {
        if specs.is_empty() {
            bail!("At least one chapter pattern is required");
        }

        let patterns = specs
            .iter()
            .map(ChapterPattern::compile)
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Classify a file name. The first pattern that matches wins.
    pub fn classify(&self, file_name: &str) -> Option<ChapterMatch> {
        self.patterns
            .iter()
            .enumerate()
            .find_map(|(rank, pattern)| {
                pattern.capture(file_name).map(|(key, prefix)| {
                    debug!(file = file_name, pattern = pattern.name(), chapter = %key, "classified");
                    ChapterMatch { key, prefix, rank }
                })
            })
    }

    /// Number of patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the set is empty (never true for a compiled set).
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Iterate over the patterns in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &ChapterPattern> {
        self.patterns.iter()
    }
}
