//! Output file naming.
//!
//! Templates are plain text with three placeholders:
//!
//! - `{label}`: the run label (e.g. a course number)
//! - `{prefix}`: the group prefix recorded during classification
//! - `{chapter}`: the chapter key
//!
//! ```
//! use lecturekit::chapter::{ChapterKey, NamingTemplate};
//!
//! let template = NamingTemplate::parse("{label} - {prefix} - Lecture Notes.pdf").unwrap();
//! let name = template.render("21", &ChapterKey::new("6"), "18 - Ch 6");
//! assert_eq!(name, "21 - 18 - Ch 6 - Lecture Notes.pdf");
//! ```

use anyhow::bail;
use regex::Regex;

use crate::chapter::ChapterKey;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Literal(String),
    Label,
    Prefix,
    Chapter,
}

/// A parsed output naming template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingTemplate {
    parts: Vec<Part>,
}

impl NamingTemplate {
    /// Parse a template string.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A brace is unbalanced or a placeholder is unknown
    /// - The template has neither `{chapter}` nor `{prefix}` (every group
    ///   would be written to the same file)
    /// - The rendered name would contain a path separator
    /// - The template does not end in `.pdf`
    pub fn parse(template: &str) -> anyhow::Result<Self> {
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut rest = template;

        while let Some(open) = rest.find(['{', '}']) {
            if rest.as_bytes()[open] == b'}' {
                bail!("Unmatched '}}' in template");
            }

            literal.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                bail!("Unclosed '{{' in template");
            };

            let part = match &after[..close] {
                "label" => Part::Label,
                "prefix" => Part::Prefix,
                "chapter" => Part::Chapter,
                other => bail!(
                    "Unknown placeholder {{{other}}}; use {{label}}, {{prefix}} or {{chapter}}"
                ),
            };

            if !literal.is_empty() {
                parts.push(Part::Literal(std::mem::take(&mut literal)));
            }
            parts.push(part);
            rest = &after[close + 1..];
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            parts.push(Part::Literal(literal));
        }

        let template = Self { parts };

        if !template.has(&Part::Chapter) && !template.has(&Part::Prefix) {
            bail!("Template must contain {{chapter}} or {{prefix}}");
        }

        if template
            .literals()
            .any(|text| text.contains(['/', '\\']))
        {
            bail!("Template must be a file name, not a path");
        }

        let ends_with_pdf = matches!(
            template.parts.last(),
            Some(Part::Literal(text)) if text.to_lowercase().ends_with(".pdf")
        );
        if !ends_with_pdf {
            bail!("Template must end with .pdf");
        }

        Ok(template)
    }

    /// Whether the template refers to `{label}`.
    pub fn uses_label(&self) -> bool {
        self.has(&Part::Label)
    }

    /// Render the output file name for one chapter group.
    pub fn render(&self, label: &str, key: &ChapterKey, prefix: &str) -> String {
        self.parts
            .iter()
            .map(|part| match part {
                Part::Literal(text) => text.as_str(),
                Part::Label => label,
                Part::Prefix => prefix,
                Part::Chapter => key.as_str(),
            })
            .collect()
    }

    /// Build a matcher for every name this template can produce with `label`.
    ///
    /// Used to keep outputs of earlier runs out of the input set.
    pub fn output_matcher(&self, label: &str) -> Result<Regex, regex::Error> {
        let mut pattern = String::from("^");
        for part in &self.parts {
            match part {
                Part::Literal(text) => pattern.push_str(&regex::escape(text)),
                Part::Label => pattern.push_str(&regex::escape(label)),
                Part::Prefix | Part::Chapter => pattern.push_str(".+"),
            }
        }
        pattern.push('$');

        Regex::new(&pattern)
    }

    fn has(&self, wanted: &Part) -> bool {
        self.parts.iter().any(|part| part == wanted)
    }

    fn literals(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().filter_map(|part| match part {
            Part::Literal(text) => Some(text.as_str()),
            _ => None,
        })
    }
}
