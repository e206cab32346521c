// SPDX-License-Identifier: PMPL-1.0-or-later

//! Translation coverage reports.
//!
//! Compares every language in a [`TranslatedContent`] against a reference
//! language (normally the fallback) and lists keys that would be served from
//! the fallback or shown raw, plus keys that exist only in the translation.

pub mod formatter;
pub mod generator;
pub mod output;

use crate::types::TranslatedContent;
use serde::{Deserialize, Serialize};

pub use formatter::ReportFormatter;
pub use generator::CoverageGenerator;
pub use output::ReportOutputFormat;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    /// Language every other language is measured against.
    pub reference: String,
    /// Leaf keys in the reference language.
    pub reference_keys: usize,
    pub languages: Vec<LanguageCoverage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageCoverage {
    pub code: String,
    /// Reference keys that resolve to text in this language.
    pub translated: usize,
    /// Reference keys with no text in this language.
    pub missing: Vec<String>,
    /// Keys with text here but not in the reference language.
    pub extra: Vec<String>,
    /// `translated / reference_keys * 100`, 100 when the reference is empty.
    pub coverage_percent: f64,
}

impl CoverageReport {
    pub fn is_complete(&self) -> bool {
        self.languages.iter().all(|lang| lang.missing.is_empty())
    }
}

/// Builds a coverage report against `reference`.
pub fn coverage(content: &TranslatedContent, reference: &str) -> CoverageReport {
    CoverageGenerator::new(reference).generate(content)
}
