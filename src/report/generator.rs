// SPDX-License-Identifier: PMPL-1.0-or-later

//! Coverage computation.

use super::{CoverageReport, LanguageCoverage};
use crate::resolve::lookup;
use crate::types::{TranslatedContent, TranslationData};

pub struct CoverageGenerator {
    reference: String,
}

impl CoverageGenerator {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }

    pub fn generate(&self, content: &TranslatedContent) -> CoverageReport {
        let empty = TranslationData::new();
        let reference_data = content.language(&self.reference).unwrap_or(&empty);
        let reference_keys = reference_data.leaf_keys();

        let languages = content
            .codes()
            .filter(|code| *code != self.reference)
            .filter_map(|code| content.language(code).map(|data| (code, data)))
            .map(|(code, data)| self.measure(code, data, reference_data, &reference_keys))
            .collect();

        CoverageReport {
            reference: self.reference.clone(),
            reference_keys: reference_keys.len(),
            languages,
        }
    }

    fn measure(
        &self,
        code: &str,
        data: &TranslationData,
        reference: &TranslationData,
        reference_keys: &[String],
    ) -> LanguageCoverage {
        let missing: Vec<String> = reference_keys
            .iter()
            .filter(|key| lookup(data, key).is_none())
            .cloned()
            .collect();
        let extra: Vec<String> = data
            .leaf_keys()
            .into_iter()
            .filter(|key| lookup(reference, key).is_none())
            .collect();
        let translated = reference_keys.len() - missing.len();
        let coverage_percent = if reference_keys.is_empty() {
            100.0
        } else {
            translated as f64 / reference_keys.len() as f64 * 100.0
        };

        LanguageCoverage {
            code: code.to_string(),
            translated,
            missing,
            extra,
            coverage_percent,
        }
    }
}
