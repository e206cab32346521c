// SPDX-License-Identifier: PMPL-1.0-or-later

//! Console rendering of coverage reports

use super::CoverageReport;
use colored::*;

/// Keys listed per language before the rest are summarised.
const MAX_LISTED_KEYS: usize = 20;

pub struct ReportFormatter;

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Renders the report as terminal text. Colour follows `colored`'s
    /// global switch, so callers can disable it for non-TTY output.
    pub fn render(&self, report: &CoverageReport) -> String {
        let mut lines = Vec::new();
        lines.push(format!("{}", "=== TRANSLATION COVERAGE ===".bold().cyan()));
        lines.push(format!(
            "  Reference: {} ({} keys)",
            report.reference.bold(),
            report.reference_keys
        ));

        if report.languages.is_empty() {
            lines.push(format!("  {}", "No other languages to compare".yellow()));
            return lines.join("\n");
        }

        for lang in &report.languages {
            lines.push(String::new());
            let percent = format!("{:.1}%", lang.coverage_percent);
            let percent = if lang.missing.is_empty() {
                percent.green()
            } else if lang.coverage_percent >= 80.0 {
                percent.yellow()
            } else {
                percent.red()
            };
            lines.push(format!(
                "  {} {} ({}/{})",
                lang.code.bold(),
                percent,
                lang.translated,
                report.reference_keys
            ));

            for key in lang.missing.iter().take(MAX_LISTED_KEYS) {
                lines.push(format!("    {} {}", "missing".red(), key));
            }
            if lang.missing.len() > MAX_LISTED_KEYS {
                lines.push(format!(
                    "    ... and {} more missing",
                    lang.missing.len() - MAX_LISTED_KEYS
                ));
            }
            for key in lang.extra.iter().take(MAX_LISTED_KEYS) {
                lines.push(format!("    {} {}", "extra".dimmed(), key));
            }
            if lang.extra.len() > MAX_LISTED_KEYS {
                lines.push(format!(
                    "    ... and {} more extra",
                    lang.extra.len() - MAX_LISTED_KEYS
                ));
            }
        }

        lines.push(String::new());
        if report.is_complete() {
            lines.push(format!("{}", "All languages fully translated".green()));
        } else {
            lines.push(format!("{}", "Some keys fall back or show raw".yellow()));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::LanguageCoverage;

    #[test]
    fn lists_missing_keys_and_truncates() {
        colored::control::set_override(false);
        let missing: Vec<String> = (0..25).map(|i| format!("key.{i}")).collect();
        let report = CoverageReport {
            reference: "en".to_string(),
            reference_keys: 30,
            languages: vec![LanguageCoverage {
                code: "th".to_string(),
                translated: 5,
                missing,
                extra: vec!["only.th".to_string()],
                coverage_percent: 5.0 / 30.0 * 100.0,
            }],
        };
        let text = ReportFormatter::new().render(&report);
        assert!(text.contains("th 16.7% (5/30)"));
        assert!(text.contains("missing key.0"));
        assert!(!text.contains("missing key.24"));
        assert!(text.contains("... and 5 more missing"));
        assert!(text.contains("extra only.th"));
    }
}
