// SPDX-License-Identifier: PMPL-1.0-or-later

//! The fixed set of languages an application offers.

use crate::error::ConfigError;
use crate::types::Language;
use icu::locale::subtags::Language as LanguageSubtag;

/// Ordered list of selectable languages plus the one used when nothing
/// else applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageCatalog {
    languages: Vec<Language>,
    default_code: String,
}

impl LanguageCatalog {
    /// Builds a catalog. Fails on an empty list, a code that is not a
    /// canonical language subtag, duplicate codes, or a default code that is
    /// not in the list.
    pub fn new(languages: Vec<Language>, default_code: &str) -> Result<Self, ConfigError> {
        if languages.is_empty() {
            return Err(ConfigError::Invalid("language catalog is empty".to_string()));
        }
        for (index, language) in languages.iter().enumerate() {
            if languages[..index].iter().any(|l| l.code == language.code) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate language code in catalog: {}",
                    language.code
                )));
            }
            if !is_language_subtag(&language.code) {
                return Err(ConfigError::Invalid(format!(
                    "not a lowercase language subtag: {:?}",
                    language.code
                )));
            }
        }
        if !languages.iter().any(|l| l.code == default_code) {
            return Err(ConfigError::Invalid(format!(
                "default language {default_code} is not in the catalog"
            )));
        }
        Ok(Self {
            languages,
            default_code: default_code.to_string(),
        })
    }

    pub fn find(&self, code: &str) -> Option<&Language> {
        self.languages.iter().find(|l| l.code == code)
    }

    pub fn default_language(&self) -> &Language {
        // `new` guarantees the default code is present.
        self.find(&self.default_code)
            .unwrap_or(&self.languages[0])
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

impl Default for LanguageCatalog {
    fn default() -> Self {
        Self {
            languages: default_languages(),
            default_code: "en".to_string(),
        }
    }
}

/// Languages shipped with the component library's demo content.
pub fn default_languages() -> Vec<Language> {
    vec![
        Language::new("en", "English", "🇺🇸", "US"),
        Language::new("th", "ไทย", "🇹🇭", "TH"),
        Language::new("ja", "日本語", "🇯🇵", "JP"),
        Language::new("zh", "中文", "🇨🇳", "CN"),
        Language::new("fr", "Français", "🇫🇷", "FR"),
        Language::new("de", "Deutsch", "🇩🇪", "DE"),
        Language::new("es", "Español", "🇪🇸", "ES"),
    ]
}

/// Whether `code` is a BCP 47 language subtag in canonical lowercase form
/// (`"en"`, `"fil"`), the shape stored and handed to the locale formatters.
pub fn is_language_subtag(code: &str) -> bool {
    code.parse::<LanguageSubtag>()
        .is_ok_and(|subtag| subtag.as_str() == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_is_valid() {
        let catalog = LanguageCatalog::default();
        let rebuilt = LanguageCatalog::new(catalog.languages().to_vec(), "en").expect("valid");
        assert_eq!(catalog, rebuilt);
        assert_eq!(catalog.default_language().code, "en");
        assert!(catalog.languages().iter().all(|l| is_language_subtag(&l.code)));
    }

    #[test]
    fn rejects_bad_catalogs() {
        assert!(LanguageCatalog::new(Vec::new(), "en").is_err());
        let dupes = vec![
            Language::new("en", "English", "", ""),
            Language::new("en", "English again", "", ""),
        ];
        assert!(LanguageCatalog::new(dupes, "en").is_err());
        let no_default = vec![Language::new("th", "ไทย", "", "")];
        assert!(LanguageCatalog::new(no_default, "en").is_err());
        for code in ["EN", "en-US", "e", ""] {
            let odd = vec![Language::new(code, "Odd", "", "")];
            assert!(
                matches!(LanguageCatalog::new(odd, code), Err(ConfigError::Invalid(_))),
                "{code:?} accepted"
            );
        }
    }

    #[test]
    fn language_subtags() {
        assert!(is_language_subtag("th"));
        assert!(is_language_subtag("fil"));
        assert!(!is_language_subtag("EN"));
        assert!(!is_language_subtag("th_TH"));
        assert!(!is_language_subtag("1a"));
        assert!(!is_language_subtag(""));
    }
}
