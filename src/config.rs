// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the embedding application and the CLI.
//!
//! ```yaml
//! default_language: th
//! fallback_language: en
//! content: ./locales
//! storage_path: /var/lib/mies/preferences.json
//! log_filter: info
//! languages:
//!   - { code: en, label: English, flag: "🇺🇸", countryCode: US }
//!   - { code: th, label: ไทย, flag: "🇹🇭", countryCode: TH }
//! ```
//!
//! Every field is optional. A missing `languages` list means the built-in
//! catalog.

use crate::error::ConfigError;
use crate::language::{default_languages, LanguageCatalog};
use crate::resolve::DEFAULT_FALLBACK;
use crate::storage::FilePreferenceStore;
use crate::types::Language;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV: &str = "MIES_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MiesConfig {
    pub default_language: String,
    pub fallback_language: String,
    /// Translation file or directory.
    pub content: Option<PathBuf>,
    /// Preference file; defaults to [`FilePreferenceStore::default_path`].
    pub storage_path: Option<PathBuf>,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
    pub languages: Vec<Language>,
}

impl Default for MiesConfig {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
            fallback_language: DEFAULT_FALLBACK.to_string(),
            content: None,
            storage_path: None,
            log_filter: "warn".to_string(),
            languages: default_languages(),
        }
    }
}

impl MiesConfig {
    /// Reads a YAML or JSON config file, chosen by extension (YAML when the
    /// extension is anything else).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let parsed: Result<Self, String> = if is_json {
            serde_json::from_str(&raw).map_err(|err| err.to_string())
        } else {
            serde_yaml::from_str(&raw).map_err(|err| err.to_string())
        };
        let config = parsed.map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `explicit` if given, else the file named by [`CONFIG_ENV`],
    /// else defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Self::load(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.catalog()?;
        if self.fallback_language.trim().is_empty() {
            return Err(ConfigError::Invalid("fallback_language is empty".to_string()));
        }
        Ok(())
    }

    pub fn catalog(&self) -> Result<LanguageCatalog, ConfigError> {
        LanguageCatalog::new(self.languages.clone(), &self.default_language)
    }

    pub fn preference_store(&self) -> FilePreferenceStore {
        FilePreferenceStore::new(
            self.storage_path
                .clone()
                .unwrap_or_else(FilePreferenceStore::default_path),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_are_consistent() {
        let config = MiesConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.catalog().expect("catalog").default_language().code, "en");
    }

    #[test]
    fn loads_partial_yaml() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("mies.yaml");
        fs::write(
            &path,
            "default_language: th\nlanguages:\n  - { code: en, label: English, countryCode: US }\n  - { code: th, label: ไทย, countryCode: TH }\n",
        )
        .expect("write");

        let config = MiesConfig::load(&path).expect("load");
        assert_eq!(config.default_language, "th");
        assert_eq!(config.fallback_language, "en");
        assert_eq!(config.languages.len(), 2);
        assert_eq!(config.languages[1].country_code, "TH");
    }

    #[test]
    fn loads_json() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("mies.json");
        fs::write(&path, r#"{"log_filter": "debug", "storage_path": "prefs.json"}"#).expect("write");
        let config = MiesConfig::load(&path).expect("load");
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.preference_store().path(), Path::new("prefs.json"));
    }

    #[test]
    fn rejects_default_outside_catalog() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("mies.yaml");
        fs::write(&path, "default_language: ko\n").expect("write");
        assert!(matches!(MiesConfig::load(&path), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_unknown_fields() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("mies.yaml");
        fs::write(&path, "defualt_language: en\n").expect("write");
        assert!(matches!(MiesConfig::load(&path), Err(ConfigError::Parse { .. })));
    }
}
