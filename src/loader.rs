// SPDX-License-Identifier: PMPL-1.0-or-later

//! Loads [`TranslatedContent`] from JSON or YAML on disk.
//!
//! Two layouts are accepted:
//!
//! - one file holding every language: `{ "en": {...}, "th": {...} }`
//! - a directory of per-language files named by code: `en.json`, `th.yaml`
//!
//! In a directory, files with other extensions are skipped. Two files for the
//! same code (`en.json` and `en.yaml`) are merged, later names winning on
//! conflicting leaves.

use crate::error::LoadError;
use crate::types::{TranslatedContent, TranslationData};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(FileFormat::Json),
            "yaml" | "yml" => Some(FileFormat::Yaml),
            _ => None,
        }
    }
}

/// Loads a content file or a directory of per-language files.
pub fn load_path(path: &Path) -> Result<TranslatedContent, LoadError> {
    if path.is_dir() {
        load_dir(path)
    } else if path.is_file() {
        load_file(path)
    } else {
        Err(LoadError::NotFound(path.to_path_buf()))
    }
}

/// Loads one file containing every language.
pub fn load_file(path: &Path) -> Result<TranslatedContent, LoadError> {
    let format =
        FileFormat::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat(path.to_path_buf()))?;
    parse(path, format)
}

/// Loads a directory of `<code>.<ext>` files, one language each.
pub fn load_dir(dir: &Path) -> Result<TranslatedContent, LoadError> {
    let io_err = |source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(io_err)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    files.sort();

    let mut content = TranslatedContent::new();
    for file in files {
        let Some(format) = FileFormat::from_path(&file) else {
            tracing::debug!(path = %file.display(), "skipping non-translation file");
            continue;
        };
        let Some(code) = file.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        let data: TranslationData = parse(&file, format)?;
        tracing::debug!(code, keys = data.leaf_keys().len(), "loaded language file");
        content.insert(code, data);
    }
    Ok(content)
}

fn parse<T: DeserializeOwned>(path: &Path, format: FileFormat) -> Result<T, LoadError> {
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    match format {
        FileFormat::Json => serde_json::from_str(&raw).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        }),
        FileFormat::Yaml => serde_yaml::from_str(&raw).map_err(|source| LoadError::Yaml {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::resolve;
    use tempfile::TempDir;

    #[test]
    fn loads_single_json_file() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("content.json");
        fs::write(
            &path,
            r#"{"en": {"demo": {"lang": "Language"}}, "th": {"demo": {"lang": "ภาษา"}}}"#,
        )
        .expect("write");

        let content = load_path(&path).expect("load");
        assert_eq!(resolve("demo.lang", &content, "th", "en"), "ภาษา");
    }

    #[test]
    fn loads_directory_of_languages() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(dir.path().join("en.json"), r#"{"hero": {"title": "Welcome"}}"#).expect("write");
        fs::write(dir.path().join("th.yml"), "hero:\n  title: ยินดีต้อนรับ\n").expect("write");
        fs::write(dir.path().join("README.md"), "# notes").expect("write");

        let content = load_path(dir.path()).expect("load");
        assert_eq!(content.codes().collect::<Vec<_>>(), vec!["en", "th"]);
        assert_eq!(resolve("hero.title", &content, "th", "en"), "ยินดีต้อนรับ");
    }

    #[test]
    fn reports_bad_input() {
        let dir = TempDir::new().expect("tempdir");
        let bad = dir.path().join("content.json");
        fs::write(&bad, "{ nope").expect("write");
        assert!(matches!(load_path(&bad), Err(LoadError::Json { .. })));

        let txt = dir.path().join("content.txt");
        fs::write(&txt, "x").expect("write");
        assert!(matches!(load_path(&txt), Err(LoadError::UnsupportedFormat(_))));

        assert!(matches!(
            load_path(&dir.path().join("missing.json")),
            Err(LoadError::NotFound(_))
        ));
    }
}
