// SPDX-License-Identifier: PMPL-1.0-or-later

//! Translation files, config files and the coverage audit on real files.

use mies_i18n::config::MiesConfig;
use mies_i18n::error::{ConfigError, LoadError};
use mies_i18n::report::{self, ReportOutputFormat};
use mies_i18n::{loader, resolve};
use std::fs;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, body).expect("write fixture");
    path
}

#[test]
fn directory_of_mixed_formats_resolves() {
    let dir = TempDir::new().expect("tempdir");
    write(&dir, "en.json", r#"{ "demo": { "lang": "Language", "count": 3 } }"#);
    write(&dir, "th.yaml", "demo:\n  lang: ภาษา\n");
    write(&dir, "notes.txt", "ignored");

    let content = loader::load_path(dir.path()).expect("load directory");
    assert_eq!(resolve("demo.lang", &content, "th", "en"), "ภาษา");
    // Numbers are not display text.
    assert_eq!(resolve("demo.count", &content, "th", "en"), "demo.count");
}

#[test]
fn single_file_holds_every_language() {
    let dir = TempDir::new().expect("tempdir");
    let path = write(
        &dir,
        "content.yaml",
        "en:\n  nav:\n    home: Home\nja:\n  nav:\n    home: ホーム\n",
    );
    let content = loader::load_path(&path).expect("load file");
    assert_eq!(resolve("nav.home", &content, "ja", "en"), "ホーム");
    assert_eq!(content.codes().collect::<Vec<_>>(), vec!["en", "ja"]);
}

#[test]
fn numeric_yaml_keys_resolve_as_path_segments() {
    let dir = TempDir::new().expect("tempdir");
    let path = write(&dir, "content.yaml", "en:\n  steps:\n    1: First\n    2: Second\n  title: T\n");
    let content = loader::load_path(&path).expect("load file");
    assert_eq!(resolve("steps.1", &content, "en", "en"), "First");
    assert_eq!(resolve("steps.2", &content, "th", "en"), "Second");
    let en = content.language("en").expect("en");
    assert_eq!(en.leaf_keys(), vec!["steps.1", "steps.2", "title"]);
}

#[test]
fn load_errors_name_the_file() {
    let dir = TempDir::new().expect("tempdir");
    let missing = dir.path().join("absent.json");
    assert!(matches!(loader::load_path(&missing), Err(LoadError::NotFound(_))));

    let broken = write(&dir, "broken.json", "{ nope");
    let err = loader::load_path(&broken).expect_err("invalid json");
    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn config_points_at_content_and_storage() {
    let dir = TempDir::new().expect("tempdir");
    let content = write(&dir, "en.json", r#"{ "a": "A" }"#);
    let config_path = write(
        &dir,
        "mies.yaml",
        &format!(
            "default_language: th\nfallback_language: en\ncontent: {}\nstorage_path: {}\n",
            content.display(),
            dir.path().join("prefs.json").display()
        ),
    );

    let config = MiesConfig::discover(Some(&config_path)).expect("config");
    assert_eq!(config.default_language, "th");
    assert_eq!(config.catalog().expect("catalog").default_language().code, "th");
    assert_eq!(config.preference_store().path(), dir.path().join("prefs.json"));
    assert!(config.content.is_some());
}

#[test]
fn config_rejects_default_outside_catalog() {
    let dir = TempDir::new().expect("tempdir");
    let path = write(
        &dir,
        "mies.json",
        r#"{ "default_language": "fr", "languages": [ { "code": "en", "label": "English" } ] }"#,
    );
    assert!(matches!(MiesConfig::load(&path), Err(ConfigError::Invalid(_))));
}

#[test]
fn audit_reports_gaps_against_reference() {
    let dir = TempDir::new().expect("tempdir");
    write(&dir, "en.json", r#"{ "a": "A", "b": { "c": "C" } }"#);
    write(&dir, "fr.json", r#"{ "a": "A-fr", "z": "Z" }"#);
    let content = loader::load_path(dir.path()).expect("load");

    let report = report::coverage(&content, "en");
    assert!(!report.is_complete());
    let fr = report
        .languages
        .iter()
        .find(|lang| lang.code == "fr")
        .expect("fr coverage");
    assert_eq!(fr.missing, vec!["b.c".to_string()]);
    assert_eq!(fr.extra, vec!["z".to_string()]);

    let json = ReportOutputFormat::Json.serialize(&report).expect("json");
    assert!(json.contains("\"reference\": \"en\""));
}
