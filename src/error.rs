// SPDX-License-Identifier: PMPL-1.0-or-later

//! Error types for the fallible edges of the crate.
//!
//! Resolution and formatting never fail outward; these errors cover loading
//! content, reading configuration and talking to preference storage. The
//! language state swallows [`StorageError`] after logging it.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to load translation content from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("translation path not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unsupported translation file extension: {0}")]
    UnsupportedFormat(PathBuf),
}

/// Failure to read or write the persisted language preference.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("preference storage I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("preference file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("preference storage unavailable: {0}")]
    Unavailable(String),
}

/// Failure inside a formatting backend. Callers of the public formatters
/// never see this; it triggers the plain-string degradation path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("locale {0} is not supported by this formatter")]
    UnsupportedLocale(String),

    #[error("invalid formatting options: {0}")]
    InvalidOptions(String),

    #[error("unknown time zone: {0}")]
    UnknownTimeZone(String),

    #[error("locale data unavailable: {0}")]
    Data(String),
}

/// Failure to read the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("invalid config: {0}")]
    Invalid(String),
}
