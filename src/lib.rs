// SPDX-License-Identifier: PMPL-1.0-or-later

//! mies-i18n: multi-language text for the mies component library.
//!
//! The crate turns dotted translation keys into display text and keeps
//! track of which language the user picked.
//!
//! PIECES:
//! 1. **Resolve**: nested-key lookup with fallback language, then raw key.
//! 2. **Language**: the shared active-language state, persisted best-effort
//!    and observable by any number of subscribers.
//! 3. **Format**: locale-aware numbers, dates and lists keyed by the same
//!    language code.
//! 4. **Report**: coverage audits of translation content against the
//!    fallback language.

pub mod config;
pub mod error;
pub mod format;
pub mod language;
pub mod loader;
pub mod report;
pub mod resolve;
pub mod storage;
pub mod telemetry;
pub mod translator;
pub mod types;

pub use language::{LanguageCatalog, LanguageSelection};
pub use resolve::resolve;
pub use translator::Translator;
pub use types::{Language, TranslatedContent, TranslationData, TranslationNode};
