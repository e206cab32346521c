// SPDX-License-Identifier: PMPL-1.0-or-later

//! Document-level locale attribute.

use std::sync::{Arc, PoisonError, RwLock};

/// Receives the active language code whenever it changes.
///
/// Implementations must not fail outward; whatever they write to is
/// best-effort.
pub trait LocaleAttribute: Send + Sync {
    fn reflect(&self, code: &str);
}

/// Shared slot holding the document's `lang` value.
///
/// Clones point at the same slot, so a renderer can keep one clone and read
/// the attribute while the language state writes through another.
#[derive(Debug, Clone, Default)]
pub struct DocumentLocale {
    lang: Arc<RwLock<Option<String>>>,
}

impl DocumentLocale {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<String> {
        self.lang
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl LocaleAttribute for DocumentLocale {
    fn reflect(&self, code: &str) {
        *self.lang.write().unwrap_or_else(PoisonError::into_inner) = Some(code.to_string());
    }
}
