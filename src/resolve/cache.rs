// SPDX-License-Identifier: PMPL-1.0-or-later

//! Memoized resolution over one immutable content snapshot.

use super::resolve;
use crate::types::TranslatedContent;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Caches resolved strings per (current, fallback, key).
///
/// The cache borrows the content it resolves against, so it cannot outlive
/// or observe a different snapshot; build a new cache when content changes.
pub struct ResolveCache<'c> {
    content: &'c TranslatedContent,
    entries: Mutex<HashMap<(String, String, String), String>>,
}

impl<'c> ResolveCache<'c> {
    pub fn new(content: &'c TranslatedContent) -> Self {
        Self {
            content,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn resolve(&self, key: &str, current: &str, fallback: &str) -> String {
        let cache_key = (current.to_string(), fallback.to_string(), key.to_string());
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries
            .entry(cache_key)
            .or_insert_with(|| resolve(key, self.content, current, fallback))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
