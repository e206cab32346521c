// SPDX-License-Identifier: PMPL-1.0-or-later

//! Dotted-key translation lookup with fallback-language semantics.
//!
//! Keys use dotted namespaces: `"demo.lang"`, `"hero.cta.primary"`. A lookup
//! walks the tree for the requested language; if that walk does not end on a
//! text leaf, the same walk is repeated against the fallback language. If the
//! fallback misses too, the key itself comes back so the gap stays visible on
//! screen (fail-open, never panics, never returns empty for a miss).
//!
//! Resolution is pure: no I/O, no shared state. Callers that resolve the same
//! key many times per render can put a [`ResolveCache`] in front of it.

mod cache;
mod interpolate;

pub use cache::ResolveCache;
pub use interpolate::interpolate;

use crate::types::{TranslatedContent, TranslationData, TranslationNode};

/// Language consulted when the active language has no text for a key.
pub const DEFAULT_FALLBACK: &str = "en";

/// Where a resolved string came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Found under the requested language.
    Current(&'a str),
    /// Found only under the fallback language.
    Fallback(&'a str),
    /// Found nowhere; carries the key itself.
    Missing(&'a str),
}

impl<'a> Resolution<'a> {
    pub fn text(&self) -> &'a str {
        match *self {
            Resolution::Current(text) | Resolution::Fallback(text) | Resolution::Missing(text) => {
                text
            }
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Resolution::Missing(_))
    }
}

/// Walks `data` along the dotted `key`.
///
/// Stops at the first segment that is absent or that would have to descend
/// into a leaf. Only a leaf at the final segment counts as found; a group
/// there is "not text" and yields `None`.
pub fn lookup<'a>(data: &'a TranslationData, key: &str) -> Option<&'a str> {
    let mut segments = key.split('.');
    let first = segments.next()?;
    let node = segments.try_fold(data.get(first)?, |node, segment| match node {
        TranslationNode::Group(group) => group.get(segment),
        TranslationNode::Leaf(_) => None,
    })?;
    node.as_leaf()
}

/// Looks `key` up under `current`, then `fallback`, reporting which one hit.
pub fn resolve_detailed<'a>(
    key: &'a str,
    content: &'a TranslatedContent,
    current: &str,
    fallback: &str,
) -> Resolution<'a> {
    if let Some(text) = content.language(current).and_then(|data| lookup(data, key)) {
        return Resolution::Current(text);
    }
    if let Some(text) = content.language(fallback).and_then(|data| lookup(data, key)) {
        tracing::debug!(key, current, fallback, "translation served from fallback language");
        return Resolution::Fallback(text);
    }
    tracing::debug!(key, current, fallback, "translation missing");
    Resolution::Missing(key)
}

/// Resolves `key` to display text, falling back to `fallback` and then to
/// the key itself.
///
/// # Examples
///
/// ```
/// use mies_i18n::resolve::resolve;
/// use mies_i18n::types::{TranslatedContent, TranslationData};
///
/// let content = TranslatedContent::new()
///     .with_language("en", TranslationData::new().with("demo", TranslationData::new().with("lang", "Language")))
///     .with_language("th", TranslationData::new().with("demo", TranslationData::new().with("lang", "ภาษา")));
///
/// assert_eq!(resolve("demo.lang", &content, "th", "en"), "ภาษา");
/// assert_eq!(resolve("demo.missing", &content, "th", "en"), "demo.missing");
/// ```
pub fn resolve(key: &str, content: &TranslatedContent, current: &str, fallback: &str) -> String {
    resolve_detailed(key, content, current, fallback)
        .text()
        .to_string()
}
