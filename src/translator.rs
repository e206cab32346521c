// SPDX-License-Identifier: PMPL-1.0-or-later

//! Content plus active language, bound together for component code.

use crate::format::{self, DateInput, DateStyle, ListType, NumberKind, NumberOptions};
use crate::language::LanguageSelection;
use crate::resolve::{interpolate, resolve_detailed, Resolution, DEFAULT_FALLBACK};
use crate::types::TranslatedContent;
use std::sync::Arc;

/// What a component holds to turn keys into text for whatever language is
/// currently selected.
///
/// Cloning is cheap; clones share both the content and the selection.
#[derive(Debug, Clone)]
pub struct Translator {
    content: Arc<TranslatedContent>,
    selection: LanguageSelection,
    fallback: String,
}

impl Translator {
    pub fn new(content: Arc<TranslatedContent>, selection: LanguageSelection) -> Self {
        Self {
            content,
            selection,
            fallback: DEFAULT_FALLBACK.to_string(),
        }
    }

    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    pub fn selection(&self) -> &LanguageSelection {
        &self.selection
    }

    pub fn content(&self) -> &TranslatedContent {
        &self.content
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Resolves `key` in the active language.
    pub fn t(&self, key: &str) -> String {
        self.lookup(key).text().to_string()
    }

    /// Resolves `key` and fills `{name}` placeholders.
    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        interpolate(self.lookup(key).text(), args)
    }

    pub fn lookup<'a>(&'a self, key: &'a str) -> Resolution<'a> {
        let current = self.selection.current_code();
        resolve_detailed(key, &self.content, &current, &self.fallback)
    }

    pub fn format_number(
        &self,
        value: impl Into<Option<f64>>,
        kind: NumberKind,
        options: &NumberOptions,
    ) -> String {
        format::format_number(value, &self.selection.current_code(), kind, options)
    }

    pub fn format_date(
        &self,
        value: impl Into<DateInput>,
        style: DateStyle,
        time_zone: Option<&str>,
    ) -> String {
        format::format_date(value, &self.selection.current_code(), style, time_zone)
    }

    pub fn format_list<S: AsRef<str>>(&self, items: &[S], list_type: ListType) -> String {
        format::format_list(items, &self.selection.current_code(), list_type)
    }
}
