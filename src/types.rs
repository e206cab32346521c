// SPDX-License-Identifier: PMPL-1.0-or-later

//! Core data types shared by the resolver, loader and language state.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// A selectable UI language.
///
/// Identity is `code` alone: two values with the same code are the same
/// language even if their labels differ (e.g. a catalog reloaded with new
/// display text).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Language {
    /// ISO 639-1 code, e.g. `"en"` or `"th"`.
    pub code: String,
    /// Display label, usually the native name.
    pub label: String,
    /// Flag glyph shown next to the label.
    #[serde(default)]
    pub flag: String,
    /// ISO 3166-1 alpha-2 country code used for the flag.
    #[serde(default, rename = "countryCode", alias = "country_code")]
    pub country_code: String,
}

impl Language {
    pub fn new(
        code: impl Into<String>,
        label: impl Into<String>,
        flag: impl Into<String>,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
            flag: flag.into(),
            country_code: country_code.into(),
        }
    }
}

impl PartialEq for Language {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Language {}

impl std::hash::Hash for Language {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code)
    }
}

/// One node of a translation tree: either a display string or a nested group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TranslationNode {
    Leaf(String),
    Group(TranslationData),
}

impl TranslationNode {
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            TranslationNode::Leaf(text) => Some(text),
            TranslationNode::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&TranslationData> {
        match self {
            TranslationNode::Group(group) => Some(group),
            TranslationNode::Leaf(_) => None,
        }
    }
}

impl From<&str> for TranslationNode {
    fn from(value: &str) -> Self {
        TranslationNode::Leaf(value.to_string())
    }
}

impl From<String> for TranslationNode {
    fn from(value: String) -> Self {
        TranslationNode::Leaf(value)
    }
}

impl From<TranslationData> for TranslationNode {
    fn from(value: TranslationData) -> Self {
        TranslationNode::Group(value)
    }
}

/// Wire shape accepted when deserializing translation trees.
///
/// Anything that is neither a string nor a mapping lands in `Other` and is
/// dropped during conversion, so it resolves as "not found".
#[derive(Deserialize)]
#[serde(untagged)]
enum RawNode {
    Leaf(String),
    Group(BTreeMap<RawKey, RawNode>),
    Other(serde::de::IgnoredAny),
}

/// Mapping key as written in the source file.
///
/// YAML allows `1:` or `true:` as keys; those become the segments `"1"` and
/// `"true"` so a dotted path like `steps.1` can reach them.
#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct RawKey(String);

impl<'de> Deserialize<'de> for RawKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyVisitor;

        impl serde::de::Visitor<'_> for KeyVisitor {
            type Value = RawKey;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a string, number or boolean key")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<RawKey, E> {
                Ok(RawKey(v.to_string()))
            }

            fn visit_string<E: serde::de::Error>(self, v: String) -> Result<RawKey, E> {
                Ok(RawKey(v))
            }

            fn visit_bool<E: serde::de::Error>(self, v: bool) -> Result<RawKey, E> {
                Ok(RawKey(v.to_string()))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<RawKey, E> {
                Ok(RawKey(v.to_string()))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<RawKey, E> {
                Ok(RawKey(v.to_string()))
            }

            fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<RawKey, E> {
                Ok(RawKey(v.to_string()))
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}

impl<'de> Deserialize<'de> for TranslationNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawNode::deserialize(deserializer)? {
            RawNode::Leaf(text) => Ok(TranslationNode::Leaf(text)),
            RawNode::Group(entries) => Ok(TranslationNode::Group(TranslationData::from_raw(entries))),
            RawNode::Other(_) => Err(D::Error::custom("expected text or a group of translations")),
        }
    }
}

/// Nested key/value text data for a single language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationData {
    entries: BTreeMap<String, TranslationNode>,
}

impl Serialize for TranslationData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TranslationData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<RawKey, RawNode>::deserialize(deserializer)?;
        Ok(Self::from_raw(raw))
    }
}

impl TranslationData {
    pub fn new() -> Self {
        Self::default()
    }

    fn from_raw(raw: BTreeMap<RawKey, RawNode>) -> Self {
        let mut entries = BTreeMap::new();
        for (RawKey(key), node) in raw {
            match node {
                RawNode::Other(_) => {
                    tracing::warn!(key = %key, "dropping translation value that is neither text nor a group");
                }
                RawNode::Leaf(text) => {
                    entries.insert(key, TranslationNode::Leaf(text));
                }
                RawNode::Group(group) => {
                    entries.insert(key, TranslationNode::Group(Self::from_raw(group)));
                }
            }
        }
        Self { entries }
    }

    /// Builder-style insert, handy for assembling content in code.
    pub fn with(mut self, key: impl Into<String>, node: impl Into<TranslationNode>) -> Self {
        self.insert(key, node);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<TranslationNode>) {
        self.entries.insert(key.into(), node.into());
    }

    pub fn get(&self, segment: &str) -> Option<&TranslationNode> {
        self.entries.get(segment)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TranslationNode)> {
        self.entries.iter()
    }

    /// Every dotted path that ends in a leaf, in sorted order.
    pub fn leaf_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        collect_leaf_keys(self, "", &mut keys);
        keys
    }
}

fn collect_leaf_keys(data: &TranslationData, prefix: &str, out: &mut Vec<String>) {
    for (key, node) in data.iter() {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match node {
            TranslationNode::Leaf(_) => out.push(path),
            TranslationNode::Group(group) => collect_leaf_keys(group, &path, out),
        }
    }
}

/// Translation trees for every supported language, keyed by language code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslatedContent {
    languages: BTreeMap<String, TranslationData>,
}

impl TranslatedContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_language(mut self, code: impl Into<String>, data: TranslationData) -> Self {
        self.insert(code, data);
        self
    }

    /// Adds a language, merging into any tree already stored under `code`.
    pub fn insert(&mut self, code: impl Into<String>, data: TranslationData) {
        let code = code.into();
        match self.languages.get_mut(&code) {
            Some(existing) => merge(existing, data),
            None => {
                self.languages.insert(code, data);
            }
        }
    }

    pub fn language(&self, code: &str) -> Option<&TranslationData> {
        self.languages.get(code)
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

/// Later data wins on leaf conflicts; groups merge recursively.
fn merge(into: &mut TranslationData, from: TranslationData) {
    for (key, node) in from.entries {
        match (into.entries.get_mut(&key), node) {
            (Some(TranslationNode::Group(existing)), TranslationNode::Group(incoming)) => {
                merge(existing, incoming);
            }
            (_, node) => {
                into.entries.insert(key, node);
            }
        }
    }
}
