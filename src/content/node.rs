//! Content tree nodes and JSON conversion.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::ContentError;
use super::records::{
    RecordList,
    RecordShape,
};
use crate::key_path::KeyPath;

/// A node of a content tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ContentNode {
    /// A translated string. May legitimately be empty.
    Text(String),
    /// An ordered list of strings.
    List(Vec<String>),
    /// An ordered list of typed records.
    Records(RecordList),
    /// A nested subtree.
    Section(ContentTree),
}

/// The runtime shape of a node, used to check that a key path yields the same
/// kind of value in every locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Text,
    List,
    Records(RecordShape),
    Section,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::List => f.write_str("list"),
            Self::Records(shape) => write!(f, "{shape} records"),
            Self::Section => f.write_str("section"),
        }
    }
}

impl ContentNode {
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Text(_) => NodeKind::Text,
            Self::List(_) => NodeKind::List,
            Self::Records(records) => NodeKind::Records(records.shape()),
            Self::Section(_) => NodeKind::Section,
        }
    }

    fn from_json(value: Value, path: &KeyPath, origin: &str) -> Result<Self, ContentError> {
        match value {
            Value::String(text) => Ok(Self::Text(text)),
            Value::Object(map) => Ok(Self::Section(ContentTree::from_map(map, path, origin)?)),
            Value::Array(items) => Self::from_json_array(items, path, origin),
            other => Err(ContentError::InvalidValue {
                origin: origin.to_string(),
                path: path.clone(),
                found: json_type_name(&other),
            }),
        }
    }

    fn from_json_array(
        items: Vec<Value>,
        path: &KeyPath,
        origin: &str,
    ) -> Result<Self, ContentError> {
        if items.iter().all(Value::is_string) {
            let texts = items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(text) => Some(text),
                    _ => None,
                })
                .collect();
            return Ok(Self::List(texts));
        }

        if items.iter().all(Value::is_object) {
            let fields: Vec<&str> = items
                .first()
                .and_then(Value::as_object)
                .map(|record| record.keys().map(String::as_str).collect())
                .unwrap_or_default();
            let Some(shape) = RecordShape::detect(&fields) else {
                return Err(ContentError::UnknownRecordShape {
                    origin: origin.to_string(),
                    path: path.clone(),
                    fields: fields.join(", "),
                });
            };

            let records = RecordList::from_json(shape, items).map_err(|e| {
                ContentError::InvalidRecord {
                    origin: origin.to_string(),
                    path: path.clone(),
                    shape,
                    message: e.to_string(),
                }
            })?;
            return Ok(Self::Records(records));
        }

        if items.iter().all(|item| item.is_string() || item.is_object()) {
            return Err(ContentError::MixedList { origin: origin.to_string(), path: path.clone() });
        }

        let found = items
            .iter()
            .find(|item| !item.is_string() && !item.is_object())
            .map_or("array", json_type_name);
        Err(ContentError::InvalidValue {
            origin: origin.to_string(),
            path: path.clone(),
            found,
        })
    }
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Nested content for one locale (or one file of it).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ContentTree {
    /// Top-level keys in sorted order.
    entries: BTreeMap<String, ContentNode>,
}

impl ContentTree {
    /// Parses a JSON document whose root is an object.
    ///
    /// `origin` names the source (a file path or `builtin:es`) in error messages.
    ///
    /// # Errors
    /// Malformed JSON, a non-object root, or any invalid node below it.
    pub fn from_json_str(text: &str, origin: &str) -> Result<Self, ContentError> {
        let value: Value = serde_json::from_str(text).map_err(|e| ContentError::Parse {
            origin: origin.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(value, origin)
    }

    /// Converts an already parsed JSON value.
    ///
    /// # Errors
    /// A non-object root, or any invalid node below it.
    pub fn from_json(value: Value, origin: &str) -> Result<Self, ContentError> {
        let root = KeyPath::default();
        match value {
            Value::Object(map) => Self::from_map(map, &root, origin),
            other => Err(ContentError::InvalidValue {
                origin: origin.to_string(),
                path: root,
                found: json_type_name(&other),
            }),
        }
    }

    fn from_map(
        map: serde_json::Map<String, Value>,
        path: &KeyPath,
        origin: &str,
    ) -> Result<Self, ContentError> {
        let mut entries = BTreeMap::new();
        for (key, value) in map {
            if key.trim().is_empty() {
                return Err(ContentError::InvalidKey {
                    origin: origin.to_string(),
                    path: path.clone(),
                    key,
                });
            }
            let child_path = path.child(key.as_str());
            let node = ContentNode::from_json(value, &child_path, origin)?;
            entries.insert(key, node);
        }
        Ok(Self { entries })
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ContentNode> {
        self.entries.get(key)
    }

    /// Walks `path` from this tree. Returns `None` if any step is missing or
    /// passes through a non-section node. The empty path never resolves.
    #[must_use]
    pub fn get_path(&self, path: &KeyPath) -> Option<&ContentNode> {
        let (last, init) = path.segments().split_last()?;
        let mut tree = self;
        for key in init {
            match tree.get(key)? {
                ContentNode::Section(child) => tree = child,
                _ => return None,
            }
        }
        tree.get(last)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContentNode)> {
        self.entries.iter().map(|(key, node)| (key.as_str(), node))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merges `other` into this tree. Sections present in both are merged
    /// recursively; any other collision is reported as the colliding path.
    ///
    /// # Errors
    /// The path of the first key defined by both trees.
    pub(crate) fn merge(&mut self, other: Self, prefix: &KeyPath) -> Result<(), KeyPath> {
        for (key, node) in other.entries {
            let path = prefix.child(key.as_str());
            if let Some(existing) = self.entries.get_mut(&key) {
                match (existing, node) {
                    (ContentNode::Section(existing), ContentNode::Section(incoming)) => {
                        existing.merge(incoming, &path)?;
                    }
                    _ => return Err(path),
                }
            } else {
                self.entries.insert(key, node);
            }
        }
        Ok(())
    }

    /// Wraps this tree so that it lives under `key`.
    #[must_use]
    pub(crate) fn nest_under(self, key: impl Into<String>) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(key.into(), ContentNode::Section(self));
        Self { entries }
    }

    /// Every non-section node with its path, in key order.
    #[must_use]
    pub fn leaves(&self) -> Vec<(KeyPath, &ContentNode)> {
        let mut result = Vec::new();
        self.collect_leaves(&KeyPath::default(), &mut result);
        result
    }

    fn collect_leaves<'a>(&'a self, prefix: &KeyPath, result: &mut Vec<(KeyPath, &'a ContentNode)>) {
        for (key, node) in &self.entries {
            let path = prefix.child(key.as_str());
            match node {
                ContentNode::Section(child) => child.collect_leaves(&path, result),
                _ => result.push((path, node)),
            }
        }
    }

    /// Flattens the tree into separator-joined keys mapped to their text.
    ///
    /// List items are addressed as `key[0]`, record fields as `key[0].field`.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use site_copy::content::ContentTree;
    ///
    /// let tree = ContentTree::from_json(
    ///     json!({ "CTA": { "GET_FREE_DEMO": "Get Demo" }, "LINKS": ["Blog"] }),
    ///     "inline",
    /// )
    /// .unwrap();
    ///
    /// let flattened = tree.flatten(".");
    /// assert_eq!(flattened.get("CTA.GET_FREE_DEMO"), Some(&"Get Demo".to_string()));
    /// assert_eq!(flattened.get("LINKS[0]"), Some(&"Blog".to_string()));
    /// ```
    #[must_use]
    pub fn flatten(&self, separator: &str) -> BTreeMap<String, String> {
        let mut result = BTreeMap::new();
        self.flatten_into(separator, None, &mut result);
        result
    }

    fn flatten_into(
        &self,
        separator: &str,
        prefix: Option<&str>,
        result: &mut BTreeMap<String, String>,
    ) {
        for (key, node) in &self.entries {
            let full_key = prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));
            match node {
                ContentNode::Text(text) => {
                    result.insert(full_key, text.clone());
                }
                ContentNode::List(items) => {
                    for (index, item) in items.iter().enumerate() {
                        result.insert(format!("{full_key}[{index}]"), item.clone());
                    }
                }
                ContentNode::Records(records) => {
                    for (field, text) in records.leaf_texts(separator) {
                        result.insert(format!("{full_key}{field}"), text.to_string());
                    }
                }
                ContentNode::Section(child) => {
                    child.flatten_into(separator, Some(&full_key), result);
                }
            }
        }
    }
}
