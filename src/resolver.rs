//! Locale-aware lookup of content by key path.
//!
//! A lookup walks the requested locale's tree first. If any step of the walk
//! is missing, the whole path is walked again in the default locale's tree.
//! Only when both walks fail is [`ResolveError::KeyNotFound`] returned, so a
//! missing key is never confused with a translated empty string.

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::content::{
    ContentError,
    ContentNode,
    ContentTable,
    ContentTree,
    FaqEntry,
    Feature,
    NodeKind,
    PricingTier,
    RecordList,
    RecordShape,
    Stat,
    Testimonial,
};
use crate::key_path::KeyPath;
use crate::locale::Locale;

/// How a partially translated locale falls back to the default locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FallbackMode {
    /// Each missing key falls back on its own.
    #[default]
    PerKey,
    /// A locale missing any key is served entirely from the default locale.
    Wholesale,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Key '{path}' is not defined for locale '{locale}' or the default locale")]
    KeyNotFound { locale: Locale, path: KeyPath },

    #[error("Key '{path}' holds {found}, expected {expected}")]
    TypeMismatch { path: KeyPath, expected: NodeKind, found: NodeKind },

    #[error(transparent)]
    Content(#[from] ContentError),
}

/// A borrowed view of the node a key path resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResolvedValue<'a> {
    Text(&'a str),
    List(&'a [String]),
    Records(&'a RecordList),
    Section(&'a ContentTree),
}

impl<'a> From<&'a ContentNode> for ResolvedValue<'a> {
    fn from(node: &'a ContentNode) -> Self {
        match node {
            ContentNode::Text(text) => Self::Text(text),
            ContentNode::List(items) => Self::List(items),
            ContentNode::Records(records) => Self::Records(records),
            ContentNode::Section(tree) => Self::Section(tree),
        }
    }
}

impl<'a> ResolvedValue<'a> {
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Text(_) => NodeKind::Text,
            Self::List(_) => NodeKind::List,
            Self::Records(records) => NodeKind::Records(records.shape()),
            Self::Section(_) => NodeKind::Section,
        }
    }

    #[must_use]
    pub const fn as_text(&self) -> Option<&'a str> {
        match *self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_list(&self) -> Option<&'a [String]> {
        match *self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_records(&self) -> Option<&'a RecordList> {
        match *self {
            Self::Records(records) => Some(records),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_section(&self) -> Option<&'a ContentTree> {
        match *self {
            Self::Section(tree) => Some(tree),
            _ => None,
        }
    }

    /// Copies the value out of the table.
    #[must_use]
    pub fn into_node(self) -> ContentNode {
        match self {
            Self::Text(text) => ContentNode::Text(text.to_string()),
            Self::List(items) => ContentNode::List(items.to_vec()),
            Self::Records(records) => ContentNode::Records(records.clone()),
            Self::Section(tree) => ContentNode::Section(tree.clone()),
        }
    }
}

/// A resolved value along with the locale that actually served it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub value: ResolvedValue<'a>,
    pub requested: Locale,
    pub served_by: Locale,
}

impl Resolution<'_> {
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.requested != self.served_by
    }
}

/// Resolves key paths against a content table.
///
/// Cheap to copy; holds only a reference to the table.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'t> {
    /// Content the resolver reads from.
    table: &'t ContentTable,
    /// How a locale that lacks a path is served.
    fallback: FallbackMode,
}

impl<'t> Resolver<'t> {
    #[must_use]
    pub const fn new(table: &'t ContentTable, fallback: FallbackMode) -> Self {
        Self { table, fallback }
    }

    /// A per-key resolver over the compiled-in content.
    ///
    /// # Errors
    /// The built-in content failed to load.
    pub fn builtin() -> Result<Resolver<'static>, ContentError> {
        Ok(Resolver::new(ContentTable::builtin()?, FallbackMode::default()))
    }

    #[must_use]
    pub const fn table(&self) -> &'t ContentTable {
        self.table
    }

    #[must_use]
    pub const fn fallback_mode(&self) -> FallbackMode {
        self.fallback
    }

    #[must_use]
    pub const fn default_locale(&self) -> Locale {
        self.table.default_locale()
    }

    /// Resolves `path` for `locale` and reports which locale served it.
    ///
    /// # Errors
    /// [`ResolveError::KeyNotFound`] when neither `locale` nor the default
    /// locale defines the full path.
    pub fn lookup(&self, locale: Locale, path: &KeyPath) -> Result<Resolution<'t>, ResolveError> {
        if let Some(tree) = self.locale_tree(locale)
            && let Some(node) = tree.get_path(path)
            && !self.is_partial_section(node, path)
        {
            return Ok(Resolution { value: node.into(), requested: locale, served_by: locale });
        }

        let default = self.default_locale();
        if locale != default {
            tracing::trace!(%locale, %path, %default, "Falling back to default locale");
        }

        self.table
            .default_tree()
            .get_path(path)
            .map(|node| Resolution { value: node.into(), requested: locale, served_by: default })
            .ok_or_else(|| ResolveError::KeyNotFound { locale, path: path.clone() })
    }

    /// True if `node` is a section lacking a leaf the default locale's section
    /// at `path` defines.
    ///
    /// A partial section is served from the default locale so reads through the
    /// returned tree see the same values as per-key resolution.
    fn is_partial_section(&self, node: &ContentNode, path: &KeyPath) -> bool {
        let ContentNode::Section(section) = node else {
            return false;
        };
        let Some(ContentNode::Section(reference)) = self.table.default_tree().get_path(path) else {
            return false;
        };
        !std::ptr::eq(section, reference)
            && reference.leaves().iter().any(|(leaf, _)| section.get_path(leaf).is_none())
    }

    /// The tree to walk first for `locale`, or `None` to go straight to the default.
    fn locale_tree(&self, locale: Locale) -> Option<&'t ContentTree> {
        match self.fallback {
            FallbackMode::PerKey => self.table.tree(locale),
            FallbackMode::Wholesale if self.table.is_complete(locale) => self.table.tree(locale),
            FallbackMode::Wholesale => None,
        }
    }

    /// Resolves `path` for `locale`, falling back to the default locale.
    ///
    /// # Errors
    /// [`ResolveError::KeyNotFound`] when neither `locale` nor the default
    /// locale defines the full path.
    pub fn resolve(&self, locale: Locale, path: &KeyPath) -> Result<ResolvedValue<'t>, ResolveError> {
        self.lookup(locale, path).map(|resolution| resolution.value)
    }

    /// Like [`resolve`](Self::resolve) for a raw locale code, e.g. a route
    /// parameter. Unsupported codes resolve as the default locale.
    ///
    /// # Errors
    /// See [`resolve`](Self::resolve).
    pub fn resolve_code(&self, code: &str, path: &KeyPath) -> Result<ResolvedValue<'t>, ResolveError> {
        self.resolve(Locale::from_code_or_default(code), path)
    }

    /// # Errors
    /// Missing key, or the key does not hold text.
    pub fn text(&self, locale: Locale, path: &KeyPath) -> Result<&'t str, ResolveError> {
        let value = self.resolve(locale, path)?;
        value.as_text().ok_or_else(|| mismatch(path, NodeKind::Text, value))
    }

    /// # Errors
    /// Missing key, or the key does not hold a list of strings.
    pub fn list(&self, locale: Locale, path: &KeyPath) -> Result<&'t [String], ResolveError> {
        let value = self.resolve(locale, path)?;
        value.as_list().ok_or_else(|| mismatch(path, NodeKind::List, value))
    }

    /// # Errors
    /// Missing key, or the key does not hold a section.
    pub fn section(&self, locale: Locale, path: &KeyPath) -> Result<&'t ContentTree, ResolveError> {
        let value = self.resolve(locale, path)?;
        value.as_section().ok_or_else(|| mismatch(path, NodeKind::Section, value))
    }

    /// # Errors
    /// Missing key, or the key does not hold FAQ entries.
    pub fn faq(&self, locale: Locale, path: &KeyPath) -> Result<&'t [FaqEntry], ResolveError> {
        let value = self.resolve(locale, path)?;
        match value {
            ResolvedValue::Records(RecordList::Faq(items)) => Ok(items),
            other => Err(mismatch(path, NodeKind::Records(RecordShape::Faq), other)),
        }
    }

    /// # Errors
    /// Missing key, or the key does not hold pricing tiers.
    pub fn pricing(&self, locale: Locale, path: &KeyPath) -> Result<&'t [PricingTier], ResolveError> {
        let value = self.resolve(locale, path)?;
        match value {
            ResolvedValue::Records(RecordList::Pricing(items)) => Ok(items),
            other => Err(mismatch(path, NodeKind::Records(RecordShape::Pricing), other)),
        }
    }

    /// # Errors
    /// Missing key, or the key does not hold feature records.
    pub fn features(&self, locale: Locale, path: &KeyPath) -> Result<&'t [Feature], ResolveError> {
        let value = self.resolve(locale, path)?;
        match value {
            ResolvedValue::Records(RecordList::Feature(items)) => Ok(items),
            other => Err(mismatch(path, NodeKind::Records(RecordShape::Feature), other)),
        }
    }

    /// # Errors
    /// Missing key, or the key does not hold testimonials.
    pub fn testimonials(
        &self,
        locale: Locale,
        path: &KeyPath,
    ) -> Result<&'t [Testimonial], ResolveError> {
        let value = self.resolve(locale, path)?;
        match value {
            ResolvedValue::Records(RecordList::Testimonial(items)) => Ok(items),
            other => Err(mismatch(path, NodeKind::Records(RecordShape::Testimonial), other)),
        }
    }

    /// # Errors
    /// Missing key, or the key does not hold stats.
    pub fn stats(&self, locale: Locale, path: &KeyPath) -> Result<&'t [Stat], ResolveError> {
        let value = self.resolve(locale, path)?;
        match value {
            ResolvedValue::Records(RecordList::Stat(items)) => Ok(items),
            other => Err(mismatch(path, NodeKind::Records(RecordShape::Stat), other)),
        }
    }
}

fn mismatch(path: &KeyPath, expected: NodeKind, found: ResolvedValue<'_>) -> ResolveError {
    ResolveError::TypeMismatch { path: path.clone(), expected, found: found.kind() }
}
