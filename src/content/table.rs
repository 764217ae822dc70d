//! The per-locale content table and the compiled-in site content.

use std::collections::{
    BTreeMap,
    BTreeSet,
};
use std::sync::LazyLock;

use super::ContentError;
use super::audit::{
    self,
    AuditReport,
};
use super::node::ContentTree;
use crate::key_path::KeyPath;
use crate::locale::{
    Locale,
    default_locale,
};

/// Site content shipped with the binary, parsed and validated on first use.
static BUILTIN: LazyLock<Result<ContentTable, ContentError>> = LazyLock::new(|| {
    tracing::debug!("Loading built-in content table");
    ContentTable::load([
        ContentSource::new(Locale::Es, "builtin:es", include_str!("../../locales/es.json")),
        ContentSource::new(Locale::En, "builtin:en", include_str!("../../locales/en.json")),
    ])
});

/// One JSON document of content for a locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSource {
    pub locale: Locale,
    /// Top-level key the document is mounted under, if any.
    pub namespace: Option<String>,
    /// File path or label used in error messages.
    pub origin: String,
    pub text: String,
}

impl ContentSource {
    #[must_use]
    pub fn new(locale: Locale, origin: impl Into<String>, text: impl Into<String>) -> Self {
        Self { locale, namespace: None, origin: origin.into(), text: text.into() }
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}

/// Content trees for every loaded locale.
///
/// Immutable once built. The default locale's tree is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTable {
    /// Reference content; every path resolves here.
    default_tree: ContentTree,
    /// Trees of the non-default locales, possibly partial.
    translations: BTreeMap<Locale, ContentTree>,
    /// Locales whose trees cover every default-locale path.
    complete: BTreeSet<Locale>,
}

impl ContentTable {
    /// The compiled-in table.
    ///
    /// # Errors
    /// The built-in content failed to parse or validate. The same error is
    /// returned on every call.
    pub fn builtin() -> Result<&'static Self, ContentError> {
        BUILTIN.as_ref().map_err(Clone::clone)
    }

    /// Parses and merges `sources` without checking cross-locale consistency.
    ///
    /// Sources for the same locale are merged; a source with a namespace is
    /// mounted under that key first.
    ///
    /// # Errors
    /// Invalid content, keys defined by two sources of one locale, or no
    /// source for the default locale.
    pub fn parse(sources: impl IntoIterator<Item = ContentSource>) -> Result<Self, ContentError> {
        let mut trees: BTreeMap<Locale, ContentTree> = BTreeMap::new();

        for source in sources {
            tracing::debug!(locale = %source.locale, origin = %source.origin, "Parsing content source");
            let mut tree = ContentTree::from_json_str(&source.text, &source.origin)?;
            if let Some(namespace) = source.namespace {
                tree = tree.nest_under(namespace);
            }

            let target = trees.entry(source.locale).or_default();
            target.merge(tree, &KeyPath::default()).map_err(|path| ContentError::DuplicateKey {
                locale: source.locale,
                path,
                origin: source.origin.clone(),
            })?;
        }

        Self::from_trees(trees)
    }

    /// Builds a table from already parsed trees.
    ///
    /// # Errors
    /// No tree for the default locale.
    pub fn from_trees(
        trees: impl IntoIterator<Item = (Locale, ContentTree)>,
    ) -> Result<Self, ContentError> {
        let mut translations: BTreeMap<Locale, ContentTree> = trees.into_iter().collect();
        let default_tree = translations
            .remove(&default_locale())
            .ok_or(ContentError::MissingDefaultLocale(default_locale()))?;

        let mut table = Self { default_tree, translations, complete: BTreeSet::new() };
        table.complete = table
            .audit()
            .coverage
            .iter()
            .filter(|coverage| coverage.is_complete())
            .map(|coverage| coverage.locale)
            .collect();
        table.complete.insert(default_locale());

        Ok(table)
    }

    /// [`parse`](Self::parse) followed by [`validate`](Self::validate).
    ///
    /// # Errors
    /// See both.
    pub fn load(sources: impl IntoIterator<Item = ContentSource>) -> Result<Self, ContentError> {
        let table = Self::parse(sources)?;
        table.validate()?;
        Ok(table)
    }

    /// Checks that the default tree defines every path another locale defines,
    /// with the same shape.
    ///
    /// # Errors
    /// [`ContentError::Inconsistent`] listing every violation.
    pub fn validate(&self) -> Result<(), ContentError> {
        let errors: Vec<_> = self.audit().errors().cloned().collect();
        if errors.is_empty() { Ok(()) } else { Err(ContentError::Inconsistent(errors)) }
    }

    /// Full consistency and coverage report over every supported locale.
    #[must_use]
    pub fn audit(&self) -> AuditReport {
        let others = Locale::ALL
            .into_iter()
            .filter(|locale| *locale != default_locale())
            .map(|locale| (locale, self.translations.get(&locale)));
        audit::audit(default_locale(), &self.default_tree, others)
    }

    #[must_use]
    pub const fn default_locale(&self) -> Locale {
        default_locale()
    }

    #[must_use]
    pub const fn default_tree(&self) -> &ContentTree {
        &self.default_tree
    }

    /// The tree loaded for `locale`, if any.
    #[must_use]
    pub fn tree(&self, locale: Locale) -> Option<&ContentTree> {
        if locale == default_locale() {
            Some(&self.default_tree)
        } else {
            self.translations.get(&locale)
        }
    }

    /// Loaded locales, default first.
    pub fn locales(&self) -> impl Iterator<Item = Locale> {
        std::iter::once(default_locale()).chain(self.translations.keys().copied())
    }

    /// True if `locale` defines every default-locale path itself.
    #[must_use]
    pub fn is_complete(&self, locale: Locale) -> bool {
        self.complete.contains(&locale)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::content::{
        ContentNode,
        IssueKind,
    };

    fn source(locale: Locale, value: &serde_json::Value) -> ContentSource {
        ContentSource::new(locale, format!("test:{locale}"), value.to_string())
    }

    #[googletest::test]
    fn test_builtin_table_loads() {
        let table = ContentTable::builtin().unwrap();

        expect_that!(table.default_locale(), eq(Locale::Es));
        expect_that!(table.locales().collect::<Vec<_>>(), elements_are![eq(&Locale::Es), eq(&Locale::En)]);
        expect_that!(table.validate(), ok(anything()));
    }

    #[googletest::test]
    fn test_builtin_english_omits_promo_banner() {
        let table = ContentTable::builtin().unwrap();
        let banner = KeyPath::from(["PROMO_BANNER", "TEXT"]);

        expect_that!(table.tree(Locale::Es).and_then(|tree| tree.get_path(&banner)), some(anything()));
        expect_that!(table.tree(Locale::En).and_then(|tree| tree.get_path(&banner)), none());
        expect_that!(table.is_complete(Locale::En), eq(false));
        expect_that!(table.is_complete(Locale::Es), eq(true));
    }

    #[googletest::test]
    fn test_parse_requires_default_locale() {
        let result = ContentTable::parse([source(Locale::En, &json!({ "CTA": { "A": "a" } }))]);

        expect_that!(result, err(eq(&ContentError::MissingDefaultLocale(Locale::Es))));
    }

    #[googletest::test]
    fn test_parse_merges_namespaced_sources() {
        let table = ContentTable::parse([
            source(Locale::Es, &json!({ "TITLE": "Inicio" })).with_namespace("HOME"),
            source(Locale::Es, &json!({ "TITLE": "Precios" })).with_namespace("PRICING"),
        ])
        .unwrap();

        let tree = table.tree(Locale::Es).unwrap();
        expect_that!(
            tree.get_path(&KeyPath::from(["PRICING", "TITLE"])),
            some(eq(&ContentNode::Text("Precios".to_string())))
        );
        expect_that!(tree.len(), eq(2));
    }

    #[googletest::test]
    fn test_parse_rejects_duplicate_keys_across_sources() {
        let result = ContentTable::parse([
            source(Locale::Es, &json!({ "CTA": { "A": "a" } })),
            source(Locale::Es, &json!({ "CTA": { "A": "b" } })),
        ]);

        expect_that!(
            result,
            err(eq(&ContentError::DuplicateKey {
                locale: Locale::Es,
                path: KeyPath::from(["CTA", "A"]),
                origin: "test:es".to_string(),
            }))
        );
    }

    #[googletest::test]
    fn test_load_rejects_keys_missing_in_default() {
        let result = ContentTable::load([
            source(Locale::Es, &json!({ "CTA": { "A": "a" } })),
            source(Locale::En, &json!({ "CTA": { "A": "a", "B": "b" } })),
        ]);

        let Err(ContentError::Inconsistent(issues)) = result else {
            panic!("expected an inconsistent table");
        };
        expect_that!(issues.len(), eq(1));
        expect_that!(issues.first().map(|issue| &issue.kind), some(eq(&IssueKind::MissingInDefault)));
    }

    #[googletest::test]
    fn test_parse_keeps_inconsistent_tables_for_auditing() {
        let table = ContentTable::parse([
            source(Locale::Es, &json!({ "CTA": { "A": "a" } })),
            source(Locale::En, &json!({ "CTA": { "A": ["a"] } })),
        ])
        .unwrap();

        expect_that!(table.audit().has_errors(), eq(true));
        expect_that!(table.validate(), err(anything()));
    }

    #[googletest::test]
    fn test_missing_translation_tree_is_incomplete() {
        let table = ContentTable::parse([source(Locale::Es, &json!({ "CTA": { "A": "a" } }))]).unwrap();

        expect_that!(table.tree(Locale::En), none());
        expect_that!(table.is_complete(Locale::En), eq(false));
        expect_that!(table.locales().collect::<Vec<_>>(), elements_are![eq(&Locale::Es)]);
    }
}
