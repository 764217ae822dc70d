//! Cross-locale consistency checks and translation coverage.
//!
//! The default locale is the reference: every other locale may omit paths
//! (they fall back), but may not add paths of its own or change the shape of
//! a shared path.

use std::fmt;

use super::node::{
    ContentNode,
    ContentTree,
    NodeKind,
};
use crate::key_path::KeyPath;
use crate::locale::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// The locale defines a path the default locale lacks.
    MissingInDefault,
    /// The locale and the default locale disagree on the kind of value at a path.
    ShapeMismatch { expected: NodeKind, found: NodeKind },
    /// The locale lacks a default-locale path and resolves it by fallback.
    Untranslated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentIssue {
    pub locale: Locale,
    pub path: KeyPath,
    pub kind: IssueKind,
}

impl ContentIssue {
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self.kind {
            IssueKind::MissingInDefault | IssueKind::ShapeMismatch { .. } => Severity::Error,
            IssueKind::Untranslated => Severity::Warning,
        }
    }
}

impl fmt::Display for ContentIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IssueKind::MissingInDefault => {
                write!(f, "[{}] '{}' is not defined in the default locale", self.locale, self.path)
            }
            IssueKind::ShapeMismatch { expected, found } => write!(
                f,
                "[{}] '{}' is {found} but the default locale has {expected}",
                self.locale, self.path
            ),
            IssueKind::Untranslated => {
                write!(f, "[{}] '{}' is not translated", self.locale, self.path)
            }
        }
    }
}

/// How much of the default locale's content a locale translates itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleCoverage {
    pub locale: Locale,
    /// Default-locale leaf paths this locale defines.
    pub translated: usize,
    /// Number of default-locale leaf paths.
    pub total: usize,
    /// Default-locale leaf paths resolved by fallback.
    pub missing: Vec<KeyPath>,
}

impl LocaleCoverage {
    /// Coverage in whole percent, rounded down.
    #[must_use]
    pub const fn percent(&self) -> usize {
        if self.total == 0 { 100 } else { self.translated * 100 / self.total }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditReport {
    pub default_locale: Locale,
    /// Leaf paths in the default locale.
    pub total_paths: usize,
    /// Sorted by locale, then path.
    pub issues: Vec<ContentIssue>,
    /// One entry per non-default locale.
    pub coverage: Vec<LocaleCoverage>,
}

impl AuditReport {
    /// Issues that break the table's invariants.
    pub fn errors(&self) -> impl Iterator<Item = &ContentIssue> {
        self.issues.iter().filter(|issue| issue.severity() == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ContentIssue> {
        self.issues.iter().filter(|issue| issue.severity() == Severity::Warning)
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Errors plus untranslated paths of `required` locales.
    #[must_use]
    pub fn errors_for(&self, required: &[Locale]) -> Vec<&ContentIssue> {
        self.issues
            .iter()
            .filter(|issue| {
                issue.severity() == Severity::Error
                    || (issue.kind == IssueKind::Untranslated && required.contains(&issue.locale))
            })
            .collect()
    }

    #[must_use]
    pub fn coverage_of(&self, locale: Locale) -> Option<&LocaleCoverage> {
        self.coverage.iter().find(|coverage| coverage.locale == locale)
    }
}

/// Compares every locale tree against the default tree.
///
/// `locales` lists the non-default locales to report on; a locale without a
/// tree is reported as having translated nothing.
pub(crate) fn audit<'a>(
    default_locale: Locale,
    default_tree: &ContentTree,
    locales: impl IntoIterator<Item = (Locale, Option<&'a ContentTree>)>,
) -> AuditReport {
    let reference = default_tree.leaves();
    let mut issues = Vec::new();
    let mut coverage = Vec::new();

    for (locale, tree) in locales {
        if locale == default_locale {
            continue;
        }
        let empty = ContentTree::default();
        let tree = tree.unwrap_or(&empty);

        check_against_default(locale, tree, default_tree, &mut issues);

        let missing: Vec<KeyPath> = reference
            .iter()
            .filter(|(path, _)| tree.get_path(path).is_none())
            .map(|(path, _)| path.clone())
            .collect();
        issues.extend(missing.iter().map(|path| ContentIssue {
            locale,
            path: path.clone(),
            kind: IssueKind::Untranslated,
        }));

        coverage.push(LocaleCoverage {
            locale,
            translated: reference.len().saturating_sub(missing.len()),
            total: reference.len(),
            missing,
        });
    }

    issues.sort_by(|a, b| (a.locale, &a.path).cmp(&(b.locale, &b.path)));
    issues.dedup();

    AuditReport { default_locale, total_paths: reference.len(), issues, coverage }
}

fn check_against_default(
    locale: Locale,
    tree: &ContentTree,
    default_tree: &ContentTree,
    issues: &mut Vec<ContentIssue>,
) {
    for (path, node) in tree.leaves() {
        if let Some(expected) = default_tree.get_path(&path) {
            if expected.kind() != node.kind() {
                issues.push(ContentIssue {
                    locale,
                    path,
                    kind: IssueKind::ShapeMismatch { expected: expected.kind(), found: node.kind() },
                });
            }
            continue;
        }

        // The default may hold a leaf where this locale opened a section.
        let leaf_prefix = (1..path.len())
            .map(|len| KeyPath::new(path.segments().iter().take(len).cloned()))
            .find_map(|prefix| match default_tree.get_path(&prefix) {
                Some(node) if !matches!(node, ContentNode::Section(_)) => Some((prefix, node)),
                _ => None,
            });

        let issue = match leaf_prefix {
            Some((prefix, expected)) => ContentIssue {
                locale,
                path: prefix,
                kind: IssueKind::ShapeMismatch {
                    expected: expected.kind(),
                    found: NodeKind::Section,
                },
            },
            None => ContentIssue { locale, path, kind: IssueKind::MissingInDefault },
        };
        issues.push(issue);
    }
}
