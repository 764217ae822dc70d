//! Locale-independent addresses into a content tree.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Separator used by [`KeyPath`]'s `Display` and `FromStr` implementations.
pub const DEFAULT_SEPARATOR: &str = ".";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyPathError {
    #[error("Key path is empty")]
    Empty,

    #[error("Key path '{path}' has an empty segment at position {index}")]
    EmptySegment { path: String, index: usize },

    #[error("Key separator cannot be empty")]
    EmptySeparator,
}

/// An ordered sequence of keys, e.g. `["DEMO_PAGE", "FORM", "VALIDATION", "EMAIL_REQUIRED"]`.
///
/// Paths built from segments are not validated; a path with an empty segment
/// simply never resolves. Use [`KeyPath::parse`] for text coming from users.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyPath {
    /// Keys from the root, outermost first.
    segments: Vec<String>,
}

impl KeyPath {
    #[must_use]
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { segments: segments.into_iter().map(Into::into).collect() }
    }

    /// Splits `text` on `separator`.
    ///
    /// # Errors
    /// Empty text, an empty separator, or an empty segment (`"CTA..TITLE"`).
    pub fn parse(text: &str, separator: &str) -> Result<Self, KeyPathError> {
        if separator.is_empty() {
            return Err(KeyPathError::EmptySeparator);
        }
        if text.is_empty() {
            return Err(KeyPathError::Empty);
        }

        let segments: Vec<String> = text.split(separator).map(str::to_string).collect();
        if let Some(index) = segments.iter().position(String::is_empty) {
            return Err(KeyPathError::EmptySegment { path: text.to_string(), index });
        }

        Ok(Self { segments })
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns a new path with `key` appended.
    #[must_use]
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(key.into());
        Self { segments }
    }

    /// Returns the path without its last segment, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let (_, init) = self.segments.split_last()?;
        Some(Self { segments: init.to_vec() })
    }

    #[must_use]
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// Checks if `self` lies strictly below `parent`.
    #[must_use]
    pub fn is_child_of(&self, parent: &Self) -> bool {
        self.len() > parent.len() && self.starts_with(parent)
    }

    #[must_use]
    pub fn join(&self, separator: &str) -> String {
        self.segments.join(separator)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join(DEFAULT_SEPARATOR))
    }
}

impl FromStr for KeyPath {
    type Err = KeyPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, DEFAULT_SEPARATOR)
    }
}

impl<const N: usize> From<[&str; N]> for KeyPath {
    fn from(segments: [&str; N]) -> Self {
        Self::new(segments)
    }
}

impl From<&[&str]> for KeyPath {
    fn from(segments: &[&str]) -> Self {
        Self::new(segments.iter().copied())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("CTA.GET_FREE_DEMO", ".", &["CTA", "GET_FREE_DEMO"])]
    #[case("DEMO_PAGE.FORM.VALIDATION.EMAIL_REQUIRED", ".", &["DEMO_PAGE", "FORM", "VALIDATION", "EMAIL_REQUIRED"])]
    #[case("HERO", ".", &["HERO"])]
    #[case("FAQ:TITLE", ":", &["FAQ", "TITLE"])]
    #[case("a/b/c", "/", &["a", "b", "c"])]
    fn test_parse(#[case] text: &str, #[case] separator: &str, #[case] expected: &[&str]) {
        let path = KeyPath::parse(text, separator).unwrap();

        assert_that!(path, eq(&KeyPath::from(expected)));
    }

    #[rstest]
    #[case("", ".", KeyPathError::Empty)]
    #[case("CTA", "", KeyPathError::EmptySeparator)]
    #[case("CTA..TITLE", ".", KeyPathError::EmptySegment { path: "CTA..TITLE".to_string(), index: 1 })]
    #[case(".CTA", ".", KeyPathError::EmptySegment { path: ".CTA".to_string(), index: 0 })]
    #[case("CTA.", ".", KeyPathError::EmptySegment { path: "CTA.".to_string(), index: 1 })]
    fn test_parse_errors(
        #[case] text: &str,
        #[case] separator: &str,
        #[case] expected: KeyPathError,
    ) {
        assert_that!(KeyPath::parse(text, separator), err(eq(&expected)));
    }

    #[googletest::test]
    fn test_display_round_trips_through_from_str() {
        let path = KeyPath::from(["PRICING", "TIERS"]);

        expect_that!(path.to_string(), eq("PRICING.TIERS"));
        expect_that!("PRICING.TIERS".parse::<KeyPath>(), ok(eq(&path)));
    }

    #[googletest::test]
    fn test_child_and_parent() {
        let root = KeyPath::from(["DEMO_PAGE"]);
        let form = root.child("FORM");

        expect_that!(form, eq(&KeyPath::from(["DEMO_PAGE", "FORM"])));
        expect_that!(form.parent(), some(eq(&root)));
        expect_that!(root.parent(), some(eq(&KeyPath::default())));
        expect_that!(KeyPath::default().parent(), none());
    }

    #[rstest]
    #[case(&["FAQ", "ITEMS"], &["FAQ"], true)]
    #[case(&["DEMO_PAGE", "FORM", "SUBMIT"], &["DEMO_PAGE"], true)]
    #[case(&["FAQ"], &["FAQ"], false)]
    #[case(&["FAQS", "ITEMS"], &["FAQ"], false)]
    #[case(&["HERO", "TITLE"], &["FAQ"], false)]
    fn test_is_child_of(#[case] child: &[&str], #[case] parent: &[&str], #[case] expected: bool) {
        assert_that!(KeyPath::from(child).is_child_of(&KeyPath::from(parent)), eq(expected));
    }
}
