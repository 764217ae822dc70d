//! Supported locales and the default locale used for fallback.

use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// Returned by strict parsing when a code is not in the supported set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported locale '{0}'")]
pub struct UnsupportedLocale(pub String);

/// A locale the site ships content for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Spanish. The default locale; its content tree is complete.
    Es,
    /// English.
    En,
}

impl Locale {
    /// Every supported locale, default first.
    pub const ALL: [Self; 2] = [Self::Es, Self::En];

    /// The two-letter code used in routes and file names.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Es => "es",
            Self::En => "en",
        }
    }

    /// Parses a locale code.
    ///
    /// Matching is case-insensitive. Region-qualified tags (`es-MX`, `en_US`,
    /// `es-419`) resolve by their language subtag; any other suffix is rejected.
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        let (language, region) = match code.split_once(['-', '_']) {
            Some((language, region)) => (language, Some(region)),
            None => (code, None),
        };
        if region.is_some_and(|region| !is_region_subtag(region)) {
            return None;
        }
        Self::ALL.into_iter().find(|locale| locale.code().eq_ignore_ascii_case(language))
    }

    /// Parses a locale code, degrading unsupported codes to [`default_locale`].
    #[must_use]
    pub fn from_code_or_default(code: &str) -> Self {
        Self::parse(code).unwrap_or_else(|| {
            tracing::debug!(code, fallback = %default_locale(), "Unsupported locale, using default");
            default_locale()
        })
    }

    #[must_use]
    pub fn is_default(self) -> bool {
        self == default_locale()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = UnsupportedLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnsupportedLocale(s.to_string()))
    }
}

/// Two ASCII letters (`MX`) or three ASCII digits (`419`).
fn is_region_subtag(subtag: &str) -> bool {
    let bytes = subtag.as_bytes();
    match bytes.len() {
        2 => bytes.iter().all(u8::is_ascii_alphabetic),
        3 => bytes.iter().all(u8::is_ascii_digit),
        _ => false,
    }
}

/// Returns true if `code` names a supported locale.
#[must_use]
pub fn is_supported(code: &str) -> bool {
    Locale::parse(code).is_some()
}

/// The fallback locale and the binding of the legacy copy view.
#[must_use]
pub const fn default_locale() -> Locale {
    Locale::Es
}
