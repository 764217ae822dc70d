//! site-copy
//!
//! Locale-aware marketing copy for the restaurant platform site: per-locale
//! content tables, key path resolution with fallback to the default locale,
//! and a default-locale view for call sites that do not pass a locale.
//!
//! ```
//! use site_copy::{KeyPath, Locale};
//!
//! let path = KeyPath::from(["CTA", "GET_FREE_DEMO"]);
//! let value = site_copy::resolve(Locale::En, &path)?;
//! assert_eq!(value.as_text(), Some("Get Demo"));
//! # Ok::<(), site_copy::ResolveError>(())
//! ```

pub mod cli;
pub mod config;
pub mod content;
pub mod key_path;
pub mod legacy;
pub mod locale;
pub mod resolver;
pub mod workspace;

mod test_utils;

pub use content::{
    ContentError,
    ContentTable,
    ContentTree,
};
pub use key_path::KeyPath;
pub use legacy::LegacyCopy;
pub use locale::{
    Locale,
    default_locale,
    is_supported,
};
pub use resolver::{
    FallbackMode,
    ResolveError,
    ResolvedValue,
    Resolver,
};

/// Resolves `path` for `locale` against the built-in content.
///
/// # Errors
/// - [`ResolveError::KeyNotFound`] when neither `locale` nor the default
///   locale defines the path
/// - [`ResolveError::Content`] when the built-in content failed to load
pub fn resolve(locale: Locale, path: &KeyPath) -> Result<ResolvedValue<'static>, ResolveError> {
    Resolver::builtin()?.resolve(locale, path)
}
