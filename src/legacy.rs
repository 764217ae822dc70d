//! Default-locale view for call sites that do not pass a locale yet.
//!
//! [`LegacyCopy`] is a [`Resolver`] pinned to the default locale. It reads the
//! same table as every other resolver, so content edits show up in both.
//!
//! ```
//! let copy = site_copy::legacy::copy()?;
//! assert_eq!(copy.section("CTA").text("GET_FREE_DEMO")?, "Agendar Demo");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::content::{
    ContentError,
    ContentTree,
    FaqEntry,
    Feature,
    PricingTier,
};
use crate::key_path::KeyPath;
use crate::locale::Locale;
use crate::resolver::{
    ResolveError,
    ResolvedValue,
    Resolver,
};

/// The built-in content bound to the default locale.
///
/// # Errors
/// The built-in content failed to load.
pub fn copy() -> Result<LegacyCopy<'static>, ContentError> {
    Ok(LegacyCopy::new(Resolver::builtin()?))
}

#[derive(Debug, Clone, Copy)]
pub struct LegacyCopy<'t> {
    /// Every read goes through this resolver with the default locale.
    resolver: Resolver<'t>,
}

impl<'t> LegacyCopy<'t> {
    #[must_use]
    pub const fn new(resolver: Resolver<'t>) -> Self {
        Self { resolver }
    }

    /// Always the default locale.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.resolver.default_locale()
    }

    /// # Errors
    /// See [`Resolver::resolve`].
    pub fn get(&self, path: &KeyPath) -> Result<ResolvedValue<'t>, ResolveError> {
        self.resolver.resolve(self.locale(), path)
    }

    /// # Errors
    /// See [`Resolver::text`].
    pub fn text(&self, path: &KeyPath) -> Result<&'t str, ResolveError> {
        self.resolver.text(self.locale(), path)
    }

    /// # Errors
    /// See [`Resolver::list`].
    pub fn list(&self, path: &KeyPath) -> Result<&'t [String], ResolveError> {
        self.resolver.list(self.locale(), path)
    }

    /// A cursor at the top-level section `key`.
    ///
    /// Nothing is looked up until a leaf is read.
    #[must_use]
    pub fn section(&self, key: &str) -> LegacySection<'t> {
        LegacySection { copy: *self, path: KeyPath::new([key]) }
    }
}

/// A position inside the default-locale content, read like nested properties.
#[derive(Debug, Clone)]
pub struct LegacySection<'t> {
    /// View the section was opened from.
    copy: LegacyCopy<'t>,
    /// Path of this section from the content root.
    path: KeyPath,
}

impl<'t> LegacySection<'t> {
    #[must_use]
    pub fn section(&self, key: &str) -> Self {
        Self { copy: self.copy, path: self.path.child(key) }
    }

    #[must_use]
    pub const fn path(&self) -> &KeyPath {
        &self.path
    }

    /// The section itself.
    ///
    /// # Errors
    /// See [`Resolver::section`].
    pub fn tree(&self) -> Result<&'t ContentTree, ResolveError> {
        self.copy.resolver.section(self.copy.locale(), &self.path)
    }

    /// # Errors
    /// See [`Resolver::resolve`].
    pub fn get(&self, key: &str) -> Result<ResolvedValue<'t>, ResolveError> {
        self.copy.get(&self.path.child(key))
    }

    /// # Errors
    /// See [`Resolver::text`].
    pub fn text(&self, key: &str) -> Result<&'t str, ResolveError> {
        self.copy.text(&self.path.child(key))
    }

    /// # Errors
    /// See [`Resolver::list`].
    pub fn list(&self, key: &str) -> Result<&'t [String], ResolveError> {
        self.copy.list(&self.path.child(key))
    }

    /// # Errors
    /// See [`Resolver::faq`].
    pub fn faq(&self, key: &str) -> Result<&'t [FaqEntry], ResolveError> {
        self.copy.resolver.faq(self.copy.locale(), &self.path.child(key))
    }

    /// # Errors
    /// See [`Resolver::pricing`].
    pub fn pricing(&self, key: &str) -> Result<&'t [PricingTier], ResolveError> {
        self.copy.resolver.pricing(self.copy.locale(), &self.path.child(key))
    }

    /// # Errors
    /// See [`Resolver::features`].
    pub fn features(&self, key: &str) -> Result<&'t [Feature], ResolveError> {
        self.copy.resolver.features(self.copy.locale(), &self.path.child(key))
    }
}
