//! File pattern matcher for content files.

use std::path::{
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};

use super::CopySettings;

#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Invalid content include pattern '{pattern}': {source}")]
    InvalidIncludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),
}

/// Matches files against configured glob patterns.
#[derive(Debug, Clone)]
pub struct FileMatcher {
    /// Directory the patterns are relative to.
    workspace_root: PathBuf,
    /// `contentFiles.includePatterns`.
    include_set: GlobSet,
    /// Top-level `excludePatterns`.
    exclude_set: GlobSet,
    /// `contentFiles.excludePatterns`.
    content_exclude_set: GlobSet,
}

impl FileMatcher {
    /// # Errors
    /// A pattern is not a valid glob.
    pub fn new(workspace_root: PathBuf, settings: &CopySettings) -> Result<Self, MatcherError> {
        let include_set =
            Self::build_glob_set(&settings.content_files.include_patterns, |pattern, source| {
                MatcherError::InvalidIncludePattern { pattern, source }
            })?;

        let exclude_set = Self::build_glob_set(&settings.exclude_patterns, |pattern, source| {
            MatcherError::InvalidExcludePattern { pattern, source }
        })?;

        let content_exclude_set =
            Self::build_glob_set(&settings.content_files.exclude_patterns, |pattern, source| {
                MatcherError::InvalidExcludePattern { pattern, source }
            })?;

        Ok(Self { workspace_root, include_set, exclude_set, content_exclude_set })
    }

    fn build_glob_set<F>(patterns: &[String], make_error: F) -> Result<GlobSet, MatcherError>
    where
        F: Fn(String, globset::Error) -> MatcherError,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| make_error(pattern.clone(), e))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }

    #[must_use]
    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Returns true if the path matches `contentFiles.includePatterns`
    /// but not `excludePatterns` or `contentFiles.excludePatterns`.
    ///
    /// The path must be absolute and under the workspace root.
    #[must_use]
    pub fn is_content_file(&self, absolute_path: &Path) -> bool {
        let Some(relative_path) = absolute_path.strip_prefix(&self.workspace_root).ok() else {
            return false;
        };

        self.is_content_file_relative(relative_path)
    }

    /// Same as [`is_content_file`](Self::is_content_file) for a path
    /// relative to the workspace root.
    #[must_use]
    pub fn is_content_file_relative(&self, relative_path: &Path) -> bool {
        self.include_set.is_match(relative_path)
            && !self.exclude_set.is_match(relative_path)
            && !self.content_exclude_set.is_match(relative_path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::path::PathBuf;

    use rstest::rstest;

    use super::*;
    use crate::config::ContentFilesConfig;

    fn create_settings(include: &[&str], content_exclude: &[&str], exclude: &[&str]) -> CopySettings {
        CopySettings {
            content_files: ContentFilesConfig {
                include_patterns: include.iter().copied().map(String::from).collect(),
                exclude_patterns: content_exclude.iter().copied().map(String::from).collect(),
            },
            exclude_patterns: exclude.iter().copied().map(String::from).collect(),
            ..CopySettings::default()
        }
    }

    #[rstest]
    fn is_content_file_with_default_patterns() {
        let settings = CopySettings::default();
        let matcher =
            FileMatcher::new(PathBuf::from("/workspace"), &settings).expect("valid patterns");

        assert!(matcher.is_content_file(Path::new("/workspace/locales/en.json")));
        assert!(matcher.is_content_file(Path::new("/workspace/web/locales/es/pricing.json")));

        assert!(!matcher.is_content_file(Path::new("/workspace/package.json")));
        assert!(!matcher.is_content_file(Path::new("/workspace/locales/README.md")));
        assert!(!matcher.is_content_file(Path::new("/workspace/node_modules/x/locales/en.json")));
        assert!(!matcher.is_content_file(Path::new("/workspace/target/locales/en.json")));
    }

    #[rstest]
    fn is_content_file_with_content_exclude() {
        let settings = create_settings(&["**/i18n/**/*.json"], &["**/drafts/**"], &[]);
        let matcher =
            FileMatcher::new(PathBuf::from("/workspace"), &settings).expect("valid patterns");

        assert!(matcher.is_content_file(Path::new("/workspace/i18n/en.json")));
        assert!(!matcher.is_content_file(Path::new("/workspace/i18n/drafts/en.json")));
    }

    #[rstest]
    fn is_content_file_outside_workspace() {
        let settings = CopySettings::default();
        let matcher =
            FileMatcher::new(PathBuf::from("/workspace"), &settings).expect("valid patterns");

        assert!(!matcher.is_content_file(Path::new("/other/locales/en.json")));
    }

    #[rstest]
    fn is_content_file_relative_works() {
        let settings = create_settings(&["**/locales/**/*.json"], &[], &[]);
        let matcher =
            FileMatcher::new(PathBuf::from("/workspace"), &settings).expect("valid patterns");

        assert!(matcher.is_content_file_relative(Path::new("locales/en.json")));
        assert!(!matcher.is_content_file_relative(Path::new("src/config.json")));
    }

    #[rstest]
    fn new_with_invalid_include_pattern() {
        let settings = create_settings(&["**/*.{json"], &[], &[]);

        let result = FileMatcher::new(PathBuf::from("/workspace"), &settings);

        assert!(matches!(result, Err(MatcherError::InvalidIncludePattern { .. })));
    }

    #[rstest]
    #[case(&[], &["[invalid"])]
    #[case(&["[invalid"], &[])]
    fn new_with_invalid_exclude_pattern(#[case] content_exclude: &[&str], #[case] exclude: &[&str]) {
        let settings = create_settings(&["**/*.json"], content_exclude, exclude);

        let result = FileMatcher::new(PathBuf::from("/workspace"), &settings);

        assert!(matches!(result, Err(MatcherError::InvalidExcludePattern { .. })));
    }

    #[rstest]
    fn workspace_root_accessor() {
        let settings = CopySettings::default();
        let matcher =
            FileMatcher::new(PathBuf::from("/workspace"), &settings).expect("valid patterns");

        assert_eq!(matcher.workspace_root(), Path::new("/workspace"));
    }
}
