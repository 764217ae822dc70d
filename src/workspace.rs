//! Loading a content table from locale files on disk.
//!
//! Files are discovered under a workspace root with the configured glob
//! patterns. Each file's locale comes from its path (`locales/en.json`,
//! `locales/en/pricing.json`, `locales/pricing/en.json`) and so does its
//! optional namespace.

use std::path::{
    Path,
    PathBuf,
};

use ignore::WalkBuilder;
use thiserror::Error;

use crate::config::{
    CopySettings,
    FileMatcher,
    MatcherError,
};
use crate::content::{
    ContentError,
    ContentSource,
    ContentTable,
};
use crate::locale::Locale;

/// Directory names that group locale files without naming a namespace.
const COMMON_PARENTS: [&str; 7] =
    ["locales", "messages", "translations", "i18n", "lang", "langs", "content"];

#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error(transparent)]
    Matcher(#[from] MatcherError),

    #[error("Failed to read content file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No content files found under '{}'", .0.display())]
    NoContentFiles(PathBuf),

    #[error(transparent)]
    Content(#[from] ContentError),
}

/// Finds the locale a content file belongs to.
///
/// Path parts, split on `/` and `.`, are searched from the end so the file
/// name wins over directory names.
#[must_use]
pub fn detect_locale_from_path(file_path: &Path) -> Option<Locale> {
    let path_str = file_path.to_string_lossy();
    path_str.split(['/', '\\', '.']).rev().find_map(Locale::parse)
}

/// Finds the namespace a content file is mounted under.
///
/// # Examples
/// - `locales/en/pricing.json` -> `Some("pricing")` (file name)
/// - `locales/pricing/en.json` -> `Some("pricing")` (directory name)
/// - `locales/en.json` -> `None`
#[must_use]
pub fn detect_namespace_from_path(file_path: &Path) -> Option<String> {
    let file_stem = file_path.file_stem()?.to_string_lossy().to_string();
    if Locale::parse(&file_stem).is_none() {
        return Some(file_stem);
    }

    let parent_name = file_path.parent()?.file_name()?.to_string_lossy().to_string();
    if Locale::parse(&parent_name).is_none()
        && !COMMON_PARENTS.contains(&parent_name.to_lowercase().as_str())
    {
        return Some(parent_name);
    }

    None
}

/// Walks the matcher's workspace root and returns matching content files,
/// sorted by path.
///
/// `.gitignore` rules are honored; unreadable directory entries are skipped.
#[must_use]
pub fn find_content_files(matcher: &FileMatcher) -> Vec<PathBuf> {
    let workspace_path = matcher.workspace_root();
    tracing::debug!(workspace_path = %workspace_path.display(), "Searching for content files");

    let mut found_files = Vec::new();
    for result in WalkBuilder::new(workspace_path)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .follow_links(false)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        if matcher.is_content_file(path) {
            found_files.push(path.to_path_buf());
        }
    }

    found_files.sort();
    tracing::debug!(count = found_files.len(), "Found content files");
    found_files
}

/// Builds a validated content table from the files under `workspace_root`.
///
/// Files whose locale cannot be detected are skipped with a warning.
///
/// # Errors
/// - Invalid glob patterns in `settings`
/// - No content files were found
/// - A content file could not be read
/// - The content is invalid or inconsistent across locales
pub fn load_workspace(
    workspace_root: &Path,
    settings: &CopySettings,
) -> Result<ContentTable, WorkspaceError> {
    Ok(ContentTable::load(read_sources(workspace_root, settings)?)?)
}

/// Like [`load_workspace`] but keeps content that is inconsistent across
/// locales, so it can be audited.
///
/// # Errors
/// Same as [`load_workspace`] except for cross-locale consistency.
pub fn parse_workspace(
    workspace_root: &Path,
    settings: &CopySettings,
) -> Result<ContentTable, WorkspaceError> {
    Ok(ContentTable::parse(read_sources(workspace_root, settings)?)?)
}

fn read_sources(
    workspace_root: &Path,
    settings: &CopySettings,
) -> Result<Vec<ContentSource>, WorkspaceError> {
    let matcher = FileMatcher::new(workspace_root.to_path_buf(), settings)?;
    let files = find_content_files(&matcher);
    if files.is_empty() {
        return Err(WorkspaceError::NoContentFiles(workspace_root.to_path_buf()));
    }

    let mut sources = Vec::with_capacity(files.len());
    for path in files {
        let relative_path = path.strip_prefix(workspace_root).unwrap_or(&path);
        let Some(locale) = detect_locale_from_path(relative_path) else {
            tracing::warn!(path = %path.display(), "Skipping content file without a locale");
            continue;
        };

        let text = std::fs::read_to_string(&path)
            .map_err(|source| WorkspaceError::Io { path: path.clone(), source })?;

        let mut source = ContentSource::new(locale, path.display().to_string(), text);
        if let Some(namespace) = detect_namespace_from_path(relative_path) {
            source = source.with_namespace(namespace);
        }
        sources.push(source);
    }

    Ok(sources)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::key_path::KeyPath;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[rstest]
    #[case("locales/en.json", Some(Locale::En))]
    #[case("locales/es/pricing.json", Some(Locale::Es))]
    #[case("locales/pricing/es-MX.json", Some(Locale::Es))]
    #[case("web/public/locales/en/faq.json", Some(Locale::En))]
    #[case("locales/fr.json", None)]
    #[case("locales/common.json", None)]
    #[case("locales/es/en_vivo.json", Some(Locale::Es))]
    fn test_detect_locale_from_path(#[case] path: &str, #[case] expected: Option<Locale>) {
        assert_that!(detect_locale_from_path(Path::new(path)), eq(expected));
    }

    #[rstest]
    #[case("locales/en.json", None)]
    #[case("locales/en/pricing.json", Some("pricing"))]
    #[case("locales/pricing/en.json", Some("pricing"))]
    #[case("content/es.json", None)]
    #[case("i18n/es_ES.json", None)]
    #[case("locales/es/en_vivo.json", Some("en_vivo"))]
    fn test_detect_namespace_from_path(#[case] path: &str, #[case] expected: Option<&str>) {
        assert_that!(detect_namespace_from_path(Path::new(path)).as_deref(), eq(expected));
    }

    #[rstest]
    fn test_find_content_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "locales/es.json", "{}");
        write(root, "locales/en.json", "{}");
        write(root, "node_modules/pkg/locales/en.json", "{}");
        write(root, "package.json", "{}");

        let matcher = FileMatcher::new(root.to_path_buf(), &CopySettings::default()).unwrap();
        let files = find_content_files(&matcher);

        assert_eq!(files, vec![root.join("locales/en.json"), root.join("locales/es.json")]);
    }

    #[rstest]
    fn test_load_workspace_merges_namespaces() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "locales/es/cta.json", r#"{ "GET_FREE_DEMO": "Agendar Demo" }"#);
        write(root, "locales/es/faq.json", r#"{ "TITLE": "Preguntas frecuentes" }"#);
        write(root, "locales/en/cta.json", r#"{ "GET_FREE_DEMO": "Get Demo" }"#);

        let table = load_workspace(root, &CopySettings::default()).unwrap();

        let en = table.tree(Locale::En).unwrap();
        assert_that!(
            en.get_path(&KeyPath::from(["cta", "GET_FREE_DEMO"])).map(|node| node.kind().to_string()),
            some(eq("text"))
        );
        assert_that!(table.default_tree().len(), eq(2));
        assert_that!(table.is_complete(Locale::En), eq(false));
    }

    #[rstest]
    fn test_load_workspace_skips_files_without_locale() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "locales/es.json", r#"{ "CTA": { "A": "a" } }"#);
        write(root, "locales/shared.json", r#"{ "CTA": { "B": "b" } }"#);

        let table = load_workspace(root, &CopySettings::default()).unwrap();

        assert_that!(table.locales().collect::<Vec<_>>(), elements_are![eq(&Locale::Es)]);
        assert_that!(table.default_tree().get_path(&KeyPath::from(["CTA", "B"])), none());
    }

    #[rstest]
    fn test_load_workspace_without_files() {
        let temp_dir = TempDir::new().unwrap();

        let result = load_workspace(temp_dir.path(), &CopySettings::default());

        assert!(matches!(result, Err(WorkspaceError::NoContentFiles(_))));
    }

    #[rstest]
    fn test_load_workspace_rejects_inconsistent_content() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "locales/es.json", r#"{ "CTA": { "A": "a" } }"#);
        write(root, "locales/en.json", r#"{ "CTA": { "A": "a", "EXTRA": "x" } }"#);

        let result = load_workspace(root, &CopySettings::default());

        assert!(matches!(result, Err(WorkspaceError::Content(ContentError::Inconsistent(_)))));
        let table = parse_workspace(root, &CopySettings::default()).unwrap();
        assert_that!(table.audit().has_errors(), eq(true));
    }

    #[rstest]
    fn test_load_workspace_reports_parse_errors() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "locales/es.json", "{ not json");

        let result = load_workspace(root, &CopySettings::default());

        assert!(matches!(result, Err(WorkspaceError::Content(ContentError::Parse { .. }))));
    }
}
