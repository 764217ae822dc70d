use thiserror::Error;

use super::audit::ContentIssue;
use super::records::RecordShape;
use crate::key_path::KeyPath;
use crate::locale::Locale;

/// Errors raised while building or validating a content table.
///
/// Cloneable so the lazily built table can hand the same error to every caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("Failed to parse content '{origin}': {message}")]
    Parse { origin: String, message: String },

    #[error("Invalid value at '{path}' in '{origin}': expected text, a list or a section, found {found}")]
    InvalidValue { origin: String, path: KeyPath, found: &'static str },

    #[error("Invalid key '{key}' under '{path}' in '{origin}'")]
    InvalidKey { origin: String, path: KeyPath, key: String },

    #[error("List at '{path}' in '{origin}' mixes text items and records")]
    MixedList { origin: String, path: KeyPath },

    #[error("Unknown record shape at '{path}' in '{origin}' (fields: {fields})")]
    UnknownRecordShape { origin: String, path: KeyPath, fields: String },

    #[error("Invalid {shape} record in list '{path}' of '{origin}': {message}")]
    InvalidRecord { origin: String, path: KeyPath, shape: RecordShape, message: String },

    #[error("Key '{path}' is defined twice for locale '{locale}' (in '{origin}')")]
    DuplicateKey { locale: Locale, path: KeyPath, origin: String },

    #[error("No content for the default locale '{0}'")]
    MissingDefaultLocale(Locale),

    #[error("Content table is inconsistent:\n{}", format_issues(.0))]
    Inconsistent(Vec<ContentIssue>),
}

fn format_issues(issues: &[ContentIssue]) -> String {
    issues
        .iter()
        .enumerate()
        .map(|(i, issue)| format!("  {}. {issue}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}
