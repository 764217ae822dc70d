use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::locale::Locale;
use crate::resolver::FallbackMode;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "contentFiles.includePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CopySettings {
    pub content_files: ContentFilesConfig,

    /// Applied on top of `contentFiles.excludePatterns`.
    pub exclude_patterns: Vec<String>,

    pub key_separator: String,

    pub fallback: FallbackMode,

    /// Locales whose untranslated keys fail `check`.
    ///
    /// - `None`: untranslated keys are warnings for every locale (default)
    /// - `Some([...])`: untranslated keys are errors for the listed locales
    pub required_locales: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentFilesConfig {
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

impl CopySettings {
    /// # Errors
    /// - Empty separator
    /// - No content file pattern
    /// - Invalid glob pattern
    /// - Unsupported required locale
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        if self.content_files.include_patterns.is_empty() {
            errors.push(ValidationError::new(
                "contentFiles.includePatterns",
                "At least one pattern is required. Example: [\"**/locales/**/*.json\"]",
            ));
        }

        let pattern_groups = [
            ("contentFiles.includePatterns", &self.content_files.include_patterns),
            ("contentFiles.excludePatterns", &self.content_files.exclude_patterns),
            ("excludePatterns", &self.exclude_patterns),
        ];
        for (field, patterns) in pattern_groups {
            for (index, pattern) in patterns.iter().enumerate() {
                if let Err(e) = globset::Glob::new(pattern) {
                    errors.push(ValidationError::new(
                        format!("{field}[{index}]"),
                        format!("Invalid glob pattern '{pattern}': {e}"),
                    ));
                }
            }
        }

        if let Some(required) = &self.required_locales {
            for (index, code) in required.iter().enumerate() {
                if Locale::parse(code).is_none() {
                    let supported =
                        Locale::ALL.iter().map(|locale| locale.code()).collect::<Vec<_>>().join(", ");
                    errors.push(ValidationError::new(
                        format!("requiredLocales[{index}]"),
                        format!("Unsupported locale '{code}'. Supported locales: {supported}"),
                    ));
                }
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Parsed `requiredLocales`; unsupported codes are skipped.
    #[must_use]
    pub fn required_locales(&self) -> Vec<Locale> {
        self.required_locales
            .iter()
            .flatten()
            .filter_map(|code| Locale::parse(code))
            .collect()
    }
}

impl Default for ContentFilesConfig {
    fn default() -> Self {
        Self { include_patterns: vec!["**/locales/**/*.json".to_string()], exclude_patterns: vec![] }
    }
}

impl Default for CopySettings {
    fn default() -> Self {
        Self {
            content_files: ContentFilesConfig::default(),
            exclude_patterns: vec!["node_modules/**".to_string(), "target/**".to_string()],
            key_separator: ".".to_string(),
            fallback: FallbackMode::default(),
            required_locales: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = CopySettings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"fallback": "wholesale", "requiredLocales": ["en"]}"#;

        let settings: CopySettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.key_separator, eq("."));
        assert_that!(settings.fallback, eq(FallbackMode::Wholesale));
        assert_that!(settings.required_locales(), elements_are![eq(&Locale::En)]);
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let json = "{}";

        let settings: CopySettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.key_separator, eq("."));
        assert_that!(settings.fallback, eq(FallbackMode::PerKey));
        assert_that!(settings.content_files.include_patterns, elements_are![eq("**/locales/**/*.json")]);
        assert_that!(settings.exclude_patterns, elements_are![eq("node_modules/**"), eq("target/**")]);
        assert_that!(settings.required_locales, none());
    }

    #[rstest]
    fn deserialize_unknown_fallback_fails() {
        let json = r#"{"fallback": "never"}"#;

        let result = serde_json::from_str::<CopySettings>(json);

        assert_that!(result.is_err(), eq(true));
    }

    #[rstest]
    fn validate_invalid_key_separator_empty() {
        let settings = CopySettings { key_separator: String::new(), ..CopySettings::default() };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("keySeparator")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_include_patterns_empty() {
        let settings = CopySettings {
            content_files: ContentFilesConfig { include_patterns: vec![], exclude_patterns: vec![] },
            ..CopySettings::default()
        };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("contentFiles.includePatterns")),
                field!(ValidationError.message, contains_substring("At least one pattern"))
            ]])
        );
    }

    #[rstest]
    #[case::include(
        ContentFilesConfig { include_patterns: vec!["**/{locales/*.json".to_string()], exclude_patterns: vec![] },
        vec![],
        "contentFiles.includePatterns[0]"
    )]
    #[case::content_exclude(
        ContentFilesConfig { exclude_patterns: vec!["draft[".to_string()], ..ContentFilesConfig::default() },
        vec![],
        "contentFiles.excludePatterns[0]"
    )]
    #[case::exclude(
        ContentFilesConfig::default(),
        vec!["node_modules/**".to_string(), "invalid[pattern".to_string()],
        "excludePatterns[1]"
    )]
    fn validate_invalid_glob(
        #[case] content_files: ContentFilesConfig,
        #[case] exclude_patterns: Vec<String>,
        #[case] field_path: &str,
    ) {
        let settings = CopySettings { content_files, exclude_patterns, ..CopySettings::default() };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq(field_path)),
                field!(ValidationError.message, contains_substring("Invalid glob pattern"))
            ]])
        );
    }

    #[rstest]
    fn validate_unsupported_required_locale() {
        let settings = CopySettings {
            required_locales: Some(vec!["en".to_string(), "fr".to_string()]),
            ..CopySettings::default()
        };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("requiredLocales[1]")),
                field!(ValidationError.message, contains_substring("Unsupported locale 'fr'"))
            ]])
        );
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings = CopySettings {
            key_separator: String::new(),
            content_files: ContentFilesConfig { include_patterns: vec![], exclude_patterns: vec![] },
            ..CopySettings::default()
        };

        let validation_result = settings.validate();
        let errors = validation_result.unwrap_err();
        let config_error = ConfigError::ValidationErrors(errors);

        let error_message = format!("{config_error}");
        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. keySeparator"));
        assert_that!(error_message, contains_substring("cannot be empty"));
        assert_that!(error_message, contains_substring("2. contentFiles.includePatterns"));
        assert_that!(error_message, contains_substring("At least one pattern"));
    }
}
