//! Command bodies for the `site-copy` binary.
//!
//! Each command writes its output to `out` and returns the exit status; the
//! binary only parses arguments, loads settings and picks the writer.

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;

use crate::config::CopySettings;
use crate::content::{
    AuditReport,
    ContentTable,
};
use crate::key_path::KeyPath;
use crate::locale::Locale;
use crate::resolver::{
    ResolvedValue,
    Resolver,
};
use crate::workspace;

/// Outcome of a command that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    /// The command ran but found problems (`check` with errors).
    Failure,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => Self::SUCCESS,
            Status::Failure => Self::FAILURE,
        }
    }
}

/// Loads the workspace table when `root` is set, else the built-in table.
///
/// `check` loads without validation so it can report every issue itself.
///
/// # Errors
/// - The workspace could not be read or parsed
/// - `validate` is set and the content is inconsistent across locales
pub fn load_table(
    root: Option<&Path>,
    settings: &CopySettings,
    validate: bool,
) -> anyhow::Result<ContentTable> {
    let table = match root {
        Some(root) => {
            let table = workspace::parse_workspace(root, settings)
                .with_context(|| format!("failed to load content from {}", root.display()))?;
            if validate {
                table.validate()?;
            }
            table
        }
        None => ContentTable::builtin()?.clone(),
    };
    Ok(table)
}

/// Prints the value at `path` for `locale`.
///
/// Text is printed as is; lists, records and sections as pretty JSON.
///
/// # Errors
/// - `path` is not a valid key path
/// - Neither `locale` nor the default locale defines `path`
/// - Writing to `out` failed
pub fn resolve(
    out: &mut impl Write,
    table: &ContentTable,
    settings: &CopySettings,
    locale: &str,
    path: &str,
) -> anyhow::Result<Status> {
    let resolver = Resolver::new(table, settings.fallback);
    let locale = Locale::from_code_or_default(locale);
    let path = KeyPath::parse(path, &settings.key_separator)?;

    let resolution = resolver.lookup(locale, &path)?;
    if resolution.is_fallback() {
        tracing::warn!(
            %path,
            requested = %resolution.requested,
            served_by = %resolution.served_by,
            "Resolved by fallback"
        );
    }
    write_value(out, resolution.value)?;
    Ok(Status::Success)
}

/// Lists the leaf keys of `locale` (the default locale when `None`), one per
/// line, with tab-separated values when `values` is set.
///
/// # Errors
/// Writing to `out` failed.
pub fn keys(
    out: &mut impl Write,
    table: &ContentTable,
    settings: &CopySettings,
    locale: Option<Locale>,
    values: bool,
) -> anyhow::Result<Status> {
    let locale = locale.unwrap_or_else(|| table.default_locale());
    let Some(tree) = table.tree(locale) else {
        tracing::warn!(%locale, "No content loaded for locale");
        return Ok(Status::Success);
    };

    for (key, value) in tree.flatten(&settings.key_separator) {
        if values {
            writeln!(out, "{key}\t{value}")?;
        } else {
            writeln!(out, "{key}")?;
        }
    }
    Ok(Status::Success)
}

/// Prints coverage and issues; fails on structural errors and on
/// untranslated paths of `requiredLocales`.
///
/// # Errors
/// Writing to `out` failed.
pub fn check(
    out: &mut impl Write,
    table: &ContentTable,
    settings: &CopySettings,
) -> anyhow::Result<Status> {
    let report = table.audit();
    write_report(out, &report)?;

    let errors = report.errors_for(&settings.required_locales());
    if !errors.is_empty() {
        writeln!(out)?;
        writeln!(out, "{} error(s):", errors.len())?;
        for issue in errors {
            writeln!(out, "  {issue}")?;
        }
        return Ok(Status::Failure);
    }
    writeln!(out, "OK")?;
    Ok(Status::Success)
}

fn write_value(out: &mut impl Write, value: ResolvedValue<'_>) -> anyhow::Result<()> {
    match value {
        ResolvedValue::Text(text) => writeln!(out, "{text}")?,
        other => writeln!(out, "{}", serde_json::to_string_pretty(&other)?)?,
    }
    Ok(())
}

fn write_report(out: &mut impl Write, report: &AuditReport) -> std::io::Result<()> {
    writeln!(out, "Default locale: {} ({} keys)", report.default_locale, report.total_paths)?;
    for coverage in &report.coverage {
        writeln!(
            out,
            "  {}: {}/{} translated ({}%)",
            coverage.locale,
            coverage.translated,
            coverage.total,
            coverage.percent()
        )?;
    }

    let warnings: Vec<_> = report.warnings().collect();
    if !warnings.is_empty() {
        writeln!(out)?;
        writeln!(out, "{} untranslated key(s), served by fallback:", warnings.len())?;
        for issue in warnings {
            writeln!(out, "  {issue}")?;
        }
    }
    Ok(())
}
