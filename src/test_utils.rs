//! Helpers shared by unit tests.
#![cfg(test)]

use serde_json::Value;

use crate::content::{
    ContentSource,
    ContentTable,
};
use crate::locale::Locale;

/// Builds a table from one `es` and one `en` document.
///
/// The table is parsed but not validated, so tests can exercise
/// inconsistent content.
///
/// # Panics
/// Either document is not valid content.
#[allow(clippy::expect_used)]
pub(crate) fn table_from_json(es: &Value, en: &Value) -> ContentTable {
    ContentTable::parse([
        ContentSource::new(Locale::Es, "test:es", es.to_string()),
        ContentSource::new(Locale::En, "test:en", en.to_string()),
    ])
    .expect("test content should parse")
}
