//! Table formatting for list results.
//!
//! This module maps raw field names to display headers and renders remote
//! objects as a fixed-width table, paging the output when it is taller than
//! the terminal.

use crate::console::Console;
use crate::model::{display_value, RemoteObject};
use std::collections::HashMap;
use tabled::builder::Builder;
use tabled::settings::Style;

/// Headers used when a resource does not supply its own.
pub const DEFAULT_FIELDS_MAP: &[(&str, &str)] = &[
    ("id", "ID"),
    ("name", "Name"),
    ("description", "Description"),
];

/// Error types that can occur during formatting operations
#[derive(Debug, thiserror::Error)]
pub enum FormattingError {
    /// A requested display field has no header mapping
    #[error("Could not map field {0:?} when displaying results.")]
    UnmappedField(String),
    /// An object lacks one of the requested display fields
    #[error("Object #{row} has no field {field:?}")]
    MissingField { field: String, row: usize },
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Mapping from internal field name to display header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap {
    headers: HashMap<String, String>,
}

impl FieldMap {
    pub fn new<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            headers: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Default map extended (or overridden) with `entries`.
    pub fn extended(entries: &[(&str, &str)]) -> Self {
        let mut map = Self::default();
        for (field, header) in entries {
            map.headers.insert(field.to_string(), header.to_string());
        }
        map
    }

    pub fn header(&self, field: &str) -> Option<&str> {
        self.headers.get(field).map(String::as_str)
    }
}

impl Default for FieldMap {
    fn default() -> Self {
        Self::new(DEFAULT_FIELDS_MAP.iter().copied())
    }
}

/// Translate `fields` to their display headers.
///
/// Fails on the first field without a mapping; no partial header row is
/// ever produced.
pub fn map_fields<S: AsRef<str>>(
    fields: &[S],
    fields_map: &FieldMap,
) -> Result<Vec<String>, FormattingError> {
    fields
        .iter()
        .map(|field| {
            let field = field.as_ref();
            fields_map
                .header(field)
                .map(str::to_string)
                .ok_or_else(|| FormattingError::UnmappedField(field.to_string()))
        })
        .collect()
}

/// Cells for every object, in `fields` order.
fn table_rows<S: AsRef<str>>(
    objects: &[RemoteObject],
    fields: &[S],
) -> Result<Vec<Vec<String>>, FormattingError> {
    objects
        .iter()
        .enumerate()
        .map(|(row, object)| {
            fields
                .iter()
                .map(|field| {
                    let field = field.as_ref();
                    object
                        .get(field)
                        .map(display_value)
                        .ok_or_else(|| FormattingError::MissingField {
                            field: field.to_string(),
                            row,
                        })
                })
                .collect()
        })
        .collect()
}

/// Render a header row and data rows as a plain fixed-width table.
pub fn render_table(headers: Vec<String>, rows: Vec<Vec<String>>) -> String {
    let mut builder = Builder::default();
    builder.push_record(headers);
    for row in rows {
        builder.push_record(row);
    }
    let mut table = builder.build();
    table.with(Style::psql());
    table.to_string()
}

/// Print `objects` as a table.
///
/// `fields` selects and orders the columns; when omitted every key of the
/// first object is shown. Every object must carry every selected field. The
/// table goes through the pager when it has more rows than the terminal.
pub fn print_list<C: Console + ?Sized>(
    console: &mut C,
    objects: &[RemoteObject],
    fields: Option<&[String]>,
    fields_map: &FieldMap,
) -> Result<(), FormattingError> {
    let fields: Vec<String> = match fields {
        Some(fields) => fields.to_vec(),
        None => objects
            .first()
            .map(|first| first.keys().cloned().collect())
            .unwrap_or_default(),
    };

    let headers = map_fields(&fields, fields_map)?;
    let rows = table_rows(objects, &fields)?;
    let row_count = rows.len();
    let table = render_table(headers, rows);

    match console.height() {
        Some(height) if row_count > height => console.echo_via_pager(&table)?,
        _ => console.echo(&table)?,
    }
    Ok(())
}
