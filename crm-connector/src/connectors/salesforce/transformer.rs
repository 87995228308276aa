use serde_json::Value;

use super::api::RawRecord;
use crate::types::{FieldDescriptor, OutputRow};

/// Where a field's value comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FieldSource {
    /// Copied verbatim from the named raw attribute (`null` when absent).
    Attribute(&'static str),
    /// Same value for every record.
    Constant(i64),
}

/// Known field names and how to resolve them. Anything else resolves to `""`.
const FIELD_SOURCES: &[(&str, FieldSource)] = &[
    ("Name", FieldSource::Attribute("Name")),
    ("Site", FieldSource::Attribute("Site")),
    ("Type", FieldSource::Attribute("Type")),
    ("count", FieldSource::Constant(1)),
];

const ACCOUNT_SOBJECT: &str = "Account";

fn source_for(field_name: &str) -> Option<FieldSource> {
    FIELD_SOURCES
        .iter()
        .find(|(name, _)| *name == field_name)
        .map(|(_, source)| *source)
}

/// Resolve one field of one record. Never fails.
pub fn resolve_value(field_name: &str, record: &RawRecord) -> Value {
    match source_for(field_name) {
        Some(FieldSource::Attribute(attr)) => record.get(attr).cloned().unwrap_or(Value::Null),
        Some(FieldSource::Constant(n)) => Value::from(n),
        None => Value::String(String::new()),
    }
}

/// Transform a raw account record into a row aligned with `fields`.
pub fn record_to_row(record: &RawRecord, fields: &[FieldDescriptor]) -> OutputRow {
    OutputRow {
        values: fields
            .iter()
            .map(|field| resolve_value(&field.name, record))
            .collect(),
    }
}

/// Raw attributes the resolver table reads, in table order.
pub fn raw_attributes() -> Vec<&'static str> {
    FIELD_SOURCES
        .iter()
        .filter_map(|(_, source)| match source {
            FieldSource::Attribute(attr) => Some(*attr),
            FieldSource::Constant(_) => None,
        })
        .collect()
}

/// SOQL selecting every raw attribute from `Account`.
///
/// Static: it does not depend on which fields a call projects.
pub fn account_query() -> String {
    format!(
        "SELECT {} FROM {}",
        raw_attributes().join(", "),
        ACCOUNT_SOBJECT
    )
}
