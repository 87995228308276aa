//! Field projection - selects the requested subset of a field catalog.

use crate::types::FieldDescriptor;
use std::collections::HashSet;

/// Filters `catalog` down to the fields named in `requested`.
///
/// Output follows catalog order, not request order. A catalog field is kept
/// if its name appears anywhere in `requested`; duplicates in the request do
/// not duplicate output. Names with no catalog entry are dropped without
/// error.
pub fn project_fields<S: AsRef<str>>(
    catalog: &[FieldDescriptor],
    requested: &[S],
) -> Vec<FieldDescriptor> {
    let wanted: HashSet<&str> = requested.iter().map(|name| name.as_ref()).collect();

    let projected: Vec<FieldDescriptor> = catalog
        .iter()
        .filter(|field| wanted.contains(field.name.as_str()))
        .cloned()
        .collect();

    if tracing::enabled!(tracing::Level::DEBUG) {
        let unknown: Vec<&str> = wanted
            .iter()
            .copied()
            .filter(|name| !catalog.iter().any(|field| field.name == *name))
            .collect();
        if !unknown.is_empty() {
            tracing::debug!(?unknown, "Dropping requested fields not in catalog");
        }
    }

    projected
}
