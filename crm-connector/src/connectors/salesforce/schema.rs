//! Account field catalog.

use crate::projection::project_fields;
use crate::types::{DataType, FieldDescriptor};
use std::sync::LazyLock;

static ACCOUNT_FIELDS: LazyLock<Vec<FieldDescriptor>> = LazyLock::new(|| {
    vec![
        FieldDescriptor::dimension("Name", "Name", DataType::String),
        FieldDescriptor::dimension("Site", "Site", DataType::String)
            .with_group("Geo")
            .with_semantic_type("CITY"),
        FieldDescriptor::dimension("Type", "Type", DataType::String),
        FieldDescriptor::metric("count", "Count", DataType::Number, true),
    ]
});

/// Every field the connector can emit, in catalog order.
pub fn list_fields() -> &'static [FieldDescriptor] {
    &ACCOUNT_FIELDS
}

/// Catalog fields named in `requested`, in catalog order.
pub fn project<S: AsRef<str>>(requested: &[S]) -> Vec<FieldDescriptor> {
    project_fields(list_fields(), requested)
}
