use serde::{Deserialize, Serialize};

/// Column data type as understood by the reporting platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataType {
    String,
    Number,
    Boolean,
}

/// Semantic role of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConceptType {
    Dimension,
    Metric,
}

/// Semantic metadata attached to a field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Semantics {
    pub concept_type: ConceptType,

    /// Platform semantic type, e.g. `"CITY"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_reaggregatable: Option<bool>,
}

/// Schema metadata for one emittable column.
///
/// `name` is the only join key between a [`FieldRequest`] and a descriptor.
///
/// # Example
/// ```
/// use crm_connector::{ConceptType, DataType, FieldDescriptor};
///
/// let field = FieldDescriptor::dimension("Name", "Name", DataType::String);
/// assert_eq!(field.semantics.concept_type, ConceptType::Dimension);
/// assert!(field.group.is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub data_type: DataType,
    pub semantics: Semantics,
}

impl FieldDescriptor {
    /// A dimension with no group and no semantic type.
    pub fn dimension(name: &str, label: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            group: None,
            data_type,
            semantics: Semantics {
                concept_type: ConceptType::Dimension,
                semantic_type: None,
                is_reaggregatable: None,
            },
        }
    }

    /// A metric with no group.
    pub fn metric(name: &str, label: &str, data_type: DataType, is_reaggregatable: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            group: None,
            data_type,
            semantics: Semantics {
                concept_type: ConceptType::Metric,
                semantic_type: None,
                is_reaggregatable: Some(is_reaggregatable),
            },
        }
    }

    pub fn with_group(mut self, group: &str) -> Self {
        self.group = Some(group.to_string());
        self
    }

    pub fn with_semantic_type(mut self, semantic_type: &str) -> Self {
        self.semantics.semantic_type = Some(semantic_type.to_string());
        self
    }
}

/// Kind of a configuration entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConfigParamType {
    /// Informational text; collects no input.
    Info,
}

/// One entry of the `getConfig` response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigParam {
    #[serde(rename = "type")]
    pub param_type: ConfigParamType,
    pub name: String,
    pub text: String,
}

/// Response of `getConfig`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSchema {
    pub config_params: Vec<ConfigParam>,
}

impl ConfigSchema {
    /// A configuration made of a single informational message.
    pub fn info_only(name: &str, text: &str) -> Self {
        Self {
            config_params: vec![ConfigParam {
                param_type: ConfigParamType::Info,
                name: name.to_string(),
                text: text.to_string(),
            }],
        }
    }
}

/// Platform-managed authentication mechanisms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuthType {
    /// The platform collects no credential from the end user.
    None,
}

/// Response of `getAuthType`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTypeResponse {
    #[serde(rename = "type")]
    pub auth_type: AuthType,
}

impl AuthTypeResponse {
    pub fn none() -> Self {
        Self {
            auth_type: AuthType::None,
        }
    }
}

/// Response of `getSchema`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetSchemaResponse {
    pub schema: Vec<FieldDescriptor>,
}

/// One requested field of a `getData` call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRequest {
    pub name: String,
}

/// Request body of `getData`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetDataRequest {
    pub fields: Vec<FieldRequest>,
}

impl GetDataRequest {
    /// Build a request from bare field names (mostly for tests and tools).
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: names
                .into_iter()
                .map(|name| FieldRequest { name: name.into() })
                .collect(),
        }
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

/// One materialized row: one value per projected field, in schema order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutputRow {
    pub values: Vec<serde_json::Value>,
}

/// Response of `getData`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GetDataResponse {
    pub schema: Vec<FieldDescriptor>,
    pub rows: Vec<OutputRow>,
}
