//! Type definitions for table configuration.
//!
//! These types mirror the YAML configuration file and are resolved into
//! [`IntrospectedTable`](crate::codegen::introspected::IntrospectedTable)
//! values by the loader.

use serde::{Deserialize, Serialize};

use crate::codegen::introspected::ModelType;

fn default_base_result_map_id() -> String {
    "BaseResultMap".to_string()
}

fn default_result_map_with_blobs_id() -> String {
    "ResultMapWithBLOBs".to_string()
}

/// Top-level configuration file
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub context: ContextConfig,
    #[serde(default)]
    pub tables: Vec<TableDef>,
}

/// Settings shared by every table unless a table overrides them
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ContextConfig {
    /// Package of the generated record classes
    #[serde(default)]
    pub model_package: String,
    /// Package of the mapper interfaces; also the document namespace prefix
    #[serde(default)]
    pub mapper_package: String,
    #[serde(default)]
    pub model_type: ModelType,
    /// Generate narrow lookup mappings instead of full ones
    #[serde(default)]
    pub simple: bool,
    #[serde(default)]
    pub constructor_based: bool,
    #[serde(default)]
    pub generate_left_join: bool,
}

/// Per-table overrides of the derived class rules
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RuleOverrides {
    #[serde(default)]
    pub generate_base_record_class: Option<bool>,
    #[serde(default)]
    pub generate_primary_key_class: Option<bool>,
    #[serde(default)]
    pub generate_record_with_blobs_class: Option<bool>,
}

/// One table
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TableDef {
    pub name: String,
    /// Record class simple name; defaults to the PascalCase table name
    #[serde(default)]
    pub record: Option<String>,
    /// Table alias used in joined selects
    #[serde(default)]
    pub alias: Option<String>,
    /// Mapper namespace; defaults to `{mapper_package}.{record}Mapper`
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub model_type: Option<ModelType>,
    #[serde(default)]
    pub constructor_based: Option<bool>,
    #[serde(default)]
    pub generate_left_join: Option<bool>,
    #[serde(default)]
    pub rules: RuleOverrides,
    /// Key column names in key order. When empty, columns flagged
    /// `primary_key` form the key in schema order.
    #[serde(default)]
    pub primary_key: Vec<String>,
    #[serde(default = "default_base_result_map_id")]
    pub base_result_map_id: String,
    #[serde(default = "default_result_map_with_blobs_id")]
    pub result_map_with_blobs_id: String,
    pub columns: Vec<ColumnDef>,
}

impl TableDef {
    /// Record class simple name
    pub fn record_name(&self) -> String {
        self.record
            .clone()
            .unwrap_or_else(|| crate::codegen::utils::to_pascal_case(&self.name))
    }
}

/// Foreign-key link to a column of another configured table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnReference {
    pub table: String,
    pub column: String,
}

/// One column
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnDef {
    pub name: String,
    pub jdbc_type: String,
    #[serde(default)]
    pub primary_key: bool,
    /// Java property; defaults to the camelCase column name
    #[serde(default)]
    pub property: Option<String>,
    /// Fully-qualified Java type; defaults from the JDBC type
    #[serde(default)]
    pub java_type: Option<String>,
    #[serde(default)]
    pub type_handler: Option<String>,
    /// Large-object flag; defaults from the JDBC type
    #[serde(default)]
    pub blob: Option<bool>,
    #[serde(default)]
    pub references: Option<ColumnReference>,
}
