//! Read-only table metadata consumed by the generators.
//!
//! [`TableMetadata`] is the surface the result map builders depend on.
//! [`IntrospectedTable`] implements it over columns kept in schema order, so
//! every column list is derived from the same `Vec` and iterates identically
//! on each call.

use serde::{Deserialize, Serialize};

/// How record classes are split for a table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelType {
    /// One record class holding every column
    Flat,
    /// Key class, base record extending it, BLOB record extending that
    Hierarchical,
    /// Like hierarchical, but a class is only generated when it would hold
    /// enough columns to be worth having
    #[default]
    Conditional,
}

/// Per-table generation rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRules {
    pub model_type: ModelType,
    pub generate_base_record_class: bool,
    pub generate_primary_key_class: bool,
    pub generate_record_with_blobs_class: bool,
    /// Emit `association` children for columns that import another table
    pub generate_left_join: bool,
}

impl TableRules {
    /// Derive the class rules for a model type from the table's column counts
    pub fn derive(
        model_type: ModelType,
        key_count: usize,
        base_count: usize,
        blob_count: usize,
        generate_left_join: bool,
    ) -> Self {
        let (base_record, primary_key, with_blobs) = match model_type {
            ModelType::Flat => (true, false, false),
            ModelType::Hierarchical => (base_count > 0, key_count > 0, blob_count > 0),
            ModelType::Conditional => {
                let with_blobs = key_count + base_count > 1 && blob_count > 1;
                let base_record =
                    base_count > 0 || key_count == 1 || (blob_count > 0 && !with_blobs);
                (base_record, key_count > 1, with_blobs)
            }
        };

        Self {
            model_type,
            generate_base_record_class: base_record,
            generate_primary_key_class: primary_key,
            generate_record_with_blobs_class: with_blobs,
            generate_left_join,
        }
    }
}

/// Summary of a table referenced through a foreign-key link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedTable {
    pub table_name: String,
    pub base_record_type: String,
    pub namespace: String,
    pub base_result_map_id: String,
}

/// The column on the other side of a foreign-key link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedColumn {
    pub column_name: String,
    pub table: ImportedTable,
}

/// One column of an introspected table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntrospectedColumn {
    pub actual_column_name: String,
    /// Alias of the owning table, used to rename the result map column
    pub table_alias: Option<String>,
    pub java_property: String,
    pub jdbc_type_name: String,
    pub fully_qualified_java_type: String,
    pub type_handler: Option<String>,
    pub primary_key: bool,
    pub blob: bool,
    pub imported_column: Option<ImportedColumn>,
}

impl IntrospectedColumn {
    /// Column name as written into a result map.
    ///
    /// Aliased tables select their columns as `alias_column`, so the result
    /// map must refer to that renamed label.
    pub fn result_map_column_name(&self) -> String {
        match self.table_alias.as_deref() {
            Some(alias) if !alias.is_empty() => format!("{}_{}", alias, self.actual_column_name),
            _ => self.actual_column_name.clone(),
        }
    }

    /// Type handler, if one with a non-empty name is declared
    pub fn type_handler(&self) -> Option<&str> {
        self.type_handler.as_deref().filter(|h| !h.is_empty())
    }
}

/// Metadata the result map generators read.
///
/// Column lists must come back in the same order on every call; the
/// generators walk them more than once per document.
pub trait TableMetadata {
    fn table_name(&self) -> &str;

    /// Key columns in key order
    fn primary_key_columns(&self) -> Vec<&IntrospectedColumn>;

    /// Every non-key column in schema order
    fn non_primary_key_columns(&self) -> Vec<&IntrospectedColumn>;

    /// Non-key, non-BLOB columns in schema order
    fn base_columns(&self) -> Vec<&IntrospectedColumn>;

    /// Non-key BLOB columns in schema order
    fn blob_columns(&self) -> Vec<&IntrospectedColumn>;

    fn base_record_type(&self) -> &str;
    fn primary_key_type(&self) -> &str;
    fn record_with_blobs_type(&self) -> &str;

    /// Mapper namespace the table's documents live in
    fn namespace(&self) -> &str;
    fn base_result_map_id(&self) -> &str;
    fn result_map_with_blobs_id(&self) -> &str;

    fn rules(&self) -> &TableRules;

    /// Bind rows through constructor arguments instead of setters
    fn is_constructor_based(&self) -> bool;
}

/// A table's resolved metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntrospectedTable {
    pub name: String,
    /// Columns in schema order
    pub columns: Vec<IntrospectedColumn>,
    /// Positions into `columns`, in key order
    pub primary_key: Vec<usize>,
    pub namespace: String,
    pub base_record_type: String,
    pub primary_key_type: String,
    pub record_with_blobs_type: String,
    pub base_result_map_id: String,
    pub result_map_with_blobs_id: String,
    pub constructor_based: bool,
    pub rules: TableRules,
}

impl IntrospectedTable {
    /// Summary handed to tables whose columns import this one
    pub fn as_imported(&self) -> ImportedTable {
        ImportedTable {
            table_name: self.name.clone(),
            base_record_type: self.base_record_type.clone(),
            namespace: self.namespace.clone(),
            base_result_map_id: self.base_result_map_id.clone(),
        }
    }

    pub fn column(&self, name: &str) -> Option<&IntrospectedColumn> {
        self.columns
            .iter()
            .find(|c| c.actual_column_name.eq_ignore_ascii_case(name))
    }
}

impl TableMetadata for IntrospectedTable {
    fn table_name(&self) -> &str {
        &self.name
    }

    fn primary_key_columns(&self) -> Vec<&IntrospectedColumn> {
        self.primary_key.iter().map(|&i| &self.columns[i]).collect()
    }

    fn non_primary_key_columns(&self) -> Vec<&IntrospectedColumn> {
        self.columns.iter().filter(|c| !c.primary_key).collect()
    }

    fn base_columns(&self) -> Vec<&IntrospectedColumn> {
        self.columns
            .iter()
            .filter(|c| !c.primary_key && !c.blob)
            .collect()
    }

    fn blob_columns(&self) -> Vec<&IntrospectedColumn> {
        self.columns
            .iter()
            .filter(|c| !c.primary_key && c.blob)
            .collect()
    }

    fn base_record_type(&self) -> &str {
        &self.base_record_type
    }

    fn primary_key_type(&self) -> &str {
        &self.primary_key_type
    }

    fn record_with_blobs_type(&self) -> &str {
        &self.record_with_blobs_type
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn base_result_map_id(&self) -> &str {
        &self.base_result_map_id
    }

    fn result_map_with_blobs_id(&self) -> &str {
        &self.result_map_with_blobs_id
    }

    fn rules(&self) -> &TableRules {
        &self.rules
    }

    fn is_constructor_based(&self) -> bool {
        self.constructor_based
    }
}
