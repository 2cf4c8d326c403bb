//! YAML table configuration loader.
//!
//! Loads a [`GeneratorConfig`], validates it, and resolves every table into
//! an [`IntrospectedTable`] with defaults filled in and foreign-key links
//! replaced by summaries of the referenced tables.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::debug;

use crate::codegen::introspected::{
    ImportedColumn, ImportedTable, IntrospectedColumn, IntrospectedTable, ModelType, TableRules,
};
use crate::codegen::types::{ColumnDef, ContextConfig, GeneratorConfig, TableDef};
use crate::codegen::utils::{is_blob_jdbc_type, java_type_for_jdbc, qualify, to_camel_case};
use crate::error::{Error, Result};

/// Resolved tables together with the settings they were loaded with
#[derive(Debug, Clone)]
pub struct TableCatalog {
    pub context: ContextConfig,
    pub tables: Vec<IntrospectedTable>,
}

impl TableCatalog {
    pub fn table(&self, name: &str) -> Option<&IntrospectedTable> {
        self.tables.iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }
}

/// Load, validate and resolve a configuration file
///
/// # Example
///
/// ```ignore
/// use rowmap::codegen::load_catalog;
///
/// let catalog = load_catalog("rowmap.yaml").unwrap();
/// ```
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<TableCatalog> {
    let config = load_config(path)?;
    resolve_catalog(&config)
}

/// Read a configuration file without resolving it
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<GeneratorConfig> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

    serde_yaml::from_str(&contents).map_err(|source| Error::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Validate and resolve an in-memory configuration
pub fn resolve_catalog(config: &GeneratorConfig) -> Result<TableCatalog> {
    validate_config(config)?;

    let mut tables: Vec<IntrospectedTable> = config
        .tables
        .iter()
        .map(|table| introspect_table(table, &config.context))
        .collect();

    let summaries: HashMap<String, (ImportedTable, HashSet<String>)> = tables
        .iter()
        .map(|t| {
            let columns = t
                .columns
                .iter()
                .map(|c| c.actual_column_name.to_lowercase())
                .collect();
            (t.name.to_lowercase(), (t.as_imported(), columns))
        })
        .collect();

    for (def, table) in config.tables.iter().zip(tables.iter_mut()) {
        for (column_def, column) in def.columns.iter().zip(table.columns.iter_mut()) {
            let Some(reference) = &column_def.references else {
                continue;
            };

            let (imported, columns) =
                summaries
                    .get(&reference.table.to_lowercase())
                    .ok_or_else(|| Error::UnknownTable {
                        table: def.name.clone(),
                        column: column_def.name.clone(),
                        target: reference.table.clone(),
                    })?;

            if !columns.contains(&reference.column.to_lowercase()) {
                return Err(Error::UnknownColumn {
                    table: def.name.clone(),
                    column: column_def.name.clone(),
                    target_table: reference.table.clone(),
                    target_column: reference.column.clone(),
                });
            }

            column.imported_column = Some(ImportedColumn {
                column_name: reference.column.clone(),
                table: imported.clone(),
            });
        }
    }

    debug!(tables = tables.len(), "resolved table catalog");

    Ok(TableCatalog {
        context: config.context.clone(),
        tables,
    })
}

/// Validate a configuration
///
/// Checks for:
/// - Non-empty, unique table names
/// - Non-empty, unique column names per table with a JDBC type
/// - Explicit key lists naming existing columns, each at most once
/// - Namespaces made of dot-separated identifiers
pub fn validate_config(config: &GeneratorConfig) -> Result<()> {
    let mut seen = HashSet::new();

    for table in &config.tables {
        if table.name.is_empty() {
            return Err(Error::InvalidConfig("table name cannot be empty".to_string()));
        }

        if !seen.insert(table.name.to_lowercase()) {
            return Err(Error::InvalidConfig(format!(
                "table '{}' is defined more than once",
                table.name
            )));
        }

        validate_table(table)?;

        let namespace = table.namespace.clone().unwrap_or_else(|| {
            qualify(&config.context.mapper_package, &format!("{}Mapper", table.record_name()))
        });
        validate_namespace(&namespace, &table.name)?;
    }

    Ok(())
}

/// A namespace doubles as the document's relative output path, so each
/// segment must be a plain identifier.
fn validate_namespace(namespace: &str, table_name: &str) -> Result<()> {
    let is_identifier = |segment: &str| {
        let mut chars = segment.chars();
        chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
    };

    if namespace.split('.').all(is_identifier) {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "namespace '{}' of table '{}' must be dot-separated identifiers",
            namespace, table_name
        )))
    }
}

fn validate_table(table: &TableDef) -> Result<()> {
    let mut columns = HashSet::new();

    for column in &table.columns {
        validate_column(column, &table.name)?;

        if !columns.insert(column.name.to_lowercase()) {
            return Err(Error::InvalidConfig(format!(
                "column '{}' is defined more than once in table '{}'",
                column.name, table.name
            )));
        }
    }

    let mut keys = HashSet::new();
    for key in &table.primary_key {
        if !columns.contains(&key.to_lowercase()) {
            return Err(Error::InvalidConfig(format!(
                "primary key column '{}' is not a column of table '{}'",
                key, table.name
            )));
        }

        if !keys.insert(key.to_lowercase()) {
            return Err(Error::InvalidConfig(format!(
                "primary key column '{}' is listed more than once in table '{}'",
                key, table.name
            )));
        }
    }

    Ok(())
}

fn validate_column(column: &ColumnDef, table_name: &str) -> Result<()> {
    if column.name.is_empty() {
        return Err(Error::InvalidConfig(format!(
            "column name cannot be empty in table '{}'",
            table_name
        )));
    }

    if column.jdbc_type.is_empty() {
        return Err(Error::InvalidConfig(format!(
            "column '{}' in table '{}' has no jdbc_type",
            column.name, table_name
        )));
    }

    Ok(())
}

/// Resolve one table, leaving foreign-key links unset
fn introspect_table(def: &TableDef, context: &ContextConfig) -> IntrospectedTable {
    let record = def.record_name();
    let alias = def.alias.clone().filter(|a| !a.is_empty());

    let key_names: Vec<String> = def.primary_key.iter().map(|k| k.to_lowercase()).collect();
    let is_key = |column: &ColumnDef| {
        if key_names.is_empty() {
            column.primary_key
        } else {
            key_names.contains(&column.name.to_lowercase())
        }
    };

    let columns: Vec<IntrospectedColumn> = def
        .columns
        .iter()
        .map(|column| IntrospectedColumn {
            actual_column_name: column.name.clone(),
            table_alias: alias.clone(),
            java_property: column
                .property
                .clone()
                .unwrap_or_else(|| to_camel_case(&column.name)),
            jdbc_type_name: column.jdbc_type.to_uppercase(),
            fully_qualified_java_type: column
                .java_type
                .clone()
                .unwrap_or_else(|| java_type_for_jdbc(&column.jdbc_type).to_string()),
            type_handler: column.type_handler.clone(),
            primary_key: is_key(column),
            blob: column
                .blob
                .unwrap_or_else(|| is_blob_jdbc_type(&column.jdbc_type)),
            imported_column: None,
        })
        .collect();

    let primary_key: Vec<usize> = if key_names.is_empty() {
        (0..columns.len()).filter(|&i| columns[i].primary_key).collect()
    } else {
        key_names
            .iter()
            .filter_map(|key| {
                columns
                    .iter()
                    .position(|c| c.actual_column_name.to_lowercase() == *key)
            })
            .collect()
    };

    let key_count = primary_key.len();
    let base_count = columns.iter().filter(|c| !c.primary_key && !c.blob).count();
    let blob_count = columns.iter().filter(|c| !c.primary_key && c.blob).count();

    let model_type = def.model_type.unwrap_or(context.model_type);
    let mut rules = TableRules::derive(
        model_type,
        key_count,
        base_count,
        blob_count,
        def.generate_left_join.unwrap_or(context.generate_left_join),
    );
    if let Some(value) = def.rules.generate_base_record_class {
        rules.generate_base_record_class = value;
    }
    if let Some(value) = def.rules.generate_primary_key_class {
        rules.generate_primary_key_class = value;
    }
    if let Some(value) = def.rules.generate_record_with_blobs_class {
        rules.generate_record_with_blobs_class = value;
    }

    let base_record_type = qualify(&context.model_package, &record);
    // A flat model has no separate key class
    let primary_key_type = if model_type == ModelType::Flat {
        base_record_type.clone()
    } else {
        qualify(&context.model_package, &format!("{}Key", record))
    };

    IntrospectedTable {
        name: def.name.clone(),
        columns,
        primary_key,
        namespace: def
            .namespace
            .clone()
            .unwrap_or_else(|| qualify(&context.mapper_package, &format!("{}Mapper", record))),
        record_with_blobs_type: qualify(&context.model_package, &format!("{}WithBLOBs", record)),
        base_record_type,
        primary_key_type,
        base_result_map_id: def.base_result_map_id.clone(),
        result_map_with_blobs_id: def.result_map_with_blobs_id.clone(),
        constructor_based: def.constructor_based.unwrap_or(context.constructor_based),
        rules,
    }
}
