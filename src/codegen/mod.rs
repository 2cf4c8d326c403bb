//! Mapper document generation from table metadata.
//!
//! This module resolves YAML table configurations into introspected table
//! metadata and builds the result map elements and mapper documents for them.

pub mod context;
pub mod introspected;
pub mod mapper;
pub mod plugins;
pub mod result_map;
pub mod result_map_blobs;
pub mod types;
pub mod utils;
pub mod yaml_loader;

// Re-export key types
pub use context::{GeneratorContext, XmlElementGenerator};
pub use introspected::{
    ImportedColumn, ImportedTable, IntrospectedColumn, IntrospectedTable, ModelType, TableMetadata,
    TableRules,
};
pub use mapper::{mapper_path, MapperGenerator, OutputFormat};
pub use plugins::{FnPlugin, NoOpPlugin, Plugin, PluginChain};
pub use result_map::{Binding, ColumnSelection, ResultMapPlan, ResultMapWithoutBlobsGenerator, ReturnShape};
pub use result_map_blobs::ResultMapWithBlobsGenerator;
pub use types::{ColumnDef, ColumnReference, ContextConfig, GeneratorConfig, RuleOverrides, TableDef};
pub use yaml_loader::{load_catalog, load_config, resolve_catalog, validate_config, TableCatalog};

/// Generate mapper documents for every table in a configuration file
///
/// This is the main entry point for one-shot generation.
///
/// # Example
///
/// ```rust,no_run
/// fn main() {
///     rowmap::codegen::generate_from_yaml("rowmap.yaml", "target/mappers")
///         .expect("Mapper generation failed");
/// }
/// ```
pub fn generate_from_yaml(
    yaml_path: impl AsRef<std::path::Path>,
    output_dir: impl AsRef<std::path::Path>,
) -> crate::Result<Vec<std::path::PathBuf>> {
    let catalog = load_catalog(yaml_path)?;

    MapperGenerator::new(catalog.context.simple).write_documents(
        &catalog.tables,
        output_dir.as_ref(),
        OutputFormat::Xml,
    )
}
