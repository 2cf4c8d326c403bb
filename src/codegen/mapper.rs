//! Mapper document orchestration.
//!
//! Assembles one `mapper` document per table from the result map generators
//! and writes it to disk.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::codegen::context::{GeneratorContext, XmlElementGenerator};
use crate::codegen::introspected::TableMetadata;
use crate::codegen::plugins::Plugin;
use crate::codegen::result_map::ResultMapWithoutBlobsGenerator;
use crate::codegen::result_map_blobs::ResultMapWithBlobsGenerator;
use crate::error::{Error, Result};
use crate::xml::{render_document, Element};

/// Output format for written documents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Xml,
    /// The element tree as JSON, for inspection
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Xml => "xml",
            OutputFormat::Json => "json",
        }
    }
}

/// Builds and writes mapper documents
pub struct MapperGenerator {
    simple: bool,
    context: GeneratorContext,
}

impl MapperGenerator {
    pub fn new(simple: bool) -> Self {
        Self {
            simple,
            context: GeneratorContext::new(),
        }
    }

    /// Register a plugin for every generated element
    pub fn with_plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.context = self.context.with_plugin(plugin);
        self
    }

    /// Element generators run for `table`, in document order
    fn generators(&self, table: &dyn TableMetadata) -> Vec<Box<dyn XmlElementGenerator>> {
        let mut generators: Vec<Box<dyn XmlElementGenerator>> =
            vec![Box::new(ResultMapWithoutBlobsGenerator::new(self.simple))];

        if !self.simple && ResultMapWithBlobsGenerator::applies_to(table) {
            generators.push(Box::new(ResultMapWithBlobsGenerator::new()));
        }

        generators
    }

    /// Build the mapper document for `table`, or `None` if a plugin vetoes it
    pub fn build_document(&self, table: &dyn TableMetadata) -> Option<Element> {
        let mut document = Element::new("mapper");
        document.add_attribute("namespace", table.namespace());

        for generator in self.generators(table) {
            generator.add_elements(&mut document, table, &self.context);
        }

        if self.context.plugins.mapper_document_generated(&mut document, table) {
            Some(document)
        } else {
            debug!(table = table.table_name(), "mapper document vetoed by plugin");
            None
        }
    }

    /// Render the document for `table` in the given format
    pub fn render(&self, table: &dyn TableMetadata, format: OutputFormat) -> Result<Option<String>> {
        let Some(document) = self.build_document(table) else {
            return Ok(None);
        };

        let rendered = match format {
            OutputFormat::Xml => render_document(&document),
            OutputFormat::Json => serde_json::to_string_pretty(&document)? + "\n",
        };
        Ok(Some(rendered))
    }

    /// Write one document per table under `output_dir`.
    ///
    /// Returns the paths written; vetoed tables produce no file.
    pub fn write_documents<'a, T, I>(
        &self,
        tables: I,
        output_dir: &Path,
        format: OutputFormat,
    ) -> Result<Vec<PathBuf>>
    where
        T: TableMetadata + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut written = Vec::new();

        for table in tables {
            let Some(contents) = self.render(table, format)? else {
                continue;
            };

            let path = output_dir.join(mapper_path(table, format));
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
            }
            std::fs::write(&path, contents).map_err(|e| Error::io(&path, e))?;

            info!(table = table.table_name(), path = %path.display(), "wrote mapper document");
            written.push(path);
        }

        Ok(written)
    }
}

/// Relative path of a table's mapper document: the namespace as a
/// directory path (`com.example.OrderMapper` -> `com/example/OrderMapper.xml`)
pub fn mapper_path(table: &dyn TableMetadata, format: OutputFormat) -> PathBuf {
    let mut path: PathBuf = table.namespace().split('.').collect();
    path.set_extension(format.extension());
    path
}
