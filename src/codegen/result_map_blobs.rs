//! Result map for tables with large-object columns.
//!
//! The BLOB result map extends the base one and adds only the BLOB columns.
//! Constructor binding cannot inherit arguments, so in that mode the map
//! stands alone and repeats every column inside its own `constructor`.

use tracing::debug;

use crate::codegen::context::{GeneratorContext, XmlElementGenerator};
use crate::codegen::introspected::TableMetadata;
use crate::codegen::plugins::Plugin;
use crate::codegen::result_map::{constructor_element, result_element};
use crate::xml::Element;

#[derive(Debug, Clone, Copy, Default)]
pub struct ResultMapWithBlobsGenerator;

impl ResultMapWithBlobsGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Whether `table` gets a BLOB result map at all
    pub fn applies_to(table: &dyn TableMetadata) -> bool {
        !table.blob_columns().is_empty()
    }

    pub fn build(&self, table: &dyn TableMetadata) -> Element {
        let return_type = if table.rules().generate_record_with_blobs_class {
            table.record_with_blobs_type()
        } else {
            table.base_record_type()
        };

        let mut answer = Element::new("resultMap");
        answer.add_attribute("id", table.result_map_with_blobs_id());
        answer.add_attribute("type", return_type);

        if table.is_constructor_based() {
            answer.add_child(constructor_element(
                &table.primary_key_columns(),
                &table.non_primary_key_columns(),
            ));
        } else {
            answer.add_attribute("extends", table.base_result_map_id());
            for column in table.blob_columns() {
                answer.add_child(result_element(column));
            }
        }

        answer
    }
}

impl XmlElementGenerator for ResultMapWithBlobsGenerator {
    fn add_elements(
        &self,
        parent: &mut Element,
        table: &dyn TableMetadata,
        context: &GeneratorContext,
    ) -> bool {
        let mut answer = self.build(table);

        if context
            .plugins
            .result_map_with_blobs_generated(&mut answer, table)
        {
            parent.add_child(answer);
            true
        } else {
            debug!(table = table.table_name(), "BLOB result map vetoed by plugin");
            false
        }
    }
}
