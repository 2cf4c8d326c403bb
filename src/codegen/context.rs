//! Shared generator state and the element generator seam.

use crate::codegen::introspected::TableMetadata;
use crate::codegen::plugins::{Plugin, PluginChain};
use crate::xml::Element;

/// State shared by every generator run for one configuration
#[derive(Default)]
pub struct GeneratorContext {
    pub plugins: PluginChain,
}

impl GeneratorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins = self.plugins.with_plugin(plugin);
        self
    }
}

/// A generator that contributes one element to a mapper document.
pub trait XmlElementGenerator {
    /// Build the element for `table` and append it to `parent` unless a
    /// plugin vetoes it. Returns whether the element was attached.
    fn add_elements(
        &self,
        parent: &mut Element,
        table: &dyn TableMetadata,
        context: &GeneratorContext,
    ) -> bool;
}
