//! Plugin hooks for generated elements.
//!
//! Plugins see every finished element before it is attached to its parent.
//! A hook may mutate the element in place, and returning `false` vetoes the
//! attachment: the element is dropped and generation carries on.

use crate::codegen::introspected::TableMetadata;
use crate::xml::Element;

/// Callback trait for observing and adjusting generated elements
///
/// Every hook defaults to approving the element unchanged.
///
/// # Example
///
/// ```ignore
/// struct RenameResultMap;
///
/// impl Plugin for RenameResultMap {
///     fn result_map_without_blobs_generated(
///         &self,
///         element: &mut Element,
///         table: &dyn TableMetadata,
///     ) -> bool {
///         element.set_attribute("id", format!("{}Map", table.table_name()));
///         true
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    /// Called with the finished base result map
    fn result_map_without_blobs_generated(
        &self,
        element: &mut Element,
        table: &dyn TableMetadata,
    ) -> bool {
        let _ = (element, table);
        true
    }

    /// Called with the finished BLOB result map
    fn result_map_with_blobs_generated(
        &self,
        element: &mut Element,
        table: &dyn TableMetadata,
    ) -> bool {
        let _ = (element, table);
        true
    }

    /// Called with the complete mapper document before it is written
    fn mapper_document_generated(&self, document: &mut Element, table: &dyn TableMetadata) -> bool {
        let _ = (document, table);
        true
    }
}

/// No-op plugin that approves everything
pub struct NoOpPlugin;

impl Plugin for NoOpPlugin {}

/// Adapts a closure into a base result map hook
pub struct FnPlugin<F>(pub F);

impl<F> FnPlugin<F>
where
    F: Fn(&mut Element, &dyn TableMetadata) -> bool + Send + Sync,
{
    pub fn new(hook: F) -> Self {
        Self(hook)
    }
}

impl<F> Plugin for FnPlugin<F>
where
    F: Fn(&mut Element, &dyn TableMetadata) -> bool + Send + Sync,
{
    fn result_map_without_blobs_generated(
        &self,
        element: &mut Element,
        table: &dyn TableMetadata,
    ) -> bool {
        (self.0)(element, table)
    }
}

/// Ordered set of plugins acting as one hook.
///
/// Plugins run in registration order and the first veto stops the chain.
/// An empty chain approves every element.
#[derive(Default)]
pub struct PluginChain {
    plugins: Vec<Box<dyn Plugin>>,
}

impl PluginChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin at the end of the chain
    pub fn with_plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl Plugin for PluginChain {
    fn result_map_without_blobs_generated(
        &self,
        element: &mut Element,
        table: &dyn TableMetadata,
    ) -> bool {
        self.plugins
            .iter()
            .all(|p| p.result_map_without_blobs_generated(element, table))
    }

    fn result_map_with_blobs_generated(
        &self,
        element: &mut Element,
        table: &dyn TableMetadata,
    ) -> bool {
        self.plugins
            .iter()
            .all(|p| p.result_map_with_blobs_generated(element, table))
    }

    fn mapper_document_generated(&self, document: &mut Element, table: &dyn TableMetadata) -> bool {
        self.plugins
            .iter()
            .all(|p| p.mapper_document_generated(document, table))
    }
}
