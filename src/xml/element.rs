//! Generic labeled tree node.

use indexmap::IndexMap;
use serde::Serialize;

/// A named node with ordered attributes and ordered children.
///
/// Attribute and child order is the serialized order, so both are append-only.
/// Children hold no reference back to their parent; linkage only goes
/// downward through [`Element::add_child`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    name: String,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    attributes: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<Element>,
}

impl Element {
    /// Create an empty element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Append an attribute.
    ///
    /// Names must be unique within one element; adding the same name twice
    /// is a programming error.
    pub fn add_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        debug_assert!(
            !self.attributes.contains_key(&name),
            "duplicate attribute '{}' on <{}>",
            name,
            self.name
        );
        self.attributes.insert(name, value.into());
    }

    /// Builder form of [`Element::add_attribute`]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_attribute(name, value);
        self
    }

    /// Replace an attribute value in place, or append it if absent.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Append a child element
    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Attributes in insertion order
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Attribute names in insertion order
    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes.keys().map(String::as_str).collect()
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Mutable access to each child. The child list itself cannot be
    /// reordered or shrunk through this.
    pub fn children_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut()
    }

    /// Children with the given element name, in document order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// True when the element has no child elements, whatever its attributes
    pub fn is_childless(&self) -> bool {
        self.children.is_empty()
    }
}
