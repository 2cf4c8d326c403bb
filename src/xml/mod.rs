//! In-memory document tree and its XML rendering.
//!
//! Generators build [`Element`] trees; [`writer`] turns a finished tree into
//! the markup consumed by the mapping engine.

pub mod element;
pub mod writer;

pub use element::Element;
pub use writer::{render_document, write_document, write_element, MAPPER_DOCTYPE};
