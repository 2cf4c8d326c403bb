//! # rowmap: Result Map Generation from Table Metadata
//!
//! rowmap builds MyBatis mapper documents from a description of relational
//! tables. Each table yields a `resultMap` element binding its rows onto a
//! record type, either through setters or through constructor arguments,
//! optionally with `association` elements for foreign-key links.
//!
//! ## Features
//!
//! - **Document tree**: ordered, append-only [`Element`] trees with XML and JSON output
//! - **Result maps**: simple and full column sets, setter and constructor binding
//! - **Associations**: nested result maps derived from foreign-key links
//! - **Plugins**: hooks that may adjust or veto every generated element
//! - **YAML configuration**: table metadata with naming and type defaults
//!
//! ## Example: Table Configuration
//!
//! ```yaml
//! context:
//!   model_package: com.example.shop.model
//!   mapper_package: com.example.shop.mapper
//! tables:
//!   - name: orders
//!     record: Order
//!     generate_left_join: true
//!     columns:
//!       - { name: order_id, jdbc_type: INTEGER, primary_key: true }
//!       - name: customer_id
//!         jdbc_type: INTEGER
//!         references: { table: customer, column: id }
//!       - { name: total, jdbc_type: DECIMAL }
//! ```
//!
//! ## Example: Building a Result Map
//!
//! ```rust,ignore
//! use rowmap::codegen::{load_catalog, GeneratorContext, ResultMapWithoutBlobsGenerator, XmlElementGenerator};
//! use rowmap::Element;
//!
//! let catalog = load_catalog("rowmap.yaml")?;
//! let mut mapper = Element::new("mapper");
//! let attached = ResultMapWithoutBlobsGenerator::new(false).add_elements(
//!     &mut mapper,
//!     catalog.table("orders").unwrap(),
//!     &GeneratorContext::new(),
//! );
//! ```

pub mod error;
pub mod xml;

// Code generation framework
pub mod codegen;

// Re-export key types
pub use error::{Error, Result};
pub use xml::Element;

pub use codegen::{
    IntrospectedColumn, IntrospectedTable, MapperGenerator, Plugin, ResultMapWithoutBlobsGenerator,
    TableMetadata,
};
