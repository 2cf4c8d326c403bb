//! Base result map generation.
//!
//! Builds the `resultMap` element that binds a table's key and base columns
//! onto its record type. Four construction paths exist (simple or full column
//! set, setter or constructor binding); which one runs is decided up front
//! by [`ResultMapPlan::select`] so the element code only follows the plan.
//!
//! Element layout:
//!
//! ```text
//! <resultMap id type>
//!   <constructor> <idArg/>* <arg/>* </constructor>   constructor binding
//!   <id/>* <result/>*                                setter binding
//!   <association/>*                                  left join rules only
//! </resultMap>
//! ```

use tracing::debug;

use crate::codegen::context::{GeneratorContext, XmlElementGenerator};
use crate::codegen::introspected::{ImportedTable, IntrospectedColumn, TableMetadata};
use crate::codegen::plugins::Plugin;
use crate::codegen::utils::{short_type_name, valid_property_name};
use crate::xml::Element;

/// Which record type the result map produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnShape {
    BaseRecord,
    PrimaryKey,
}

/// How column values reach the record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// `id` and `result` children bound through setters
    Property,
    /// `idArg` and `arg` children bound through constructor positions
    Constructor,
}

/// Columns mapped after the key columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSelection {
    NonPrimaryKey,
    Base,
}

/// Construction decisions for one result map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultMapPlan {
    pub return_shape: ReturnShape,
    pub binding: Binding,
    pub columns: ColumnSelection,
    pub associations: bool,
}

impl ResultMapPlan {
    /// Decide every branch for `table` in simple or full mode.
    ///
    /// | simple | base record class | return type  | columns after keys |
    /// |--------|-------------------|--------------|--------------------|
    /// | yes    | any               | base record  | non-key            |
    /// | no     | yes               | base record  | base               |
    /// | no     | no                | key type     | base               |
    pub fn select(table: &dyn TableMetadata, simple: bool) -> Self {
        let rules = table.rules();

        let return_shape = match (simple, rules.generate_base_record_class) {
            (true, _) | (false, true) => ReturnShape::BaseRecord,
            (false, false) => ReturnShape::PrimaryKey,
        };

        let binding = if table.is_constructor_based() {
            Binding::Constructor
        } else {
            Binding::Property
        };

        let columns = if simple {
            ColumnSelection::NonPrimaryKey
        } else {
            ColumnSelection::Base
        };

        Self {
            return_shape,
            binding,
            columns,
            associations: rules.generate_left_join,
        }
    }

    pub fn return_type<'a>(&self, table: &'a dyn TableMetadata) -> &'a str {
        match self.return_shape {
            ReturnShape::BaseRecord => table.base_record_type(),
            ReturnShape::PrimaryKey => table.primary_key_type(),
        }
    }

    pub fn selected_columns<'a>(&self, table: &'a dyn TableMetadata) -> Vec<&'a IntrospectedColumn> {
        match self.columns {
            ColumnSelection::NonPrimaryKey => table.non_primary_key_columns(),
            ColumnSelection::Base => table.base_columns(),
        }
    }
}

/// Generator for the base `resultMap` element
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultMapWithoutBlobsGenerator {
    simple: bool,
}

impl ResultMapWithoutBlobsGenerator {
    pub fn new(simple: bool) -> Self {
        Self { simple }
    }

    /// Build the result map without running plugins or attaching it
    pub fn build(&self, table: &dyn TableMetadata) -> Element {
        let plan = ResultMapPlan::select(table, self.simple);
        debug!(table = table.table_name(), ?plan, "building base result map");

        let mut answer = Element::new("resultMap");
        answer.add_attribute("id", table.base_result_map_id());
        answer.add_attribute("type", plan.return_type(table));

        let columns = plan.selected_columns(table);
        let keys = table.primary_key_columns();

        match plan.binding {
            Binding::Constructor => {
                answer.add_child(constructor_element(&keys, &columns));
            }
            Binding::Property => {
                for column in &keys {
                    answer.add_child(id_element(column));
                }
                for column in &columns {
                    answer.add_child(result_element(column));
                }
            }
        }

        if plan.associations {
            for imported in keys.iter().chain(columns.iter()).filter_map(|c| imported_table(c)) {
                answer.add_child(association_element(imported));
            }
        }

        answer
    }
}

impl XmlElementGenerator for ResultMapWithoutBlobsGenerator {
    fn add_elements(
        &self,
        parent: &mut Element,
        table: &dyn TableMetadata,
        context: &GeneratorContext,
    ) -> bool {
        let mut answer = self.build(table);

        if context
            .plugins
            .result_map_without_blobs_generated(&mut answer, table)
        {
            parent.add_child(answer);
            true
        } else {
            debug!(table = table.table_name(), "base result map vetoed by plugin");
            false
        }
    }
}

fn imported_table(column: &IntrospectedColumn) -> Option<&ImportedTable> {
    column.imported_column.as_ref().map(|imported| &imported.table)
}

fn add_type_handler(element: &mut Element, column: &IntrospectedColumn) {
    if let Some(handler) = column.type_handler() {
        element.add_attribute("typeHandler", handler);
    }
}

/// `id` child. Key columns carry no `jdbcType` here; the mapping engine
/// infers it.
pub(crate) fn id_element(column: &IntrospectedColumn) -> Element {
    let mut element = Element::new("id");
    element.add_attribute("column", column.result_map_column_name());
    element.add_attribute("property", &column.java_property);
    add_type_handler(&mut element, column);
    element
}

pub(crate) fn result_element(column: &IntrospectedColumn) -> Element {
    let mut element = Element::new("result");
    element.add_attribute("column", column.result_map_column_name());
    element.add_attribute("property", &column.java_property);
    element.add_attribute("jdbcType", &column.jdbc_type_name);
    add_type_handler(&mut element, column);
    element
}

/// `idArg` or `arg` child. Constructor arguments always carry both types so
/// the engine can pick the right overload.
pub(crate) fn arg_element(kind: &str, column: &IntrospectedColumn) -> Element {
    let mut element = Element::new(kind);
    element.add_attribute("column", column.result_map_column_name());
    element.add_attribute("jdbcType", &column.jdbc_type_name);
    element.add_attribute("javaType", &column.fully_qualified_java_type);
    add_type_handler(&mut element, column);
    element
}

pub(crate) fn constructor_element(
    keys: &[&IntrospectedColumn],
    columns: &[&IntrospectedColumn],
) -> Element {
    let mut constructor = Element::new("constructor");
    for column in keys {
        constructor.add_child(arg_element("idArg", column));
    }
    for column in columns {
        constructor.add_child(arg_element("arg", column));
    }
    constructor
}

/// `association` child pointing at the imported table's base result map.
/// The property is named after the imported record type.
pub(crate) fn association_element(imported: &ImportedTable) -> Element {
    let mut element = Element::new("association");
    element.add_attribute(
        "property",
        valid_property_name(short_type_name(&imported.base_record_type)),
    );
    element.add_attribute(
        "resultMap",
        format!("{}.{}", imported.namespace, imported.base_result_map_id),
    );
    element
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::introspected::{
        ImportedColumn, IntrospectedTable, ModelType, TableRules,
    };
    use crate::codegen::plugins::FnPlugin;

    fn column(name: &str, property: &str, jdbc: &str, java: &str, primary_key: bool) -> IntrospectedColumn {
        IntrospectedColumn {
            actual_column_name: name.to_string(),
            table_alias: None,
            java_property: property.to_string(),
            jdbc_type_name: jdbc.to_string(),
            fully_qualified_java_type: java.to_string(),
            type_handler: None,
            primary_key,
            blob: false,
            imported_column: None,
        }
    }

    fn customer() -> ImportedColumn {
        ImportedColumn {
            column_name: "id".to_string(),
            table: ImportedTable {
                table_name: "customer".to_string(),
                base_record_type: "com.example.model.Customer".to_string(),
                namespace: "com.example.mapper.CustomerMapper".to_string(),
                base_result_map_id: "BaseResultMap".to_string(),
            },
        }
    }

    fn order_table() -> IntrospectedTable {
        IntrospectedTable {
            name: "ORDER".to_string(),
            columns: vec![
                column("order_id", "orderId", "INTEGER", "java.lang.Integer", true),
                column("customer_id", "customerId", "INTEGER", "java.lang.Integer", false),
                column("total", "total", "DECIMAL", "java.math.BigDecimal", false),
            ],
            primary_key: vec![0],
            namespace: "com.example.mapper.OrderMapper".to_string(),
            base_record_type: "com.example.model.Order".to_string(),
            primary_key_type: "com.example.model.OrderKey".to_string(),
            record_with_blobs_type: "com.example.model.OrderWithBLOBs".to_string(),
            base_result_map_id: "BaseResultMap".to_string(),
            result_map_with_blobs_id: "ResultMapWithBLOBs".to_string(),
            constructor_based: false,
            rules: TableRules::derive(ModelType::Conditional, 1, 2, 0, false),
        }
    }

    fn child_names(element: &Element) -> Vec<&str> {
        element.children().iter().map(Element::name).collect()
    }

    #[test]
    fn test_property_based_order_example() {
        let table = order_table();
        let result_map = ResultMapWithoutBlobsGenerator::new(false).build(&table);

        assert_eq!(result_map.name(), "resultMap");
        assert_eq!(result_map.attribute_names(), vec!["id", "type"]);
        assert_eq!(result_map.attribute("id"), Some("BaseResultMap"));
        assert_eq!(result_map.attribute("type"), Some("com.example.model.Order"));
        assert_eq!(child_names(&result_map), vec!["id", "result", "result"]);

        let id = &result_map.children()[0];
        assert_eq!(id.attribute_names(), vec!["column", "property"]);
        assert_eq!(id.attribute("column"), Some("order_id"));
        assert_eq!(id.attribute("property"), Some("orderId"));

        let customer_id = &result_map.children()[1];
        assert_eq!(customer_id.attribute_names(), vec!["column", "property", "jdbcType"]);
        assert_eq!(customer_id.attribute("column"), Some("customer_id"));
        assert_eq!(customer_id.attribute("property"), Some("customerId"));
        assert_eq!(customer_id.attribute("jdbcType"), Some("INTEGER"));

        let total = &result_map.children()[2];
        assert_eq!(total.attribute("column"), Some("total"));
        assert_eq!(total.attribute("jdbcType"), Some("DECIMAL"));
    }

    #[test]
    fn test_constructor_based_order_example() {
        let mut table = order_table();
        table.constructor_based = true;

        let result_map = ResultMapWithoutBlobsGenerator::new(false).build(&table);
        assert_eq!(child_names(&result_map), vec!["constructor"]);

        let constructor = &result_map.children()[0];
        assert_eq!(child_names(constructor), vec!["idArg", "arg", "arg"]);

        let id_arg = &constructor.children()[0];
        assert_eq!(id_arg.attribute_names(), vec!["column", "jdbcType", "javaType"]);
        assert_eq!(id_arg.attribute("column"), Some("order_id"));
        assert_eq!(id_arg.attribute("jdbcType"), Some("INTEGER"));
        assert_eq!(id_arg.attribute("javaType"), Some("java.lang.Integer"));

        let columns: Vec<_> = constructor.children()[1..]
            .iter()
            .map(|arg| arg.attribute("column").unwrap())
            .collect();
        assert_eq!(columns, vec!["customer_id", "total"]);
        assert_eq!(constructor.children()[2].attribute("javaType"), Some("java.math.BigDecimal"));
    }

    #[test]
    fn test_return_type_precedence() {
        let mut table = order_table();
        table.rules.generate_base_record_class = false;

        let simple = ResultMapWithoutBlobsGenerator::new(true).build(&table);
        assert_eq!(simple.attribute("type"), Some("com.example.model.Order"));

        let full = ResultMapWithoutBlobsGenerator::new(false).build(&table);
        assert_eq!(full.attribute("type"), Some("com.example.model.OrderKey"));

        table.rules.generate_base_record_class = true;
        let full = ResultMapWithoutBlobsGenerator::new(false).build(&table);
        assert_eq!(full.attribute("type"), Some("com.example.model.Order"));
    }

    #[test]
    fn test_plan_decision_table() {
        let mut table = order_table();
        for simple in [true, false] {
            for base_record in [true, false] {
                for constructor in [true, false] {
                    for left_join in [true, false] {
                        table.rules.generate_base_record_class = base_record;
                        table.rules.generate_left_join = left_join;
                        table.constructor_based = constructor;

                        let plan = ResultMapPlan::select(&table, simple);
                        let expected_shape = if simple || base_record {
                            ReturnShape::BaseRecord
                        } else {
                            ReturnShape::PrimaryKey
                        };
                        assert_eq!(plan.return_shape, expected_shape);
                        assert_eq!(plan.binding == Binding::Constructor, constructor);
                        assert_eq!(plan.columns == ColumnSelection::NonPrimaryKey, simple);
                        assert_eq!(plan.associations, left_join);
                    }
                }
            }
        }
    }

    #[test]
    fn test_simple_mode_maps_blob_columns() {
        let mut table = order_table();
        let mut notes = column("notes", "notes", "LONGVARCHAR", "java.lang.String", false);
        notes.blob = true;
        table.columns.push(notes);

        let simple = ResultMapWithoutBlobsGenerator::new(true).build(&table);
        assert_eq!(simple.children_named("result").count(), 3);

        let full = ResultMapWithoutBlobsGenerator::new(false).build(&table);
        assert_eq!(full.children_named("result").count(), 2);
    }

    #[test]
    fn test_section_counts_match_column_lists() {
        let mut table = order_table();
        table.columns.push(column("line_no", "lineNo", "SMALLINT", "java.lang.Short", true));
        table.primary_key.push(3);

        for simple in [true, false] {
            let expected = if simple {
                table.non_primary_key_columns().len()
            } else {
                table.base_columns().len()
            };

            table.constructor_based = false;
            let result_map = ResultMapWithoutBlobsGenerator::new(simple).build(&table);
            assert_eq!(result_map.children_named("id").count(), 2);
            assert_eq!(result_map.children_named("result").count(), expected);
            assert_eq!(result_map.children_named("constructor").count(), 0);

            table.constructor_based = true;
            let result_map = ResultMapWithoutBlobsGenerator::new(simple).build(&table);
            let constructor = result_map.children_named("constructor").next().unwrap();
            assert_eq!(constructor.children_named("idArg").count(), 2);
            assert_eq!(constructor.children_named("arg").count(), expected);
        }
    }

    #[test]
    fn test_no_key_columns() {
        let mut table = order_table();
        table.columns[0].primary_key = false;
        table.primary_key.clear();

        let result_map = ResultMapWithoutBlobsGenerator::new(false).build(&table);
        assert_eq!(child_names(&result_map), vec!["result", "result", "result"]);
    }

    #[test]
    fn test_type_handler_is_optional_on_every_kind() {
        let mut table = order_table();
        for column in &mut table.columns {
            column.type_handler = Some("com.example.Handler".to_string());
        }

        let property = ResultMapWithoutBlobsGenerator::new(false).build(&table);
        assert_eq!(property.children()[0].attribute_names(), vec!["column", "property", "typeHandler"]);
        assert_eq!(
            property.children()[1].attribute_names(),
            vec!["column", "property", "jdbcType", "typeHandler"]
        );

        table.constructor_based = true;
        let constructor = ResultMapWithoutBlobsGenerator::new(false).build(&table);
        for arg in constructor.children()[0].children() {
            assert_eq!(arg.attribute_names(), vec!["column", "jdbcType", "javaType", "typeHandler"]);
        }
    }

    #[test]
    fn test_aliased_columns_are_renamed() {
        let mut table = order_table();
        for column in &mut table.columns {
            column.table_alias = Some("o".to_string());
        }

        let result_map = ResultMapWithoutBlobsGenerator::new(false).build(&table);
        assert_eq!(result_map.children()[0].attribute("column"), Some("o_order_id"));
        assert_eq!(result_map.children()[0].attribute("property"), Some("orderId"));
    }

    #[test]
    fn test_associations_follow_bindings() {
        let mut table = order_table();
        table.rules.generate_left_join = true;
        table.columns[1].imported_column = Some(customer());

        let result_map = ResultMapWithoutBlobsGenerator::new(false).build(&table);
        assert_eq!(child_names(&result_map), vec!["id", "result", "result", "association"]);

        let association = &result_map.children()[3];
        assert_eq!(association.attribute_names(), vec!["property", "resultMap"]);
        assert_eq!(association.attribute("property"), Some("customer"));
        assert_eq!(
            association.attribute("resultMap"),
            Some("com.example.mapper.CustomerMapper.BaseResultMap")
        );

        table.constructor_based = true;
        let result_map = ResultMapWithoutBlobsGenerator::new(false).build(&table);
        assert_eq!(child_names(&result_map), vec!["constructor", "association"]);
    }

    #[test]
    fn test_key_associations_come_first() {
        let mut table = order_table();
        table.rules.generate_left_join = true;
        table.columns[0].imported_column = Some(ImportedColumn {
            column_name: "order_id".to_string(),
            table: ImportedTable {
                table_name: "order_header".to_string(),
                base_record_type: "com.example.model.OrderHeader".to_string(),
                namespace: "com.example.mapper.OrderHeaderMapper".to_string(),
                base_result_map_id: "BaseResultMap".to_string(),
            },
        });
        table.columns[2].imported_column = Some(customer());

        let result_map = ResultMapWithoutBlobsGenerator::new(true).build(&table);
        let properties: Vec<_> = result_map
            .children_named("association")
            .map(|a| a.attribute("property").unwrap())
            .collect();
        assert_eq!(properties, vec!["orderHeader", "customer"]);
    }

    #[test]
    fn test_left_join_without_links_adds_nothing() {
        let mut table = order_table();
        table.rules.generate_left_join = true;

        let result_map = ResultMapWithoutBlobsGenerator::new(false).build(&table);
        assert_eq!(result_map.children_named("association").count(), 0);
    }

    #[test]
    fn test_links_ignored_without_left_join() {
        let mut table = order_table();
        table.columns[1].imported_column = Some(customer());

        let result_map = ResultMapWithoutBlobsGenerator::new(false).build(&table);
        assert_eq!(result_map.children_named("association").count(), 0);
    }

    #[test]
    fn test_hook_approval_attaches_once() {
        let table = order_table();
        let mut parent = Element::new("mapper");

        let attached = ResultMapWithoutBlobsGenerator::new(false).add_elements(
            &mut parent,
            &table,
            &GeneratorContext::new(),
        );

        assert!(attached);
        assert_eq!(parent.children().len(), 1);
        assert_eq!(parent.children()[0].name(), "resultMap");
    }

    #[test]
    fn test_hook_veto_leaves_parent_unchanged() {
        let table = order_table();
        let mut parent = Element::new("mapper");
        let context = GeneratorContext::new().with_plugin(FnPlugin::new(|_, _| false));

        let attached = ResultMapWithoutBlobsGenerator::new(false).add_elements(&mut parent, &table, &context);

        assert!(!attached);
        assert!(parent.children().is_empty());
    }

    #[test]
    fn test_hook_sees_finished_element() {
        let mut table = order_table();
        table.rules.generate_left_join = true;
        table.columns[1].imported_column = Some(customer());

        let context = GeneratorContext::new().with_plugin(FnPlugin::new(|element, table| {
            assert_eq!(element.children_named("association").count(), 1);
            element.add_child(Element::new("discriminator").with_attribute("column", "kind"));
            element.set_attribute("id", format!("{}Map", table.table_name()));
            true
        }));

        let mut parent = Element::new("mapper");
        ResultMapWithoutBlobsGenerator::new(false).add_elements(&mut parent, &table, &context);

        let result_map = &parent.children()[0];
        assert_eq!(result_map.attribute("id"), Some("ORDERMap"));
        assert_eq!(result_map.children().last().map(Element::name), Some("discriminator"));
    }

    #[test]
    fn test_hook_edits_existing_children() {
        let table = order_table();

        let context = GeneratorContext::new().with_plugin(FnPlugin::new(|element, _| {
            for child in element.children_mut() {
                if child.attribute("column") == Some("total") {
                    child.set_attribute("jdbcType", "NUMERIC");
                    child.set_attribute("typeHandler", "com.example.MoneyHandler");
                }
            }
            true
        }));

        let mut parent = Element::new("mapper");
        assert!(ResultMapWithoutBlobsGenerator::new(false).add_elements(&mut parent, &table, &context));

        let result_map = &parent.children()[0];
        assert_eq!(child_names(result_map), vec!["id", "result", "result"]);

        let total = &result_map.children()[2];
        assert_eq!(total.attribute_names(), vec!["column", "property", "jdbcType", "typeHandler"]);
        assert_eq!(total.attribute("jdbcType"), Some("NUMERIC"));
        assert_eq!(result_map.children()[1].attribute("jdbcType"), Some("INTEGER"));
    }

    #[test]
    fn test_build_is_repeatable() {
        let table = order_table();
        let generator = ResultMapWithoutBlobsGenerator::new(false);
        assert_eq!(generator.build(&table), generator.build(&table));
    }
}
