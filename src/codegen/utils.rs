//! Naming and type helpers shared by the generators.

use convert_case::{Case, Casing};

/// Convert a string to PascalCase
pub fn to_pascal_case(s: &str) -> String {
    s.to_case(Case::Pascal)
}

/// Convert a string to camelCase
pub fn to_camel_case(s: &str) -> String {
    s.to_case(Case::Camel)
}

/// Turn a type's short name into a JavaBeans property name.
///
/// Only a leading capital followed by a lower-case letter is de-capitalized,
/// so acronym-led names such as `URLInfo` stay intact. Names shorter than two
/// characters are lower-cased.
pub fn valid_property_name(name: &str) -> String {
    let mut chars = name.chars();
    let (Some(first), Some(second)) = (chars.next(), chars.next()) else {
        return name.to_lowercase();
    };

    if first.is_uppercase() && !second.is_uppercase() {
        let mut answer = first.to_lowercase().collect::<String>();
        answer.push_str(&name[first.len_utf8()..]);
        answer
    } else {
        name.to_string()
    }
}

/// Unqualified name of a fully-qualified type, with any generic arguments
/// removed (`com.example.Order` -> `Order`)
pub fn short_type_name(fully_qualified: &str) -> &str {
    let base = fully_qualified
        .split_once('<')
        .map_or(fully_qualified, |(base, _)| base)
        .trim();
    base.rsplit('.').next().unwrap_or(base)
}

/// Join a package and a simple name, tolerating an empty package
pub fn qualify(package: &str, name: &str) -> String {
    if package.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", package, name)
    }
}

/// Default Java type for a JDBC type name
pub fn java_type_for_jdbc(jdbc_type: &str) -> &'static str {
    match jdbc_type.to_ascii_uppercase().as_str() {
        "BIGINT" => "java.lang.Long",
        "BIT" | "BOOLEAN" => "java.lang.Boolean",
        "CHAR" | "VARCHAR" | "LONGVARCHAR" | "NCHAR" | "NVARCHAR" | "LONGNVARCHAR" | "CLOB"
        | "NCLOB" => "java.lang.String",
        "DATE" | "TIME" | "TIMESTAMP" => "java.util.Date",
        "DECIMAL" | "NUMERIC" => "java.math.BigDecimal",
        "DOUBLE" | "FLOAT" => "java.lang.Double",
        "REAL" => "java.lang.Float",
        "INTEGER" => "java.lang.Integer",
        "SMALLINT" => "java.lang.Short",
        "TINYINT" => "java.lang.Byte",
        "BINARY" | "BLOB" | "LONGVARBINARY" | "VARBINARY" => "byte[]",
        _ => "java.lang.Object",
    }
}

/// Whether a JDBC type is a large-object type kept out of the base record
pub fn is_blob_jdbc_type(jdbc_type: &str) -> bool {
    matches!(
        jdbc_type.to_ascii_uppercase().as_str(),
        "BINARY" | "BLOB" | "CLOB" | "LONGNVARCHAR" | "LONGVARBINARY" | "LONGVARCHAR" | "NCLOB"
            | "VARBINARY"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_conversions() {
        assert_eq!(to_pascal_case("order_line"), "OrderLine");
        assert_eq!(to_camel_case("customer_id"), "customerId");
        assert_eq!(to_camel_case("total"), "total");
    }

    #[test]
    fn test_valid_property_name() {
        assert_eq!(valid_property_name("Customer"), "customer");
        assert_eq!(valid_property_name("OrderLine"), "orderLine");
        assert_eq!(valid_property_name("URLInfo"), "URLInfo");
        assert_eq!(valid_property_name("customer"), "customer");
        assert_eq!(valid_property_name("X"), "x");
        assert_eq!(valid_property_name(""), "");
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("com.example.model.Customer"), "Customer");
        assert_eq!(short_type_name("Customer"), "Customer");
        assert_eq!(short_type_name("java.util.List<java.lang.String>"), "List");
    }

    #[test]
    fn test_qualify() {
        assert_eq!(qualify("com.example", "Order"), "com.example.Order");
        assert_eq!(qualify("", "Order"), "Order");
    }

    #[test]
    fn test_java_type_for_jdbc() {
        assert_eq!(java_type_for_jdbc("INTEGER"), "java.lang.Integer");
        assert_eq!(java_type_for_jdbc("decimal"), "java.math.BigDecimal");
        assert_eq!(java_type_for_jdbc("BLOB"), "byte[]");
        assert_eq!(java_type_for_jdbc("GEOMETRY"), "java.lang.Object");
    }

    #[test]
    fn test_is_blob_jdbc_type() {
        assert!(is_blob_jdbc_type("LONGVARCHAR"));
        assert!(is_blob_jdbc_type("blob"));
        assert!(!is_blob_jdbc_type("VARCHAR"));
    }
}
