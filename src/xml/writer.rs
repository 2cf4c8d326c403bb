//! XML rendering for element trees.
//!
//! Output matches the layout the mapping engine's own generator produces:
//! two-space indentation, attributes in insertion order, and childless
//! elements written as `<name attr="value" />`.

use std::io::Write;

use crate::xml::Element;

/// Public id and system id of the MyBatis 3 mapper DTD
pub const MAPPER_DOCTYPE: (&str, &str) = (
    "-//mybatis.org//DTD Mapper 3.0//EN",
    "http://mybatis.org/dtd/mybatis-3-mapper.dtd",
);

/// Write a complete document: XML declaration, DOCTYPE for the root element,
/// then the tree itself.
pub fn write_document<W: Write>(writer: &mut W, root: &Element) -> Result<(), std::io::Error> {
    writeln!(writer, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
    let (public_id, system_id) = MAPPER_DOCTYPE;
    writeln!(
        writer,
        "<!DOCTYPE {} PUBLIC \"{}\" \"{}\">",
        root.name(),
        public_id,
        system_id
    )?;
    write_element(writer, root, 0)
}

/// Render a document into a string
pub fn render_document(root: &Element) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_document(&mut buffer, root);
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Write one element and its subtree at the given indentation level
pub fn write_element<W: Write>(
    writer: &mut W,
    element: &Element,
    indent: usize,
) -> Result<(), std::io::Error> {
    let pad = "  ".repeat(indent);
    write!(writer, "{}<{}", pad, element.name())?;
    for (name, value) in element.attributes() {
        write!(writer, " {}=\"{}\"", name, escape_attribute(value))?;
    }

    if element.is_childless() {
        writeln!(writer, " />")?;
        return Ok(());
    }

    writeln!(writer, ">")?;
    for child in element.children() {
        write_element(writer, child, indent + 1)?;
    }
    writeln!(writer, "{}</{}>", pad, element.name())
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
