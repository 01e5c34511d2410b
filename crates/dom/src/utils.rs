//! Utility functions for DOM processing

use crate::arena::DomArena;
use crate::error::Result;
use crate::types::NodeType;

/// Cap text length to avoid runaway output, respecting char boundaries
pub fn cap_text_length(text: &str, max_len: usize) -> String {
    if text.len() <= max_len {
        return text.to_string();
    }

    let mut end = max_len;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

/// Attribute name for a camelCase dataset key: `camelCase` -> `data-camel-case`
pub fn data_attribute_name(key: &str) -> String {
    let mut name = String::with_capacity(key.len() + 8);
    name.push_str("data-");
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            name.push('-');
            name.push(c.to_ascii_lowercase());
        } else {
            name.push(c);
        }
    }
    name
}

/// Dataset key for a `data-*` attribute name, `None` for other attributes
pub fn dataset_key(attribute: &str) -> Option<String> {
    let rest = attribute.strip_prefix("data-")?;
    let mut key = String::with_capacity(rest.len());
    let mut upper_next = false;
    for c in rest.chars() {
        if c == '-' {
            upper_next = true;
        } else if upper_next {
            key.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            key.push(c);
        }
    }
    Some(key)
}

/// Get all text content from node and its children
pub fn get_text_content(arena: &DomArena, node_id: u32) -> Result<String> {
    let mut text = String::new();

    arena.traverse_df(node_id, |node| {
        if node.node_type == NodeType::Text {
            text.push_str(&node.node_value);
        }
        Ok(())
    })?;

    Ok(text)
}

/// Escape text content for HTML output
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape an attribute value for double-quoted HTML output
pub fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DomNode;

    #[test]
    fn test_cap_text_length() {
        assert_eq!(cap_text_length("hello", 10), "hello");
        assert_eq!(cap_text_length("hello world", 5), "hello...");
        assert_eq!(cap_text_length("héllo", 2), "h...");
    }

    #[test]
    fn test_data_attribute_names() {
        assert_eq!(data_attribute_name("attr1"), "data-attr1");
        assert_eq!(data_attribute_name("camelCase"), "data-camel-case");
        assert_eq!(dataset_key("data-camel-case").as_deref(), Some("camelCase"));
        assert_eq!(dataset_key("data-attr1").as_deref(), Some("attr1"));
        assert_eq!(dataset_key("class"), None);
    }

    #[test]
    fn test_escaping() {
        assert_eq!(escape_text("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape_attribute(r#"say "hi""#), "say &quot;hi&quot;");
    }

    #[test]
    fn test_text_content() {
        let mut arena = DomArena::new();
        let div = arena.add_node(DomNode::element("div"));
        arena.add_child(div, DomNode::text("Some text ")).unwrap();
        let em = arena.add_child(div, DomNode::element("em")).unwrap();
        arena.add_child(em, DomNode::text("with elements")).unwrap();
        arena.add_child(div, DomNode::comment("ignored")).unwrap();
        arena.add_child(div, DomNode::text(".")).unwrap();

        assert_eq!(
            get_text_content(&arena, div).unwrap(),
            "Some text with elements."
        );
    }
}
