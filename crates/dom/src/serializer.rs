//! HTML serializer
//!
//! Produces `outerHTML` / `innerHTML` style markup for a subtree:
//! - attributes in source order
//! - lower-cased tag names
//! - void elements without a closing tag

use crate::arena::DomArena;
use crate::error::Result;
use crate::types::*;
use crate::utils;

/// Elements that never have a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Serializer configuration
#[derive(Debug, Clone)]
pub struct SerializerConfig {
    /// Truncate each text node to this many bytes
    pub max_text_length: Option<usize>,
    pub escape_text: bool,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            max_text_length: None,
            escape_text: true,
        }
    }
}

/// DOM Tree Serializer
pub struct HtmlSerializer {
    config: SerializerConfig,
}

impl HtmlSerializer {
    pub fn new() -> Self {
        Self::with_config(SerializerConfig::default())
    }

    pub fn with_config(config: SerializerConfig) -> Self {
        Self { config }
    }

    /// Markup for the node itself and its subtree
    pub fn outer_html(&self, arena: &DomArena, node_id: NodeId) -> Result<String> {
        let mut output = String::with_capacity(256);
        self.serialize_node(arena, node_id, &mut output)?;
        Ok(output)
    }

    /// Markup for the node's children only
    pub fn inner_html(&self, arena: &DomArena, node_id: NodeId) -> Result<String> {
        let mut output = String::with_capacity(256);
        for child in arena.children(node_id)? {
            self.serialize_node(arena, child.node_id, &mut output)?;
        }
        Ok(output)
    }

    /// Whole document from the root
    pub fn serialize(&self, arena: &DomArena) -> Result<String> {
        match arena.root_id() {
            Some(root_id) => self.outer_html(arena, root_id),
            None => Ok(String::new()),
        }
    }

    /// Serialize a single node recursively
    fn serialize_node(&self, arena: &DomArena, node_id: NodeId, output: &mut String) -> Result<()> {
        let node = arena.get(node_id)?;

        match node.node_type {
            NodeType::Element => {
                let tag = node.node_name.to_ascii_lowercase();
                output.push('<');
                output.push_str(&tag);

                for (name, value) in &node.attributes {
                    output.push_str(&format!(
                        " {}=\"{}\"",
                        name,
                        utils::escape_attribute(value)
                    ));
                }
                output.push('>');

                if VOID_ELEMENTS.contains(&tag.as_str()) {
                    return Ok(());
                }

                for &child_id in &node.children_ids {
                    self.serialize_node(arena, child_id, output)?;
                }

                output.push_str("</");
                output.push_str(&tag);
                output.push('>');
            }
            NodeType::Text | NodeType::CdataSection => {
                let text = match self.config.max_text_length {
                    Some(max) => utils::cap_text_length(&node.node_value, max),
                    None => node.node_value.clone(),
                };
                if self.config.escape_text {
                    output.push_str(&utils::escape_text(&text));
                } else {
                    output.push_str(&text);
                }
            }
            NodeType::Comment => {
                output.push_str("<!--");
                output.push_str(&node.node_value);
                output.push_str("-->");
            }
            NodeType::Document | NodeType::DocumentFragment => {
                for &child_id in &node.children_ids {
                    self.serialize_node(arena, child_id, output)?;
                }
            }
            _ => {
                // Doctype, processing instructions etc. carry no markup here
            }
        }

        Ok(())
    }
}

impl Default for HtmlSerializer {
    fn default() -> Self {
        Self::new()
    }
}
