//! Core type definitions for the DOM tree
//!
//! Key design principles:
//! 1. Use u32 for indices (4 bytes vs 8 bytes pointer)
//! 2. Use borrowed strings on the read path (&str)
//! 3. Use SmallVec for small arrays (avoid heap allocation)
//! 4. Keep attributes in source order so serialization is stable

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Node identifier (index into arena)
/// u32 allows 4 billion nodes, enough for any webpage
pub type NodeId = u32;

/// Attribute list in document order
pub type Attributes = SmallVec<[(String, String); 4]>;

/// Node type matching DOM specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NodeType {
    Element = 1,
    Attribute = 2,
    Text = 3,
    CdataSection = 4,
    EntityReference = 5,
    Entity = 6,
    ProcessingInstruction = 7,
    Comment = 8,
    Document = 9,
    DocumentType = 10,
    DocumentFragment = 11,
    Notation = 12,
}

impl NodeType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(NodeType::Element),
            2 => Some(NodeType::Attribute),
            3 => Some(NodeType::Text),
            4 => Some(NodeType::CdataSection),
            5 => Some(NodeType::EntityReference),
            6 => Some(NodeType::Entity),
            7 => Some(NodeType::ProcessingInstruction),
            8 => Some(NodeType::Comment),
            9 => Some(NodeType::Document),
            10 => Some(NodeType::DocumentType),
            11 => Some(NodeType::DocumentFragment),
            12 => Some(NodeType::Notation),
            _ => None,
        }
    }
}

/// The main DOM tree node structure
///
/// Design philosophy:
/// - Small fixed-size fields first (better packing)
/// - Use indices instead of pointers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomNode {
    pub node_id: NodeId,
    pub node_type: NodeType,

    // Navigation indices
    pub parent_id: Option<NodeId>,
    pub children_ids: SmallVec<[NodeId; 4]>, // Most nodes have <4 children

    pub node_name: String,
    pub node_value: String,
    pub attributes: Attributes,
}

impl DomNode {
    /// Create a new node with required fields.
    /// `node_id` is reassigned by the arena on insertion.
    pub fn new(node_type: NodeType, node_name: impl Into<String>) -> Self {
        Self {
            node_id: 0,
            node_type,
            parent_id: None,
            children_ids: SmallVec::new(),
            node_name: node_name.into(),
            node_value: String::new(),
            attributes: SmallVec::new(),
        }
    }

    /// Element node with the given tag name
    pub fn element(tag: impl Into<String>) -> Self {
        Self::new(NodeType::Element, tag)
    }

    /// Text node
    pub fn text(value: impl Into<String>) -> Self {
        let mut node = Self::new(NodeType::Text, "#text");
        node.node_value = value.into();
        node
    }

    pub fn comment(value: impl Into<String>) -> Self {
        let mut node = Self::new(NodeType::Comment, "#comment");
        node.node_value = value.into();
        node
    }

    pub fn document() -> Self {
        Self::new(NodeType::Document, "#document")
    }

    /// Builder-style attribute setter, handy for constructing fixtures
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Get tag name for element nodes
    pub fn tag_name(&self) -> Option<&str> {
        if self.node_type == NodeType::Element {
            Some(&self.node_name)
        } else {
            None
        }
    }

    /// Check if node is an element
    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    /// Check if node is text
    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// Get attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set attribute value, keeping the original position if it already exists
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self
                .attributes
                .push((name.to_string(), value.to_string())),
        }
    }

    /// Remove attribute, returning the old value
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let index = self.attributes.iter().position(|(key, _)| key == name)?;
        Some(self.attributes.remove(index).1)
    }

    /// Non-empty `id` attribute
    pub fn id(&self) -> Option<&str> {
        self.attr("id").filter(|id| !id.is_empty())
    }

    /// Whitespace-separated entries of the `class` attribute
    pub fn class_list(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_ascii_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class_list().any(|c| c == class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_keep_order() {
        let mut node = DomNode::element("div")
            .with_attr("id", "main")
            .with_attr("class", "a b");
        node.set_attr("id", "other");
        node.set_attr("title", "t");

        let keys: Vec<&str> = node.attributes.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["id", "class", "title"]);
        assert_eq!(node.id(), Some("other"));
    }

    #[test]
    fn test_class_list() {
        let node = DomNode::element("div").with_attr("class", "  foo\tbar  baz ");
        let classes: Vec<&str> = node.class_list().collect();
        assert_eq!(classes, vec!["foo", "bar", "baz"]);
        assert!(node.has_class("bar"));
        assert!(!node.has_class("ba"));
    }

    #[test]
    fn test_empty_id_is_absent() {
        let node = DomNode::element("div").with_attr("id", "");
        assert_eq!(node.id(), None);
    }

    #[test]
    fn test_remove_attr() {
        let mut node = DomNode::element("a").with_attr("href", "/x");
        assert_eq!(node.remove_attr("href").as_deref(), Some("/x"));
        assert_eq!(node.remove_attr("href"), None);
    }
}
