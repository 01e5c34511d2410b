//! DOM Service - Main entry point for DOM operations
//!
//! This handles:
//! - Tree construction from a DOM.getDocument-shaped JSON document
//! - Selector matching and ancestor queries by node ID
//! - Memoizing parsed selectors across calls

use crate::arena::DomArena;
use crate::cache::{CacheStats, SelectorCache};
use crate::error::{DomError, Result};
use crate::matcher;
use crate::selector::{parse_selector, Selector};
use crate::types::*;
use serde_json::Value;
use std::sync::Arc;

/// Configuration for DOM service
#[derive(Debug, Clone)]
pub struct DomServiceConfig {
    /// Memoize parsed selectors by their literal text
    pub cache_selectors: bool,
    /// Entries kept before the cache is cleared
    pub selector_cache_capacity: usize,
}

impl Default for DomServiceConfig {
    fn default() -> Self {
        Self {
            cache_selectors: true,
            selector_cache_capacity: 256,
        }
    }
}

/// Main DOM service
pub struct DomService {
    config: DomServiceConfig,
    arena: DomArena,
    selectors: SelectorCache,
}

impl DomService {
    /// Create new DOM service with default config
    pub fn new() -> Self {
        Self::with_config(DomServiceConfig::default())
    }

    /// Create DOM service with custom config
    pub fn with_config(config: DomServiceConfig) -> Self {
        let selectors = SelectorCache::new(config.selector_cache_capacity);
        Self {
            config,
            arena: DomArena::new(),
            selectors,
        }
    }

    pub fn config(&self) -> &DomServiceConfig {
        &self.config
    }

    /// Get reference to internal arena
    pub fn arena(&self) -> &DomArena {
        &self.arena
    }

    /// Get mutable reference to internal arena
    pub fn arena_mut(&mut self) -> &mut DomArena {
        &mut self.arena
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.selectors.stats()
    }

    /// Parse a JSON tree and replace the arena contents
    ///
    /// Input format follows DOM.getDocument; the `root` wrapper is optional:
    /// ```json
    /// {
    ///   "root": {
    ///     "nodeType": 9,
    ///     "nodeName": "#document",
    ///     "children": [
    ///       { "nodeType": 1, "nodeName": "DIV", "attributes": ["id", "main"] }
    ///     ]
    ///   }
    /// }
    /// ```
    ///
    /// On error the previously loaded tree is kept.
    pub fn load_tree(&mut self, document: &Value) -> Result<NodeId> {
        let root = document.get("root").unwrap_or(document);
        let arena = build_arena(root)?;
        let root_id = arena
            .root_id()
            .ok_or_else(|| DomError::TreeError("No root node set".to_string()))?;

        self.arena = arena;
        tracing::debug!(nodes = self.arena.len(), "Loaded DOM tree");
        Ok(root_id)
    }

    /// Same as `load_tree`, from JSON text
    pub fn load_tree_str(&mut self, json: &str) -> Result<NodeId> {
        let document: Value = serde_json::from_str(json)?;
        self.load_tree(&document)
    }

    /// Parsed selector, from the cache when enabled
    pub fn selector(&mut self, text: &str) -> Result<Arc<Selector>> {
        if self.config.cache_selectors {
            self.selectors.get_or_parse(text)
        } else {
            Ok(Arc::new(parse_selector(text)?))
        }
    }

    /// Does the element `node_id` match `selector`?
    pub fn element_matches(&mut self, node_id: NodeId, selector: &str) -> Result<bool> {
        let selector = self.selector(selector)?;
        let element = self.arena.element(node_id)?;
        Ok(matcher::matches(&element, &selector))
    }

    /// Nearest ancestor element of `node_id` matching `selector`
    pub fn query_up(&mut self, node_id: NodeId, selector: &str) -> Result<Option<NodeId>> {
        let selector = self.selector(selector)?;
        let element = self.arena.element(node_id)?;
        Ok(matcher::closest_ancestor(&element, &selector).map(|found| found.node_id()))
    }

    /// All elements in the document matching `selector`, in document order
    pub fn query(&mut self, selector: &str) -> Result<Vec<NodeId>> {
        let selector = self.selector(selector)?;
        Ok(self
            .arena
            .query(&*selector)?
            .iter()
            .map(|element| element.node_id())
            .collect())
    }
}

impl Default for DomService {
    fn default() -> Self {
        Self::new()
    }
}

/// Build an arena from a JSON node. Nodes get IDs in document order.
/// Walks with an explicit stack, so nesting depth is bounded by memory only.
fn build_arena(root: &Value) -> Result<DomArena> {
    let mut arena = DomArena::new();
    let mut stack: Vec<(&Value, Option<NodeId>)> = vec![(root, None)];

    while let Some((json_node, parent_id)) = stack.pop() {
        let node_id = arena.add_node(parse_node(json_node)?);
        match parent_id {
            Some(parent_id) => arena.append_child(parent_id, node_id)?,
            None => arena.set_root(node_id)?,
        }

        if let Some(children) = json_node["children"].as_array() {
            // Reversed so the first child is popped next
            stack.extend(children.iter().rev().map(|child| (child, Some(node_id))));
        }
    }

    Ok(arena)
}

/// Parse a single JSON node, without its children
fn parse_node(json_node: &Value) -> Result<DomNode> {
    let node_type_val = json_node["nodeType"]
        .as_u64()
        .ok_or_else(|| DomError::TreeError("Missing nodeType".to_string()))?;

    let node_type = u8::try_from(node_type_val)
        .ok()
        .and_then(NodeType::from_u8)
        .ok_or_else(|| DomError::InvalidNodeType {
            expected: "valid NodeType".to_string(),
            actual: format!("{}", node_type_val),
        })?;

    let node_name = match json_node["nodeName"].as_str() {
        Some(name) => name.to_string(),
        None if node_type == NodeType::Element => {
            return Err(DomError::TreeError(
                "Missing nodeName on element".to_string(),
            ))
        }
        None => String::new(),
    };

    let mut node = DomNode::new(node_type, node_name);
    node.node_value = json_node["nodeValue"].as_str().unwrap_or("").to_string();

    // Attributes come as a flat [name, value, name, value, ...] array
    if let Some(attrs) = json_node["attributes"].as_array() {
        for pair in attrs.chunks_exact(2) {
            if let (Some(key), Some(value)) = (pair[0].as_str(), pair[1].as_str()) {
                node.set_attr(key, value);
            }
        }
    }

    Ok(node)
}
