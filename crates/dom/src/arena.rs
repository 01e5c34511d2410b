//! Arena-based DOM tree storage
//!
//! Nodes live in a single `Vec` and refer to each other by `NodeId`
//! (a 4-byte index). Parent and child links are plain indices, so walking
//! up the tree for selector matching is a sequence of array lookups.
//!
//! ```text
//! Arena: Vec<DomNode>
//!        [Node0][Node1][Node2]...
//!         ↑ 4-byte index, not 8-byte pointer
//! ```

use crate::error::{DomError, Result};
use crate::types::{DomNode, NodeId, NodeType};

/// Arena allocator for DOM nodes
#[derive(Debug)]
pub struct DomArena {
    /// All nodes stored sequentially (cache-friendly)
    nodes: Vec<DomNode>,

    /// Root node ID (if set)
    root_id: Option<NodeId>,
}

impl DomArena {
    /// Create a new empty arena
    pub fn new() -> Self {
        Self {
            nodes: Vec::with_capacity(1024), // Pre-allocate for typical page
            root_id: None,
        }
    }

    /// Create arena with specific capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            root_id: None,
        }
    }

    /// Add a detached node to the arena, returns its ID
    pub fn add_node(&mut self, mut node: DomNode) -> NodeId {
        let node_id = self.nodes.len() as NodeId;
        node.node_id = node_id;
        node.parent_id = None;
        node.children_ids.clear();
        self.nodes.push(node);
        node_id
    }

    /// Add a node and append it to `parent_id` in one step
    pub fn add_child(&mut self, parent_id: NodeId, node: DomNode) -> Result<NodeId> {
        self.get(parent_id)?;
        let child_id = self.add_node(node);
        self.append_child(parent_id, child_id)?;
        Ok(child_id)
    }

    /// Get node by ID (immutable)
    pub fn get(&self, node_id: NodeId) -> Result<&DomNode> {
        self.nodes
            .get(node_id as usize)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    /// Get node by ID (mutable)
    pub fn get_mut(&mut self, node_id: NodeId) -> Result<&mut DomNode> {
        self.nodes
            .get_mut(node_id as usize)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    /// Set root node
    pub fn set_root(&mut self, node_id: NodeId) -> Result<()> {
        // Verify node exists
        self.get(node_id)?;
        self.root_id = Some(node_id);
        Ok(())
    }

    /// Get root node ID
    pub fn root_id(&self) -> Option<NodeId> {
        self.root_id
    }

    /// Total number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if arena is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get children of a node
    pub fn children(&self, node_id: NodeId) -> Result<Vec<&DomNode>> {
        let node = self.get(node_id)?;
        node.children_ids
            .iter()
            .map(|&child_id| self.get(child_id))
            .collect()
    }

    /// Get parent of a node
    pub fn parent(&self, node_id: NodeId) -> Result<Option<&DomNode>> {
        let node = self.get(node_id)?;
        match node.parent_id {
            Some(parent_id) => Ok(Some(self.get(parent_id)?)),
            None => Ok(None),
        }
    }

    /// Ancestors of a node, nearest first. Empty for unknown IDs.
    pub fn ancestors(&self, node_id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let first = self.nodes.get(node_id as usize).and_then(|n| n.parent_id);
        std::iter::successors(first, move |&id| {
            self.nodes.get(id as usize).and_then(|n| n.parent_id)
        })
    }

    /// Append `child_id` as the last child of `parent_id`.
    ///
    /// A child that already has a parent is moved. Appending a node into
    /// its own subtree is rejected.
    pub fn append_child(&mut self, parent_id: NodeId, child_id: NodeId) -> Result<()> {
        self.get(child_id)?;
        let parent = self.get(parent_id)?;

        if parent.node_type != NodeType::Element
            && parent.node_type != NodeType::Document
            && parent.node_type != NodeType::DocumentFragment
        {
            return Err(DomError::InvalidNodeType {
                expected: "Element, Document or DocumentFragment".to_string(),
                actual: format!("{:?}", parent.node_type),
            });
        }

        if parent_id == child_id || self.ancestors(parent_id).any(|id| id == child_id) {
            return Err(DomError::TreeError(format!(
                "cannot append node {} inside its own subtree",
                child_id
            )));
        }

        self.detach(child_id)?;
        self.get_mut(parent_id)?.children_ids.push(child_id);
        self.get_mut(child_id)?.parent_id = Some(parent_id);
        Ok(())
    }

    /// Unlink a node from its parent. The node stays in the arena.
    pub fn detach(&mut self, node_id: NodeId) -> Result<()> {
        let Some(parent_id) = self.get(node_id)?.parent_id else {
            return Ok(());
        };

        let parent = self.get_mut(parent_id)?;
        parent.children_ids.retain(|id| *id != node_id);
        self.get_mut(node_id)?.parent_id = None;
        Ok(())
    }

    /// Siblings list of a node and its position in it
    fn sibling_slot(&self, node_id: NodeId) -> Option<(&[NodeId], usize)> {
        let parent_id = self.nodes.get(node_id as usize)?.parent_id?;
        let siblings = &self.nodes.get(parent_id as usize)?.children_ids;
        let position = siblings.iter().position(|&id| id == node_id)?;
        Some((siblings.as_slice(), position))
    }

    fn is_element_id(&self, node_id: NodeId) -> bool {
        self.nodes
            .get(node_id as usize)
            .is_some_and(|n| n.is_element())
    }

    /// Next sibling that is an element (text and comments are skipped)
    pub fn next_element_sibling(&self, node_id: NodeId) -> Option<NodeId> {
        let (siblings, position) = self.sibling_slot(node_id)?;
        siblings[position + 1..]
            .iter()
            .copied()
            .find(|&id| self.is_element_id(id))
    }

    /// Previous sibling that is an element (text and comments are skipped)
    pub fn previous_element_sibling(&self, node_id: NodeId) -> Option<NodeId> {
        let (siblings, position) = self.sibling_slot(node_id)?;
        siblings[..position]
            .iter()
            .rev()
            .copied()
            .find(|&id| self.is_element_id(id))
    }

    /// Element children in document order
    pub fn element_children(&self, node_id: NodeId) -> Result<Vec<NodeId>> {
        let node = self.get(node_id)?;
        Ok(node
            .children_ids
            .iter()
            .copied()
            .filter(|&id| self.is_element_id(id))
            .collect())
    }

    /// Traverse tree depth-first (iterative, no recursion)
    pub fn traverse_df<F>(&self, start_id: NodeId, mut visit: F) -> Result<()>
    where
        F: FnMut(&DomNode) -> Result<()>,
    {
        let mut stack = vec![start_id];

        while let Some(node_id) = stack.pop() {
            let node = self.get(node_id)?;
            visit(node)?;

            // Push children in reverse order (so they're visited left-to-right)
            for &child_id in node.children_ids.iter().rev() {
                stack.push(child_id);
            }
        }

        Ok(())
    }

    /// Element descendants of `start_id` in document order, excluding itself
    pub fn descendant_elements(&self, start_id: NodeId) -> Result<Vec<NodeId>> {
        let mut found = Vec::new();
        self.traverse_df(start_id, |node| {
            if node.node_id != start_id && node.is_element() {
                found.push(node.node_id);
            }
            Ok(())
        })?;
        Ok(found)
    }

    /// Find first node matching predicate
    pub fn find_one<F>(&self, predicate: F) -> Option<NodeId>
    where
        F: Fn(&DomNode) -> bool,
    {
        self.nodes.iter().enumerate().find_map(|(idx, node)| {
            if predicate(node) {
                Some(idx as NodeId)
            } else {
                None
            }
        })
    }

    /// Find element by ID attribute. Only nodes attached under the root
    /// are considered when a root is set.
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        match self.root_id {
            Some(root_id) => {
                let mut stack = vec![root_id];
                while let Some(node_id) = stack.pop() {
                    let node = self.nodes.get(node_id as usize)?;
                    if node.is_element() && node.id() == Some(id) {
                        return Some(node_id);
                    }
                    stack.extend(node.children_ids.iter().rev().copied());
                }
                None
            }
            None => self.find_one(|node| node.is_element() && node.id() == Some(id)),
        }
    }

    /// Set an attribute on an element
    pub fn set_attribute(&mut self, node_id: NodeId, name: &str, value: &str) -> Result<()> {
        self.element_mut(node_id)?.set_attr(name, value);
        Ok(())
    }

    /// Remove an attribute from an element, returning the old value
    pub fn remove_attribute(&mut self, node_id: NodeId, name: &str) -> Result<Option<String>> {
        Ok(self.element_mut(node_id)?.remove_attr(name))
    }

    /// Set the `id` attribute
    pub fn set_id(&mut self, node_id: NodeId, id: &str) -> Result<()> {
        self.set_attribute(node_id, "id", id)
    }

    /// Add a class unless already present
    pub fn add_class(&mut self, node_id: NodeId, class: &str) -> Result<()> {
        let node = self.element_mut(node_id)?;
        if node.has_class(class) {
            return Ok(());
        }

        let mut classes: Vec<&str> = node.class_list().collect();
        classes.push(class);
        let joined = classes.join(" ");
        node.set_attr("class", &joined);
        Ok(())
    }

    /// Remove every occurrence of a class
    pub fn remove_class(&mut self, node_id: NodeId, class: &str) -> Result<()> {
        let node = self.element_mut(node_id)?;
        if !node.has_class(class) {
            return Ok(());
        }

        let joined = node
            .class_list()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        node.set_attr("class", &joined);
        Ok(())
    }

    fn element_mut(&mut self, node_id: NodeId) -> Result<&mut DomNode> {
        let node = self.get_mut(node_id)?;
        if !node.is_element() {
            return Err(DomError::InvalidNodeType {
                expected: "Element".to_string(),
                actual: format!("{:?}", node.node_type),
            });
        }
        Ok(node)
    }
}

impl Default for DomArena {
    fn default() -> Self {
        Self::new()
    }
}
