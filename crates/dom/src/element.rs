//! Element wrapper
//!
//! `Element` is a borrowed handle to one element node in a `DomArena`. It
//! is `Copy`, implements [`NodeView`] and carries the query helpers
//! (`is`, `query_up`, `query`, child and sibling lookups).

use crate::arena::DomArena;
use crate::error::{DomError, Result};
use crate::matcher::{self, NodeView};
use crate::selector::SelectorSource;
use crate::types::{DomNode, NodeId};
use crate::utils;
use ahash::AHashMap;

#[derive(Debug, Clone, Copy)]
pub struct Element<'a> {
    arena: &'a DomArena,
    node: &'a DomNode,
}

impl<'a> Element<'a> {
    /// Wrap an element node. Fails for unknown IDs and non-element nodes.
    pub fn new(arena: &'a DomArena, node_id: NodeId) -> Result<Self> {
        let node = arena.get(node_id)?;
        if !node.is_element() {
            return Err(DomError::InvalidNodeType {
                expected: "Element".to_string(),
                actual: format!("{:?}", node.node_type),
            });
        }
        Ok(Self { arena, node })
    }

    fn wrap(&self, node_id: NodeId) -> Option<Element<'a>> {
        Element::new(self.arena, node_id).ok()
    }

    pub fn node_id(&self) -> NodeId {
        self.node.node_id
    }

    /// The underlying node
    pub fn node(&self) -> &'a DomNode {
        self.node
    }

    pub fn arena(&self) -> &'a DomArena {
        self.arena
    }

    /// Tag name upper-cased, the way `tagName` reports HTML elements
    pub fn tag_name(&self) -> String {
        self.node.node_name.to_ascii_uppercase()
    }

    /// Raw `class` attribute
    pub fn class_name(&self) -> &'a str {
        self.node.attr("class").unwrap_or("")
    }

    /// True if every whitespace-separated class in `classes` is present
    pub fn has_classes(&self, classes: &str) -> bool {
        let mut wanted = classes.split_ascii_whitespace().peekable();
        wanted.peek().is_some() && wanted.all(|class| self.node.has_class(class))
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.node.attr(name)
    }

    /// `data-*` attribute by its camelCase key, e.g. `camelCase` reads
    /// `data-camel-case`
    pub fn data_attribute(&self, key: &str) -> Option<&'a str> {
        self.node.attr(&utils::data_attribute_name(key))
    }

    /// All `data-*` attributes keyed by camelCase name
    pub fn dataset(&self) -> AHashMap<String, String> {
        self.node
            .attributes
            .iter()
            .filter_map(|(name, value)| {
                utils::dataset_key(name).map(|key| (key, value.clone()))
            })
            .collect()
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self) -> Result<String> {
        utils::get_text_content(self.arena, self.node_id())
    }

    /// Does this element match the selector?
    pub fn is<S: SelectorSource>(&self, selector: S) -> Result<bool> {
        matcher::element_matches(self, selector)
    }

    /// Nearest ancestor matching the selector (the element itself is not
    /// considered)
    pub fn query_up<S: SelectorSource>(&self, selector: S) -> Result<Option<Element<'a>>> {
        let selector = selector.to_selector()?;
        Ok(matcher::closest_ancestor(self, &selector))
    }

    /// Descendant elements matching the selector, in document order
    pub fn query<S: SelectorSource>(&self, selector: S) -> Result<Vec<Element<'a>>> {
        query_under(self.arena, self.node_id(), selector)
    }

    pub fn query_first<S: SelectorSource>(&self, selector: S) -> Result<Option<Element<'a>>> {
        Ok(self.query(selector)?.into_iter().next())
    }

    pub fn query_last<S: SelectorSource>(&self, selector: S) -> Result<Option<Element<'a>>> {
        Ok(self.query(selector)?.pop())
    }

    /// Element children in document order
    pub fn children(&self) -> Vec<Element<'a>> {
        self.arena
            .element_children(self.node_id())
            .unwrap_or_default()
            .into_iter()
            .filter_map(|id| self.wrap(id))
            .collect()
    }

    /// First element child, or the first one matching `selector`
    pub fn first_child<S: SelectorSource>(
        &self,
        selector: Option<S>,
    ) -> Result<Option<Element<'a>>> {
        let children = self.children();
        match selector {
            None => Ok(children.into_iter().next()),
            Some(selector) => {
                let selector = selector.to_selector()?;
                Ok(children
                    .into_iter()
                    .find(|child| matcher::matches(child, &selector)))
            }
        }
    }

    /// Last element child, or the last one matching `selector`
    pub fn last_child<S: SelectorSource>(
        &self,
        selector: Option<S>,
    ) -> Result<Option<Element<'a>>> {
        let children = self.children();
        match selector {
            None => Ok(children.into_iter().next_back()),
            Some(selector) => {
                let selector = selector.to_selector()?;
                Ok(children
                    .into_iter()
                    .rev()
                    .find(|child| matcher::matches(child, &selector)))
            }
        }
    }

    pub fn next_sibling(&self) -> Option<Element<'a>> {
        self.arena
            .next_element_sibling(self.node_id())
            .and_then(|id| self.wrap(id))
    }

    pub fn previous_sibling(&self) -> Option<Element<'a>> {
        self.arena
            .previous_element_sibling(self.node_id())
            .and_then(|id| self.wrap(id))
    }
}

impl PartialEq for Element<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.arena, other.arena) && self.node_id() == other.node_id()
    }
}

impl Eq for Element<'_> {}

impl NodeView for Element<'_> {
    fn tag_name(&self) -> &str {
        &self.node.node_name
    }

    fn id(&self) -> Option<&str> {
        self.node.id()
    }

    fn has_class(&self, class: &str) -> bool {
        self.node.has_class(class)
    }

    /// Parent element; document and fragment nodes end the walk
    fn parent(&self) -> Option<Self> {
        let parent = self.arena.parent(self.node_id()).ok()??;
        self.wrap(parent.node_id)
    }
}

fn query_under<'a, S: SelectorSource>(
    arena: &'a DomArena,
    start_id: NodeId,
    selector: S,
) -> Result<Vec<Element<'a>>> {
    let selector = selector.to_selector()?;
    let mut found = Vec::new();

    for id in arena.descendant_elements(start_id)? {
        let element = Element::new(arena, id)?;
        if matcher::matches(&element, &selector) {
            found.push(element);
        }
    }

    Ok(found)
}

/// Document-level lookups
impl DomArena {
    /// Wrap an element node
    pub fn element(&self, node_id: NodeId) -> Result<Element<'_>> {
        Element::new(self, node_id)
    }

    /// Element with the given id under the root
    pub fn query_by_id(&self, id: &str) -> Option<Element<'_>> {
        self.find_by_id(id)
            .and_then(|node_id| Element::new(self, node_id).ok())
    }

    /// All elements under the root matching the selector
    pub fn query<S: SelectorSource>(&self, selector: S) -> Result<Vec<Element<'_>>> {
        let root_id = self
            .root_id()
            .ok_or_else(|| DomError::TreeError("No root node set".to_string()))?;
        let selector = selector.to_selector()?;
        let mut found = query_under(self, root_id, &*selector)?;

        // query_under excludes its start node; an element root can match too
        if let Ok(root) = Element::new(self, root_id) {
            if matcher::matches(&root, &selector) {
                found.insert(0, root);
            }
        }

        Ok(found)
    }

    pub fn query_first<S: SelectorSource>(&self, selector: S) -> Result<Option<Element<'_>>> {
        Ok(self.query(selector)?.into_iter().next())
    }
}
