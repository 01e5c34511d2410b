//! Structural selector matching
//!
//! Matching is right-to-left: the rightmost compound must describe the
//! node itself, then each part to the left is resolved against the
//! parent (`>`) or the nearest matching ancestor (whitespace). The walk is
//! greedy; once a part is satisfied it is never revisited.
//!
//! The matcher only needs [`NodeView`], so it works over any tree that can
//! report a tag, an id, class membership and a parent.

use crate::error::Result;
use crate::selector::{Combinator, Selector, SelectorPart, SelectorSource};

/// Read-only view of one element, as needed by the matcher
pub trait NodeView: Clone {
    /// Tag name in any case
    fn tag_name(&self) -> &str;

    /// Element id, `None` when absent or empty
    fn id(&self) -> Option<&str>;

    /// Class list membership
    fn has_class(&self, class: &str) -> bool;

    /// Parent element, `None` at the top of the element tree
    fn parent(&self) -> Option<Self>;
}

/// Does `node` satisfy a single compound term?
///
/// Cheapest checks first: tag, then id, then the class subset.
pub fn matches_part<N: NodeView>(node: &N, part: &SelectorPart) -> bool {
    if let Some(tag) = &part.tag {
        if !node.tag_name().eq_ignore_ascii_case(tag) {
            return false;
        }
    }

    if let Some(id) = &part.id {
        if node.id() != Some(id.as_str()) {
            return false;
        }
    }

    part.classes.iter().all(|class| node.has_class(class))
}

/// Does `node` satisfy the whole selector?
pub fn matches<N: NodeView>(node: &N, selector: &Selector) -> bool {
    let Some((subject, rest)) = selector.parts().split_last() else {
        return false;
    };

    if !matches_part(node, subject) {
        return false;
    }

    let mut current = node.clone();
    // The combinator stored on a part governs the step to its left neighbour
    let mut step = subject.combinator;

    for part in rest.iter().rev() {
        let next = match step.unwrap_or(Combinator::Descendant) {
            Combinator::Child => current.parent().filter(|parent| matches_part(parent, part)),
            Combinator::Descendant => {
                std::iter::successors(current.parent(), |n| n.parent())
                    .find(|ancestor| matches_part(ancestor, part))
            }
        };

        match next {
            Some(found) => current = found,
            None => return false,
        }
        step = part.combinator;
    }

    true
}

/// Match against selector text or an already parsed [`Selector`].
///
/// Only parsing can fail; a well-formed selector always yields a boolean.
pub fn element_matches<N, S>(node: &N, selector: S) -> Result<bool>
where
    N: NodeView,
    S: SelectorSource,
{
    let selector = selector.to_selector()?;
    Ok(matches(node, &selector))
}

/// Nearest proper ancestor of `node` that satisfies `selector`
pub fn closest_ancestor<N: NodeView>(node: &N, selector: &Selector) -> Option<N> {
    std::iter::successors(node.parent(), |n| n.parent())
        .find(|ancestor| matches(ancestor, selector))
}
