//! DOM element utilities with a structural selector engine
//!
//! Arena-backed DOM tree, an `Element` wrapper for querying it, and a
//! selector matcher that answers `is(selector)` / `query_up(selector)` by
//! walking the tree itself instead of deferring to a host engine.
//!
//! ## Core Design
//!
//! ```text
//! "div.box > a"  →  Selector (parsed once, immutable)
//!                        ↓
//!   Element (NodeView) → matches(): subject first, then parents/ancestors
//!                        right-to-left
//! ```
//!
//! The matcher depends only on the [`NodeView`] trait (tag, id, classes,
//! parent), so any tree can be matched, not just [`DomArena`].

pub mod arena;
pub mod cache;
pub mod element;
pub mod error;
pub mod matcher;
pub mod selector;
pub mod serializer;
pub mod service;
pub mod types;
pub mod utils;

pub use arena::DomArena;
pub use cache::{CacheStats, SelectorCache};
pub use element::Element;
pub use error::{DomError, Result};
pub use matcher::{element_matches, matches, matches_part, NodeView};
pub use selector::{parse_selector, Combinator, Selector, SelectorPart, SelectorSource};
pub use serializer::{HtmlSerializer, SerializerConfig};
pub use service::{DomService, DomServiceConfig};
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_matching() {
        let mut arena = DomArena::new();
        let div = arena.add_node(DomNode::element("div").with_attr("class", "foo"));
        let a = arena.add_child(div, DomNode::element("a")).unwrap();

        let element = arena.element(a).unwrap();
        assert!(element.is("div.foo > a").unwrap());
        assert!(element_matches(&element, "a").unwrap());
    }
}
