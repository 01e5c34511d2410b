//! Selector parsing
//!
//! Supported grammar, which is all `is()` / `query_up()` need:
//!
//! ```text
//! selector  := compound ( ( ws+ | ws* '>' ws* ) compound )*
//! compound  := ( tag | '*' )? ( '#' name | '.' name )*
//! ```
//!
//! A parsed selector is stored left-to-right. Every part after the first
//! carries the combinator that links it to the part on its left, so
//! `div > ul li` becomes:
//!
//! ```text
//! [div] <-(Child)- [ul] <-(Descendant)- [li]
//! ```
//!
//! Anything outside the grammar (attribute selectors, pseudo-classes,
//! sibling combinators, selector lists) is rejected instead of being
//! half-understood.

use crate::error::{DomError, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;
use std::iter::Peekable;
use std::str::{Chars, FromStr};

/// Relation between a selector part and the part to its left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Combinator {
    /// Whitespace: the left part matches any ancestor
    Descendant,
    /// `>`: the left part matches the immediate parent
    Child,
}

/// One compound term, e.g. `div.foo.bar#id`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorPart {
    /// Lower-cased tag name; `None` is the wildcard
    pub tag: Option<String>,
    pub id: Option<String>,
    /// Required classes, deduplicated, in the order written
    pub classes: SmallVec<[String; 2]>,
    /// `None` only for the first part
    pub combinator: Option<Combinator>,
}

impl SelectorPart {
    /// True if this part places no constraint on a node (`*`)
    pub fn is_universal(&self) -> bool {
        self.tag.is_none() && self.id.is_none() && self.classes.is_empty()
    }
}

impl fmt::Display for SelectorPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => f.write_str(tag)?,
            None if self.is_universal() => f.write_str("*")?,
            None => {}
        }
        if let Some(id) = &self.id {
            write!(f, "#{}", id)?;
        }
        for class in &self.classes {
            write!(f, ".{}", class)?;
        }
        Ok(())
    }
}

/// A parsed, immutable selector. Only obtainable through the parser, so
/// it always has at least one part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selector {
    source: String,
    parts: SmallVec<[SelectorPart; 4]>,
}

impl Selector {
    pub fn parse(text: &str) -> Result<Self> {
        parse_selector(text)
    }

    /// Parts in written (left-to-right) order. Never empty.
    pub fn parts(&self) -> &[SelectorPart] {
        &self.parts
    }

    /// The rightmost part, which describes the node being tested
    pub fn subject(&self) -> &SelectorPart {
        // parse_selector never yields an empty part list
        &self.parts[self.parts.len() - 1]
    }

    /// Single compound term, no combinators
    pub fn is_compound(&self) -> bool {
        self.parts.len() == 1
    }

    /// The text this selector was parsed from, trimmed
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl FromStr for Selector {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self> {
        parse_selector(s)
    }
}

/// Canonical form: lower-cased tags, ids before classes, single spaces
impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, part) in self.parts.iter().enumerate() {
            match part.combinator {
                Some(Combinator::Child) => f.write_str(" > ")?,
                Some(Combinator::Descendant) => f.write_str(" ")?,
                None if index > 0 => f.write_str(" ")?,
                None => {}
            }
            write!(f, "{}", part)?;
        }
        Ok(())
    }
}

/// Anything a selector can be obtained from: selector text or an
/// already-parsed `Selector`.
pub trait SelectorSource {
    fn to_selector(&self) -> Result<Cow<'_, Selector>>;
}

impl SelectorSource for str {
    fn to_selector(&self) -> Result<Cow<'_, Selector>> {
        parse_selector(self).map(Cow::Owned)
    }
}

impl SelectorSource for String {
    fn to_selector(&self) -> Result<Cow<'_, Selector>> {
        self.as_str().to_selector()
    }
}

impl SelectorSource for Selector {
    fn to_selector(&self) -> Result<Cow<'_, Selector>> {
        Ok(Cow::Borrowed(self))
    }
}

impl<T: SelectorSource + ?Sized> SelectorSource for &T {
    fn to_selector(&self) -> Result<Cow<'_, Selector>> {
        (**self).to_selector()
    }
}

/// Parse selector text.
///
/// Fails with `DomError::MalformedSelector` for empty text, dangling or
/// doubled `>`, empty `#`/`.` names, conflicting ids, and any syntax
/// outside the supported subset.
pub fn parse_selector(text: &str) -> Result<Selector> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        tracing::debug!("Rejected empty selector");
        return Err(DomError::malformed(text, "selector is empty"));
    }

    let mut parts: SmallVec<[SelectorPart; 4]> = SmallVec::new();
    let mut pending_child = false;
    let mut chars = trimmed.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        match chars.peek() {
            None => break,
            Some('>') => {
                chars.next();
                if parts.is_empty() {
                    return Err(DomError::malformed(text, "selector starts with '>'"));
                }
                if pending_child {
                    return Err(DomError::malformed(text, "consecutive '>' combinators"));
                }
                pending_child = true;
            }
            Some(_) => {
                let mut part = parse_compound(&mut chars, text)?;
                if !parts.is_empty() {
                    part.combinator = Some(if pending_child {
                        Combinator::Child
                    } else {
                        Combinator::Descendant
                    });
                }
                pending_child = false;
                parts.push(part);
            }
        }
    }

    if pending_child {
        return Err(DomError::malformed(text, "selector ends with '>'"));
    }

    Ok(Selector {
        source: trimmed.to_string(),
        parts,
    })
}

fn parse_compound(chars: &mut Peekable<Chars<'_>>, source: &str) -> Result<SelectorPart> {
    let mut part = SelectorPart::default();

    match chars.peek() {
        Some('*') => {
            chars.next();
        }
        Some(&c) if is_name_char(c) => {
            part.tag = Some(read_name(chars, source)?.to_ascii_lowercase());
        }
        _ => {}
    }

    loop {
        match chars.peek() {
            None => break,
            Some(&c) if c.is_whitespace() || c == '>' => break,
            Some('#') => {
                chars.next();
                let id = read_name(chars, source)?;
                if id.is_empty() {
                    return Err(DomError::malformed(source, "'#' without an id"));
                }
                match &part.id {
                    Some(existing) if *existing != id => {
                        return Err(DomError::malformed(
                            source,
                            format!("conflicting ids '{}' and '{}'", existing, id),
                        ));
                    }
                    _ => part.id = Some(id),
                }
            }
            Some('.') => {
                chars.next();
                let class = read_name(chars, source)?;
                if class.is_empty() {
                    return Err(DomError::malformed(source, "'.' without a class name"));
                }
                if !part.classes.contains(&class) {
                    part.classes.push(class);
                }
            }
            Some(&c) => {
                tracing::debug!(selector = source, "Unsupported selector character {:?}", c);
                return Err(DomError::malformed(
                    source,
                    format!("unsupported character {:?}", c),
                ));
            }
        }
    }

    Ok(part)
}

/// Read an identifier; a backslash takes the next character literally
fn read_name(chars: &mut Peekable<Chars<'_>>, source: &str) -> Result<String> {
    let mut name = String::new();

    while let Some(&c) = chars.peek() {
        if c == '\\' {
            chars.next();
            match chars.next() {
                Some(escaped) => name.push(escaped),
                None => return Err(DomError::malformed(source, "dangling escape")),
            }
        } else if is_name_char(c) {
            name.push(c);
            chars.next();
        } else {
            break;
        }
    }

    Ok(name)
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || c == '\\' || !c.is_ascii()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(selector: &Selector, index: usize) -> &SelectorPart {
        &selector.parts()[index]
    }

    #[test]
    fn test_parse_compound() {
        let selector = parse_selector("div.foo#id").unwrap();
        assert!(selector.is_compound());

        let subject = selector.subject();
        assert_eq!(subject.tag.as_deref(), Some("div"));
        assert_eq!(subject.id.as_deref(), Some("id"));
        assert_eq!(subject.classes.as_slice(), ["foo".to_string()]);
        assert_eq!(subject.combinator, None);
    }

    #[test]
    fn test_parse_empty_fails() {
        for text in ["", "   ", "\t\n"] {
            let err = parse_selector(text).unwrap_err();
            assert!(err.is_malformed_selector(), "{:?} should be malformed", text);
        }
    }

    #[test]
    fn test_tag_is_lowercased() {
        let selector = parse_selector("DIV.Foo").unwrap();
        assert_eq!(selector.subject().tag.as_deref(), Some("div"));
        // class names stay case-sensitive
        assert_eq!(selector.subject().classes[0], "Foo");
    }

    #[test]
    fn test_order_of_runs_is_irrelevant() {
        let a = parse_selector("div#x.a.b").unwrap();
        let b = parse_selector("div.b#x.a").unwrap();
        assert_eq!(a.subject().id, b.subject().id);
        let mut ca = a.subject().classes.to_vec();
        let mut cb = b.subject().classes.to_vec();
        ca.sort();
        cb.sort();
        assert_eq!(ca, cb);
    }

    #[test]
    fn test_duplicate_classes_collapse() {
        let selector = parse_selector(".foo.foo.bar").unwrap();
        assert_eq!(selector.subject().classes.len(), 2);
    }

    #[test]
    fn test_combinators() {
        let selector = parse_selector("#is-test > table tr td  textarea").unwrap();
        assert_eq!(selector.parts().len(), 5);
        assert_eq!(part(&selector, 0).combinator, None);
        assert_eq!(part(&selector, 1).combinator, Some(Combinator::Child));
        assert_eq!(part(&selector, 2).combinator, Some(Combinator::Descendant));
        assert_eq!(part(&selector, 4).combinator, Some(Combinator::Descendant));
        assert_eq!(part(&selector, 0).id.as_deref(), Some("is-test"));
        assert_eq!(part(&selector, 0).tag, None);
    }

    #[test]
    fn test_glued_child_combinator() {
        let glued = parse_selector("div>a").unwrap();
        let spaced = parse_selector("div > a").unwrap();
        assert_eq!(glued.parts(), spaced.parts());
    }

    #[test]
    fn test_dangling_child_combinator() {
        assert!(parse_selector("> a").is_err());
        assert!(parse_selector("a >").is_err());
        assert!(parse_selector("a > > b").is_err());
        assert!(parse_selector("a >> b").is_err());
    }

    #[test]
    fn test_unsupported_syntax() {
        for text in ["input[name=x]", "a:hover", "a + b", "a ~ b", "a, b", "#", "div.", "*div"] {
            assert!(
                parse_selector(text).is_err(),
                "{:?} should be rejected",
                text
            );
        }
    }

    #[test]
    fn test_conflicting_ids() {
        assert!(parse_selector("#a#b").is_err());
        assert!(parse_selector("#a#a").is_ok());
    }

    #[test]
    fn test_universal() {
        let selector = parse_selector("* > .x").unwrap();
        assert!(part(&selector, 0).is_universal());
        assert!(!part(&selector, 1).is_universal());
    }

    #[test]
    fn test_escaped_characters() {
        let selector = parse_selector(r".a\:b #x\ y").unwrap();
        assert_eq!(part(&selector, 0).classes[0], "a:b");
        assert_eq!(part(&selector, 1).id.as_deref(), Some("x y"));
        assert!(parse_selector("a\\").is_err());
    }

    #[test]
    fn test_display_is_canonical() {
        let selector: Selector = "  DIV.b#x   >  SPAN   *  ".parse().unwrap();
        assert_eq!(selector.to_string(), "div#x.b > span *");
        assert_eq!(selector.source(), "DIV.b#x   >  SPAN   *");
    }

    #[test]
    fn test_error_message_names_selector() {
        let err = parse_selector("a:hover").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("a:hover"), "{}", message);
        assert!(message.contains("unsupported"), "{}", message);
    }
}
