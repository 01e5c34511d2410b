//! End-to-end `is` / `query_up` behaviour over a tree loaded from JSON

use dom::{DomService, Element, NodeView};
use serde_json::{json, Value};

fn element(name: &str, attributes: &[&str], children: Vec<Value>) -> Value {
    json!({
        "nodeType": 1,
        "nodeName": name,
        "attributes": attributes,
        "children": children,
    })
}

fn text(value: &str) -> Value {
    json!({ "nodeType": 3, "nodeName": "#text", "nodeValue": value })
}

/// ```text
/// html > body
///   div#is-test
///     table > tbody > tr > td > textarea
///     input[name=is-test]
///     div.foo
///     div.foo.bar
///     div.display-none
///     a.foo.bar
///   div.ancestor > div#parent > span#child
/// ```
fn load() -> DomService {
    let is_test = element(
        "DIV",
        &["id", "is-test"],
        vec![
            text("\n  "),
            element(
                "TABLE",
                &[],
                vec![element(
                    "TBODY",
                    &[],
                    vec![element(
                        "TR",
                        &[],
                        vec![element("TD", &[], vec![element("TEXTAREA", &[], vec![])])],
                    )],
                )],
            ),
            element("INPUT", &["name", "is-test", "type", "text"], vec![]),
            element("DIV", &["class", "foo"], vec![]),
            element("DIV", &["class", "foo bar"], vec![]),
            element("DIV", &["class", "display-none"], vec![]),
            element("A", &["class", "foo bar", "href", "#"], vec![text("link")]),
        ],
    );
    let ancestor = element(
        "DIV",
        &["class", "ancestor"],
        vec![element(
            "DIV",
            &["id", "parent"],
            vec![element("SPAN", &["id", "child"], vec![])],
        )],
    );

    let document = json!({
        "root": {
            "nodeType": 9,
            "nodeName": "#document",
            "children": [element("HTML", &[], vec![element("BODY", &[], vec![is_test, ancestor])])]
        }
    });

    let mut service = DomService::new();
    service.load_tree(&document).unwrap();
    service
}

fn first<'a>(service: &'a DomService, selector: &str) -> Element<'a> {
    service
        .arena()
        .query_first(selector)
        .unwrap()
        .unwrap_or_else(|| panic!("nothing matches {:?}", selector))
}

#[test]
fn test_is_with_tag_names() {
    let service = load();

    assert!(first(&service, "#is-test td").is("td").unwrap());
    assert!(first(&service, "#is-test tr").is("tr").unwrap());
    assert!(first(&service, "#is-test textarea").is("textarea").unwrap());
    assert!(first(&service, "#is-test input").is("input").unwrap());
    assert!(!first(&service, "#is-test tr").is("td").unwrap());
}

#[test]
fn test_is_with_classes() {
    let service = load();

    let foo = first(&service, "#is-test div.foo");
    assert!(foo.is("div").unwrap());
    assert!(!foo.is("div.bar").unwrap());

    let foo_bar = first(&service, "#is-test div.foo.bar");
    assert!(foo_bar.is("div").unwrap());
    assert!(foo_bar.is("div.foo").unwrap());
    assert!(foo_bar.is("div.foo.bar").unwrap());

    let hidden = first(&service, "#is-test div.display-none");
    assert!(hidden.is("div.display-none").unwrap());
    assert!(hidden.is("div").unwrap());
    assert!(!hidden.is("div.bar").unwrap());
    assert!(!hidden.is("td").unwrap());

    let link = first(&service, "#is-test a");
    assert!(link.is("a").unwrap());
    assert!(link.is(".foo").unwrap());
    assert!(link.is(".bar").unwrap());
    assert!(link.is(".foo.bar").unwrap());
    assert!(link.is(".bar.foo").unwrap());
    assert!(!link.is(".div").unwrap());
    assert!(!link.is(".baz").unwrap());
    assert!(!link.is("span").unwrap());
}

#[test]
fn test_is_with_ancestor_paths() {
    let service = load();
    let textarea = first(&service, "#is-test textarea");

    assert!(textarea.is("textarea").unwrap());
    assert!(textarea.is("td textarea").unwrap());
    assert!(textarea.is("tr td textarea").unwrap());
    assert!(textarea.is("table tr td textarea").unwrap());
    assert!(textarea.is("#is-test table tr td textarea").unwrap());
    assert!(textarea.is("#is-test > table tr td textarea").unwrap());
    assert!(!textarea.is("div > textarea").unwrap());
    assert!(!textarea.is("a > textarea").unwrap());
    assert!(!textarea.is("body > textarea").unwrap());
    assert!(!textarea.is("input").unwrap());
    assert!(!textarea.is("a").unwrap());
}

#[test]
fn test_query_up() {
    let service = load();
    let arena = service.arena();
    let child = arena.query_by_id("child").unwrap();
    let parent = arena.query_by_id("parent").unwrap();
    let ancestor = first(&service, "div.ancestor");

    assert_eq!(child.query_up("#parent").unwrap(), Some(parent));
    assert_eq!(child.query_up("div#parent").unwrap(), Some(parent));
    assert_eq!(child.query_up("div").unwrap(), Some(parent));
    assert_eq!(child.query_up(".ancestor").unwrap(), Some(ancestor));
    assert_eq!(child.query_up("div #parent").unwrap(), Some(parent));
    assert_eq!(child.query_up("body .ancestor").unwrap(), Some(ancestor));
}

#[test]
fn test_exactly_one_node_has_an_id() {
    let service = load();
    let matching: Vec<_> = service
        .arena()
        .query("*")
        .unwrap()
        .into_iter()
        .filter(|e| e.is("#parent").unwrap())
        .collect();

    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].id(), Some("parent"));
}

#[test]
fn test_service_entry_points_agree_with_element() {
    let mut service = load();
    let textarea = first(&service, "textarea").node_id();

    for selector in ["td textarea", "div > textarea", "#is-test > table textarea"] {
        let via_element = service.arena().element(textarea).unwrap().is(selector).unwrap();
        let via_service = service.element_matches(textarea, selector).unwrap();
        assert_eq!(via_element, via_service, "{}", selector);
    }
}

#[test]
fn test_query_last() {
    let service = load();
    let is_test = service.arena().query_by_id("is-test").unwrap();

    let last_foo = is_test.query_last(".foo").unwrap().unwrap();
    assert!(last_foo.is("a").unwrap());
    assert_eq!(is_test.query(".foo").unwrap().len(), 3);
    assert_eq!(last_foo.text_content().unwrap(), "link");
}
