//! Load a small document and run a few selectors against it

use dom::{DomService, HtmlSerializer};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let document = serde_json::json!({
        "root": {
            "nodeType": 9,
            "nodeName": "#document",
            "children": [{
                "nodeType": 1,
                "nodeName": "UL",
                "attributes": ["id", "menu", "class", "nav"],
                "children": [
                    { "nodeType": 1, "nodeName": "LI", "attributes": ["class", "item active"],
                      "children": [{ "nodeType": 1, "nodeName": "A", "attributes": ["href", "/"] }] },
                    { "nodeType": 1, "nodeName": "LI", "attributes": ["class", "item"] }
                ]
            }]
        }
    });

    let mut service = DomService::new();
    service.load_tree(&document)?;

    let links = service.query("ul.nav > li.active a")?;
    println!("Active links: {:?}", links);

    for &link in &links {
        let menu = service.query_up(link, "#menu")?;
        println!("Link {} belongs to menu node {:?}", link, menu);
        println!("Matches 'li a': {}", service.element_matches(link, "li a")?);
    }

    match service.query("li:first-child") {
        Ok(_) => println!("Unexpectedly parsed a pseudo-class"),
        Err(e) => println!("Rejected: {}", e),
    }

    println!("{}", HtmlSerializer::new().serialize(service.arena())?);
    println!("Selector cache: {:?}", service.cache_stats());

    Ok(())
}
