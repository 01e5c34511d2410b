//! Detection against real-world navigator values

use browser::{BrowserInfo, Navigator};

fn detect(user_agent: &str, vendor: &str, platform: &str) -> BrowserInfo {
    BrowserInfo::detect(
        &Navigator::new(user_agent)
            .with_vendor(vendor)
            .with_platform(platform),
    )
}

#[test]
fn test_chrome_on_windows() {
    let info = detect(
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.6099.71 Safari/537.36",
        "Google Inc.",
        "Win32",
    );
    assert_eq!(info.name, Some("Chrome"));
    assert_eq!(info.version, Some(120.0));
    assert_eq!(info.os, Some("Windows"));
}

#[test]
fn test_safari_on_mac() {
    let info = detect(
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15",
        "Apple Computer, Inc.",
        "MacIntel",
    );
    assert_eq!(info.name, Some("Safari"));
    assert_eq!(info.version, Some(17.1));
    assert_eq!(info.os, Some("Mac"));
}

#[test]
fn test_firefox_on_linux() {
    let info = detect(
        "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0",
        "",
        "Linux x86_64",
    );
    assert_eq!(info.name, Some("Firefox"));
    assert_eq!(info.version, Some(121.0));
    assert_eq!(info.os, Some("Linux"));
    assert_eq!(info.to_string(), "Firefox 121 on Linux");
}

#[test]
fn test_internet_explorer() {
    let info = detect(
        "Mozilla/4.0 (compatible; MSIE 8.0; Windows NT 6.1; Trident/4.0)",
        "",
        "Win32",
    );
    assert_eq!(info.name, Some("Explorer"));
    assert_eq!(info.version, Some(8.0));
    assert_eq!(info.os, Some("Windows"));
}

#[test]
fn test_iphone() {
    let info = detect(
        "Mozilla/5.0 (iPhone; CPU iPhone OS 17_1 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Mobile/15E148 Safari/604.1",
        "Apple Computer, Inc.",
        "iPhone",
    );
    assert_eq!(info.name, Some("Safari"));
    assert_eq!(info.version, Some(17.1));
    assert_eq!(info.os, Some("iPhone/iPod"));
}

#[test]
fn test_old_gecko() {
    let info = detect("Mozilla/5.0 (X11; U; rv:1.9.2) Gecko/20100101", "", "Linux i686");
    assert_eq!(info.name, Some("Mozilla"));
    assert_eq!(info.version, Some(1.9));
}

#[test]
fn test_detection_is_repeatable() {
    let navigator = Navigator::from_json(
        r#"{"userAgent": "Mozilla/5.0 Firefox/115.0", "platform": "Win32"}"#,
    )
    .unwrap();

    let first = BrowserInfo::detect(&navigator);
    let second = BrowserInfo::detect(&navigator);
    assert_eq!(first, second);
    assert!(first.is("Firefox"));
}
