//! Browser, version and OS detection
//!
//! Rules are tried in order and the first hit wins, so more specific
//! identities (Chrome, which also says "Safari" and "Gecko") come before
//! the generic ones.

use crate::navigator::Navigator;
use serde::Serialize;
use std::fmt;

/// Navigator field a rule inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    UserAgent,
    Vendor,
    Platform,
    /// Matches on the `opera` flag rather than a substring
    OperaFlag,
}

#[derive(Debug, Clone, Copy)]
pub struct DetectRule {
    pub source: Source,
    pub needle: &'static str,
    pub identity: &'static str,
    /// Token preceding the version number; defaults to `identity`
    pub version_key: Option<&'static str>,
}

impl DetectRule {
    const fn new(source: Source, needle: &'static str, identity: &'static str) -> Self {
        Self {
            source,
            needle,
            identity,
            version_key: None,
        }
    }

    const fn versioned(self, key: &'static str) -> Self {
        Self {
            version_key: Some(key),
            ..self
        }
    }

    fn applies(&self, navigator: &Navigator) -> bool {
        let haystack = match self.source {
            Source::UserAgent => &navigator.user_agent,
            Source::Vendor => &navigator.vendor,
            Source::Platform => &navigator.platform,
            Source::OperaFlag => return navigator.opera,
        };
        !haystack.is_empty() && haystack.contains(self.needle)
    }

    pub fn version_key(&self) -> &'static str {
        self.version_key.unwrap_or(self.identity)
    }
}

pub const BROWSER_RULES: &[DetectRule] = &[
    DetectRule::new(Source::UserAgent, "Chrome", "Chrome"),
    DetectRule::new(Source::UserAgent, "OmniWeb", "OmniWeb").versioned("OmniWeb/"),
    DetectRule::new(Source::Vendor, "Apple", "Safari").versioned("Version"),
    DetectRule::new(Source::OperaFlag, "", "Opera").versioned("Version"),
    DetectRule::new(Source::Vendor, "iCab", "iCab"),
    DetectRule::new(Source::Vendor, "KDE", "Konqueror"),
    DetectRule::new(Source::UserAgent, "Firefox", "Firefox"),
    DetectRule::new(Source::Vendor, "Camino", "Camino"),
    // Netscape 6+
    DetectRule::new(Source::UserAgent, "Netscape", "Netscape"),
    DetectRule::new(Source::UserAgent, "MSIE", "Explorer").versioned("MSIE"),
    DetectRule::new(Source::UserAgent, "Gecko", "Mozilla").versioned("rv"),
    // Netscape 4 and older
    DetectRule::new(Source::UserAgent, "Mozilla", "Netscape").versioned("Mozilla"),
];

pub const OS_RULES: &[DetectRule] = &[
    DetectRule::new(Source::Platform, "Win", "Windows"),
    DetectRule::new(Source::Platform, "Mac", "Mac"),
    DetectRule::new(Source::UserAgent, "iPhone", "iPhone/iPod"),
    DetectRule::new(Source::Platform, "Linux", "Linux"),
];

/// First rule that applies
pub fn find_rule<'r>(rules: &'r [DetectRule], navigator: &Navigator) -> Option<&'r DetectRule> {
    rules.iter().find(|rule| rule.applies(navigator))
}

/// Result of detection. Computed once, then passed around by value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BrowserInfo {
    pub name: Option<&'static str>,
    pub version: Option<f64>,
    pub os: Option<&'static str>,
}

impl BrowserInfo {
    pub fn detect(navigator: &Navigator) -> Self {
        let browser = find_rule(BROWSER_RULES, navigator);

        // Without a match the last rule's key is still tried
        let version_key = browser
            .or_else(|| BROWSER_RULES.last())
            .map(DetectRule::version_key)
            .unwrap_or_default();

        let version = search_version(&navigator.user_agent, version_key)
            .or_else(|| search_version(&navigator.app_version, version_key));

        let info = Self {
            name: browser.map(|rule| rule.identity),
            version,
            os: find_rule(OS_RULES, navigator).map(|rule| rule.identity),
        };

        tracing::debug!(
            browser = info.name_or_unknown(),
            version = ?info.version,
            os = info.os_or_unknown(),
            "Detected browser"
        );
        info
    }

    pub fn name_or_unknown(&self) -> &'static str {
        self.name.unwrap_or("An unknown browser")
    }

    pub fn os_or_unknown(&self) -> &'static str {
        self.os.unwrap_or("an unknown OS")
    }

    pub fn version_or_unknown(&self) -> String {
        match self.version {
            Some(version) => version.to_string(),
            None => "an unknown version".to_string(),
        }
    }

    pub fn is(&self, identity: &str) -> bool {
        self.name == Some(identity)
    }
}

impl fmt::Display for BrowserInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} on {}",
            self.name_or_unknown(),
            self.version_or_unknown(),
            self.os_or_unknown()
        )
    }
}

/// Version number following `key` and one separator character.
/// Zero counts as unknown.
pub fn search_version(haystack: &str, key: &str) -> Option<f64> {
    if key.is_empty() {
        return None;
    }
    let index = haystack.find(key)?;
    let after_key = &haystack[index + key.len()..];
    let mut rest = after_key.chars();
    rest.next()?;
    leading_float(rest.as_str()).filter(|version| *version != 0.0)
}

/// Longest numeric prefix (`[+-]?digits[.digits]`) after leading
/// whitespace
pub fn leading_float(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start || digits > 0 {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }
    text[..end].trim_end_matches('.').parse().ok()
}
