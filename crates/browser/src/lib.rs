//! User-agent based browser detection
//!
//! Detection is a pure function of a [`Navigator`] value: call
//! [`BrowserInfo::detect`] once at startup and pass the result to whatever
//! needs it. Nothing is cached in globals.
//!
//! ```
//! use browser::{BrowserInfo, Navigator};
//!
//! let navigator = Navigator::new("Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0")
//!     .with_platform("Linux x86_64");
//! let info = BrowserInfo::detect(&navigator);
//! assert_eq!(info.name, Some("Firefox"));
//! assert_eq!(info.version, Some(121.0));
//! assert_eq!(info.os, Some("Linux"));
//! ```

pub mod detect;
pub mod error;
pub mod navigator;

pub use detect::{BrowserInfo, DetectRule, Source, BROWSER_RULES, OS_RULES};
pub use error::{BrowserError, Result};
pub use navigator::Navigator;
