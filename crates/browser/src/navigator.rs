//! Host-supplied navigator fields
//!
//! Detection never reads global state; the host fills this in once and
//! passes it explicitly.

use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Navigator {
    pub user_agent: String,
    pub app_version: String,
    pub vendor: String,
    pub platform: String,
    /// Set when the legacy `window.opera` object exists
    pub opera: bool,
}

impl Navigator {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            ..Default::default()
        }
    }

    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = vendor.into();
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    pub fn with_app_version(mut self, app_version: impl Into<String>) -> Self {
        self.app_version = app_version.into();
        self
    }

    pub fn with_opera(mut self, opera: bool) -> Self {
        self.opera = opera;
        self
    }

    /// Parse from JSON such as `{"userAgent": "...", "platform": "Win32"}`.
    /// Missing fields default to empty.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
