//! Error types for browser detection

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BrowserError>;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Invalid navigator description: {0}")]
    InvalidNavigator(#[from] serde_json::Error),
}
