//! Error types for DOM operations
//!
//! Simple, flat error hierarchy. Matching never fails; only parsing a
//! selector or building a tree can.

use crate::types::NodeId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DomError>;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("Malformed selector {selector:?}: {reason}")]
    MalformedSelector { selector: String, reason: String },

    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Invalid node type: expected {expected}, got {actual}")]
    InvalidNodeType { expected: String, actual: String },

    #[error("Tree error: {0}")]
    TreeError(String),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl DomError {
    pub(crate) fn malformed(selector: &str, reason: impl Into<String>) -> Self {
        DomError::MalformedSelector {
            selector: selector.to_string(),
            reason: reason.into(),
        }
    }

    /// True if this error came from the selector parser
    pub fn is_malformed_selector(&self) -> bool {
        matches!(self, DomError::MalformedSelector { .. })
    }
}
