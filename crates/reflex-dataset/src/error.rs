//! Error types
//!
//! None of these escape `extract_context`: per-token and per-node
//! failures are folded into empty contributions by the engine.

/// Failure reported by the host document
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("node {0} does not exist in this document")]
    UnknownNode(String),

    #[error("node {0} is not an element")]
    NotAnElement(String),
}

/// A token could not be resolved to nodes
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    #[error("no form encloses node {0}")]
    NoEnclosingForm(String),

    #[error(transparent)]
    Host(#[from] HostError),
}

/// A node's attributes could not be extracted
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionError {
    #[error(transparent)]
    Host(#[from] HostError),
}
