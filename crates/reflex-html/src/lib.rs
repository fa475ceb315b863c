//! Reflex HTML Parser
//!
//! HTML5 parser built on html5ever, producing a `reflex_dom::Document`.

mod parser;

pub use parser::HtmlParser;
pub use reflex_dom::{Document, NodeId};

/// Parse an HTML string into a document
pub fn parse(html: &str) -> Result<Document, ParseError> {
    HtmlParser::new().parse(html)
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to read HTML input: {0}")]
    Io(#[from] std::io::Error),
}
