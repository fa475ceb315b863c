//! Reflex Dataset - context extraction engine
//!
//! Builds a flat `data-*` map describing the context around a root node.
//! The root's configuration attributes name related nodes (ancestors,
//! siblings, a form, selector matches, ...); their data attributes are
//! merged with root priority, and an optional second pass adds pluralized
//! array summaries.
//!
//! The engine reads the document only through [`DocumentTree`]. With the
//! default `dom` feature it is implemented for `reflex_dom::Document`.

mod aggregate;
mod attribute_map;
#[cfg(feature = "dom")]
mod dom;
mod error;
mod extractor;
mod host;
mod pluralize;
mod resolver;
mod schema;
mod token;
mod view;

pub use aggregate::{
    base_pass, extract_context, extract_element, ArraySummary, ContextExtractor, ElementSnapshot,
};
pub use attribute_map::{AttributeMap, AttributeValue};
pub use error::{ExtractionError, HostError, ResolutionError};
pub use extractor::{
    extract_attributes, extract_data_attributes, node_contribution, serialize_form, DATA_PREFIX,
};
pub use host::DocumentTree;
pub use pluralize::{pluralize, Pluralizer};
pub use resolver::{build_context, resolve, Context};
pub use schema::{Schema, DEFAULT_DATASET_ARRAY_ATTRIBUTE, DEFAULT_DATASET_ATTRIBUTE};
pub use token::{attribute_value, attribute_values, Token, TokenList};
pub use view::{attribute_name, DatasetView};
