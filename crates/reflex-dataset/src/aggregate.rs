//! Aggregation engine
//!
//! Runs the base merge pass and the array augmentation pass over the
//! contexts named by the root's configuration attributes and combines
//! the two into one map.

use crate::extractor::{extract_attributes, extract_data_attributes, node_contribution};
use crate::{
    build_context, AttributeMap, Context, DocumentTree, ExtractionError, Pluralizer, Schema,
    TokenList,
};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

/// Context extraction with a fixed schema
#[derive(Debug, Clone, Default)]
pub struct ContextExtractor {
    schema: Schema,
}

impl ContextExtractor {
    pub fn new(schema: Schema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Extract the merged context map of `root`. Never fails; tokens and
    /// nodes that cannot be processed contribute nothing.
    pub fn extract<H>(&self, host: &H, root: H::Node) -> AttributeMap
    where
        H: DocumentTree + ?Sized,
    {
        let base_tokens = root_tokens(host, root, self.schema.dataset_attribute());
        let base_context = build_context(host, root, &base_tokens);
        let mut merged = base_pass(host, &base_context);
        tracing::debug!(
            "Base pass `{}` merged {} keys from {} nodes",
            base_tokens,
            merged.len(),
            base_context.len()
        );

        let array_tokens = root_tokens(host, root, self.schema.dataset_array_attribute());
        if array_tokens.is_empty() {
            return merged;
        }

        let array_context = build_context(host, root, &array_tokens);
        let summary = ArraySummary::collect(host, &array_context);
        tracing::debug!(
            "Array pass `{}` found {} logical attributes across {} nodes",
            array_tokens,
            summary.plurals.len(),
            array_context.len()
        );
        summary.merge_into(&mut merged, self.schema.fill_singulars);
        merged
    }
}

/// Extract the merged context map of `root` under `schema`
pub fn extract_context<H>(host: &H, root: H::Node, schema: &Schema) -> AttributeMap
where
    H: DocumentTree + ?Sized,
{
    ContextExtractor::new(schema.clone()).extract(host, root)
}

/// First value per key wins, so the root always beats the nodes after it
pub fn base_pass<H>(host: &H, context: &Context<H::Node>) -> AttributeMap
where
    H: DocumentTree + ?Sized,
{
    let mut merged = AttributeMap::new();
    for node in context.iter() {
        let contribution = node_contribution(host, node);
        tracing::trace!("{:?} contributes {} keys", node, contribution.len());
        for (key, value) in contribution {
            merged.insert_if_absent(key, value);
        }
    }
    merged
}

/// Result of the array augmentation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArraySummary {
    /// Plural key to one value per contributing node, in context order
    pub plurals: IndexMap<String, Vec<String>>,
    /// Singular key to the value of the first node carrying that spelling
    pub singulars: IndexMap<String, String>,
}

impl ArraySummary {
    /// Summarize the data attributes of every node in `context`
    pub fn collect<H>(host: &H, context: &Context<H::Node>) -> Self
    where
        H: DocumentTree + ?Sized,
    {
        let contributions: Vec<AttributeMap> = context
            .iter()
            .map(|node| extract_data_attributes(host, node))
            .collect();

        let observed: IndexSet<&str> = contributions.iter().flat_map(|attrs| attrs.keys()).collect();
        let logical = logical_names(&observed);

        let mut summary = Self::default();
        for attrs in &contributions {
            for (singular, plural) in &logical {
                let singular_value = attrs.get_text(singular);
                if let Some(value) = singular_value {
                    if !summary.singulars.contains_key(*singular) {
                        summary.singulars.insert(singular.to_string(), value.to_string());
                    }
                }
                if let Some(value) = singular_value.or_else(|| attrs.get_text(plural)) {
                    summary
                        .plurals
                        .entry(plural.clone())
                        .or_default()
                        .push(value.to_string());
                }
            }
        }
        summary
    }

    /// Overlay onto the base pass result.
    ///
    /// Plural keys always overwrite. With `fill_singulars`, a sticky singular
    /// is added only when the key is still unresolved. Uncountable names
    /// share one key with their array, which the array keeps.
    pub fn merge_into(self, merged: &mut AttributeMap, fill_singulars: bool) {
        for (plural, values) in self.plurals {
            merged.insert(plural, values);
        }
        if !fill_singulars {
            return;
        }
        for (singular, value) in self.singulars {
            if Pluralizer::is_uncountable(&singular) {
                continue;
            }
            merged.insert_if_absent(singular, value);
        }
    }
}

/// Group observed names into `(singular, plural)` pairs, in first-seen order.
///
/// A name is a plural spelling when another observed name pluralizes to it.
fn logical_names<'a>(observed: &IndexSet<&'a str>) -> IndexMap<&'a str, String> {
    let mut logical = IndexMap::new();
    for &name in observed {
        let singular = observed
            .iter()
            .copied()
            .find(|&other| other != name && Pluralizer::is_plural_of(other, name));
        match singular {
            Some(singular) => {
                logical.entry(singular).or_insert_with(|| name.to_string());
            }
            None => {
                logical
                    .entry(name)
                    .or_insert_with(|| Pluralizer::pluralize(name));
            }
        }
    }
    logical
}

/// Full attributes and merged context of one element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementSnapshot {
    pub attributes: AttributeMap,
    pub dataset: AttributeMap,
}

/// Bundle [`extract_attributes`] and [`extract_context`] for `node`
pub fn extract_element<H>(
    host: &H,
    node: H::Node,
    schema: &Schema,
) -> Result<ElementSnapshot, ExtractionError>
where
    H: DocumentTree + ?Sized,
{
    Ok(ElementSnapshot {
        attributes: extract_attributes(host, node)?,
        dataset: extract_context(host, node, schema),
    })
}

fn root_tokens<H>(host: &H, root: H::Node, attribute: Option<&str>) -> TokenList
where
    H: DocumentTree + ?Sized,
{
    TokenList::parse(attribute.and_then(|name| host.attribute(root, name)))
}
