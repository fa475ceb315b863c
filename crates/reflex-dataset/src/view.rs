//! Read-only accessor over an extracted context map
//!
//! Lookups are indifferent to spelling: `post_id`, `postId`, `post-id`
//! and `data-post-id` all address the `data-post-id` entry.

use crate::extractor::DATA_PREFIX;
use crate::{AttributeMap, AttributeValue};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetView {
    map: AttributeMap,
}

impl DatasetView {
    pub fn new(map: AttributeMap) -> Self {
        Self { map }
    }

    /// Entry for `key` in any spelling; falls back to the literal key for
    /// names without the data prefix, such as serialized form fields
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.map
            .get(&attribute_name(key))
            .or_else(|| self.map.get(key))
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(AttributeValue::as_text)
    }

    pub fn list(&self, key: &str) -> Option<&[String]> {
        self.get(key).and_then(AttributeValue::as_list)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Keys with the data prefix removed
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.map
            .keys()
            .map(|key| key.strip_prefix(DATA_PREFIX).unwrap_or(key))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn as_map(&self) -> &AttributeMap {
        &self.map
    }

    pub fn into_inner(self) -> AttributeMap {
        self.map
    }
}

impl From<AttributeMap> for DatasetView {
    fn from(map: AttributeMap) -> Self {
        Self::new(map)
    }
}

/// Canonical `data-kebab-case` attribute name for any accepted spelling
pub fn attribute_name(key: &str) -> String {
    let mut kebab = String::with_capacity(key.len() + DATA_PREFIX.len());
    for (i, c) in key.chars().enumerate() {
        match c {
            '_' => kebab.push('-'),
            c if c.is_uppercase() => {
                if i > 0 && !kebab.ends_with('-') {
                    kebab.push('-');
                }
                kebab.extend(c.to_lowercase());
            }
            c => kebab.push(c),
        }
    }
    if kebab.starts_with(DATA_PREFIX) {
        kebab
    } else {
        format!("{DATA_PREFIX}{kebab}")
    }
}
