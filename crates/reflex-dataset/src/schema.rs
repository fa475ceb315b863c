//! Extraction schema
//!
//! Names the two configuration attributes read from the root node and
//! the singular-fill policy of the array pass. Passed explicitly into
//! every extraction; there is no global schema.

use serde::{Deserialize, Serialize};

pub const DEFAULT_DATASET_ATTRIBUTE: &str = "data-reflex-dataset";
pub const DEFAULT_DATASET_ARRAY_ATTRIBUTE: &str = "data-reflex-dataset-array";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Attribute holding the base pass tokens
    #[serde(default = "default_dataset_attribute")]
    pub dataset_attribute: Option<String>,

    /// Attribute holding the array pass tokens
    #[serde(default = "default_dataset_array_attribute")]
    pub dataset_array_attribute: Option<String>,

    /// Let the array pass supply singular keys the base pass left unresolved.
    /// Off by default: singular keys come from the base pass alone.
    #[serde(default)]
    pub fill_singulars: bool,
}

fn default_dataset_attribute() -> Option<String> {
    Some(DEFAULT_DATASET_ATTRIBUTE.to_string())
}

fn default_dataset_array_attribute() -> Option<String> {
    Some(DEFAULT_DATASET_ARRAY_ATTRIBUTE.to_string())
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            dataset_attribute: default_dataset_attribute(),
            dataset_array_attribute: default_dataset_array_attribute(),
            fill_singulars: false,
        }
    }
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dataset_attribute(mut self, name: Option<&str>) -> Self {
        self.dataset_attribute = name.map(str::to_string);
        self
    }

    pub fn with_dataset_array_attribute(mut self, name: Option<&str>) -> Self {
        self.dataset_array_attribute = name.map(str::to_string);
        self
    }

    pub fn with_fill_singulars(mut self, fill: bool) -> Self {
        self.fill_singulars = fill;
        self
    }

    /// Base pass attribute name; `None` when unset or blank
    pub fn dataset_attribute(&self) -> Option<&str> {
        non_blank(self.dataset_attribute.as_deref())
    }

    /// Array pass attribute name; `None` when unset or blank
    pub fn dataset_array_attribute(&self) -> Option<&str> {
        non_blank(self.dataset_array_attribute.as_deref())
    }
}

fn non_blank(name: Option<&str>) -> Option<&str> {
    name.filter(|n| !n.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let schema = Schema::default();
        assert_eq!(schema.dataset_attribute(), Some("data-reflex-dataset"));
        assert_eq!(schema.dataset_array_attribute(), Some("data-reflex-dataset-array"));
        assert!(!schema.fill_singulars);
    }

    #[test]
    fn test_blank_names_are_absent() {
        let schema = Schema::new()
            .with_dataset_attribute(Some(""))
            .with_dataset_array_attribute(None);
        assert_eq!(schema.dataset_attribute(), None);
        assert_eq!(schema.dataset_array_attribute(), None);

        let schema = Schema::new().with_dataset_attribute(Some("   "));
        assert_eq!(schema.dataset_attribute(), None);
    }

    #[test]
    fn test_deserialize_partial() {
        let schema: Schema = serde_json::from_str(r#"{"dataset_attribute":"data-ctx"}"#).unwrap();
        assert_eq!(schema.dataset_attribute(), Some("data-ctx"));
        assert_eq!(schema.dataset_array_attribute(), Some("data-reflex-dataset-array"));
        assert!(!schema.fill_singulars);

        let schema: Schema =
            serde_json::from_str(r#"{"dataset_array_attribute":null,"fill_singulars":true}"#)
                .unwrap();
        assert_eq!(schema.dataset_array_attribute(), None);
        assert!(schema.fill_singulars);
    }
}
