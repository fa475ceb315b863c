//! Form Data
//!
//! Builds the entry list a form would submit: one `(name, value)` pair
//! per successful control, in document order.

use crate::{Document, NodeId};

/// Input types that never contribute to a form's data set
const NON_SUBMITTABLE_INPUTS: &[&str] = &["submit", "reset", "button", "image", "file"];

/// Form data entry list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, String)>,
}

impl FormData {
    /// Create empty form data
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// First value for a name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// All values for a name
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Check if a name has any entry
    pub fn has(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Iterate over entries in document order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Document {
    /// Form that owns a control: the `form` attribute's target, else the nearest form ancestor
    pub fn form_owner(&self, node: NodeId) -> Option<NodeId> {
        let tree = self.tree();
        if let Some(form_id) = tree.attr(node, "form") {
            return self
                .get_element_by_id(form_id)
                .filter(|&form| tree.is_tag(form, "form"));
        }
        tree.ancestors(node)
            .into_iter()
            .find(|&ancestor| tree.is_tag(ancestor, "form"))
    }

    /// Collect the data set of a form. Non-form nodes yield empty data.
    pub fn form_data(&self, form: NodeId) -> FormData {
        let mut data = FormData::new();
        let tree = self.tree();
        if !tree.is_tag(form, "form") {
            return data;
        }

        for node in tree.descendants(tree.root()) {
            let Some(tag) = tree.tag_name(node) else { continue };
            if !matches!(tag, "input" | "select" | "textarea") {
                continue;
            }
            let Some(name) = tree.attr(node, "name").filter(|n| !n.is_empty()) else {
                continue;
            };
            if self.is_disabled(node) || self.form_owner(node) != Some(form) {
                continue;
            }

            match tag {
                "input" => {
                    let kind = self.input_type(node).unwrap_or_default();
                    if NON_SUBMITTABLE_INPUTS.contains(&kind.as_str()) {
                        continue;
                    }
                    if self.is_checkable(node) && !self.is_checked(node) {
                        continue;
                    }
                    data.append(name, self.value(node).unwrap_or_default());
                }
                "select" => {
                    for option in self.selected_options(node) {
                        if self.is_disabled(option) {
                            continue;
                        }
                        data.append(name, self.value(option).unwrap_or_default());
                    }
                }
                _ => data.append(name, self.value(node).unwrap_or_default()),
            }
        }

        tracing::trace!("Form {:?} produced {} entries", form, data.len());
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_data_accessors() {
        let mut data = FormData::new();
        data.append("tag", "a");
        data.append("tag", "b");
        data.append("title", "Hello");

        assert_eq!(data.get("tag"), Some("a"));
        assert_eq!(data.get_all("tag"), vec!["a", "b"]);
        assert!(data.has("title"));
        assert!(!data.has("missing"));
        assert_eq!(data.len(), 3);
    }

    #[test]
    fn test_form_data_of_non_form_is_empty() {
        let doc = Document::default();
        assert!(doc.form_data(doc.body()).is_empty());
    }
}
