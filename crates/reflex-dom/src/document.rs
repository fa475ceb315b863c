//! Document - High-level document API
//!
//! Wraps the arena tree with document-wide lookups, selector queries and
//! the live state of form controls (checkedness, selectedness, values).

use crate::{DomTree, NodeId, SelectorError, SelectorList};

/// Tags that count as form controls for `:enabled` / `:disabled`
const FORM_CONTROL_TAGS: &[&str] = &[
    "button", "input", "select", "textarea", "option", "optgroup", "fieldset",
];

/// Elements whose `value` is simply their `value` content attribute
const VALUE_ATTRIBUTE_TAGS: &[&str] = &[
    "button", "output", "li", "meter", "progress", "param", "data",
];

/// HTML Document
#[derive(Debug, Clone)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a document with an html/head/body skeleton
    pub fn new() -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        tree.append_child(tree.root(), html);
        tree.append_child(html, head);
        tree.append_child(html, body);

        Self {
            tree,
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Create an empty document (no structure)
    pub fn empty() -> Self {
        Self {
            tree: DomTree::new(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Locate html/head/body after the tree has been built
    pub fn finalize(&mut self) {
        let tree = &self.tree;
        self.html_element = tree
            .element_children(tree.root())
            .into_iter()
            .find(|&id| tree.is_tag(id, "html"))
            .unwrap_or(NodeId::NONE);

        let children = if self.html_element.is_valid() {
            tree.element_children(self.html_element)
        } else {
            Vec::new()
        };
        self.head_element = children
            .iter()
            .copied()
            .find(|&id| tree.is_tag(id, "head"))
            .unwrap_or(NodeId::NONE);
        self.body_element = children
            .iter()
            .copied()
            .find(|&id| tree.is_tag(id, "body"))
            .unwrap_or(NodeId::NONE);
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// First element with the given id, in document order
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.descendants(self.tree.root()).into_iter().find(|&node| {
            self.tree
                .get(node)
                .and_then(|n| n.as_element())
                .is_some_and(|e| e.id.as_deref() == Some(id))
        })
    }

    // ------------------------------------------------------------------
    // Selector queries
    // ------------------------------------------------------------------

    /// All elements in the document matching `selector`, in document order
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        self.query_selector_all_in(self.tree.root(), selector)
    }

    /// All descendants of `scope` matching `selector`, in document order.
    ///
    /// Ancestors of `scope` still take part in combinator matching.
    pub fn query_selector_all_in(
        &self,
        scope: NodeId,
        selector: &str,
    ) -> Result<Vec<NodeId>, SelectorError> {
        let list = SelectorList::parse(selector)?;
        Ok(self
            .tree
            .descendants(scope)
            .into_iter()
            .filter(|&node| list.matches(self, node))
            .collect())
    }

    /// First element in the document matching `selector`
    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        let list = SelectorList::parse(selector)?;
        Ok(self
            .tree
            .descendants(self.tree.root())
            .into_iter()
            .find(|&node| list.matches(self, node)))
    }

    /// Check whether an element matches `selector`
    pub fn matches(&self, node: NodeId, selector: &str) -> Result<bool, SelectorError> {
        Ok(SelectorList::parse(selector)?.matches(self, node))
    }

    /// Nearest inclusive ancestor matching `selector`
    pub fn closest(&self, node: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        let list = SelectorList::parse(selector)?;
        if list.matches(self, node) {
            return Ok(Some(node));
        }
        Ok(self
            .tree
            .ancestors(node)
            .into_iter()
            .find(|&ancestor| list.matches(self, ancestor)))
    }

    // ------------------------------------------------------------------
    // Form-control state
    // ------------------------------------------------------------------

    /// Lowercase `type` of an input, defaulting to "text"
    pub fn input_type(&self, node: NodeId) -> Option<String> {
        if !self.tree.is_tag(node, "input") {
            return None;
        }
        Some(
            self.tree
                .attr(node, "type")
                .map(|t| t.trim().to_ascii_lowercase())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "text".to_string()),
        )
    }

    /// Checkbox or radio input
    pub fn is_checkable(&self, node: NodeId) -> bool {
        matches!(self.input_type(node).as_deref(), Some("checkbox" | "radio"))
    }

    /// Checkedness of a checkbox/radio input; false for everything else
    pub fn is_checked(&self, node: NodeId) -> bool {
        if !self.is_checkable(node) {
            return false;
        }
        self.state(node)
            .and_then(|s| s.checked)
            .unwrap_or_else(|| self.tree.has_attr(node, "checked"))
    }

    /// Selectedness of an option; false for everything else
    pub fn is_selected(&self, node: NodeId) -> bool {
        if !self.tree.is_tag(node, "option") {
            return false;
        }
        if let Some(selected) = self.state(node).and_then(|s| s.selected) {
            return selected;
        }
        if self.tree.has_attr(node, "selected") {
            return true;
        }

        // A single-choice select with nothing selected displays its first option
        match self.owning_select(node) {
            Some(select) if !self.tree.has_attr(select, "multiple") => {
                let options = self.options(select);
                options.first() == Some(&node)
                    && !options.iter().any(|&opt| self.explicitly_selected(opt))
            }
            _ => false,
        }
    }

    fn explicitly_selected(&self, option: NodeId) -> bool {
        self.state(option)
            .and_then(|s| s.selected)
            .unwrap_or_else(|| self.tree.has_attr(option, "selected"))
    }

    /// Options of a select, including those inside optgroups
    pub fn options(&self, select: NodeId) -> Vec<NodeId> {
        self.tree
            .descendants(select)
            .into_iter()
            .filter(|&node| self.tree.is_tag(node, "option"))
            .collect()
    }

    /// Currently selected options of a select
    pub fn selected_options(&self, select: NodeId) -> Vec<NodeId> {
        self.options(select)
            .into_iter()
            .filter(|&opt| self.is_selected(opt))
            .collect()
    }

    fn owning_select(&self, option: NodeId) -> Option<NodeId> {
        self.tree
            .ancestors(option)
            .into_iter()
            .take(2)
            .find(|&node| self.tree.is_tag(node, "select"))
    }

    /// Current value of an element, `None` when it has no value concept
    pub fn value(&self, node: NodeId) -> Option<String> {
        let tag = self.tree.tag_name(node)?;
        match tag {
            "input" => Some(
                self.state(node)
                    .and_then(|s| s.value.clone())
                    .or_else(|| self.tree.attr(node, "value").map(str::to_string))
                    .unwrap_or_else(|| {
                        if self.is_checkable(node) {
                            "on".to_string()
                        } else {
                            String::new()
                        }
                    }),
            ),
            "textarea" => Some(
                self.state(node)
                    .and_then(|s| s.value.clone())
                    .unwrap_or_else(|| self.tree.text_content(node)),
            ),
            "option" => Some(
                self.tree
                    .attr(node, "value")
                    .map(str::to_string)
                    .unwrap_or_else(|| collapse_whitespace(&self.tree.text_content(node))),
            ),
            "select" => Some(
                self.selected_options(node)
                    .first()
                    .and_then(|&opt| self.value(opt))
                    .unwrap_or_default(),
            ),
            _ if VALUE_ATTRIBUTE_TAGS.contains(&tag) => Some(
                self.tree.attr(node, "value").unwrap_or_default().to_string(),
            ),
            _ => None,
        }
    }

    /// Element that can be enabled or disabled
    pub fn is_form_control(&self, node: NodeId) -> bool {
        self.tree
            .tag_name(node)
            .is_some_and(|tag| FORM_CONTROL_TAGS.contains(&tag))
    }

    /// Disabled form control (own attribute or a disabled fieldset ancestor)
    pub fn is_disabled(&self, node: NodeId) -> bool {
        if !self.is_form_control(node) {
            return false;
        }
        self.tree.has_attr(node, "disabled")
            || self.tree.ancestors(node).into_iter().any(|ancestor| {
                self.tree.is_tag(ancestor, "fieldset") && self.tree.has_attr(ancestor, "disabled")
            })
    }

    /// Set checkedness. Checking a radio unchecks its same-named group.
    pub fn set_checked(&mut self, node: NodeId, checked: bool) {
        if !self.is_checkable(node) {
            return;
        }

        if checked && self.input_type(node).as_deref() == Some("radio") {
            if let Some(name) = self.tree.attr(node, "name").map(str::to_string) {
                let group: Vec<NodeId> = self
                    .tree
                    .descendants(self.tree.root())
                    .into_iter()
                    .filter(|&other| {
                        other != node
                            && self.input_type(other).as_deref() == Some("radio")
                            && self.tree.attr(other, "name") == Some(name.as_str())
                    })
                    .collect();
                for other in group {
                    self.state_mut(other, |s| s.checked = Some(false));
                }
            }
        }

        self.state_mut(node, |s| s.checked = Some(checked));
    }

    /// Set selectedness of an option. Selecting in a single select deselects the rest.
    pub fn set_selected(&mut self, node: NodeId, selected: bool) {
        if !self.tree.is_tag(node, "option") {
            return;
        }

        if selected {
            if let Some(select) = self.owning_select(node) {
                if !self.tree.has_attr(select, "multiple") {
                    for other in self.options(select) {
                        if other != node {
                            self.state_mut(other, |s| s.selected = Some(false));
                        }
                    }
                }
            }
        }

        self.state_mut(node, |s| s.selected = Some(selected));
    }

    /// Set the current value of an input or textarea
    pub fn set_value(&mut self, node: NodeId, value: &str) {
        if self.tree.is_tag(node, "input") || self.tree.is_tag(node, "textarea") {
            let value = value.to_string();
            self.state_mut(node, |s| s.value = Some(value));
        }
    }

    fn state(&self, node: NodeId) -> Option<&crate::ControlState> {
        self.tree.get(node)?.as_element().map(|e| &e.state)
    }

    fn state_mut(&mut self, node: NodeId, f: impl FnOnce(&mut crate::ControlState)) {
        if let Some(elem) = self.tree.get_mut(node).and_then(|n| n.as_element_mut()) {
            f(&mut elem.state);
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_ascii_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(doc: &mut Document, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let tree = doc.tree_mut();
        let id = tree.create_element(tag);
        for (name, value) in attrs {
            tree.set_attr(id, name, value);
        }
        tree.append_child(parent, id);
        id
    }

    #[test]
    fn test_skeleton() {
        let doc = Document::new();
        assert!(doc.tree().is_tag(doc.document_element(), "html"));
        assert!(doc.tree().is_tag(doc.head(), "head"));
        assert!(doc.tree().is_tag(doc.body(), "body"));
    }

    #[test]
    fn test_checkbox_state() {
        let mut doc = Document::default();
        let body = doc.body();
        let a = element(&mut doc, body, "input", &[("type", "checkbox"), ("checked", "")]);
        let b = element(&mut doc, body, "input", &[("type", "text"), ("checked", "")]);

        assert!(doc.is_checked(a));
        assert!(!doc.is_checked(b), "text inputs are never checked");

        doc.set_checked(a, false);
        assert!(!doc.is_checked(a));
        assert_eq!(doc.value(a).as_deref(), Some("on"));
    }

    #[test]
    fn test_radio_group_exclusive() {
        let mut doc = Document::default();
        let body = doc.body();
        let a = element(&mut doc, body, "input", &[("type", "radio"), ("name", "r"), ("checked", "")]);
        let b = element(&mut doc, body, "input", &[("type", "radio"), ("name", "r")]);

        doc.set_checked(b, true);
        assert!(!doc.is_checked(a));
        assert!(doc.is_checked(b));
    }

    #[test]
    fn test_select_default_selection() {
        let mut doc = Document::default();
        let body = doc.body();
        let select = element(&mut doc, body, "select", &[("name", "s")]);
        let first = element(&mut doc, select, "option", &[("value", "1")]);
        let second = element(&mut doc, select, "option", &[("value", "2")]);

        assert!(doc.is_selected(first));
        assert_eq!(doc.value(select).as_deref(), Some("1"));

        doc.set_selected(second, true);
        assert!(!doc.is_selected(first));
        assert_eq!(doc.selected_options(select), vec![second]);
    }

    #[test]
    fn test_value_concepts() {
        let mut doc = Document::default();
        let body = doc.body();
        let div = element(&mut doc, body, "div", &[("value", "ignored")]);
        let input = element(&mut doc, body, "input", &[("value", "hello")]);
        let li = element(&mut doc, body, "li", &[("value", "3")]);

        assert_eq!(doc.value(div), None);
        assert_eq!(doc.value(input).as_deref(), Some("hello"));
        assert_eq!(doc.value(li).as_deref(), Some("3"));

        doc.set_value(input, "changed");
        assert_eq!(doc.value(input).as_deref(), Some("changed"));
    }

    #[test]
    fn test_disabled_fieldset() {
        let mut doc = Document::default();
        let body = doc.body();
        let fieldset = element(&mut doc, body, "fieldset", &[("disabled", "")]);
        let input = element(&mut doc, fieldset, "input", &[]);
        let div = element(&mut doc, body, "div", &[("disabled", "")]);

        assert!(doc.is_disabled(input));
        assert!(!doc.is_disabled(div));
    }
}
