//! Host document capabilities
//!
//! The engine never sees a concrete tree type. Everything it needs from
//! the document is expressed by [`DocumentTree`]; relations only ever
//! yield element nodes.

use crate::HostError;
use std::fmt::Debug;
use std::hash::Hash;

/// Read-only view of a host document.
pub trait DocumentTree {
    /// Opaque node handle
    type Node: Copy + Eq + Hash + Debug;

    /// Parent element, `None` at the top of the element tree
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Element children in document order
    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    /// Lowercase tag name, `None` for non-elements
    fn tag_name(&self, node: Self::Node) -> Option<&str>;

    /// All attributes in source order
    fn attributes(&self, node: Self::Node) -> Result<Vec<(&str, &str)>, HostError>;

    /// Checkedness of a checkbox/radio control
    fn is_checked(&self, node: Self::Node) -> bool;

    /// Selectedness of an option
    fn is_selected(&self, node: Self::Node) -> bool;

    /// Current value, `None` when the element has no value concept
    fn value(&self, node: Self::Node) -> Option<String>;

    /// Elements matching `selector` anywhere in the document, document order
    fn query_selector_all(&self, selector: &str) -> Result<Vec<Self::Node>, HostError>;

    /// Descendants of `scope` matching `selector`, document order
    fn query_selector_all_in(
        &self,
        scope: Self::Node,
        selector: &str,
    ) -> Result<Vec<Self::Node>, HostError>;

    /// The `(name, value)` entries a form would submit
    fn serialize_form(&self, form: Self::Node) -> Vec<(String, String)>;

    /// Single attribute lookup
    fn attribute(&self, node: Self::Node, name: &str) -> Option<&str> {
        self.attributes(node)
            .ok()?
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    /// Element with the given tag
    fn is_tag(&self, node: Self::Node, tag: &str) -> bool {
        self.tag_name(node)
            .is_some_and(|name| name.eq_ignore_ascii_case(tag))
    }

    /// Ancestors, nearest first
    fn ancestors(&self, node: Self::Node) -> Vec<Self::Node> {
        let mut out = Vec::new();
        let mut current = self.parent(node);
        while let Some(ancestor) = current {
            out.push(ancestor);
            current = self.parent(ancestor);
        }
        out
    }

    /// Preceding then following siblings, document order
    fn siblings(&self, node: Self::Node) -> Vec<Self::Node> {
        match self.parent(node) {
            Some(parent) => self
                .children(parent)
                .into_iter()
                .filter(|&sibling| sibling != node)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Descendants, depth-first pre-order
    fn descendants(&self, node: Self::Node) -> Vec<Self::Node> {
        let mut out = Vec::new();
        let mut stack: Vec<Self::Node> = self.children(node).into_iter().rev().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).into_iter().rev());
        }
        out
    }

    /// Nearest inclusive ancestor with the given tag
    fn closest(&self, node: Self::Node, tag: &str) -> Option<Self::Node> {
        if self.is_tag(node, tag) {
            return Some(node);
        }
        self.ancestors(node)
            .into_iter()
            .find(|&ancestor| self.is_tag(ancestor, tag))
    }
}
