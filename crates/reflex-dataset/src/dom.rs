//! `DocumentTree` for reflex-dom documents

use crate::{DocumentTree, HostError};
use reflex_dom::{Document, NodeId, SelectorError};

impl From<SelectorError> for HostError {
    fn from(err: SelectorError) -> Self {
        HostError::InvalidSelector {
            selector: err.selector,
            reason: err.reason,
        }
    }
}

impl DocumentTree for Document {
    type Node = NodeId;

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.tree().parent_element(node)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.tree().element_children(node)
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.tree().tag_name(node)
    }

    fn attributes(&self, node: NodeId) -> Result<Vec<(&str, &str)>, HostError> {
        let tree = self.tree();
        if tree.get(node).is_none() {
            return Err(HostError::UnknownNode(node.to_string()));
        }
        tree.attributes(node)
            .ok_or_else(|| HostError::NotAnElement(node.to_string()))
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.tree().attr(node, name)
    }

    fn is_checked(&self, node: NodeId) -> bool {
        Document::is_checked(self, node)
    }

    fn is_selected(&self, node: NodeId) -> bool {
        Document::is_selected(self, node)
    }

    fn value(&self, node: NodeId) -> Option<String> {
        Document::value(self, node)
    }

    fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>, HostError> {
        Ok(Document::query_selector_all(self, selector)?)
    }

    fn query_selector_all_in(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>, HostError> {
        Ok(Document::query_selector_all_in(self, scope, selector)?)
    }

    fn serialize_form(&self, form: NodeId) -> Vec<(String, String)> {
        self.form_data(form)
            .entries()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        self.tree().ancestors(node)
    }

    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        self.tree().descendants(node)
    }
}
