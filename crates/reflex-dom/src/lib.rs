//! Reflex DOM - Document Object Model
//!
//! Arena-backed document tree used as the host for dataset extraction:
//! element relations, attributes, form-control state, document-wide
//! selector queries and form serialization.

mod document;
mod forms;
mod interner;
mod node;
mod selector;
mod tree;

pub use document::Document;
pub use forms::FormData;
pub use interner::{Atom, NameInterner};
pub use node::{Attribute, ControlState, ElementData, Node, NodeData};
pub use selector::{
    AttrOperator, Combinator, CompoundSelector, PseudoClass, SelectorError, SelectorList,
    SimpleSelector,
};
pub use tree::{ChildIter, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The document node
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            write!(f, "#{}", self.0)
        } else {
            f.write_str("#none")
        }
    }
}
