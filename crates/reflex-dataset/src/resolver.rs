//! Traversal resolver
//!
//! Turns tokens into ordered node sequences and assembles contexts.

use crate::{DocumentTree, ResolutionError, Token, TokenList};

/// Resolve one token relative to `root`.
///
/// Ancestors come nearest first so that a first-wins merge lets closer
/// nodes shadow farther ones. Selectors are matched against the whole
/// document, not just the subtree under `root`.
pub fn resolve<H>(host: &H, root: H::Node, token: &Token) -> Result<Vec<H::Node>, ResolutionError>
where
    H: DocumentTree + ?Sized,
{
    let nodes = match token {
        Token::Ancestors => host.ancestors(root),
        Token::Parent => host.parent(root).into_iter().collect(),
        Token::Siblings => host.siblings(root),
        Token::Children => host.children(root),
        Token::Descendants => host.descendants(root),
        Token::Form => {
            let form = host
                .closest(root, "form")
                .ok_or_else(|| ResolutionError::NoEnclosingForm(format!("{root:?}")))?;
            vec![form]
        }
        Token::Selector(selector) => host.query_selector_all(selector)?,
    };
    Ok(nodes)
}

/// Ordered node sequence consulted by one merge pass.
///
/// Always starts with the root; may contain the same node more than once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context<N> {
    nodes: Vec<N>,
}

impl<N: Copy> Context<N> {
    /// A context holding only the root
    pub fn root_only(root: N) -> Self {
        Self { nodes: vec![root] }
    }

    pub fn root(&self) -> N {
        self.nodes[0]
    }

    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    pub fn iter(&self) -> impl Iterator<Item = N> + '_ {
        self.nodes.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Never true: the root is always present
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Build `[root, ...resolve(t) for t in tokens]`.
///
/// A token that fails to resolve contributes no nodes; the rest still do.
pub fn build_context<H>(host: &H, root: H::Node, tokens: &TokenList) -> Context<H::Node>
where
    H: DocumentTree + ?Sized,
{
    let mut context = Context::root_only(root);
    for token in tokens {
        match resolve(host, root, token) {
            Ok(nodes) => {
                tracing::trace!("Token `{}` resolved to {} nodes", token, nodes.len());
                context.nodes.extend(nodes);
            }
            Err(err) => {
                tracing::debug!("Token `{}` contributes no nodes: {}", token, err);
            }
        }
    }
    context
}
