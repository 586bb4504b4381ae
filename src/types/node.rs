use std::fmt;
use std::ops::Index;

use super::term::{Operator, Term};

/// A compiled AND/OR expression over [`Term`]s.
///
/// Terms combine with AND, except where a maximal run of consecutive
/// OR-operator terms forms an alternative: at least one term of the run
/// must hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) terms: Vec<Term>,
}

impl Node {
    pub(crate) fn new(terms: Vec<Term>) -> Self {
        Self { terms }
    }

    #[must_use]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// End (exclusive) of the OR-run starting at `start`.
    pub(crate) fn or_run_end(&self, start: usize) -> usize {
        self.terms[start..]
            .iter()
            .position(|t| t.operator != Operator::Or)
            .map_or(self.terms.len(), |offset| start + offset)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                // `|` goes between two terms that both belong to an OR-run.
                let joined = term.operator == Operator::Or
                    && self.terms[i - 1].operator == Operator::Or;
                write!(f, "{}", if joined { " | " } else { " " })?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}

/// Append-only arena of nodes produced by one compilation.
///
/// Indices never shift once assigned; nested groups are appended before the
/// node that references them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeCollection {
    nodes: Vec<Node>,
}

impl NodeCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(feature = "binary-cache")]
    pub(crate) fn from_nodes(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Append a node, returning its index.
    pub(crate) fn push(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }
}

impl Index<usize> for NodeCollection {
    type Output = Node;

    fn index(&self, index: usize) -> &Node {
        &self.nodes[index]
    }
}
