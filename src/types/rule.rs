use std::cmp::Ordering;
use std::fmt;

use super::error::ParseError;
use super::mismatch::Mismatch;
use super::node::NodeCollection;
use super::sentence::Sentence;

/// A prioritized, identified unit of rule text.
///
/// Rules order by `priority` alone (lower first), so two rules with the same
/// priority compare equal regardless of identifier or text.
#[derive(Debug, Clone)]
pub struct Rule {
    pub id: i32,
    pub priority: i32,
    pub text: String,
}

impl Rule {
    #[must_use]
    pub fn new(id: i32, priority: i32, text: impl Into<String>) -> Self {
        Self {
            id,
            priority,
            text: text.into(),
        }
    }

    /// Compile this rule's text.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the text is malformed.
    pub fn compile(&self) -> Result<CompiledRule, ParseError> {
        crate::compile::compile_text(&self.text)
    }

    /// Compile the rule and test it against `sentence`. Nothing is cached
    /// between calls.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the text is malformed.
    pub fn validate(&self, sentence: &str) -> Result<bool, ParseError> {
        Ok(self.compile()?.evaluate(&Sentence::new(sentence)))
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority
    }
}

impl Eq for Rule {}

impl PartialOrd for Rule {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rule {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority.cmp(&other.priority)
    }
}

/// Rule text compiled into a node collection plus the index of its root node.
///
/// Immutable once built; evaluation never mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledRule {
    pub(crate) nodes: NodeCollection,
    pub(crate) root: usize,
}

impl CompiledRule {
    pub(crate) fn new(nodes: NodeCollection, root: usize) -> Self {
        Self { nodes, root }
    }

    #[must_use]
    pub fn nodes(&self) -> &NodeCollection {
        &self.nodes
    }

    #[must_use]
    pub fn root(&self) -> usize {
        self.root
    }

    /// Whether the sentence satisfies the rule.
    #[must_use]
    pub fn evaluate(&self, sentence: &Sentence) -> bool {
        self.evaluate_node(self.root, sentence)
    }

    /// Whether the sentence satisfies the node at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` (or any node it references) is out of range.
    #[must_use]
    pub fn evaluate_node(&self, index: usize, sentence: &Sentence) -> bool {
        crate::evaluate::eval_node(&self.nodes, index, sentence).is_ok()
    }

    /// The first condition that fails for `sentence`, or `None` if the rule holds.
    #[must_use]
    pub fn explain(&self, sentence: &Sentence) -> Option<Mismatch> {
        crate::evaluate::eval_node(&self.nodes, self.root, sentence)
            .err()
            .map(|miss| miss.describe(&self.nodes))
    }
}

impl fmt::Display for CompiledRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "#{i}: {node}")?;
        }
        Ok(())
    }
}

/// A rule paired with its compiled form, stored in a [`RuleSet`](super::RuleSet).
#[derive(Debug, Clone)]
pub(crate) struct RuleEntry {
    pub(crate) rule: Rule,
    pub(crate) compiled: CompiledRule,
}
