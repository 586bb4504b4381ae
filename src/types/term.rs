use std::fmt;

/// How a term combines with the term immediately before it in the same node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Operator {
    #[default]
    And,
    Or,
}

/// What a term tests: presence of a literal word, or the result of another node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// An uppercase word looked up in the sentence.
    Word(String),
    /// Index of a previously compiled node in the same [`NodeCollection`](super::NodeCollection).
    Node(usize),
}

/// One atomic condition inside a [`Node`](super::Node).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub operator: Operator,
    pub operand: Operand,
    pub negated: bool,
}

impl Term {
    /// A word term. The word is uppercased so it compares equal to sentence tokens.
    #[must_use]
    pub fn word(operator: Operator, word: &str, negated: bool) -> Self {
        Self {
            operator,
            operand: Operand::Word(word.to_uppercase()),
            negated,
        }
    }

    #[must_use]
    pub fn node(operator: Operator, index: usize, negated: bool) -> Self {
        Self {
            operator,
            operand: Operand::Node(index),
            negated,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::And => write!(f, "AND"),
            Operator::Or => write!(f, "OR"),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "!")?;
        }
        match &self.operand {
            Operand::Word(word) => write!(f, "&{word}"),
            Operand::Node(index) => write!(f, "#{index}"),
        }
    }
}
