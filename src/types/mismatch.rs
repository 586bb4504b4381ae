use std::fmt;

/// Why a compiled rule does not hold for a sentence.
///
/// Produced by [`CompiledRule::explain()`](super::CompiledRule::explain).
/// Only the first failing condition is reported, in evaluation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    /// A required word is missing from the sentence.
    WordAbsent { word: String },
    /// A forbidden word occurs in the sentence.
    WordPresent { word: String },
    /// A negated group held.
    GroupMatched { node: usize },
    /// No term of an OR-run held. Terms are rendered in rule syntax.
    NoAlternative { terms: Vec<String> },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::WordAbsent { word } => write!(f, "word {word} not present"),
            Mismatch::WordPresent { word } => write!(f, "word {word} present"),
            Mismatch::GroupMatched { node } => write!(f, "negated group #{node} matched"),
            Mismatch::NoAlternative { terms } => {
                write!(f, "none of [{}] matched", terms.join(" | "))
            }
        }
    }
}
