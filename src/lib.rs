//! A compact rule language for matching sentences by word presence.
//!
//! Rules combine literal words (`&word`), negation (`!&word`), OR-runs
//! (`&a | &b`), bracket expansion (`&walk[s/ed]`) and parenthesised groups.
//!
//! ```
//! assert!(wordrule::compile_and_validate("(&cat | &dog) !&not", "the dog barks").unwrap());
//! ```

mod compile;
mod error;
mod evaluate;
pub mod parse;
#[cfg(feature = "binary-cache")]
pub mod serial;
mod types;

pub use error::WordRuleError;
#[cfg(feature = "binary-cache")]
pub use serial::{DeserializeError, SerializeError};
pub use types::{
    CompileError, CompiledRule, EvaluationReport, Mismatch, Node, NodeCollection, Operand,
    Operator, ParseError, Rule, RuleOutcome, RuleSet, RuleSetBuilder, Sentence, Term, Verdict,
};

/// Compile `rule_text` into its node collection.
///
/// # Errors
///
/// Returns [`ParseError`] if the rule text is malformed.
pub fn compile(rule_text: &str) -> Result<CompiledRule, ParseError> {
    compile::compile_text(rule_text)
}

/// Compile `rule_text` and test it against `sentence_text`.
///
/// `Ok(false)` means a well-formed rule that does not match; a malformed rule
/// is always an error.
///
/// # Errors
///
/// Returns [`ParseError`] if the rule text is malformed.
pub fn compile_and_validate(rule_text: &str, sentence_text: &str) -> Result<bool, ParseError> {
    let compiled = compile::compile_text(rule_text)?;
    Ok(compiled.evaluate(&Sentence::new(sentence_text)))
}

/// Check `rules` in ascending priority order, compiling each one fresh, and
/// return the first that matches `sentence_text`.
///
/// Rules after the first match are not compiled.
///
/// # Errors
///
/// Returns [`CompileError::InvalidRule`] for the first malformed rule reached.
pub fn select(rules: &[Rule], sentence_text: &str) -> Result<Option<Verdict>, CompileError> {
    evaluate::select(rules, &Sentence::new(sentence_text))
}
