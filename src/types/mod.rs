mod error;
mod evaluation_report;
mod mismatch;
mod node;
mod rule;
mod ruleset;
mod sentence;
mod term;
mod verdict;

pub use error::{CompileError, ParseError};
pub use evaluation_report::{EvaluationReport, RuleOutcome};
pub use mismatch::Mismatch;
pub use node::{Node, NodeCollection};
pub(crate) use rule::RuleEntry;
pub use rule::{CompiledRule, Rule};
pub use ruleset::{RuleSet, RuleSetBuilder};
pub use sentence::Sentence;
pub use term::{Operand, Operator, Term};
pub use verdict::Verdict;
