use thiserror::Error;

/// Errors produced when compiling rule text.
///
/// A malformed rule is always reported through this type; it is never
/// folded into a `false` match result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unmatched parenthesis in '{fragment}'")]
    UnmatchedParen { fragment: String },

    #[error("invalid node reference '{token}'")]
    InvalidNodeRef { token: String },

    #[error("malformed bracket expansion '{token}'")]
    MalformedBracket { token: String },

    #[error("unexpected token '{token}'")]
    UnexpectedToken { token: String },

    #[error("expression has no terms")]
    EmptyExpression,
}

/// Errors produced when assembling rules into a [`RuleSet`](super::RuleSet).
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("rule {rule}: {source}")]
    InvalidRule {
        rule: i32,
        #[source]
        source: ParseError,
    },

    #[error("duplicate rule identifier {id}")]
    DuplicateRule { id: i32 },
}
