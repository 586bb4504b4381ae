mod error;
mod grammar;
mod parser;
pub(crate) mod token;

pub use error::SyntaxError;
pub use parser::ParsedRuleFile;

/// Parse a rule file into a [`ParsedRuleFile`].
///
/// Rule texts are not compiled here; see [`RuleSet::from_dsl`](crate::RuleSet::from_dsl).
///
/// # Errors
///
/// Returns [`SyntaxError`] if the input is not a valid rule file.
pub fn parse(input: &str) -> Result<ParsedRuleFile, SyntaxError> {
    use winnow::Parser;
    grammar::parse_rule_file
        .parse(input)
        .map_err(|e| SyntaxError::new(e.to_string()))
}
