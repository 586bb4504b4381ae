use crate::Rule;

/// The result of parsing a rule file.
#[derive(Debug)]
pub struct ParsedRuleFile {
    pub rules: Vec<Rule>,
}
