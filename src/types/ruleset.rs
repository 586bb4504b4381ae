use std::fmt;

use super::error::CompileError;
use super::evaluation_report::EvaluationReport;
use super::rule::{CompiledRule, Rule, RuleEntry};
use super::sentence::Sentence;
use super::verdict::Verdict;

/// Builder for constructing a [`RuleSet`].
///
/// # Example
///
/// ```
/// use wordrule::RuleSetBuilder;
///
/// let ruleset = RuleSetBuilder::new()
///     .rule(1, 0, "!&please &give[s]")
///     .rule(2, 10, "(&hello | &hi) !&bye")
///     .compile()
///     .unwrap();
///
/// assert_eq!(ruleset.evaluate("hi there").map(|v| v.rule()), Some(2));
/// ```
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    rules: Vec<Rule>,
}

impl RuleSetBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule. Lower priority numbers are checked first.
    #[must_use]
    pub fn rule(mut self, id: i32, priority: i32, text: impl Into<String>) -> Self {
        self.rules.push(Rule::new(id, priority, text));
        self
    }

    /// Add an already constructed [`Rule`].
    #[must_use]
    pub fn add(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Compile every rule into an immutable `RuleSet`.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] if a rule text is malformed or two rules
    /// share an identifier.
    pub fn compile(self) -> Result<RuleSet, CompileError> {
        crate::compile::compile(self.rules)
    }
}

/// Compiled rules in evaluation order. Thread-safe and designed to live behind `Arc`.
///
/// Each rule is compiled once when the set is built; evaluation only reads
/// the compiled nodes.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub(crate) rules: Vec<RuleEntry>,
    #[cfg(feature = "binary-cache")]
    pub(crate) source_digest: Option<[u8; 32]>,
}

impl RuleSet {
    pub(crate) fn from_compiled(rules: Vec<RuleEntry>) -> Self {
        Self {
            rules,
            #[cfg(feature = "binary-cache")]
            source_digest: None,
        }
    }

    /// Evaluate the rules against `sentence` in priority order.
    ///
    /// Returns the verdict of the first rule that matches, or `None` if no rule matches.
    #[must_use]
    pub fn evaluate(&self, sentence: &str) -> Option<Verdict> {
        self.evaluate_sentence(&Sentence::new(sentence))
    }

    /// Evaluate against an already tokenized sentence.
    #[must_use]
    pub fn evaluate_sentence(&self, sentence: &Sentence) -> Option<Verdict> {
        crate::evaluate::evaluate(&self.rules, sentence)
    }

    /// Evaluate with diagnostics: which rules were checked and why they failed.
    pub fn evaluate_detailed(&self, sentence: &str) -> EvaluationReport {
        crate::evaluate::evaluate_detailed(&self.rules, &Sentence::new(sentence))
    }

    /// Parse a rule file and compile it into a `RuleSet`.
    ///
    /// # Errors
    ///
    /// Returns [`WordRuleError`](crate::WordRuleError) on syntax or compile failure.
    pub fn from_dsl(input: &str) -> Result<Self, crate::WordRuleError> {
        let parsed = crate::parse::parse(input)?;
        let ruleset = crate::compile::compile(parsed.rules)?;
        Ok(ruleset)
    }

    /// Read a rule file and compile it into a `RuleSet`.
    ///
    /// # Errors
    ///
    /// Returns [`WordRuleError`](crate::WordRuleError) on I/O, syntax, or compile failure.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, crate::WordRuleError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_dsl(&input)
    }

    /// `(id, priority)` pairs in evaluation order.
    #[must_use]
    pub fn rule_order(&self) -> Vec<(i32, i32)> {
        self.rules
            .iter()
            .map(|e| (e.rule.id, e.rule.priority))
            .collect()
    }

    /// The source rule with identifier `id`.
    #[must_use]
    pub fn rule(&self, id: i32) -> Option<&Rule> {
        self.find(id).map(|e| &e.rule)
    }

    /// The compiled form of the rule with identifier `id`.
    #[must_use]
    pub fn compiled(&self, id: i32) -> Option<&CompiledRule> {
        self.find(id).map(|e| &e.compiled)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn find(&self, id: i32) -> Option<&RuleEntry> {
        self.rules.iter().find(|e| e.rule.id == id)
    }
}

#[cfg(feature = "binary-cache")]
impl RuleSet {
    /// Serialize this compiled ruleset to a byte vector.
    ///
    /// The optional `source_text` is hashed (BLAKE3) and embedded in the
    /// payload metadata so a cache can be checked against the current source
    /// with [`from_bytes_for_source`](Self::from_bytes_for_source).
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError`](crate::serial::SerializeError) if encoding fails.
    pub fn to_bytes(
        &self,
        source_text: Option<&str>,
    ) -> Result<Vec<u8>, crate::serial::SerializeError> {
        crate::serial::encode(self, source_text)
    }

    /// Deserialize a compiled ruleset previously produced by [`to_bytes`](Self::to_bytes).
    ///
    /// # Errors
    ///
    /// Returns [`DeserializeError`](crate::serial::DeserializeError) on
    /// format, integrity, or validation failure.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, crate::serial::DeserializeError> {
        crate::serial::decode(bytes)
    }

    /// Deserialize, rejecting a blob that was not built from `source_text`.
    ///
    /// # Errors
    ///
    /// Returns [`DeserializeError::StaleSource`](crate::serial::DeserializeError::StaleSource)
    /// if the embedded digest is missing or differs, or any error of
    /// [`from_bytes`](Self::from_bytes).
    pub fn from_bytes_for_source(
        bytes: &[u8],
        source_text: &str,
    ) -> Result<Self, crate::serial::DeserializeError> {
        let ruleset = Self::from_bytes(bytes)?;
        if ruleset.source_digest != Some(*blake3::hash(source_text.as_bytes()).as_bytes()) {
            return Err(crate::serial::DeserializeError::StaleSource);
        }
        Ok(ruleset)
    }

    /// BLAKE3 digest of the source text this set was cached from, if any.
    #[must_use]
    pub fn source_digest(&self) -> Option<&[u8; 32]> {
        self.source_digest.as_ref()
    }

    /// Serialize this compiled ruleset and write it to a file.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError`](crate::serial::SerializeError) on
    /// encoding or I/O failure.
    pub fn to_binary_file(
        &self,
        path: impl AsRef<std::path::Path>,
        source_text: Option<&str>,
    ) -> Result<(), crate::serial::SerializeError> {
        let bytes = self.to_bytes(source_text)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Read a file and deserialize the compiled ruleset it contains.
    ///
    /// # Errors
    ///
    /// Returns [`DeserializeError`](crate::serial::DeserializeError) on
    /// I/O, format, integrity, or validation failure.
    pub fn from_binary_file(
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, crate::serial::DeserializeError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nodes: usize = self.rules.iter().map(|e| e.compiled.nodes.len()).sum();
        write!(f, "RuleSet({} rules, {} nodes)", self.rules.len(), nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParseError;

    #[test]
    fn builder_collects_rules() {
        let builder = RuleSetBuilder::new()
            .rule(1, 10, "&a")
            .add(Rule::new(2, 0, "&b"));
        assert_eq!(builder.rules.len(), 2);
        assert_eq!(builder.rules[0].id, 1);
        assert_eq!(builder.rules[1].priority, 0);
    }

    #[test]
    fn compile_orders_by_priority() {
        let ruleset = RuleSetBuilder::new()
            .rule(1, 10, "&a")
            .rule(2, 0, "&b")
            .rule(3, 5, "&c")
            .compile()
            .unwrap();
        assert_eq!(ruleset.rule_order(), vec![(2, 0), (3, 5), (1, 10)]);
    }

    #[test]
    fn equal_priorities_keep_insertion_order() {
        let ruleset = RuleSetBuilder::new()
            .rule(7, 1, "&a")
            .rule(3, 1, "&a")
            .compile()
            .unwrap();
        assert_eq!(ruleset.rule_order(), vec![(7, 1), (3, 1)]);
        assert_eq!(ruleset.evaluate("a"), Some(Verdict::new(7, 1)));
    }

    #[test]
    fn malformed_rule_is_reported_with_id() {
        let result = RuleSetBuilder::new()
            .rule(1, 0, "&a")
            .rule(9, 0, "&a ~b")
            .compile();
        assert!(matches!(
            result,
            Err(CompileError::InvalidRule {
                rule: 9,
                source: ParseError::UnexpectedToken { .. }
            })
        ));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let result = RuleSetBuilder::new()
            .rule(1, 0, "&a")
            .rule(1, 5, "&b")
            .compile();
        assert!(matches!(result, Err(CompileError::DuplicateRule { id: 1 })));
    }

    #[test]
    fn lookup_by_id() {
        let ruleset = RuleSetBuilder::new()
            .rule(4, 0, "(&a) &b")
            .compile()
            .unwrap();
        assert_eq!(ruleset.rule(4).map(|r| r.text.as_str()), Some("(&a) &b"));
        assert_eq!(ruleset.compiled(4).map(|c| c.nodes().len()), Some(2));
        assert!(ruleset.rule(5).is_none());
    }

    #[test]
    fn empty_ruleset_never_matches() {
        let ruleset = RuleSetBuilder::new().compile().unwrap();
        assert!(ruleset.is_empty());
        assert_eq!(ruleset.evaluate("anything"), None);
    }

    #[test]
    fn display_counts() {
        let ruleset = RuleSetBuilder::new()
            .rule(1, 0, "(&a) &b")
            .rule(2, 0, "&c")
            .compile()
            .unwrap();
        assert_eq!(ruleset.to_string(), "RuleSet(2 rules, 3 nodes)");
    }
}
