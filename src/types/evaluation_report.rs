use std::fmt;
use std::time::Duration;

use super::mismatch::Mismatch;
use super::verdict::Verdict;

/// Result of checking one rule during
/// [`RuleSet::evaluate_detailed()`](super::ruleset::RuleSet::evaluate_detailed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    rule: i32,
    priority: i32,
    mismatch: Option<Mismatch>,
}

impl RuleOutcome {
    pub(crate) fn new(rule: i32, priority: i32, mismatch: Option<Mismatch>) -> Self {
        Self {
            rule,
            priority,
            mismatch,
        }
    }

    #[must_use]
    pub fn rule(&self) -> i32 {
        self.rule
    }

    #[must_use]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    #[must_use]
    pub fn matched(&self) -> bool {
        self.mismatch.is_none()
    }

    /// Why the rule did not match, if it did not.
    #[must_use]
    pub fn mismatch(&self) -> Option<&Mismatch> {
        self.mismatch.as_ref()
    }
}

/// Detailed evaluation report.
///
/// Contains the verdict, the outcome of every rule checked (in priority
/// order, stopping at the first match), and the wall-clock duration.
#[derive(Debug, Clone)]
#[must_use]
pub struct EvaluationReport {
    verdict: Option<Verdict>,
    outcomes: Vec<RuleOutcome>,
    duration: Duration,
}

impl EvaluationReport {
    pub(crate) fn new(
        verdict: Option<Verdict>,
        outcomes: Vec<RuleOutcome>,
        duration: Duration,
    ) -> Self {
        Self {
            verdict,
            outcomes,
            duration,
        }
    }

    /// The evaluation verdict, same as [`RuleSet::evaluate()`](super::ruleset::RuleSet::evaluate).
    #[must_use]
    pub fn verdict(&self) -> Option<&Verdict> {
        self.verdict.as_ref()
    }

    /// Rules checked, in the order they were checked.
    #[must_use]
    pub fn outcomes(&self) -> &[RuleOutcome] {
        &self.outcomes
    }

    /// Identifiers of the rules that were checked and did not match.
    #[must_use]
    pub fn rejected(&self) -> Vec<i32> {
        self.outcomes
            .iter()
            .filter(|o| !o.matched())
            .map(RuleOutcome::rule)
            .collect()
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.verdict {
            Some(v) => write!(f, "verdict: {v}")?,
            None => write!(f, "verdict: no match")?,
        }
        for outcome in &self.outcomes {
            if let Some(mismatch) = &outcome.mismatch {
                write!(f, ", rule {}: {mismatch}", outcome.rule)?;
            }
        }
        write!(f, ", duration: {:?}", self.duration)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EvaluationReport {
        EvaluationReport::new(
            Some(Verdict::new(2, 5)),
            vec![
                RuleOutcome::new(
                    1,
                    0,
                    Some(Mismatch::WordAbsent {
                        word: "CAT".into(),
                    }),
                ),
                RuleOutcome::new(2, 5, None),
            ],
            Duration::from_nanos(500),
        )
    }

    #[test]
    fn report_accessors() {
        let report = sample();
        assert_eq!(report.verdict(), Some(&Verdict::new(2, 5)));
        assert_eq!(report.outcomes().len(), 2);
        assert!(!report.outcomes()[0].matched());
        assert!(report.outcomes()[1].matched());
        assert_eq!(report.rejected(), vec![1]);
        assert_eq!(report.duration(), Duration::from_nanos(500));
    }

    #[test]
    fn report_display_with_verdict() {
        let s = sample().to_string();
        assert!(s.contains("verdict: rule 2 (priority 5)"));
        assert!(s.contains("rule 1: word CAT not present"));
    }

    #[test]
    fn report_display_no_verdict() {
        let report = EvaluationReport::new(None, vec![], Duration::from_nanos(100));
        assert!(report.to_string().contains("verdict: no match"));
    }
}
