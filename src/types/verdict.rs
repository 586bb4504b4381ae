use std::fmt;

/// The rule that accepted a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct Verdict {
    rule: i32,
    priority: i32,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule {} (priority {})", self.rule, self.priority)
    }
}

impl Verdict {
    pub fn new(rule: i32, priority: i32) -> Self {
        Self { rule, priority }
    }

    /// Identifier of the matching rule.
    #[must_use]
    pub fn rule(&self) -> i32 {
        self.rule
    }

    #[must_use]
    pub fn priority(&self) -> i32 {
        self.priority
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_verdict() {
        let v = Verdict::new(4, 1);
        assert_eq!(v.rule(), 4);
        assert_eq!(v.priority(), 1);
    }

    #[test]
    fn verdict_display() {
        assert_eq!(Verdict::new(4, 1).to_string(), "rule 4 (priority 1)");
    }

    #[test]
    fn verdict_inequality() {
        assert_ne!(Verdict::new(1, 0), Verdict::new(2, 0));
    }
}
