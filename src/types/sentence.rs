use std::collections::HashSet;

/// A tokenized sentence ready for evaluation.
///
/// The text is trimmed, split on single spaces and every token uppercased,
/// matching how the compiler stores words. Empty tokens (from runs of spaces
/// or blank text) are dropped, since no rule word can match them. Order and
/// duplicates are kept in [`tokens()`](Self::tokens); membership tests use a
/// set.
#[derive(Debug, Clone, Default)]
pub struct Sentence {
    tokens: Vec<String>,
    words: HashSet<String>,
}

impl Sentence {
    #[must_use]
    pub fn new(text: &str) -> Self {
        let tokens: Vec<String> = text
            .trim()
            .split(' ')
            .filter(|t| !t.is_empty())
            .map(str::to_uppercase)
            .collect();
        let words = tokens.iter().cloned().collect();
        Self { tokens, words }
    }

    /// Whether `word` (already uppercase) occurs in the sentence.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl From<&str> for Sentence {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}
