pub mod oracle;

use once_cell::sync::Lazy;
use std::collections::HashSet;

pub use oracle::{DictionaryApiOracle, OfflineOracle, OracleAnswer, OracleError, WordOracle};

/// Words accepted when the dictionary API can't confirm them
pub const FALLBACK_WORDS: [&str; 10] = [
    "CAT", "DOG", "MOUSE", "HOUSE", "FIRE", "TREE", "BIRD", "STAR", "MOON", "PLANET",
];

static FALLBACK_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| FALLBACK_WORDS.into_iter().collect());

/// Fixed local word list
#[derive(Debug, Clone)]
pub struct Dictionary {
    words: &'static HashSet<&'static str>,
}

impl Dictionary {
    /// The built-in fallback list
    pub fn fallback() -> Self {
        Self {
            words: Lazy::force(&FALLBACK_SET),
        }
    }

    /// Exact, case-sensitive membership
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Get the number of words in the dictionary
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if dictionary is empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_dictionary() {
        let dict = Dictionary::fallback();
        assert_eq!(dict.len(), 10);
        assert!(!dict.is_empty());
        for word in FALLBACK_WORDS {
            assert!(dict.contains(word), "{} should be in the fallback list", word);
        }
    }

    #[test]
    fn test_fallback_is_case_sensitive() {
        let dict = Dictionary::fallback();
        assert!(dict.contains("MOON"));
        assert!(!dict.contains("moon"));
        assert!(!dict.contains("Moon"));
        assert!(!dict.contains("CATS"));
    }
}
