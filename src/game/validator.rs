use std::sync::Arc;

use crate::{
    dictionary::{Dictionary, OracleAnswer, OracleError, WordOracle},
    models::Verdict,
};

/// Decides whether a submitted word counts.
///
/// The oracle is asked first. When it says no, or can't be reached, the
/// fixed local list gets the final say.
pub struct WordValidator {
    oracle: Arc<dyn WordOracle>,
    fallback: Dictionary,
}

impl WordValidator {
    pub fn new(oracle: Arc<dyn WordOracle>, fallback: Dictionary) -> Self {
        Self { oracle, fallback }
    }

    /// Look the word up and resolve the answer
    pub async fn validate(&self, word: &str) -> Verdict {
        let answer = self.oracle.lookup(word).await;
        self.resolve(word, answer)
    }

    /// Turn an oracle result into a verdict, consulting the fallback list
    /// for anything other than a positive answer
    pub fn resolve(&self, word: &str, answer: Result<OracleAnswer, OracleError>) -> Verdict {
        match answer {
            Ok(OracleAnswer::Exists) => return Verdict::Valid,
            Ok(OracleAnswer::Missing) => {
                tracing::debug!("Dictionary API does not know '{}', checking fallback list", word);
            }
            Err(e) => {
                tracing::warn!("Dictionary lookup for '{}' failed: {}. Using fallback list", word, e);
            }
        }

        if self.fallback.contains(word) {
            Verdict::Valid
        } else {
            Verdict::Invalid
        }
    }
}
