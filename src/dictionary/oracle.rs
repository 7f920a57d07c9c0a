use async_trait::async_trait;
use thiserror::Error;

/// Default public dictionary endpoint; the word is appended as a path segment
pub const DEFAULT_DICTIONARY_API_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

/// What the oracle said about a word it managed to look up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OracleAnswer {
    Exists,
    Missing,
}

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("dictionary request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("dictionary lookups are disabled")]
    Unavailable,
}

/// Something that can tell whether a word exists
#[async_trait]
pub trait WordOracle: Send + Sync {
    async fn lookup(&self, word: &str) -> Result<OracleAnswer, OracleError>;
}

/// Looks words up against a free dictionary HTTP API.
///
/// Any 2xx response means the word exists. Every other status is treated as
/// "not found"; only transport problems (including the client timeout) are
/// errors.
pub struct DictionaryApiOracle {
    client: reqwest::Client,
    base_url: String,
}

impl DictionaryApiOracle {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn entry_url(&self, word: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            word.to_lowercase()
        )
    }
}

#[async_trait]
impl WordOracle for DictionaryApiOracle {
    async fn lookup(&self, word: &str) -> Result<OracleAnswer, OracleError> {
        let url = self.entry_url(word);
        let response = self.client.get(&url).send().await?;

        tracing::debug!("Dictionary lookup {} -> {}", url, response.status());

        if response.status().is_success() {
            Ok(OracleAnswer::Exists)
        } else {
            Ok(OracleAnswer::Missing)
        }
    }
}

/// Oracle used when API lookups are switched off; every word falls through to the local list
pub struct OfflineOracle;

#[async_trait]
impl WordOracle for OfflineOracle {
    async fn lookup(&self, _word: &str) -> Result<OracleAnswer, OracleError> {
        Err(OracleError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_url_lowercases_word() {
        let oracle = DictionaryApiOracle::new(reqwest::Client::new(), DEFAULT_DICTIONARY_API_URL);
        assert_eq!(
            oracle.entry_url("PLANET"),
            "https://api.dictionaryapi.dev/api/v2/entries/en/planet"
        );
    }

    #[test]
    fn test_entry_url_trims_trailing_slash() {
        let oracle = DictionaryApiOracle::new(reqwest::Client::new(), "http://localhost:9000/en/");
        assert_eq!(oracle.entry_url("Star"), "http://localhost:9000/en/star");
    }

    #[test]
    fn test_offline_oracle_is_unavailable() {
        let result = tokio_test::block_on(OfflineOracle.lookup("CAT"));
        assert!(matches!(result, Err(OracleError::Unavailable)));
    }

    #[tokio::test]
    async fn test_unreachable_api_is_a_transport_error() {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(500))
            .build()
            .unwrap();
        // Port 9 (discard) on localhost is not expected to serve HTTP
        let oracle = DictionaryApiOracle::new(client, "http://127.0.0.1:9/en");

        let result = oracle.lookup("cat").await;
        assert!(
            matches!(result, Err(OracleError::Transport(_))),
            "Connection failures should surface as transport errors"
        );
    }
}
