//! Client for a remote random-word API, used to mint memorable game tokens.
//!
//! The API serves `GET /random/{adjective,animal,noun}`, each returning a
//! JSON array of strings. A token is `adjective-animal-noun`.

use std::time::Duration;

use async_trait::async_trait;
use wording_core::tokens::{FallibleTokenGenerator, TokenError};

/// Overall budget for one token: all three lookups share the client timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for random-word lookups.
#[derive(Debug, thiserror::Error)]
pub enum RandomWordError {
    /// The underlying HTTP request failed (network, DNS, timeout, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("random word service returned HTTP {0}")]
    HttpStatus(u16),

    #[error("random word service returned an empty list")]
    EmptyList,

    #[error("random word service returned an empty word")]
    EmptyWord,
}

// ---------------------------------------------------------------------------
// RandomWordClient
// ---------------------------------------------------------------------------

/// HTTP client for the random-word API rooted at `base_url`.
#[derive(Clone)]
pub struct RandomWordClient {
    client: reqwest::Client,
    base_url: String,
}

impl RandomWordClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, RandomWordError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub async fn adjective(&self) -> Result<String, RandomWordError> {
        self.word("adjective").await
    }

    pub async fn animal(&self) -> Result<String, RandomWordError> {
        self.word("animal").await
    }

    pub async fn noun(&self) -> Result<String, RandomWordError> {
        self.word("noun").await
    }

    /// Fetch all three words concurrently and join them with hyphens.
    pub async fn slug(&self) -> Result<String, RandomWordError> {
        let (adjective, animal, noun) =
            tokio::try_join!(self.adjective(), self.animal(), self.noun())?;
        Ok(format!("{adjective}-{animal}-{noun}"))
    }

    async fn word(&self, kind: &str) -> Result<String, RandomWordError> {
        let url = format!("{}/random/{kind}", self.base_url);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RandomWordError::HttpStatus(status.as_u16()));
        }

        let words: Vec<String> = response.json().await?;
        let first = words.into_iter().next().ok_or(RandomWordError::EmptyList)?;
        let word = collapse(&first);
        if word.is_empty() {
            return Err(RandomWordError::EmptyWord);
        }
        Ok(word)
    }
}

/// Squash a possibly multi-word answer into a single word.
fn collapse(word: &str) -> String {
    word.split_whitespace().collect()
}

#[async_trait]
impl FallibleTokenGenerator for RandomWordClient {
    async fn try_new_token(&self) -> Result<String, TokenError> {
        self.slug()
            .await
            .map_err(|e| TokenError::Source(Box::new(e)))
    }
}
