//! Opaque identifiers for admin, game and player tokens.
//!
//! [`TokenGenerator`] is the infallible capability the service consumes.
//! Sources that can fail (a remote word service) implement
//! [`FallibleTokenGenerator`] and are composed with an infallible fallback
//! through [`WithFallback`].

use async_trait::async_trait;
use rand::Rng;

/// Produces non-empty, URL-safe tokens.
#[async_trait]
pub trait TokenGenerator: Send + Sync {
    async fn new_token(&self) -> String;
}

/// A token source that may be unavailable.
#[async_trait]
pub trait FallibleTokenGenerator: Send + Sync {
    async fn try_new_token(&self) -> Result<String, TokenError>;
}

/// Why a fallible source produced no token.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token source failed: {0}")]
    Source(Box<dyn std::error::Error + Send + Sync>),

    #[error("token source returned an unusable token: {0:?}")]
    Unusable(String),
}

/// True for strings that can be dropped into a URL path unescaped.
pub fn is_url_safe(token: &str) -> bool {
    !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~'))
}

// ---------------------------------------------------------------------------
// UUID
// ---------------------------------------------------------------------------

/// Random UUID v4 tokens. Used for admin and player tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidTokenGenerator;

#[async_trait]
impl TokenGenerator for UuidTokenGenerator {
    async fn new_token(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

// ---------------------------------------------------------------------------
// Human readable
// ---------------------------------------------------------------------------

const COLORS: &[&str] = &["violet", "indigo", "blue", "green", "yellow", "orange", "red"];

const ADJECTIVES: &[&str] = &[
    "criminal",
    "adoring",
    "vacant",
    "mysterious",
    "frightful",
    "hungry",
    "sad",
];

const NOUNS: &[&str] = &[
    "tornado", "mahogany", "boldness", "fan", "majority", "panda", "dragon",
];

type Picker = Box<dyn Fn(usize) -> usize + Send + Sync>;

/// `color-adjective-noun` slugs built from fixed word lists.
pub struct HumanReadableTokenGenerator {
    pick: Picker,
}

impl HumanReadableTokenGenerator {
    /// Pick words with the thread-local RNG.
    pub fn new() -> Self {
        Self::with_picker(|n| rand::rng().random_range(0..n))
    }

    /// Pick words with `pick(len)`, which must return an index below `len`.
    /// Out-of-range indices wrap.
    pub fn with_picker(pick: impl Fn(usize) -> usize + Send + Sync + 'static) -> Self {
        Self {
            pick: Box::new(pick),
        }
    }

    fn choose(&self, words: &[&'static str]) -> &'static str {
        words[(self.pick)(words.len()) % words.len()]
    }

    pub fn slug(&self) -> String {
        [
            self.choose(COLORS),
            self.choose(ADJECTIVES),
            self.choose(NOUNS),
        ]
        .join("-")
    }
}

impl Default for HumanReadableTokenGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenGenerator for HumanReadableTokenGenerator {
    async fn new_token(&self) -> String {
        self.slug()
    }
}

// ---------------------------------------------------------------------------
// Fallback composition
// ---------------------------------------------------------------------------

/// Tries `primary` and falls back to `fallback` when it fails or hands
/// back something that is not a usable token.
pub struct WithFallback<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> WithFallback<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl<P, F> TokenGenerator for WithFallback<P, F>
where
    P: FallibleTokenGenerator,
    F: TokenGenerator,
{
    async fn new_token(&self) -> String {
        let err = match self.primary.try_new_token().await {
            Ok(token) if is_url_safe(&token) => return token,
            Ok(token) => TokenError::Unusable(token),
            Err(e) => e,
        };
        tracing::warn!(error = %err, "Primary token source failed, using fallback");
        self.fallback.new_token().await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
