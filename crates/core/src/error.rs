use std::collections::BTreeMap;

use serde::Serialize;

use crate::store::StoreError;

/// Field-scoped input problems, collected in full before being returned so
/// a form can show every violation at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(transparent)]
#[error("invalid input: {}", describe(.0))]
pub struct InputViolations(BTreeMap<String, Vec<String>>);

impl InputViolations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one more violation against `field`.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Fold every violation of `other` into `self`.
    pub fn merge(&mut self, other: InputViolations) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded against `field`, empty if none.
    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// `Ok(())` when nothing was recorded, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), InputViolations> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

fn describe(violations: &BTreeMap<String, Vec<String>>) -> String {
    violations
        .iter()
        .map(|(field, messages)| format!("{field}: {}", messages.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors returned by the game service.
///
/// Everything except [`CoreError::Store`] is an expected outcome the caller
/// can recover from (re-render a form, show the results page).
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    InvalidInput(#[from] InputViolations),

    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("guess limit reached")]
    GuessLimitReached,

    #[error("game is over")]
    CannotContinue,

    #[error("store error: {0}")]
    Store(#[source] StoreError),
}

impl CoreError {
    /// Wrap a store failure that has no not-found meaning at the call site.
    pub fn store(err: StoreError) -> Self {
        Self::Store(err)
    }

    /// Translate a store not-found into a [`CoreError::NotFound`] for
    /// `entity`; any other store failure stays opaque.
    pub fn lookup(entity: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |err| match err {
            StoreError::NotFound => Self::NotFound { entity },
            other => Self::Store(other),
        }
    }

    /// Stable machine-readable name for this error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::NotFound { .. } => "not_found",
            Self::GuessLimitReached => "guess_limit_reached",
            Self::CannotContinue => "cannot_continue",
            Self::Store(_) => "store",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
