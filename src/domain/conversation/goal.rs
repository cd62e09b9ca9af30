//! The conversation goal value object.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::DomainError;

/// The operator's declared desired outcome for the conversation.
///
/// Free text, overwritten on each successful edit; no history is kept.
/// Construction rejects empty or whitespace-only text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Goal(String);

impl Goal {
    /// Creates a goal from the given text.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if text is empty or whitespace-only
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::validation("goal", "Goal cannot be empty"));
        }
        Ok(Self(text))
    }

    /// Returns the goal text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Goal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
