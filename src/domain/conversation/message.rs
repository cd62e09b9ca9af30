//! Message entity for conversation sessions.
//!
//! Messages are immutable records of customer/agent/service exchanges.
//! Each message has a sender, text content, and a creation timestamp.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, MessageId, Timestamp};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The customer side of the conversation, scripted by the operator.
    Customer,
    /// The sales agent operating the session.
    Agent,
    /// The remote analysis service.
    Service,
}

impl Sender {
    /// Returns true for senders authored on the client side.
    ///
    /// Only client-authored messages are accumulated into the analysis
    /// context; service replies stay out of it.
    pub fn is_client_authored(&self) -> bool {
        matches!(self, Self::Customer | Self::Agent)
    }
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Sender::Customer => "customer",
            Sender::Agent => "agent",
            Sender::Service => "service",
        };
        write!(f, "{}", s)
    }
}

/// An immutable message within a session.
///
/// # Invariants
///
/// - `id` is globally unique
/// - `text` is non-empty and not whitespace-only (validated at construction)
/// - `created_at` is set at construction and never changes
///
/// Duplicate text across messages is allowed; ordering is insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier for this message.
    id: MessageId,

    /// Who sent the message.
    sender: Sender,

    /// The message text.
    text: String,

    /// When the message was created.
    created_at: Timestamp,
}

impl Message {
    /// Creates a new message with the given sender and text.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if text is empty or whitespace-only
    pub fn new(sender: Sender, text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        Self::validate_text(&text)?;

        Ok(Self {
            id: MessageId::new(),
            sender,
            text,
            created_at: Timestamp::now(),
        })
    }

    /// Creates a customer message.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if text is empty or whitespace-only
    pub fn customer(text: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(Sender::Customer, text)
    }

    /// Creates an agent message.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if text is empty or whitespace-only
    pub fn agent(text: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(Sender::Agent, text)
    }

    /// Creates a service message.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if text is empty or whitespace-only
    pub fn service(text: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(Sender::Service, text)
    }

    /// Returns the message ID.
    pub fn id(&self) -> &MessageId {
        &self.id
    }

    /// Returns the sender.
    pub fn sender(&self) -> Sender {
        self.sender
    }

    /// Returns the message text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns when the message was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    fn validate_text(text: &str) -> Result<(), DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::validation(
                "text",
                "Message text cannot be empty",
            ));
        }
        Ok(())
    }
}
