//! Session behavior configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Tunables for the conversation session manager
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Seconds an analysis request may stay unanswered before it expires
    #[serde(default = "default_analysis_timeout")]
    pub analysis_timeout_secs: u64,

    /// Capacity of the inbound service event channel
    #[serde(default = "default_event_channel_capacity")]
    pub event_channel_capacity: usize,
}

impl SessionConfig {
    /// Get the analysis timeout as a duration
    pub fn analysis_timeout(&self) -> Duration {
        Duration::from_secs(self.analysis_timeout_secs)
    }

    /// Validate session configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.analysis_timeout_secs == 0 || self.analysis_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.event_channel_capacity == 0 {
            return Err(ValidationError::InvalidChannelCapacity);
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            analysis_timeout_secs: default_analysis_timeout(),
            event_channel_capacity: default_event_channel_capacity(),
        }
    }
}

fn default_analysis_timeout() -> u64 {
    30
}

fn default_event_channel_capacity() -> usize {
    32
}
