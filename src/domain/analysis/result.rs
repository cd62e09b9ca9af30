//! Scored next-move options produced by the analysis service.

use serde::{Deserialize, Serialize};

/// A single scored option suggested by the analysis service.
///
/// The client never produces these; the stored set is replaced wholesale on
/// each `parsedoptions` response, with no incremental merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// The suggested next move.
    pub option: String,
    /// The service's score for this option.
    pub score: f64,
}

impl AnalysisResult {
    /// Creates a new analysis result.
    pub fn new(option: impl Into<String>, score: f64) -> Self {
        Self {
            option: option.into(),
            score,
        }
    }
}
