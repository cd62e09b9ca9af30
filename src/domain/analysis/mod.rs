//! Analysis results returned by the Conversation Analysis Service.

mod result;

pub use result::AnalysisResult;
