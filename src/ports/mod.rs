//! Ports - interfaces between the session core and the outside world.
//!
//! Following hexagonal architecture, ports define the contracts the
//! application layer depends on. Adapters implement them.
//!
//! - `AnalysisTransport` - outbound channel to the Conversation Analysis
//!   Service
//! - `ServiceEvent` - inbound events the transport delivers back

mod transport;

pub use transport::{AnalysisRequest, AnalysisTransport, ServiceEvent, TransportError};
