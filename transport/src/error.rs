//! Error types for the HTTP transport

use thiserror::Error;

/// Errors that can occur while talking to the television over HTTP
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection refused, timeout, DNS failure or any other I/O level problem
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// The device answered with a non-success HTTP status
    ///
    /// The body is kept because the set reports SOAP faults and JSON-RPC
    /// error envelopes with error statuses.
    #[error("HTTP status {code}")]
    Status { code: u16, body: String },

    /// The response body could not be read
    #[error("Response body error: {0}")]
    Body(String),
}

impl TransportError {
    /// True when the device could not be reached at all
    ///
    /// A powered-off television is the usual cause, so callers treat this as
    /// an expected condition rather than a failure worth surfacing.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, TransportError::Network(_))
    }
}
