//! Error types for dotmatrix-client.

use thiserror::Error;

/// Main error type for all dotmatrix operations.
///
/// The four variants deliberately separate "the caller passed a bad value"
/// from "the link is down": the protocol has no NACK, so the only way a
/// caller can react correctly is by branching on the error kind.
#[derive(Debug, Error)]
pub enum DotmatrixError {
    /// A feature parameter is outside its allowed range.
    ///
    /// Raised before any encoding; nothing has been sent to the device.
    #[error("validation error: {0}")]
    Validation(String),

    /// An internal invariant was violated while encoding, e.g. a computed
    /// length does not fit its field width. Always a programming defect,
    /// never retried.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// The transport is not connected.
    ///
    /// Recoverable: reconnect and resubmit the entire command or transfer
    /// from scratch. The session never auto-reconnects mid-transfer.
    #[error("transport not connected")]
    NotConnected,

    /// I/O failure on the transport, including timeouts and disconnects
    /// surfaced by the link layer.
    ///
    /// When this happens mid-asset the device keeps whatever chunks it
    /// already received; restart the transfer with a fresh first chunk.
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),
}

/// Result type alias using DotmatrixError.
pub type Result<T> = std::result::Result<T, DotmatrixError>;
