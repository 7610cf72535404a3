//! Unified error type for the Raidcore server.

use raidcore_protocol::ProtocolError;
use raidcore_transport::TransportError;

/// Top-level error that wraps the crate-specific errors.
///
/// Only the transport and protocol layers can fail; the room engine
/// drops inapplicable requests instead of erroring. The `#[from]`
/// attribute on each variant auto-generates `From` impls, so the `?`
/// operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum RaidcoreError {
    /// A transport-level error (accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode, invalid message).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
