//! Error types for the protocol layer.
//!
//! Each crate in Raidcore defines its own error enum. This keeps errors
//! specific and meaningful — a `ProtocolError` always means a
//! serialization problem, not networking or room state.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    ///
    /// Common causes: malformed JSON, missing required fields, wrong
    /// data types, or an unknown event tag.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The message is invalid at the protocol level.
    ///
    /// For violations that pass deserialization but break protocol
    /// rules. Custom codecs also report their failures through this
    /// variant.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
