//! Holds error types for the name-state crate.

/// Errors raised while encoding or decoding records and operations.
///
/// Every variant except [`EncodingError::UnknownOpType`] describes malformed
/// input: the caller rejects the enclosing block or transaction and moves on.
/// An unknown operation tag means stored data is corrupt or was written by an
/// incompatible version, and must not be skipped.
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    /// Truncated input or a failing reader / writer.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Bytes that violate the fixed layout.
    #[error("Non-canonical encoding: {0}")]
    NonCanonical(&'static str),

    /// Names are limited to a single length byte.
    #[error("Name length {len} exceeds {max} bytes", max = crate::MAX_NAME_LEN)]
    NameTooLong {
        /// Offending length.
        len: usize,
    },

    /// Operation type tag outside the known set.
    #[error("Unknown operation type {0}")]
    UnknownOpType(u8),
}

impl EncodingError {
    /// True for corruption that must halt processing rather than reject input.
    pub fn is_fatal(&self) -> bool {
        matches!(self, EncodingError::UnknownOpType(_))
    }
}
