//! Transaction output references.

use core2::io::{Read, Write};
use hex::ToHex;
use serde::Serialize;
use std::fmt;

use super::hash::TransactionHash;
use crate::encoding::{read_u32_le, write_u32_le, FixedEncodedLen, WireSerde};
use crate::error::EncodingError;

/// Reference to a specific transaction output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Outpoint {
    /// Transaction ID holding the output.
    txid: TransactionHash,
    /// Index of that output in the transaction.
    index: u32,
}

impl Outpoint {
    /// The null outpoint: zero txid, index `u32::MAX`.
    pub const NULL: Outpoint = Outpoint {
        txid: TransactionHash([0u8; 32]),
        index: u32::MAX,
    };

    /// Construct a new outpoint.
    pub fn new(txid: impl Into<TransactionHash>, index: u32) -> Self {
        Self {
            txid: txid.into(),
            index,
        }
    }

    /// Returns the txid of the referenced transaction.
    pub fn txid(&self) -> &TransactionHash {
        &self.txid
    }

    /// Returns the output index within the transaction.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// True for [`Outpoint::NULL`].
    pub fn is_null(&self) -> bool {
        self.txid.is_zero() && self.index == u32::MAX
    }

    /// JSON projection.
    pub fn to_json(&self) -> OutpointJson {
        OutpointJson {
            hash: self.txid.encode_hex(),
            index: self.index,
        }
    }
}

impl Default for Outpoint {
    fn default() -> Self {
        Outpoint::NULL
    }
}

impl fmt::Display for Outpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.txid, self.index)
    }
}

impl WireSerde for Outpoint {
    fn encode<W: Write>(&self, w: &mut W) -> Result<(), EncodingError> {
        self.txid.encode(w)?;
        Ok(write_u32_le(w, self.index)?)
    }

    fn decode<R: Read>(r: &mut R) -> Result<Self, EncodingError> {
        let txid = TransactionHash::decode(r)?;
        let index = read_u32_le(r)?;
        Ok(Outpoint::new(txid, index))
    }

    fn encoded_len(&self) -> usize {
        Self::ENCODED_LEN
    }
}

/// Outpoint = 32‐byte txid + 4-byte LE u32 index = 36 bytes
impl FixedEncodedLen for Outpoint {
    /// 32 byte txid + 4 byte output index.
    const ENCODED_LEN: usize = 32 + 4;
}

/// JSON view of an [`Outpoint`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OutpointJson {
    /// Txid hex, display order.
    pub hash: String,
    /// Output index.
    pub index: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_to_36_bytes() {
        let outpoint = Outpoint::new([7u8; 32], 3);
        let bytes = outpoint.to_bytes().unwrap();
        assert_eq!(bytes.len(), Outpoint::ENCODED_LEN);
        assert_eq!(&bytes[32..], &[3, 0, 0, 0]);
        assert_eq!(Outpoint::from_bytes(&bytes).unwrap(), outpoint);
    }

    #[test]
    fn null_outpoint() {
        assert!(Outpoint::NULL.is_null());
        assert!(Outpoint::default().is_null());
        assert!(!Outpoint::new([0u8; 32], 0).is_null());
        let json = Outpoint::NULL.to_json();
        assert_eq!(json.hash, "0".repeat(64));
        assert_eq!(json.index, u32::MAX);
    }

    #[test]
    fn truncated_outpoint_is_rejected() {
        let bytes = Outpoint::new([1u8; 32], 9).to_bytes().unwrap();
        assert!(matches!(
            Outpoint::from_bytes(&bytes[..35]),
            Err(EncodingError::Io(_))
        ));
    }
}
