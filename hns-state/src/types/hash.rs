//! 32-byte hash types.

use blake2::{
    digest::{Update, VariableOutput},
    Blake2bVar,
};
use core2::io::{Read, Write};
use hex::{FromHex, ToHex};
use std::fmt;

use crate::encoding::{read_fixed_le, write_fixed_le, FixedEncodedLen, WireSerde};
use crate::error::EncodingError;

/// The canonical all-zero hash.
pub const ZERO_HASH: [u8; 32] = [0u8; 32];

/// Transaction hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TransactionHash(pub [u8; 32]);

impl TransactionHash {
    /// Return the hash bytes in big-endian byte-order suitable for printing out byte by byte.
    pub fn bytes_in_display_order(&self) -> [u8; 32] {
        let mut reversed_bytes = self.0;
        reversed_bytes.reverse();
        reversed_bytes
    }

    /// Convert bytes in big-endian byte-order into a [`self::TransactionHash`].
    pub fn from_bytes_in_display_order(bytes_in_display_order: &[u8; 32]) -> TransactionHash {
        let mut internal_byte_order = *bytes_in_display_order;
        internal_byte_order.reverse();

        TransactionHash(internal_byte_order)
    }

    /// True for the all-zero hash.
    pub fn is_zero(&self) -> bool {
        self.0 == ZERO_HASH
    }
}

impl fmt::Display for TransactionHash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.encode_hex::<String>())
    }
}

impl fmt::Debug for TransactionHash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "TransactionHash({})", self.encode_hex::<String>())
    }
}

impl ToHex for TransactionHash {
    fn encode_hex<T: FromIterator<char>>(&self) -> T {
        self.bytes_in_display_order().encode_hex()
    }

    fn encode_hex_upper<T: FromIterator<char>>(&self) -> T {
        self.bytes_in_display_order().encode_hex_upper()
    }
}

impl FromHex for TransactionHash {
    type Error = <[u8; 32] as FromHex>::Error;

    fn from_hex<T: AsRef<[u8]>>(hex: T) -> Result<Self, Self::Error> {
        let hash = <[u8; 32]>::from_hex(hex)?;

        Ok(Self::from_bytes_in_display_order(&hash))
    }
}

impl From<[u8; 32]> for TransactionHash {
    fn from(bytes: [u8; 32]) -> Self {
        TransactionHash(bytes)
    }
}

impl From<TransactionHash> for [u8; 32] {
    fn from(hash: TransactionHash) -> Self {
        hash.0
    }
}

impl WireSerde for TransactionHash {
    fn encode<W: Write>(&self, w: &mut W) -> Result<(), EncodingError> {
        Ok(write_fixed_le::<32, _>(w, &self.0)?)
    }

    fn decode<R: Read>(r: &mut R) -> Result<Self, EncodingError> {
        Ok(TransactionHash(read_fixed_le::<32, _>(r)?))
    }

    fn encoded_len(&self) -> usize {
        Self::ENCODED_LEN
    }
}

/// Hash = 32-byte body.
impl FixedEncodedLen for TransactionHash {
    const ENCODED_LEN: usize = 32;
}

/// Content hash of a name: BLAKE2b-256 over the raw name bytes.
///
/// Printed in natural byte order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NameHash(pub [u8; 32]);

impl NameHash {
    /// Hash carried by a record that has never started an auction cycle.
    pub const ZERO: NameHash = NameHash(ZERO_HASH);

    /// Hashes a name.
    ///
    /// The empty name belongs to a fresh record only and maps to
    /// [`NameHash::ZERO`].
    pub fn of(name: &[u8]) -> NameHash {
        if name.is_empty() {
            return NameHash::ZERO;
        }
        NameHash(blake2b256(name))
    }

    /// True for [`NameHash::ZERO`].
    pub fn is_zero(&self) -> bool {
        self.0 == ZERO_HASH
    }
}

/// Computes a BLAKE2b-256 digest.
pub(crate) fn blake2b256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2bVar::new(32).expect("32 is a valid BLAKE2b output size");
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher
        .finalize_variable(&mut output)
        .expect("output buffer matches the requested size");
    output
}

impl fmt::Display for NameHash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for NameHash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "NameHash({})", hex::encode(self.0))
    }
}

impl From<[u8; 32]> for NameHash {
    fn from(bytes: [u8; 32]) -> Self {
        NameHash(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn txid_hex_is_display_order() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0xab;
        let hash = TransactionHash(bytes);
        let hex: String = hash.encode_hex();
        assert!(hex.ends_with("ab"));
        assert_eq!(TransactionHash::from_hex(&hex).unwrap(), hash);
    }

    #[test]
    fn name_hash_is_blake2b_256() {
        // BLAKE2b-256("abc")
        assert_eq!(
            NameHash::of(b"abc").to_string(),
            "bddd813c634239723171ef3fee98579b94964e3bb1cb3e427262c8c068d52319"
        );
        assert_eq!(NameHash::of(b""), NameHash::ZERO);
        assert_ne!(NameHash::of(b"example"), NameHash::of(b"examplf"));
    }
}
