//! Holds traits and primitive functions for the name-state wire format.
//!
//! All fixed-width integers are little-endian. Variable-length byte strings
//! are prefixed with a bitcoin-style CompactSize.

use core::iter::FromIterator;
use core2::io::{self, Read, Write};

use crate::error::EncodingError;

/* ─────────────────────────── Wire Serialiser Traits ──────────────────────────── */

/// # Name-state wire format
///
/// Unlike versioned database records, the record and operation encodings are
/// consensus data: the bytes are fixed forever and carry no version tag.
///
/// ## Mandatory items per implementation
/// * `encode` – write the exact layout.
/// * `decode` – parse the exact layout, rejecting anything non-canonical.
/// * `encoded_len` – byte length `encode` will produce.
pub trait WireSerde: Sized {
    /// Writes the encoding of `self`.
    fn encode<W: Write>(&self, w: &mut W) -> Result<(), EncodingError>;

    /// Parses a value from the reader.
    fn decode<R: Read>(r: &mut R) -> Result<Self, EncodingError>;

    /// Number of bytes `encode` writes.
    fn encoded_len(&self) -> usize;

    /// Serialize into a `Vec<u8>`.
    #[inline]
    fn to_bytes(&self) -> Result<Vec<u8>, EncodingError> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.encode(&mut buf)?;
        Ok(buf)
    }

    /// Reconstruct from a `&[u8]`.
    #[inline]
    fn from_bytes(data: &[u8]) -> Result<Self, EncodingError> {
        let mut cursor = core2::io::Cursor::new(data);
        Self::decode(&mut cursor)
    }
}

/// Defines the fixed encoded length of a wire type.
pub trait FixedEncodedLen {
    /// The fixed encoded length in bytes.
    const ENCODED_LEN: usize;
}

/* ──────────────────────────── CompactSize helpers ────────────────────────────── */
/// A bitcoin-style CompactSize, a form of variable-length integer
pub struct CompactSize;

/// The largest value representable as a CompactSize
pub const MAX_COMPACT_SIZE: u32 = 0x0200_0000;

impl CompactSize {
    /// Reads an integer encoded in compact form.
    pub fn read<R: Read>(mut reader: R) -> io::Result<u64> {
        let mut flag_bytes = [0; 1];
        reader.read_exact(&mut flag_bytes)?;
        let flag = flag_bytes[0];

        let result = if flag < 253 {
            Ok(flag as u64)
        } else if flag == 253 {
            let mut bytes = [0; 2];
            reader.read_exact(&mut bytes)?;
            match u16::from_le_bytes(bytes) {
                n if n < 253 => Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "non-canonical CompactSize",
                )),
                n => Ok(n as u64),
            }
        } else if flag == 254 {
            let mut bytes = [0; 4];
            reader.read_exact(&mut bytes)?;
            match u32::from_le_bytes(bytes) {
                n if n < 0x10000 => Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "non-canonical CompactSize",
                )),
                n => Ok(n as u64),
            }
        } else {
            let mut bytes = [0; 8];
            reader.read_exact(&mut bytes)?;
            match u64::from_le_bytes(bytes) {
                n if n < 0x100000000 => Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "non-canonical CompactSize",
                )),
                n => Ok(n),
            }
        }?;

        match result {
            s if s > <u64>::from(MAX_COMPACT_SIZE) => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "CompactSize too large",
            )),
            s => Ok(s),
        }
    }

    /// Writes the provided `usize` value to the provided Writer in compact form.
    pub fn write<W: Write>(mut writer: W, size: usize) -> io::Result<()> {
        match size {
            s if s < 253 => writer.write_all(&[s as u8]),
            s if s <= 0xFFFF => {
                writer.write_all(&[253])?;
                writer.write_all(&(s as u16).to_le_bytes())
            }
            s if s <= 0xFFFFFFFF => {
                writer.write_all(&[254])?;
                writer.write_all(&(s as u32).to_le_bytes())
            }
            s => {
                writer.write_all(&[255])?;
                writer.write_all(&(s as u64).to_le_bytes())
            }
        }
    }

    /// Returns the number of bytes needed to encode the given size in compact form.
    pub fn serialized_size(size: usize) -> usize {
        match size {
            s if s < 253 => 1,
            s if s <= 0xFFFF => 3,
            s if s <= 0xFFFFFFFF => 5,
            _ => 9,
        }
    }
}

/* ───────────────────────────── integer helpers ───────────────────────────── */

/// Reads a u8.
#[inline]
pub fn read_u8<R: Read>(mut r: R) -> io::Result<u8> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

/// Writes a u8.
#[inline]
pub fn write_u8<W: Write>(mut w: W, v: u8) -> io::Result<()> {
    w.write_all(&[v])
}

/// Reads a u32 in LE format.
#[inline]
pub fn read_u32_le<R: Read>(mut r: R) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Writes a u32 in LE format.
#[inline]
pub fn write_u32_le<W: Write>(mut w: W, v: u32) -> io::Result<()> {
    w.write_all(&v.to_le_bytes())
}

/// Reads a u64 in LE format.
#[inline]
pub fn read_u64_le<R: Read>(mut r: R) -> io::Result<u64> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

/// Writes a u64 in LE format.
#[inline]
pub fn write_u64_le<W: Write>(mut w: W, v: u64) -> io::Result<()> {
    w.write_all(&v.to_le_bytes())
}

/// Reads a strict boolean byte: 0 = false, 1 = true.
pub fn read_bool<R: Read>(r: R) -> Result<bool, EncodingError> {
    match read_u8(r)? {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(EncodingError::NonCanonical("boolean byte")),
    }
}

/// Writes a boolean as a single 0/1 byte.
#[inline]
pub fn write_bool<W: Write>(w: W, v: bool) -> io::Result<()> {
    write_u8(w, v as u8)
}

/* ───────────────────────────── fixed-array helpers ───────────────────────── */

/// Read exactly `N` bytes **as-is**.
#[inline]
pub fn read_fixed_le<const N: usize, R: Read>(mut r: R) -> io::Result<[u8; N]> {
    let mut buf = [0u8; N];
    r.read_exact(&mut buf)?;
    Ok(buf)
}

/// Write an `[u8; N]` **as-is**.
#[inline]
pub fn write_fixed_le<const N: usize, W: Write>(mut w: W, bytes: &[u8; N]) -> io::Result<()> {
    w.write_all(bytes)
}

/* ─────────────────────────── byte-string helpers ─────────────────────────── */

/// Reads a CompactSize length prefix followed by that many bytes.
pub fn read_var_bytes<R: Read>(mut r: R) -> io::Result<Vec<u8>> {
    let len = CompactSize::read(&mut r)? as usize;
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf)?;
    Ok(buf)
}

/// Writes a CompactSize length prefix followed by the bytes.
pub fn write_var_bytes<W: Write>(mut w: W, bytes: &[u8]) -> io::Result<()> {
    CompactSize::write(&mut w, bytes.len())?;
    w.write_all(bytes)
}

/// Encoded size of a length-prefixed byte string.
#[inline]
pub fn var_bytes_size(len: usize) -> usize {
    CompactSize::serialized_size(len) + len
}

/* ─────────────────────────── Option<T> helpers ──────────────────────────── */

/// 0 = None, 1 = Some.
pub fn write_option<W, T, F>(mut w: W, value: &Option<T>, mut f: F) -> Result<(), EncodingError>
where
    W: Write,
    F: FnMut(&mut W, &T) -> Result<(), EncodingError>,
{
    match value {
        None => Ok(w.write_all(&[0])?),
        Some(val) => {
            w.write_all(&[1])?;
            f(&mut w, val)
        }
    }
}

/// Reads an option based on option tag byte.
pub fn read_option<R, T, F>(mut r: R, mut f: F) -> Result<Option<T>, EncodingError>
where
    R: Read,
    F: FnMut(&mut R) -> Result<T, EncodingError>,
{
    match read_u8(&mut r)? {
        0 => Ok(None),
        1 => f(&mut r).map(Some),
        _ => Err(EncodingError::NonCanonical("Option tag")),
    }
}

/* ──────────────────────────── Vec<T> helpers ────────────────────────────── */
/// Writes a vec of structs, preceded by number of items (compactsize).
pub fn write_vec<W, T, F>(mut w: W, vec: &[T], mut f: F) -> Result<(), EncodingError>
where
    W: Write,
    F: FnMut(&mut W, &T) -> Result<(), EncodingError>,
{
    CompactSize::write(&mut w, vec.len())?;
    for item in vec {
        f(&mut w, item)?
    }
    Ok(())
}

/// Reads a vec of structs, preceded by number of items (compactsize).
pub fn read_vec<R, T, F>(r: R, f: F) -> Result<Vec<T>, EncodingError>
where
    R: Read,
    F: FnMut(&mut R) -> Result<T, EncodingError>,
{
    read_vec_into(r, f)
}

/// Same as `read_vec` but collects straight into any container that
/// implements `FromIterator`.
pub fn read_vec_into<R, T, C, F>(mut r: R, mut f: F) -> Result<C, EncodingError>
where
    R: Read,
    F: FnMut(&mut R) -> Result<T, EncodingError>,
    C: FromIterator<T>,
{
    let len = CompactSize::read(&mut r)? as usize;
    (0..len).map(|_| f(&mut r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_size_boundaries() {
        for (n, len) in [(0usize, 1usize), (252, 1), (253, 3), (0xFFFF, 3), (0x10000, 5)] {
            let mut buf = Vec::new();
            CompactSize::write(&mut buf, n).unwrap();
            assert_eq!(buf.len(), len);
            assert_eq!(CompactSize::serialized_size(n), len);
            assert_eq!(CompactSize::read(&buf[..]).unwrap(), n as u64);
        }
    }

    #[test]
    fn compact_size_rejects_non_canonical() {
        // 252 encoded with the 3-byte form.
        assert!(CompactSize::read(&[253u8, 252, 0][..]).is_err());
        // Exceeds MAX_COMPACT_SIZE.
        assert!(CompactSize::read(&[254u8, 0, 0, 0, 0x03][..]).is_err());
    }

    #[test]
    fn var_bytes_truncated() {
        let mut buf = Vec::new();
        write_var_bytes(&mut buf, b"resource").unwrap();
        assert_eq!(buf.len(), var_bytes_size(8));
        buf.pop();
        assert!(read_var_bytes(&buf[..]).is_err());
    }

    #[test]
    fn option_rejects_bad_tag() {
        let result = read_option(&[2u8][..], |r| Ok(read_u8(r)?));
        assert!(matches!(result, Err(EncodingError::NonCanonical(_))));
    }

    #[test]
    fn bool_is_strict() {
        assert!(read_bool(&[1u8][..]).unwrap());
        assert!(!read_bool(&[0u8][..]).unwrap());
        assert!(read_bool(&[7u8][..]).is_err());
    }

    #[test]
    fn vec_round_trip() {
        let mut buf = Vec::new();
        write_vec(&mut buf, &[1u32, 2, 3], |w, v| Ok(write_u32_le(w, *v)?)).unwrap();
        let out: Vec<u32> = read_vec(&buf[..], |r| Ok(read_u32_le(r)?)).unwrap();
        assert_eq!(out, vec![1, 2, 3]);
    }
}
