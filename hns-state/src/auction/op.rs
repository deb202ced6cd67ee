//! Reversible auction operations.
//!
//! Encoded Format:
//!
//! ┌─ byte 0 ─┬──────────── payload depends on the tag ────────────┐
//! │  OpType  │                                                    │
//! └──────────┴────────────────────────────────────────────────────┘
//!
//! | tag | variant       | payload                                          |
//! |-----|---------------|--------------------------------------------------|
//! | 0   | `SetAuction`  | full [`AuctionRecord`] encoding                  |
//! | 1   | `SetOwner`    | presence byte, then outpoint (36) + u64 value    |
//! | 2   | `SetRevoke`   | presence byte, then outpoint (36)                |
//! | 3   | `SetData`     | presence byte, then CompactSize-prefixed bytes   |
//! | 4   | `SetRenewal`  | u32 height                                       |
//! | 5   | `SetClaimed`  | 0 / 1                                            |

use core2::io::{Read, Write};
use tracing::error;

use super::record::{read_owner, read_revoke, AuctionRecord, Owner};
use crate::encoding::{
    read_bool, read_option, read_u32_le, read_u8, read_var_bytes, var_bytes_size, write_bool,
    write_option, write_u32_le, write_u8, write_var_bytes, FixedEncodedLen, WireSerde,
};
use crate::error::EncodingError;
use crate::types::Outpoint;

/// Wire tag of an [`Op`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpType {
    /// Replace the whole record.
    SetAuction = 0,
    /// Replace owner and value.
    SetOwner = 1,
    /// Replace the revoke output.
    SetRevoke = 2,
    /// Replace the attached data.
    SetData = 3,
    /// Replace the renewal height.
    SetRenewal = 4,
    /// Replace the claimed flag.
    SetClaimed = 5,
}

impl TryFrom<u8> for OpType {
    type Error = EncodingError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(OpType::SetAuction),
            1 => Ok(OpType::SetOwner),
            2 => Ok(OpType::SetRevoke),
            3 => Ok(OpType::SetData),
            4 => Ok(OpType::SetRenewal),
            5 => Ok(OpType::SetClaimed),
            _ => Err(EncodingError::UnknownOpType(tag)),
        }
    }
}

/// A single auction mutation, carrying its own copy of the values written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Op {
    /// Overwrite every field from this snapshot.
    SetAuction(Box<AuctionRecord>),
    /// Owner and value; `None` leaves the name unowned.
    SetOwner(Option<Owner>),
    /// Revoke output.
    SetRevoke(Option<Outpoint>),
    /// Resource data.
    SetData(Option<Vec<u8>>),
    /// Renewal height.
    SetRenewal(u32),
    /// Claimed flag.
    SetClaimed(bool),
}

impl Op {
    /// The wire tag for this operation.
    pub fn op_type(&self) -> OpType {
        match self {
            Op::SetAuction(_) => OpType::SetAuction,
            Op::SetOwner(_) => OpType::SetOwner,
            Op::SetRevoke(_) => OpType::SetRevoke,
            Op::SetData(_) => OpType::SetData,
            Op::SetRenewal(_) => OpType::SetRenewal,
            Op::SetClaimed(_) => OpType::SetClaimed,
        }
    }
}

impl WireSerde for Op {
    fn encode<W: Write>(&self, w: &mut W) -> Result<(), EncodingError> {
        write_u8(&mut *w, self.op_type() as u8)?;

        match self {
            Op::SetAuction(record) => record.encode(w),
            Op::SetOwner(owner) => write_option(w, owner, |w, owner| owner.encode(w)),
            Op::SetRevoke(revoke) => write_option(w, revoke, |w, revoke| revoke.encode(w)),
            Op::SetData(data) => {
                write_option(w, data, |w, data| Ok(write_var_bytes(w, data)?))
            }
            Op::SetRenewal(height) => Ok(write_u32_le(w, *height)?),
            Op::SetClaimed(claimed) => Ok(write_bool(w, *claimed)?),
        }
    }

    fn decode<R: Read>(r: &mut R) -> Result<Self, EncodingError> {
        let tag = read_u8(&mut *r)?;
        let op_type = OpType::try_from(tag).inspect_err(|e| {
            error!("Refusing to decode auction operation: {e}");
        })?;

        Ok(match op_type {
            OpType::SetAuction => Op::SetAuction(Box::new(AuctionRecord::decode(r)?)),
            OpType::SetOwner => Op::SetOwner(read_owner(r)?),
            OpType::SetRevoke => Op::SetRevoke(read_revoke(r)?),
            OpType::SetData => Op::SetData(read_option(&mut *r, |r| Ok(read_var_bytes(r)?))?),
            OpType::SetRenewal => Op::SetRenewal(read_u32_le(&mut *r)?),
            OpType::SetClaimed => Op::SetClaimed(read_bool(&mut *r)?),
        })
    }

    fn encoded_len(&self) -> usize {
        1 + match self {
            Op::SetAuction(record) => record.encoded_len(),
            Op::SetOwner(owner) => 1 + owner.map_or(0, |_| Owner::ENCODED_LEN),
            Op::SetRevoke(revoke) => 1 + revoke.map_or(0, |_| Outpoint::ENCODED_LEN),
            Op::SetData(data) => 1 + data.as_ref().map_or(0, |d| var_bytes_size(d.len())),
            Op::SetRenewal(_) => 4,
            Op::SetClaimed(_) => 1,
        }
    }
}
