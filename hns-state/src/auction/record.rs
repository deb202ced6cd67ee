//! The persisted per-name auction record.
//!
//! Encoded Format (little-endian):
//!
//! ┌─ 1 ─┬─ len ─┬─ 1 ─┬──── 36 + 8 ────┬─ 1 ─┬── 36 ──┬─ 1 ─┬─ var ─┬─ 4 ──┬── 4 ───┬─ 1 ───┐
//! │ len │ name  │ own │ outpoint value │ rev │ outpt  │ dat │ bytes │ hght │ renew  │ claim │
//! └─────┴───────┴─────┴────────────────┴─────┴────────┴─────┴───────┴──────┴────────┴───────┘
//!
//! Bracketed payloads after a presence byte are only written when it is 1.
//! The name hash is never encoded; it is recomputed from the name.

use core2::io::{Read, Write};
use hns_common::ChainParams;

use super::op::Op;
use super::phase::AuctionPhase;
use crate::encoding::{
    read_bool, read_option, read_u32_le, read_u64_le, read_u8, read_var_bytes, var_bytes_size,
    write_bool, write_option, write_u32_le, write_u64_le, write_u8, write_var_bytes,
    FixedEncodedLen, WireSerde,
};
use crate::error::EncodingError;
use crate::types::{NameHash, Outpoint};
use crate::view::{CoinEntry, CoinView};
use crate::MAX_NAME_LEN;

/// The output controlling a name together with the value it locks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Owner {
    /// Controlling output.
    pub outpoint: Outpoint,
    /// Value committed by the owner.
    pub value: u64,
}

impl Owner {
    /// Creates an owner entry.
    pub fn new(outpoint: Outpoint, value: u64) -> Self {
        Self { outpoint, value }
    }
}

impl WireSerde for Owner {
    fn encode<W: Write>(&self, w: &mut W) -> Result<(), EncodingError> {
        self.outpoint.encode(w)?;
        Ok(write_u64_le(w, self.value)?)
    }

    fn decode<R: Read>(r: &mut R) -> Result<Self, EncodingError> {
        let outpoint = Outpoint::decode(r)?;
        let value = read_u64_le(r)?;
        Ok(Owner { outpoint, value })
    }

    fn encoded_len(&self) -> usize {
        Self::ENCODED_LEN
    }
}

/// Owner = 36-byte outpoint + 8-byte LE value.
impl FixedEncodedLen for Owner {
    const ENCODED_LEN: usize = Outpoint::ENCODED_LEN + 8;
}

/// Reads an optional owner. A null outpoint is never marked present.
pub(super) fn read_owner<R: Read>(r: &mut R) -> Result<Option<Owner>, EncodingError> {
    let owner = read_option(&mut *r, |r| Owner::decode(r))?;
    if owner.is_some_and(|owner| owner.outpoint.is_null()) {
        return Err(EncodingError::NonCanonical("null owner marked present"));
    }
    Ok(owner)
}

/// Reads an optional revoke output. A null outpoint is never marked present.
pub(super) fn read_revoke<R: Read>(r: &mut R) -> Result<Option<Outpoint>, EncodingError> {
    let revoke = read_option(&mut *r, |r| Outpoint::decode(r))?;
    if revoke.is_some_and(|revoke| revoke.is_null()) {
        return Err(EncodingError::NonCanonical("null revoke marked present"));
    }
    Ok(revoke)
}

/// Auction state for a single name.
///
/// Only persisted state lives here. Mutations go through
/// [`AuctionRecord::edit`], which logs every change into a separate
/// [`Journal`](super::Journal).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuctionRecord {
    pub(super) name: Vec<u8>,
    pub(super) name_hash: NameHash,
    pub(super) owner: Option<Owner>,
    pub(super) revoke: Option<Outpoint>,
    pub(super) data: Option<Vec<u8>>,
    pub(super) height: u32,
    pub(super) renewal: u32,
    pub(super) claimed: bool,
}

impl AuctionRecord {
    /// An empty record: no name, no owner, height zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw name bytes.
    pub fn name(&self) -> &[u8] {
        &self.name
    }

    /// Content hash of the name.
    pub fn name_hash(&self) -> &NameHash {
        &self.name_hash
    }

    /// Current owner, if any.
    pub fn owner(&self) -> Option<&Owner> {
        self.owner.as_ref()
    }

    /// Value locked by the owner; zero when unowned.
    pub fn value(&self) -> u64 {
        self.owner.map_or(0, |owner| owner.value)
    }

    /// Output used to revoke the name, if any.
    pub fn revoke(&self) -> Option<&Outpoint> {
        self.revoke.as_ref()
    }

    /// Attached resource data.
    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    /// Height at which the current cycle started.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Height of the most recent renewal.
    pub fn renewal(&self) -> u32 {
        self.renewal
    }

    /// True once the name is permanently claimed.
    pub fn claimed(&self) -> bool {
        self.claimed
    }

    /// True for a record that has never started an auction cycle.
    pub fn is_null(&self) -> bool {
        *self == AuctionRecord::default()
    }

    /* ────────────────────────────── phases ────────────────────────────── */

    /// Phase at chain height `height`.
    pub fn phase(&self, height: u32, params: &ChainParams) -> AuctionPhase {
        if self.claimed {
            return AuctionPhase::Closed;
        }

        // Widen so a cycle started near u32::MAX cannot wrap.
        let height = u64::from(height);
        let start = u64::from(self.height);

        if height < start + u64::from(params.bidding_period) {
            AuctionPhase::Bidding
        } else if height < start + u64::from(params.total_period()) {
            AuctionPhase::Reveal
        } else {
            AuctionPhase::Closed
        }
    }

    /// True while bids are accepted.
    pub fn is_bidding(&self, height: u32, params: &ChainParams) -> bool {
        self.phase(height, params) == AuctionPhase::Bidding
    }

    /// True while bids are revealed.
    pub fn is_reveal(&self, height: u32, params: &ChainParams) -> bool {
        self.phase(height, params) == AuctionPhase::Reveal
    }

    /// True once the cycle is over.
    pub fn is_closed(&self, height: u32, params: &ChainParams) -> bool {
        self.phase(height, params) == AuctionPhase::Closed
    }

    /// True when a closed name must restart from an empty cycle.
    ///
    /// That is the case when the renewal window has lapsed, or when the
    /// auction closed with neither an owner nor a revoke output. Always
    /// false outside [`AuctionPhase::Closed`].
    pub fn is_expired(&self, height: u32, params: &ChainParams) -> bool {
        if !self.is_closed(height, params) {
            return false;
        }

        if u64::from(height) >= u64::from(self.renewal) + u64::from(params.renewal_window) {
            return true;
        }

        self.owner.is_none() && self.revoke.is_none()
    }

    /// Anti-replay check for an output referenced by a covenant.
    ///
    /// Outputs the view does not know, and unconfirmed outputs, are local.
    /// Otherwise the output must not be confirmed before the current cycle
    /// started.
    pub fn is_local<V: CoinView + ?Sized>(&self, view: &V, outpoint: &Outpoint) -> bool {
        match view.get_entry(outpoint) {
            None | Some(CoinEntry { height: None, .. }) => true,
            Some(CoinEntry {
                height: Some(height),
                ..
            }) => height >= self.height,
        }
    }

    /* ───────────────────────────── replay ─────────────────────────────── */

    /// Applies a single operation without logging it.
    ///
    /// A `SetAuction` overwrites every field from its snapshot.
    pub fn apply(&mut self, op: &Op) {
        match op {
            Op::SetAuction(snapshot) => *self = (**snapshot).clone(),
            Op::SetOwner(owner) => self.owner = *owner,
            Op::SetRevoke(revoke) => self.revoke = *revoke,
            Op::SetData(data) => self.data = data.clone(),
            Op::SetRenewal(height) => self.renewal = *height,
            Op::SetClaimed(claimed) => self.claimed = *claimed,
        }
    }

    /// Applies undo operations in reverse order.
    pub fn revert(&mut self, undo: &[Op]) {
        for op in undo.iter().rev() {
            self.apply(op);
        }
    }

    /// Re-applies forward operations in order.
    pub fn replay(&mut self, ops: &[Op]) {
        for op in ops {
            self.apply(op);
        }
    }
}

impl WireSerde for AuctionRecord {
    fn encode<W: Write>(&self, w: &mut W) -> Result<(), EncodingError> {
        if self.name.len() > MAX_NAME_LEN {
            return Err(EncodingError::NameTooLong {
                len: self.name.len(),
            });
        }
        write_u8(&mut *w, self.name.len() as u8)?;
        w.write_all(&self.name)?;

        write_option(&mut *w, &self.owner, |w, owner| owner.encode(w))?;
        write_option(&mut *w, &self.revoke, |w, revoke| revoke.encode(w))?;
        write_option(&mut *w, &self.data, |w, data| Ok(write_var_bytes(w, data)?))?;

        write_u32_le(&mut *w, self.height)?;
        write_u32_le(&mut *w, self.renewal)?;
        Ok(write_bool(&mut *w, self.claimed)?)
    }

    fn decode<R: Read>(r: &mut R) -> Result<Self, EncodingError> {
        let name_len = read_u8(&mut *r)? as usize;
        let mut name = vec![0u8; name_len];
        r.read_exact(&mut name)?;

        let owner = read_owner(&mut *r)?;
        let revoke = read_revoke(&mut *r)?;
        let data = read_option(&mut *r, |r| Ok(read_var_bytes(r)?))?;

        let height = read_u32_le(&mut *r)?;
        let renewal = read_u32_le(&mut *r)?;
        let claimed = read_bool(&mut *r)?;

        Ok(AuctionRecord {
            name_hash: NameHash::of(&name),
            name,
            owner,
            revoke,
            data,
            height,
            renewal,
            claimed,
        })
    }

    fn encoded_len(&self) -> usize {
        let mut size = 1 + self.name.len();
        size += 1 + self.owner.map_or(0, |_| Owner::ENCODED_LEN);
        size += 1 + self.revoke.map_or(0, |_| Outpoint::ENCODED_LEN);
        size += 1 + self
            .data
            .as_ref()
            .map_or(0, |data| var_bytes_size(data.len()));
        size + 4 + 4 + 1
    }
}
