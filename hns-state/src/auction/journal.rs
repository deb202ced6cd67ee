//! Per-block change log for auction records.
//!
//! A [`Journal`] holds the forward operations applied to a record during one
//! block-processing pass, and the inverse operations that undo them. The
//! block driver persists `ops` with the record and keeps `undo` for
//! disconnecting the block; neither is part of the record itself.

use core2::io::{Read, Write};
use tracing::trace;

use super::op::Op;
use super::record::{AuctionRecord, Owner};
use crate::encoding::{read_vec, write_vec, CompactSize, WireSerde};
use crate::error::EncodingError;
use crate::types::{NameHash, Outpoint};
use crate::MAX_NAME_LEN;

/// Forward and inverse operations, grown in lockstep.
///
/// `undo[i]` inverts `ops[i]`. Applying `undo` in reverse order restores the
/// record as it was before the first operation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Journal {
    ops: Vec<Op>,
    undo: Vec<Op>,
}

impl Journal {
    /// Creates an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward operations, in application order.
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Inverse operations, paired index-for-index with [`Journal::ops`].
    pub fn undo(&self) -> &[Op] {
        &self.undo
    }

    /// Number of logged mutations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// True when nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Drops every logged operation.
    pub fn clear(&mut self) {
        self.ops.clear();
        self.undo.clear();
    }

    /// Moves the logged operations out, leaving this journal empty.
    pub fn take(&mut self) -> Journal {
        std::mem::take(self)
    }

    /// Splits into `(ops, undo)`.
    pub fn into_parts(self) -> (Vec<Op>, Vec<Op>) {
        (self.ops, self.undo)
    }

    /// Restores `record` to its state before the first logged operation.
    pub fn revert(&self, record: &mut AuctionRecord) {
        record.revert(&self.undo);
    }

    /// Re-applies the forward operations to `record`.
    pub fn replay(&self, record: &mut AuctionRecord) {
        record.replay(&self.ops);
    }

    fn push(&mut self, undo: Op, redo: Op) {
        trace!(op = ?redo.op_type(), "logging auction operation");
        self.undo.push(undo);
        self.ops.push(redo);
    }
}

/// Encoded as `CompactSize(n) | ops…` followed by `CompactSize(n) | undo…`.
impl WireSerde for Journal {
    fn encode<W: Write>(&self, w: &mut W) -> Result<(), EncodingError> {
        write_vec(&mut *w, &self.ops, |w, op| op.encode(w))?;
        write_vec(&mut *w, &self.undo, |w, op| op.encode(w))
    }

    fn decode<R: Read>(r: &mut R) -> Result<Self, EncodingError> {
        let ops = read_vec(&mut *r, |r| Op::decode(r))?;
        let undo = read_vec(&mut *r, |r| Op::decode(r))?;
        if ops.len() != undo.len() {
            return Err(EncodingError::NonCanonical("journal ops and undo differ in length"));
        }
        Ok(Journal { ops, undo })
    }

    fn encoded_len(&self) -> usize {
        let sum = |ops: &[Op]| -> usize {
            CompactSize::serialized_size(ops.len())
                + ops.iter().map(Op::encoded_len).sum::<usize>()
        };
        sum(&self.ops) + sum(&self.undo)
    }
}

impl AuctionRecord {
    /// Starts a logged mutation sequence against this record.
    ///
    /// The editor borrows both the record and the journal exclusively, so
    /// only one mutation sequence can be in flight per record.
    pub fn edit<'a>(&'a mut self, journal: &'a mut Journal) -> AuctionEditor<'a> {
        AuctionEditor {
            record: self,
            journal,
        }
    }
}

/// Mutation API over an [`AuctionRecord`].
///
/// Each mutator logs the inverse operation (carrying the old values) and the
/// forward operation (carrying the new values), then writes the new values.
/// No phase or legality checks are performed here.
pub struct AuctionEditor<'a> {
    record: &'a mut AuctionRecord,
    journal: &'a mut Journal,
}

impl AuctionEditor<'_> {
    /// The record being edited.
    pub fn record(&self) -> &AuctionRecord {
        &*self.record
    }

    /// The journal being written.
    pub fn journal(&self) -> &Journal {
        &*self.journal
    }

    /// Starts a new auction cycle for `name` at `height`.
    ///
    /// Attached data is cleared first as its own logged operation. The
    /// inverse `SetAuction` carries a full snapshot of the record before the
    /// reset; the forward one carries the record after it.
    pub fn set_auction(&mut self, name: impl Into<Vec<u8>>, height: u32) -> &mut Self {
        let name = name.into();
        debug_assert!(name.len() <= MAX_NAME_LEN, "name exceeds {MAX_NAME_LEN} bytes");

        if self.record.data.is_some() {
            self.set_data(None::<Vec<u8>>);
        }

        let before = Box::new(self.record.clone());

        let record = &mut *self.record;
        record.name_hash = NameHash::of(&name);
        record.name = name;
        record.owner = None;
        record.revoke = None;
        record.data = None;
        record.height = height;
        record.renewal = height;
        record.claimed = false;

        let after = Box::new(record.clone());
        self.journal
            .push(Op::SetAuction(before), Op::SetAuction(after));
        self
    }

    /// Replaces owner and value. An owner with a null outpoint clears both.
    pub fn set_owner(&mut self, owner: Option<Owner>) -> &mut Self {
        let owner = owner.filter(|owner| !owner.outpoint.is_null());
        self.journal
            .push(Op::SetOwner(self.record.owner), Op::SetOwner(owner));
        self.record.owner = owner;
        self
    }

    /// Replaces the revoke output. A null outpoint clears it.
    pub fn set_revoke(&mut self, revoke: Option<Outpoint>) -> &mut Self {
        let revoke = revoke.filter(|revoke| !revoke.is_null());
        self.journal
            .push(Op::SetRevoke(self.record.revoke), Op::SetRevoke(revoke));
        self.record.revoke = revoke;
        self
    }

    /// Replaces the attached resource data.
    pub fn set_data<D: Into<Vec<u8>>>(&mut self, data: Option<D>) -> &mut Self {
        let data: Option<Vec<u8>> = data.map(Into::into);
        self.journal.push(
            Op::SetData(self.record.data.clone()),
            Op::SetData(data.clone()),
        );
        self.record.data = data;
        self
    }

    /// Replaces the renewal height.
    pub fn set_renewal(&mut self, height: u32) -> &mut Self {
        self.journal
            .push(Op::SetRenewal(self.record.renewal), Op::SetRenewal(height));
        self.record.renewal = height;
        self
    }

    /// Replaces the claimed flag.
    pub fn set_claimed(&mut self, claimed: bool) -> &mut Self {
        self.journal
            .push(Op::SetClaimed(self.record.claimed), Op::SetClaimed(claimed));
        self.record.claimed = claimed;
        self
    }
}
