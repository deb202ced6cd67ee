//! One-way JSON projection of an auction record.

use hns_common::ChainParams;
use serde::Serialize;

use super::record::AuctionRecord;
use crate::types::OutpointJson;

/// Human-readable view of an [`AuctionRecord`] at a given height.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionJson {
    /// Name, lossily decoded as UTF-8.
    pub name: String,
    /// Name hash hex.
    pub name_hash: String,
    /// Phase code: 0 bidding, 1 reveal, 2 closed.
    pub state: u8,
    /// Owner outpoint.
    pub owner: Option<OutpointJson>,
    /// Value locked by the owner.
    pub value: u64,
    /// Revoke outpoint.
    pub revoke: Option<OutpointJson>,
    /// Resource data hex.
    pub data: Option<String>,
    /// Cycle start height.
    pub height: u32,
    /// Last renewal height.
    pub renewal: u32,
    /// Claimed flag.
    pub claimed: bool,
}

impl AuctionRecord {
    /// Projects the record for display, computing the phase at `height`.
    pub fn to_json(&self, height: u32, params: &ChainParams) -> AuctionJson {
        AuctionJson {
            name: String::from_utf8_lossy(self.name()).into_owned(),
            name_hash: self.name_hash().to_string(),
            state: self.phase(height, params).code(),
            owner: self.owner().map(|owner| owner.outpoint.to_json()),
            value: self.value(),
            revoke: self.revoke().map(|revoke| revoke.to_json()),
            data: self.data().map(hex::encode),
            height: self.height(),
            renewal: self.renewal(),
            claimed: self.claimed(),
        }
    }
}
