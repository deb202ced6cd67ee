//! Auction state for a blockchain naming system.
//!
//! Models the per-name auction record, its height-driven phase machine, and a
//! reversible log of every mutation applied while processing a block, so a
//! disconnected block can be rolled back without re-deriving state. All
//! encodings are consensus data and byte-exact.
//!
//! This crate performs no I/O, validation of transactions, or locking; the
//! block-processing driver owns all of that.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod auction;
pub mod encoding;
pub mod error;
pub mod types;
pub mod view;

pub use auction::{
    AuctionEditor, AuctionJson, AuctionPhase, AuctionRecord, Journal, Op, OpType, Owner,
};
pub use encoding::{FixedEncodedLen, WireSerde};
pub use error::EncodingError;
pub use hns_common::ChainParams;
pub use types::{NameHash, Outpoint, OutpointJson, TransactionHash, ZERO_HASH};
pub use view::{CoinEntry, CoinView, MemoryCoinView};

/// Names are stored with a single length byte.
pub const MAX_NAME_LEN: usize = 255;
