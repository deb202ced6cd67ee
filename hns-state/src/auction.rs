//! Per-name auction state and its reversible mutation log.
//!
//! Components:
//! - [`AuctionRecord`]: persisted state for one name, the phase machine and
//!   the wire encoding.
//! - [`Op`]: a single tagged mutation with its own wire encoding.
//! - [`Journal`] / [`AuctionEditor`]: the transient per-block log of forward
//!   and inverse operations, and the mutation API that writes it.
//!
//! The record is a pure state container: callers validate that a mutation is
//! legal for the current phase before invoking it.

pub mod journal;
pub mod json;
pub mod op;
pub mod phase;
pub mod record;

pub use journal::{AuctionEditor, Journal};
pub use json::AuctionJson;
pub use op::{Op, OpType};
pub use phase::AuctionPhase;
pub use record::{AuctionRecord, Owner};
