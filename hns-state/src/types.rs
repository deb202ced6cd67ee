//! Primitive types shared by the auction record and its operations.
//!
//! - Hashes: [`TransactionHash`], [`NameHash`] and the all-zero [`ZERO_HASH`].
//! - Output references: [`Outpoint`].
//!
//! These types store fundamental data only; they never wrap types from
//! other crates.

pub mod hash;
pub mod outpoint;

pub use hash::{NameHash, TransactionHash, ZERO_HASH};
pub use outpoint::{Outpoint, OutpointJson};
