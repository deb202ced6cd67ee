//! Read-only access to the unspent-output set.
//!
//! The auction record never owns a view: the block-processing driver controls
//! the view's lifetime and consistency snapshot and lends it per call.

use std::collections::HashMap;

use crate::types::Outpoint;

/// Coin metadata needed by the auction anti-replay check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoinEntry {
    /// Confirmation height, `None` while the coin is unconfirmed (mempool).
    pub height: Option<u32>,
    /// Output value.
    pub value: u64,
}

impl CoinEntry {
    /// A coin confirmed at `height`.
    pub fn confirmed(height: u32, value: u64) -> Self {
        Self {
            height: Some(height),
            value,
        }
    }

    /// A coin only seen in the mempool.
    pub fn unconfirmed(value: u64) -> Self {
        Self {
            height: None,
            value,
        }
    }
}

/// Lookup capability over the unspent-output set.
pub trait CoinView {
    /// Returns the entry for `outpoint`, if the view knows it.
    fn get_entry(&self, outpoint: &Outpoint) -> Option<CoinEntry>;
}

impl<T: CoinView + ?Sized> CoinView for &T {
    fn get_entry(&self, outpoint: &Outpoint) -> Option<CoinEntry> {
        (**self).get_entry(outpoint)
    }
}

/// In-memory [`CoinView`].
#[derive(Clone, Debug, Default)]
pub struct MemoryCoinView {
    coins: HashMap<Outpoint, CoinEntry>,
}

impl MemoryCoinView {
    /// Creates an empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a coin.
    pub fn insert(&mut self, outpoint: Outpoint, entry: CoinEntry) -> Option<CoinEntry> {
        self.coins.insert(outpoint, entry)
    }

    /// Removes a coin, e.g. once spent.
    pub fn remove(&mut self, outpoint: &Outpoint) -> Option<CoinEntry> {
        self.coins.remove(outpoint)
    }

    /// Number of coins held.
    pub fn len(&self) -> usize {
        self.coins.len()
    }

    /// True when no coins are held.
    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }
}

impl CoinView for MemoryCoinView {
    fn get_entry(&self, outpoint: &Outpoint) -> Option<CoinEntry> {
        self.coins.get(outpoint).copied()
    }
}

impl FromIterator<(Outpoint, CoinEntry)> for MemoryCoinView {
    fn from_iter<I: IntoIterator<Item = (Outpoint, CoinEntry)>>(iter: I) -> Self {
        Self {
            coins: iter.into_iter().collect(),
        }
    }
}
