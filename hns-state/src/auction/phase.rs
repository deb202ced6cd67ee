//! Auction lifecycle phases.

use std::fmt;

/// Phase of an auction cycle, derived purely from height and chain parameters.
///
/// Ordered: `Bidding < Reveal < Closed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum AuctionPhase {
    /// Sealed bids are accepted.
    Bidding = 0,
    /// Bids are revealed.
    Reveal = 1,
    /// The cycle is over; terminal until the next `set_auction`.
    Closed = 2,
}

impl AuctionPhase {
    /// Integer code used by the JSON projection.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Lowercase phase name.
    pub fn as_str(self) -> &'static str {
        match self {
            AuctionPhase::Bidding => "bidding",
            AuctionPhase::Reveal => "reveal",
            AuctionPhase::Closed => "closed",
        }
    }
}

impl fmt::Display for AuctionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
