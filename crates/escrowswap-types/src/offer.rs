//! Offer and seat-status types for the escrow exchange.
//!
//! A party joining an exchange declares what it puts at risk on one side
//! and what it wants on another ([`Offer`]). The escrow bookkeeping for that
//! party is a [`SeatStatus`]: one balance per side of the exchange.

use serde::{Deserialize, Serialize};

use crate::Amount;

/// What a party brings to the exchange and what it expects to leave with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    /// Side index whose unit the party pays in.
    pub offered_side: usize,
    /// Amount the party puts at risk.
    pub offered: Amount,
    /// Side index whose unit the party wants.
    pub needed_side: usize,
    /// Amount the party wants in return.
    pub needed: Amount,
}

/// The amounts a party submits when redeeming an invite. The invite fixes
/// the side indices; the proposal supplies the amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub offered: Amount,
    pub needed: Amount,
}

/// Current escrow balances of one seat, index-correlated with the
/// exchange's sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatStatus {
    pub balances: Vec<Amount>,
}

impl SeatStatus {
    #[must_use]
    pub fn new(balances: Vec<Amount>) -> Self {
        Self { balances }
    }

    /// Balance held on `side`, if the side exists.
    #[must_use]
    pub fn balance(&self, side: usize) -> Option<&Amount> {
        self.balances.get(side)
    }

    /// Number of sides this status covers.
    #[must_use]
    pub fn sides(&self) -> usize {
        self.balances.len()
    }
}
