//! Seat records held by the pool.
//!
//! A seat is created when an invite is redeemed and holds the party's escrow
//! until the exchange releases it. Once released, the holder may withdraw.
//!
//! ```text
//!   ┌────────┐  update_offers   ┌──────────┐  withdraw  ┌─────────┐
//!   │ POOLED ├─────────────────▶│ RELEASED ├───────────▶│ (gone)  │
//!   └────────┘                  └──────────┘            └─────────┘
//! ```

use chrono::{DateTime, Utc};
use escrowswap_exchange::Sentry;
use escrowswap_types::{Offer, OfferId, PoolId, SeatStatus};

/// Escrow bookkeeping for one party.
#[derive(Debug, Clone)]
pub struct Seat {
    pub(crate) offer_id: OfferId,
    pub(crate) pool: PoolId,
    pub(crate) offer: Offer,
    pub(crate) status: SeatStatus,
    pub(crate) pooled: bool,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) sentry: Sentry,
}

impl Seat {
    #[must_use]
    pub fn offer_id(&self) -> OfferId {
        self.offer_id
    }

    #[must_use]
    pub fn pool(&self) -> PoolId {
        self.pool
    }

    /// The terms the party entered with.
    #[must_use]
    pub fn offer(&self) -> &Offer {
        &self.offer
    }

    #[must_use]
    pub fn status(&self) -> &SeatStatus {
        &self.status
    }

    /// Is the seat still held by its exchange?
    #[must_use]
    pub fn is_pooled(&self) -> bool {
        self.pooled
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
