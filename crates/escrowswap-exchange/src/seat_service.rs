//! Capability contract between an exchange and its seat-allocation service.
//!
//! ## Message Flow
//!
//! ```text
//! EscrowExchange ──spawn / invite_to_place_offer / update_offers──▶ SeatService
//! SeatService    ──Sentry::notice_* ──▶ channel ──▶ EscrowExchange::handle_notice
//! ```
//!
//! The exchange never calls back into a party directly. It hands the service
//! a [`Sentry`] (the sending half of a typed channel) with every invite; the
//! service reports offers through it and the exchange consumes the notices
//! one at a time, in order.

use escrowswap_types::{
    EscrowError, ExchangeId, InviteId, Offer, OfferId, PoolId, Result, SeatStatus, UnitLabel,
};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// A notification from the seat service to an exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentryNotice {
    /// A party redeemed an invite and its escrow seat now exists.
    OfferEntered {
        offer_id: OfferId,
        description: Offer,
        status: SeatStatus,
    },
    /// A party asked to leave before the exchange completed.
    OfferExitRequested { offer_id: OfferId },
}

impl SentryNotice {
    #[must_use]
    pub fn offer_id(&self) -> OfferId {
        match self {
            Self::OfferEntered { offer_id, .. } | Self::OfferExitRequested { offer_id } => *offer_id,
        }
    }
}

/// The exchange's notice receiver capability, held by the seat service.
#[derive(Debug, Clone)]
pub struct Sentry {
    exchange: ExchangeId,
    tx: mpsc::UnboundedSender<SentryNotice>,
}

impl Sentry {
    /// Create a sentry and the receiver its notices arrive on.
    #[must_use]
    pub fn channel(exchange: ExchangeId) -> (Self, mpsc::UnboundedReceiver<SentryNotice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { exchange, tx }, rx)
    }

    /// The exchange this sentry reports to.
    #[must_use]
    pub fn exchange(&self) -> ExchangeId {
        self.exchange
    }

    /// # Errors
    /// [`EscrowError::ChannelClosed`] if the exchange is gone.
    pub fn notice_offer_entered(
        &self,
        offer_id: OfferId,
        description: Offer,
        status: SeatStatus,
    ) -> Result<()> {
        self.send(SentryNotice::OfferEntered {
            offer_id,
            description,
            status,
        })
    }

    /// # Errors
    /// [`EscrowError::ChannelClosed`] if the exchange is gone.
    pub fn notice_offer_exit_requested(&self, offer_id: OfferId) -> Result<()> {
        self.send(SentryNotice::OfferExitRequested { offer_id })
    }

    fn send(&self, notice: SentryNotice) -> Result<()> {
        self.tx.send(notice).map_err(|_| EscrowError::ChannelClosed)
    }
}

/// One-time-redeemable admission into an exchange as a specific side.
///
/// The handle itself is inert: the issuing service keeps the registry entry
/// and deletes it on the first successful redemption.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Invite {
    pub id: InviteId,
    pub pool: PoolId,
    pub offered_side: usize,
    pub needed_side: usize,
}

/// The seat-allocation service an exchange relies on.
///
/// Implementations are trusted to check offer safety before creating a seat
/// and conservation before applying [`SeatService::update_offers`]; the
/// exchange itself does neither.
pub trait SeatService {
    /// Create a pool of seats whose balances are indexed by `labels`.
    fn spawn(&mut self, labels: &[UnitLabel]) -> Result<PoolId>;

    /// Issue an invite for one side of `pool`; redemptions report to `sentry`.
    fn invite_to_place_offer(
        &mut self,
        pool: PoolId,
        sentry: Sentry,
        offered_side: usize,
        needed_side: usize,
    ) -> Result<Invite>;

    /// Replace the statuses of `offer_ids` and release those seats from the
    /// pool. Called once per teardown; empty slices must be accepted.
    fn update_offers(
        &mut self,
        pool: PoolId,
        offer_ids: &[OfferId],
        statuses: &[SeatStatus],
    ) -> Result<()>;
}
