//! In-memory seat-allocation service.
//!
//! [`SeatPool`] is the trusted collaborator behind an
//! [`EscrowExchange`](escrowswap_exchange::EscrowExchange):
//! 1. `spawn` groups seats for one exchange under a [`PoolId`]
//! 2. `invite_to_place_offer` issues invites into a registry it alone owns
//! 3. `redeem` consumes an invite, checks offer safety, creates a seat, and
//!    reports it through the exchange's sentry
//! 4. `update_offers` checks conservation, applies the exchange's new
//!    statuses, and releases every seat of the pool
//! 5. `withdraw` pays a released seat out to its holder
//!
//! A pool lives for one teardown: after its first `update_offers` it is
//! closed, outstanding invites are discarded, and stragglers are refunded.
//! Once its last seat is withdrawn the pool is forgotten; empty updates
//! for a closed or forgotten pool are accepted as no-ops.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use escrowswap_assay::{Assay, AssayRegistry, offer_safe, verify_conserved, verify_offers_safe};
use escrowswap_exchange::{Invite, SeatService, Sentry};
use escrowswap_types::{
    Amount, EscrowError, InviteId, Offer, OfferId, PoolId, Proposal, Result, SeatPoolConfig,
    SeatStatus, UnitLabel,
};

use crate::seat::Seat;

/// Seats spawned for one exchange.
#[derive(Debug)]
struct Pool {
    assays: Vec<Assay>,
    open: bool,
    members: Vec<OfferId>,
}

/// Registry entry behind an [`Invite`] handle.
#[derive(Debug)]
struct PendingInvite {
    pool: PoolId,
    sentry: Sentry,
    offered_side: usize,
    needed_side: usize,
}

/// Seat-allocation service holding every pool, invite, and seat in memory.
#[derive(Debug)]
pub struct SeatPool {
    registry: AssayRegistry,
    config: SeatPoolConfig,
    pools: HashMap<PoolId, Pool>,
    invites: HashMap<InviteId, PendingInvite>,
    seats: HashMap<OfferId, Seat>,
}

impl SeatPool {
    /// Create a seat pool that resolves units through `registry`.
    #[must_use]
    pub fn new(registry: AssayRegistry) -> Self {
        Self::with_config(registry, SeatPoolConfig::default())
    }

    #[must_use]
    pub fn with_config(registry: AssayRegistry, config: SeatPoolConfig) -> Self {
        Self {
            registry,
            config,
            pools: HashMap::new(),
            invites: HashMap::new(),
            seats: HashMap::new(),
        }
    }

    /// Redeem an invite: escrow `payment` and enter `proposal` as an offer.
    ///
    /// The invite fixes which sides the party pays and wants; the proposal
    /// supplies the amounts. On success the invite is gone for good, a
    /// pooled seat exists, and the exchange has been notified.
    ///
    /// # Errors
    /// - `InviteNotFound` if the invite was never issued or already redeemed
    /// - `PoolClosed` if the exchange has already torn down
    /// - `MismatchedUnit` / `InvalidExtent` if the amounts don't fit the sides
    /// - `OfferUnsafe` if `payment` does not cover `proposal.offered`
    /// - `ChannelClosed` if the exchange is gone
    ///
    /// On any error the invite stays redeemable and nothing is escrowed.
    pub fn redeem(&mut self, invite: &Invite, proposal: Proposal, payment: Amount) -> Result<OfferId> {
        let pending = self
            .invites
            .remove(&invite.id)
            .ok_or(EscrowError::InviteNotFound(invite.id))?;

        let offer_id = OfferId::new();
        let entered = self
            .prepare_seat(&pending, &proposal, &payment)
            .and_then(|(offer, status)| {
                pending
                    .sentry
                    .notice_offer_entered(offer_id, offer.clone(), status.clone())?;
                Ok((offer, status))
            });
        let (offer, status) = match entered {
            Ok(seat) => seat,
            Err(err) => {
                self.invites.insert(invite.id, pending);
                return Err(err);
            }
        };

        if let Some(pool) = self.pools.get_mut(&pending.pool) {
            pool.members.push(offer_id);
        }
        tracing::info!(
            offer = %offer_id,
            pool = %pending.pool,
            side = pending.offered_side,
            paid = %offer.offered,
            wants = %offer.needed,
            "Seat created"
        );
        self.seats.insert(
            offer_id,
            Seat {
                offer_id,
                pool: pending.pool,
                offer,
                status,
                pooled: true,
                created_at: Utc::now(),
                sentry: pending.sentry,
            },
        );
        Ok(offer_id)
    }

    fn prepare_seat(
        &self,
        pending: &PendingInvite,
        proposal: &Proposal,
        payment: &Amount,
    ) -> Result<(Offer, SeatStatus)> {
        let pool = self.open_pool(pending.pool)?;
        let offered_assay = &pool.assays[pending.offered_side];
        let needed_assay = &pool.assays[pending.needed_side];

        let offer = Offer {
            offered_side: pending.offered_side,
            offered: offered_assay.coerce(&proposal.offered)?,
            needed_side: pending.needed_side,
            needed: needed_assay.coerce(&proposal.needed)?,
        };
        let mut balances: Vec<Amount> = pool.assays.iter().map(Assay::empty).collect();
        balances[pending.offered_side] = offered_assay.coerce(payment)?;
        let status = SeatStatus::new(balances);

        if !offer_safe(&pool.assays, &offer, &status)? {
            return Err(EscrowError::OfferUnsafe {
                reason: format!("payment {payment} does not cover offered {}", offer.offered),
            });
        }
        Ok((offer, status))
    }

    /// Ask the seat's exchange to end early. The exchange decides what
    /// happens; this only forwards the request.
    ///
    /// # Errors
    /// `SeatNotFound`, `SeatNotPooled` once released, or `ChannelClosed`.
    pub fn request_exit(&self, offer_id: OfferId) -> Result<()> {
        let seat = self.seat(offer_id)?;
        if !seat.pooled {
            return Err(EscrowError::SeatNotPooled(offer_id));
        }
        tracing::debug!(offer = %offer_id, "Exit requested");
        seat.sentry.notice_offer_exit_requested(offer_id)
    }

    /// Pay out a released seat and forget it.
    ///
    /// # Errors
    /// `SeatNotFound`, or `SeatStillPooled` while the exchange holds it.
    pub fn withdraw(&mut self, offer_id: OfferId) -> Result<SeatStatus> {
        if self.seat(offer_id)?.pooled {
            return Err(EscrowError::SeatStillPooled(offer_id));
        }
        let seat = self
            .seats
            .remove(&offer_id)
            .ok_or(EscrowError::SeatNotFound(offer_id))?;
        let retired = self.pools.get_mut(&seat.pool).is_some_and(|pool| {
            pool.members.retain(|id| *id != offer_id);
            !pool.open && pool.members.is_empty()
        });
        tracing::info!(offer = %offer_id, pool = %seat.pool, "Seat withdrawn");
        if retired {
            self.pools.remove(&seat.pool);
            tracing::debug!(pool = %seat.pool, "Pool retired");
        }
        Ok(seat.status)
    }

    pub fn seat(&self, offer_id: OfferId) -> Result<&Seat> {
        self.seats
            .get(&offer_id)
            .ok_or(EscrowError::SeatNotFound(offer_id))
    }

    pub fn seat_status(&self, offer_id: OfferId) -> Result<&SeatStatus> {
        Ok(self.seat(offer_id)?.status())
    }

    pub fn is_pooled(&self, offer_id: OfferId) -> Result<bool> {
        Ok(self.seat(offer_id)?.is_pooled())
    }

    pub fn is_pool_open(&self, pool: PoolId) -> Result<bool> {
        self.pools
            .get(&pool)
            .map(|p| p.open)
            .ok_or(EscrowError::PoolNotFound(pool))
    }

    /// Number of seats of `pool` not yet withdrawn.
    #[must_use]
    pub fn seat_count(&self, pool: PoolId) -> usize {
        self.pools.get(&pool).map_or(0, |p| p.members.len())
    }

    /// Number of invites issued and not yet redeemed or discarded.
    #[must_use]
    pub fn pending_invites(&self) -> usize {
        self.invites.len()
    }

    /// The assay registry this pool resolves units through.
    #[must_use]
    pub fn registry(&self) -> &AssayRegistry {
        &self.registry
    }

    fn pool(&self, pool: PoolId) -> Result<&Pool> {
        self.pools.get(&pool).ok_or(EscrowError::PoolNotFound(pool))
    }

    fn open_pool(&self, pool: PoolId) -> Result<&Pool> {
        let p = self.pool(pool)?;
        if p.open {
            Ok(p)
        } else {
            Err(EscrowError::PoolClosed(pool))
        }
    }

    /// Collect the current offers and statuses of `offer_ids`, checking each
    /// is a pooled seat of `pool` listed once.
    fn pooled_members(
        &self,
        pool: PoolId,
        offer_ids: &[OfferId],
    ) -> Result<(Vec<Offer>, Vec<SeatStatus>)> {
        let mut seen = HashSet::with_capacity(offer_ids.len());
        let mut offers = Vec::with_capacity(offer_ids.len());
        let mut statuses = Vec::with_capacity(offer_ids.len());
        for id in offer_ids {
            let seat = self.seat(*id)?;
            if seat.pool != pool {
                return Err(EscrowError::SeatNotFound(*id));
            }
            if !seat.pooled {
                return Err(EscrowError::SeatNotPooled(*id));
            }
            if !seen.insert(*id) {
                return Err(EscrowError::Internal(format!("{id} listed twice in one update")));
            }
            offers.push(seat.offer.clone());
            statuses.push(seat.status.clone());
        }
        Ok((offers, statuses))
    }

    fn close_pool(&mut self, pool_id: PoolId) {
        let Some(pool) = self.pools.get_mut(&pool_id) else {
            return;
        };
        pool.open = false;

        let mut refunded = 0usize;
        for id in &pool.members {
            let Some(seat) = self.seats.get_mut(id) else {
                continue;
            };
            if seat.pooled {
                seat.pooled = false;
                refunded += 1;
            }
        }
        let before = self.invites.len();
        self.invites.retain(|_, inv| inv.pool != pool_id);
        let discarded = before - self.invites.len();

        if refunded > 0 {
            tracing::warn!(
                pool = %pool_id,
                refunded,
                "Unlisted seats released unchanged at pool close"
            );
        }
        tracing::info!(pool = %pool_id, discarded_invites = discarded, "Pool closed");
    }
}

impl SeatService for SeatPool {
    fn spawn(&mut self, labels: &[UnitLabel]) -> Result<PoolId> {
        let assays = self.registry.assays_for(labels)?;
        let pool_id = PoolId::new();
        tracing::info!(pool = %pool_id, sides = assays.len(), "Pool spawned");
        self.pools.insert(
            pool_id,
            Pool {
                assays,
                open: true,
                members: Vec::new(),
            },
        );
        Ok(pool_id)
    }

    fn invite_to_place_offer(
        &mut self,
        pool: PoolId,
        sentry: Sentry,
        offered_side: usize,
        needed_side: usize,
    ) -> Result<Invite> {
        let sides = self.open_pool(pool)?.assays.len();
        for index in [offered_side, needed_side] {
            if index >= sides {
                return Err(EscrowError::SideOutOfRange { index, sides });
            }
        }

        let id = InviteId::new();
        self.invites.insert(
            id,
            PendingInvite {
                pool,
                sentry,
                offered_side,
                needed_side,
            },
        );
        tracing::debug!(invite = %id, pool = %pool, offered_side, needed_side, "Invite issued");
        Ok(Invite {
            id,
            pool,
            offered_side,
            needed_side,
        })
    }

    fn update_offers(
        &mut self,
        pool: PoolId,
        offer_ids: &[OfferId],
        statuses: &[SeatStatus],
    ) -> Result<()> {
        if offer_ids.is_empty() && statuses.is_empty() && !self.pool(pool).is_ok_and(|p| p.open) {
            tracing::debug!(pool = %pool, "Empty update on closed pool");
            return Ok(());
        }
        let assays = self.pool(pool)?.assays.clone();
        if offer_ids.len() != statuses.len() {
            return Err(EscrowError::LengthMismatch {
                what: "statuses",
                expected: offer_ids.len(),
                actual: statuses.len(),
            });
        }

        let (offers, old) = self.pooled_members(pool, offer_ids)?;
        if self.config.verify_conservation {
            verify_conserved(&assays, &old, statuses)?;
            verify_offers_safe(&assays, &offers, statuses)?;
        }

        for (id, status) in offer_ids.iter().zip(statuses) {
            if let Some(seat) = self.seats.get_mut(id) {
                seat.status = status.clone();
                seat.pooled = false;
            }
        }
        tracing::info!(pool = %pool, updated = offer_ids.len(), "Offers updated");
        self.close_pool(pool);
        Ok(())
    }
}
