//! Escrow exchange: N-sided atomic swap over escrowed seats.
//!
//! ## Lifecycle
//!
//! ```text
//!   Awaiting(0) ──offer──▶ Awaiting(1) ──offer──▶ … ──last offer──▶ Closed
//!        │                      │                                    ▲
//!        └──────────────── exit requested ───────────────────────────┘
//! ```
//!
//! 1. [`EscrowExchange::open`] derives one assay per side from the needed
//!    amounts, spawns a seat pool, and issues one invite per side. Side `i`
//!    pays in unit `i` and wants unit `i + 1` (mod N).
//! 2. Each redemption arrives as a [`SentryNotice::OfferEntered`] and is
//!    recorded against its side.
//! 3. When every side has reported, side `i` receives the escrowed status of
//!    side `i + 1`; for two sides this is a full swap. The new statuses go to
//!    the seat service and the exchange closes.
//! 4. An exit request before that point closes the exchange with every
//!    recorded status returned unchanged.
//!
//! Shutdown may run any number of times. Once closed, the recorded set is
//! empty, so a late or duplicate notice produces an empty update.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use escrowswap_assay::{Assay, AssayRegistry};
use escrowswap_types::{
    Amount, EscrowError, ExchangeConfig, ExchangeId, Offer, OfferId, PoolId, Result, SeatStatus,
    UnitLabel, constants,
};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::{
    seat_service::{Invite, SeatService, Sentry, SentryNotice},
    state_machine::StateMachine,
};

/// Exchange lifecycle state. `Awaiting(k)` means `k` sides have reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExchangeState {
    Awaiting(usize),
    Closed,
}

impl std::fmt::Display for ExchangeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Awaiting(0) => write!(f, "awaiting-first-offer"),
            Self::Awaiting(1) => write!(f, "awaiting-second-offer"),
            Self::Awaiting(k) => write!(f, "awaiting-offer-{}", k + 1),
            Self::Closed => write!(f, "closed"),
        }
    }
}

impl ExchangeState {
    /// Transition table for an exchange with `sides` sides.
    ///
    /// Every awaiting state may close (exit requested); each may also advance
    /// to the next count except the last, which can only close.
    #[must_use]
    pub fn table(sides: usize) -> Vec<(Self, Vec<Self>)> {
        let mut table: Vec<(Self, Vec<Self>)> = (0..sides)
            .map(|k| {
                let mut next = vec![Self::Closed];
                if k + 1 < sides {
                    next.push(Self::Awaiting(k + 1));
                }
                (Self::Awaiting(k), next)
            })
            .collect();
        table.push((Self::Closed, Vec::new()));
        table
    }
}

/// One side's report, as held by the exchange until teardown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedOffer {
    pub offer_id: OfferId,
    pub description: Offer,
    pub status: SeatStatus,
    pub entered_at: DateTime<Utc>,
}

/// An escrow exchange instance. Owns its recorded offers and its notice
/// receiver; nothing else holds a reference to either.
#[derive(Debug)]
pub struct EscrowExchange {
    id: ExchangeId,
    pool: PoolId,
    assays: Vec<Assay>,
    needed: Vec<Amount>,
    state: StateMachine<ExchangeState>,
    /// Recorded offers keyed by offered side.
    offers: BTreeMap<usize, RecordedOffer>,
    notices: mpsc::UnboundedReceiver<SentryNotice>,
}

impl EscrowExchange {
    /// Open an exchange needing `needed[i]` from side `i`.
    ///
    /// Each amount's label becomes side `i`'s unit. The extents are kept as
    /// advertised terms ([`needed`](Self::needed)) and are not enforced.
    ///
    /// Returns the exchange and one invite per side, in side order.
    ///
    /// # Errors
    /// - `Configuration` if the side count is outside `2..=config.max_sides`
    /// - `UnknownUnit` if a needed amount's label is not installed
    /// - `InvalidExtent` / `MismatchedUnit` if a needed amount is malformed
    /// - whatever the seat service returns from `spawn` or
    ///   `invite_to_place_offer`
    pub fn open<S>(
        needed: Vec<Amount>,
        registry: &AssayRegistry,
        service: &mut S,
        config: &ExchangeConfig,
    ) -> Result<(Self, Vec<Invite>)>
    where
        S: SeatService + ?Sized,
    {
        let sides = needed.len();
        if !(constants::MIN_SIDES..=config.max_sides).contains(&sides) {
            return Err(EscrowError::Configuration(format!(
                "an exchange needs between {} and {} sides, got {sides}",
                constants::MIN_SIDES,
                config.max_sides
            )));
        }

        let assays = registry.assays_for(needed.iter().map(|a| &a.label))?;
        let needed = assays
            .iter()
            .zip(&needed)
            .map(|(assay, amount)| assay.coerce(amount))
            .collect::<Result<Vec<_>>>()?;
        let labels: Vec<UnitLabel> = assays.iter().map(|a| a.label().clone()).collect();

        let id = ExchangeId::new();
        let pool = service.spawn(&labels)?;
        let (sentry, notices) = Sentry::channel(id);
        let invites = (0..sides)
            .map(|side| service.invite_to_place_offer(pool, sentry.clone(), side, (side + 1) % sides))
            .collect::<Result<Vec<_>>>()?;

        let state = StateMachine::new(ExchangeState::Awaiting(0), ExchangeState::table(sides))?;

        tracing::info!(
            exchange = %id,
            pool = %pool,
            sides,
            engine = constants::ENGINE_NAME,
            version = constants::VERSION,
            "Escrow exchange opened"
        );

        Ok((
            Self {
                id,
                pool,
                assays,
                needed,
                state,
                offers: BTreeMap::new(),
                notices,
            },
            invites,
        ))
    }

    /// Process a single notice.
    ///
    /// # Errors
    /// Any error aborts this notice only; state is left as it was before the
    /// failing step.
    pub fn handle_notice<S>(&mut self, notice: SentryNotice, service: &mut S) -> Result<()>
    where
        S: SeatService + ?Sized,
    {
        match notice {
            SentryNotice::OfferEntered {
                offer_id,
                description,
                status,
            } => self.offer_entered(offer_id, description, status, service),
            SentryNotice::OfferExitRequested { offer_id } => {
                if !self.is_closed() && !self.offers.values().any(|r| r.offer_id == offer_id) {
                    tracing::warn!(
                        exchange = %self.id,
                        offer = %offer_id,
                        "Exit requested by unrecorded offer; closing anyway"
                    );
                }
                self.shutdown(false, service)
            }
        }
    }

    fn offer_entered<S>(
        &mut self,
        offer_id: OfferId,
        description: Offer,
        status: SeatStatus,
        service: &mut S,
    ) -> Result<()>
    where
        S: SeatService + ?Sized,
    {
        if self.is_closed() {
            tracing::warn!(
                exchange = %self.id,
                offer = %offer_id,
                "Offer entered after close; re-running shutdown"
            );
            return self.shutdown(false, service);
        }

        let side = description.offered_side;
        let sides = self.sides();
        if side >= sides {
            return Err(EscrowError::SideOutOfRange { index: side, sides });
        }
        if status.sides() != sides {
            return Err(EscrowError::LengthMismatch {
                what: "seat balances",
                expected: sides,
                actual: status.sides(),
            });
        }
        if let Some(existing) = self.offers.get(&side) {
            return Err(EscrowError::DuplicateOffer {
                side,
                existing: existing.offer_id,
            });
        }

        let received = self.offers.len() + 1;
        if received < sides {
            self.state.transition_to(ExchangeState::Awaiting(received))?;
        }
        self.offers.insert(
            side,
            RecordedOffer {
                offer_id,
                description,
                status,
                entered_at: Utc::now(),
            },
        );
        tracing::debug!(
            exchange = %self.id,
            offer = %offer_id,
            side,
            received,
            "Offer recorded"
        );

        if received == sides {
            if let Err(err) = self.shutdown(true, service) {
                // The completing offer is not kept; the exchange stays at
                // Awaiting(sides - 1) with the earlier offers intact.
                self.offers.remove(&side);
                tracing::warn!(
                    exchange = %self.id,
                    offer = %offer_id,
                    error = %err,
                    "Swap rejected by seat service; completing offer dropped"
                );
                return Err(err);
            }
        }
        Ok(())
    }

    /// Tear the exchange down and release every recorded seat.
    ///
    /// With `swap`, side `i` leaves with side `(i + 1) % N`'s escrowed status;
    /// a swap needs every side recorded and otherwise degrades to a refund.
    /// The statuses sent to the seat service are the post-swap ones.
    ///
    /// Safe to call repeatedly: after the first run there is nothing
    /// recorded, and later runs send empty slices.
    pub fn shutdown<S>(&mut self, swap: bool, service: &mut S) -> Result<()>
    where
        S: SeatService + ?Sized,
    {
        let sides = self.sides();
        let records: Vec<&RecordedOffer> = self.offers.values().collect();
        let complete = records.len() == sides;
        let swapped = swap && complete;

        let offer_ids: Vec<OfferId> = records.iter().map(|r| r.offer_id).collect();
        let statuses: Vec<SeatStatus> = if swapped {
            (0..sides)
                .map(|i| records[(i + 1) % sides].status.clone())
                .collect()
        } else {
            records.iter().map(|r| r.status.clone()).collect()
        };

        if self.is_closed() {
            tracing::debug!(exchange = %self.id, "Shutdown re-run on closed exchange");
        }

        service.update_offers(self.pool, &offer_ids, &statuses)?;
        self.offers.clear();

        if self.state.can_transition_to(ExchangeState::Closed) {
            self.state.transition_to(ExchangeState::Closed)?;
            tracing::info!(
                exchange = %self.id,
                released = offer_ids.len(),
                swapped,
                "Escrow exchange closed"
            );
        }
        Ok(())
    }

    /// Handle every notice already queued, in arrival order.
    ///
    /// Returns how many were handled. The first failing notice stops the
    /// drain; notices behind it stay queued.
    pub fn drain_notices<S>(&mut self, service: &mut S) -> Result<usize>
    where
        S: SeatService + ?Sized,
    {
        let mut handled = 0;
        while let Ok(notice) = self.notices.try_recv() {
            self.handle_notice(notice, service)?;
            handled += 1;
        }
        Ok(handled)
    }

    /// Wait for notices and handle them until the exchange closes or every
    /// sentry has been dropped.
    pub async fn run<S>(&mut self, service: &mut S) -> Result<()>
    where
        S: SeatService + ?Sized,
    {
        while !self.is_closed() {
            let Some(notice) = self.notices.recv().await else {
                tracing::debug!(exchange = %self.id, "All sentries dropped");
                break;
            };
            self.handle_notice(notice, service)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn id(&self) -> ExchangeId {
        self.id
    }

    #[must_use]
    pub fn pool(&self) -> PoolId {
        self.pool
    }

    #[must_use]
    pub fn status(&self) -> ExchangeState {
        self.state.status()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.status() == ExchangeState::Closed
    }

    #[must_use]
    pub fn sides(&self) -> usize {
        self.assays.len()
    }

    /// Per-side assays, in side order.
    #[must_use]
    pub fn assays(&self) -> &[Assay] {
        &self.assays
    }

    /// The amounts the exchange was opened with, in side order.
    ///
    /// Only their labels bind: they fix each side's unit. Parties choose
    /// their own amounts when they redeem, and the seat service judges those
    /// by offer safety alone.
    #[must_use]
    pub fn needed(&self) -> &[Amount] {
        &self.needed
    }

    #[must_use]
    pub fn recorded_count(&self) -> usize {
        self.offers.len()
    }

    /// Recorded offers in side order.
    pub fn recorded_offers(&self) -> impl Iterator<Item = &RecordedOffer> {
        self.offers.values()
    }
}

#[cfg(test)]
mod tests {
    use escrowswap_assay::fixtures;

    use super::*;

    /// Records every call; issues invites without redeeming anything.
    #[derive(Default)]
    struct RecordingService {
        spawned: Vec<Vec<UnitLabel>>,
        invited: Vec<(Sentry, usize, usize)>,
        updates: Vec<(Vec<OfferId>, Vec<SeatStatus>)>,
        reject_updates: bool,
    }

    impl SeatService for RecordingService {
        fn spawn(&mut self, labels: &[UnitLabel]) -> Result<PoolId> {
            self.spawned.push(labels.to_vec());
            Ok(PoolId::new())
        }

        fn invite_to_place_offer(
            &mut self,
            pool: PoolId,
            sentry: Sentry,
            offered_side: usize,
            needed_side: usize,
        ) -> Result<Invite> {
            self.invited.push((sentry, offered_side, needed_side));
            Ok(Invite {
                id: escrowswap_types::InviteId::new(),
                pool,
                offered_side,
                needed_side,
            })
        }

        fn update_offers(
            &mut self,
            _pool: PoolId,
            offer_ids: &[OfferId],
            statuses: &[SeatStatus],
        ) -> Result<()> {
            if self.reject_updates {
                return Err(EscrowError::ConservationViolation {
                    reason: "rejected by test".into(),
                });
            }
            self.updates.push((offer_ids.to_vec(), statuses.to_vec()));
            Ok(())
        }
    }

    struct Fixture {
        exchange: EscrowExchange,
        service: RecordingService,
        currency: Assay,
        widgets: Assay,
    }

    impl Fixture {
        /// Scenario A setup: side 0 pays 10 currency, side 1 pays 5 widgets.
        fn new() -> Self {
            let (registry, currency, widgets) = fixtures::market();
            let mut service = RecordingService::default();
            let (exchange, invites) = EscrowExchange::open(
                vec![fixtures::count(&currency, 10), fixtures::count(&widgets, 5)],
                &registry,
                &mut service,
                &ExchangeConfig::default(),
            )
            .unwrap();
            assert_eq!(invites.len(), 2);
            Self {
                exchange,
                service,
                currency,
                widgets,
            }
        }

        fn sentry(&self, side: usize) -> &Sentry {
            &self.service.invited[side].0
        }

        fn status(&self, currency: u64, widgets: u64) -> SeatStatus {
            SeatStatus::new(vec![
                fixtures::count(&self.currency, currency),
                fixtures::count(&self.widgets, widgets),
            ])
        }

        fn enter(&self, side: usize, status: SeatStatus) -> OfferId {
            let offer_id = OfferId::new();
            let description = Offer {
                offered_side: side,
                offered: self.exchange.needed()[side].clone(),
                needed_side: (side + 1) % 2,
                needed: self.exchange.needed()[(side + 1) % 2].clone(),
            };
            self.sentry(side)
                .notice_offer_entered(offer_id, description, status)
                .unwrap();
            offer_id
        }

        fn drain(&mut self) -> Result<usize> {
            self.exchange.drain_notices(&mut self.service)
        }
    }

    #[test]
    fn open_spawns_pool_and_issues_ring_invites() {
        let f = Fixture::new();
        assert_eq!(f.service.spawned.len(), 1);
        assert_eq!(
            f.service.spawned[0],
            vec![f.currency.label().clone(), f.widgets.label().clone()]
        );
        let sides: Vec<(usize, usize)> = f.service.invited.iter().map(|(_, o, n)| (*o, *n)).collect();
        assert_eq!(sides, vec![(0, 1), (1, 0)]);
        assert_eq!(f.exchange.status(), ExchangeState::Awaiting(0));
        assert_eq!(f.exchange.status().to_string(), "awaiting-first-offer");
        assert_eq!(f.service.invited[0].0.exchange(), f.exchange.id());
    }

    #[test]
    fn open_rejects_single_side() {
        let (registry, currency, _) = fixtures::market();
        let mut service = RecordingService::default();
        let err = EscrowExchange::open(
            vec![fixtures::count(&currency, 1)],
            &registry,
            &mut service,
            &ExchangeConfig::default(),
        )
        .err()
        .unwrap();
        assert!(matches!(err, EscrowError::Configuration(_)));
        assert!(service.spawned.is_empty());
    }

    #[test]
    fn open_rejects_unknown_unit() {
        let (registry, currency, _) = fixtures::market();
        let stray = Assay::count("stray");
        let mut service = RecordingService::default();
        let err = EscrowExchange::open(
            vec![fixtures::count(&currency, 1), fixtures::count(&stray, 1)],
            &registry,
            &mut service,
            &ExchangeConfig::default(),
        )
        .err()
        .unwrap();
        assert!(matches!(err, EscrowError::UnknownUnit(_)));
    }

    #[test]
    fn scenario_a_full_swap() {
        let mut f = Fixture::new();
        let a = f.enter(0, f.status(10, 0));
        assert_eq!(f.drain().unwrap(), 1);
        assert_eq!(f.exchange.status().to_string(), "awaiting-second-offer");
        assert_eq!(f.exchange.recorded_count(), 1);

        let b = f.enter(1, f.status(0, 5));
        assert_eq!(f.drain().unwrap(), 1);

        assert!(f.exchange.is_closed());
        assert_eq!(f.exchange.recorded_count(), 0);
        assert_eq!(f.service.updates.len(), 1);
        let (ids, statuses) = &f.service.updates[0];
        assert_eq!(ids, &vec![a, b]);
        assert_eq!(statuses[0], f.status(0, 5), "side A leaves with the widgets");
        assert_eq!(statuses[1], f.status(10, 0), "side B leaves with the currency");
    }

    #[test]
    fn scenario_b_exit_then_late_report() {
        let mut f = Fixture::new();
        let a = f.enter(0, f.status(10, 0));
        f.sentry(0).notice_offer_exit_requested(a).unwrap();
        assert_eq!(f.drain().unwrap(), 2);

        assert!(f.exchange.is_closed());
        assert_eq!(f.service.updates.len(), 1);
        assert_eq!(f.service.updates[0], (vec![a], vec![f.status(10, 0)]));

        // Side B shows up after the exchange already closed.
        f.enter(1, f.status(0, 5));
        assert_eq!(f.drain().unwrap(), 1);
        assert!(f.exchange.is_closed());
        assert_eq!(f.service.updates.len(), 2);
        assert_eq!(f.service.updates[1], (vec![], vec![]));
    }

    #[test]
    fn shutdown_twice_sends_empty_second_update() {
        let mut f = Fixture::new();
        f.enter(0, f.status(10, 0));
        f.enter(1, f.status(0, 5));
        f.drain().unwrap();

        f.exchange.shutdown(true, &mut f.service).unwrap();
        f.exchange.shutdown(false, &mut f.service).unwrap();
        assert_eq!(f.service.updates.len(), 3);
        assert_eq!(f.service.updates[1], (vec![], vec![]));
        assert_eq!(f.service.updates[2], f.service.updates[1]);
    }

    #[test]
    fn exit_before_any_offer_closes_empty() {
        let mut f = Fixture::new();
        f.sentry(1).notice_offer_exit_requested(OfferId::new()).unwrap();
        f.drain().unwrap();
        assert!(f.exchange.is_closed());
        assert_eq!(f.service.updates, vec![(vec![], vec![])]);
    }

    #[test]
    fn duplicate_side_rejected_without_state_change() {
        let mut f = Fixture::new();
        let first = f.enter(0, f.status(10, 0));
        f.drain().unwrap();
        f.enter(0, f.status(10, 0));
        let err = f.drain().unwrap_err();
        assert!(matches!(
            err,
            EscrowError::DuplicateOffer { side: 0, existing } if existing == first
        ));
        assert_eq!(f.exchange.status(), ExchangeState::Awaiting(1));
        assert_eq!(f.exchange.recorded_count(), 1);
    }

    #[test]
    fn malformed_status_rejected() {
        let mut f = Fixture::new();
        let narrow = SeatStatus::new(vec![fixtures::count(&f.currency, 10)]);
        f.enter(0, narrow);
        assert!(matches!(
            f.drain(),
            Err(EscrowError::LengthMismatch { .. })
        ));
        assert_eq!(f.exchange.recorded_count(), 0);
    }

    #[test]
    fn open_logs_engine_and_version() {
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Capture(Arc<Mutex<Vec<u8>>>);

        impl std::io::Write for Capture {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            Fixture::new();
        });

        let logged = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(logged.contains("Escrow exchange opened"), "Got: {logged}");
        assert!(logged.contains(constants::ENGINE_NAME));
        assert!(logged.contains(constants::VERSION));
    }

    #[test]
    fn failed_final_update_drops_completing_offer() {
        let mut f = Fixture::new();
        f.enter(0, f.status(10, 0));
        f.drain().unwrap();
        f.service.reject_updates = true;
        f.enter(1, f.status(0, 5));
        assert!(matches!(
            f.drain(),
            Err(EscrowError::ConservationViolation { .. })
        ));
        assert_eq!(f.exchange.status(), ExchangeState::Awaiting(1));
        assert_eq!(f.exchange.recorded_count(), 1);

        // Side 1 can report again once the service accepts updates.
        f.service.reject_updates = false;
        f.enter(1, f.status(0, 5));
        f.drain().unwrap();
        assert!(f.exchange.is_closed());
        assert_eq!(f.service.updates[0].1[0], f.status(0, 5));
    }

    #[test]
    fn three_sided_ring_rotation() {
        let (mut registry, currency, widgets) = fixtures::market();
        let gadgets = registry.install("gadgets", escrowswap_types::AssayKind::Count);
        let mut service = RecordingService::default();
        let (mut exchange, invites) = EscrowExchange::open(
            vec![
                fixtures::count(&currency, 10),
                fixtures::count(&widgets, 5),
                fixtures::count(&gadgets, 2),
            ],
            &registry,
            &mut service,
            &ExchangeConfig::default(),
        )
        .unwrap();
        assert_eq!(
            invites.iter().map(|i| i.needed_side).collect::<Vec<_>>(),
            vec![1, 2, 0]
        );

        let assays = exchange.assays().to_vec();
        let mut ids = Vec::new();
        for side in 0..3 {
            let id = OfferId::new();
            let description = Offer {
                offered_side: side,
                offered: exchange.needed()[side].clone(),
                needed_side: (side + 1) % 3,
                needed: exchange.needed()[(side + 1) % 3].clone(),
            };
            let status = fixtures::status_holding(&assays, side, exchange.needed()[side].clone());
            service.invited[side]
                .0
                .notice_offer_entered(id, description, status)
                .unwrap();
            ids.push(id);
        }
        assert_eq!(exchange.drain_notices(&mut service).unwrap(), 3);
        assert!(exchange.is_closed());

        let (sent_ids, statuses) = &service.updates[0];
        assert_eq!(sent_ids, &ids);
        for side in 0..3 {
            let wanted = (side + 1) % 3;
            assert_eq!(
                statuses[side].balances[wanted],
                exchange.needed()[wanted],
                "side {side} should hold what it wanted"
            );
        }
        assert!(escrowswap_assay::is_conserved(
            &assays,
            &[
                fixtures::status_holding(&assays, 0, exchange.needed()[0].clone()),
                fixtures::status_holding(&assays, 1, exchange.needed()[1].clone()),
                fixtures::status_holding(&assays, 2, exchange.needed()[2].clone()),
            ],
            statuses,
        )
        .unwrap());
    }

    #[test]
    fn state_names() {
        assert_eq!(ExchangeState::Awaiting(0).to_string(), "awaiting-first-offer");
        assert_eq!(ExchangeState::Awaiting(1).to_string(), "awaiting-second-offer");
        assert_eq!(ExchangeState::Awaiting(2).to_string(), "awaiting-offer-3");
        assert_eq!(ExchangeState::Closed.to_string(), "closed");
    }

    #[test]
    fn table_declares_every_state() {
        let table = ExchangeState::table(2);
        assert_eq!(table.len(), 3);
        let sm = StateMachine::new(ExchangeState::Awaiting(0), table).unwrap();
        assert!(sm.can_transition_to(ExchangeState::Awaiting(1)));
        assert!(sm.can_transition_to(ExchangeState::Closed));
        assert!(!sm.can_transition_to(ExchangeState::Awaiting(2)));
    }
}
