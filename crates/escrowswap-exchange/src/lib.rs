//! # escrowswap-exchange
//!
//! **Contract plane**: the lifecycle state machine and the escrow exchange
//! that swaps escrowed seats between parties.
//!
//! ## Architecture
//!
//! 1. **StateMachine**: declared states and transitions, nothing implicit
//! 2. **SeatService**: the seat-allocation contract the exchange consumes
//! 3. **Sentry**: typed channel the service reports offers through
//! 4. **EscrowExchange**: records one offer per side, then swaps or refunds
//!
//! ## Notice Flow
//!
//! ```text
//! party ─redeem invite─▶ SeatService ─Sentry─▶ EscrowExchange.handle_notice()
//!     ─all sides in─▶ SeatService.update_offers(swapped) → Closed
//! ```
//!
//! The exchange trusts its seat service to have checked offer safety and
//! conservation; it never calls the checks itself.

pub mod exchange;
pub mod seat_service;
pub mod state_machine;

pub use exchange::{EscrowExchange, ExchangeState, RecordedOffer};
pub use seat_service::{Invite, SeatService, Sentry, SentryNotice};
pub use state_machine::StateMachine;
