//! # escrowswap-seats
//!
//! **Seat-allocation plane**: an in-memory [`SeatService`] that holds escrow
//! for each party of an [`EscrowExchange`], enforces offer safety at entry,
//! and checks conservation before applying the exchange's updates.
//!
//! ## Seat Lifecycle
//!
//! ```text
//! invite ─redeem─▶ seat (pooled) ─update_offers─▶ seat (released) ─withdraw─▶ payout
//!                       │
//!                       └─request_exit─▶ Sentry ─▶ exchange refunds
//! ```
//!
//! [`SeatService`]: escrowswap_exchange::SeatService
//! [`EscrowExchange`]: escrowswap_exchange::EscrowExchange

pub mod pool;
pub mod seat;

pub use pool::SeatPool;
pub use seat::Seat;
