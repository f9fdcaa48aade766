//! # escrowswap-types
//!
//! Shared types, errors, and configuration for the **escrowswap** exchange.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`UnitLabel`], [`OfferId`], [`InviteId`], [`PoolId`], [`ExchangeId`]
//! - **Value model**: [`Extent`], [`Amount`], [`Token`], [`RawExtent`]
//! - **Exchange model**: [`Offer`], [`Proposal`], [`SeatStatus`]
//! - **Configuration**: [`ExchangeConfig`], [`SeatPoolConfig`], [`AssayConfig`], [`AssayKind`]
//! - **Errors**: [`EscrowError`] with `ES_ERR_` prefix codes
//! - **Constants**: system-wide limits and defaults

pub mod amount;
pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod offer;

// Re-export all primary types at crate root for ergonomic imports:
//   use escrowswap_types::{Amount, Extent, Offer, SeatStatus, ...};

pub use amount::*;
pub use config::*;
pub use error::*;
pub use ids::*;
pub use offer::*;

// Constants are accessed via `escrowswap_types::constants::FOO`
// (not re-exported to avoid name collisions).
