//! # escrowswap-assay
//!
//! **Value plane**: pure arithmetic over amounts, the assays that bind a unit
//! to its arithmetic, and the conservation checks built on top.
//!
//! ## Architecture
//!
//! 1. **AmountArithmetic**: `Count` (fungible) or `Collection` (non-fungible)
//!    strategies over raw extents
//! 2. **Assay**: a unit label plus its strategy; rejects mixed-unit operands
//! 3. **AssayRegistry**: label → assay lookup, filled at installation time
//! 4. **conservation**: offer safety, per-side totals, conservation
//!
//! Nothing here mutates shared state or performs I/O.

pub mod arithmetic;
pub mod assay;
pub mod conservation;
#[cfg(feature = "test-helpers")]
pub mod fixtures;
pub mod registry;

pub use arithmetic::{AmountArithmetic, CollectionRules, ElementEq, ElementValid};
pub use assay::Assay;
pub use conservation::{
    all_offers_safe, compute_totals, is_conserved, offer_safe, verify_conserved,
    verify_offers_safe,
};
pub use registry::AssayRegistry;
