//! Test fixtures shared by the workspace's test suites.
//!
//! Enabled with the `test-helpers` feature.

use escrowswap_types::{Amount, AssayKind, SeatStatus};
use rand::Rng;

use crate::{assay::Assay, registry::AssayRegistry};

/// A registry with two fungible units: `currency` and `widgets`.
#[must_use]
pub fn market() -> (AssayRegistry, Assay, Assay) {
    let mut registry = AssayRegistry::new();
    let currency = registry.install("currency", AssayKind::Count);
    let widgets = registry.install("widgets", AssayKind::Count);
    (registry, currency, widgets)
}

/// `n` units of a fungible assay.
#[must_use]
pub fn count(assay: &Assay, n: u64) -> Amount {
    assay
        .make(&serde_json::Value::from(n))
        .expect("fixture count must be valid")
}

/// A collection amount from a JSON array literal.
#[must_use]
pub fn tokens(assay: &Assay, raw: serde_json::Value) -> Amount {
    assay.make(&raw).expect("fixture tokens must be valid")
}

/// A status holding `amount` on `side` and nothing elsewhere.
#[must_use]
pub fn status_holding(assays: &[Assay], side: usize, amount: Amount) -> SeatStatus {
    let mut balances: Vec<Amount> = assays.iter().map(Assay::empty).collect();
    balances[side] = amount;
    SeatStatus::new(balances)
}

/// `n` random counts below `max`.
#[must_use]
pub fn random_counts(rng: &mut impl Rng, n: usize, max: u64) -> Vec<u64> {
    (0..n).map(|_| rng.gen_range(0..max)).collect()
}
