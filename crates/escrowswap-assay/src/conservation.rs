//! Offer-safety and conservation checks.
//!
//! Invariants checked over an ordered list of assays, one per side:
//! ```text
//! offer safe:  status[offered_side] ⊇ offered  ∨  status[needed_side] ⊇ needed
//! conserved:   ∀ side: Σ old[side] == Σ new[side]
//! ```
//!
//! The predicates return `Ok(false)` for an unsafe or non-conserving state;
//! that is an expected outcome the caller must act on. `Err` means the inputs
//! were malformed (mismatched units, overflow, wrong lengths) and signals a
//! programming error upstream. The `verify_*` wrappers turn `false` into a
//! rejection for callers that want to bail out with `?`.

use escrowswap_types::{Amount, EscrowError, Offer, Result, SeatStatus};

use crate::assay::Assay;

/// Is the party holding `status` made whole either by refund or by winnings?
pub fn offer_safe(assays: &[Assay], offer: &Offer, status: &SeatStatus) -> Result<bool> {
    check_width(assays, status)?;
    let refund_ok = side(assays, offer.offered_side)?
        .includes(&status.balances[offer.offered_side], &offer.offered)?;
    if refund_ok {
        return Ok(true);
    }
    side(assays, offer.needed_side)?.includes(&status.balances[offer.needed_side], &offer.needed)
}

/// Conjunction of [`offer_safe`] over index-correlated offers and statuses.
pub fn all_offers_safe(assays: &[Assay], offers: &[Offer], statuses: &[SeatStatus]) -> Result<bool> {
    check_pairing(offers, statuses)?;
    for (offer, status) in offers.iter().zip(statuses) {
        if !offer_safe(assays, offer, status)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Per-side sum of every status's balance, starting from each side's empty.
pub fn compute_totals(assays: &[Assay], statuses: &[SeatStatus]) -> Result<Vec<Amount>> {
    for status in statuses {
        check_width(assays, status)?;
    }
    assays
        .iter()
        .enumerate()
        .map(|(i, assay)| {
            statuses
                .iter()
                .try_fold(assay.empty(), |acc, s| assay.with(&acc, &s.balances[i]))
        })
        .collect()
}

/// Does every side hold the same total value before and after?
pub fn is_conserved(assays: &[Assay], old: &[SeatStatus], new: &[SeatStatus]) -> Result<bool> {
    let before = compute_totals(assays, old)?;
    let after = compute_totals(assays, new)?;
    for ((assay, b), a) in assays.iter().zip(&before).zip(&after) {
        if !assay.equals(b, a)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// [`is_conserved`], but a non-conserving step is an error.
///
/// # Errors
/// [`EscrowError::ConservationViolation`] naming every side whose total moved.
pub fn verify_conserved(assays: &[Assay], old: &[SeatStatus], new: &[SeatStatus]) -> Result<()> {
    if is_conserved(assays, old, new)? {
        return Ok(());
    }
    let before = compute_totals(assays, old)?;
    let after = compute_totals(assays, new)?;
    let mut moved = Vec::new();
    for ((assay, b), a) in assays.iter().zip(&before).zip(&after) {
        if !assay.equals(b, a)? {
            moved.push(format!("{}: {} -> {}", assay.label(), b.extent, a.extent));
        }
    }
    Err(EscrowError::ConservationViolation {
        reason: moved.join("; "),
    })
}

/// [`all_offers_safe`], but an unsafe outcome is an error.
///
/// # Errors
/// [`EscrowError::OfferUnsafe`] naming the first unsafe position.
pub fn verify_offers_safe(assays: &[Assay], offers: &[Offer], statuses: &[SeatStatus]) -> Result<()> {
    check_pairing(offers, statuses)?;
    for (i, (offer, status)) in offers.iter().zip(statuses).enumerate() {
        if !offer_safe(assays, offer, status)? {
            return Err(EscrowError::OfferUnsafe {
                reason: format!(
                    "position {i}: holds neither {} nor {}",
                    offer.offered, offer.needed
                ),
            });
        }
    }
    Ok(())
}

fn side(assays: &[Assay], index: usize) -> Result<&Assay> {
    assays.get(index).ok_or(EscrowError::SideOutOfRange {
        index,
        sides: assays.len(),
    })
}

fn check_pairing(offers: &[Offer], statuses: &[SeatStatus]) -> Result<()> {
    if offers.len() == statuses.len() {
        Ok(())
    } else {
        Err(EscrowError::LengthMismatch {
            what: "statuses",
            expected: offers.len(),
            actual: statuses.len(),
        })
    }
}

fn check_width(assays: &[Assay], status: &SeatStatus) -> Result<()> {
    if status.sides() == assays.len() {
        Ok(())
    } else {
        Err(EscrowError::LengthMismatch {
            what: "seat balances",
            expected: assays.len(),
            actual: status.sides(),
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng, rngs::StdRng};
    use serde_json::json;

    use super::*;

    struct Market {
        usd: Assay,
        widgets: Assay,
    }

    impl Market {
        fn new() -> Self {
            Self {
                usd: Assay::count("USD"),
                widgets: Assay::count("widgets"),
            }
        }

        fn assays(&self) -> Vec<Assay> {
            vec![self.usd.clone(), self.widgets.clone()]
        }

        fn status(&self, usd: u64, widgets: u64) -> SeatStatus {
            SeatStatus::new(vec![
                self.usd.make(&json!(usd)).unwrap(),
                self.widgets.make(&json!(widgets)).unwrap(),
            ])
        }

        /// Pays `usd` dollars for `widgets` widgets.
        fn buyer_offer(&self, usd: u64, widgets: u64) -> Offer {
            Offer {
                offered_side: 0,
                offered: self.usd.make(&json!(usd)).unwrap(),
                needed_side: 1,
                needed: self.widgets.make(&json!(widgets)).unwrap(),
            }
        }
    }

    #[test]
    fn refund_alone_is_safe() {
        let m = Market::new();
        let offer = m.buyer_offer(10, 5);
        assert!(offer_safe(&m.assays(), &offer, &m.status(10, 0)).unwrap());
    }

    #[test]
    fn winnings_alone_are_safe() {
        let m = Market::new();
        let offer = m.buyer_offer(10, 5);
        assert!(offer_safe(&m.assays(), &offer, &m.status(0, 5)).unwrap());
    }

    #[test]
    fn neither_is_unsafe() {
        let m = Market::new();
        let offer = m.buyer_offer(10, 5);
        assert!(!offer_safe(&m.assays(), &offer, &m.status(9, 4)).unwrap());
    }

    #[test]
    fn offer_safe_rejects_narrow_status() {
        let m = Market::new();
        let offer = m.buyer_offer(1, 1);
        let narrow = SeatStatus::new(vec![m.usd.make(&json!(1)).unwrap()]);
        assert!(matches!(
            offer_safe(&m.assays(), &offer, &narrow),
            Err(EscrowError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn offer_safe_side_out_of_range() {
        let m = Market::new();
        let mut offer = m.buyer_offer(1, 1);
        offer.offered_side = 7;
        assert!(matches!(
            offer_safe(&m.assays(), &offer, &m.status(1, 1)),
            Err(EscrowError::SideOutOfRange { index: 7, sides: 2 })
        ));
    }

    #[test]
    fn mismatched_units_propagate_as_errors() {
        let m = Market::new();
        let mut offer = m.buyer_offer(1, 1);
        offer.offered = m.widgets.make(&json!(1)).unwrap();
        assert!(matches!(
            offer_safe(&m.assays(), &offer, &m.status(0, 0)),
            Err(EscrowError::MismatchedUnit { .. })
        ));
    }

    #[test]
    fn all_offers_safe_is_conjunction() {
        let m = Market::new();
        let offers = vec![m.buyer_offer(10, 5), m.buyer_offer(3, 3)];
        let ok = vec![m.status(10, 0), m.status(0, 3)];
        let bad = vec![m.status(10, 0), m.status(2, 2)];
        assert!(all_offers_safe(&m.assays(), &offers, &ok).unwrap());
        assert!(!all_offers_safe(&m.assays(), &offers, &bad).unwrap());
        assert!(all_offers_safe(&m.assays(), &[], &[]).unwrap());
        assert!(all_offers_safe(&m.assays(), &offers, &ok[..1]).is_err());
    }

    #[test]
    fn totals_fold_from_empty() {
        let m = Market::new();
        let totals = compute_totals(&m.assays(), &[m.status(10, 0), m.status(0, 5), m.status(1, 1)])
            .unwrap();
        assert_eq!(totals[0], m.usd.make(&json!(11)).unwrap());
        assert_eq!(totals[1], m.widgets.make(&json!(6)).unwrap());

        let none = compute_totals(&m.assays(), &[]).unwrap();
        assert_eq!(none, vec![m.usd.empty(), m.widgets.empty()]);
    }

    #[test]
    fn swap_is_conserved_mint_is_not() {
        let m = Market::new();
        let old = vec![m.status(10, 0), m.status(0, 5)];
        let swapped = vec![m.status(0, 5), m.status(10, 0)];
        let minted = vec![m.status(0, 5), m.status(11, 0)];
        assert!(is_conserved(&m.assays(), &old, &swapped).unwrap());
        assert!(!is_conserved(&m.assays(), &old, &minted).unwrap());

        let err = verify_conserved(&m.assays(), &old, &minted).unwrap_err();
        match err {
            EscrowError::ConservationViolation { reason } => {
                assert!(reason.contains("USD"), "Got: {reason}");
                assert!(!reason.contains("widgets"), "Got: {reason}");
            }
            other => panic!("Expected ConservationViolation, got {other:?}"),
        }
    }

    #[test]
    fn collection_totals_are_set_unions() {
        let tickets = Assay::collection("tickets");
        let assays = vec![tickets.clone()];
        let s = |raw| SeatStatus::new(vec![tickets.make(&raw).unwrap()]);
        let old = vec![s(json!([1, 2])), s(json!([3]))];
        let new = vec![s(json!([3, 1])), s(json!([2]))];
        assert!(is_conserved(&assays, &old, &new).unwrap());
        assert!(!is_conserved(&assays, &old, &[s(json!([1, 2]))]).unwrap());
    }

    #[test]
    fn verify_offers_safe_names_position() {
        let m = Market::new();
        let offers = vec![m.buyer_offer(10, 5), m.buyer_offer(3, 3)];
        let err = verify_offers_safe(&m.assays(), &offers, &[m.status(10, 0), m.status(0, 0)])
            .unwrap_err();
        match err {
            EscrowError::OfferUnsafe { reason } => assert!(reason.starts_with("position 1")),
            other => panic!("Expected OfferUnsafe, got {other:?}"),
        }
    }

    #[test]
    fn random_permutations_conserve() {
        let m = Market::new();
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..100 {
            let n = rng.gen_range(1..6);
            let old: Vec<SeatStatus> = (0..n)
                .map(|_| m.status(rng.gen_range(0..1_000), rng.gen_range(0..1_000)))
                .collect();
            let shift = rng.gen_range(0..n);
            let mut new = old.clone();
            new.rotate_left(shift);
            assert!(is_conserved(&m.assays(), &old, &new).unwrap());
        }
    }
}
