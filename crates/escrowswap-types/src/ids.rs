//! Identifiers used throughout escrowswap.
//!
//! All handle IDs use UUIDv7 for time-ordered lexicographic sorting.
//! [`UnitLabel`] pairs a UUID with a human-readable name, but compares by
//! the UUID alone.

use std::{
    fmt,
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// UnitLabel
// ---------------------------------------------------------------------------

/// Opaque identifier naming one kind of value (a currency, a widget class).
///
/// Two labels are the same unit only if they were minted together: the
/// `name` is informational and never participates in equality. An assay
/// that installs "USD" twice gets two incompatible units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitLabel {
    id: Uuid,
    name: String,
}

impl UnitLabel {
    /// Mint a fresh label. Only the assay layer should call this.
    #[must_use]
    pub fn mint(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for UnitLabel {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for UnitLabel {}

impl Hash for UnitLabel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for UnitLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short = self.id.simple().to_string();
        write!(f, "{}#{}", self.name, &short[short.len() - 6..])
    }
}

// ---------------------------------------------------------------------------
// Handle IDs
// ---------------------------------------------------------------------------

macro_rules! uuid_handle {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, ":{}"), self.0)
            }
        }
    };
}

uuid_handle!(
    /// Identifies one party's offer (and the seat holding its escrow).
    OfferId,
    "offer"
);

uuid_handle!(
    /// Handle for a one-time-redeemable invitation into an exchange.
    InviteId,
    "invite"
);

uuid_handle!(
    /// Handle for a group of seats spawned by the seat-allocation service.
    PoolId,
    "pool"
);

uuid_handle!(
    /// Identifies one escrow exchange instance.
    ExchangeId,
    "xchg"
);

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn labels_compare_by_identity() {
        let a = UnitLabel::mint("USD");
        let b = UnitLabel::mint("USD");
        assert_ne!(a, b, "same name must not imply same unit");
        assert_eq!(a, a.clone());

        let set: HashSet<UnitLabel> = [a.clone(), a.clone(), b].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn label_display_includes_name() {
        let label = UnitLabel::mint("widgets");
        let shown = label.to_string();
        assert!(shown.starts_with("widgets#"), "Got: {shown}");
    }

    #[test]
    fn offer_id_uniqueness_and_ordering() {
        let a = OfferId::new();
        let b = OfferId::new();
        assert_ne!(a, b);
        assert!(a < b);
    }

    #[test]
    fn handle_display_prefixes() {
        assert!(OfferId::new().to_string().starts_with("offer:"));
        assert!(InviteId::new().to_string().starts_with("invite:"));
        assert!(PoolId::new().to_string().starts_with("pool:"));
        assert!(ExchangeId::new().to_string().starts_with("xchg:"));
    }

    #[test]
    fn serde_roundtrips() {
        let label = UnitLabel::mint("BTC");
        let json = serde_json::to_string(&label).unwrap();
        let back: UnitLabel = serde_json::from_str(&json).unwrap();
        assert_eq!(label, back);
        assert_eq!(back.name(), "BTC");

        let oid = OfferId::new();
        let json = serde_json::to_string(&oid).unwrap();
        let back: OfferId = serde_json::from_str(&json).unwrap();
        assert_eq!(oid, back);
    }
}
