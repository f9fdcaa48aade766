//! Amount types: a quantity of one unit of value.
//!
//! An [`Amount`] pairs a [`UnitLabel`] with an [`Extent`]. The extent's shape
//! depends on the unit's arithmetic: a plain count for fungible value, or a
//! collection of distinct tokens for non-fungible value. Amounts are
//! immutable; arithmetic lives in `escrowswap-assay`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::UnitLabel;

/// One element of a non-fungible collection (a ticket number, a serial).
pub type Token = serde_json::Value;

/// Untrusted extent input, validated by an assay before use.
pub type RawExtent = serde_json::Value;

/// The raw magnitude or content of an amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extent {
    /// Fungible quantity.
    Count(u64),
    /// Distinct tokens in first-seen order. Order carries no meaning.
    Collection(Vec<Token>),
}

impl Extent {
    /// Short name of the extent shape, for error messages.
    #[must_use]
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Count(_) => "count",
            Self::Collection(_) => "collection",
        }
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Collection(tokens) => {
                write!(f, "{{")?;
                for (i, t) in tokens.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{t}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// A quantity of one unit: `(label, extent)`.
///
/// Construct amounts through an assay so the extent is validated; the
/// fields are public for pattern matching and serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub label: UnitLabel,
    pub extent: Extent,
}

impl Amount {
    #[must_use]
    pub fn new(label: UnitLabel, extent: Extent) -> Self {
        Self { label, extent }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.extent, self.label.name())
    }
}
