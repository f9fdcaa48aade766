//! Assays: one unit label bound to one arithmetic strategy.
//!
//! An [`Assay`] is the only way to create or combine [`Amount`]s of its
//! unit. Every operation first checks that each operand carries the
//! assay's label, then delegates to [`AmountArithmetic`].

use escrowswap_types::{Amount, AssayKind, EscrowError, Extent, RawExtent, Result, UnitLabel};

use crate::arithmetic::{AmountArithmetic, CollectionRules};

/// Immutable `(label, strategy)` pair, created once per asset kind.
#[derive(Debug, Clone)]
pub struct Assay {
    label: UnitLabel,
    arithmetic: AmountArithmetic,
}

impl Assay {
    /// Mint a new unit and bind it to `arithmetic`.
    #[must_use]
    pub fn new(name: impl Into<String>, arithmetic: AmountArithmetic) -> Self {
        Self {
            label: UnitLabel::mint(name),
            arithmetic,
        }
    }

    /// Fungible unit.
    #[must_use]
    pub fn count(name: impl Into<String>) -> Self {
        Self::new(name, AmountArithmetic::Count)
    }

    /// Non-fungible unit with scalar tokens.
    #[must_use]
    pub fn collection(name: impl Into<String>) -> Self {
        Self::new(name, AmountArithmetic::collection())
    }

    /// Non-fungible unit with caller-chosen element rules.
    #[must_use]
    pub fn collection_with(name: impl Into<String>, rules: CollectionRules) -> Self {
        Self::new(name, AmountArithmetic::Collection(rules))
    }

    #[must_use]
    pub fn from_kind(name: impl Into<String>, kind: AssayKind) -> Self {
        match kind {
            AssayKind::Count => Self::count(name),
            AssayKind::Collection => Self::collection(name),
        }
    }

    #[must_use]
    pub fn label(&self) -> &UnitLabel {
        &self.label
    }

    #[must_use]
    pub fn arithmetic(&self) -> &AmountArithmetic {
        &self.arithmetic
    }

    /// Validate a raw extent and wrap it in an amount of this unit.
    pub fn make(&self, raw: &RawExtent) -> Result<Amount> {
        let extent = self.arithmetic.validate(raw)?;
        Ok(Amount::new(self.label.clone(), extent))
    }

    /// Re-validate an amount that claims to be of this unit.
    ///
    /// Amounts can arrive deserialized from elsewhere; this checks the label
    /// and canonicalizes the extent.
    pub fn coerce(&self, amount: &Amount) -> Result<Amount> {
        self.check_label(amount)?;
        let raw = match &amount.extent {
            Extent::Count(n) => RawExtent::from(*n),
            Extent::Collection(tokens) => RawExtent::Array(tokens.clone()),
        };
        self.make(&raw)
    }

    #[must_use]
    pub fn empty(&self) -> Amount {
        Amount::new(self.label.clone(), self.arithmetic.empty())
    }

    pub fn is_empty(&self, amount: &Amount) -> Result<bool> {
        self.check_label(amount)?;
        self.arithmetic.is_empty(&amount.extent)
    }

    pub fn includes(&self, whole: &Amount, part: &Amount) -> Result<bool> {
        self.check_pair(whole, part)?;
        self.arithmetic.includes(&whole.extent, &part.extent)
    }

    pub fn equals(&self, a: &Amount, b: &Amount) -> Result<bool> {
        self.check_pair(a, b)?;
        self.arithmetic.equals(&a.extent, &b.extent)
    }

    pub fn with(&self, a: &Amount, b: &Amount) -> Result<Amount> {
        self.check_pair(a, b)?;
        let extent = self.arithmetic.with(&a.extent, &b.extent)?;
        Ok(Amount::new(self.label.clone(), extent))
    }

    pub fn without(&self, whole: &Amount, part: &Amount) -> Result<Amount> {
        self.check_pair(whole, part)?;
        let extent = self.arithmetic.without(&whole.extent, &part.extent)?;
        Ok(Amount::new(self.label.clone(), extent))
    }

    fn check_label(&self, amount: &Amount) -> Result<()> {
        if amount.label == self.label {
            Ok(())
        } else {
            Err(EscrowError::MismatchedUnit {
                expected: self.label.clone(),
                actual: amount.label.clone(),
            })
        }
    }

    fn check_pair(&self, a: &Amount, b: &Amount) -> Result<()> {
        self.check_label(a)?;
        self.check_label(b)
    }
}
