//! Amount arithmetic strategies.
//!
//! Every unit of value uses one [`AmountArithmetic`] strategy over its
//! extents. The set of strategies is closed:
//!
//! | Strategy     | Extent                | `with`          | `includes`         |
//! |--------------|-----------------------|-----------------|--------------------|
//! | `Count`      | `u64`                 | checked `+`     | `whole >= part`    |
//! | `Collection` | distinct tokens       | dedup union     | set inclusion      |
//!
//! Collection semantics are set-like: duplicates never survive `with`, and a
//! repeated element of `part` is satisfied by a single matching element of
//! `whole`. Element equality and element validity are plain function
//! pointers fixed when the assay is created.
//!
//! These functions know nothing about unit labels; [`crate::Assay`] checks
//! labels before delegating here.

use escrowswap_types::{EscrowError, Extent, RawExtent, Result, Token};

/// Equality predicate between two collection elements.
pub type ElementEq = fn(&Token, &Token) -> bool;

/// Validity predicate for a single collection element.
pub type ElementValid = fn(&Token) -> bool;

/// Element rules for the `Collection` strategy.
#[derive(Debug, Clone, Copy)]
pub struct CollectionRules {
    pub element_eq: ElementEq,
    pub element_valid: ElementValid,
}

impl CollectionRules {
    /// Scalar tokens (bools, numbers, strings) compared structurally.
    #[must_use]
    pub fn scalar() -> Self {
        Self {
            element_eq: scalar_eq,
            element_valid: is_scalar,
        }
    }

    #[must_use]
    pub fn new(element_eq: ElementEq, element_valid: ElementValid) -> Self {
        Self {
            element_eq,
            element_valid,
        }
    }

    fn contains(&self, haystack: &[Token], needle: &Token) -> bool {
        haystack.iter().any(|t| (self.element_eq)(t, needle))
    }
}

impl Default for CollectionRules {
    fn default() -> Self {
        Self::scalar()
    }
}

fn scalar_eq(a: &Token, b: &Token) -> bool {
    a == b
}

fn is_scalar(t: &Token) -> bool {
    matches!(
        t,
        Token::Bool(_) | Token::Number(_) | Token::String(_)
    )
}

/// Pure arithmetic over extents of one shape.
#[derive(Debug, Clone, Copy)]
pub enum AmountArithmetic {
    /// Fungible value: non-negative integer counts.
    Count,
    /// Non-fungible value: sets of distinct tokens.
    Collection(CollectionRules),
}

impl AmountArithmetic {
    /// Collection strategy with the default scalar element rules.
    #[must_use]
    pub fn collection() -> Self {
        Self::Collection(CollectionRules::scalar())
    }

    /// Check a raw extent and return its canonical form.
    ///
    /// Collections are canonicalized to first-seen order with duplicates
    /// (under the element equality) removed.
    ///
    /// # Errors
    /// [`EscrowError::InvalidExtent`] if `raw` has the wrong shape or any
    /// collection element fails the element validator.
    pub fn validate(&self, raw: &RawExtent) -> Result<Extent> {
        match self {
            Self::Count => raw.as_u64().map(Extent::Count).ok_or_else(|| {
                EscrowError::InvalidExtent {
                    reason: format!("expected a non-negative integer, got {raw}"),
                }
            }),
            Self::Collection(rules) => {
                let items = raw.as_array().ok_or_else(|| EscrowError::InvalidExtent {
                    reason: format!("expected an array of tokens, got {raw}"),
                })?;
                let mut tokens: Vec<Token> = Vec::with_capacity(items.len());
                for item in items {
                    if !(rules.element_valid)(item) {
                        return Err(EscrowError::InvalidExtent {
                            reason: format!("element {item} rejected by validator"),
                        });
                    }
                    if !rules.contains(&tokens, item) {
                        tokens.push(item.clone());
                    }
                }
                Ok(Extent::Collection(tokens))
            }
        }
    }

    /// The identity extent for `with`.
    #[must_use]
    pub fn empty(&self) -> Extent {
        match self {
            Self::Count => Extent::Count(0),
            Self::Collection(_) => Extent::Collection(Vec::new()),
        }
    }

    pub fn is_empty(&self, x: &Extent) -> Result<bool> {
        match self {
            Self::Count => Ok(as_count(x)? == 0),
            Self::Collection(_) => Ok(as_tokens(x)?.is_empty()),
        }
    }

    /// Does `whole` contain at least `part`?
    pub fn includes(&self, whole: &Extent, part: &Extent) -> Result<bool> {
        match self {
            Self::Count => Ok(as_count(whole)? >= as_count(part)?),
            Self::Collection(rules) => {
                let whole = as_tokens(whole)?;
                Ok(as_tokens(part)?.iter().all(|t| rules.contains(whole, t)))
            }
        }
    }

    pub fn equals(&self, a: &Extent, b: &Extent) -> Result<bool> {
        match self {
            Self::Count => Ok(as_count(a)? == as_count(b)?),
            Self::Collection(_) => Ok(self.includes(a, b)? && self.includes(b, a)?),
        }
    }

    /// Combine two extents.
    ///
    /// # Errors
    /// [`EscrowError::Overflow`] if a count sum exceeds `u64::MAX`.
    pub fn with(&self, a: &Extent, b: &Extent) -> Result<Extent> {
        match self {
            Self::Count => {
                let (left, right) = (as_count(a)?, as_count(b)?);
                left.checked_add(right)
                    .map(Extent::Count)
                    .ok_or(EscrowError::Overflow { left, right })
            }
            Self::Collection(rules) => {
                let mut union = as_tokens(a)?.to_vec();
                for t in as_tokens(b)? {
                    if !rules.contains(&union, t) {
                        union.push(t.clone());
                    }
                }
                Ok(Extent::Collection(union))
            }
        }
    }

    /// Remove `part` from `whole`.
    ///
    /// # Errors
    /// - [`EscrowError::Underflow`] if a count `part` exceeds `whole`
    /// - [`EscrowError::NotIncluded`] if a collection `part` has elements
    ///   missing from `whole`
    pub fn without(&self, whole: &Extent, part: &Extent) -> Result<Extent> {
        match self {
            Self::Count => {
                let (w, p) = (as_count(whole)?, as_count(part)?);
                w.checked_sub(p)
                    .map(Extent::Count)
                    .ok_or(EscrowError::Underflow { whole: w, part: p })
            }
            Self::Collection(rules) => {
                if !self.includes(whole, part)? {
                    return Err(EscrowError::NotIncluded {
                        reason: format!("{part} is not a subset of {whole}"),
                    });
                }
                let part = as_tokens(part)?;
                Ok(Extent::Collection(
                    as_tokens(whole)?
                        .iter()
                        .filter(|t| !rules.contains(part, t))
                        .cloned()
                        .collect(),
                ))
            }
        }
    }
}

fn as_count(x: &Extent) -> Result<u64> {
    match x {
        Extent::Count(n) => Ok(*n),
        other @ Extent::Collection(_) => Err(wrong_shape("count", other)),
    }
}

fn as_tokens(x: &Extent) -> Result<&[Token]> {
    match x {
        Extent::Collection(tokens) => Ok(tokens),
        other @ Extent::Count(_) => Err(wrong_shape("collection", other)),
    }
}

fn wrong_shape(expected: &str, actual: &Extent) -> EscrowError {
    EscrowError::InvalidExtent {
        reason: format!("expected a {expected} extent, got a {}", actual.shape()),
    }
}
