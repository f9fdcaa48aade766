//! Error types for the escrowswap exchange.
//!
//! All errors use the `ES_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Amount arithmetic errors
//! - 2xx: State machine errors
//! - 3xx: Exchange errors
//! - 4xx: Seat pool errors
//! - 9xx: General / internal errors
//!
//! `false` from an offer-safety or conservation predicate is not an error;
//! these variants are reserved for defects and rejected requests.

use thiserror::Error;

use crate::{InviteId, OfferId, PoolId, UnitLabel};

/// Central error enum for all escrowswap operations.
#[derive(Debug, Error)]
pub enum EscrowError {
    // =================================================================
    // Arithmetic Errors (1xx)
    // =================================================================
    /// A raw extent does not have the shape the strategy requires.
    #[error("ES_ERR_100: Invalid extent: {reason}")]
    InvalidExtent { reason: String },

    /// An operation mixed amounts of two different units.
    #[error("ES_ERR_101: Mismatched unit: expected {expected}, got {actual}")]
    MismatchedUnit {
        expected: UnitLabel,
        actual: UnitLabel,
    },

    /// `without` tried to remove more than is present.
    #[error("ES_ERR_102: Underflow: cannot remove {part} from {whole}")]
    Underflow { whole: u64, part: u64 },

    /// `with` overflowed the extent range.
    #[error("ES_ERR_103: Overflow adding {left} and {right}")]
    Overflow { left: u64, right: u64 },

    /// `without` was asked to remove elements the whole does not contain.
    #[error("ES_ERR_104: Part not included in whole: {reason}")]
    NotIncluded { reason: String },

    /// No assay is installed for this unit label.
    #[error("ES_ERR_105: Unknown unit: {0}")]
    UnknownUnit(UnitLabel),

    /// Index-correlated inputs have different lengths.
    #[error("ES_ERR_106: Length mismatch: {what} has {actual} entries, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    // =================================================================
    // State Machine Errors (2xx)
    // =================================================================
    /// The requested next state is not reachable from the current state.
    #[error("ES_ERR_200: Illegal transition from {from} to {to}")]
    IllegalTransition { from: String, to: String },

    // =================================================================
    // Exchange Errors (3xx)
    // =================================================================
    /// A second offer arrived for a side that already reported.
    #[error("ES_ERR_300: Side {side} already has an offer ({existing})")]
    DuplicateOffer { side: usize, existing: OfferId },

    /// The notice channel between sentry and exchange is gone.
    #[error("ES_ERR_301: Notice channel closed")]
    ChannelClosed,

    /// A side index does not name one of the exchange's sides.
    #[error("ES_ERR_302: Side index {index} out of range for {sides} sides")]
    SideOutOfRange { index: usize, sides: usize },

    // =================================================================
    // Seat Pool Errors (4xx)
    // =================================================================
    /// The invite was never issued or has already been redeemed.
    #[error("ES_ERR_400: Invite not found or already redeemed: {0}")]
    InviteNotFound(InviteId),

    /// No seat exists for this offer.
    #[error("ES_ERR_401: Seat not found: {0}")]
    SeatNotFound(OfferId),

    /// The pool handle is unknown to the seat service.
    #[error("ES_ERR_402: Pool not found: {0}")]
    PoolNotFound(PoolId),

    /// An offer would leave its party neither refunded nor paid.
    #[error("ES_ERR_403: Offer unsafe: {reason}")]
    OfferUnsafe { reason: String },

    /// A proposed update changes total value of some unit.
    #[error("ES_ERR_404: Conservation violation: {reason}")]
    ConservationViolation { reason: String },

    /// The seat is still held by its exchange and cannot be paid out.
    #[error("ES_ERR_405: Seat still pooled: {0}")]
    SeatStillPooled(OfferId),

    /// The seat has already been released by its exchange.
    #[error("ES_ERR_406: Seat no longer pooled: {0}")]
    SeatNotPooled(OfferId),

    /// The pool was torn down; it accepts no new seats or invites.
    #[error("ES_ERR_407: Pool closed: {0}")]
    PoolClosed(PoolId),

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("ES_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("ES_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid config, bad transition table, etc.).
    #[error("ES_ERR_902: Configuration error: {0}")]
    Configuration(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, EscrowError>;

impl From<serde_json::Error> for EscrowError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
