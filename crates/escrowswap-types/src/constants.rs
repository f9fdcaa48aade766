//! System-wide constants for the escrowswap exchange.

/// Fewest sides an exchange can have.
pub const MIN_SIDES: usize = 2;

/// Default upper bound on the number of sides in one exchange.
pub const DEFAULT_MAX_SIDES: usize = 16;

/// Whether the seat pool re-checks conservation and offer safety on every
/// update by default.
pub const DEFAULT_VERIFY_CONSERVATION: bool = true;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "escrowswap";
