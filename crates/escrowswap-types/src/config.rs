//! Configuration types for exchanges, seat pools, and assay installation.

use serde::{Deserialize, Serialize};

use crate::{EscrowError, Result, constants};

/// Configuration for opening escrow exchanges.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeConfig {
    /// Largest number of sides one exchange may have.
    pub max_sides: usize,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            max_sides: constants::DEFAULT_MAX_SIDES,
        }
    }
}

impl ExchangeConfig {
    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        if cfg.max_sides < constants::MIN_SIDES {
            return Err(EscrowError::Configuration(format!(
                "max_sides must be at least {}, got {}",
                constants::MIN_SIDES,
                cfg.max_sides
            )));
        }
        Ok(cfg)
    }
}

/// Configuration for the in-memory seat pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeatPoolConfig {
    /// Check conservation and offer safety before applying any update.
    pub verify_conservation: bool,
}

impl Default for SeatPoolConfig {
    fn default() -> Self {
        Self {
            verify_conservation: constants::DEFAULT_VERIFY_CONSERVATION,
        }
    }
}

impl SeatPoolConfig {
    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Arithmetic family for an installed unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssayKind {
    /// Fungible: extents are non-negative integers.
    Count,
    /// Non-fungible: extents are sets of scalar tokens.
    Collection,
}

/// One unit to install at contract-installation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssayConfig {
    pub name: String,
    pub kind: AssayKind,
}

impl AssayConfig {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: AssayKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Parse a list of units from a JSON array.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }
}
