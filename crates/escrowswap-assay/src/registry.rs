//! Installation-time registry of assays, keyed by unit label.
//!
//! Contracts are installed with the units they trade; later, anything that
//! holds only an [`Amount`](escrowswap_types::Amount) can recover the
//! arithmetic for it by looking up its label here.

use std::collections::HashMap;

use escrowswap_types::{AssayConfig, AssayKind, EscrowError, Result, UnitLabel};

use crate::assay::Assay;

/// Maps unit labels to their assays.
#[derive(Debug, Clone, Default)]
pub struct AssayRegistry {
    assays: HashMap<UnitLabel, Assay>,
}

impl AssayRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install every unit listed in `configs`, in order.
    #[must_use]
    pub fn from_config(configs: &[AssayConfig]) -> Self {
        let mut registry = Self::new();
        for cfg in configs {
            registry.install(cfg.name.clone(), cfg.kind);
        }
        registry
    }

    /// Mint a new unit of the given kind and register its assay.
    pub fn install(&mut self, name: impl Into<String>, kind: AssayKind) -> Assay {
        self.install_assay(Assay::from_kind(name, kind))
    }

    /// Register an assay built elsewhere (e.g. with custom element rules).
    pub fn install_assay(&mut self, assay: Assay) -> Assay {
        tracing::debug!(unit = %assay.label(), "Assay installed");
        self.assays.insert(assay.label().clone(), assay.clone());
        assay
    }

    /// Look up the assay for `label`.
    ///
    /// # Errors
    /// [`EscrowError::UnknownUnit`] if the label was never installed here.
    pub fn get(&self, label: &UnitLabel) -> Result<&Assay> {
        self.assays
            .get(label)
            .ok_or_else(|| EscrowError::UnknownUnit(label.clone()))
    }

    /// Look up one assay per label, preserving order.
    pub fn assays_for<'a>(
        &self,
        labels: impl IntoIterator<Item = &'a UnitLabel>,
    ) -> Result<Vec<Assay>> {
        labels
            .into_iter()
            .map(|label| self.get(label).cloned())
            .collect()
    }

    /// Find an installed unit by its display name. Names need not be unique;
    /// the first match wins.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Assay> {
        self.assays.values().find(|a| a.label().name() == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.assays.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assays.is_empty()
    }
}
