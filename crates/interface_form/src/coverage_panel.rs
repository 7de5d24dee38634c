//! Coverage selection panel.
//!
//! The panel holds no state of its own: it reads the catalog off the
//! current quote and writes toggles back through the store, which
//! recomputes the premium on every change.

use domain_quote::{
    default_catalog, with_selection_toggled, CoverageOption, CoverageType, QuoteStore,
};

/// Selection panel over the coverage catalog of the current quote.
#[derive(Debug, Clone)]
pub struct CoverageSelector {
    store: QuoteStore,
}

impl CoverageSelector {
    /// Binds a selector to the store.
    pub fn bind(store: &QuoteStore) -> Self {
        Self {
            store: store.clone(),
        }
    }

    /// Flips the selection on the option of the given coverage type,
    /// starting a draft with the standard catalog when the store is empty.
    pub fn toggle(&self, coverage_type: CoverageType) {
        let options = self.options();
        self.store
            .update_coverage_options(with_selection_toggled(&options, coverage_type));
    }

    /// The catalog as shown on the panel.
    pub fn options(&self) -> Vec<CoverageOption> {
        self.store
            .current()
            .map(|quote| quote.coverage_options)
            .unwrap_or_else(default_catalog)
    }

    /// Whether the option of the given type is currently selected.
    pub fn is_selected(&self, coverage_type: CoverageType) -> bool {
        self.options()
            .iter()
            .any(|option| option.coverage_type == coverage_type && option.is_selected)
    }
}
