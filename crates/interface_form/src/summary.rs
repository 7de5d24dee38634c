//! Premium summary read model.
//!
//! [`QuoteSummary`] mirrors the figures a summary panel renders: the total
//! premium, the status label, and the names of the selected options. It
//! updates from a store subscription, so by the time any store write
//! returns, the summary already reflects the new state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use domain_quote::{QuoteStatus, QuoteStore, Subscription};

#[derive(Default)]
struct SummaryData {
    total_premium: Decimal,
    status: Option<QuoteStatus>,
    selected_names: Vec<String>,
    quote_number: Option<String>,
}

/// Read model of the current quote for the summary panel.
pub struct QuoteSummary {
    data: Arc<Mutex<SummaryData>>,
    _subscription: Subscription,
}

impl QuoteSummary {
    /// Binds a summary to the store; it reflects the current quote
    /// immediately.
    pub fn bind(store: &QuoteStore) -> Self {
        let data = Arc::new(Mutex::new(SummaryData::default()));

        let observed = Arc::clone(&data);
        let subscription = store.subscribe(move |quote| {
            let mut data = observed.lock().unwrap_or_else(PoisonError::into_inner);
            match quote {
                Some(quote) => {
                    data.total_premium = quote.total_premium;
                    data.status = Some(quote.status);
                    data.selected_names = quote
                        .selected_options()
                        .into_iter()
                        .map(|option| option.name.clone())
                        .collect();
                    data.quote_number = quote.quote_number.clone();
                }
                None => *data = SummaryData::default(),
            }
        });

        Self {
            data,
            _subscription: subscription,
        }
    }

    /// Sum of the selected premiums.
    pub fn total_premium(&self) -> Decimal {
        self.lock().total_premium
    }

    /// The total premium as displayed, e.g. `$1,250`.
    pub fn formatted_premium(&self) -> String {
        format_premium(self.lock().total_premium)
    }

    /// Display label of the current status; `None` while the store is
    /// empty.
    pub fn status_label(&self) -> Option<&'static str> {
        self.lock().status.map(|status| status.label())
    }

    /// Names of the selected coverage options, in catalog order.
    pub fn selected_names(&self) -> Vec<String> {
        self.lock().selected_names.clone()
    }

    /// Reference number of the current quote, once assigned.
    pub fn quote_number(&self) -> Option<String> {
        self.lock().quote_number.clone()
    }

    fn lock(&self) -> MutexGuard<'_, SummaryData> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for QuoteSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let data = self.lock();
        f.debug_struct("QuoteSummary")
            .field("total_premium", &data.total_premium)
            .field("status", &data.status)
            .field("selected", &data.selected_names.len())
            .finish()
    }
}

/// Formats a premium for display: whole dollars with thousands grouping,
/// cents only when the amount has any.
pub fn format_premium(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    let magnitude = rounded.abs();

    let whole = magnitude.trunc().to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let fraction = magnitude.fract();
    if fraction.is_zero() {
        format!("{sign}${grouped}")
    } else {
        let cents = (fraction * Decimal::from(100)).to_u32().unwrap_or(0);
        format!("{sign}${grouped}.{cents:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_quote::{with_selection_toggled, CoverageType, Quote};
    use rust_decimal_macros::dec;

    #[test]
    fn formats_whole_dollar_amounts() {
        assert_eq!(format_premium(Decimal::ZERO), "$0");
        assert_eq!(format_premium(dec!(500)), "$500");
        assert_eq!(format_premium(dec!(1250)), "$1,250");
        assert_eq!(format_premium(dec!(1234567)), "$1,234,567");
    }

    #[test]
    fn formats_cents_only_when_present() {
        assert_eq!(format_premium(dec!(99.50)), "$99.50");
        assert_eq!(format_premium(dec!(1250.05)), "$1,250.05");
        assert_eq!(format_premium(dec!(1250.00)), "$1,250");
    }

    #[test]
    fn formats_negative_amounts_with_a_leading_sign() {
        assert_eq!(format_premium(dec!(-1250)), "-$1,250");
    }

    #[test]
    fn summary_tracks_store_changes() {
        let store = QuoteStore::new();
        let summary = QuoteSummary::bind(&store);

        assert_eq!(summary.total_premium(), Decimal::ZERO);
        assert!(summary.status_label().is_none());

        let mut quote = Quote::draft();
        let selected = with_selection_toggled(
            &quote.coverage_options,
            CoverageType::GeneralLiability,
        );
        quote.set_coverage_options(selected);
        store.set_current(Some(quote));

        assert_eq!(summary.total_premium(), dec!(500));
        assert_eq!(summary.formatted_premium(), "$500");
        assert_eq!(summary.status_label(), Some("Draft"));
        assert_eq!(
            summary.selected_names(),
            vec!["General Liability".to_string()]
        );
    }

    #[test]
    fn clearing_the_store_resets_the_summary() {
        let store = QuoteStore::new();
        let summary = QuoteSummary::bind(&store);
        store.begin_draft();

        store.clear();

        assert_eq!(summary.total_premium(), Decimal::ZERO);
        assert!(summary.status_label().is_none());
        assert!(summary.selected_names().is_empty());
    }
}
