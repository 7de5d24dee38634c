//! Premium calculation
//!
//! The total premium is always derived from the coverage selection, never
//! authored directly. The calculation is a pure read; callers recompute it
//! on every coverage mutation so the stored total can never drift.

use rust_decimal::Decimal;

use crate::coverage::CoverageOption;

/// Sums the premium of every selected option
///
/// Returns zero for an empty or all-deselected collection.
pub fn total_premium(options: &[CoverageOption]) -> Decimal {
    options
        .iter()
        .filter(|option| option.is_selected)
        .map(|option| option.premium)
        .sum()
}
