//! Quote aggregate and its status lifecycle.
//!
//! A [`Quote`] bundles the business information entered by the user with
//! the coverage selection and the derived total premium. The struct mirrors
//! the backend's JSON representation field for field so it can be sent and
//! received without a separate wire type.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use quote_kernel::QuoteId;

use crate::business::{BusinessInfoUpdate, BusinessInformation};
use crate::coverage::{default_catalog, CoverageOption};
use crate::error::QuoteError;
use crate::premium::total_premium;

/// Lifecycle status of a quote.
///
/// Statuses move along a fixed state machine enforced by the backend:
/// a draft becomes saved on first persist, a saved quote can be submitted
/// for underwriting (or reopened as a draft), and a submitted quote is
/// either approved or rejected. Approved, rejected and expired quotes are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteStatus {
    /// Being edited locally, or reopened for edits after saving.
    Draft,
    /// Persisted on the backend and editable.
    Saved,
    /// Sent to underwriting, awaiting a decision.
    Submitted,
    /// Underwriting accepted the quote.
    Approved,
    /// Underwriting declined the quote.
    Rejected,
    /// The quote's validity window elapsed before a decision.
    Expired,
}

impl QuoteStatus {
    /// Wire name of the status, as the backend serializes it.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteStatus::Draft => "DRAFT",
            QuoteStatus::Saved => "SAVED",
            QuoteStatus::Submitted => "SUBMITTED",
            QuoteStatus::Approved => "APPROVED",
            QuoteStatus::Rejected => "REJECTED",
            QuoteStatus::Expired => "EXPIRED",
        }
    }

    /// Human-readable label for display surfaces.
    pub fn label(&self) -> &'static str {
        match self {
            QuoteStatus::Draft => "Draft",
            QuoteStatus::Saved => "Saved",
            QuoteStatus::Submitted => "Submitted",
            QuoteStatus::Approved => "Approved",
            QuoteStatus::Rejected => "Rejected",
            QuoteStatus::Expired => "Expired",
        }
    }

    /// Whether the status machine permits moving from `self` to `next`.
    pub fn can_transition_to(&self, next: QuoteStatus) -> bool {
        matches!(
            (self, next),
            (QuoteStatus::Draft, QuoteStatus::Saved)
                | (QuoteStatus::Saved, QuoteStatus::Submitted)
                | (QuoteStatus::Saved, QuoteStatus::Draft)
                | (QuoteStatus::Submitted, QuoteStatus::Approved)
                | (QuoteStatus::Submitted, QuoteStatus::Rejected)
        )
    }

    /// Whether no further transitions are possible from this status.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            QuoteStatus::Approved | QuoteStatus::Rejected | QuoteStatus::Expired
        )
    }
}

impl std::fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An insurance quote as held by the client and exchanged with the backend.
///
/// `id`, `quote_number`, `valid_until` and the timestamps are assigned by
/// the backend and are `None` on a quote that has never been persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Backend-assigned identifier, absent until first save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<QuoteId>,

    /// The business being quoted.
    pub business_information: BusinessInformation,

    /// Full coverage catalog with per-option selection flags.
    #[serde(default)]
    pub coverage_options: Vec<CoverageOption>,

    /// Sum of the premiums of the selected coverage options.
    #[serde(default, with = "rust_decimal::serde::float")]
    pub total_premium: Decimal,

    /// Current lifecycle status.
    pub status: QuoteStatus,

    /// Underwriting risk classification, set server-side on submit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_rating: Option<String>,

    /// Free-form underwriter commentary. Rejection reasons are appended here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underwriter_notes: Option<String>,

    /// Backend-assigned reference number, absent until first save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_number: Option<String>,

    /// End of the quote's validity window, assigned on first save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<NaiveDateTime>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Quote {
    /// Creates a fresh draft with an empty business section and the
    /// standard coverage catalog, nothing selected.
    pub fn draft() -> Self {
        Quote {
            id: None,
            business_information: BusinessInformation::empty(),
            coverage_options: default_catalog(),
            total_premium: Decimal::ZERO,
            status: QuoteStatus::Draft,
            risk_rating: None,
            underwriter_notes: None,
            quote_number: None,
            valid_until: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Whether the backend has assigned this quote an identifier.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// The currently selected coverage options.
    pub fn selected_options(&self) -> Vec<&CoverageOption> {
        self.coverage_options
            .iter()
            .filter(|option| option.is_selected)
            .collect()
    }

    /// Recomputes `total_premium` from the current selection.
    pub fn recalculate_premium(&mut self) {
        self.total_premium = total_premium(&self.coverage_options);
    }

    /// Replaces the coverage list and recomputes the total premium.
    pub fn set_coverage_options(&mut self, options: Vec<CoverageOption>) {
        self.coverage_options = options;
        self.recalculate_premium();
    }

    /// Applies edited business fields, keeping backend-owned columns intact.
    pub fn apply_business_update(&mut self, update: BusinessInfoUpdate) {
        self.business_information.apply_update(update);
    }

    /// Sets or clears the underwriter notes.
    pub fn set_underwriter_notes(&mut self, notes: Option<String>) {
        self.underwriter_notes = notes;
    }

    /// Moves the quote to `next`, enforcing the status machine.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::InvalidStatusTransition`] when the machine
    /// does not permit the move.
    pub fn transition_to(&mut self, next: QuoteStatus) -> Result<(), QuoteError> {
        if !self.status.can_transition_to(next) {
            return Err(QuoteError::InvalidStatusTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    /// Checks that the quote is eligible for submission to underwriting.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::InvalidStatusTransition`] unless the quote is
    /// saved, and [`QuoteError::NoSelectedCoverage`] when nothing is
    /// selected.
    pub fn ensure_submittable(&self) -> Result<(), QuoteError> {
        if !self.status.can_transition_to(QuoteStatus::Submitted) {
            return Err(QuoteError::InvalidStatusTransition {
                from: self.status,
                to: QuoteStatus::Submitted,
            });
        }
        if self.selected_options().is_empty() {
            return Err(QuoteError::NoSelectedCoverage);
        }
        Ok(())
    }
}

impl Default for Quote {
    fn default() -> Self {
        Self::draft()
    }
}
