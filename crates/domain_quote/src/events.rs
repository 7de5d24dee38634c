//! Quote change events
//!
//! The store emits a [`QuoteStateChanged`] event on every replacement of
//! the current quote, listing which parts of the quote actually differ.
//! Consumers use the events for logging and diagnostics; subscribers are
//! notified regardless of whether anything changed.

use chrono::{DateTime, Utc};

use quote_kernel::QuoteId;

use crate::quote::Quote;

/// The parts of a quote that a change event can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuoteField {
    /// `id`, `quote_number` or `valid_until` changed (typically on save)
    Identity,
    BusinessInformation,
    CoverageOptions,
    TotalPremium,
    Status,
    UnderwriterNotes,
    RiskRating,
    /// `created_at` or `updated_at` changed
    Timestamps,
}

impl QuoteField {
    /// Stable name used in log output.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteField::Identity => "identity",
            QuoteField::BusinessInformation => "businessInformation",
            QuoteField::CoverageOptions => "coverageOptions",
            QuoteField::TotalPremium => "totalPremium",
            QuoteField::Status => "status",
            QuoteField::UnderwriterNotes => "underwriterNotes",
            QuoteField::RiskRating => "riskRating",
            QuoteField::Timestamps => "timestamps",
        }
    }
}

/// Emitted whenever the store's current quote is replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteStateChanged {
    /// Identifier of the quote now current, when it has one.
    pub quote_id: Option<QuoteId>,
    /// The fields that differ between the outgoing and incoming quote.
    /// Empty when the replacement was a no-op, and lists every field when
    /// the quote appeared or was cleared.
    pub changed: Vec<QuoteField>,
    /// When the replacement happened.
    pub at: DateTime<Utc>,
}

impl QuoteStateChanged {
    /// Builds the event for a store transition from `old` to `new`.
    pub fn from_transition(old: Option<&Quote>, new: Option<&Quote>) -> Self {
        QuoteStateChanged {
            quote_id: new.and_then(|quote| quote.id),
            changed: diff_quotes(old, new),
            at: Utc::now(),
        }
    }

    /// Whether the transition actually altered the quote.
    pub fn has_changes(&self) -> bool {
        !self.changed.is_empty()
    }

    /// Names of the changed fields, for log lines.
    pub fn changed_names(&self) -> Vec<&'static str> {
        self.changed.iter().map(QuoteField::as_str).collect()
    }
}

/// Lists the fields that differ between two store states.
///
/// Presence changes (`None` to `Some` or back) report every field;
/// `None` to `None` reports nothing.
pub fn diff_quotes(old: Option<&Quote>, new: Option<&Quote>) -> Vec<QuoteField> {
    match (old, new) {
        (None, None) => Vec::new(),
        (Some(a), Some(b)) => {
            let mut changed = Vec::new();
            if a.id != b.id || a.quote_number != b.quote_number || a.valid_until != b.valid_until
            {
                changed.push(QuoteField::Identity);
            }
            if a.business_information != b.business_information {
                changed.push(QuoteField::BusinessInformation);
            }
            if a.coverage_options != b.coverage_options {
                changed.push(QuoteField::CoverageOptions);
            }
            if a.total_premium != b.total_premium {
                changed.push(QuoteField::TotalPremium);
            }
            if a.status != b.status {
                changed.push(QuoteField::Status);
            }
            if a.underwriter_notes != b.underwriter_notes {
                changed.push(QuoteField::UnderwriterNotes);
            }
            if a.risk_rating != b.risk_rating {
                changed.push(QuoteField::RiskRating);
            }
            if a.created_at != b.created_at || a.updated_at != b.updated_at {
                changed.push(QuoteField::Timestamps);
            }
            changed
        }
        _ => vec![
            QuoteField::Identity,
            QuoteField::BusinessInformation,
            QuoteField::CoverageOptions,
            QuoteField::TotalPremium,
            QuoteField::Status,
            QuoteField::UnderwriterNotes,
            QuoteField::RiskRating,
            QuoteField::Timestamps,
        ],
    }
}
