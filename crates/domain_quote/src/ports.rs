//! Quote Backend Port
//!
//! This module defines the port interface between the client core and the
//! quoting backend, enabling swappable implementations:
//!
//! - **REST Adapter**: Talks to the quoting service over HTTP (infra_backend)
//! - **Mock Adapter**: In-memory stand-in that mirrors the backend's rules,
//!   for testing without a running server
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_quote::ports::QuoteBackend;
//! use std::sync::Arc;
//!
//! pub struct QuoteClient {
//!     backend: Arc<dyn QuoteBackend>,
//! }
//! ```

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use quote_kernel::{BackendError, DomainPort, Page, PageRequest, QuoteId};

use crate::quote::{Quote, QuoteStatus};

/// Aggregate figures over every quote the backend holds.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteStatistics {
    pub total_quotes: u64,
    pub draft_quotes: u64,
    pub saved_quotes: u64,
    pub submitted_quotes: u64,
    pub approved_quotes: u64,
    pub rejected_quotes: u64,
    pub expired_quotes: u64,
    /// Sum of every quote's total premium.
    #[serde(default, with = "rust_decimal::serde::float")]
    pub total_premium_value: Decimal,
    /// Mean premium across all quotes, rounded to 2 decimal places.
    #[serde(default, with = "rust_decimal::serde::float")]
    pub average_premium: Decimal,
}

/// The port trait for quote persistence operations.
///
/// All methods are async and return `Result<T, BackendError>` so callers
/// handle transport and business failures uniformly across adapters.
#[async_trait]
pub trait QuoteBackend: DomainPort {
    // ========================================================================
    // Write Operations
    // ========================================================================

    /// Persists a brand-new quote.
    ///
    /// The backend assigns the identifier, quote number and validity
    /// window and returns the stored quote.
    ///
    /// # Errors
    ///
    /// `BackendError::Rejected` when the business information fails
    /// server-side validation.
    async fn create(&self, draft: &Quote) -> Result<Quote, BackendError>;

    /// Replaces an existing quote's editable fields.
    ///
    /// Status changes carried by `draft` are validated against the
    /// lifecycle rules.
    ///
    /// # Errors
    ///
    /// `BackendError::NotFound` for an unknown id, `Conflict` when the
    /// stored quote is no longer editable or the status change is not
    /// permitted.
    async fn update(&self, id: QuoteId, draft: &Quote) -> Result<Quote, BackendError>;

    /// Deletes a quote. The backend only permits deleting drafts.
    async fn delete(&self, id: QuoteId) -> Result<(), BackendError>;

    // ========================================================================
    // Read Operations
    // ========================================================================

    /// Retrieves a quote by id.
    async fn fetch(&self, id: QuoteId) -> Result<Quote, BackendError>;

    /// Retrieves a quote by its backend-assigned quote number.
    async fn fetch_by_number(&self, quote_number: &str) -> Result<Quote, BackendError>;

    /// Retrieves one page of quotes.
    async fn list(&self, page: &PageRequest) -> Result<Page<Quote>, BackendError>;

    /// Retrieves every quote in the given status.
    async fn list_by_status(&self, status: QuoteStatus) -> Result<Vec<Quote>, BackendError>;

    /// Searches quotes whose business name contains `fragment`,
    /// case-insensitively.
    async fn search_by_name(&self, fragment: &str) -> Result<Page<Quote>, BackendError>;

    /// Retrieves every quote for businesses in the given state.
    async fn list_by_state(&self, state: &str) -> Result<Vec<Quote>, BackendError>;

    /// Asks the backend to recalculate and return a quote's total premium.
    async fn premium_of(&self, id: QuoteId) -> Result<Decimal, BackendError>;

    /// Aggregate statistics across all quotes.
    async fn statistics(&self) -> Result<QuoteStatistics, BackendError>;

    // ========================================================================
    // Lifecycle Operations
    // ========================================================================

    /// Submits a saved quote for underwriting.
    ///
    /// # Errors
    ///
    /// `Conflict` unless the quote is saved and has at least one selected
    /// coverage option.
    async fn submit(&self, id: QuoteId) -> Result<Quote, BackendError>;

    /// Approves a submitted quote.
    async fn approve(&self, id: QuoteId) -> Result<Quote, BackendError>;

    /// Rejects a submitted quote, recording the reason in the
    /// underwriter notes.
    async fn reject(&self, id: QuoteId, reason: &str) -> Result<Quote, BackendError>;
}

/// Extension trait for QuoteBackend with convenience methods
#[async_trait]
pub trait QuoteBackendExt: QuoteBackend {
    /// Persists a quote, choosing create or update from id presence.
    async fn save(&self, quote: &Quote) -> Result<Quote, BackendError> {
        match quote.id {
            Some(id) => self.update(id, quote).await,
            None => self.create(quote).await,
        }
    }
}

// Blanket implementation for all QuoteBackend implementors
impl<T: QuoteBackend + ?Sized> QuoteBackendExt for T {}

/// Mock implementation of QuoteBackend for testing
///
/// This adapter stores quotes in memory and applies the same lifecycle
/// and validation rules as the real backend, so client behavior can be
/// tested without a server.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;

    use chrono::Utc;
    use rust_decimal::RoundingStrategy;
    use tokio::sync::RwLock;

    use crate::premium::total_premium;
    use crate::validation::{BusinessField, BusinessInfoValidator};

    #[derive(Debug, Default)]
    struct MockState {
        quotes: HashMap<i64, Quote>,
        next_id: i64,
        next_option_id: i64,
        create_calls: usize,
    }

    /// In-memory mock implementation of QuoteBackend
    #[derive(Debug, Clone, Default)]
    pub struct MockQuoteBackend {
        state: Arc<RwLock<MockState>>,
        latency: Option<Duration>,
    }

    impl MockQuoteBackend {
        /// Creates an empty mock backend
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates the mock with quotes, assigning ids and quote
        /// numbers where missing
        pub async fn with_quotes(quotes: Vec<Quote>) -> Self {
            let backend = Self::new();
            {
                let mut state = backend.state.write().await;
                for mut quote in quotes {
                    let id = match quote.id {
                        Some(id) => id.value(),
                        None => {
                            state.next_id += 1;
                            state.next_id
                        }
                    };
                    state.next_id = state.next_id.max(id);
                    quote.id = Some(QuoteId::new(id));
                    if quote.quote_number.is_none() {
                        quote.quote_number = Some(generate_quote_number(id));
                    }
                    state.quotes.insert(id, quote);
                }
            }
            backend
        }

        /// Delays every operation, for tests that need overlapping
        /// requests to actually overlap
        pub fn with_latency(mut self, latency: Duration) -> Self {
            self.latency = Some(latency);
            self
        }

        /// Number of create requests the mock has served
        pub async fn create_calls(&self) -> usize {
            self.state.read().await.create_calls
        }

        /// Snapshot of a stored quote, bypassing the port
        pub async fn stored(&self, id: QuoteId) -> Option<Quote> {
            self.state.read().await.quotes.get(&id.value()).cloned()
        }

        async fn simulate_latency(&self) {
            if let Some(latency) = self.latency {
                tokio::time::sleep(latency).await;
            }
        }
    }

    fn generate_quote_number(seq: i64) -> String {
        format!(
            "IQ-{}-{:04}",
            Utc::now().format("%Y%m%d%H%M%S"),
            seq.rem_euclid(10_000)
        )
    }

    fn validate_server_side(quote: &Quote) -> Result<(), BackendError> {
        let result = BusinessInfoValidator::validate_info(&quote.business_information);
        if result.is_valid {
            return Ok(());
        }
        let update = crate::business::BusinessInfoUpdate::from_info(&quote.business_information);
        let violations = BusinessField::ALL
            .iter()
            .filter_map(|field| {
                BusinessInfoValidator::field_error(*field, &update)
                    .map(|message| (format!("businessInformation.{}", field.as_str()), message))
            })
            .collect();
        Err(BackendError::Rejected { violations })
    }

    fn sort_for_listing(quotes: &mut [Quote], sort: &str) {
        let ascending = sort.ends_with(",asc");
        quotes.sort_by(|a, b| {
            let ordering = a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id));
            if ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });
    }

    impl DomainPort for MockQuoteBackend {}

    #[async_trait]
    impl QuoteBackend for MockQuoteBackend {
        async fn create(&self, draft: &Quote) -> Result<Quote, BackendError> {
            self.simulate_latency().await;
            validate_server_side(draft)?;

            let mut state = self.state.write().await;
            state.create_calls += 1;
            state.next_id += 1;
            let id = state.next_id;

            let now = Utc::now().naive_utc();
            let mut quote = draft.clone();
            quote.id = Some(QuoteId::new(id));
            quote.quote_number = Some(generate_quote_number(id));
            quote.valid_until = Some(now + chrono::Duration::days(30));
            quote.created_at = Some(now);
            quote.updated_at = Some(now);
            if quote.coverage_options.is_empty() {
                quote.coverage_options = crate::coverage::default_catalog();
            }
            for option in &mut quote.coverage_options {
                if option.id.is_none() {
                    state.next_option_id += 1;
                    option.id = Some(quote_kernel::CoverageOptionId::new(state.next_option_id));
                }
            }
            quote.recalculate_premium();

            state.quotes.insert(id, quote.clone());
            Ok(quote)
        }

        async fn update(&self, id: QuoteId, draft: &Quote) -> Result<Quote, BackendError> {
            self.simulate_latency().await;

            let mut state = self.state.write().await;
            let existing = state
                .quotes
                .get_mut(&id.value())
                .ok_or_else(|| BackendError::not_found("Quote", id))?;

            if matches!(
                existing.status,
                QuoteStatus::Approved | QuoteStatus::Rejected
            ) {
                return Err(BackendError::conflict(format!(
                    "Cannot update quote in {} status",
                    existing.status
                )));
            }

            validate_server_side(draft)?;

            existing.business_information.name = draft.business_information.name.clone();
            existing.business_information.business_type = draft.business_information.business_type;
            existing.business_information.industry = draft.business_information.industry;
            existing.business_information.state = draft.business_information.state.clone();

            // Options are matched by coverage type; unknown types in the
            // payload are ignored, as the backend does.
            for incoming in &draft.coverage_options {
                if let Some(option) = existing
                    .coverage_options
                    .iter_mut()
                    .find(|option| option.coverage_type == incoming.coverage_type)
                {
                    option.name = incoming.name.clone();
                    option.premium = incoming.premium;
                    option.description = incoming.description.clone();
                    option.is_selected = incoming.is_selected;
                    option.is_active = incoming.is_active;
                }
            }

            existing.risk_rating = draft.risk_rating.clone();
            existing.underwriter_notes = draft.underwriter_notes.clone();

            if draft.status != existing.status {
                if !existing.status.can_transition_to(draft.status) {
                    return Err(BackendError::conflict(format!(
                        "Invalid status transition from {} to {}",
                        existing.status, draft.status
                    )));
                }
                existing.status = draft.status;
            }

            existing.recalculate_premium();
            existing.updated_at = Some(Utc::now().naive_utc());

            Ok(existing.clone())
        }

        async fn delete(&self, id: QuoteId) -> Result<(), BackendError> {
            self.simulate_latency().await;

            let mut state = self.state.write().await;
            let quote = state
                .quotes
                .get(&id.value())
                .ok_or_else(|| BackendError::not_found("Quote", id))?;

            if quote.status != QuoteStatus::Draft {
                return Err(BackendError::conflict("Only draft quotes can be deleted"));
            }

            state.quotes.remove(&id.value());
            Ok(())
        }

        async fn fetch(&self, id: QuoteId) -> Result<Quote, BackendError> {
            self.simulate_latency().await;
            self.state
                .read()
                .await
                .quotes
                .get(&id.value())
                .cloned()
                .ok_or_else(|| BackendError::not_found("Quote", id))
        }

        async fn fetch_by_number(&self, quote_number: &str) -> Result<Quote, BackendError> {
            self.simulate_latency().await;
            self.state
                .read()
                .await
                .quotes
                .values()
                .find(|quote| quote.quote_number.as_deref() == Some(quote_number))
                .cloned()
                .ok_or_else(|| BackendError::not_found("Quote", quote_number))
        }

        async fn list(&self, page: &PageRequest) -> Result<Page<Quote>, BackendError> {
            self.simulate_latency().await;
            let state = self.state.read().await;

            let mut all: Vec<Quote> = state.quotes.values().cloned().collect();
            sort_for_listing(&mut all, &page.sort);

            let total = all.len() as u64;
            let start = (page.page as usize).saturating_mul(page.size as usize);
            let content: Vec<Quote> = all
                .into_iter()
                .skip(start)
                .take(page.size as usize)
                .collect();

            Ok(Page {
                content,
                total_elements: total,
            })
        }

        async fn list_by_status(&self, status: QuoteStatus) -> Result<Vec<Quote>, BackendError> {
            self.simulate_latency().await;
            Ok(self
                .state
                .read()
                .await
                .quotes
                .values()
                .filter(|quote| quote.status == status)
                .cloned()
                .collect())
        }

        async fn search_by_name(&self, fragment: &str) -> Result<Page<Quote>, BackendError> {
            self.simulate_latency().await;
            let needle = fragment.to_lowercase();
            let content: Vec<Quote> = self
                .state
                .read()
                .await
                .quotes
                .values()
                .filter(|quote| {
                    quote
                        .business_information
                        .name
                        .to_lowercase()
                        .contains(&needle)
                })
                .cloned()
                .collect();
            let total = content.len() as u64;
            Ok(Page {
                content,
                total_elements: total,
            })
        }

        async fn list_by_state(&self, state_code: &str) -> Result<Vec<Quote>, BackendError> {
            self.simulate_latency().await;
            Ok(self
                .state
                .read()
                .await
                .quotes
                .values()
                .filter(|quote| quote.business_information.state == state_code)
                .cloned()
                .collect())
        }

        async fn premium_of(&self, id: QuoteId) -> Result<Decimal, BackendError> {
            self.simulate_latency().await;
            self.state
                .read()
                .await
                .quotes
                .get(&id.value())
                .map(|quote| total_premium(&quote.coverage_options))
                .ok_or_else(|| BackendError::not_found("Quote", id))
        }

        async fn statistics(&self) -> Result<QuoteStatistics, BackendError> {
            self.simulate_latency().await;
            let state = self.state.read().await;

            let count_status = |status: QuoteStatus| {
                state
                    .quotes
                    .values()
                    .filter(|quote| quote.status == status)
                    .count() as u64
            };

            let total_quotes = state.quotes.len() as u64;
            let total_premium_value: Decimal =
                state.quotes.values().map(|quote| quote.total_premium).sum();
            let average_premium = if total_quotes == 0 {
                Decimal::ZERO
            } else {
                (total_premium_value / Decimal::from(total_quotes))
                    .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            };

            Ok(QuoteStatistics {
                total_quotes,
                draft_quotes: count_status(QuoteStatus::Draft),
                saved_quotes: count_status(QuoteStatus::Saved),
                submitted_quotes: count_status(QuoteStatus::Submitted),
                approved_quotes: count_status(QuoteStatus::Approved),
                rejected_quotes: count_status(QuoteStatus::Rejected),
                expired_quotes: count_status(QuoteStatus::Expired),
                total_premium_value,
                average_premium,
            })
        }

        async fn submit(&self, id: QuoteId) -> Result<Quote, BackendError> {
            self.simulate_latency().await;

            let mut state = self.state.write().await;
            let quote = state
                .quotes
                .get_mut(&id.value())
                .ok_or_else(|| BackendError::not_found("Quote", id))?;

            if quote.status != QuoteStatus::Saved {
                return Err(BackendError::conflict("Only saved quotes can be submitted"));
            }
            if !quote.coverage_options.iter().any(|option| option.is_selected) {
                return Err(BackendError::conflict(
                    "Quote must have at least one selected coverage option",
                ));
            }

            quote.status = QuoteStatus::Submitted;
            quote.updated_at = Some(Utc::now().naive_utc());
            Ok(quote.clone())
        }

        async fn approve(&self, id: QuoteId) -> Result<Quote, BackendError> {
            self.simulate_latency().await;

            let mut state = self.state.write().await;
            let quote = state
                .quotes
                .get_mut(&id.value())
                .ok_or_else(|| BackendError::not_found("Quote", id))?;

            if quote.status != QuoteStatus::Submitted {
                return Err(BackendError::conflict(
                    "Only submitted quotes can be approved",
                ));
            }

            quote.status = QuoteStatus::Approved;
            quote.updated_at = Some(Utc::now().naive_utc());
            Ok(quote.clone())
        }

        async fn reject(&self, id: QuoteId, reason: &str) -> Result<Quote, BackendError> {
            self.simulate_latency().await;

            let mut state = self.state.write().await;
            let quote = state
                .quotes
                .get_mut(&id.value())
                .ok_or_else(|| BackendError::not_found("Quote", id))?;

            if quote.status != QuoteStatus::Submitted {
                return Err(BackendError::conflict(
                    "Only submitted quotes can be rejected",
                ));
            }

            quote.status = QuoteStatus::Rejected;
            quote.underwriter_notes = Some(match quote.underwriter_notes.take() {
                Some(notes) => format!("{notes}\nRejection reason: {reason}"),
                None => format!("Rejection reason: {reason}"),
            });
            quote.updated_at = Some(Utc::now().naive_utc());
            Ok(quote.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockQuoteBackend;
    use super::*;
    use rust_decimal_macros::dec;

    use crate::business::{BusinessType, Industry};
    use crate::coverage::{with_selection_toggled, CoverageType};

    fn valid_draft() -> Quote {
        let mut quote = Quote::draft();
        quote.business_information.name = "Test Business LLC".to_string();
        quote.business_information.business_type = Some(BusinessType::Retail);
        quote.business_information.industry = Some(Industry::RetailTrade);
        quote.business_information.state = "CA".to_string();
        quote
    }

    #[tokio::test]
    async fn create_assigns_identity_and_validity_window() {
        let backend = MockQuoteBackend::new();

        let created = backend.create(&valid_draft()).await.unwrap();

        assert!(created.id.is_some());
        let number = created.quote_number.as_deref().unwrap();
        assert!(number.starts_with("IQ-"), "got {number}");
        assert!(created.valid_until.is_some());
        assert!(created.created_at.is_some());
        assert_eq!(created.status, QuoteStatus::Draft);
        assert_eq!(backend.create_calls().await, 1);
    }

    #[tokio::test]
    async fn create_rejects_invalid_business_info() {
        let backend = MockQuoteBackend::new();
        let mut draft = valid_draft();
        draft.business_information.name = "A".to_string();
        draft.business_information.industry = None;

        let err = backend.create(&draft).await.unwrap_err();
        assert!(err.is_rejection());
        // Violations are keyed by field name, so messages come back in
        // field-key order.
        assert_eq!(
            err.violation_messages(),
            vec![
                "Industry is required".to_string(),
                "Business name must be at least 2 characters long".to_string(),
            ]
        );
        assert_eq!(backend.create_calls().await, 0);
    }

    #[tokio::test]
    async fn save_dispatches_on_id_presence() {
        let backend = MockQuoteBackend::new();

        let created = backend.save(&valid_draft()).await.unwrap();
        assert_eq!(backend.create_calls().await, 1);

        let mut edited = created.clone();
        edited.business_information.name = "Renamed Business LLC".to_string();
        let updated = backend.save(&edited).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.business_information.name, "Renamed Business LLC");
        assert_eq!(backend.create_calls().await, 1);
    }

    #[tokio::test]
    async fn update_matches_options_by_coverage_type() {
        let backend = MockQuoteBackend::new();
        let created = backend.create(&valid_draft()).await.unwrap();

        let mut edited = created.clone();
        edited.set_coverage_options(with_selection_toggled(
            &created.coverage_options,
            CoverageType::Property,
        ));

        let updated = backend.save(&edited).await.unwrap();
        assert_eq!(updated.total_premium, dec!(750));
        let property = updated
            .coverage_options
            .iter()
            .find(|option| option.coverage_type == CoverageType::Property)
            .unwrap();
        assert!(property.is_selected);
        // Identities assigned at create survive the update.
        assert!(property.id.is_some());
    }

    #[tokio::test]
    async fn lifecycle_walks_draft_saved_submitted_approved() {
        let backend = MockQuoteBackend::new();
        let mut quote = backend.create(&valid_draft()).await.unwrap();
        quote.set_coverage_options(with_selection_toggled(
            &quote.coverage_options,
            CoverageType::GeneralLiability,
        ));
        quote.transition_to(QuoteStatus::Saved).unwrap();
        let saved = backend.save(&quote).await.unwrap();
        assert_eq!(saved.status, QuoteStatus::Saved);

        let id = saved.id.unwrap();
        let submitted = backend.submit(id).await.unwrap();
        assert_eq!(submitted.status, QuoteStatus::Submitted);

        let approved = backend.approve(id).await.unwrap();
        assert_eq!(approved.status, QuoteStatus::Approved);
    }

    #[tokio::test]
    async fn submit_requires_saved_status_and_selection() {
        let backend = MockQuoteBackend::new();
        let created = backend.create(&valid_draft()).await.unwrap();
        let id = created.id.unwrap();

        let err = backend.submit(id).await.unwrap_err();
        assert!(matches!(err, BackendError::Conflict { .. }));
    }

    #[tokio::test]
    async fn reject_appends_reason_to_notes() {
        let mut quote = valid_draft();
        quote.set_coverage_options(with_selection_toggled(
            &quote.coverage_options,
            CoverageType::GeneralLiability,
        ));
        quote.status = QuoteStatus::Submitted;
        quote.underwriter_notes = Some("High risk area".to_string());
        let backend = MockQuoteBackend::with_quotes(vec![quote]).await;

        let rejected = backend.reject(QuoteId::new(1), "incomplete docs").await.unwrap();
        assert_eq!(rejected.status, QuoteStatus::Rejected);
        assert_eq!(
            rejected.underwriter_notes.as_deref(),
            Some("High risk area\nRejection reason: incomplete docs")
        );
    }

    #[tokio::test]
    async fn delete_permits_drafts_only() {
        let mut saved = valid_draft();
        saved.status = QuoteStatus::Saved;
        let backend = MockQuoteBackend::with_quotes(vec![valid_draft(), saved]).await;

        backend.delete(QuoteId::new(1)).await.unwrap();
        assert!(backend.fetch(QuoteId::new(1)).await.unwrap_err().is_not_found());

        let err = backend.delete(QuoteId::new(2)).await.unwrap_err();
        assert!(matches!(err, BackendError::Conflict { .. }));
    }

    #[tokio::test]
    async fn fetch_unknown_id_is_not_found() {
        let backend = MockQuoteBackend::new();
        let err = backend.fetch(QuoteId::new(999)).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn listing_pages_and_counts() {
        let mut quotes = Vec::new();
        for n in 0..5 {
            let mut quote = valid_draft();
            quote.business_information.name = format!("Business {n}");
            quotes.push(quote);
        }
        let backend = MockQuoteBackend::with_quotes(quotes).await;

        let page = backend.list(&PageRequest::new(0, 2)).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page.total_elements, 5);

        let tail = backend.list(&PageRequest::new(2, 2)).await.unwrap();
        assert_eq!(tail.len(), 1);
    }

    #[tokio::test]
    async fn search_is_case_insensitive() {
        let backend = MockQuoteBackend::with_quotes(vec![valid_draft()]).await;

        let hits = backend.search_by_name("test business").await.unwrap();
        assert_eq!(hits.total_elements, 1);

        let misses = backend.search_by_name("bakery").await.unwrap();
        assert!(misses.is_empty());
    }

    #[tokio::test]
    async fn statistics_counts_and_averages() {
        let mut draft = valid_draft();
        draft.set_coverage_options(with_selection_toggled(
            &draft.coverage_options,
            CoverageType::GeneralLiability,
        ));
        let mut saved = valid_draft();
        saved.status = QuoteStatus::Saved;
        saved.set_coverage_options(with_selection_toggled(
            &saved.coverage_options,
            CoverageType::Property,
        ));
        let backend = MockQuoteBackend::with_quotes(vec![draft, saved]).await;

        let stats = backend.statistics().await.unwrap();
        assert_eq!(stats.total_quotes, 2);
        assert_eq!(stats.draft_quotes, 1);
        assert_eq!(stats.saved_quotes, 1);
        assert_eq!(stats.total_premium_value, dec!(1250));
        assert_eq!(stats.average_premium, dec!(625.00));
    }

    #[test]
    fn statistics_serialize_in_camel_case() {
        let stats = QuoteStatistics {
            total_quotes: 3,
            average_premium: dec!(516.67),
            total_premium_value: dec!(1550),
            ..Default::default()
        };

        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["totalQuotes"], 3);
        assert_eq!(value["averagePremium"], serde_json::json!(516.67));
        assert_eq!(value["totalPremiumValue"], serde_json::json!(1550.0));
    }
}
