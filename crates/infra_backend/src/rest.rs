//! REST Quote Backend Adapter
//!
//! This module provides the production adapter for the quote domain,
//! implementing the `QuoteBackend` trait against the quoting service's
//! REST API via `reqwest`.
//!
//! # Overview
//!
//! The `RestQuoteBackend` bridges the domain port to HTTP. It:
//!
//! - Sends write bodies through [`QuoteDraft`] so backend-owned columns
//!   never travel outbound
//! - Deserializes responses directly into domain types (the domain model
//!   mirrors the wire format field for field)
//! - Translates HTTP outcomes into `BackendError` variants
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_backend::{ClientConfig, RestQuoteBackend};
//! use domain_quote::QuoteBackend;
//! use std::sync::Arc;
//!
//! let backend = RestQuoteBackend::new(&ClientConfig::from_env()?)?;
//! let port: Arc<dyn QuoteBackend> = Arc::new(backend);
//! let quote = port.fetch(quote_id).await?;
//! ```
//!
//! # Error Handling
//!
//! HTTP outcomes are mapped to `BackendError` variants:
//! - 404 -> `BackendError::NotFound`
//! - 400 with a `validationErrors` map -> `BackendError::Rejected`
//! - 400 without one -> `BackendError::BadRequest`
//! - 409/422 -> `BackendError::Conflict`
//! - other non-success statuses -> `BackendError::Service`
//! - request timeout -> `BackendError::Timeout`
//! - connection failure -> `BackendError::Transport`
//! - unreadable success body -> `BackendError::Decode` on reads, and
//!   `BackendError::Ambiguous` on writes, because the write may have
//!   been persisted even though its confirmation was lost

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, instrument};

use quote_kernel::{BackendError, DomainPort, Page, PageRequest, QuoteId};

use domain_quote::{Quote, QuoteBackend, QuoteStatistics, QuoteStatus};

use crate::config::ClientConfig;
use crate::payload::QuoteDraft;

/// HTTP implementation of the QuoteBackend trait
///
/// Holds a pooled `reqwest::Client` and the resolved quotes collection
/// URL. Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct RestQuoteBackend {
    http: reqwest::Client,
    quotes_url: String,
    timeout_ms: u64,
}

impl RestQuoteBackend {
    /// Creates an adapter for the backend described by `config`
    ///
    /// # Errors
    ///
    /// `BackendError::Transport` when the HTTP client cannot be built,
    /// e.g. when no TLS backend is available.
    pub fn new(config: &ClientConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|error| BackendError::transport_from("failed to build HTTP client", error))?;

        Ok(Self {
            http,
            quotes_url: config.quotes_url(),
            timeout_ms: config.timeout_secs * 1000,
        })
    }

    /// Sends a prepared request, mapping transport-level failures
    async fn dispatch(
        &self,
        operation: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, BackendError> {
        request.send().await.map_err(|error| {
            if error.is_timeout() {
                BackendError::timeout(operation, self.timeout_ms)
            } else {
                BackendError::transport_from(format!("{operation}: request failed"), error)
            }
        })
    }
}

// Mark as a domain port
impl DomainPort for RestQuoteBackend {}

#[async_trait]
impl QuoteBackend for RestQuoteBackend {
    #[instrument(skip(self, draft), fields(status = %draft.status))]
    async fn create(&self, draft: &Quote) -> Result<Quote, BackendError> {
        debug!("Creating quote");

        let body = QuoteDraft::from_quote(draft);
        let request = self.http.post(&self.quotes_url).json(&body);
        let response = self.dispatch("create_quote", request).await?;
        if !response.status().is_success() {
            return Err(response_error(response, "new").await);
        }

        response.json::<Quote>().await.map_err(write_ambiguous)
    }

    #[instrument(skip(self, draft), fields(quote_id = %id))]
    async fn update(&self, id: QuoteId, draft: &Quote) -> Result<Quote, BackendError> {
        debug!("Updating quote");

        let body = QuoteDraft::from_quote(draft);
        let request = self.http.put(format!("{}/{}", self.quotes_url, id)).json(&body);
        let response = self.dispatch("update_quote", request).await?;
        if !response.status().is_success() {
            return Err(response_error(response, &id.to_string()).await);
        }

        response.json::<Quote>().await.map_err(write_ambiguous)
    }

    #[instrument(skip(self), fields(quote_id = %id))]
    async fn delete(&self, id: QuoteId) -> Result<(), BackendError> {
        debug!("Deleting quote");

        let request = self.http.delete(format!("{}/{}", self.quotes_url, id));
        let response = self.dispatch("delete_quote", request).await?;
        if !response.status().is_success() {
            return Err(response_error(response, &id.to_string()).await);
        }

        Ok(())
    }

    #[instrument(skip(self), fields(quote_id = %id))]
    async fn fetch(&self, id: QuoteId) -> Result<Quote, BackendError> {
        debug!("Fetching quote by ID");

        let request = self.http.get(format!("{}/{}", self.quotes_url, id));
        let response = self.dispatch("fetch_quote", request).await?;
        if !response.status().is_success() {
            return Err(response_error(response, &id.to_string()).await);
        }

        response.json::<Quote>().await.map_err(read_decode)
    }

    #[instrument(skip(self))]
    async fn fetch_by_number(&self, quote_number: &str) -> Result<Quote, BackendError> {
        debug!("Fetching quote by number");

        let request = self
            .http
            .get(format!("{}/number/{}", self.quotes_url, quote_number));
        let response = self.dispatch("fetch_quote_by_number", request).await?;
        if !response.status().is_success() {
            return Err(response_error(response, quote_number).await);
        }

        response.json::<Quote>().await.map_err(read_decode)
    }

    #[instrument(skip(self), fields(page = page.page, size = page.size))]
    async fn list(&self, page: &PageRequest) -> Result<Page<Quote>, BackendError> {
        debug!("Listing quotes");

        let page_param = page.page.to_string();
        let size_param = page.size.to_string();
        let request = self.http.get(&self.quotes_url).query(&[
            ("page", page_param.as_str()),
            ("size", size_param.as_str()),
            ("sort", page.sort.as_str()),
        ]);
        let response = self.dispatch("list_quotes", request).await?;
        if !response.status().is_success() {
            return Err(response_error(response, "all").await);
        }

        response.json::<Page<Quote>>().await.map_err(read_decode)
    }

    #[instrument(skip(self), fields(status = %status))]
    async fn list_by_status(&self, status: QuoteStatus) -> Result<Vec<Quote>, BackendError> {
        debug!("Listing quotes by status");

        let request = self
            .http
            .get(format!("{}/status/{}", self.quotes_url, status.as_str()));
        let response = self.dispatch("list_quotes_by_status", request).await?;
        if !response.status().is_success() {
            return Err(response_error(response, status.as_str()).await);
        }

        response.json::<Vec<Quote>>().await.map_err(read_decode)
    }

    #[instrument(skip(self))]
    async fn search_by_name(&self, fragment: &str) -> Result<Page<Quote>, BackendError> {
        debug!("Searching quotes by business name");

        let request = self.http.get(format!("{}/search", self.quotes_url)).query(&[
            ("businessName", fragment),
            ("page", "0"),
            ("size", "20"),
        ]);
        let response = self.dispatch("search_quotes", request).await?;
        if !response.status().is_success() {
            return Err(response_error(response, fragment).await);
        }

        response.json::<Page<Quote>>().await.map_err(read_decode)
    }

    #[instrument(skip(self))]
    async fn list_by_state(&self, state: &str) -> Result<Vec<Quote>, BackendError> {
        debug!("Listing quotes by state");

        let request = self.http.get(format!("{}/state/{}", self.quotes_url, state));
        let response = self.dispatch("list_quotes_by_state", request).await?;
        if !response.status().is_success() {
            return Err(response_error(response, state).await);
        }

        response.json::<Vec<Quote>>().await.map_err(read_decode)
    }

    #[instrument(skip(self), fields(quote_id = %id))]
    async fn premium_of(&self, id: QuoteId) -> Result<Decimal, BackendError> {
        debug!("Requesting premium calculation");

        let request = self.http.get(format!("{}/{}/premium", self.quotes_url, id));
        let response = self.dispatch("calculate_premium", request).await?;
        if !response.status().is_success() {
            return Err(response_error(response, &id.to_string()).await);
        }

        let body = response.json::<PremiumBody>().await.map_err(read_decode)?;
        Ok(body.total_premium)
    }

    #[instrument(skip(self))]
    async fn statistics(&self) -> Result<QuoteStatistics, BackendError> {
        debug!("Fetching quote statistics");

        let request = self.http.get(format!("{}/statistics", self.quotes_url));
        let response = self.dispatch("fetch_statistics", request).await?;
        if !response.status().is_success() {
            return Err(response_error(response, "statistics").await);
        }

        response.json::<QuoteStatistics>().await.map_err(read_decode)
    }

    #[instrument(skip(self), fields(quote_id = %id))]
    async fn submit(&self, id: QuoteId) -> Result<Quote, BackendError> {
        debug!("Submitting quote");

        let request = self
            .http
            .post(format!("{}/{}/submit", self.quotes_url, id))
            .json(&serde_json::json!({}));
        let response = self.dispatch("submit_quote", request).await?;
        if !response.status().is_success() {
            return Err(response_error(response, &id.to_string()).await);
        }

        response.json::<Quote>().await.map_err(write_ambiguous)
    }

    #[instrument(skip(self), fields(quote_id = %id))]
    async fn approve(&self, id: QuoteId) -> Result<Quote, BackendError> {
        debug!("Approving quote");

        let request = self
            .http
            .post(format!("{}/{}/approve", self.quotes_url, id))
            .json(&serde_json::json!({}));
        let response = self.dispatch("approve_quote", request).await?;
        if !response.status().is_success() {
            return Err(response_error(response, &id.to_string()).await);
        }

        response.json::<Quote>().await.map_err(write_ambiguous)
    }

    #[instrument(skip(self, reason), fields(quote_id = %id))]
    async fn reject(&self, id: QuoteId, reason: &str) -> Result<Quote, BackendError> {
        debug!("Rejecting quote");

        let request = self
            .http
            .post(format!("{}/{}/reject", self.quotes_url, id))
            .query(&[("reason", reason)])
            .json(&serde_json::json!({}));
        let response = self.dispatch("reject_quote", request).await?;
        if !response.status().is_success() {
            return Err(response_error(response, &id.to_string()).await);
        }

        response.json::<Quote>().await.map_err(write_ambiguous)
    }
}

// =============================================================================
// Response Translation
// =============================================================================

/// Error payload the backend attaches to non-success statuses
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    validation_errors: Option<BTreeMap<String, String>>,
}

/// Body of the premium calculation endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PremiumBody {
    #[serde(with = "rust_decimal::serde::float")]
    total_premium: Decimal,
}

/// Reads the error body of a failed response and classifies it
async fn response_error(response: reqwest::Response, subject: &str) -> BackendError {
    let status = response.status().as_u16();
    let body = response.json::<ErrorBody>().await.unwrap_or_default();
    classify_status(status, body, subject)
}

fn classify_status(status: u16, body: ErrorBody, subject: &str) -> BackendError {
    let message = body.message.unwrap_or_else(|| format!("HTTP {status}"));
    match status {
        404 => BackendError::not_found("Quote", subject),
        400 => match body.validation_errors {
            Some(violations) if !violations.is_empty() => BackendError::rejected(violations),
            _ => BackendError::BadRequest { message },
        },
        409 | 422 => BackendError::conflict(message),
        _ => BackendError::service(status, message),
    }
}

fn read_decode(error: reqwest::Error) -> BackendError {
    BackendError::decode(error.to_string())
}

fn write_ambiguous(error: reqwest::Error) -> BackendError {
    BackendError::ambiguous(format!("write accepted but confirmation unreadable: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_builds_from_default_config() {
        let backend = RestQuoteBackend::new(&ClientConfig::default()).unwrap();
        assert_eq!(backend.quotes_url, "http://localhost:8080/api/quotes");
        assert_eq!(backend.timeout_ms, 30_000);
    }

    #[test]
    fn test_not_found_classification() {
        let error = classify_status(404, ErrorBody::default(), "42");
        assert!(error.is_not_found());
        assert!(error.to_string().contains("42"));
    }

    #[test]
    fn test_rejection_classification() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"validationErrors": {"businessInformation.name": "Business name is required"}}"#,
        )
        .unwrap();
        let error = classify_status(400, body, "new");
        assert!(error.is_rejection());
        assert_eq!(error.violation_messages(), vec!["Business name is required"]);
    }

    #[test]
    fn test_plain_bad_request_classification() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"message": "Malformed JSON request"}"#).unwrap();
        let error = classify_status(400, body, "new");
        assert!(matches!(error, BackendError::BadRequest { .. }));
        assert!(error.to_string().contains("Malformed JSON request"));
    }

    #[test]
    fn test_lifecycle_conflict_classification() {
        for status in [409, 422] {
            let body: ErrorBody =
                serde_json::from_str(r#"{"message": "Only saved quotes can be submitted"}"#)
                    .unwrap();
            let error = classify_status(status, body, "7");
            assert!(
                matches!(error, BackendError::Conflict { .. }),
                "status {status} should classify as a conflict"
            );
            assert!(error.to_string().contains("Only saved quotes can be submitted"));
        }
    }

    #[test]
    fn test_server_failure_classification() {
        let error = classify_status(500, ErrorBody::default(), "all");
        assert!(error.is_transient());
        assert!(error.to_string().contains("500"));
    }

    #[test]
    fn test_empty_validation_map_falls_back_to_bad_request() {
        let body: ErrorBody = serde_json::from_str(r#"{"validationErrors": {}}"#).unwrap();
        let error = classify_status(400, body, "new");
        assert!(matches!(error, BackendError::BadRequest { .. }));
    }
}
