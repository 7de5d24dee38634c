//! Quote Client
//!
//! This module provides `QuoteClient`, the reconciling facade the interface
//! layer talks to. It owns the observable [`QuoteStore`], a [`QuoteBackend`]
//! port, and an optional [`LocalQuoteCache`], and keeps the three consistent:
//! backend responses flow into the store, store snapshots flow into the
//! cache, and failures leave the store exactly as it was.
//!
//! # Save Flow
//!
//! `save_current` runs the gauntlet the UI depends on:
//!
//! 1. Client-side validation; an invalid quote produces
//!    [`ClientError::Invalid`] and no request is sent.
//! 2. An in-flight guard; a save that overlaps a running one returns
//!    [`SaveOutcome::AlreadyInFlight`] instead of issuing a duplicate
//!    create.
//! 3. Create or update is chosen from id presence, with the outbound body
//!    sanitized by the REST adapter.
//! 4. The returned quote replaces the current one, unless the store has
//!    moved on in the meantime, in which case the response is discarded.
//!
//! # Stale Responses
//!
//! Every store-reconciling operation takes a token from a monotonically
//! increasing sequence when it starts. A backend response is applied only
//! while its token is still the newest issued; a response to an abandoned
//! request (the user began a different draft or opened another quote) is
//! logged at warn and dropped.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_backend::{ClientConfig, QuoteClient, RestQuoteBackend};
//! use std::sync::Arc;
//!
//! let config = ClientConfig::from_env()?;
//! let backend = Arc::new(RestQuoteBackend::new(&config)?);
//! let client = QuoteClient::new(backend);
//!
//! client.begin_draft();
//! // ... edit through the store ...
//! let outcome = client.save_current().await?;
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use quote_kernel::{BackendError, Page, PageRequest, QuoteId};

use domain_quote::{
    BusinessInfoValidator, Quote, QuoteBackend, QuoteBackendExt, QuoteStatistics, QuoteStore,
};

use crate::cache::LocalQuoteCache;

/// Result of a save attempt that did not fail outright
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// The quote was persisted; the stored copy is returned
    Saved(Quote),
    /// Another save was already running; this request was ignored
    AlreadyInFlight,
}

/// Error type for client operations
#[derive(Debug, Error)]
pub enum ClientError {
    /// Client-side validation failed; no request was sent
    #[error("validation failed: {}", .errors.join("; "))]
    Invalid { errors: Vec<String> },

    /// The operation needs a current quote (a persisted one, for
    /// lifecycle calls) and the store does not hold one
    #[error("no current quote to operate on")]
    NoCurrentQuote,

    /// The backend reported a failure
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl ClientError {
    /// Messages destined for the validation display: the ordered
    /// client-side messages for [`ClientError::Invalid`], the server's
    /// field map for a backend rejection, empty otherwise
    pub fn validation_messages(&self) -> Vec<String> {
        match self {
            ClientError::Invalid { errors } => errors.clone(),
            ClientError::Backend(error) => error.violation_messages(),
            ClientError::NoCurrentQuote => Vec::new(),
        }
    }
}

/// Reconciling client over a store, a backend port and an optional cache
pub struct QuoteClient {
    store: QuoteStore,
    backend: Arc<dyn QuoteBackend>,
    cache: Option<LocalQuoteCache>,
    saving: AtomicBool,
    epoch: AtomicU64,
}

impl QuoteClient {
    /// Creates a client with a fresh, empty store
    pub fn new(backend: Arc<dyn QuoteBackend>) -> Self {
        Self::with_store(backend, QuoteStore::new())
    }

    /// Creates a client around an existing store, e.g. one the interface
    /// layer already subscribed to
    pub fn with_store(backend: Arc<dyn QuoteBackend>, store: QuoteStore) -> Self {
        Self {
            store,
            backend,
            cache: None,
            saving: AtomicBool::new(false),
            epoch: AtomicU64::new(0),
        }
    }

    /// Attaches a local cache; snapshots of the current quote and the
    /// fetched list are mirrored into it from now on
    pub fn with_cache(mut self, cache: LocalQuoteCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// The store this client reconciles into
    pub fn store(&self) -> &QuoteStore {
        &self.store
    }

    // ========================================================================
    // Save Flow
    // ========================================================================

    /// Validates and persists the current quote
    ///
    /// Create vs update is chosen from id presence. On success the stored
    /// copy (with backend-assigned id, quote number and timestamps) becomes
    /// the current quote. On any failure the store is left untouched.
    ///
    /// # Errors
    ///
    /// [`ClientError::NoCurrentQuote`] when the store is empty,
    /// [`ClientError::Invalid`] when client-side validation fails, and
    /// [`ClientError::Backend`] for backend failures.
    #[instrument(skip(self), fields(save_id = %Uuid::new_v4()))]
    pub async fn save_current(&self) -> Result<SaveOutcome, ClientError> {
        let Some(quote) = self.store.current() else {
            return Err(ClientError::NoCurrentQuote);
        };

        let result = BusinessInfoValidator::validate_info(&quote.business_information);
        if !result.is_valid {
            info!("Rejecting save on client-side validation");
            return Err(ClientError::Invalid {
                errors: result.errors,
            });
        }

        if self
            .saving
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            info!("Ignoring save request while another save is in flight");
            return Ok(SaveOutcome::AlreadyInFlight);
        }

        let outcome = self.perform_save(quote).await;
        self.saving.store(false, Ordering::SeqCst);
        outcome
    }

    async fn perform_save(&self, quote: Quote) -> Result<SaveOutcome, ClientError> {
        let token = self.issue_token();
        let saved = self.backend.save(&quote).await?;
        info!(
            quote_id = ?saved.id,
            quote_number = ?saved.quote_number,
            "Quote persisted"
        );

        self.reconcile(token, saved.clone());
        Ok(SaveOutcome::Saved(saved))
    }

    // ========================================================================
    // Store-Reconciling Operations
    // ========================================================================

    /// Fetches a quote and makes it current
    #[instrument(skip(self), fields(quote_id = %id))]
    pub async fn load(&self, id: QuoteId) -> Result<Quote, ClientError> {
        info!("Loading quote");

        let token = self.issue_token();
        let quote = self.backend.fetch(id).await?;
        self.reconcile(token, quote.clone());
        Ok(quote)
    }

    /// Fetches a quote by its quote number and makes it current
    #[instrument(skip(self))]
    pub async fn load_by_number(&self, quote_number: &str) -> Result<Quote, ClientError> {
        info!("Loading quote by number");

        let token = self.issue_token();
        let quote = self.backend.fetch_by_number(quote_number).await?;
        self.reconcile(token, quote.clone());
        Ok(quote)
    }

    /// Makes an already-fetched quote current, e.g. a row picked from
    /// the quote list
    #[instrument(skip(self, quote), fields(quote_id = ?quote.id))]
    pub fn open(&self, quote: Quote) {
        info!("Opening quote");

        self.issue_token();
        self.store.set_current(Some(quote));
        self.cache_current();
    }

    /// Replaces the current quote with a fresh default draft
    #[instrument(skip(self))]
    pub fn begin_draft(&self) -> Quote {
        info!("Beginning a fresh draft");

        self.issue_token();
        let draft = self.store.begin_draft();
        self.cache_current();
        draft
    }

    /// Deletes a quote on the backend, clearing the store when the
    /// deleted quote was the current one
    #[instrument(skip(self), fields(quote_id = %id))]
    pub async fn remove(&self, id: QuoteId) -> Result<(), ClientError> {
        info!("Deleting quote");

        let token = self.issue_token();
        self.backend.delete(id).await?;

        if !self.token_is_newest(token) {
            warn!("Discarding store cleanup for a stale delete response");
            return Ok(());
        }
        let was_current = self.store.current().and_then(|quote| quote.id) == Some(id);
        if was_current {
            self.store.set_current(None);
            self.cache_current();
        }
        Ok(())
    }

    /// Submits the current quote for underwriting and adopts the
    /// returned status
    #[instrument(skip(self))]
    pub async fn submit_current(&self) -> Result<Quote, ClientError> {
        let id = self.current_persisted_id()?;
        info!(quote_id = %id, "Submitting current quote");

        let token = self.issue_token();
        let submitted = self.backend.submit(id).await?;
        self.reconcile(token, submitted.clone());
        Ok(submitted)
    }

    /// Approves the current (submitted) quote and adopts the result
    #[instrument(skip(self))]
    pub async fn approve_current(&self) -> Result<Quote, ClientError> {
        let id = self.current_persisted_id()?;
        info!(quote_id = %id, "Approving current quote");

        let token = self.issue_token();
        let approved = self.backend.approve(id).await?;
        self.reconcile(token, approved.clone());
        Ok(approved)
    }

    /// Rejects the current (submitted) quote with a reason and adopts
    /// the result
    #[instrument(skip(self, reason))]
    pub async fn reject_current(&self, reason: &str) -> Result<Quote, ClientError> {
        let id = self.current_persisted_id()?;
        info!(quote_id = %id, "Rejecting current quote");

        let token = self.issue_token();
        let rejected = self.backend.reject(id, reason).await?;
        self.reconcile(token, rejected.clone());
        Ok(rejected)
    }

    // ========================================================================
    // Reads and Cache
    // ========================================================================

    /// Fetches one page of quotes and refreshes the list cache
    ///
    /// Never touches the current quote, and never invalidates an
    /// in-flight save.
    #[instrument(skip(self), fields(page = page.page, size = page.size))]
    pub async fn refresh_list(&self, page: &PageRequest) -> Result<Page<Quote>, ClientError> {
        info!("Refreshing quote list");

        let listed = self.backend.list(page).await?;
        if let Some(cache) = &self.cache {
            cache.store_all(&listed.content);
        }
        Ok(listed)
    }

    /// Aggregate statistics across all quotes
    pub async fn statistics(&self) -> Result<QuoteStatistics, ClientError> {
        Ok(self.backend.statistics().await?)
    }

    /// Restores the cached working quote into the store, when a cache is
    /// attached and holds a readable snapshot
    pub fn restore_cached_current(&self) -> Option<Quote> {
        let quote = self.cache.as_ref()?.load_current()?;
        self.issue_token();
        self.store.set_current(Some(quote.clone()));
        Some(quote)
    }

    /// The last cached quote list, without going to the backend
    pub fn cached_list(&self) -> Option<Vec<Quote>> {
        self.cache.as_ref()?.load_all()
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn issue_token(&self) -> u64 {
        self.epoch.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn token_is_newest(&self, token: u64) -> bool {
        self.epoch.load(Ordering::SeqCst) == token
    }

    /// Applies a backend response to the store unless the store has
    /// moved on since the request was issued
    fn reconcile(&self, token: u64, quote: Quote) {
        if !self.token_is_newest(token) {
            warn!(quote_id = ?quote.id, "Discarding stale backend response");
            return;
        }
        self.store.set_current(Some(quote));
        self.cache_current();
    }

    fn cache_current(&self) {
        if let Some(cache) = &self.cache {
            cache.store_current(self.store.current().as_ref());
        }
    }

    fn current_persisted_id(&self) -> Result<QuoteId, ClientError> {
        self.store
            .current()
            .and_then(|quote| quote.id)
            .ok_or(ClientError::NoCurrentQuote)
    }
}

impl fmt::Debug for QuoteClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuoteClient")
            .field("cached", &self.cache.is_some())
            .field("saving", &self.saving)
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}
