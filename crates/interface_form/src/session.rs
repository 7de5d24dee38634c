//! Screen session for the quoting workflow.
//!
//! [`QuoteSession`] sits at the top of the client stack: it owns the form,
//! the coverage selector and the summary, drives a [`QuoteClient`], and
//! turns every outcome into a [`Notice`] the screen can render. A failed
//! call never breaks the session; the form stays editable and the next
//! attempt starts clean.
//!
//! # Save Flow
//!
//! [`QuoteSession::save`] marks every field touched, validates locally (an
//! invalid form produces a validation notice and no request), then hands
//! off to [`QuoteClient::save_current`]. Exactly one notice reports the
//! outcome: a success line on create or update, a warning plus an
//! automatic list re-fetch when the write confirmation was unreadable, the
//! server's field messages merged into the validation notice when the
//! payload was rejected, or a single generic failure for anything else. A
//! save that overlapped a running one is dropped silently; the running
//! save's notice is the one notification.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use quote_kernel::{PageRequest, QuoteId};

use domain_quote::{Quote, QuoteStore};
use infra_backend::{ClientError, QuoteClient, SaveOutcome};

use crate::coverage_panel::CoverageSelector;
use crate::form::BusinessInfoForm;
use crate::notice::Notice;
use crate::summary::QuoteSummary;

/// Whether saving will create a quote or update one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

impl FormMode {
    /// Label of the save button in this mode.
    pub fn save_label(&self) -> &'static str {
        match self {
            FormMode::Create => "Save Quote",
            FormMode::Edit => "Update Quote",
        }
    }
}

/// One editing surface over the quoting client.
pub struct QuoteSession {
    client: Arc<QuoteClient>,
    form: BusinessInfoForm,
    selector: CoverageSelector,
    summary: QuoteSummary,
    notices: Mutex<Vec<Notice>>,
}

impl QuoteSession {
    /// Builds a session around a client, binding the form, the selector
    /// and the summary to the client's store.
    pub fn new(client: Arc<QuoteClient>) -> Self {
        let store = client.store().clone();
        Self {
            form: BusinessInfoForm::bind(&store),
            selector: CoverageSelector::bind(&store),
            summary: QuoteSummary::bind(&store),
            client,
            notices: Mutex::new(Vec::new()),
        }
    }

    /// The form bound to this session.
    pub fn form(&self) -> &BusinessInfoForm {
        &self.form
    }

    /// The coverage selection panel.
    pub fn selector(&self) -> &CoverageSelector {
        &self.selector
    }

    /// The summary read model.
    pub fn summary(&self) -> &QuoteSummary {
        &self.summary
    }

    /// The underlying client.
    pub fn client(&self) -> &QuoteClient {
        &self.client
    }

    /// The store this session edits through.
    pub fn store(&self) -> &QuoteStore {
        self.client.store()
    }

    // ========================================================================
    // Mode and Notices
    // ========================================================================

    /// `Create` until the current quote has a backend id, `Edit` after.
    pub fn mode(&self) -> FormMode {
        match self.client.store().current() {
            Some(quote) if quote.is_persisted() => FormMode::Edit,
            _ => FormMode::Create,
        }
    }

    /// Label for the save button in the current mode.
    pub fn save_label(&self) -> &'static str {
        self.mode().save_label()
    }

    /// Every notice pushed so far, oldest first.
    pub fn notices(&self) -> Vec<Notice> {
        self.lock_notices().clone()
    }

    /// The most recent notice.
    pub fn last_notice(&self) -> Option<Notice> {
        self.lock_notices().last().cloned()
    }

    /// Clears the notice feed.
    pub fn clear_notices(&self) {
        self.lock_notices().clear();
    }

    // ========================================================================
    // Save Flow
    // ========================================================================

    /// Validates and saves the current quote, reporting the outcome
    /// through the notice feed.
    pub async fn save(&self) {
        self.form.touch_all();

        let result = self.form.validate();
        if !result.is_valid {
            debug!(
                errors = result.errors.len(),
                "save blocked by client-side validation"
            );
            self.push_notice(Notice::validation(result.errors));
            return;
        }

        let was_update = self.mode() == FormMode::Edit;
        match self.client.save_current().await {
            Ok(SaveOutcome::Saved(saved)) => {
                info!(quote_id = ?saved.id, "quote saved");
                let notice = if was_update {
                    Notice::updated(&saved)
                } else {
                    Notice::saved(&saved)
                };
                self.push_notice(notice);
                self.refresh_list_quietly().await;
            }
            Ok(SaveOutcome::AlreadyInFlight) => {
                debug!("save ignored: another save is in flight");
            }
            Err(ClientError::Backend(error)) if error.is_ambiguous() => {
                warn!("save outcome ambiguous: {error}");
                self.push_notice(Notice::ambiguous());
                self.refresh_list_quietly().await;
            }
            Err(error) => {
                let messages = error.validation_messages();
                if messages.is_empty() {
                    warn!("save failed: {error}");
                    self.push_notice(Notice::save_failed());
                } else {
                    self.push_notice(Notice::validation(messages));
                }
            }
        }
    }

    // ========================================================================
    // Quote Management
    // ========================================================================

    /// Starts a fresh draft and clears the form's touched flags.
    pub fn new_quote(&self) {
        self.client.begin_draft();
        self.form.reset_touched();
        self.push_notice(Notice::new_quote_ready());
    }

    /// Opens a fetched quote for editing.
    pub fn edit(&self, quote: Quote) {
        self.client.open(quote.clone());
        self.form.reset_touched();
        self.push_notice(Notice::editing(&quote));
    }

    /// Deletes a quote and re-fetches the list; the store is cleared by
    /// the client when it held that quote.
    ///
    /// # Errors
    ///
    /// Propagates the client error; the backend refuses to delete
    /// anything but a draft.
    pub async fn delete(&self, id: QuoteId) -> Result<(), ClientError> {
        self.client.remove(id).await?;
        self.refresh_list_quietly().await;
        Ok(())
    }

    /// Sets or clears the underwriter notes on the current quote.
    pub fn update_underwriter_notes(&self, notes: Option<String>) {
        self.client.store().update_underwriter_notes(notes);
    }

    // ========================================================================
    // Lifecycle Pass-Throughs
    // ========================================================================

    /// Submits the current quote for underwriting.
    ///
    /// # Errors
    ///
    /// Propagates the client error unchanged.
    pub async fn submit(&self) -> Result<Quote, ClientError> {
        self.client.submit_current().await
    }

    /// Approves the current, submitted quote.
    ///
    /// # Errors
    ///
    /// Propagates the client error unchanged.
    pub async fn approve(&self) -> Result<Quote, ClientError> {
        self.client.approve_current().await
    }

    /// Rejects the current, submitted quote with a reason.
    ///
    /// # Errors
    ///
    /// Propagates the client error unchanged.
    pub async fn reject(&self, reason: &str) -> Result<Quote, ClientError> {
        self.client.reject_current(reason).await
    }

    async fn refresh_list_quietly(&self) {
        if let Err(error) = self.client.refresh_list(&PageRequest::default()).await {
            warn!("quote list refresh failed: {error}");
        }
    }

    fn push_notice(&self, notice: Notice) {
        self.lock_notices().push(notice);
    }

    fn lock_notices(&self) -> MutexGuard<'_, Vec<Notice>> {
        self.notices.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for QuoteSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuoteSession")
            .field("mode", &self.mode())
            .field("notices", &self.lock_notices().len())
            .finish()
    }
}
