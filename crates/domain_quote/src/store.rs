//! Observable holder for the quote being worked on.
//!
//! [`QuoteStore`] owns the single "current" quote and pushes every
//! replacement to registered subscribers, so the form, the coverage panel
//! and the summary stay in sync without polling. The store is a cheap
//! clonable handle; clones share the same state.
//!
//! Subscribers are plain callbacks invoked synchronously on the thread
//! that performed the update, after all internal locks are released. A
//! callback may therefore read from or write to the store, though a write
//! triggers a nested notification round.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use tracing::debug;

use crate::business::BusinessInfoUpdate;
use crate::coverage::CoverageOption;
use crate::events::QuoteStateChanged;
use crate::quote::Quote;

type SubscriberFn = Arc<dyn Fn(Option<&Quote>) + Send + Sync>;
type EventHookFn = Arc<dyn Fn(&QuoteStateChanged) + Send + Sync>;

struct StoreInner {
    current: Mutex<Option<Quote>>,
    subscribers: Mutex<Vec<(u64, SubscriberFn)>>,
    next_subscriber_id: AtomicU64,
    event_hook: Mutex<Option<EventHookFn>>,
}

/// Shared, observable holder of the current quote.
#[derive(Clone)]
pub struct QuoteStore {
    inner: Arc<StoreInner>,
}

impl QuoteStore {
    /// Creates an empty store with no current quote.
    pub fn new() -> Self {
        QuoteStore {
            inner: Arc::new(StoreInner {
                current: Mutex::new(None),
                subscribers: Mutex::new(Vec::new()),
                next_subscriber_id: AtomicU64::new(1),
                event_hook: Mutex::new(None),
            }),
        }
    }

    /// Snapshot of the current quote, if any.
    pub fn current(&self) -> Option<Quote> {
        self.inner
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the current quote and notifies every subscriber, whether
    /// or not the new value differs from the old one.
    pub fn set_current(&self, quote: Option<Quote>) {
        let (event, snapshot) = {
            let mut current = self
                .inner
                .current
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let old = current.take();
            *current = quote;
            let event = QuoteStateChanged::from_transition(old.as_ref(), current.as_ref());
            (event, current.clone())
        };

        debug!(
            "Current quote replaced: id={:?}, changed={:?}",
            event.quote_id,
            event.changed_names()
        );

        let hook = self
            .inner
            .event_hook
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(hook) = hook {
            hook(&event);
        }

        self.notify(snapshot.as_ref());
    }

    /// Registers a subscriber and immediately invokes it with the current
    /// state. The returned [`Subscription`] detaches the subscriber when
    /// dropped.
    pub fn subscribe(
        &self,
        subscriber: impl Fn(Option<&Quote>) + Send + Sync + 'static,
    ) -> Subscription {
        let id = self.inner.next_subscriber_id.fetch_add(1, Ordering::Relaxed);
        let subscriber: SubscriberFn = Arc::new(subscriber);

        self.inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::clone(&subscriber)));

        let snapshot = self.current();
        subscriber(snapshot.as_ref());

        Subscription {
            id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Applies edited business fields to the current quote, starting a
    /// fresh draft when there is none.
    pub fn update_business_info(&self, update: BusinessInfoUpdate) {
        let mut quote = self.current().unwrap_or_else(Quote::draft);
        quote.apply_business_update(update);
        self.set_current(Some(quote));
    }

    /// Replaces the coverage selection on the current quote, recomputing
    /// the total premium. Starts a fresh draft when there is none.
    pub fn update_coverage_options(&self, options: Vec<CoverageOption>) {
        let mut quote = self.current().unwrap_or_else(Quote::draft);
        quote.set_coverage_options(options);
        self.set_current(Some(quote));
    }

    /// Sets or clears the underwriter notes on the current quote.
    pub fn update_underwriter_notes(&self, notes: Option<String>) {
        let mut quote = self.current().unwrap_or_else(Quote::draft);
        quote.set_underwriter_notes(notes);
        self.set_current(Some(quote));
    }

    /// Installs a fresh draft as the current quote and returns it.
    pub fn begin_draft(&self) -> Quote {
        let draft = Quote::draft();
        self.set_current(Some(draft.clone()));
        draft
    }

    /// Clears the current quote.
    pub fn clear(&self) {
        self.set_current(None);
    }

    /// Installs the hook invoked with a change summary on every
    /// replacement. Replaces any previously installed hook.
    pub fn set_event_hook(&self, hook: impl Fn(&QuoteStateChanged) + Send + Sync + 'static) {
        *self
            .inner
            .event_hook
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(hook));
    }

    /// Removes the installed event hook, if any.
    pub fn clear_event_hook(&self) {
        *self
            .inner
            .event_hook
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn notify(&self, quote: Option<&Quote>) {
        // Snapshot under the lock, invoke outside it, so subscribers can
        // call back into the store.
        let subscribers: Vec<SubscriberFn> = self
            .inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, subscriber)| Arc::clone(subscriber))
            .collect();

        for subscriber in subscribers {
            subscriber(quote);
        }
    }
}

impl Default for QuoteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for QuoteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuoteStore")
            .field("has_current", &self.current().is_some())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Handle owning a store subscription.
///
/// Dropping the handle, or calling [`Subscription::unsubscribe`], detaches
/// the subscriber. Both are idempotent and safe after the store itself has
/// been dropped.
#[must_use = "dropping a Subscription detaches the subscriber"]
pub struct Subscription {
    id: u64,
    inner: Weak<StoreInner>,
}

impl Subscription {
    /// Detaches the subscriber from the store.
    pub fn unsubscribe(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner
                .subscribers
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .retain(|(id, _)| *id != self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
