//! Form Interface Layer
//!
//! This crate is the screen-facing side of the quoting client: the
//! business information form with per-field error surfacing, the coverage
//! selection panel, the premium summary read model, the user-facing
//! notices, and the session that orchestrates them around a `QuoteClient`.
//!
//! Everything here observes the shared `QuoteStore`; nothing below the
//! session touches the backend directly. A screen renders from the form,
//! the selector and the summary, and drives edits back through the same
//! objects.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use infra_backend::{ClientConfig, QuoteClient, RestQuoteBackend};
//! use interface_form::QuoteSession;
//!
//! let backend = Arc::new(RestQuoteBackend::new(&ClientConfig::default())?);
//! let session = QuoteSession::new(Arc::new(QuoteClient::new(backend)));
//!
//! session.new_quote();
//! session.form().set_name("Acme Hardware");
//! // ... more edits, then:
//! session.save().await;
//! ```

pub mod coverage_panel;
pub mod form;
pub mod notice;
pub mod session;
pub mod summary;

pub use coverage_panel::CoverageSelector;
pub use form::BusinessInfoForm;
pub use notice::{Notice, NoticeKind};
pub use session::{FormMode, QuoteSession};
pub use summary::{format_premium, QuoteSummary};
