//! Quoting Domain
//!
//! This crate implements the client-side core of the small business
//! insurance quoting application: the quote model aligned with the backend
//! wire format, the validation and premium rules, the status lifecycle,
//! and the observable store that screens subscribe to. The persistence
//! port lives here too, with an in-memory mock that mirrors the backend's
//! rules.
//!
//! # Quote Lifecycle
//!
//! ```text
//! DRAFT -> SAVED -> SUBMITTED -> APPROVED
//!      ^      |              \-> REJECTED
//!      \------/
//! ```
//!
//! APPROVED, REJECTED and EXPIRED are terminal.
//!
//! # Example
//!
//! ```rust
//! use domain_quote::{coverage, QuoteStore};
//!
//! let store = QuoteStore::new();
//! let draft = store.begin_draft();
//! store.update_coverage_options(coverage::with_selection_toggled(
//!     &draft.coverage_options,
//!     coverage::CoverageType::GeneralLiability,
//! ));
//!
//! let current = store.current().unwrap();
//! assert_eq!(current.total_premium.to_string(), "500");
//! ```

pub mod business;
pub mod coverage;
pub mod error;
pub mod events;
pub mod ports;
pub mod premium;
pub mod quote;
pub mod store;
pub mod validation;

pub use business::{
    normalize_state, BusinessInfoUpdate, BusinessInformation, BusinessType, Industry,
};
pub use coverage::{default_catalog, with_selection_toggled, CoverageOption, CoverageType};
pub use error::QuoteError;
pub use events::{QuoteField, QuoteStateChanged};
pub use ports::{QuoteBackend, QuoteBackendExt, QuoteStatistics};
pub use premium::total_premium;
pub use quote::{Quote, QuoteStatus};
pub use store::{QuoteStore, Subscription};
pub use validation::{BusinessField, BusinessInfoValidator, ValidationResult};
