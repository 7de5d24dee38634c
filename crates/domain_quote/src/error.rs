//! Quote domain errors
//!
//! This module defines the error types raised by the quote lifecycle
//! rules, as opposed to transport failures which live in
//! [`quote_kernel::BackendError`].

use thiserror::Error;

use crate::quote::QuoteStatus;

/// Errors that can occur in the quote domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuoteError {
    /// The status machine does not permit the requested move
    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition {
        from: QuoteStatus,
        to: QuoteStatus,
    },

    /// Submission requires at least one selected coverage option
    #[error("At least one coverage option must be selected before submitting")]
    NoSelectedCoverage,
}
