//! Quote Kernel - foundational types for the quoting workspace
//!
//! This crate provides the building blocks shared by every other crate:
//! - Strongly-typed numeric identifiers for backend entities
//! - Pagination types matching the backend's paged responses
//! - The error taxonomy all backend port implementations report through

pub mod identifiers;
pub mod page;
pub mod ports;

pub use identifiers::{BusinessInfoId, CoverageOptionId, QuoteId};
pub use page::{Page, PageRequest};
pub use ports::{BackendError, DomainPort};
