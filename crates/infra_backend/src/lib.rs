//! Backend Infrastructure Layer
//!
//! This crate provides the infrastructure side of the quoting client: the
//! REST adapter implementing the `QuoteBackend` port, outbound payload
//! sanitization, client configuration, a best-effort JSON file cache, and
//! the reconciling `QuoteClient` the interface layer drives.
//!
//! # Architecture
//!
//! The domain crate defines the `QuoteBackend` port; this crate supplies
//! the production adapter (`RestQuoteBackend`, over `reqwest`) and composes
//! it with the observable store and the local cache behind `QuoteClient`.
//! Interface code never sees HTTP: it sees store emissions and
//! `ClientError` values.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_backend::{ClientConfig, LocalQuoteCache, QuoteClient, RestQuoteBackend};
//! use std::sync::Arc;
//!
//! let config = ClientConfig::from_env()?;
//! let backend = Arc::new(RestQuoteBackend::new(&config)?);
//! let mut client = QuoteClient::new(backend);
//! if let Some(dir) = config.cache_dir.clone() {
//!     client = client.with_cache(LocalQuoteCache::new(dir));
//! }
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod payload;
pub mod rest;

pub use cache::LocalQuoteCache;
pub use client::{ClientError, QuoteClient, SaveOutcome};
pub use config::ClientConfig;
pub use payload::QuoteDraft;
pub use rest::RestQuoteBackend;
