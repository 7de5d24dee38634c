//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! quoting client test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for common quote scenarios
//! - `builders`: Builder patterns for test data construction
//! - `generators`: Property-based test data generators
//! - `logging`: One-shot tracing bootstrap for test binaries
//! - `stub_server`: In-process HTTP stub speaking the backend's wire protocol

pub mod fixtures;
pub mod builders;
pub mod generators;
pub mod logging;
pub mod stub_server;

pub use fixtures::*;
pub use builders::*;
pub use generators::*;
pub use logging::*;
pub use stub_server::*;
