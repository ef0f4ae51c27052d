//! Shared types for the Tripdesk portal
//!
//! Common types used by the server and its tests: domain models with
//! their sheet-header serialization, the wire envelopes of the dispatch
//! endpoint, the unified error type and the static field tables.

pub mod envelopes;
pub mod error;
pub mod fields;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult};
pub use serde::{Deserialize, Serialize};
