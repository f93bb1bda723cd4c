//! Shared types for the Atelier storefront
//!
//! Common types used across crates: error codes, the unified API
//! response envelope, and the persisted domain models with their
//! create/update payloads.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use serde::{Deserialize, Serialize};
