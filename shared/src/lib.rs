//! Shared types for the storefront
//!
//! Domain models, backend row types, money helpers and the unified error
//! system used by the `storefront` crate.

pub mod error;
pub mod models;
pub mod money;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
