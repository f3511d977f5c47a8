//! # Store Error Types
//!
//! ## Error Flow
//! ```text
//! CoreError (pricing / stock rule)
//!      │
//!      ▼
//! StoreError (this module) ← adds "which record was missing"
//!      │
//!      ├──► ClientError::NotFound   (shim caller sees "Wine not found")
//!      └──► ApiError                (HTTP 404 / 400 with a detail body)
//! ```

use cellar_core::CoreError;
use thiserror::Error;

/// Store operation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// No record with the requested key.
    ///
    /// The message is just `"<Entity> not found"`; the id is kept as a field
    /// so the wire message stays stable.
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// A domain rule rejected the operation.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        StoreError::NotFound { entity, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
