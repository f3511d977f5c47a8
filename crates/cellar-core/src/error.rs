//! # Error Types
//!
//! Domain-specific error types for cellar-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cellar-core    CoreError    - pure rule violations (this file)        │
//! │  cellar-store   StoreError   - missing records, wraps CoreError        │
//! │  cellar-client  ClientError  - probe/remote failures, wraps StoreError │
//! │  cellar-api     ApiError     - HTTP status + detail body               │
//! │                                                                         │
//! │  Flow: CoreError → StoreError → ClientError / ApiError → caller        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::money::Money;

/// Core domain errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// Not enough bottles at a location to complete a bottle sale.
    ///
    /// ## When This Occurs
    /// Only the backend enforces stock. The client's local fallback never
    /// checks inventory, so this never reaches a shim caller.
    #[error("Not enough bottles in inventory")]
    InsufficientStock {
        wine_id: i64,
        location: String,
        available: i64,
        requested: i64,
    },

    /// `quantity × unit_price` does not fit in `i64` cents.
    #[error("Sale total is too large")]
    AmountOverflow { quantity: i64, unit_price: Money },

    /// A product type string that is neither `bottle` nor `glass`.
    #[error("Unknown product type: {0}")]
    UnknownProductType(String),

    /// A timestamp that is not ISO-8601.
    #[error("Invalid timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
