//! # Id Generation
//!
//! Records are keyed by small integers handed out as `max + 1`.
//!
//! ```text
//! ids in storage: [3, 1, 7, 2]   → next id 8
//! ids in storage: []             → next id 1
//! ids after deleting 7: [3, 1, 2] → next id 4  (the old max is reused)
//! ```
//!
//! The scheme is only collision-free while every insert goes through the
//! same generator. Callers that append must hold their collection's write
//! lock across `generate_id` and the push.

/// Anything stored in a collection keyed by an integer id.
pub trait Identified {
    fn id(&self) -> i64;
}

/// Returns `1` for an empty collection, otherwise one more than the largest id.
///
/// Storage order does not matter.
pub fn generate_id<T: Identified>(records: &[T]) -> i64 {
    records.iter().map(Identified::id).max().map_or(1, |max| max + 1)
}
