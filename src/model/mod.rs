// src/model/mod.rs
pub mod store;
pub mod timeline;

/// Whole-valued floats (`2633.0`) as integers. Dataframe exports write
/// integer columns that way once a column has seen a missing value.
pub(crate) fn whole_number(value: f64) -> Option<i64> {
    let in_range = value.is_finite() && value.abs() < i64::MAX as f64;
    (in_range && value.fract() == 0.0).then_some(value as i64)
}

// Re-export commonly used types
pub use store::{StoreEntry, StoreId, StoreInfo};
pub use timeline::TimelinePoint;
