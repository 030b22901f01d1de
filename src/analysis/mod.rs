// src/analysis/mod.rs
pub mod format;
pub mod metrics;

// Re-export commonly used types
pub use format::{capitalize, format_currency, humanize_key, PLACEHOLDER};
pub use metrics::{range_display, sorted_breakdown, ForecastMetrics};
