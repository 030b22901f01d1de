// src/state/messages.rs
// User-facing strings for every failure the dashboard can show.

pub const STORE_LIST_FAILED: &str = "Could not load store list.";
pub const NO_STORE_SELECTED: &str = "Please select a store.";
pub const NO_FORECAST: &str = "No forecast returned.";
pub const BACKEND_ERROR: &str = "Backend error";

pub const EXPLANATION_UNAVAILABLE: &str =
    "The AI explanation service is temporarily unavailable. Please try again later.";
pub const NO_EXPLANATION: &str = "No explanation returned.";
pub const EXPLANATION_FAILED: &str =
    "Explanation failed due to network or system error.";

pub fn explanation_status_failed(status: u16) -> String {
    format!("Explanation request failed with status {}.", status)
}
