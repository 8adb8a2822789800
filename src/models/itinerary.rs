//! Itinerary models derived from generation output

use serde::{Deserialize, Serialize};

/// One day of a generated itinerary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    /// 1-based position of the day block
    pub day_index: usize,
    /// `Day <n>: <first line of the block>`
    pub title: String,
    /// Slot contents, empty when the heading was not found
    pub morning: String,
    pub afternoon: String,
    pub evening: String,
}

/// Normalized itinerary text together with its per-day breakdown
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Itinerary {
    pub text: String,
    pub days: Vec<DayPlan>,
}
