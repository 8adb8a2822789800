use regex::Regex;
use std::sync::LazyLock;

use crate::models::DayPlan;

static DAY_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\r?\n){2,}").unwrap_or_else(|e| panic!("invalid day boundary pattern: {e}"))
});

const MORNING: &str = "Morning:";
const AFTERNOON: &str = "Afternoon:";
const EVENING: &str = "Evening:";

/// Splits itinerary text into per-day plans.
///
/// Blocks are separated by blank lines, so the input must not have been
/// through [`collapse_blank_lines`](super::normalize::collapse_blank_lines).
pub struct ItinerarySegmenter;

impl ItinerarySegmenter {
    /// One [`DayPlan`] per block, numbered from 1 in block order.
    /// Whitespace-only blocks are skipped.
    #[must_use]
    pub fn segment(text: &str) -> Vec<DayPlan> {
        DAY_BOUNDARY
            .split(text.trim())
            .filter(|block| !block.trim().is_empty())
            .enumerate()
            .map(|(index, block)| Self::day_plan(index + 1, block))
            .collect()
    }

    fn day_plan(day_index: usize, block: &str) -> DayPlan {
        let mut lines = block.lines();
        let heading = lines.next().unwrap_or_default().trim();
        let rest: Vec<&str> = lines.collect();

        DayPlan {
            day_index,
            title: format!("Day {day_index}: {heading}"),
            morning: slot(&rest, MORNING),
            afternoon: slot(&rest, AFTERNOON),
            evening: slot(&rest, EVENING),
        }
    }
}

/// First line starting with `prefix`, prefix removed and trimmed
fn slot(lines: &[&str], prefix: &str) -> String {
    lines
        .iter()
        .find_map(|line| line.strip_prefix(prefix))
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}
