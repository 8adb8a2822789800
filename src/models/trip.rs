//! Trip request model for itinerary generation

use serde::{Deserialize, Serialize};

use crate::{Result, TripweaveError};

/// Parameters of a requested itinerary.
///
/// Absent fields deserialize to empty values so that [`TripRequest::validate`]
/// reports them instead of the JSON decoder. The aliases accept the payload
/// shape sent by the web planner form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRequest {
    #[serde(default)]
    pub destination: String,
    #[serde(default, alias = "Numberofperson")]
    pub traveler_count: u32,
    #[serde(default, alias = "duration")]
    pub duration_days: u32,
    /// Places or themes the travelers care about; may be empty
    #[serde(default, alias = "selectedPlaces")]
    pub interests: Vec<String>,
}

impl TripRequest {
    /// Create a new trip request
    #[must_use]
    pub fn new(
        destination: impl Into<String>,
        traveler_count: u32,
        duration_days: u32,
        interests: Vec<String>,
    ) -> Self {
        Self {
            destination: destination.into(),
            traveler_count,
            duration_days,
            interests,
        }
    }

    /// Reject requests that cannot produce a meaningful prompt
    pub fn validate(&self) -> Result<()> {
        if self.destination.trim().is_empty() {
            return Err(TripweaveError::precondition("destination is required"));
        }
        if self.traveler_count == 0 {
            return Err(TripweaveError::precondition(
                "traveler count must be at least 1",
            ));
        }
        if self.duration_days == 0 {
            return Err(TripweaveError::precondition(
                "trip duration must be at least 1 day",
            ));
        }
        Ok(())
    }
}
