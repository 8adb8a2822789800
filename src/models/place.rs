//! Place model and the category facets used to query the mapping provider

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TripweaveError;

/// Place-type facet used to partition provider queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceCategory {
    Restaurant,
    Lodging,
    Cafe,
    ShoppingMall,
    TouristAttraction,
    Landmark,
    HinduTemple,
    Stadium,
    AmusementPark,
}

impl PlaceCategory {
    /// The fixed category set queried by a places listing, in output order
    pub const ALL: [PlaceCategory; 9] = [
        PlaceCategory::Restaurant,
        PlaceCategory::Lodging,
        PlaceCategory::Cafe,
        PlaceCategory::ShoppingMall,
        PlaceCategory::TouristAttraction,
        PlaceCategory::Landmark,
        PlaceCategory::HinduTemple,
        PlaceCategory::Stadium,
        PlaceCategory::AmusementPark,
    ];

    /// Provider type name (`type=` query parameter)
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PlaceCategory::Restaurant => "restaurant",
            PlaceCategory::Lodging => "lodging",
            PlaceCategory::Cafe => "cafe",
            PlaceCategory::ShoppingMall => "shopping_mall",
            PlaceCategory::TouristAttraction => "tourist_attraction",
            PlaceCategory::Landmark => "landmark",
            PlaceCategory::HinduTemple => "hindu_temple",
            PlaceCategory::Stadium => "stadium",
            PlaceCategory::AmusementPark => "amusement_park",
        }
    }
}

impl Display for PlaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlaceCategory {
    type Err = TripweaveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        PlaceCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == wanted)
            .ok_or_else(|| TripweaveError::precondition(format!("Unknown place category: {s}")))
    }
}

/// A qualifying point of interest, normalized from a provider result.
///
/// Serialized with the field names the web client expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    /// Provider place id, the identity key
    #[serde(rename = "place_id")]
    pub id: String,
    pub name: String,
    /// Average rating (0..5)
    pub rating: f64,
    pub address: String,
    /// Fully qualified display URLs, in provider order
    #[serde(rename = "photos")]
    pub photo_urls: Vec<String>,
    #[serde(rename = "reviews")]
    pub review_count: u32,
    /// Category the place was returned under
    #[serde(rename = "type")]
    pub category: PlaceCategory,
}
