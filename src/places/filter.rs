use tracing::debug;

use super::google::{NearbyPlace, NearbySearchResponse};
use crate::config::MapsConfig;
use crate::models::{PlaceCategory, PlaceRecord};

/// Address used when the provider has no vicinity for a place
pub const MISSING_ADDRESS: &str = "No address available";

/// Keeps well-rated places that have photos and normalizes them
#[derive(Debug, Clone)]
pub struct PlaceFilter {
    photo_base_url: String,
    photo_max_width: u32,
    api_key: String,
}

impl PlaceFilter {
    /// Places must be rated strictly above this
    pub const MIN_RATING: f64 = 4.0;

    #[must_use]
    pub fn new(config: &MapsConfig) -> Self {
        Self {
            photo_base_url: config.photo_base_url.trim_end_matches('/').to_string(),
            photo_max_width: config.photo_max_width,
            api_key: config.api_key.clone().unwrap_or_default(),
        }
    }

    /// Qualifying places of one category's response, in provider order.
    /// Error statuses and missing results yield an empty list.
    #[must_use]
    pub fn apply(&self, response: &NearbySearchResponse, category: PlaceCategory) -> Vec<PlaceRecord> {
        let results = match (&response.results, response.is_ok()) {
            (Some(results), true) => results,
            _ => {
                debug!(status = %response.status, "No usable {} results", category);
                return Vec::new();
            }
        };

        results
            .iter()
            .filter(|place| Self::qualifies(place))
            .map(|place| self.to_record(place, category))
            .collect()
    }

    fn qualifies(place: &NearbyPlace) -> bool {
        let well_rated = place.rating.is_some_and(|rating| rating > Self::MIN_RATING);
        let has_photos = place.photos.as_ref().is_some_and(|photos| !photos.is_empty());
        well_rated && has_photos
    }

    fn to_record(&self, place: &NearbyPlace, category: PlaceCategory) -> PlaceRecord {
        PlaceRecord {
            id: place.place_id.clone(),
            name: place.name.clone(),
            rating: place.rating.unwrap_or_default(),
            address: place
                .vicinity
                .clone()
                .filter(|address| !address.is_empty())
                .unwrap_or_else(|| MISSING_ADDRESS.to_string()),
            photo_urls: place
                .photos
                .iter()
                .flatten()
                .map(|photo| self.photo_url(&photo.photo_reference))
                .collect(),
            review_count: place.user_ratings_total.unwrap_or(0),
            category,
        }
    }

    /// Display URL for a photo reference
    #[must_use]
    pub fn photo_url(&self, reference: &str) -> String {
        format!(
            "{}?maxwidth={}&photoreference={}&key={}",
            self.photo_base_url,
            self.photo_max_width,
            urlencoding::encode(reference),
            urlencoding::encode(&self.api_key)
        )
    }
}
