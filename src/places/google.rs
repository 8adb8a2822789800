use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::PlaceProvider;
use crate::config::MapsConfig;
use crate::models::PlaceCategory;
use crate::{Result, TripweaveError};

/// Google Places Nearby Search client
pub struct GooglePlacesClient {
    client: Client,
    api_key: String,
    base_url: String,
    radius_m: u32,
}

/// Nearby Search response body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NearbySearchResponse {
    #[serde(default)]
    pub status: String,
    pub results: Option<Vec<NearbyPlace>>,
    pub error_message: Option<String>,
}

/// One result entry of a Nearby Search response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NearbyPlace {
    #[serde(default)]
    pub place_id: String,
    #[serde(default)]
    pub name: String,
    pub rating: Option<f64>,
    pub vicinity: Option<String>,
    pub photos: Option<Vec<NearbyPhoto>>,
    pub user_ratings_total: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NearbyPhoto {
    pub photo_reference: String,
}

impl NearbySearchResponse {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == "OK"
    }
}

impl GooglePlacesClient {
    /// Create a new client; fails when no maps API key is configured
    pub fn new(config: &MapsConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| TripweaveError::config("maps.api_key is required to list places"))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("tripweave/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TripweaveError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            radius_m: config.search_radius_m,
        })
    }

    fn nearby_search_url(&self, latitude: f64, longitude: f64, category: PlaceCategory) -> String {
        format!(
            "{}/nearbysearch/json?location={},{}&radius={}&type={}&key={}",
            self.base_url,
            latitude,
            longitude,
            self.radius_m,
            category.as_str(),
            urlencoding::encode(&self.api_key)
        )
    }
}

#[async_trait]
impl PlaceProvider for GooglePlacesClient {
    #[instrument(skip(self))]
    async fn nearby_search(
        &self,
        latitude: f64,
        longitude: f64,
        category: PlaceCategory,
    ) -> Result<NearbySearchResponse> {
        debug!(
            "Fetching {} places within {}m of ({:.4}, {:.4})",
            category, self.radius_m, latitude, longitude
        );

        let url = self.nearby_search_url(latitude, longitude, category);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| {
                TripweaveError::provider(format!("Places request failed: {}", e.without_url()))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(TripweaveError::provider(format!(
                "Places API error {status}: {error_text}"
            )));
        }

        let body: NearbySearchResponse = response.json().await.map_err(|e| {
            TripweaveError::provider(format!(
                "Failed to parse Places response: {}",
                e.without_url()
            ))
        })?;

        if !body.is_ok() {
            warn!(
                status = %body.status,
                error_message = body.error_message.as_deref().unwrap_or_default(),
                "Places API returned a non-OK status for {}",
                category
            );
        }

        Ok(body)
    }
}
