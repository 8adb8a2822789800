//! Places module
//!
//! Nearby points of interest across several categories:
//! - Mapping provider client (Google Places Nearby Search)
//! - Quality filtering and normalization of provider results
//! - Concurrent fan-out over categories with per-category fault isolation

use async_trait::async_trait;

use crate::Result;
use crate::models::PlaceCategory;

pub mod aggregator;
pub mod filter;
pub mod google;

pub use aggregator::{PlaceAggregator, dedup_by_id};
pub use filter::PlaceFilter;
pub use google::{GooglePlacesClient, NearbyPhoto, NearbyPlace, NearbySearchResponse};

/// Source of raw nearby-search results for one category
#[async_trait]
pub trait PlaceProvider: Send + Sync {
    async fn nearby_search(
        &self,
        latitude: f64,
        longitude: f64,
        category: PlaceCategory,
    ) -> Result<NearbySearchResponse>;
}
