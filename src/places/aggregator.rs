use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{PlaceFilter, PlaceProvider};
use crate::models::{PlaceCategory, PlaceRecord};
use crate::{Result, TripweaveError};

/// Fans out one provider query per category and merges the filtered results
pub struct PlaceAggregator {
    provider: Arc<dyn PlaceProvider>,
    filter: Arc<PlaceFilter>,
}

impl PlaceAggregator {
    pub fn new(provider: Arc<dyn PlaceProvider>, filter: PlaceFilter) -> Self {
        Self {
            provider,
            filter: Arc::new(filter),
        }
    }

    /// Places across the fixed category set
    pub async fn list_places(
        &self,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Vec<PlaceRecord>> {
        self.list_places_for(latitude, longitude, &PlaceCategory::ALL)
            .await
    }

    /// Places across the given categories, after checking the coordinates
    pub async fn list_places_for(
        &self,
        latitude: Option<f64>,
        longitude: Option<f64>,
        categories: &[PlaceCategory],
    ) -> Result<Vec<PlaceRecord>> {
        let (latitude, longitude) = validate_coordinates(latitude, longitude)?;
        Ok(self.aggregate(latitude, longitude, categories).await)
    }

    /// Query every category concurrently and concatenate in category order.
    ///
    /// Each query runs as its own task: a failing or panicking category
    /// contributes nothing and does not cancel the others, and dispatched
    /// queries finish even if this future is dropped.
    #[instrument(skip(self, categories), fields(category_count = categories.len()))]
    pub async fn aggregate(
        &self,
        latitude: f64,
        longitude: f64,
        categories: &[PlaceCategory],
    ) -> Vec<PlaceRecord> {
        let handles = categories.iter().map(|&category| {
            let provider = Arc::clone(&self.provider);
            let filter = Arc::clone(&self.filter);
            tokio::spawn(async move {
                fetch_category(provider.as_ref(), &filter, latitude, longitude, category).await
            })
        });

        let joined = join_all(handles).await;

        let places: Vec<PlaceRecord> = joined
            .into_iter()
            .zip(categories)
            .flat_map(|(outcome, category)| match outcome {
                Ok(places) => places,
                Err(e) => {
                    warn!("Query task for {} did not complete: {}", category, e);
                    Vec::new()
                }
            })
            .collect();

        info!(
            "Aggregated {} places from {} categories",
            places.len(),
            categories.len()
        );
        places
    }
}

async fn fetch_category(
    provider: &dyn PlaceProvider,
    filter: &PlaceFilter,
    latitude: f64,
    longitude: f64,
    category: PlaceCategory,
) -> Vec<PlaceRecord> {
    match provider.nearby_search(latitude, longitude, category).await {
        Ok(response) => filter.apply(&response, category),
        Err(e) => {
            warn!("Error fetching {}: {}", category, e);
            Vec::new()
        }
    }
}

fn validate_coordinates(latitude: Option<f64>, longitude: Option<f64>) -> Result<(f64, f64)> {
    let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
        return Err(TripweaveError::precondition(
            "Latitude and longitude are required",
        ));
    };

    if !(-90.0..=90.0).contains(&latitude) {
        return Err(TripweaveError::precondition(format!(
            "Latitude must be between -90 and 90, got: {latitude}"
        )));
    }

    if !(-180.0..=180.0).contains(&longitude) {
        return Err(TripweaveError::precondition(format!(
            "Longitude must be between -180 and 180, got: {longitude}"
        )));
    }

    Ok((latitude, longitude))
}

/// Drop repeated place ids, keeping the first occurrence.
///
/// The same place is often returned under several categories; aggregation
/// keeps every occurrence and callers opt into this pass explicitly.
#[must_use]
pub fn dedup_by_id(places: Vec<PlaceRecord>) -> Vec<PlaceRecord> {
    let mut seen = HashSet::new();
    places
        .into_iter()
        .filter(|place| seen.insert(place.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapsConfig;
    use crate::places::{NearbyPhoto, NearbyPlace, NearbySearchResponse};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns one qualifying place per category, id `<category>-1`,
    /// plus a shared `dup` place; fails for cafes.
    struct StubProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PlaceProvider for StubProvider {
        async fn nearby_search(
            &self,
            _latitude: f64,
            _longitude: f64,
            category: PlaceCategory,
        ) -> Result<NearbySearchResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if category == PlaceCategory::Cafe {
                return Err(TripweaveError::provider("connection reset"));
            }
            let make = |id: String| NearbyPlace {
                place_id: id.clone(),
                name: id,
                rating: Some(4.7),
                vicinity: None,
                photos: Some(vec![NearbyPhoto {
                    photo_reference: "ref".to_string(),
                }]),
                user_ratings_total: Some(3),
            };
            Ok(NearbySearchResponse {
                status: "OK".to_string(),
                results: Some(vec![make(format!("{category}-1")), make("dup".to_string())]),
                error_message: None,
            })
        }
    }

    fn aggregator() -> (PlaceAggregator, Arc<StubProvider>) {
        let provider = Arc::new(StubProvider {
            calls: AtomicUsize::new(0),
        });
        let aggregator = PlaceAggregator::new(provider.clone(), PlaceFilter::new(&MapsConfig::default()));
        (aggregator, provider)
    }

    #[tokio::test]
    async fn test_aggregate_preserves_category_order_and_isolates_failures() {
        let (aggregator, provider) = aggregator();
        let places = aggregator
            .aggregate(
                1.0,
                2.0,
                &[PlaceCategory::Stadium, PlaceCategory::Cafe, PlaceCategory::Lodging],
            )
            .await;

        assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
        let ids: Vec<&str> = places.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["stadium-1", "dup", "lodging-1", "dup"]);
    }

    /// Panics while serving hindu temples, otherwise one place per category
    struct PanickingProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PlaceProvider for PanickingProvider {
        async fn nearby_search(
            &self,
            _latitude: f64,
            _longitude: f64,
            category: PlaceCategory,
        ) -> Result<NearbySearchResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if category == PlaceCategory::HinduTemple {
                panic!("malformed payload for {category}");
            }
            Ok(NearbySearchResponse {
                status: "OK".to_string(),
                results: Some(vec![NearbyPlace {
                    place_id: format!("{category}-1"),
                    name: category.to_string(),
                    rating: Some(4.4),
                    vicinity: Some("Ring Road".to_string()),
                    photos: Some(vec![NearbyPhoto {
                        photo_reference: "ref".to_string(),
                    }]),
                    user_ratings_total: None,
                }]),
                error_message: None,
            })
        }
    }

    #[tokio::test]
    async fn test_panicking_category_contributes_nothing() {
        let provider = Arc::new(PanickingProvider {
            calls: AtomicUsize::new(0),
        });
        let aggregator =
            PlaceAggregator::new(provider.clone(), PlaceFilter::new(&MapsConfig::default()));
        let categories = [
            PlaceCategory::Restaurant,
            PlaceCategory::HinduTemple,
            PlaceCategory::Stadium,
            PlaceCategory::Cafe,
        ];

        let places = aggregator.aggregate(12.3, 76.6, &categories).await;

        assert_eq!(provider.calls.load(Ordering::SeqCst), categories.len());
        let ids: Vec<&str> = places.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["restaurant-1", "stadium-1", "cafe-1"]);
    }

    #[tokio::test]
    async fn test_list_places_queries_all_categories() {
        let (aggregator, provider) = aggregator();
        let places = aggregator.list_places(Some(12.3), Some(76.6)).await.unwrap();

        assert_eq!(provider.calls.load(Ordering::SeqCst), 9);
        // eight healthy categories, two places each
        assert_eq!(places.len(), 16);
        assert_eq!(places[0].category, PlaceCategory::Restaurant);
        assert_eq!(places[15].category, PlaceCategory::AmusementPark);
    }

    #[tokio::test]
    async fn test_missing_coordinates_rejected_before_dispatch() {
        let (aggregator, provider) = aggregator();
        let result = aggregator.list_places(Some(12.3), None).await;

        assert!(matches!(result, Err(TripweaveError::Precondition { .. })));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_out_of_range_coordinates_rejected() {
        let (aggregator, provider) = aggregator();
        assert!(aggregator.list_places(Some(91.0), Some(0.0)).await.is_err());
        assert!(aggregator.list_places(Some(0.0), Some(f64::NAN)).await.is_err());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let record = |id: &str, category| PlaceRecord {
            id: id.to_string(),
            name: id.to_string(),
            rating: 4.5,
            address: String::new(),
            photo_urls: vec![],
            review_count: 0,
            category,
        };
        let places = vec![
            record("a", PlaceCategory::Landmark),
            record("b", PlaceCategory::Landmark),
            record("a", PlaceCategory::TouristAttraction),
        ];

        let unique = dedup_by_id(places);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].category, PlaceCategory::Landmark);
        assert_eq!(unique[1].id, "b");
    }
}
