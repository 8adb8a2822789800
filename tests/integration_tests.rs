//! Integration tests for the tripweave pipelines and CLI

use async_trait::async_trait;
use std::process::Command;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tripweave::config::MapsConfig;
use tripweave::itinerary::GenerateContentResponse;
use tripweave::places::{NearbyPhoto, NearbyPlace, NearbySearchResponse, dedup_by_id};
use tripweave::{
    GenerationProvider, ItineraryService, PlaceAggregator, PlaceCategory, PlaceFilter,
    PlaceProvider, TripRequest, TripweaveError,
};

fn place(id: &str, rating: f64, photos: usize) -> NearbyPlace {
    NearbyPlace {
        place_id: id.to_string(),
        name: format!("Place {id}"),
        rating: Some(rating),
        vicinity: None,
        photos: Some(
            (0..photos)
                .map(|i| NearbyPhoto {
                    photo_reference: format!("{id}-ref{i}"),
                })
                .collect(),
        ),
        user_ratings_total: Some(12),
    }
}

/// Returns the same two qualifying places for every category except stadiums
struct CityProvider {
    calls: AtomicUsize,
}

#[async_trait]
impl PlaceProvider for CityProvider {
    async fn nearby_search(
        &self,
        _latitude: f64,
        _longitude: f64,
        category: PlaceCategory,
    ) -> tripweave::Result<NearbySearchResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if category == PlaceCategory::Stadium {
            return Err(TripweaveError::provider("HTTP 500"));
        }
        Ok(NearbySearchResponse {
            status: "OK".to_string(),
            results: Some(vec![
                place("shared", 4.8, 1),
                place(category.as_str(), 4.2, 2),
                place("low", 3.9, 1),
                place("no-photo", 4.9, 0),
            ]),
            error_message: None,
        })
    }
}

fn maps_config() -> MapsConfig {
    MapsConfig {
        api_key: Some("maps-key".to_string()),
        ..MapsConfig::default()
    }
}

#[tokio::test]
async fn test_places_pipeline_end_to_end() {
    let provider = Arc::new(CityProvider {
        calls: AtomicUsize::new(0),
    });
    let aggregator = PlaceAggregator::new(provider.clone(), PlaceFilter::new(&maps_config()));

    let places = aggregator
        .list_places(Some(15.335), Some(76.46))
        .await
        .unwrap();

    assert_eq!(provider.calls.load(Ordering::SeqCst), 9);
    // 8 healthy categories, two qualifying places each
    assert_eq!(places.len(), 16);
    assert!(places.iter().all(|p| p.rating > 4.0 && !p.photo_urls.is_empty()));
    assert!(places.iter().all(|p| p.category != PlaceCategory::Stadium));
    assert_eq!(places[0].category, PlaceCategory::Restaurant);
    assert_eq!(places[15].category, PlaceCategory::AmusementPark);
    assert_eq!(places[0].address, "No address available");
    assert!(places[1].photo_urls[1].contains("photoreference=restaurant-ref1"));

    let unique = dedup_by_id(places);
    assert_eq!(unique.len(), 9);
    assert_eq!(unique[0].category, PlaceCategory::Restaurant);
}

#[tokio::test]
async fn test_places_pipeline_requires_coordinates() {
    let provider = Arc::new(CityProvider {
        calls: AtomicUsize::new(0),
    });
    let aggregator = PlaceAggregator::new(provider.clone(), PlaceFilter::new(&maps_config()));

    let result = aggregator.list_places(None, Some(76.46)).await;
    assert!(matches!(result, Err(TripweaveError::Precondition { .. })));
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

struct FixedGeneration {
    text: &'static str,
    calls: AtomicUsize,
}

#[async_trait]
impl GenerationProvider for FixedGeneration {
    async fn generate_content(&self, _prompt: &str) -> tripweave::Result<GenerateContentResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(GenerateContentResponse::from_text(self.text))
    }
}

#[tokio::test]
async fn test_itinerary_pipeline_end_to_end() {
    let provider = Arc::new(FixedGeneration {
        text: "Old Goa churches\nMorning: Basilica of Bom Jesus\nAfternoon: spice-farm lunch\nEvening: FontainhasWalk\n\n\nBeach day\nMorning: Palolem",
        calls: AtomicUsize::new(0),
    });
    let service = ItineraryService::new(provider.clone());
    let request = TripRequest::new("Goa", 2, 2, vec![]);

    let itinerary = service.generate(&request).await.unwrap();

    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    assert_eq!(itinerary.days.len(), 2);
    assert_eq!(itinerary.days[0].title, "Day 1: Old Goa churches");
    assert_eq!(itinerary.days[0].afternoon, "spice - farm lunch");
    assert_eq!(itinerary.days[0].evening, "Fontainhas Walk");
    assert_eq!(itinerary.days[1].title, "Day 2: Beach day");
    assert_eq!(itinerary.days[1].morning, "Palolem");
    assert_eq!(itinerary.days[1].evening, "");
    assert!(itinerary.text.starts_with("Old Goa churches\nMorning: Basilica"));
}

#[tokio::test]
async fn test_itinerary_rejects_missing_destination() {
    let provider = Arc::new(FixedGeneration {
        text: "unused",
        calls: AtomicUsize::new(0),
    });
    let service = ItineraryService::new(provider.clone());

    let request = TripRequest::new("  ", 2, 3, vec![]);
    for result in [
        service.generate_itinerary(&request).await.map(|_| ()),
        service.generate_html(&request).await.map(|_| ()),
        service.generate_day_plans(&request).await.map(|_| ()),
    ] {
        assert!(matches!(result, Err(TripweaveError::Precondition { .. })));
    }
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_trip_request_accepts_planner_payload() {
    let request: TripRequest = serde_json::from_str(
        r#"{"destination":"Jaipur","Numberofperson":4,"duration":3,"selectedPlaces":["Amber Fort"]}"#,
    )
    .unwrap();
    assert_eq!(request, TripRequest::new("Jaipur", 4, 3, vec!["Amber Fort".to_string()]));
}

#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_tripweave"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["places", "itinerary", "translate"] {
        assert!(stdout.contains(command), "missing {command}");
    }
}

#[test]
fn test_cli_itinerary_without_destination_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_tripweave"))
        .args(["itinerary", "--days", "2"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
}
