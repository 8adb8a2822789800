//! `tripweave` - nearby places and AI-generated travel itineraries
//!
//! This library provides the two pipelines behind the travel planner:
//! aggregation of well-rated places around a point, and generation of
//! day-by-day itineraries from a trip request, plus image translation.

pub mod cli;
pub mod config;
pub mod error;
pub mod itinerary;
pub mod logging;
pub mod models;
pub mod places;
pub mod translate;

// Re-export core types for public API
pub use config::TripweaveConfig;
pub use error::TripweaveError;
pub use itinerary::{
    GeminiClient, GenerationProvider, ItinerarySegmenter, ItineraryService,
    ItineraryTextNormalizer, NormalizerVariant, PromptBuilder,
};
pub use models::{DayPlan, Itinerary, PlaceCategory, PlaceRecord, TripRequest};
pub use places::{GooglePlacesClient, PlaceAggregator, PlaceFilter, PlaceProvider};
pub use translate::{ImageTranslator, ScriptTranslator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripweaveError>;
