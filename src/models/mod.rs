//! Data models for `tripweave`
//!
//! This module contains the core domain models organized by concern:
//! - Place: points of interest and their categories
//! - Trip: itinerary generation requests
//! - Itinerary: per-day plans derived from model output

pub mod itinerary;
pub mod place;
pub mod trip;

// Re-export all public types for convenient access
pub use itinerary::{DayPlan, Itinerary};
pub use place::{PlaceCategory, PlaceRecord};
pub use trip::TripRequest;
