//! Itinerary module
//!
//! Turns a trip request into an itinerary:
//! - Prompt rendering for the generation provider
//! - Gemini `generateContent` client and response extraction
//! - Rule-based repair of the generated text, in two variants
//! - Segmentation of the text into per-day plans

pub mod gemini;
pub mod normalize;
pub mod prompt;
pub mod segment;
pub mod service;

pub use gemini::{GeminiClient, GenerateContentResponse, GenerationProvider};
pub use normalize::{ItineraryTextNormalizer, NormalizationPass, NormalizerVariant};
pub use prompt::PromptBuilder;
pub use segment::ItinerarySegmenter;
pub use service::{ItineraryService, extract_text};
