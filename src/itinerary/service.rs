use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::gemini::{GenerateContentResponse, GenerationProvider};
use super::normalize::ItineraryTextNormalizer;
use super::prompt::PromptBuilder;
use super::segment::ItinerarySegmenter;
use crate::models::{DayPlan, Itinerary, TripRequest};
use crate::Result;

/// Generates itineraries: validate, prompt, complete, extract, repair
pub struct ItineraryService {
    provider: Arc<dyn GenerationProvider>,
}

impl ItineraryService {
    pub fn new(provider: Arc<dyn GenerationProvider>) -> Self {
        Self { provider }
    }

    /// Normalized itinerary text for the segmenter-compatible variant
    pub async fn generate_itinerary(&self, request: &TripRequest) -> Result<String> {
        let response = self.complete(request).await?;
        ItineraryTextNormalizer::structured().normalize(extract_text(&response))
    }

    /// Itinerary text prepared for HTML embedding
    pub async fn generate_html(&self, request: &TripRequest) -> Result<String> {
        let response = self.complete(request).await?;
        ItineraryTextNormalizer::html().normalize(extract_text(&response))
    }

    /// Per-day breakdown of the itinerary
    pub async fn generate_day_plans(&self, request: &TripRequest) -> Result<Vec<DayPlan>> {
        Ok(self.generate(request).await?.days)
    }

    /// Normalized text and day plans from a single completion
    pub async fn generate(&self, request: &TripRequest) -> Result<Itinerary> {
        let response = self.complete(request).await?;
        let raw = extract_text(&response);
        let text = ItineraryTextNormalizer::structured().normalize(raw)?;

        // day blocks are delimited by blank lines, which normalization removes
        let days = raw
            .map(ItinerarySegmenter::segment)
            .unwrap_or_default()
            .into_iter()
            .map(clean_day_plan)
            .collect::<Vec<_>>();

        info!("Generated itinerary with {} day block(s)", days.len());
        Ok(Itinerary { text, days })
    }

    #[instrument(skip(self, request), fields(destination = %request.destination, days = request.duration_days))]
    async fn complete(&self, request: &TripRequest) -> Result<GenerateContentResponse> {
        request.validate()?;

        let prompt = PromptBuilder::render(request);
        debug!("Rendered prompt ({} chars)", prompt.len());

        self.provider.generate_content(&prompt).await
    }
}

/// Model text at `candidates[0].content.parts[0].text`, if any
#[must_use]
pub fn extract_text(response: &GenerateContentResponse) -> Option<&str> {
    response.first_text()
}

fn clean_day_plan(plan: DayPlan) -> DayPlan {
    let normalizer = ItineraryTextNormalizer::structured();
    DayPlan {
        day_index: plan.day_index,
        title: normalizer.apply_passes(&plan.title),
        morning: normalizer.apply_passes(&plan.morning),
        afternoon: normalizer.apply_passes(&plan.afternoon),
        evening: normalizer.apply_passes(&plan.evening),
    }
}
