use crate::models::TripRequest;

/// Interests line used when the request names none
pub const DEFAULT_INTERESTS: &str = "cultural landmarks, food experiences, and nature escapes";

/// Renders the generation prompt for a trip
pub struct PromptBuilder;

impl PromptBuilder {
    /// Render the prompt. Pure: identical requests give identical strings.
    #[must_use]
    pub fn render(request: &TripRequest) -> String {
        let interests = if request.interests.is_empty() {
            DEFAULT_INTERESTS.to_string()
        } else {
            request.interests.join(", ")
        };

        format!(
            "Create a well-structured {days}-day travel itinerary for {destination} that offers an engaging, thoughtful experience.\n\
             \n\
             {GUIDELINES}\n\
             **Traveler Profile:**\n\
             - Traveling in a group of {travelers}.\n\
             - Interested in: {interests}.\n\
             \n\
             Make the itinerary exciting, engaging, and **thoughtfully written** as if it's a personal travel recommendation.",
            days = request.duration_days,
            destination = request.destination,
            travelers = request.traveler_count,
        )
    }
}

const GUIDELINES: &str = "\
**Important Guidelines:**
- **Make it immersive** by describing what the traveler might **see, feel, and experience** at each location.
- **Explain why each place is special** (its history, significance, or unique qualities).
- **Use natural storytelling** to connect activities throughout the day.
- Format the output clearly in markdown:
  - **Day 1: Breakfast**
    - *Restaurant Name* (INR 100) - Description with sensory details.
  - **Morning:** What the traveler experiences at each location.
  - **Lunch:** Suggestions with ambiance and taste details.
  - **Afternoon:** Highlight must-see aspects of each place.
  - **Evening:** Unique experiences to end the day.
  - **Dinner:** Describe food, setting, and why it's a great choice.
  - **Accommodation:** Explain why the hotel is a good pick.
";
