//! Tripweave CLI entry point

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use tracing::{debug, error};

use tripweave::cli::{Cli, Command, ItineraryFormat};
use tripweave::logging::init_tracing;
use tripweave::places::dedup_by_id;
use tripweave::{
    GeminiClient, GooglePlacesClient, ImageTranslator, ItineraryService, PlaceAggregator,
    PlaceCategory, PlaceFilter, ScriptTranslator, TripRequest, TripweaveConfig, TripweaveError,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("{e:#}");
        match e.downcast_ref::<TripweaveError>() {
            Some(err) => eprintln!("Error: {}", err.user_message()),
            None => eprintln!("Error: {e:#}"),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = TripweaveConfig::load_from_path(cli.config)?;
    if let Some(level) = cli.log_level {
        config.override_log_level(&level)?;
    }
    init_tracing(&config.logging)?;
    debug!("Configuration loaded");

    match cli.command {
        Command::Places {
            lat,
            lng,
            dedup,
            categories,
        } => {
            let provider = Arc::new(GooglePlacesClient::new(&config.maps)?);
            let aggregator = PlaceAggregator::new(provider, PlaceFilter::new(&config.maps));

            let categories = if categories.is_empty() {
                PlaceCategory::ALL.to_vec()
            } else {
                categories
            };
            let mut places = aggregator.list_places_for(lat, lng, &categories).await?;
            if dedup {
                places = dedup_by_id(places);
            }
            print_json(&places)
        }
        Command::Itinerary {
            destination,
            travelers,
            days,
            interests,
            format,
        } => {
            let request = TripRequest::new(destination, travelers, days, interests);
            // reject bad input before requiring a generation key
            request.validate()?;

            let service = ItineraryService::new(Arc::new(GeminiClient::new(&config.generation)?));
            match format {
                ItineraryFormat::Text => {
                    let itinerary = service.generate_itinerary(&request).await?;
                    print_json(&serde_json::json!({ "itinerary": itinerary }))
                }
                ItineraryFormat::Html => {
                    let itinerary = service.generate_html(&request).await?;
                    print_json(&serde_json::json!({ "itinerary": itinerary }))
                }
                ItineraryFormat::Days => print_json(&service.generate(&request).await?),
            }
        }
        Command::Translate { image, lang } => {
            let translator = ScriptTranslator::new(&config.translation);
            let translated = translator.translate(&image, &lang).await?;
            print_json(&serde_json::json!({ "translatedText": translated }))
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
