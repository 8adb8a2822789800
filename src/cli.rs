//! CLI command definitions and subcommands

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::models::PlaceCategory;
use crate::translate::DEFAULT_TARGET_LANG;

/// Tripweave - nearby places and AI-generated travel itineraries
#[derive(Debug, Parser)]
#[command(
    name = "tripweave",
    about = "Nearby places and AI-generated travel itineraries",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List well-rated places around a point
    Places {
        #[arg(long, allow_negative_numbers = true)]
        lat: Option<f64>,

        #[arg(long, allow_negative_numbers = true)]
        lng: Option<f64>,

        /// Drop places repeated across categories
        #[arg(long)]
        dedup: bool,

        /// Restrict the query to these categories (repeatable)
        #[arg(long = "category", value_name = "CATEGORY")]
        categories: Vec<PlaceCategory>,
    },

    /// Generate a travel itinerary
    Itinerary {
        #[arg(short, long)]
        destination: String,

        /// Number of travelers
        #[arg(short, long, default_value_t = 1)]
        travelers: u32,

        /// Trip length in days
        #[arg(long)]
        days: u32,

        /// Places or themes of interest (repeatable)
        #[arg(short, long = "interest", value_name = "INTEREST")]
        interests: Vec<String>,

        #[arg(short, long, value_enum, default_value_t = ItineraryFormat::Text)]
        format: ItineraryFormat,
    },

    /// Extract and translate the text in an image
    Translate {
        #[arg(long)]
        image: PathBuf,

        #[arg(long, default_value = DEFAULT_TARGET_LANG)]
        lang: String,
    },
}

/// Rendering of the generated itinerary
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ItineraryFormat {
    /// Normalized plain text
    Text,
    /// Text prepared for HTML embedding
    Html,
    /// Per-day plans
    Days,
}
