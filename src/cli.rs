use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_API_BASE: &str = "https://flood-assessment-1.onrender.com";

#[derive(Parser, Debug)]
#[command(name = "floodwatch", version, about = "Flood risk assessment client")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        default_value = DEFAULT_API_BASE,
        help = "Analysis service origin"
    )]
    pub api_base: String,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assess flood risk for a latitude/longitude pair.
    Coordinates {
        /// Latitude, -90 to 90.
        #[arg(allow_negative_numbers = true)]
        latitude: String,
        /// Longitude, -180 to 180.
        #[arg(allow_negative_numbers = true)]
        longitude: String,
    },
    /// Assess flood risk from a terrain photo.
    Image {
        /// Path to an image file (at most 10 MiB).
        path: PathBuf,
    },
    /// Validate a terrain photo and print its preview data URL without
    /// submitting it.
    Preview {
        /// Path to an image file (at most 10 MiB).
        path: PathBuf,
    },
}
