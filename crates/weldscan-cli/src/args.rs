//! Command-line argument definitions

use clap::{Parser, Subcommand};

/// Weld X-ray defect detection toolkit
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the tile plan for an image width
    Plan {
        /// Image width in pixels
        #[arg(long, value_name = "PIXELS")]
        width: u32,

        /// Tile edge in pixels
        #[arg(long, default_value_t = weldscan_detect::config::DEFAULT_TILE, value_name = "PIXELS")]
        tile: u32,

        /// Horizontal stride between tiles (defaults to 80% of tile)
        #[arg(long, value_name = "PIXELS")]
        stride: Option<u32>,
    },

    /// Run the contrast-enhancement stack and save its three channels
    Enhance {
        /// Input image (png, jpg, bmp, tiff)
        #[arg(long, value_name = "FILE")]
        input: String,

        /// Output directory for the channel images
        #[arg(long, value_name = "DIR")]
        output: String,

        /// CLAHE clip limit
        #[arg(long, default_value_t = weldscan_filter::DEFAULT_CLIP_LIMIT, value_name = "LIMIT")]
        clip_limit: f64,
    },

    /// Run the full pipeline with recorded per-tile predictions
    Report {
        /// Input image (png, jpg, bmp, tiff)
        #[arg(long, value_name = "FILE")]
        input: String,

        /// Recorded predictions, one `x1 y1 x2 y2 conf class_id` line per
        /// detection, replayed on every tile
        #[arg(long, value_name = "FILE")]
        predictions: String,

        /// Where to write the region report CSV
        #[arg(long, value_name = "FILE")]
        output: String,

        /// Number of report regions
        #[arg(long, default_value_t = weldscan_detect::config::DEFAULT_REGIONS, value_name = "COUNT")]
        regions: u32,

        /// Tile edge in pixels
        #[arg(long, default_value_t = weldscan_detect::config::DEFAULT_TILE, value_name = "PIXELS")]
        tile: u32,
    },
}
