// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use chrono::NaiveTime;
use clap::Parser;

fn parse_start(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|e| format!("expected HH:MM ({})", e))
}

#[derive(Parser, Debug, Clone)]
#[command(name = "photo-watch")]
#[command(about = "Photo watch face: a picture for every minute", long_about = None)]
pub struct Cli {
    /// Directory of photos; sorted by file name, the n-th file is image n
    pub image_dir: PathBuf,

    /// Show the time in 24-hour style
    #[arg(long = "24h", default_value = "false")]
    pub twenty_four_hour: bool,

    /// Start the clock at this time of today instead of now
    #[arg(long, value_parser = parse_start)]
    pub start: Option<NaiveTime>,

    /// Simulated seconds per real second
    #[arg(long, default_value = "1")]
    pub speed: u32,

    /// Window magnification of the 144x168 face
    #[arg(long, default_value = "3")]
    pub scale: i32,
}
