//! Command-line interface for gem_template
//!
//! Turns an image file into a template grid and prints it as JSON.

use clap::Parser;
use gem_template::image_loader::load_image;
use gem_template::{generate_grid, GemGrid, GeneratorConfig, GridDimensions, RegionOfInterest};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// Generate a gem painting template from a photo.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Input image
    input: PathBuf,

    /// Grid width in cells
    #[arg(short = 'W', long, default_value_t = 50)]
    width: u32,

    /// Grid height in cells; follows the crop aspect ratio when omitted
    #[arg(short = 'H', long)]
    height: Option<u32>,

    /// Crop box as x,y,w,h in image pixels (default: whole image)
    #[arg(long, value_name = "X,Y,W,H")]
    crop: Option<String>,

    /// Maximum palette size (overrides the config file)
    #[arg(short = 'k', long)]
    colors: Option<usize>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the numbered legend to stderr
    #[arg(long)]
    legend: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GeneratorConfig::from_json_file(path).unwrap_or_else(|e| fail(&e)),
        None => GeneratorConfig::default(),
    };
    if let Some(colors) = args.colors {
        config.max_colors = colors;
    }

    let bitmap = load_image(&args.input).unwrap_or_else(|e| fail(&e));

    let roi = match &args.crop {
        Some(spec) => parse_crop(spec).unwrap_or_else(|msg| {
            eprintln!("Error: {}", msg);
            process::exit(1);
        }),
        None => RegionOfInterest::whole(bitmap.width(), bitmap.height()),
    };

    let dims = match args.height {
        Some(height) => GridDimensions::clamped(args.width, height, config.max_grid_dimension),
        None => {
            let region = roi
                .clamp_to(bitmap.width(), bitmap.height())
                .unwrap_or_else(|e| fail(&e));
            GridDimensions::fit_aspect(args.width, &region, config.max_grid_dimension)
        }
    };

    let grid = generate_grid(&bitmap, &roi, &dims, &config).unwrap_or_else(|e| fail(&e));
    print_result(&grid, args.legend);
}

fn fail(error: &gem_template::GridError) -> ! {
    eprintln!("Generation failed: {}", error);
    if error.is_recoverable() {
        eprintln!("Suggestion: {}", error.user_message());
    }
    process::exit(1);
}

fn parse_crop(spec: &str) -> Result<RegionOfInterest, &'static str> {
    let parts: Vec<&str> = spec.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        return Err("Provide crop in the format x,y,w,h.");
    }

    let x = parts[0].parse::<i64>().map_err(|_| "Invalid crop x.")?;
    let y = parts[1].parse::<i64>().map_err(|_| "Invalid crop y.")?;
    let w = parts[2].parse::<u32>().map_err(|_| "Invalid crop width.")?;
    let h = parts[3].parse::<u32>().map_err(|_| "Invalid crop height.")?;
    Ok(RegionOfInterest::new(x, y, w, h))
}

fn print_result(grid: &GemGrid, legend: bool) {
    // JSON to stdout for programmatic use
    match serde_json::to_string_pretty(grid) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing grid: {}", e);
            process::exit(1);
        }
    }

    eprintln!();
    eprintln!("Template Summary:");
    eprintln!("  Grid: {} x {}", grid.width, grid.height);
    eprintln!("  Colours used: {} of {}", grid.distinct_colors(), grid.palette.len());

    if legend {
        eprintln!("  Legend:");
        for entry in grid.legend() {
            eprintln!("    {:>3}  {}  ({} cells)", entry.number, entry.hex, entry.count);
        }
    }
}
