use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inkframe::models::config::CONFIG_ENV;
use inkframe::models::{AppConfig, Overrides};
use inkframe::services::convert_file;

#[derive(Parser)]
#[command(name = "inkframe")]
#[command(about = "Convert images to dithered rasters for fixed-palette e-paper panels")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an image and write an indexed PNG preview
    Convert {
        /// Source image (any format the image crate can decode)
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// YAML config file (defaults to $INKFRAME_CONFIG)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Target width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Target height in pixels
        #[arg(long)]
        height: Option<u32>,

        /// Display mode: "fill" (crop) or "fit" (pad)
        #[arg(short, long)]
        mode: Option<String>,

        /// Counter-clockwise rotation in degrees
        #[arg(short, long, allow_hyphen_values = true)]
        rotation: Option<f32>,

        /// Padding color for fit mode (e.g. "#FFFFFF")
        #[arg(long)]
        background: Option<String>,

        /// Fraction of quantization error to diffuse (0.0 - 1.0)
        #[arg(short, long)]
        strength: Option<f32>,

        /// Color distance: euclidean, weighted-luma, weighted-luma-linear
        #[arg(long)]
        metric: Option<String>,

        /// Palette as comma-separated hex RGB (e.g. "#000000,#FFFFFF,#FF0000")
        #[arg(long)]
        colors: Option<String>,

        /// Saturation factor (1.0 = unchanged)
        #[arg(long)]
        saturation: Option<f32>,

        /// Contrast factor (1.0 = unchanged)
        #[arg(long)]
        contrast: Option<f32>,
    },
    /// Print the active palette with its indices
    Palette {
        /// YAML config file (defaults to $INKFRAME_CONFIG)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Convert {
            input,
            output,
            config,
            width,
            height,
            mode,
            rotation,
            background,
            strength,
            metric,
            colors,
            saturation,
            contrast,
        }) => {
            init_logging();
            let overrides = Overrides {
                width,
                height,
                mode,
                rotation,
                background,
                strength,
                metric,
                palette: colors.as_deref().map(parse_colors),
                saturation,
                contrast,
            };
            run_convert_command(&input, &output, config.as_deref(), overrides)
        }
        Some(Commands::Palette { config }) => {
            init_logging();
            run_palette_command(config.as_deref())
        }
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkframe=info,epd_raster=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Split a `--colors` value into hex entries, dropping empty items.
fn parse_colors(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn run_convert_command(
    input: &Path,
    output: &Path,
    config_path: Option<&Path>,
    overrides: Overrides,
) -> anyhow::Result<()> {
    let mut config = AppConfig::load(config_path)?;
    config.apply(overrides);

    let summary = convert_file(&config, input, output)?;
    println!("Wrote {}: {summary}", output.display());
    Ok(())
}

fn run_palette_command(config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = AppConfig::load(config_path)?;
    let palette = config.palette()?;

    println!("Palette ({} colors):", palette.len());
    for (idx, hex) in palette.to_hex().iter().enumerate() {
        println!("  {idx}: {hex}");
    }
    Ok(())
}

fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_env = std::env::var(CONFIG_ENV).ok();

    println!("inkframe v{VERSION}");
    println!("Raster converter for fixed-palette e-paper panels\n");

    println!("Environment Variables:");
    println!(
        "  {CONFIG_ENV} = {}",
        config_env.as_deref().unwrap_or("(not set, using defaults)")
    );
    println!(
        "  RUST_LOG        = {}",
        std::env::var("RUST_LOG")
            .ok()
            .as_deref()
            .unwrap_or("inkframe=info,epd_raster=warn (default)")
    );

    println!("\nUsage:");
    println!("  inkframe convert <INPUT> -o <OUTPUT.png>   Convert an image");
    println!("  inkframe palette                           Show the active palette");
    println!("  inkframe --help                            All options");
}
