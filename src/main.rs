use std::path::PathBuf;

use angle::{Angle, Deg};
use anyhow::Context;
use clap::Parser;
use hexknot::{Coverage, Driver, Event, GenOpts, RenderingOpts, Viewport};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Generate a tiling of Celtic knots on a hexagonal grid, and write it out as an SVG
#[derive(Parser, Debug)]
#[command(name = "hexknot", version, about)]
struct Cli {
    /// Width of the image, in pixels
    #[arg(long, default_value_t = 1280.0)]
    width: f32,
    /// Height of the image, in pixels
    #[arg(long, default_value_t = 800.0)]
    height: f32,
    /// Seed for the random number generator.  A random seed is used if this isn't given
    #[arg(long)]
    seed: Option<u64>,
    /// Direction which the light comes from, in degrees clockwise from the positive x-axis
    #[arg(long, default_value_t = -45.0, allow_hyphen_values = true)]
    light: f32,
    /// Radius of every hexagon, in pixels.  Chosen randomly from the image size if not given
    #[arg(long)]
    radius: Option<f32>,
    /// Only use hexagons which fit entirely inside the image
    #[arg(long)]
    contain: bool,
    /// Number of times to regenerate the tiling (as if the image had been clicked) before
    /// writing it.  The first tiling is always colourful and outlined
    #[arg(long, default_value_t = 0)]
    clicks: usize,
    /// Width of the loop outlines, in pixels
    #[arg(long, default_value_t = 0.5)]
    stroke_width: f32,
    /// File to write the SVG to
    #[arg(short, long, value_name = "FILE", default_value = "knots.svg")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let seed = cli.seed.unwrap_or_else(rand::random);
    log::info!("Using seed {}", seed);
    let opts = GenOpts {
        coverage: if cli.contain {
            Coverage::Contain
        } else {
            Coverage::Cover
        },
        radius: cli.radius,
    };
    let mut driver = Driver::new(
        Viewport::new(cli.width, cli.height),
        opts,
        Deg(cli.light).to_rad(),
        ChaCha8Rng::seed_from_u64(seed),
    );

    let mut frame = driver.tick();
    for _ in 0..cli.clicks {
        driver.push(Event::Click);
        frame = driver.tick().or(frame);
    }
    let image = frame.with_context(|| {
        format!(
            "couldn't generate a tiling for a {}x{} image (radius {:?})",
            cli.width, cli.height, cli.radius
        )
    })?;

    let rendering_opts = RenderingOpts::default().with_outline_width(cli.stroke_width);
    std::fs::write(&cli.output, image.svg_string(&rendering_opts))
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    log::info!("Written to {}", cli.output.display());
    Ok(())
}
