use anyhow::Result;
use clap::Parser;
use log::{info, warn};
use particle_clusters::{FrameAnimator, FrameStream};
use plotters::prelude::{BitMapBackend, IntoDrawingArea};
use std::{num::NonZeroUsize, path::PathBuf};

mod scatter;
use scatter::{ScatterRenderer, ScatterStyle};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Flat `x,y,z` coordinate stream, all frames concatenated
    #[arg(default_value = "points.txt")]
    points_file: PathBuf,

    /// Number of particles per iteration
    #[arg(short, long)]
    n_particles: NonZeroUsize,

    /// Animated GIF to write
    #[arg(short, long, default_value = "animation.gif")]
    output: PathBuf,

    /// Delay between frames (ms)
    #[arg(short, long, default_value_t = 10)]
    interval: u32,

    /// Image width (px)
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Image height (px)
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Skip the caption and tick labels (no system font needed)
    #[arg(long)]
    no_labels: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let stream = FrameStream::read(&cli.points_file)?;
    let mut animator = FrameAnimator::new(&stream, cli.n_particles.get());
    if animator.frame_count() == 0 {
        warn!(
            "{} records are fewer than {} particles per iteration",
            stream.len(),
            cli.n_particles
        );
        println!("No frames to render");
        return Ok(());
    }
    let bounds = animator.bounds();
    info!("bounds: {} .. {}", bounds.min(), bounds.max());

    let drawing_area = BitMapBackend::gif(&cli.output, (cli.width, cli.height), cli.interval)?
        .into_drawing_area();
    let style = ScatterStyle {
        labels: !cli.no_labels,
        ..ScatterStyle::default()
    };
    let mut renderer = ScatterRenderer::new(drawing_area, style);
    let frames = animator.run(&mut renderer)?;
    println!("Rendered {frames} frames to {}", cli.output.display());
    Ok(())
}
