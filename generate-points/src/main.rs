use anyhow::Result;
use clap::Parser;
use log::debug;
use particle_clusters::{generate_particle_file, GeneratorConfig};
use rand::{rngs::StdRng, SeedableRng};
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Output particle file, overwritten if it exists
    #[arg(default_value = "generated_particle_data.txt")]
    output: PathBuf,

    /// Total number of particles
    #[arg(short = 'n', long, default_value_t = 3000)]
    count: usize,

    /// Number of particles in the first (near) cluster, the rest go to the far one
    #[arg(short, long, default_value_t = 1500)]
    cluster_size: usize,

    /// Seed for reproducible output
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let config = GeneratorConfig::default();
    debug!("config: {config:?}");
    generate_particle_file(&cli.output, cli.count, cli.cluster_size, &config, &mut rng)?;
    println!(
        "Generated {} particles in {}",
        cli.count,
        cli.output.display()
    );
    Ok(())
}
