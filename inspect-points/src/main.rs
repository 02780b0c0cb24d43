use anyhow::Result;
use clap::Parser;
use itertools::Itertools;
use log::info;
use nalgebra::{Point3, Vector3};
use particle_clusters::{
    BoundingBox, ClusterSpec, GeneratorConfig, ParticleFile, ParticleRecord, ReadMode, XYZ,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Particle file (count line followed by `x y z vx vy vz` records)
    particle_file: PathBuf,

    /// Fail if the declared count differs from the number of records
    #[arg(long)]
    strict: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cluster {
    Near,
    Far,
    Unassigned,
}

fn in_cluster(spec: &ClusterSpec, p: XYZ) -> bool {
    p.coords().iter().all(|&v| spec.position.contains(v))
}

fn classify(config: &GeneratorConfig, particle: &ParticleRecord) -> Cluster {
    if in_cluster(&config.near, particle.position) {
        Cluster::Near
    } else if in_cluster(&config.far, particle.position) {
        Cluster::Far
    } else {
        Cluster::Unassigned
    }
}

fn centroid(points: impl IntoIterator<Item = XYZ>) -> Option<Point3<f64>> {
    let (sum, cnt) = points
        .into_iter()
        .fold((Vector3::<f64>::zeros(), 0usize), |(sum, cnt), p| {
            (sum + p.point().coords, cnt + 1)
        });
    (cnt > 0).then(|| Point3::from(sum / cnt as f64))
}

fn format_xyz(p: XYZ) -> String {
    p.coords().iter().map(|v| format!("{v:10.4}")).join("\t")
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mode = if cli.strict {
        ReadMode::Strict
    } else {
        ReadMode::Lenient
    };
    let file = ParticleFile::read(&cli.particle_file, mode)?;
    println!("declared: {}", file.declared_count());
    println!("records:  {}", file.len());

    let config = GeneratorConfig::default();
    for cluster in [Cluster::Near, Cluster::Far, Cluster::Unassigned] {
        let members = file
            .particles()
            .iter()
            .filter(|p| classify(&config, p) == cluster)
            .map(|p| p.position)
            .collect::<Vec<_>>();
        info!("{cluster:?}: {} particles", members.len());
        match centroid(members.iter().copied()) {
            Some(c) => println!(
                "{cluster:?}\t{}\t{}",
                members.len(),
                format_xyz(c.into())
            ),
            None => println!("{cluster:?}\t0"),
        }
    }

    let bbox = BoundingBox::from_points(file.positions());
    if !bbox.is_empty() {
        println!("# axis min max");
        for (axis, i) in ["x", "y", "z"].iter().zip(0..) {
            let range = bbox.axis(i);
            println!("{axis}\t{:10.4}\t{:10.4}", range.start, range.end);
        }
    }
    Ok(())
}
