use anyhow::{Context, Result};
use log::info;
use rand::Rng;
use std::{error, fmt, path::Path};

use crate::particle::ParticleRecord;
use crate::particle_file::ParticleFile;
use crate::xyz::XYZ;

#[derive(Debug, PartialEq)]
pub enum GeneratorError {
    InvalidRange { lo: f64, hi: f64 },
    ClusterLargerThanTotal { cluster_size: usize, total: usize },
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRange { lo, hi } => write!(f, "invalid sampling range [{lo}, {hi})"),
            Self::ClusterLargerThanTotal {
                cluster_size,
                total,
            } => write!(
                f,
                "first cluster size {cluster_size} exceeds total particle count {total}"
            ),
        }
    }
}

impl error::Error for GeneratorError {}

/// Half-open `[lo, hi)` range shared by all three axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingRange {
    lo: f64,
    hi: f64,
}

impl SamplingRange {
    pub fn new(lo: f64, hi: f64) -> Result<Self, GeneratorError> {
        if lo.is_finite() && hi.is_finite() && lo < hi {
            Ok(Self { lo, hi })
        } else {
            Err(GeneratorError::InvalidRange { lo, hi })
        }
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lo && value < self.hi
    }

    fn sample_xyz<R: Rng + ?Sized>(&self, rng: &mut R) -> XYZ {
        XYZ::from([
            rng.gen_range(self.lo..self.hi),
            rng.gen_range(self.lo..self.hi),
            rng.gen_range(self.lo..self.hi),
        ])
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterSpec {
    pub position: SamplingRange,
    pub velocity: SamplingRange,
}

impl ClusterSpec {
    pub const NEAR: Self = Self {
        position: SamplingRange { lo: -50.0, hi: -40.0 },
        velocity: SamplingRange { lo: -1.0, hi: 1.0 },
    };
    pub const FAR: Self = Self {
        position: SamplingRange { lo: 40.0, hi: 50.0 },
        velocity: SamplingRange { lo: -1.0, hi: 1.0 },
    };

    pub fn new(position: SamplingRange, velocity: SamplingRange) -> Self {
        Self { position, velocity }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ParticleRecord {
        let position = self.position.sample_xyz(rng);
        let velocity = self.velocity.sample_xyz(rng);
        ParticleRecord::new(position, velocity)
    }

    /// Per-axis gap between the position ranges, zero when they overlap.
    pub fn gap(a: &Self, b: &Self) -> f64 {
        let (a, b) = (a.position, b.position);
        (b.lo - a.hi).max(a.lo - b.hi).max(0.0)
    }

    pub fn contains(&self, particle: &ParticleRecord) -> bool {
        particle.position.coords().iter().all(|&v| self.position.contains(v))
            && particle.velocity.coords().iter().all(|&v| self.velocity.contains(v))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    pub near: ClusterSpec,
    pub far: ClusterSpec,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            near: ClusterSpec::NEAR,
            far: ClusterSpec::FAR,
        }
    }
}

impl GeneratorConfig {
    /// The first `first_cluster_size` particles come from `near`, the rest from `far`.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        total: usize,
        first_cluster_size: usize,
        rng: &mut R,
    ) -> Result<Vec<ParticleRecord>, GeneratorError> {
        if first_cluster_size > total {
            return Err(GeneratorError::ClusterLargerThanTotal {
                cluster_size: first_cluster_size,
                total,
            });
        }
        let mut particles = Vec::with_capacity(total);
        particles.extend((0..first_cluster_size).map(|_| self.near.sample(rng)));
        particles.extend((first_cluster_size..total).map(|_| self.far.sample(rng)));
        Ok(particles)
    }
}

pub fn generate_particle_file<R: Rng + ?Sized>(
    path: &Path,
    total: usize,
    first_cluster_size: usize,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<()> {
    let particles = config
        .generate(total, first_cluster_size, rng)
        .context("Generating particles")?;
    ParticleFile::new(particles).save(path)?;
    info!(
        "wrote {total} particles ({first_cluster_size} near, {} far) to {}",
        total - first_cluster_size,
        path.display()
    );
    Ok(())
}
