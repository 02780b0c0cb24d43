use std::fmt;

use crate::parser::{parse_values, ParseResult};
use crate::xyz::XYZ;

pub const PARTICLE_FIELDS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleRecord {
    pub position: XYZ,
    pub velocity: XYZ,
}

impl ParticleRecord {
    pub fn new(position: XYZ, velocity: XYZ) -> Self {
        Self { position, velocity }
    }

    /// Parses a `x y z vx vy vz` line.
    pub fn parse(line: &str, line_number: usize) -> ParseResult<Self> {
        let [x, y, z, vx, vy, vz] =
            parse_values::<PARTICLE_FIELDS>(line.split_whitespace(), line_number)?;
        Ok(Self::new(XYZ::from([x, y, z]), XYZ::from([vx, vy, vz])))
    }
}

impl fmt::Display for ParticleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (p, v) = (self.position, self.velocity);
        write!(
            f,
            "{} {} {} {} {} {}",
            p.x(),
            p.y(),
            p.z(),
            v.x(),
            v.y(),
            v.z()
        )
    }
}
