use anyhow::{Context, Result};
use log::{info, warn};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::parser::{ParseResult, ParsingError, RecordLines};
use crate::particle::ParticleRecord;
use crate::xyz::XYZ;

/// How much the reader trusts the declared particle count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadMode {
    /// Read at most the declared number of records, stopping early at EOF.
    #[default]
    Lenient,
    /// Fail unless the declared count equals the number of record lines.
    Strict,
}

#[derive(Debug, Clone)]
pub struct ParticleFile {
    declared_count: usize,
    particles: Vec<ParticleRecord>,
}

impl ParticleFile {
    #[must_use]
    pub fn new(particles: Vec<ParticleRecord>) -> Self {
        Self {
            declared_count: particles.len(),
            particles,
        }
    }

    pub fn from_reader<B: BufRead>(reader: B, mode: ReadMode) -> ParseResult<Self> {
        let mut lines = RecordLines::new(reader);
        let declared_count = match lines.next() {
            Some(Ok((line, count))) => count
                .trim()
                .parse::<usize>()
                .map_err(|_| ParsingError::InvalidCount { line })?,
            Some(Err(err)) => return Err(err),
            None => return Err(ParsingError::MissingCount),
        };
        let mut particles = Vec::with_capacity(declared_count);
        for line in lines {
            if mode == ReadMode::Lenient && particles.len() == declared_count {
                break;
            }
            let (line_number, line) = line?;
            particles.push(ParticleRecord::parse(&line, line_number)?);
        }
        if particles.len() != declared_count {
            match mode {
                ReadMode::Strict => {
                    return Err(ParsingError::InconsistentCount {
                        declared: declared_count,
                        actual: particles.len(),
                    })
                }
                ReadMode::Lenient => warn!(
                    "declared {declared_count} particles, only {} present",
                    particles.len()
                ),
            }
        }
        Ok(Self {
            declared_count,
            particles,
        })
    }

    pub fn read(path: &Path, mode: ReadMode) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Reading {}", path.display()))?;
        let particle_file = Self::from_reader(BufReader::new(file), mode)
            .with_context(|| format!("Parsing {}", path.display()))?;
        info!(
            "read {} particles from {}",
            particle_file.len(),
            path.display()
        );
        Ok(particle_file)
    }

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "{}", self.particles.len())?;
        for particle in &self.particles {
            writeln!(w, "{particle}")?;
        }
        Ok(())
    }

    /// Overwrites `path`. A failed write may leave a partial file behind.
    pub fn save(&self, path: &Path) -> Result<()> {
        let f = File::create(path).with_context(|| format!("Creating {}", path.display()))?;
        let mut w = BufWriter::new(f);
        self.write(&mut w)
            .and_then(|()| w.flush())
            .with_context(|| format!("Writing {}", path.display()))
    }

    #[inline]
    #[must_use]
    pub fn declared_count(&self) -> usize {
        self.declared_count
    }

    #[inline]
    #[must_use]
    pub fn particles(&self) -> &[ParticleRecord] {
        &self.particles
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn positions(&self) -> impl Iterator<Item = XYZ> + '_ {
        self.particles.iter().map(|p| p.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "3
-45 -44 -43 0.1 0.2 0.3
-41 -42 -49 -0.1 -0.2 -0.3
45 44 43 0.5 0.5 -0.5
";

    #[test]
    fn test_read_sample() {
        let file = ParticleFile::from_reader(SAMPLE.as_bytes(), ReadMode::Strict).unwrap();
        assert_eq!(file.declared_count(), 3);
        assert_eq!(file.len(), 3);
        assert_eq!(file.particles()[2].position, XYZ::from([45.0, 44.0, 43.0]));
        assert_eq!(file.particles()[1].velocity, XYZ::from([-0.1, -0.2, -0.3]));
    }

    #[test]
    fn test_write_then_read() {
        let file = ParticleFile::from_reader(SAMPLE.as_bytes(), ReadMode::Lenient).unwrap();
        let mut buf = Vec::new();
        file.write(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().next(), Some("3"));
        assert_eq!(text.lines().count(), 4);
        let again = ParticleFile::from_reader(text.as_bytes(), ReadMode::Strict).unwrap();
        assert_eq!(again.particles(), file.particles());
    }

    #[test]
    fn test_lenient_trusts_declared_count() {
        let over = SAMPLE.replacen('3', "5", 1);
        let file = ParticleFile::from_reader(over.as_bytes(), ReadMode::Lenient).unwrap();
        assert_eq!(file.declared_count(), 5);
        assert_eq!(file.len(), 3);

        let under = SAMPLE.replacen('3', "2", 1);
        let file = ParticleFile::from_reader(under.as_bytes(), ReadMode::Lenient).unwrap();
        assert_eq!(file.declared_count(), 2);
        assert_eq!(file.len(), 2);
    }

    #[test]
    fn test_lenient_ignores_lines_past_declared_count() {
        let input = format!("{}not a particle\n", SAMPLE.replacen('3', "2", 1));
        let file = ParticleFile::from_reader(input.as_bytes(), ReadMode::Lenient).unwrap();
        assert_eq!(file.len(), 2);
    }

    #[test]
    fn test_strict_rejects_inconsistent_count() {
        for (declared, actual) in [("5", 3), ("2", 3)] {
            let input = SAMPLE.replacen('3', declared, 1);
            match ParticleFile::from_reader(input.as_bytes(), ReadMode::Strict) {
                Err(ParsingError::InconsistentCount {
                    declared: d,
                    actual: a,
                }) => {
                    assert_eq!(d.to_string(), declared);
                    assert_eq!(a, actual);
                }
                other => panic!("unexpected: {other:?}"),
            }
        }
    }

    #[test]
    fn test_malformed_record_aborts() {
        let input = "2\n1 2 3 4 5 6\n1 2 three 4 5 6\n";
        match ParticleFile::from_reader(input.as_bytes(), ReadMode::Lenient) {
            Err(ParsingError::InvalidNumber { line, .. }) => assert_eq!(line, 3),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_value_aborts() {
        let input = "2\n1 2 3 4 5 6\n1 2 3 -inf 5 6\n";
        match ParticleFile::from_reader(input.as_bytes(), ReadMode::Strict) {
            Err(ParsingError::NonFiniteNumber { line }) => assert_eq!(line, 3),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_missing_or_invalid_count() {
        assert!(matches!(
            ParticleFile::from_reader("".as_bytes(), ReadMode::Lenient),
            Err(ParsingError::MissingCount)
        ));
        assert!(matches!(
            ParticleFile::from_reader("-3\n".as_bytes(), ReadMode::Lenient),
            Err(ParsingError::InvalidCount { line: 1 })
        ));
    }
}
