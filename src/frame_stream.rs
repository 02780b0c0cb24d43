use anyhow::{Context, Result};
use log::info;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::bounding_box::BoundingBox;
use crate::parser::{parse_values, ParseResult, RecordLines};
use crate::xyz::XYZ;

pub const FRAME_STREAM_DELIMITER: char = ',';

/// One time step: `particles_per_iteration` consecutive records of a [`FrameStream`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame<'a> {
    index: usize,
    points: &'a [XYZ],
}

impl<'a> Frame<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn points(&self) -> &'a [XYZ] {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn title(&self) -> String {
        format!("Particle Animation - Iteration {}", self.index)
    }
}

/// Flat `x,y,z` coordinate records of all frames, concatenated in iteration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameStream {
    coords: Vec<XYZ>,
}

impl FrameStream {
    #[must_use]
    pub fn new(coords: Vec<XYZ>) -> Self {
        Self { coords }
    }

    pub fn from_reader<B: BufRead>(reader: B) -> ParseResult<Self> {
        let coords = RecordLines::new(reader)
            .map(|line| {
                let (line_number, line) = line?;
                parse_values::<3>(line.split(FRAME_STREAM_DELIMITER), line_number).map(XYZ::from)
            })
            .collect::<ParseResult<Vec<_>>>()?;
        Ok(Self { coords })
    }

    pub fn read(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Reading {}", path.display()))?;
        let stream = Self::from_reader(BufReader::new(file))
            .with_context(|| format!("Parsing {}", path.display()))?;
        info!("read {} records from {}", stream.len(), path.display());
        Ok(stream)
    }

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        for p in &self.coords {
            writeln!(w, "{:.6},{:.6},{:.6}", p.x(), p.y(), p.z())?;
        }
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let f = File::create(path).with_context(|| format!("Creating {}", path.display()))?;
        let mut w = BufWriter::new(f);
        self.write(&mut w)
            .and_then(|()| w.flush())
            .with_context(|| format!("Writing {}", path.display()))
    }

    #[inline]
    pub fn coords(&self) -> &[XYZ] {
        &self.coords
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_points(self.coords.iter().copied())
    }

    /// Number of full frames. A trailing partial frame is not counted, and a
    /// zero `particles_per_iteration` yields no frames.
    #[inline]
    pub fn frame_count(&self, particles_per_iteration: usize) -> usize {
        self.coords
            .len()
            .checked_div(particles_per_iteration)
            .unwrap_or(0)
    }

    pub fn frame(&self, index: usize, particles_per_iteration: usize) -> Option<Frame<'_>> {
        if index >= self.frame_count(particles_per_iteration) {
            return None;
        }
        let start = index * particles_per_iteration;
        let end = start + particles_per_iteration;
        Some(Frame {
            index,
            points: &self.coords[start..end],
        })
    }

    pub fn frames(&self, particles_per_iteration: usize) -> impl Iterator<Item = Frame<'_>> {
        (0..self.frame_count(particles_per_iteration))
            .filter_map(move |i| self.frame(i, particles_per_iteration))
    }
}
