use anyhow::Result;
use log::{debug, info, warn};

use crate::bounding_box::BoundingBox;
use crate::frame_stream::{Frame, FrameStream};

/// Drawing surface the animation loop pushes frames into.
pub trait FrameRenderer {
    fn render(&mut self, frame: &Frame<'_>, bounds: &BoundingBox) -> Result<()>;
}

/// Replays a [`FrameStream`] one frame per tick inside bounds fixed up front.
pub struct FrameAnimator<'a> {
    stream: &'a FrameStream,
    particles_per_iteration: usize,
    bounds: BoundingBox,
    frame_count: usize,
    iteration: usize,
}

impl<'a> FrameAnimator<'a> {
    pub fn new(stream: &'a FrameStream, particles_per_iteration: usize) -> Self {
        let bounds = stream.bounds();
        let frame_count = stream.frame_count(particles_per_iteration);
        info!(
            "{} records, {particles_per_iteration} particles per iteration, {frame_count} frames",
            stream.len()
        );
        if let Some(dropped) = stream.len().checked_rem(particles_per_iteration) {
            if dropped > 0 && frame_count > 0 {
                warn!("dropping {dropped} trailing records of a partial frame");
            }
        }
        Self {
            stream,
            particles_per_iteration,
            bounds,
            frame_count,
            iteration: 0,
        }
    }

    #[inline]
    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    #[inline]
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.frame_count - self.iteration
    }

    pub fn tick(&mut self) -> Option<Frame<'a>> {
        if self.iteration >= self.frame_count {
            return None;
        }
        let frame = self
            .stream
            .frame(self.iteration, self.particles_per_iteration)?;
        debug!("iteration {}", self.iteration);
        self.iteration += 1;
        Some(frame)
    }

    /// Renders every remaining frame and returns how many were rendered.
    pub fn run<R: FrameRenderer + ?Sized>(&mut self, renderer: &mut R) -> Result<usize> {
        let mut rendered = 0;
        while let Some(frame) = self.tick() {
            renderer.render(&frame, &self.bounds)?;
            rendered += 1;
        }
        Ok(rendered)
    }
}
