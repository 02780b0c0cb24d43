use anyhow::Result;
use particle_clusters::{BoundingBox, Frame, FrameRenderer};
use plotters::{coord::Shift, prelude::*};
use std::ops::Range;

#[derive(Debug, Clone, Copy)]
pub struct ScatterStyle {
    pub color: RGBColor,
    pub point_size: i32,
    pub yaw: f64,
    pub pitch: f64,
    pub scale: f64,
    /// Caption and axis tick labels, both of which need a system font
    pub labels: bool,
}

impl Default for ScatterStyle {
    fn default() -> Self {
        Self {
            color: RED,
            point_size: 2,
            yaw: 0.5,
            pitch: 0.3,
            scale: 0.8,
            labels: true,
        }
    }
}

/// Widens an empty axis so the chart still has a drawable extent.
fn axis_range(range: Range<f64>) -> Range<f64> {
    if range.end > range.start {
        range
    } else {
        range.start - 0.5..range.end + 0.5
    }
}

/// The 12 edges of the box spanned by three axis ranges.
fn box_edges(x: &Range<f64>, y: &Range<f64>, z: &Range<f64>) -> Vec<[(f64, f64, f64); 2]> {
    let corner = |i: usize| {
        (
            if i & 1 == 0 { x.start } else { x.end },
            if i & 2 == 0 { y.start } else { y.end },
            if i & 4 == 0 { z.start } else { z.end },
        )
    };
    (0..8)
        .flat_map(|i| {
            [1, 2, 4]
                .into_iter()
                .filter(move |bit| i & bit == 0)
                .map(move |bit| [corner(i), corner(i | bit)])
        })
        .collect()
}

pub fn draw_frame<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    frame: &Frame<'_>,
    bounds: &BoundingBox,
    style: &ScatterStyle,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let (x, y, z) = (
        axis_range(bounds.axis(0)),
        axis_range(bounds.axis(1)),
        axis_range(bounds.axis(2)),
    );
    let edges = box_edges(&x, &y, &z);
    let mut chart_builder = ChartBuilder::on(area);
    chart_builder.margin(10);
    if style.labels {
        chart_builder.caption(frame.title(), ("sans-serif", 20));
    }
    let mut chart = chart_builder.build_cartesian_3d(x, y, z)?;
    let &ScatterStyle {
        yaw, pitch, scale, ..
    } = style;
    chart.with_projection(|mut pb| {
        pb.yaw = yaw;
        pb.pitch = pitch;
        pb.scale = scale;
        pb.into_matrix()
    });
    if style.labels {
        chart
            .configure_axes()
            .light_grid_style(BLACK.mix(0.15))
            .max_light_lines(3)
            .draw()?;
    }
    chart.draw_series(
        edges
            .into_iter()
            .map(|edge| PathElement::new(edge.to_vec(), BLACK.mix(0.4))),
    )?;
    chart.draw_series(frame.points().iter().map(|p| {
        Circle::new(
            (p.x(), p.y(), p.z()),
            style.point_size,
            style.color.filled(),
        )
    }))?;
    Ok(())
}

/// Draws every frame onto the same area, presenting after each one.
pub struct ScatterRenderer<DB: DrawingBackend> {
    area: DrawingArea<DB, Shift>,
    style: ScatterStyle,
}

impl<DB: DrawingBackend> ScatterRenderer<DB> {
    pub fn new(area: DrawingArea<DB, Shift>, style: ScatterStyle) -> Self {
        Self { area, style }
    }
}

impl<DB> FrameRenderer for ScatterRenderer<DB>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    fn render(&mut self, frame: &Frame<'_>, bounds: &BoundingBox) -> Result<()> {
        self.area.fill(&WHITE)?;
        draw_frame(&self.area, frame, bounds, &self.style)?;
        self.area.present()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use particle_clusters::{FrameAnimator, FrameStream, XYZ};

    const WIDTH: u32 = 160;
    const HEIGHT: u32 = 120;

    fn headless() -> ScatterStyle {
        ScatterStyle {
            labels: false,
            point_size: 3,
            ..ScatterStyle::default()
        }
    }

    fn has_pixel(buf: &[u8], color: RGBColor) -> bool {
        buf.chunks_exact(3)
            .any(|px| *px == [color.0, color.1, color.2])
    }

    #[test]
    fn axis_range_keeps_proper_ranges() {
        assert_eq!(axis_range(-50.0..50.0), -50.0..50.0);
    }

    #[test]
    fn axis_range_widens_degenerate_axes() {
        let bbox = BoundingBox::from_points([XYZ::from([1.0, 2.0, 3.0])]);
        assert_eq!(axis_range(bbox.axis(0)), 0.5..1.5);
        assert_eq!(axis_range(bbox.axis(2)), 2.5..3.5);
    }

    #[test]
    fn box_edges_test() {
        let edges = box_edges(&(0.0..1.0), &(0.0..2.0), &(0.0..3.0));
        assert_eq!(edges.len(), 12);
        for [a, b] in edges {
            let changed = [a.0 != b.0, a.1 != b.1, a.2 != b.2];
            assert_eq!(changed.iter().filter(|&&c| c).count(), 1);
        }
    }

    #[test]
    fn render_into_buffer() {
        let stream = FrameStream::new(
            (0..7)
                .map(|i| i as f64)
                .map(|v| XYZ::from([v * 10.0 - 30.0, 20.0 - v * 5.0, v * v]))
                .collect(),
        );
        let mut buf = vec![0u8; (WIDTH * HEIGHT * 3) as usize];
        let rendered = {
            let area = BitMapBackend::with_buffer(&mut buf, (WIDTH, HEIGHT)).into_drawing_area();
            let mut renderer = ScatterRenderer::new(area, headless());
            FrameAnimator::new(&stream, 2).run(&mut renderer).unwrap()
        };
        assert_eq!(rendered, 3);
        assert!(has_pixel(&buf, WHITE));
        assert!(has_pixel(&buf, RED));
    }

    #[test]
    fn render_nothing_without_frames() {
        let stream = FrameStream::new(vec![XYZ::from([1.0, 2.0, 3.0])]);
        let mut buf = vec![0u8; (WIDTH * HEIGHT * 3) as usize];
        let rendered = {
            let area = BitMapBackend::with_buffer(&mut buf, (WIDTH, HEIGHT)).into_drawing_area();
            let mut renderer = ScatterRenderer::new(area, headless());
            FrameAnimator::new(&stream, 2).run(&mut renderer).unwrap()
        };
        assert_eq!(rendered, 0);
        assert!(buf.iter().all(|&b| b == 0));
    }
}
