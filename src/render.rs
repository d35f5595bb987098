//! Drawing the point history onto an egui painter.
//!
//! Index 0 of the history is the newest point and is drawn fully opaque;
//! older points fade out quadratically towards the tail.

use egui::{Color32, Mesh, Painter, Pos2, Shape, Vec2};
use serde::{Deserialize, Serialize};

use crate::data::history::PointHistory;

/// Alpha multiplier of the halo pass drawn under the trace.
const GLOW_ALPHA: f32 = 0.12;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum VisualizationMode {
    /// One disc per point.
    #[default]
    Points,
    /// Consecutive points joined by segments.
    Lines,
}

impl VisualizationMode {
    pub const ALL: &'static [VisualizationMode] =
        &[VisualizationMode::Points, VisualizationMode::Lines];

    pub fn label(&self) -> &'static str {
        match self {
            VisualizationMode::Points => "Points",
            VisualizationMode::Lines => "Lines",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TraceStyle {
    pub mode: VisualizationMode,
    /// Disc diameter / segment width in pixels.
    pub thickness: f32,
    /// Extra halo width in pixels; 0 disables the glow pass.
    pub glow_radius: f32,
    pub color: Color32,
}

impl Default for TraceStyle {
    fn default() -> Self {
        Self {
            mode: VisualizationMode::Points,
            thickness: 4.0,
            glow_radius: 0.0,
            color: Color32::from_rgb(177, 224, 255),
        }
    }
}

/// Alpha of the point at `index` in a history of `count` points.
pub fn point_alpha(index: usize, count: usize) -> u8 {
    if count == 0 {
        return 0;
    }
    let t = 1.0 - (index as f32 / count as f32);
    (255.0 * t * t).clamp(0.0, 255.0) as u8
}

/// Corners `[a - n, a + n, b - n, b + n]` of a `thickness` wide quad along
/// `a → b`, or `None` when the segment has no direction.
pub fn segment_quad(a: Pos2, b: Pos2, thickness: f32) -> Option<[Pos2; 4]> {
    let d = b - a;
    let len = d.length();
    if !len.is_finite() || len <= f32::EPSILON {
        return None;
    }
    let n = Vec2::new(d.y, -d.x) * (0.5 * thickness / len);
    Some([a - n, a + n, b - n, b + n])
}

fn faded(color: Color32, alpha: f32) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha as u8)
}

/// Paint `history` with `style`, translating surface coordinates by `origin`.
pub fn paint_trace(painter: &Painter, origin: Vec2, history: &PointHistory, style: &TraceStyle) {
    if style.glow_radius > 0.0 {
        paint_pass(
            painter,
            origin,
            history,
            style.mode,
            style.thickness + 2.0 * style.glow_radius,
            style.color,
            GLOW_ALPHA,
        );
    }
    paint_pass(
        painter,
        origin,
        history,
        style.mode,
        style.thickness,
        style.color,
        1.0,
    );
}

fn paint_pass(
    painter: &Painter,
    origin: Vec2,
    history: &PointHistory,
    mode: VisualizationMode,
    thickness: f32,
    color: Color32,
    alpha_scale: f32,
) {
    let count = history.len();
    let color_at = |i: usize| faded(color, point_alpha(i, count) as f32 * alpha_scale);

    match mode {
        VisualizationMode::Points => {
            let radius = 0.5 * thickness;
            let shapes: Vec<Shape> = history
                .iter()
                .enumerate()
                .map(|(i, p)| Shape::circle_filled(*p + origin, radius, color_at(i)))
                .collect();
            painter.extend(shapes);
        }
        VisualizationMode::Lines => {
            let mut mesh = Mesh::default();
            let mut iter = history.iter().enumerate().peekable();
            while let Some((i, a)) = iter.next() {
                let Some(&(_, b)) = iter.peek() else {
                    break;
                };
                let Some(quad) = segment_quad(*a + origin, *b + origin, thickness) else {
                    continue;
                };
                let (ca, cb) = (color_at(i), color_at(i + 1));
                let base = mesh.vertices.len() as u32;
                mesh.colored_vertex(quad[0], ca);
                mesh.colored_vertex(quad[1], ca);
                mesh.colored_vertex(quad[2], cb);
                mesh.colored_vertex(quad[3], cb);
                // Triangle strip a-, a+, b-, b+
                mesh.add_triangle(base, base + 1, base + 2);
                mesh.add_triangle(base + 1, base + 2, base + 3);
            }
            if !mesh.is_empty() {
                painter.add(Shape::mesh(mesh));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_falls_off_quadratically() {
        assert_eq!(point_alpha(0, 4), 255);
        assert_eq!(point_alpha(2, 4), 63);
        assert_eq!(point_alpha(3, 4), 15);
        assert_eq!(point_alpha(0, 0), 0);
    }

    #[test]
    fn degenerate_segment_is_skipped() {
        let p = Pos2::new(3.0, 4.0);
        assert!(segment_quad(p, p, 2.0).is_none());
    }

    #[test]
    fn quad_is_perpendicular_and_thick() {
        let q = segment_quad(Pos2::new(0.0, 0.0), Pos2::new(10.0, 0.0), 4.0).unwrap();
        assert_eq!(q[0], Pos2::new(0.0, 2.0));
        assert_eq!(q[1], Pos2::new(0.0, -2.0));
        assert_eq!(q[2], Pos2::new(10.0, 2.0));
        assert_eq!(q[3], Pos2::new(10.0, -2.0));
    }
}
