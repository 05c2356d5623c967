//! Drawing utilities for the flow view.

use egui::{Color32, Pos2, Rect, Stroke};

use crate::transform::ViewTransform;

const BEZIER_SEGMENTS: usize = 24;

/// Grid lines covering `visible` (scene coordinates) at multiples of `step`.
///
/// Index bounds are `floor(min / step - 0.5)` and `floor(max / step + 1)`, so
/// lines run slightly past every edge of the visible area.
pub fn grid_lines(visible: Rect, step: f32) -> Vec<[Pos2; 2]> {
    if step <= 0.0 || !visible.is_finite() {
        return Vec::new();
    }
    let left = (visible.min.x / step - 0.5).floor() as i64;
    let right = (visible.max.x / step + 1.0).floor() as i64;
    let top = (visible.min.y / step - 0.5).floor() as i64;
    let bottom = (visible.max.y / step + 1.0).floor() as i64;

    let (x0, x1) = (left as f32 * step, right as f32 * step);
    let (y0, y1) = (top as f32 * step, bottom as f32 * step);

    let mut lines = Vec::new();
    for xi in left..=right {
        let x = xi as f32 * step;
        lines.push([Pos2::new(x, y0), Pos2::new(x, y1)]);
    }
    for yi in top..=bottom {
        let y = yi as f32 * step;
        lines.push([Pos2::new(x0, y), Pos2::new(x1, y)]);
    }
    lines
}

/// Whether a grid level is drawn at this zoom.
pub fn grid_level_visible(step: f32, scale: f32, min_spacing_px: f32) -> bool {
    // Too dense to read when zoomed far out; the coarser level still draws.
    step * scale >= min_spacing_px
}

/// Draw one grid level over the canvas.
pub fn draw_grid(
    painter: &egui::Painter,
    canvas_rect: Rect,
    transform: &ViewTransform,
    step: f32,
    stroke: Stroke,
    min_spacing_px: f32,
) {
    if !grid_level_visible(step, transform.scale, min_spacing_px) {
        return;
    }
    let visible = transform.visible_scene_rect(canvas_rect);
    for [a, b] in grid_lines(visible, step) {
        painter.line_segment(
            [
                transform.map_from_scene(canvas_rect.min, a),
                transform.map_from_scene(canvas_rect.min, b),
            ],
            stroke,
        );
    }
}

/// Sample the horizontal-tangent cubic between two port positions.
pub fn bezier_points(from: Pos2, to: Pos2) -> Vec<Pos2> {
    let dx = ((to.x - from.x).abs() * 0.5).max(20.0);
    let cp1 = Pos2::new(from.x + dx, from.y);
    let cp2 = Pos2::new(to.x - dx, to.y);

    (0..=BEZIER_SEGMENTS)
        .map(|i| {
            let t = i as f32 / BEZIER_SEGMENTS as f32;
            let mt = 1.0 - t;
            let a = mt * mt * mt;
            let b = 3.0 * mt * mt * t;
            let c = 3.0 * mt * t * t;
            let d = t * t * t;
            Pos2::new(
                a * from.x + b * cp1.x + c * cp2.x + d * to.x,
                a * from.y + b * cp1.y + c * cp2.y + d * to.y,
            )
        })
        .collect()
}

/// Draw a cubic bezier connection between two points.
pub fn draw_bezier_connection(
    painter: &egui::Painter,
    from: Pos2,
    to: Pos2,
    color: Color32,
    width: f32,
) {
    painter.add(egui::Shape::line(
        bezier_points(from, to),
        Stroke::new(width, color),
    ));
}

/// Shortest distance from `pos` to the sampled curve.
pub fn distance_to_bezier(pos: Pos2, from: Pos2, to: Pos2) -> f32 {
    bezier_points(from, to)
        .windows(2)
        .map(|w| distance_to_segment(pos, w[0], w[1]))
        .fold(f32::INFINITY, f32::min)
}

/// True if any sample of the curve lies inside `rect`.
pub fn bezier_intersects_rect(rect: Rect, from: Pos2, to: Pos2) -> bool {
    bezier_points(from, to).into_iter().any(|p| rect.contains(p))
}

fn distance_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}
