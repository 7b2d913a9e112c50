use egui::{Pos2, Rect, Vec2};

/// Number of segments used to approximate an ellipse outline.
pub const ELLIPSE_SEGMENTS: usize = 64;

/// Samples per span when flattening a curve for drawing.
pub const CURVE_SAMPLES_PER_SPAN: usize = 12;

/// Calculate distance from a point to a line segment
pub fn distance_to_line_segment(point: Pos2, line_start: Pos2, line_end: Pos2) -> f32 {
    let line_vec = line_end - line_start;
    let point_vec = point - line_start;

    let line_len = line_vec.length();
    if line_len == 0.0 {
        return point_vec.length();
    }

    let t = (point_vec.dot(line_vec) / line_len).clamp(0.0, line_len);
    let projection = line_start + (line_vec * t / line_len);
    (point - projection).length()
}

/// Smallest distance from `point` to the closed polygon through `path`.
pub fn distance_to_closed_path(point: Pos2, path: &[Pos2]) -> f32 {
    match path {
        [] => f32::INFINITY,
        [only] => point.distance(*only),
        _ => path
            .iter()
            .zip(path.iter().cycle().skip(1))
            .map(|(a, b)| distance_to_line_segment(point, *a, *b))
            .fold(f32::INFINITY, f32::min),
    }
}

/// The four corners of `rect` in drawing order, starting at the top left.
pub fn rect_outline(rect: Rect) -> [Pos2; 4] {
    [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
    ]
}

/// True if `point` lies inside (or on) the ellipse inscribed in `rect`.
pub fn ellipse_contains(rect: Rect, point: Pos2) -> bool {
    let radius = rect.size() / 2.0;
    if radius.x <= 0.0 || radius.y <= 0.0 {
        // Degenerate ellipse collapses onto its bounding segment.
        return distance_to_line_segment(point, rect.min, rect.max) == 0.0;
    }

    let offset = point - rect.center();
    let nx = offset.x / radius.x;
    let ny = offset.y / radius.y;
    nx * nx + ny * ny <= 1.0
}

/// Closed polyline approximating the ellipse inscribed in `rect`.
pub fn ellipse_outline(rect: Rect, segments: usize) -> Vec<Pos2> {
    let center = rect.center();
    let radius = rect.size() / 2.0;
    let segments = segments.max(3);

    (0..segments)
        .map(|i| {
            let angle = std::f32::consts::TAU * i as f32 / segments as f32;
            center + Vec2::new(radius.x * angle.cos(), radius.y * angle.sin())
        })
        .collect()
}

/// Flattens a Catmull-Rom spline through `points` into a polyline.
///
/// The result passes through every input point. End spans reuse the end
/// points as their outer control points.
pub fn catmull_rom(points: &[Pos2], samples_per_span: usize) -> Vec<Pos2> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let samples = samples_per_span.max(1);
    let last = points.len() - 1;
    let mut path = Vec::with_capacity(last * samples + 1);

    for i in 0..last {
        let p0 = points[i.saturating_sub(1)].to_vec2();
        let p1 = points[i].to_vec2();
        let p2 = points[i + 1].to_vec2();
        let p3 = points[(i + 2).min(last)].to_vec2();

        for step in 0..samples {
            let t = step as f32 / samples as f32;
            let t2 = t * t;
            let t3 = t2 * t;
            let v = (p1 * 2.0
                + (p2 - p0) * t
                + (p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3) * t2
                + (p1 * 3.0 - p0 - p2 * 3.0 + p3) * t3)
                * 0.5;
            path.push(v.to_pos2());
        }
    }

    path.push(points[last]);
    path
}

/// Component-wise minimum and maximum over `points`.
pub fn bounds_of(points: &[Pos2]) -> Option<(Pos2, Pos2)> {
    let first = *points.first()?;
    let bounds = points.iter().skip(1).fold((first, first), |(min, max), p| {
        (min.min(*p), max.max(*p))
    });
    Some(bounds)
}

/// True if `point` lies in `[0, width) x [0, height)`.
pub fn inside_canvas(point: Pos2, canvas_size: Vec2) -> bool {
    point.x >= 0.0 && point.y >= 0.0 && point.x < canvas_size.x && point.y < canvas_size.y
}
