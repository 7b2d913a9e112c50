use egui::{Color32, Pos2, Rect, Stroke, Vec2};
use serde::{Deserialize, Serialize};

use crate::geometry;

// Common constants for all figure types
pub const HANDLE_RADIUS: f32 = 5.0;
pub const HANDLE_GRAB_RADIUS: f32 = 8.0;
pub const DASH_LENGTH: f32 = 6.0;
pub const GAP_LENGTH: f32 = 4.0;
pub const SELECTION_COLOR: Color32 = Color32::BLUE;
pub const FRAME_COLOR: Color32 = Color32::BLACK;

/// Pen and brush shared by every figure variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub stroke_width: u32,
    pub stroke_color: Color32,
    pub fill_color: Color32,
    pub is_filling: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke_width: 2,
            stroke_color: Color32::BLACK,
            fill_color: Color32::WHITE,
            is_filling: false,
        }
    }
}

impl Style {
    pub fn stroke(&self) -> Stroke {
        Stroke::new(self.stroke_width as f32, self.stroke_color)
    }

    /// Same width, recolored. Used for previews and selection outlines.
    pub fn stroke_with(&self, color: Color32) -> Stroke {
        Stroke::new(self.stroke_width as f32, color)
    }

    pub fn fill(&self) -> Option<Color32> {
        self.is_filling.then_some(self.fill_color)
    }
}

/// Font family and point size of a text figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub size: f32,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "Times New Roman".to_owned(),
            size: 12.0,
        }
    }
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }

    /// Closest egui font. Only a monospace/proportional split is available.
    pub fn font_id(&self) -> egui::FontId {
        let family = self.family.to_lowercase();
        if family.contains("mono") || family.contains("courier") || family.contains("consol") {
            egui::FontId::monospace(self.size)
        } else {
            egui::FontId::proportional(self.size)
        }
    }
}

/// Formats a color as the ARGB hex string shown in the status line.
pub fn argb_hex(color: Color32) -> String {
    format!(
        "{:02X}{:02X}{:02X}{:02X}",
        color.a(),
        color.r(),
        color.g(),
        color.b()
    )
}

/// Returns `(min, max)` of two opposite corners.
pub(crate) fn normalize_corners(a: Pos2, b: Pos2) -> (Pos2, Pos2) {
    (a.min(b), a.max(b))
}

/// True if every point shifted by `delta` stays on the canvas.
pub(crate) fn points_fit(points: &[Pos2], delta: Vec2, canvas_size: Vec2) -> bool {
    points
        .iter()
        .all(|p| geometry::inside_canvas(*p + delta, canvas_size))
}

pub(crate) fn dashed(painter: &egui::Painter, path: &[Pos2], stroke: Stroke) {
    painter.extend(egui::Shape::dashed_line(path, stroke, DASH_LENGTH, GAP_LENGTH));
}

pub(crate) fn dashed_closed(painter: &egui::Painter, path: &[Pos2], stroke: Stroke) {
    let Some(first) = path.first() else {
        return;
    };
    let mut closed = path.to_vec();
    closed.push(*first);
    dashed(painter, &closed, stroke);
}

pub(crate) fn shifted(points: &[Pos2], origin: Vec2) -> Vec<Pos2> {
    points.iter().map(|p| *p + origin).collect()
}

/// Dashed bounding frame plus a handle dot at every point.
pub(crate) fn draw_selection_frame(
    painter: &egui::Painter,
    bounds: Rect,
    handles: impl IntoIterator<Item = Pos2>,
    origin: Vec2,
) {
    let frame = shifted(&geometry::rect_outline(bounds), origin);
    dashed_closed(painter, &frame, Stroke::new(1.0, FRAME_COLOR));

    for handle in handles {
        let center = handle + origin;
        painter.circle_filled(center, HANDLE_RADIUS, Color32::from_rgb(30, 120, 255));
        painter.circle_stroke(center, HANDLE_RADIUS, Stroke::new(1.0, Color32::WHITE));
    }
}
