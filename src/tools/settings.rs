use egui::{Color32, Vec2};
use serde::{Deserialize, Serialize};

use crate::figure::{FigureKind, FontSpec, Style};

/// Pen, brush and font defaults handed to every new tool instance.
///
/// Owned by the application shell and persisted across sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    pub figure_kind: FigureKind,
    pub stroke_width: u32,
    pub stroke_color: Color32,
    pub fill_color: Color32,
    pub fill_enabled: bool,
    pub font: FontSpec,
    /// Max distance in pixels for a click to hit an outline or vertex.
    pub hit_tolerance: f32,
    /// A curve vertex is only recorded once the pointer moved this far.
    pub curve_min_distance: f32,
    pub text_box_size: Vec2,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            figure_kind: FigureKind::Rectangle,
            stroke_width: 2,
            stroke_color: Color32::BLACK,
            fill_color: Color32::WHITE,
            fill_enabled: false,
            font: FontSpec::default(),
            hit_tolerance: 10.0,
            curve_min_distance: 4.0,
            text_box_size: Vec2::new(150.0, 30.0),
        }
    }
}

impl ToolSettings {
    /// Style applied to newly drawn figures.
    pub fn style(&self) -> Style {
        Style {
            stroke_width: self.stroke_width.max(1),
            stroke_color: self.stroke_color,
            fill_color: self.fill_color,
            is_filling: self.fill_enabled,
        }
    }

    pub fn set_stroke_width(&mut self, width: u32) {
        self.stroke_width = width.max(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_stroke_width_is_clamped() {
        let mut settings = ToolSettings::default();
        settings.set_stroke_width(0);
        assert_eq!(settings.stroke_width, 1);
        assert_eq!(settings.style().stroke_width, 1);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: ToolSettings = serde_json::from_str(r#"{"stroke_width": 5}"#).unwrap();
        assert_eq!(settings.stroke_width, 5);
        assert_eq!(settings.font, FontSpec::default());
        assert_eq!(settings.hit_tolerance, 10.0);
    }
}
