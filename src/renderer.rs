use eframe::egui::{self, Color32, Painter, Rect, Stroke};

use crate::figure::Drawable;
use crate::state::Canvas;

/// Paints a canvas: background, committed figures in z-order, then the
/// dashed preview of any gesture in progress.
#[derive(Debug, Clone)]
pub struct Renderer {
    background: Color32,
    border: Stroke,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            background: Color32::WHITE,
            border: Stroke::new(1.0, Color32::GRAY),
        }
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Screen rectangle the canvas occupies when its origin is at `origin`.
    pub fn canvas_rect(canvas: &Canvas, origin: egui::Pos2) -> Rect {
        Rect::from_min_size(origin, canvas.size())
    }

    /// Renders `canvas` with its top-left corner at `rect.min`
    pub fn render(&self, painter: &Painter, rect: Rect, canvas: &Canvas) {
        let canvas_rect = Self::canvas_rect(canvas, rect.min);
        let painter = painter.with_clip_rect(canvas_rect.intersect(painter.clip_rect()));
        let origin = rect.min.to_vec2();

        painter.rect_filled(canvas_rect, 0.0, self.background);

        canvas.for_each_figure_in_order(|id, figure| {
            if canvas.figures().is_selected(id) {
                figure.draw_selected(&painter, origin);
            } else {
                figure.draw(&painter, origin);
            }
        });

        if let Some(preview) = canvas.preview_figure() {
            preview.draw_dashed(&painter, origin);
        }

        painter.rect_stroke(canvas_rect, 0.0, self.border);
    }
}
