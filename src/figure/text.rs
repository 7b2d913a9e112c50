use egui::{Align2, Color32, Painter, Pos2, Rect, Vec2};

use super::common::{self, FontSpec, Style};
use super::handles::{self, HandleId};
use super::{Drawable, FigureKind};
use crate::geometry;

const TEXT_PADDING: Vec2 = Vec2::splat(2.0);

/// A text payload laid out inside a bounding box
#[derive(Debug, Clone, PartialEq)]
pub struct TextFigure {
    top: Pos2,
    bot: Pos2,
    text: String,
    font: FontSpec,
    style: Style,
}

impl TextFigure {
    pub fn new(a: Pos2, b: Pos2, text: impl Into<String>, font: FontSpec, style: Style) -> Self {
        let (top, bot) = common::normalize_corners(a, b);
        Self {
            top,
            bot,
            text: text.into(),
            font,
            style,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn font(&self) -> &FontSpec {
        &self.font
    }

    pub fn set_font(&mut self, font: FontSpec) {
        self.font = font;
    }

    fn paint_text(&self, painter: &Painter, rect: Rect) {
        if let Some(fill) = self.style.fill() {
            painter.rect_filled(rect, 0.0, fill);
        }
        if !self.text.is_empty() {
            painter.with_clip_rect(rect).text(
                rect.min + TEXT_PADDING,
                Align2::LEFT_TOP,
                &self.text,
                self.font.font_id(),
                self.style.stroke_color,
            );
        }
    }

    fn frame(&self, origin: Vec2) -> Vec<Pos2> {
        common::shifted(&geometry::rect_outline(self.bounds()), origin)
    }
}

impl Drawable for TextFigure {
    fn kind(&self) -> FigureKind {
        FigureKind::TextBox
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    fn top_point(&self) -> Pos2 {
        self.top
    }

    fn bot_point(&self) -> Pos2 {
        self.bot
    }

    fn owned_points(&self) -> Vec<Pos2> {
        vec![self.top, self.bot]
    }

    fn draw(&self, painter: &Painter, origin: Vec2) {
        self.paint_text(painter, self.bounds().translate(origin));
    }

    fn draw_dashed(&self, painter: &Painter, origin: Vec2) {
        self.paint_text(painter, self.bounds().translate(origin));
        common::dashed_closed(painter, &self.frame(origin), self.style.stroke_with(Color32::BLACK));
    }

    fn draw_selected(&self, painter: &Painter, origin: Vec2) {
        self.paint_text(painter, self.bounds().translate(origin));
        common::draw_selection_frame(
            painter,
            self.bounds(),
            self.resize_handles().into_iter().map(|(_, p)| p),
            origin,
        );
    }

    /// Text boxes are hit anywhere inside their frame.
    fn contains_point(&self, point: Pos2, _tolerance: f32) -> bool {
        self.bounds().contains(point)
    }

    fn translate(&mut self, delta: Vec2) {
        self.top += delta;
        self.bot += delta;
    }

    fn validate_edges(&mut self) {
        let (top, bot) = common::normalize_corners(self.top, self.bot);
        self.top = top;
        self.bot = bot;
    }

    fn resize_handles(&self) -> Vec<(HandleId, Pos2)> {
        handles::box_handles(self.bounds())
    }

    fn drag_handle(&mut self, handle: HandleId, pos: Pos2) -> HandleId {
        match handle {
            HandleId::Box(handle) => {
                HandleId::Box(handles::drag_box_edges(&mut self.top, &mut self.bot, handle, pos))
            }
            HandleId::Vertex(_) => handle,
        }
    }
}
