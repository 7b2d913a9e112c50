use egui::{Color32, Painter, Pos2, Rect, Shape, Stroke, Vec2};

use super::common::{self, Style};
use super::handles::{self, HandleId};
use super::{Drawable, FigureKind};
use crate::geometry::{self, hit_testing::ELLIPSE_SEGMENTS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxShape {
    Rectangle,
    Ellipse,
}

/// Rectangle or ellipse spanned by two opposite corners
#[derive(Debug, Clone, PartialEq)]
pub struct BoxFigure {
    shape: BoxShape,
    top: Pos2,
    bot: Pos2,
    style: Style,
}

impl BoxFigure {
    pub fn new(shape: BoxShape, a: Pos2, b: Pos2, style: Style) -> Self {
        let mut figure = Self {
            shape,
            top: a,
            bot: b,
            style,
        };
        figure.validate_edges();
        figure
    }

    pub fn shape(&self) -> BoxShape {
        self.shape
    }

    /// Re-spans the box between two arbitrary corners (used while drawing).
    pub fn set_corners(&mut self, a: Pos2, b: Pos2) {
        self.top = a;
        self.bot = b;
        self.validate_edges();
    }

    /// Boundary of the figure as a closed polyline.
    fn outline(&self) -> Vec<Pos2> {
        let rect = self.bounds();
        match self.shape {
            BoxShape::Rectangle => geometry::rect_outline(rect).to_vec(),
            BoxShape::Ellipse => geometry::ellipse_outline(rect, ELLIPSE_SEGMENTS),
        }
    }

    fn paint_fill(&self, painter: &Painter, outline: &[Pos2]) {
        if let Some(fill) = self.style.fill() {
            painter.add(Shape::convex_polygon(outline.to_vec(), fill, Stroke::NONE));
        }
    }
}

impl Drawable for BoxFigure {
    fn kind(&self) -> FigureKind {
        match self.shape {
            BoxShape::Rectangle => FigureKind::Rectangle,
            BoxShape::Ellipse => FigureKind::Ellipse,
        }
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
        match self.shape {
            BoxShape::Rectangle => {
                let rect = self.bounds().translate(origin);
                if let Some(fill) = self.style.fill() {
                    painter.rect_filled(rect, 0.0, fill);
                }
                painter.rect_stroke(rect, 0.0, self.style.stroke());
            }
            BoxShape::Ellipse => {
                let outline = common::shifted(&self.outline(), origin);
                self.paint_fill(painter, &outline);
                painter.add(Shape::closed_line(outline, self.style.stroke()));
            }
        }
    }

    fn draw_dashed(&self, painter: &Painter, origin: Vec2) {
        let outline = common::shifted(&self.outline(), origin);
        common::dashed_closed(painter, &outline, self.style.stroke_with(Color32::BLACK));
    }

    fn draw_selected(&self, painter: &Painter, origin: Vec2) {
        let outline = common::shifted(&self.outline(), origin);
        self.paint_fill(painter, &outline);
        common::dashed_closed(painter, &outline, self.style.stroke_with(common::SELECTION_COLOR));
        common::draw_selection_frame(
            painter,
            self.bounds(),
            self.resize_handles().into_iter().map(|(_, p)| p),
            origin,
        );
    }

    fn contains_point(&self, point: Pos2, tolerance: f32) -> bool {
        let rect = self.bounds();
        match (self.shape, self.style.is_filling) {
            (BoxShape::Rectangle, true) => rect.contains(point),
            (BoxShape::Ellipse, true) => geometry::ellipse_contains(rect, point),
            (_, false) => geometry::distance_to_closed_path(point, &self.outline()) <= tolerance,
        }
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
        handles::box_handles(Rect::from_min_max(self.top, self.bot))
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
