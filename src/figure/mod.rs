use egui::{Painter, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

pub(crate) mod common;
pub mod box_figure;
pub mod handles;
pub mod poly;
pub mod text;

pub use box_figure::{BoxFigure, BoxShape};
pub use common::{FontSpec, HANDLE_GRAB_RADIUS, HANDLE_RADIUS, Style, argb_hex};
pub use handles::{BoxHandle, HandleId};
pub use poly::{MIN_CURVE_POINTS, MIN_LINE_POINTS, PolyFigure, PolyShape};
pub use text::TextFigure;

/// The figure kinds a user can draw
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FigureKind {
    #[default]
    Rectangle,
    Ellipse,
    StraightLine,
    CurveLine,
    TextBox,
}

impl FigureKind {
    pub const ALL: [FigureKind; 5] = [
        FigureKind::Rectangle,
        FigureKind::Ellipse,
        FigureKind::StraightLine,
        FigureKind::CurveLine,
        FigureKind::TextBox,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FigureKind::Rectangle => "Rectangle",
            FigureKind::Ellipse => "Ellipse",
            FigureKind::StraightLine => "Line",
            FigureKind::CurveLine => "Curve",
            FigureKind::TextBox => "Text",
        }
    }
}

/// Common trait that all figures must implement
pub trait Drawable {
    fn kind(&self) -> FigureKind;

    fn style(&self) -> &Style;

    fn style_mut(&mut self) -> &mut Style;

    /// Component-wise minimum of the owned points.
    fn top_point(&self) -> Pos2;

    /// Component-wise maximum of the owned points.
    fn bot_point(&self) -> Pos2;

    fn bounds(&self) -> Rect {
        Rect::from_min_max(self.top_point(), self.bot_point())
    }

    /// Every point that defines the geometry (corners or vertices).
    fn owned_points(&self) -> Vec<Pos2>;

    /// Draw the committed figure, shifted by `origin` into screen space
    fn draw(&self, painter: &Painter, origin: Vec2);

    /// Draw the figure as an in-progress preview
    fn draw_dashed(&self, painter: &Painter, origin: Vec2);

    /// Draw the figure with its selection outline and resize handles
    fn draw_selected(&self, painter: &Painter, origin: Vec2);

    fn contains_point(&self, point: Pos2, tolerance: f32) -> bool;

    /// Whether translating by `delta` keeps every owned point inside
    /// `[0, width) x [0, height)`.
    fn can_move(&self, delta: Vec2, canvas_size: Vec2) -> bool {
        common::points_fit(&self.owned_points(), delta, canvas_size)
    }

    /// Translates the geometry. Bounds are not checked here; see [`Drawable::can_move`].
    fn translate(&mut self, delta: Vec2);

    /// Re-derives `top_point`/`bot_point` from the owned points.
    fn validate_edges(&mut self);

    fn resize_handles(&self) -> Vec<(HandleId, Pos2)>;

    /// Moves the point behind `handle` to `pos` and returns the handle that
    /// now sits under the pointer.
    fn drag_handle(&mut self, handle: HandleId, pos: Pos2) -> HandleId;

    fn handle_at(&self, pos: Pos2, radius: f32) -> Option<HandleId> {
        self.resize_handles()
            .into_iter()
            .find(|(_, p)| p.distance(pos) <= radius)
            .map(|(handle, _)| handle)
    }
}

/// Enumeration of all figure variants in a document
#[derive(Debug, Clone, PartialEq)]
pub enum Figure {
    Box(BoxFigure),
    Poly(PolyFigure),
    Text(TextFigure),
}

impl Drawable for Figure {
    fn kind(&self) -> FigureKind {
        match self {
            Figure::Box(f) => f.kind(),
            Figure::Poly(f) => f.kind(),
            Figure::Text(f) => f.kind(),
        }
    }

    fn style(&self) -> &Style {
        match self {
            Figure::Box(f) => f.style(),
            Figure::Poly(f) => f.style(),
            Figure::Text(f) => f.style(),
        }
    }

    fn style_mut(&mut self) -> &mut Style {
        match self {
            Figure::Box(f) => f.style_mut(),
            Figure::Poly(f) => f.style_mut(),
            Figure::Text(f) => f.style_mut(),
        }
    }

    fn top_point(&self) -> Pos2 {
        match self {
            Figure::Box(f) => f.top_point(),
            Figure::Poly(f) => f.top_point(),
            Figure::Text(f) => f.top_point(),
        }
    }

    fn bot_point(&self) -> Pos2 {
        match self {
            Figure::Box(f) => f.bot_point(),
            Figure::Poly(f) => f.bot_point(),
            Figure::Text(f) => f.bot_point(),
        }
    }

    fn owned_points(&self) -> Vec<Pos2> {
        match self {
            Figure::Box(f) => f.owned_points(),
            Figure::Poly(f) => f.owned_points(),
            Figure::Text(f) => f.owned_points(),
        }
    }

    fn draw(&self, painter: &Painter, origin: Vec2) {
        match self {
            Figure::Box(f) => f.draw(painter, origin),
            Figure::Poly(f) => f.draw(painter, origin),
            Figure::Text(f) => f.draw(painter, origin),
        }
    }

    fn draw_dashed(&self, painter: &Painter, origin: Vec2) {
        match self {
            Figure::Box(f) => f.draw_dashed(painter, origin),
            Figure::Poly(f) => f.draw_dashed(painter, origin),
            Figure::Text(f) => f.draw_dashed(painter, origin),
        }
    }

    fn draw_selected(&self, painter: &Painter, origin: Vec2) {
        match self {
            Figure::Box(f) => f.draw_selected(painter, origin),
            Figure::Poly(f) => f.draw_selected(painter, origin),
            Figure::Text(f) => f.draw_selected(painter, origin),
        }
    }

    fn contains_point(&self, point: Pos2, tolerance: f32) -> bool {
        match self {
            Figure::Box(f) => f.contains_point(point, tolerance),
            Figure::Poly(f) => f.contains_point(point, tolerance),
            Figure::Text(f) => f.contains_point(point, tolerance),
        }
    }

    fn translate(&mut self, delta: Vec2) {
        match self {
            Figure::Box(f) => f.translate(delta),
            Figure::Poly(f) => f.translate(delta),
            Figure::Text(f) => f.translate(delta),
        }
    }

    fn validate_edges(&mut self) {
        match self {
            Figure::Box(f) => f.validate_edges(),
            Figure::Poly(f) => f.validate_edges(),
            Figure::Text(f) => f.validate_edges(),
        }
    }

    fn resize_handles(&self) -> Vec<(HandleId, Pos2)> {
        match self {
            Figure::Box(f) => f.resize_handles(),
            Figure::Poly(f) => f.resize_handles(),
            Figure::Text(f) => f.resize_handles(),
        }
    }

    fn drag_handle(&mut self, handle: HandleId, pos: Pos2) -> HandleId {
        match self {
            Figure::Box(f) => f.drag_handle(handle, pos),
            Figure::Poly(f) => f.drag_handle(handle, pos),
            Figure::Text(f) => f.drag_handle(handle, pos),
        }
    }
}

/// The user-editable fields of a figure, as handed to a property editor
#[derive(Debug, Clone, PartialEq)]
pub struct FigureProperties {
    pub style: Style,
    /// Only present for text figures.
    pub text: Option<String>,
    pub font: Option<FontSpec>,
}

impl Figure {
    pub fn properties(&self) -> FigureProperties {
        let (text, font) = match self {
            Figure::Text(t) => (Some(t.text().to_owned()), Some(t.font().clone())),
            _ => (None, None),
        };
        FigureProperties {
            style: *self.style(),
            text,
            font,
        }
    }

    /// Writes `props` back onto the figure. Text and font are ignored for
    /// non-text figures; a stroke width of 0 is raised to 1.
    pub fn apply_properties(&mut self, props: FigureProperties) {
        let style = self.style_mut();
        *style = props.style;
        style.stroke_width = style.stroke_width.max(1);

        if let Figure::Text(t) = self {
            if let Some(text) = props.text {
                t.set_text(text);
            }
            if let Some(font) = props.font {
                t.set_font(font);
            }
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextFigure> {
        match self {
            Figure::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Factory functions for creating figures
pub mod factory {
    use super::*;

    pub fn create_rectangle(a: Pos2, b: Pos2, style: Style) -> Figure {
        Figure::Box(BoxFigure::new(BoxShape::Rectangle, a, b, style))
    }

    pub fn create_ellipse(a: Pos2, b: Pos2, style: Style) -> Figure {
        Figure::Box(BoxFigure::new(BoxShape::Ellipse, a, b, style))
    }

    pub fn create_line(start: Pos2, end: Pos2, style: Style) -> Figure {
        Figure::Poly(PolyFigure::new(PolyShape::StraightLine, vec![start, end], style))
    }

    pub fn create_curve(points: Vec<Pos2>, style: Style) -> Figure {
        Figure::Poly(PolyFigure::new(PolyShape::CurveLine, points, style))
    }

    pub fn create_text(
        a: Pos2,
        b: Pos2,
        text: impl Into<String>,
        font: FontSpec,
        style: Style,
    ) -> Figure {
        Figure::Text(TextFigure::new(a, b, text, font, style))
    }
}
