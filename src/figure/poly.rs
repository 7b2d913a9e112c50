use egui::{Color32, Painter, Pos2, Shape, Vec2};

use super::common::{self, Style};
use super::handles::HandleId;
use super::{Drawable, FigureKind};
use crate::geometry::{self, hit_testing::CURVE_SAMPLES_PER_SPAN};

/// Fewest vertices a curve needs before it can be rendered or committed.
pub const MIN_CURVE_POINTS: usize = 3;
pub const MIN_LINE_POINTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolyShape {
    StraightLine,
    CurveLine,
}

/// Straight line or spline curve through an ordered list of vertices
#[derive(Debug, Clone, PartialEq)]
pub struct PolyFigure {
    shape: PolyShape,
    points: Vec<Pos2>,
    top: Pos2,
    bot: Pos2,
    style: Style,
}

impl PolyFigure {
    pub fn new(shape: PolyShape, points: Vec<Pos2>, style: Style) -> Self {
        let anchor = points.first().copied().unwrap_or(Pos2::ZERO);
        let mut figure = Self {
            shape,
            points,
            top: anchor,
            bot: anchor,
            style,
        };
        figure.validate_edges();
        figure
    }

    pub fn shape(&self) -> PolyShape {
        self.shape
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn last_point(&self) -> Option<Pos2> {
        self.points.last().copied()
    }

    /// Appends a vertex (curve accumulation).
    pub fn push_point(&mut self, point: Pos2) {
        self.points.push(point);
        self.validate_edges();
    }

    /// Moves the final vertex (straight line endpoint while drawing).
    pub fn set_end_point(&mut self, point: Pos2) {
        if let Some(last) = self.points.last_mut() {
            *last = point;
        } else {
            self.points.push(point);
        }
        self.validate_edges();
    }

    /// Path that gets stroked: the vertices themselves, or the flattened spline.
    fn path(&self) -> Vec<Pos2> {
        match self.shape {
            PolyShape::StraightLine => self.points.clone(),
            PolyShape::CurveLine if self.points.len() >= MIN_CURVE_POINTS => {
                geometry::catmull_rom(&self.points, CURVE_SAMPLES_PER_SPAN)
            }
            PolyShape::CurveLine => Vec::new(),
        }
    }
}

impl Drawable for PolyFigure {
    fn kind(&self) -> FigureKind {
        match self.shape {
            PolyShape::StraightLine => FigureKind::StraightLine,
            PolyShape::CurveLine => FigureKind::CurveLine,
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
        self.points.clone()
    }

    fn draw(&self, painter: &Painter, origin: Vec2) {
        let path = self.path();
        if path.len() < MIN_LINE_POINTS {
            return;
        }
        painter.add(Shape::line(common::shifted(&path, origin), self.style.stroke()));
    }

    fn draw_dashed(&self, painter: &Painter, origin: Vec2) {
        // A curve still being sampled previews as its raw polyline.
        let path = match self.path() {
            path if path.len() >= MIN_LINE_POINTS => path,
            _ => self.points.clone(),
        };
        common::dashed(
            painter,
            &common::shifted(&path, origin),
            self.style.stroke_with(Color32::BLACK),
        );
    }

    fn draw_selected(&self, painter: &Painter, origin: Vec2) {
        common::dashed(
            painter,
            &common::shifted(&self.path(), origin),
            self.style.stroke_with(common::SELECTION_COLOR),
        );
        common::draw_selection_frame(painter, self.bounds(), self.points.iter().copied(), origin);
    }

    /// Vertex distance only; long spans between sparse vertices are not hit.
    fn contains_point(&self, point: Pos2, tolerance: f32) -> bool {
        self.points.iter().any(|p| p.distance(point) <= tolerance)
    }

    fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point += delta;
        }
        self.top += delta;
        self.bot += delta;
    }

    fn validate_edges(&mut self) {
        if let Some((top, bot)) = geometry::bounds_of(&self.points) {
            self.top = top;
            self.bot = bot;
        }
    }

    fn resize_handles(&self) -> Vec<(HandleId, Pos2)> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (HandleId::Vertex(i), *p))
            .collect()
    }

    fn drag_handle(&mut self, handle: HandleId, pos: Pos2) -> HandleId {
        if let HandleId::Vertex(index) = handle {
            if let Some(point) = self.points.get_mut(index) {
                *point = pos;
                self.validate_edges();
            }
        }
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn curve() -> PolyFigure {
        PolyFigure::new(
            PolyShape::CurveLine,
            vec![pos2(10.0, 40.0), pos2(30.0, 10.0), pos2(60.0, 35.0)],
            Style::default(),
        )
    }

    #[test]
    fn bounds_follow_the_vertices() {
        let mut figure = curve();
        assert_eq!(figure.top_point(), pos2(10.0, 10.0));
        assert_eq!(figure.bot_point(), pos2(60.0, 40.0));

        figure.drag_handle(HandleId::Vertex(1), pos2(30.0, 50.0));
        assert_eq!(figure.top_point(), pos2(10.0, 35.0));
        assert_eq!(figure.bot_point(), pos2(60.0, 50.0));
    }

    #[test]
    fn hit_test_uses_vertex_distance() {
        let figure = PolyFigure::new(
            PolyShape::StraightLine,
            vec![pos2(0.0, 0.0), pos2(100.0, 0.0)],
            Style::default(),
        );
        assert!(figure.contains_point(pos2(6.0, 8.0), 10.0));
        // On the segment but far from either vertex.
        assert!(!figure.contains_point(pos2(50.0, 0.0), 10.0));
    }

    #[test]
    fn one_handle_per_vertex() {
        let figure = curve();
        let handles = figure.resize_handles();
        assert_eq!(handles.len(), 3);
        assert_eq!(handles[2], (HandleId::Vertex(2), pos2(60.0, 35.0)));
    }

    #[test]
    fn out_of_range_vertex_handle_is_ignored() {
        let mut figure = curve();
        let before = figure.clone();
        figure.drag_handle(HandleId::Vertex(7), pos2(0.0, 0.0));
        assert_eq!(figure, before);
    }
}
