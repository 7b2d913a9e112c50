use egui::{Color32, Modifiers, Pos2};
use log::{debug, info};

use super::{Tool, ToolContext, ToolEvent, ToolSettings};
use crate::figure::{Drawable, Figure, FigureKind, FontSpec, MIN_CURVE_POINTS, PolyShape, factory};

#[derive(Debug, Clone)]
pub enum DrawState {
    Idle,
    Drawing {
        /// Where the gesture started; the fixed corner of box figures.
        anchor: Pos2,
        figure: Figure,
    },
}

/// Places new figures of the configured kind
#[derive(Debug, Clone)]
pub struct DrawTool {
    state: DrawState,
    settings: ToolSettings,
}

impl DrawTool {
    pub fn new(settings: ToolSettings) -> Self {
        Self {
            state: DrawState::Idle,
            settings,
        }
    }

    pub fn state(&self) -> &DrawState {
        &self.state
    }

    pub fn set_figure_kind(&mut self, kind: FigureKind) {
        self.settings.figure_kind = kind;
    }

    pub fn set_stroke_color(&mut self, color: Color32) {
        self.settings.stroke_color = color;
    }

    pub fn set_stroke_width(&mut self, width: u32) {
        self.settings.set_stroke_width(width);
    }

    pub fn set_fill_color(&mut self, color: Color32) {
        self.settings.fill_color = color;
    }

    pub fn set_fill_enabled(&mut self, enabled: bool) {
        self.settings.fill_enabled = enabled;
    }

    pub fn set_text_font(&mut self, font: FontSpec) {
        self.settings.font = font;
    }

    pub fn apply_settings(&mut self, settings: ToolSettings) {
        self.settings = settings;
    }

    fn commit(&mut self, figure: Figure, ctx: &mut ToolContext<'_>) -> Option<ToolEvent> {
        let kind = figure.kind().label();
        let id = ctx.figures.push(figure);
        info!("Committed {} {}", kind, id);
        Some(ToolEvent::FigureAdded(id))
    }
}

impl Tool for DrawTool {
    fn name(&self) -> &'static str {
        "Draw"
    }

    fn activate(&mut self) {
        self.state = DrawState::Idle;
    }

    fn deactivate(&mut self) {
        self.state = DrawState::Idle;
    }

    fn on_pointer_down(
        &mut self,
        pos: Pos2,
        _modifiers: Modifiers,
        ctx: &mut ToolContext<'_>,
    ) -> Option<ToolEvent> {
        let style = self.settings.style();
        let figure = match self.settings.figure_kind {
            FigureKind::Rectangle => factory::create_rectangle(pos, pos, style),
            FigureKind::Ellipse => factory::create_ellipse(pos, pos, style),
            FigureKind::StraightLine => factory::create_line(pos, pos, style),
            FigureKind::CurveLine => factory::create_curve(vec![pos], style),
            FigureKind::TextBox => {
                // Text is placed in one click; the shell collects the payload.
                let figure = factory::create_text(
                    pos,
                    pos + self.settings.text_box_size,
                    String::new(),
                    self.settings.font.clone(),
                    style,
                );
                self.state = DrawState::Idle;
                let id = ctx.figures.push(figure);
                info!("Placed text box {}", id);
                return Some(ToolEvent::TextEntryRequested(id));
            }
        };

        self.state = DrawState::Drawing {
            anchor: pos,
            figure,
        };
        None
    }

    fn on_pointer_move(&mut self, pos: Pos2, _ctx: &mut ToolContext<'_>) -> Option<ToolEvent> {
        let min_distance = self.settings.curve_min_distance;
        let DrawState::Drawing { anchor, figure } = &mut self.state else {
            return None;
        };

        match figure {
            Figure::Box(b) => b.set_corners(*anchor, pos),
            Figure::Poly(p) if p.shape() == PolyShape::StraightLine => p.set_end_point(pos),
            Figure::Poly(p) => {
                let far_enough = p
                    .last_point()
                    .is_none_or(|last| last.distance(pos) > min_distance);
                if far_enough {
                    p.push_point(pos);
                }
            }
            Figure::Text(_) => {}
        }
        None
    }

    fn on_pointer_up(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<ToolEvent> {
        let DrawState::Drawing { anchor, mut figure } =
            std::mem::replace(&mut self.state, DrawState::Idle)
        else {
            return None;
        };

        match &mut figure {
            Figure::Box(b) => b.set_corners(anchor, pos),
            Figure::Poly(p) if p.shape() == PolyShape::StraightLine => p.set_end_point(pos),
            Figure::Poly(p) => {
                if p.points().len() < MIN_CURVE_POINTS {
                    debug!(
                        "Discarding curve with {} of {} required points",
                        p.points().len(),
                        MIN_CURVE_POINTS
                    );
                    return None;
                }
            }
            Figure::Text(_) => {}
        }
        self.commit(figure, ctx)
    }

    fn preview(&self) -> Option<&Figure> {
        match &self.state {
            DrawState::Drawing { figure, .. } => Some(figure),
            DrawState::Idle => None,
        }
    }

    fn current_state_name(&self) -> &'static str {
        match self.state {
            DrawState::Idle => "Idle",
            DrawState::Drawing { .. } => "Drawing",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::FigureCollection;
    use egui::{Vec2, pos2};

    fn run(tool: &mut DrawTool, figures: &mut FigureCollection, path: &[Pos2]) -> Option<ToolEvent> {
        let mut ctx = ToolContext {
            figures,
            canvas_size: Vec2::new(800.0, 600.0),
        };
        let (first, rest) = path.split_first()?;
        let mut event = tool.on_pointer_down(*first, Modifiers::NONE, &mut ctx);
        for p in rest {
            event = event.or(tool.on_pointer_move(*p, &mut ctx));
        }
        let last = rest.last().unwrap_or(first);
        event.or(tool.on_pointer_up(*last, &mut ctx))
    }

    fn tool_for(kind: FigureKind) -> DrawTool {
        let mut tool = DrawTool::new(ToolSettings::default());
        tool.set_figure_kind(kind);
        tool
    }

    #[test]
    fn dragging_a_rectangle_commits_normalized_corners() {
        let mut figures = FigureCollection::new();
        let mut tool = tool_for(FigureKind::Rectangle);
        let event = run(&mut tool, &mut figures, &[pos2(50.0, 60.0), pos2(20.0, 10.0)]);

        assert!(matches!(event, Some(ToolEvent::FigureAdded(_))));
        let (_, figure) = figures.iter().next().unwrap();
        assert_eq!(figure.top_point(), pos2(20.0, 10.0));
        assert_eq!(figure.bot_point(), pos2(50.0, 60.0));
        assert!(tool.preview().is_none());
    }

    #[test]
    fn preview_follows_the_pointer_while_dragging() {
        let mut figures = FigureCollection::new();
        let mut tool = tool_for(FigureKind::StraightLine);
        let mut ctx = ToolContext {
            figures: &mut figures,
            canvas_size: Vec2::new(800.0, 600.0),
        };
        tool.on_pointer_down(pos2(5.0, 5.0), Modifiers::NONE, &mut ctx);
        tool.on_pointer_move(pos2(40.0, 30.0), &mut ctx);

        let preview = tool.preview().unwrap();
        assert_eq!(preview.bot_point(), pos2(40.0, 30.0));
        assert_eq!(tool.current_state_name(), "Drawing");
        assert!(figures.is_empty());
    }

    #[test]
    fn curve_skips_samples_closer_than_the_minimum_distance() {
        let mut figures = FigureCollection::new();
        let mut tool = tool_for(FigureKind::CurveLine);
        run(
            &mut tool,
            &mut figures,
            &[
                pos2(0.0, 0.0),
                pos2(1.0, 1.0),
                pos2(10.0, 0.0),
                pos2(11.0, 0.0),
                pos2(20.0, 5.0),
            ],
        );

        let (_, figure) = figures.iter().next().unwrap();
        let Figure::Poly(curve) = figure else {
            panic!("expected a curve");
        };
        assert_eq!(curve.points(), &[pos2(0.0, 0.0), pos2(10.0, 0.0), pos2(20.0, 5.0)]);
    }

    #[test]
    fn short_curve_is_discarded() {
        let mut figures = FigureCollection::new();
        let mut tool = tool_for(FigureKind::CurveLine);
        let event = run(&mut tool, &mut figures, &[pos2(0.0, 0.0), pos2(30.0, 0.0)]);
        assert!(event.is_none());
        assert!(figures.is_empty());
    }

    #[test]
    fn text_is_placed_on_pointer_down() {
        let mut figures = FigureCollection::new();
        let mut tool = tool_for(FigureKind::TextBox);
        let mut ctx = ToolContext {
            figures: &mut figures,
            canvas_size: Vec2::new(800.0, 600.0),
        };
        let event = tool.on_pointer_down(pos2(10.0, 10.0), Modifiers::NONE, &mut ctx);
        let Some(ToolEvent::TextEntryRequested(id)) = event else {
            panic!("expected a text entry request");
        };
        assert_eq!(tool.current_state_name(), "Idle");
        let figure = figures.get(id).unwrap();
        assert_eq!(figure.bot_point(), pos2(160.0, 40.0));
    }
}
