use egui::{Modifiers, Pos2, Vec2};
use log::{debug, info};

use super::{Tool, ToolContext, ToolEvent};
use crate::document::{FigureCollection, FigureId};
use crate::figure::{Drawable, Figure, HANDLE_GRAB_RADIUS, HandleId, Style, factory};

/// Consolidated state of the selection tool
#[derive(Debug, Clone)]
pub enum SelectionState {
    Idle,
    Resizing {
        target: FigureId,
        handle: HandleId,
    },
    Moving {
        /// Pointer position the selection was last moved to.
        anchor: Pos2,
    },
    Marquee {
        start: Pos2,
        frame: Figure,
    },
}

/// Selects, moves and resizes existing figures
#[derive(Debug, Clone)]
pub struct SelectionTool {
    state: SelectionState,
    tolerance: f32,
}

impl SelectionTool {
    pub fn new(tolerance: f32) -> Self {
        Self {
            state: SelectionState::Idle,
            tolerance,
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Resize handle of a selected figure under `pos`, topmost figure first.
    pub fn handle_at(figures: &FigureCollection, pos: Pos2) -> Option<(FigureId, HandleId)> {
        figures.selected_ids().into_iter().rev().find_map(|id| {
            figures
                .get(id)
                .and_then(|figure| figure.handle_at(pos, HANDLE_GRAB_RADIUS))
                .map(|handle| (id, handle))
        })
    }

    fn marquee_frame(start: Pos2, end: Pos2) -> Figure {
        let style = Style {
            stroke_width: 1,
            ..Style::default()
        };
        factory::create_rectangle(start, end, style)
    }

    /// Moves the whole selection by `delta`, or nothing if any figure would
    /// leave the canvas.
    fn move_selection(figures: &mut FigureCollection, delta: Vec2, canvas_size: Vec2) -> bool {
        let ids = figures.selected_ids();
        let fits = ids.iter().all(|id| {
            figures
                .get(*id)
                .is_some_and(|figure| figure.can_move(delta, canvas_size))
        });
        if !fits {
            return false;
        }

        for id in ids {
            if let Some(figure) = figures.get_mut(id) {
                figure.translate(delta);
                figure.validate_edges();
            }
        }
        true
    }
}

impl Tool for SelectionTool {
    fn name(&self) -> &'static str {
        "Select"
    }

    fn activate(&mut self) {
        self.state = SelectionState::Idle;
    }

    fn deactivate(&mut self) {
        self.state = SelectionState::Idle;
    }

    fn on_pointer_down(
        &mut self,
        pos: Pos2,
        modifiers: Modifiers,
        ctx: &mut ToolContext<'_>,
    ) -> Option<ToolEvent> {
        if let Some((target, handle)) = Self::handle_at(ctx.figures, pos) {
            debug!("Resizing {} via {:?}", target, handle);
            self.state = SelectionState::Resizing { target, handle };
            return None;
        }

        if let Some(id) = ctx.figures.topmost_at(pos, self.tolerance) {
            let extend = modifiers.shift || modifiers.ctrl || modifiers.command;
            if extend {
                ctx.figures.select(id);
            } else if !ctx.figures.is_selected(id) {
                ctx.figures.set_selection([id]);
            }
            self.state = SelectionState::Moving { anchor: pos };
            return None;
        }

        ctx.figures.clear_selection();
        self.state = SelectionState::Marquee {
            start: pos,
            frame: Self::marquee_frame(pos, pos),
        };
        None
    }

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<ToolEvent> {
        match &mut self.state {
            SelectionState::Idle => {}
            SelectionState::Resizing { target, handle } => {
                if let Some(figure) = ctx.figures.get_mut(*target) {
                    *handle = figure.drag_handle(*handle, pos);
                    figure.validate_edges();
                }
            }
            SelectionState::Moving { anchor } => {
                let delta = pos - *anchor;
                if delta == Vec2::ZERO {
                    return None;
                }
                if Self::move_selection(ctx.figures, delta, ctx.canvas_size) {
                    *anchor = pos;
                } else {
                    debug!("Move by {:?} rejected: selection would leave the canvas", delta);
                }
            }
            SelectionState::Marquee { start, frame } => {
                *frame = Self::marquee_frame(*start, pos);
                let hits = ctx.figures.ids_intersecting(frame.bounds());
                ctx.figures.set_selection(hits);
            }
        }
        None
    }

    fn on_pointer_up(&mut self, _pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<ToolEvent> {
        let finished = std::mem::replace(&mut self.state, SelectionState::Idle);
        if !matches!(finished, SelectionState::Idle) {
            info!(
                "Selection gesture finished with {} figure(s) selected",
                ctx.figures.selection().len()
            );
        }
        None
    }

    fn preview(&self) -> Option<&Figure> {
        match &self.state {
            SelectionState::Marquee { frame, .. } => Some(frame),
            _ => None,
        }
    }

    fn current_state_name(&self) -> &'static str {
        match self.state {
            SelectionState::Idle => "Idle",
            SelectionState::Resizing { .. } => "Resizing",
            SelectionState::Moving { .. } => "Moving",
            SelectionState::Marquee { .. } => "Marquee",
        }
    }
}
