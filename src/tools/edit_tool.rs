use egui::{Modifiers, Pos2};
use log::info;

use super::{Tool, ToolContext, ToolEvent};
use crate::document::FigureId;

/// Picks a single figure and hands it to an external property editor
#[derive(Debug, Clone)]
pub struct EditTool {
    target: Option<FigureId>,
    tolerance: f32,
}

impl EditTool {
    pub fn new(tolerance: f32) -> Self {
        Self {
            target: None,
            tolerance,
        }
    }
}

impl Tool for EditTool {
    fn name(&self) -> &'static str {
        "Edit"
    }

    fn deactivate(&mut self) {
        self.target = None;
    }

    fn on_pointer_down(
        &mut self,
        pos: Pos2,
        _modifiers: Modifiers,
        ctx: &mut ToolContext<'_>,
    ) -> Option<ToolEvent> {
        match ctx.figures.topmost_at(pos, self.tolerance) {
            Some(id) => {
                ctx.figures.set_selection([id]);
                self.target = Some(id);
                info!("Editing figure {}", id);
                Some(ToolEvent::EditRequested(id))
            }
            None => {
                ctx.figures.clear_selection();
                self.target = None;
                None
            }
        }
    }

    fn on_pointer_move(&mut self, _pos: Pos2, _ctx: &mut ToolContext<'_>) -> Option<ToolEvent> {
        None
    }

    fn on_pointer_up(&mut self, _pos: Pos2, _ctx: &mut ToolContext<'_>) -> Option<ToolEvent> {
        None
    }

    fn current_state_name(&self) -> &'static str {
        if self.target.is_some() { "Editing" } else { "Idle" }
    }
}
