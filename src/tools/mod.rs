use egui::{Modifiers, Pos2, Vec2};

use crate::document::{FigureCollection, FigureId};
use crate::figure::Figure;

mod settings;
pub use settings::ToolSettings;

mod draw_tool;
pub use draw_tool::{DrawState, DrawTool};

mod selection_tool;
pub use selection_tool::{SelectionState, SelectionTool};

mod edit_tool;
pub use edit_tool::EditTool;

/// What a pointer handler did that the shell may need to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolEvent {
    /// A figure was committed to the collection.
    FigureAdded(FigureId),
    /// A text figure was placed and now needs its text from the user.
    TextEntryRequested(FigureId),
    /// The user picked a figure to open in a property editor.
    EditRequested(FigureId),
}

/// The document a tool operates on during one event
pub struct ToolContext<'a> {
    pub figures: &'a mut FigureCollection,
    pub canvas_size: Vec2,
}

/// Interaction modes of a canvas
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToolMode {
    #[default]
    Draw,
    Select,
    Edit,
}

impl ToolMode {
    pub const ALL: [ToolMode; 3] = [ToolMode::Draw, ToolMode::Select, ToolMode::Edit];

    pub fn label(&self) -> &'static str {
        match self {
            ToolMode::Draw => "Draw",
            ToolMode::Select => "Select",
            ToolMode::Edit => "Edit",
        }
    }
}

/// Tool trait defines the interface for all canvas modes
pub trait Tool {
    /// Return the name of the tool
    fn name(&self) -> &'static str;

    /// Called when the tool becomes the active mode.
    fn activate(&mut self) {
        // default: do nothing
    }

    /// Called when the tool is replaced. Drops any in-progress gesture.
    fn deactivate(&mut self);

    /// Handle pointer press on the canvas.
    fn on_pointer_down(
        &mut self,
        pos: Pos2,
        modifiers: Modifiers,
        ctx: &mut ToolContext<'_>,
    ) -> Option<ToolEvent>;

    /// Handle pointer movement. Tools without a gesture in progress ignore it.
    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<ToolEvent>;

    /// Handle pointer release on the canvas.
    fn on_pointer_up(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<ToolEvent>;

    /// The transient figure to paint dashed, if a gesture is in progress.
    fn preview(&self) -> Option<&Figure> {
        None
    }

    fn current_state_name(&self) -> &'static str;
}

/// Enum representing all available tool types
#[derive(Debug, Clone)]
pub enum ToolType {
    Draw(DrawTool),
    Select(SelectionTool),
    Edit(EditTool),
}

impl ToolType {
    /// A fresh tool for `mode` with no transient state.
    pub fn new_for(mode: ToolMode, settings: &ToolSettings) -> Self {
        match mode {
            ToolMode::Draw => Self::Draw(DrawTool::new(settings.clone())),
            ToolMode::Select => Self::Select(SelectionTool::new(settings.hit_tolerance)),
            ToolMode::Edit => Self::Edit(EditTool::new(settings.hit_tolerance)),
        }
    }

    pub fn mode(&self) -> ToolMode {
        match self {
            Self::Draw(_) => ToolMode::Draw,
            Self::Select(_) => ToolMode::Select,
            Self::Edit(_) => ToolMode::Edit,
        }
    }

    pub fn as_draw_tool_mut(&mut self) -> Option<&mut DrawTool> {
        match self {
            Self::Draw(tool) => Some(tool),
            _ => None,
        }
    }

}

impl Tool for ToolType {
    fn name(&self) -> &'static str {
        match self {
            Self::Draw(tool) => tool.name(),
            Self::Select(tool) => tool.name(),
            Self::Edit(tool) => tool.name(),
        }
    }

    fn activate(&mut self) {
        match self {
            Self::Draw(tool) => tool.activate(),
            Self::Select(tool) => tool.activate(),
            Self::Edit(tool) => tool.activate(),
        }
    }

    fn deactivate(&mut self) {
        match self {
            Self::Draw(tool) => tool.deactivate(),
            Self::Select(tool) => tool.deactivate(),
            Self::Edit(tool) => tool.deactivate(),
        }
    }

    fn on_pointer_down(
        &mut self,
        pos: Pos2,
        modifiers: Modifiers,
        ctx: &mut ToolContext<'_>,
    ) -> Option<ToolEvent> {
        match self {
            Self::Draw(tool) => tool.on_pointer_down(pos, modifiers, ctx),
            Self::Select(tool) => tool.on_pointer_down(pos, modifiers, ctx),
            Self::Edit(tool) => tool.on_pointer_down(pos, modifiers, ctx),
        }
    }

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<ToolEvent> {
        match self {
            Self::Draw(tool) => tool.on_pointer_move(pos, ctx),
            Self::Select(tool) => tool.on_pointer_move(pos, ctx),
            Self::Edit(tool) => tool.on_pointer_move(pos, ctx),
        }
    }

    fn on_pointer_up(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<ToolEvent> {
        match self {
            Self::Draw(tool) => tool.on_pointer_up(pos, ctx),
            Self::Select(tool) => tool.on_pointer_up(pos, ctx),
            Self::Edit(tool) => tool.on_pointer_up(pos, ctx),
        }
    }

    fn preview(&self) -> Option<&Figure> {
        match self {
            Self::Draw(tool) => tool.preview(),
            Self::Select(tool) => tool.preview(),
            Self::Edit(tool) => tool.preview(),
        }
    }

    fn current_state_name(&self) -> &'static str {
        match self {
            Self::Draw(tool) => tool.current_state_name(),
            Self::Select(tool) => tool.current_state_name(),
            Self::Edit(tool) => tool.current_state_name(),
        }
    }
}
