use std::collections::HashSet;

use egui::{Color32, Modifiers, Pos2, Vec2};
use log::{debug, info, warn};

use crate::clipboard::Clipboard;
use crate::document::{FigureCollection, FigureId};
use crate::error::CodecResult;
use crate::figure::{Drawable, Figure, FigureKind, FigureProperties, FontSpec, HandleId};
use crate::serialization::{self, SerializedDocument};
use crate::tools::{SelectionTool, Tool, ToolContext, ToolEvent, ToolMode, ToolSettings, ToolType};

pub const DEFAULT_CANVAS_SIZE: Vec2 = Vec2::new(800.0, 600.0);

/// One open document together with the mode that currently edits it.
///
/// All mutation happens synchronously from pointer, keyboard and clipboard
/// events; rendering only reads.
#[derive(Debug, Clone)]
pub struct Canvas {
    size: Vec2,
    figures: FigureCollection,
    tool: ToolType,
    settings: ToolSettings,
    /// Last known pointer position in canvas space, used to place pastes.
    pointer: Pos2,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS_SIZE, ToolSettings::default())
    }
}

impl Canvas {
    /// An empty canvas in Draw mode.
    pub fn new(size: Vec2, settings: ToolSettings) -> Self {
        let tool = ToolType::new_for(ToolMode::Draw, &settings);
        Self {
            size,
            figures: FigureCollection::new(),
            tool,
            settings,
            pointer: Pos2::ZERO,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn figures(&self) -> &FigureCollection {
        &self.figures
    }

    pub fn tool(&self) -> &ToolType {
        &self.tool
    }

    pub fn mode(&self) -> ToolMode {
        self.tool.mode()
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn pointer(&self) -> Pos2 {
        self.pointer
    }

    // ---- mode switching ----

    /// Replaces the active mode. Drops any gesture in progress and clears the
    /// selection, even when `mode` is already active.
    pub fn set_mode(&mut self, mode: ToolMode) {
        self.tool.deactivate();
        self.figures.clear_selection();
        self.tool = ToolType::new_for(mode, &self.settings);
        self.tool.activate();
        info!("Switched to {} mode", self.tool.name());
    }

    pub fn set_active_figure_kind(&mut self, kind: FigureKind) {
        self.settings.figure_kind = kind;
        if let Some(draw) = self.tool.as_draw_tool_mut() {
            draw.set_figure_kind(kind);
        }
    }

    pub fn set_stroke_color(&mut self, color: Color32) {
        self.settings.stroke_color = color;
        if let Some(draw) = self.tool.as_draw_tool_mut() {
            draw.set_stroke_color(color);
        }
    }

    pub fn set_stroke_width(&mut self, width: u32) {
        self.settings.set_stroke_width(width);
        if let Some(draw) = self.tool.as_draw_tool_mut() {
            draw.set_stroke_width(width);
        }
    }

    pub fn set_fill_color(&mut self, color: Color32) {
        self.settings.fill_color = color;
        if let Some(draw) = self.tool.as_draw_tool_mut() {
            draw.set_fill_color(color);
        }
    }

    pub fn set_fill_enabled(&mut self, enabled: bool) {
        self.settings.fill_enabled = enabled;
        if let Some(draw) = self.tool.as_draw_tool_mut() {
            draw.set_fill_enabled(enabled);
        }
    }

    pub fn set_text_font(&mut self, font: FontSpec) {
        self.settings.font = font.clone();
        if let Some(draw) = self.tool.as_draw_tool_mut() {
            draw.set_text_font(font);
        }
    }

    /// Takes over a whole settings struct from the shell.
    pub fn apply_settings(&mut self, mut settings: ToolSettings) {
        settings.stroke_width = settings.stroke_width.max(1);
        if let Some(draw) = self.tool.as_draw_tool_mut() {
            draw.apply_settings(settings.clone());
        }
        self.settings = settings;
    }

    // ---- pointer events ----

    fn context(&mut self) -> (&mut ToolType, ToolContext<'_>) {
        (
            &mut self.tool,
            ToolContext {
                figures: &mut self.figures,
                canvas_size: self.size,
            },
        )
    }

    pub fn pointer_down(&mut self, pos: Pos2, modifiers: Modifiers) -> Option<ToolEvent> {
        self.pointer = pos;
        let (tool, mut ctx) = self.context();
        tool.on_pointer_down(pos, modifiers, &mut ctx)
    }

    /// Pointer moved, with or without a button held.
    pub fn pointer_move(&mut self, pos: Pos2) -> Option<ToolEvent> {
        self.pointer = pos;
        let (tool, mut ctx) = self.context();
        tool.on_pointer_move(pos, &mut ctx)
    }

    pub fn pointer_up(&mut self, pos: Pos2) -> Option<ToolEvent> {
        self.pointer = pos;
        let (tool, mut ctx) = self.context();
        tool.on_pointer_up(pos, &mut ctx)
    }

    /// Resize handle under `pos`, for cursor feedback. Select mode only.
    pub fn handle_at(&self, pos: Pos2) -> Option<HandleId> {
        if self.mode() != ToolMode::Select {
            return None;
        }
        SelectionTool::handle_at(&self.figures, pos).map(|(_, handle)| handle)
    }

    // ---- renderer contract ----

    pub fn for_each_figure_in_order(&self, f: impl FnMut(FigureId, &Figure)) {
        self.figures.for_each_in_order(f);
    }

    pub fn preview_figure(&self) -> Option<&Figure> {
        self.tool.preview()
    }

    pub fn selection(&self) -> &HashSet<FigureId> {
        self.figures.selection()
    }

    // ---- selection commands ----

    fn in_select_mode(&self, command: &str) -> bool {
        let active = self.mode() == ToolMode::Select;
        if !active {
            debug!("Ignoring {} outside Select mode", command);
        }
        active
    }

    /// Removes the selected figures. Returns how many were removed.
    pub fn delete_selected(&mut self) -> usize {
        if !self.in_select_mode("delete") {
            return 0;
        }
        let removed = self.figures.remove_selected().len();
        if removed > 0 {
            info!("Deleted {} figure(s)", removed);
        }
        removed
    }

    /// Puts the selected figures on the clipboard. Returns false if nothing
    /// was copied.
    pub fn copy_selection(&self, clipboard: &mut impl Clipboard) -> bool {
        if !self.in_select_mode("copy") || !self.figures.has_selection() {
            return false;
        }
        let selected = self.figures.selected_figures();
        match serialization::encode_clipboard(selected.iter().copied()) {
            Ok(text) => {
                clipboard.set_text(text);
                info!("Copied {} figure(s)", selected.len());
                true
            }
            Err(err) => {
                warn!("Failed to encode clipboard payload: {}", err);
                false
            }
        }
    }

    pub fn cut_selection(&mut self, clipboard: &mut impl Clipboard) -> bool {
        if !self.copy_selection(clipboard) {
            return false;
        }
        self.figures.remove_selected();
        true
    }

    /// Inserts the clipboard figures with the first one's top-left corner at
    /// the pointer. Anything undecodable makes this a no-op.
    pub fn paste(&mut self, clipboard: &impl Clipboard) -> Vec<FigureId> {
        let Some(text) = clipboard.text() else {
            debug!("Clipboard is empty");
            return Vec::new();
        };
        self.paste_text(&text)
    }

    /// Like [`Canvas::paste`], for a payload that arrived as a paste event.
    pub fn paste_text(&mut self, text: &str) -> Vec<FigureId> {
        if !self.in_select_mode("paste") {
            return Vec::new();
        }
        let figures = match serialization::decode_clipboard(text) {
            Ok(figures) => figures,
            Err(err) => {
                warn!("Ignoring clipboard contents: {}", err);
                return Vec::new();
            }
        };
        let Some(first) = figures.first() else {
            return Vec::new();
        };

        let offset = self.pointer - first.top_point();
        let ids: Vec<FigureId> = figures
            .into_iter()
            .map(|mut figure| {
                figure.translate(offset);
                figure.validate_edges();
                self.figures.push(figure)
            })
            .collect();
        self.figures.set_selection(ids.iter().copied());
        info!("Pasted {} figure(s) at {:?}", ids.len(), self.pointer);
        ids
    }

    // ---- external editor hand-back ----

    /// Sets the payload of a text figure. False if `id` is not a text figure.
    pub fn set_text(&mut self, id: FigureId, text: impl Into<String>) -> bool {
        match self.figures.get_mut(id).and_then(Figure::as_text_mut) {
            Some(figure) => {
                figure.set_text(text);
                true
            }
            None => false,
        }
    }

    pub fn properties(&self, id: FigureId) -> Option<FigureProperties> {
        self.figures.get(id).map(Figure::properties)
    }

    pub fn apply_properties(&mut self, id: FigureId, props: FigureProperties) -> bool {
        match self.figures.get_mut(id) {
            Some(figure) => {
                figure.apply_properties(props);
                true
            }
            None => false,
        }
    }

    // ---- documents ----

    pub fn to_document(&self) -> SerializedDocument {
        SerializedDocument::new(self.size, self.figures.figures())
    }

    pub fn from_document(doc: &SerializedDocument, settings: &ToolSettings) -> CodecResult<Self> {
        let mut canvas = Self::new(DEFAULT_CANVAS_SIZE, settings.clone());
        canvas.replace_document(doc)?;
        Ok(canvas)
    }

    /// Swaps in the contents of `doc`. On error the canvas is left untouched.
    pub fn replace_document(&mut self, doc: &SerializedDocument) -> CodecResult<()> {
        let (size, figures) = doc.decode()?;
        self.size = size;
        self.figures.replace_all(figures);
        self.figures.validate_all();
        self.reset_tool();
        info!(
            "Loaded document {}x{} with {} figure(s)",
            size.x,
            size.y,
            self.figures.len()
        );
        Ok(())
    }

    fn reset_tool(&mut self) {
        self.tool.deactivate();
        self.tool = ToolType::new_for(self.tool.mode(), &self.settings);
        self.tool.activate();
    }
}
