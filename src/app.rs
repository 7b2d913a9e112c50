use std::path::PathBuf;

use eframe::egui::{self, Color32, Pos2, Rect, Sense};
use log::{error, info};

use crate::clipboard::Clipboard;
use crate::document::FigureId;
use crate::figure::{FigureKind, FigureProperties, FontSpec, argb_hex};
use crate::input::{InputEvent, InputHandler, route_event};
use crate::renderer::Renderer;
use crate::state::{CloseDecision, CloseRequest, DEFAULT_CANVAS_SIZE, Workspace};
use crate::tools::{Tool, ToolEvent, ToolMode, ToolSettings};

/// Storage key of the persisted tool settings.
pub const SETTINGS_KEY: &str = "tool_settings";

/// Bridges the canvas clipboard commands to the system clipboard.
///
/// Copies are queued and handed to egui at the end of the frame; pastes
/// arrive as egui events carrying the text.
#[derive(Debug, Default)]
struct EguiClipboard {
    outgoing: Option<String>,
    contents: Option<String>,
}

impl EguiClipboard {
    fn flush(&mut self, ctx: &egui::Context) {
        if let Some(text) = self.outgoing.take() {
            ctx.copy_text(text);
        }
    }
}

impl Clipboard for EguiClipboard {
    fn set_text(&mut self, text: String) {
        self.outgoing = Some(text.clone());
        self.contents = Some(text);
    }

    fn text(&self) -> Option<String> {
        self.contents.clone()
    }
}

/// Open property editor for one figure of the active canvas
#[derive(Debug)]
struct PropertyEditor {
    id: FigureId,
    props: FigureProperties,
}

/// Prompts shown on top of the canvas
#[derive(Debug)]
enum Dialog {
    NewCanvas { width: u32, height: u32 },
    Open { path: String },
    SaveAs { index: usize, path: String },
    ConfirmClose { index: usize, path: String },
}

enum DialogAction {
    Create(u32, u32),
    Open(PathBuf),
    Save(usize, PathBuf),
    Close(usize, CloseDecision),
    Dismiss,
}

pub struct PaintApp {
    workspace: Workspace,
    settings: ToolSettings,
    renderer: Renderer,
    input: InputHandler,
    clipboard: EguiClipboard,
    editor: Option<PropertyEditor>,
    dialog: Option<Dialog>,
    status: Option<String>,
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, document_path: Option<PathBuf>) -> Self {
        let settings: ToolSettings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, SETTINGS_KEY))
            .unwrap_or_default();

        let mut app = Self {
            workspace: Workspace::new(),
            settings,
            renderer: Renderer::new(),
            input: InputHandler::new(Rect::from_min_size(Pos2::ZERO, DEFAULT_CANVAS_SIZE)),
            clipboard: EguiClipboard::default(),
            editor: None,
            dialog: None,
            status: None,
        };

        match document_path {
            Some(path) if path.exists() => app.open_document(path),
            path => {
                app.create_document(DEFAULT_CANVAS_SIZE.x as u32, DEFAULT_CANVAS_SIZE.y as u32);
                if let (Some(path), Some(doc)) = (path, app.workspace.active_mut()) {
                    doc.set_path(path);
                }
            }
        }
        app
    }

    fn create_document(&mut self, width: u32, height: u32) {
        match self.workspace.new_document(width, height, &self.settings) {
            Ok(_) => self.editor = None,
            Err(err) => {
                error!("Failed to create canvas: {}", err);
                self.status = Some(format!("New canvas failed: {err}"));
            }
        }
    }

    fn open_document(&mut self, path: PathBuf) {
        match self.workspace.open(&path, &self.settings) {
            Ok(_) => {
                self.editor = None;
                self.status = Some(format!("Opened {}", path.display()));
            }
            Err(err) => {
                error!("Failed to open {}: {}", path.display(), err);
                self.status = Some(format!("Open failed: {err}"));
            }
        }
    }

    fn save_document(&mut self, index: usize, path: PathBuf) {
        match self.workspace.save(index, &path) {
            Ok(()) => self.status = Some(format!("Saved {}", path.display())),
            Err(err) => {
                error!("Failed to save {}: {}", path.display(), err);
                self.status = Some(format!("Save failed: {err}"));
            }
        }
    }

    fn close_document(&mut self, index: usize) {
        match self.workspace.request_close(index) {
            Some(CloseRequest::Closed) => self.editor = None,
            Some(CloseRequest::NeedsConfirmation) => {
                let path = self.workspace.documents()[index].suggested_path();
                self.dialog = Some(Dialog::ConfirmClose {
                    index,
                    path: path.display().to_string(),
                });
            }
            None => {}
        }
    }

    fn apply_dialog_action(&mut self, action: DialogAction) {
        match action {
            DialogAction::Create(width, height) => self.create_document(width, height),
            DialogAction::Open(path) => self.open_document(path),
            DialogAction::Save(index, path) => self.save_document(index, path),
            DialogAction::Close(index, decision) => match self.workspace.resolve_close(index, decision) {
                Ok(true) => self.editor = None,
                Ok(false) => {}
                Err(err) => {
                    error!("Failed to save before closing: {}", err);
                    self.status = Some(format!("Save failed: {err}"));
                }
            },
            DialogAction::Dismiss => {}
        }
    }

    fn handle_tool_event(&mut self, event: ToolEvent) {
        match event {
            ToolEvent::FigureAdded(_) => {}
            ToolEvent::TextEntryRequested(id) | ToolEvent::EditRequested(id) => {
                let props = self.workspace.active().and_then(|doc| doc.canvas.properties(id));
                if let Some(props) = props {
                    info!("Opening property editor for {}", id);
                    self.editor = Some(PropertyEditor { id, props });
                }
            }
        }
    }

    fn documents_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("documents_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let active = self.workspace.active_index();
                let mut selected = None;
                let mut closed = None;
                for (index, doc) in self.workspace.documents().iter().enumerate() {
                    if ui.selectable_label(active == Some(index), doc.title()).clicked() {
                        selected = Some(index);
                    }
                    if ui.small_button("x").on_hover_text("Close canvas").clicked() {
                        closed = Some(index);
                    }
                    ui.separator();
                }

                if let Some(index) = selected {
                    if active != Some(index) && self.workspace.set_active(index) {
                        self.editor = None;
                    }
                }
                if let Some(index) = closed {
                    self.close_document(index);
                }
            });
        });
    }

    fn tools_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("tools_panel")
            .resizable(true)
            .default_width(200.0)
            .show(ctx, |ui| {
                let mode = self.workspace.active().map(|doc| doc.canvas.mode());

                ui.heading("Mode");
                ui.add_enabled_ui(mode.is_some(), |ui| {
                    ui.horizontal(|ui| {
                        for candidate in ToolMode::ALL {
                            if ui.selectable_label(mode == Some(candidate), candidate.label()).clicked() {
                                if let Some(doc) = self.workspace.active_mut() {
                                    doc.canvas.set_mode(candidate);
                                }
                                self.editor = None;
                            }
                        }
                    });
                });
                ui.separator();

                ui.heading("Figure");
                ui.add_enabled_ui(mode == Some(ToolMode::Draw), |ui| {
                    for kind in FigureKind::ALL {
                        let active = self.settings.figure_kind == kind;
                        if ui.selectable_label(active, kind.label()).clicked() {
                            self.settings.figure_kind = kind;
                            for canvas in self.workspace.canvases_mut() {
                                canvas.set_active_figure_kind(kind);
                            }
                        }
                    }
                });
                ui.separator();

                self.pen_controls(ui);
                ui.separator();

                ui.heading("Canvas");
                ui.horizontal(|ui| {
                    if ui.button("New").clicked() {
                        let size = self
                            .workspace
                            .active()
                            .map_or(DEFAULT_CANVAS_SIZE, |doc| doc.canvas.size());
                        self.dialog = Some(Dialog::NewCanvas {
                            width: size.x as u32,
                            height: size.y as u32,
                        });
                    }
                    if ui.button("Open").clicked() {
                        self.dialog = Some(Dialog::Open { path: String::new() });
                    }
                    let active = self.workspace.active_index();
                    if ui.add_enabled(active.is_some(), egui::Button::new("Save")).clicked() {
                        if let Some((index, doc)) = active.zip(self.workspace.active()) {
                            self.dialog = Some(Dialog::SaveAs {
                                index,
                                path: doc.suggested_path().display().to_string(),
                            });
                        }
                    }
                    if ui.add_enabled(active.is_some(), egui::Button::new("Close")).clicked() {
                        if let Some(index) = active {
                            self.close_document(index);
                        }
                    }
                });
                match self.workspace.active().and_then(|doc| doc.path()) {
                    Some(path) => ui.label(path.display().to_string()),
                    None => ui.weak("Not saved yet"),
                };
            });
    }

    fn pen_controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Pen");

        let mut width = self.settings.stroke_width;
        ui.horizontal(|ui| {
            ui.label("Width:");
            ui.add(egui::Slider::new(&mut width, 1..=30));
        });
        if width != self.settings.stroke_width {
            self.settings.set_stroke_width(width);
            for canvas in self.workspace.canvases_mut() {
                canvas.set_stroke_width(width);
            }
        }

        let mut stroke = self.settings.stroke_color;
        ui.horizontal(|ui| {
            ui.label("Stroke:");
            egui::color_picker::color_edit_button_srgba(ui, &mut stroke, egui::color_picker::Alpha::OnlyBlend);
        });
        if stroke != self.settings.stroke_color {
            self.settings.stroke_color = stroke;
            for canvas in self.workspace.canvases_mut() {
                canvas.set_stroke_color(stroke);
            }
        }

        let mut fill = self.settings.fill_color;
        let mut fill_enabled = self.settings.fill_enabled;
        ui.horizontal(|ui| {
            ui.checkbox(&mut fill_enabled, "Fill:");
            egui::color_picker::color_edit_button_srgba(ui, &mut fill, egui::color_picker::Alpha::OnlyBlend);
        });
        if fill != self.settings.fill_color {
            self.settings.fill_color = fill;
            for canvas in self.workspace.canvases_mut() {
                canvas.set_fill_color(fill);
            }
        }
        if fill_enabled != self.settings.fill_enabled {
            self.settings.fill_enabled = fill_enabled;
            for canvas in self.workspace.canvases_mut() {
                canvas.set_fill_enabled(fill_enabled);
            }
        }

        let mut font = self.settings.font.clone();
        ui.horizontal(|ui| {
            ui.label("Font:");
            ui.text_edit_singleline(&mut font.family);
        });
        ui.horizontal(|ui| {
            ui.label("Size:");
            ui.add(egui::DragValue::new(&mut font.size).range(4.0..=144.0));
        });
        if font != self.settings.font {
            self.settings.font = font.clone();
            for canvas in self.workspace.canvases_mut() {
                canvas.set_text_font(font.clone());
            }
        }
    }

    fn status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                match self.workspace.active() {
                    Some(doc) => {
                        let canvas = &doc.canvas;
                        let pointer = canvas.pointer();
                        let size = canvas.size();
                        ui.label(format!("X: {:.0} Y: {:.0}", pointer.x, pointer.y));
                        ui.separator();
                        ui.label(format!("Canvas: {:.0} x {:.0}", size.x, size.y));
                        ui.separator();
                        ui.label(format!(
                            "{} / {}",
                            canvas.mode().label(),
                            canvas.tool().current_state_name()
                        ));
                    }
                    None => {
                        ui.weak("No canvas open");
                    }
                }
                ui.separator();
                ui.label(format!("Pen: {}", argb_hex(self.settings.stroke_color)));
                if let Some(status) = &self.status {
                    ui.separator();
                    ui.label(status);
                }
            });
        });
    }

    fn canvas_panel(&mut self, ctx: &egui::Context) {
        let mut tool_events = Vec::new();

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::from_gray(200)))
            .show(ctx, |ui| {
                let Some(doc) = self.workspace.active_mut() else {
                    ui.centered_and_justified(|ui| ui.weak("Use New or Open to start a canvas"));
                    return;
                };
                let canvas = &mut doc.canvas;

                egui::ScrollArea::both().show(ui, |ui| {
                    let (response, painter) = ui.allocate_painter(canvas.size(), Sense::click_and_drag());
                    let rect = response.rect;
                    self.input.set_canvas_rect(rect);

                    let typing = ctx.wants_keyboard_input();
                    let over_canvas = response.contains_pointer();
                    let events = ctx.input(|input| self.input.process_input(input));
                    for event in &events {
                        let is_pointer = matches!(
                            event,
                            InputEvent::PointerDown { .. }
                                | InputEvent::PointerMove { .. }
                                | InputEvent::PointerUp { .. }
                        );
                        if !is_pointer && typing {
                            continue;
                        }
                        // Presses on a window floating above the canvas.
                        if matches!(event, InputEvent::PointerDown { .. }) && !over_canvas {
                            continue;
                        }
                        tool_events.extend(route_event(canvas, &mut self.clipboard, event));
                    }
                    self.clipboard.flush(ctx);

                    if let Some(hover) = response.hover_pos() {
                        let local = (hover - rect.min).to_pos2();
                        if let Some(handle) = canvas.handle_at(local) {
                            ctx.set_cursor_icon(handle.cursor_icon());
                        }
                    }

                    self.renderer.render(&painter, rect, canvas);
                });
            });

        for event in tool_events {
            self.handle_tool_event(event);
        }
    }

    fn dialog_window(&mut self, ctx: &egui::Context) {
        let Some(dialog) = &mut self.dialog else {
            return;
        };
        let mut action = None;

        match dialog {
            Dialog::NewCanvas { width, height } => {
                egui::Window::new("New canvas")
                    .collapsible(false)
                    .resizable(false)
                    .show(ctx, |ui| {
                        ui.horizontal(|ui| {
                            ui.label("Width:");
                            ui.add(egui::DragValue::new(width).range(1..=10_000));
                        });
                        ui.horizontal(|ui| {
                            ui.label("Height:");
                            ui.add(egui::DragValue::new(height).range(1..=10_000));
                        });
                        ui.horizontal(|ui| {
                            if ui.button("Create").clicked() {
                                action = Some(DialogAction::Create(*width, *height));
                            }
                            if ui.button("Cancel").clicked() {
                                action = Some(DialogAction::Dismiss);
                            }
                        });
                    });
            }
            Dialog::Open { path } => {
                egui::Window::new("Open canvas")
                    .collapsible(false)
                    .resizable(false)
                    .show(ctx, |ui| {
                        ui.horizontal(|ui| {
                            ui.label("File:");
                            ui.text_edit_singleline(path);
                        });
                        ui.horizontal(|ui| {
                            let ready = !path.trim().is_empty();
                            if ui.add_enabled(ready, egui::Button::new("Open")).clicked() {
                                action = Some(DialogAction::Open(PathBuf::from(path.trim())));
                            }
                            if ui.button("Cancel").clicked() {
                                action = Some(DialogAction::Dismiss);
                            }
                        });
                    });
            }
            Dialog::SaveAs { index, path } => {
                egui::Window::new("Save canvas")
                    .collapsible(false)
                    .resizable(false)
                    .show(ctx, |ui| {
                        ui.horizontal(|ui| {
                            ui.label("File:");
                            ui.text_edit_singleline(path);
                        });
                        ui.horizontal(|ui| {
                            let ready = !path.trim().is_empty();
                            if ui.add_enabled(ready, egui::Button::new("Save")).clicked() {
                                action = Some(DialogAction::Save(*index, PathBuf::from(path.trim())));
                            }
                            if ui.button("Cancel").clicked() {
                                action = Some(DialogAction::Dismiss);
                            }
                        });
                    });
            }
            Dialog::ConfirmClose { index, path } => {
                let title = self
                    .workspace
                    .documents()
                    .get(*index)
                    .map(|doc| doc.title().to_owned())
                    .unwrap_or_default();
                egui::Window::new("Close canvas")
                    .collapsible(false)
                    .resizable(false)
                    .show(ctx, |ui| {
                        ui.label(format!("Save changes to {title}?"));
                        ui.horizontal(|ui| {
                            ui.label("File:");
                            ui.text_edit_singleline(path);
                        });
                        ui.horizontal(|ui| {
                            let ready = !path.trim().is_empty();
                            if ui.add_enabled(ready, egui::Button::new("Save")).clicked() {
                                let path = PathBuf::from(path.trim());
                                action = Some(DialogAction::Close(*index, CloseDecision::Save(path)));
                            }
                            if ui.button("Don't save").clicked() {
                                action = Some(DialogAction::Close(*index, CloseDecision::Discard));
                            }
                            if ui.button("Cancel").clicked() {
                                action = Some(DialogAction::Close(*index, CloseDecision::Cancel));
                            }
                        });
                    });
            }
        }

        if let Some(action) = action {
            self.dialog = None;
            self.apply_dialog_action(action);
        }
    }

    fn property_window(&mut self, ctx: &egui::Context) {
        let Some(editor) = &mut self.editor else {
            return;
        };
        let mut open = true;
        let mut apply = false;

        egui::Window::new("Figure properties")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                let style = &mut editor.props.style;
                ui.horizontal(|ui| {
                    ui.label("Stroke width:");
                    ui.add(egui::DragValue::new(&mut style.stroke_width).range(1..=100));
                });
                ui.horizontal(|ui| {
                    ui.label("Stroke:");
                    egui::color_picker::color_edit_button_srgba(
                        ui,
                        &mut style.stroke_color,
                        egui::color_picker::Alpha::OnlyBlend,
                    );
                });
                ui.horizontal(|ui| {
                    ui.checkbox(&mut style.is_filling, "Fill:");
                    egui::color_picker::color_edit_button_srgba(
                        ui,
                        &mut style.fill_color,
                        egui::color_picker::Alpha::OnlyBlend,
                    );
                });

                if let Some(text) = &mut editor.props.text {
                    ui.separator();
                    ui.label("Text:");
                    ui.text_edit_multiline(text);
                }
                if let Some(FontSpec { family, size }) = &mut editor.props.font {
                    ui.horizontal(|ui| {
                        ui.label("Font:");
                        ui.text_edit_singleline(family);
                        ui.add(egui::DragValue::new(size).range(4.0..=144.0));
                    });
                }

                ui.separator();
                apply = ui.button("Apply").clicked();
            });

        if apply {
            let id = editor.id;
            let applied = self
                .workspace
                .active_mut()
                .is_some_and(|doc| doc.canvas.apply_properties(id, editor.props.clone()));
            if !applied {
                // The figure was deleted while the editor was open.
                self.editor = None;
                return;
            }
        }
        if !open {
            self.editor = None;
        }
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, SETTINGS_KEY, &self.settings);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.documents_bar(ctx);
        self.tools_panel(ctx);
        self.status_bar(ctx);
        self.canvas_panel(ctx);
        self.dialog_window(ctx);
        self.property_window(ctx);
    }
}
