use egui::{Event, InputState, Key, Modifiers, PointerButton, Pos2, Rect};
use log::debug;

use crate::clipboard::Clipboard;
use crate::state::Canvas;
use crate::tools::ToolEvent;

/// Canvas input after translation into canvas-local coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed inside the canvas
    PointerDown { pos: Pos2, modifiers: Modifiers },
    /// Pointer moved over the canvas, or anywhere while a drag is active
    PointerMove { pos: Pos2 },
    /// Primary button released after a press inside the canvas
    PointerUp { pos: Pos2 },
    KeyDown { key: Key, modifiers: Modifiers },
    Copy,
    Cut,
    Paste(String),
}

/// Handles converting raw egui input into canvas InputEvents
#[derive(Debug, Clone)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Rect,
    dragging: bool,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect,
            dragging: false,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    fn to_canvas(&self, pos: Pos2) -> Pos2 {
        (pos - self.canvas_rect.min).to_pos2()
    }

    /// Process one frame of raw egui input
    pub fn process_input(&mut self, input: &InputState) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let hover = input.pointer.hover_pos();

        if let Some(pos) = hover {
            let moved = Some(pos) != self.last_pointer_pos;
            if moved && (self.dragging || self.canvas_rect.contains(pos)) {
                events.push(InputEvent::PointerMove {
                    pos: self.to_canvas(pos),
                });
            }
        }
        self.last_pointer_pos = hover;

        if input.pointer.button_pressed(PointerButton::Primary) {
            if let Some(pos) = input.pointer.press_origin().or(hover) {
                if self.canvas_rect.contains(pos) {
                    self.dragging = true;
                    events.push(InputEvent::PointerDown {
                        pos: self.to_canvas(pos),
                        modifiers: input.modifiers,
                    });
                }
            }
        }

        if self.dragging && input.pointer.button_released(PointerButton::Primary) {
            self.dragging = false;
            let pos = hover.or(self.last_pointer_pos).unwrap_or(self.canvas_rect.min);
            events.push(InputEvent::PointerUp {
                pos: self.to_canvas(pos),
            });
        }

        for event in &input.raw.events {
            match event {
                Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } => events.push(InputEvent::KeyDown {
                    key: *key,
                    modifiers: *modifiers,
                }),
                Event::Copy => events.push(InputEvent::Copy),
                Event::Cut => events.push(InputEvent::Cut),
                Event::Paste(text) => events.push(InputEvent::Paste(text.clone())),
                _ => {}
            }
        }

        events
    }
}

/// Feeds one input event into `canvas`. Copy and cut write to `clipboard`;
/// paste events carry their own text and leave it alone.
pub fn route_event(
    canvas: &mut Canvas,
    clipboard: &mut impl Clipboard,
    event: &InputEvent,
) -> Option<ToolEvent> {
    match event {
        InputEvent::PointerDown { pos, modifiers } => canvas.pointer_down(*pos, *modifiers),
        InputEvent::PointerMove { pos } => canvas.pointer_move(*pos),
        InputEvent::PointerUp { pos } => canvas.pointer_up(*pos),
        InputEvent::KeyDown {
            key: Key::Delete | Key::Backspace,
            ..
        } => {
            canvas.delete_selected();
            None
        }
        InputEvent::KeyDown { .. } => None,
        InputEvent::Copy => {
            canvas.copy_selection(clipboard);
            None
        }
        InputEvent::Cut => {
            canvas.cut_selection(clipboard);
            None
        }
        InputEvent::Paste(text) => {
            let pasted = canvas.paste_text(text);
            debug!("Paste event inserted {} figure(s)", pasted.len());
            None
        }
    }
}
