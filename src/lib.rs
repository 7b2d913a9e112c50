#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod clipboard;
pub mod document;
pub mod error;
pub mod figure;
pub mod geometry;
pub mod input;
pub mod renderer;
pub mod serialization;
pub mod state;
pub mod tools;

pub use app::PaintApp;
pub use clipboard::{Clipboard, MemoryClipboard};
pub use document::{FigureCollection, FigureId};
pub use error::CodecError;
pub use figure::{Drawable, Figure, FigureKind};
pub use input::{InputEvent, InputHandler};
pub use renderer::Renderer;
pub use serialization::{SerializedDocument, SerializedFigure};
pub use state::{Canvas, Workspace};
pub use tools::{Tool, ToolEvent, ToolMode, ToolSettings};
