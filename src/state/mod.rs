mod canvas;
mod persistence;
mod workspace;

pub use canvas::{Canvas, DEFAULT_CANVAS_SIZE};
pub use persistence::{PersistenceError, PersistenceResult, load_document, save_document};
pub use workspace::{CloseDecision, CloseRequest, OpenDocument, Workspace};
