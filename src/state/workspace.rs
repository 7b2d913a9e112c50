use std::path::{Path, PathBuf};

use log::info;

use super::canvas::Canvas;
use super::persistence::{self, PersistenceResult};
use crate::error::CodecResult;
use crate::serialization;
use crate::tools::ToolSettings;

/// A canvas together with where it was loaded from or saved to.
#[derive(Debug, Clone)]
pub struct OpenDocument {
    pub canvas: Canvas,
    title: String,
    path: Option<PathBuf>,
}

impl OpenDocument {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Where the next save goes by default.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
    }

    /// Closing a canvas with figures on it offers to save first.
    pub fn needs_save_prompt(&self) -> bool {
        !self.canvas.figures().is_empty()
    }

    /// File to propose in a save prompt.
    pub fn suggested_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.json", self.title)))
    }
}

/// Result of asking to close a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseRequest {
    Closed,
    /// The canvas is not empty; answer with [`Workspace::resolve_close`].
    NeedsConfirmation,
}

/// Answer to the save prompt shown before a non-empty canvas closes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseDecision {
    Save(PathBuf),
    Discard,
    Cancel,
}

/// All open canvases. Each one owns its figures and tool; at most one is
/// active and receives input.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    documents: Vec<OpenDocument>,
    active: Option<usize>,
    created: usize,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn documents(&self) -> &[OpenDocument] {
        &self.documents
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active(&self) -> Option<&OpenDocument> {
        self.documents.get(self.active?)
    }

    pub fn active_mut(&mut self) -> Option<&mut OpenDocument> {
        self.documents.get_mut(self.active?)
    }

    /// Makes `index` the active document. False if there is no such document.
    pub fn set_active(&mut self, index: usize) -> bool {
        if index >= self.documents.len() {
            return false;
        }
        self.active = Some(index);
        true
    }

    pub fn canvases_mut(&mut self) -> impl Iterator<Item = &mut Canvas> {
        self.documents.iter_mut().map(|doc| &mut doc.canvas)
    }

    fn insert(&mut self, canvas: Canvas, title: String, path: Option<PathBuf>) -> usize {
        self.documents.push(OpenDocument { canvas, title, path });
        let index = self.documents.len() - 1;
        self.active = Some(index);
        index
    }

    fn next_title(&mut self) -> String {
        self.created += 1;
        format!("Drawing {}", self.created)
    }

    /// Opens an empty `width` x `height` canvas and makes it active.
    pub fn new_document(
        &mut self,
        width: u32,
        height: u32,
        settings: &ToolSettings,
    ) -> CodecResult<usize> {
        let size = serialization::canvas_size(width, height)?;
        let title = self.next_title();
        info!("New canvas {} ({}x{})", title, width, height);
        Ok(self.insert(Canvas::new(size, settings.clone()), title, None))
    }

    /// Loads `path` into a new canvas. The workspace is unchanged on error.
    pub fn open(&mut self, path: &Path, settings: &ToolSettings) -> PersistenceResult<usize> {
        let doc = persistence::load_document(path)?;
        let canvas = Canvas::from_document(&doc, settings)?;
        let title = match path.file_stem() {
            Some(stem) => stem.to_string_lossy().into_owned(),
            None => self.next_title(),
        };
        Ok(self.insert(canvas, title, Some(path.to_path_buf())))
    }

    /// Writes document `index` to `path` and remembers the path.
    pub fn save(&mut self, index: usize, path: &Path) -> PersistenceResult<()> {
        let Some(doc) = self.documents.get_mut(index) else {
            return Ok(());
        };
        persistence::save_document(path, &doc.canvas.to_document())?;
        doc.path = Some(path.to_path_buf());
        Ok(())
    }

    /// Closes an empty canvas right away; a non-empty one needs a decision.
    /// `None` if there is no document at `index`.
    pub fn request_close(&mut self, index: usize) -> Option<CloseRequest> {
        let doc = self.documents.get(index)?;
        if doc.needs_save_prompt() {
            return Some(CloseRequest::NeedsConfirmation);
        }
        self.close(index);
        Some(CloseRequest::Closed)
    }

    /// Applies the answer to the save prompt. Returns whether the document
    /// was closed. A failed save keeps it open.
    pub fn resolve_close(&mut self, index: usize, decision: CloseDecision) -> PersistenceResult<bool> {
        if index >= self.documents.len() {
            return Ok(false);
        }
        match decision {
            CloseDecision::Cancel => return Ok(false),
            CloseDecision::Save(path) => self.save(index, &path)?,
            CloseDecision::Discard => {}
        }
        self.close(index);
        Ok(true)
    }

    fn close(&mut self, index: usize) {
        let doc = self.documents.remove(index);
        info!("Closed {}", doc.title);

        self.active = match self.active {
            _ if self.documents.is_empty() => None,
            Some(active) if active > index => Some(active - 1),
            Some(active) => Some(active.min(self.documents.len() - 1)),
            None => None,
        };
    }
}
