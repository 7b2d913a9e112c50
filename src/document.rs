use std::collections::HashSet;
use std::fmt;

use egui::{Pos2, Rect};
use log::debug;
use uuid::Uuid;

use crate::figure::{Drawable, Figure};

/// Stable identity of a figure inside one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FigureId(Uuid);

impl FigureId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FigureId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FigureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Entry {
    id: FigureId,
    figure: Figure,
}

/// Ordered figures of one document plus the current selection.
///
/// Insertion order is z-order: later figures paint on top and are hit first.
/// The selection only holds ids, so removing a figure also drops it from the
/// selection.
#[derive(Debug, Clone, Default)]
pub struct FigureCollection {
    entries: Vec<Entry>,
    selection: HashSet<FigureId>,
}

impl FigureCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends a figure on top of the others and returns its id.
    pub fn push(&mut self, mut figure: Figure) -> FigureId {
        figure.validate_edges();
        let id = FigureId::new();
        self.entries.push(Entry { id, figure });
        debug!("Added figure {} ({} total)", id, self.entries.len());
        id
    }

    pub fn get(&self, id: FigureId) -> Option<&Figure> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.figure)
    }

    pub fn get_mut(&mut self, id: FigureId) -> Option<&mut Figure> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .map(|e| &mut e.figure)
    }

    pub fn contains(&self, id: FigureId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn remove(&mut self, id: FigureId) -> Option<Figure> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        self.selection.remove(&id);
        Some(self.entries.remove(index).figure)
    }

    /// Figures in z-order, bottom first.
    pub fn iter(&self) -> impl Iterator<Item = (FigureId, &Figure)> {
        self.entries.iter().map(|e| (e.id, &e.figure))
    }

    pub fn figures(&self) -> impl Iterator<Item = &Figure> {
        self.entries.iter().map(|e| &e.figure)
    }

    pub fn for_each_in_order(&self, mut f: impl FnMut(FigureId, &Figure)) {
        for entry in &self.entries {
            f(entry.id, &entry.figure);
        }
    }

    /// Topmost figure containing `pos` within `tolerance`.
    pub fn topmost_at(&self, pos: Pos2, tolerance: f32) -> Option<FigureId> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.figure.contains_point(pos, tolerance))
            .map(|e| e.id)
    }

    /// Ids of all figures whose bounding box intersects `rect`, in z-order.
    pub fn ids_intersecting(&self, rect: Rect) -> Vec<FigureId> {
        self.entries
            .iter()
            .filter(|e| e.figure.bounds().intersects(rect))
            .map(|e| e.id)
            .collect()
    }

    pub fn is_selected(&self, id: FigureId) -> bool {
        self.selection.contains(&id)
    }

    pub fn selection(&self) -> &HashSet<FigureId> {
        &self.selection
    }

    /// Selected ids in z-order.
    pub fn selected_ids(&self) -> Vec<FigureId> {
        self.entries
            .iter()
            .filter(|e| self.selection.contains(&e.id))
            .map(|e| e.id)
            .collect()
    }

    pub fn selected_figures(&self) -> Vec<&Figure> {
        self.entries
            .iter()
            .filter(|e| self.selection.contains(&e.id))
            .map(|e| &e.figure)
            .collect()
    }

    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    /// Adds `id` to the selection. Unknown ids are ignored.
    pub fn select(&mut self, id: FigureId) {
        if self.contains(id) {
            self.selection.insert(id);
        }
    }

    pub fn set_selection(&mut self, ids: impl IntoIterator<Item = FigureId>) {
        self.selection.clear();
        for id in ids {
            self.select(id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Removes every selected figure and returns them in z-order.
    pub fn remove_selected(&mut self) -> Vec<Figure> {
        let (removed, kept): (Vec<Entry>, Vec<Entry>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|e| self.selection.contains(&e.id));
        self.entries = kept;
        self.selection.clear();
        removed.into_iter().map(|e| e.figure).collect()
    }

    pub fn validate_all(&mut self) {
        for entry in &mut self.entries {
            entry.figure.validate_edges();
        }
    }

    /// Swaps in a new set of figures, dropping the old ones and the selection.
    pub fn replace_all(&mut self, figures: impl IntoIterator<Item = Figure>) {
        self.entries.clear();
        self.selection.clear();
        for figure in figures {
            self.push(figure);
        }
    }
}
