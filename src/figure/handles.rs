use egui::{CursorIcon, Pos2, Rect};

/// One of the eight resize handles of a box-shaped figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoxHandle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl BoxHandle {
    pub const ALL: [BoxHandle; 8] = [
        BoxHandle::TopLeft,
        BoxHandle::Top,
        BoxHandle::TopRight,
        BoxHandle::Right,
        BoxHandle::BottomRight,
        BoxHandle::Bottom,
        BoxHandle::BottomLeft,
        BoxHandle::Left,
    ];

    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            BoxHandle::TopLeft | BoxHandle::BottomRight => CursorIcon::ResizeNwSe,
            BoxHandle::TopRight | BoxHandle::BottomLeft => CursorIcon::ResizeNeSw,
            BoxHandle::Top | BoxHandle::Bottom => CursorIcon::ResizeVertical,
            BoxHandle::Left | BoxHandle::Right => CursorIcon::ResizeHorizontal,
        }
    }

    /// Where this handle sits on `rect`.
    pub fn position(&self, rect: Rect) -> Pos2 {
        match self {
            BoxHandle::TopLeft => rect.left_top(),
            BoxHandle::Top => rect.center_top(),
            BoxHandle::TopRight => rect.right_top(),
            BoxHandle::Right => rect.right_center(),
            BoxHandle::BottomRight => rect.right_bottom(),
            BoxHandle::Bottom => rect.center_bottom(),
            BoxHandle::BottomLeft => rect.left_bottom(),
            BoxHandle::Left => rect.left_center(),
        }
    }

    /// Which box edges this handle drags: `(left, right, top, bottom)`.
    pub(crate) fn edges(&self) -> (bool, bool, bool, bool) {
        match self {
            BoxHandle::TopLeft => (true, false, true, false),
            BoxHandle::Top => (false, false, true, false),
            BoxHandle::TopRight => (false, true, true, false),
            BoxHandle::Right => (false, true, false, false),
            BoxHandle::BottomRight => (false, true, false, true),
            BoxHandle::Bottom => (false, false, false, true),
            BoxHandle::BottomLeft => (true, false, false, true),
            BoxHandle::Left => (true, false, false, false),
        }
    }

    /// The handle that ends up under the pointer after the box was
    /// mirrored horizontally and/or vertically during a drag.
    pub fn flipped(self, horizontal: bool, vertical: bool) -> Self {
        let handle = if horizontal { self.mirror_x() } else { self };
        if vertical { handle.mirror_y() } else { handle }
    }

    fn mirror_x(self) -> Self {
        match self {
            BoxHandle::TopLeft => BoxHandle::TopRight,
            BoxHandle::TopRight => BoxHandle::TopLeft,
            BoxHandle::Left => BoxHandle::Right,
            BoxHandle::Right => BoxHandle::Left,
            BoxHandle::BottomLeft => BoxHandle::BottomRight,
            BoxHandle::BottomRight => BoxHandle::BottomLeft,
            other => other,
        }
    }

    fn mirror_y(self) -> Self {
        match self {
            BoxHandle::TopLeft => BoxHandle::BottomLeft,
            BoxHandle::BottomLeft => BoxHandle::TopLeft,
            BoxHandle::Top => BoxHandle::Bottom,
            BoxHandle::Bottom => BoxHandle::Top,
            BoxHandle::TopRight => BoxHandle::BottomRight,
            BoxHandle::BottomRight => BoxHandle::TopRight,
            other => other,
        }
    }
}

/// A resize handle of any figure. Poly figures expose one handle per vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleId {
    Box(BoxHandle),
    Vertex(usize),
}

impl HandleId {
    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            HandleId::Box(handle) => handle.cursor_icon(),
            HandleId::Vertex(_) => CursorIcon::Crosshair,
        }
    }
}

/// Handle positions of a box-shaped figure.
pub(crate) fn box_handles(rect: Rect) -> Vec<(HandleId, Pos2)> {
    BoxHandle::ALL
        .iter()
        .map(|handle| (HandleId::Box(*handle), handle.position(rect)))
        .collect()
}

/// Moves the edges grabbed by `handle` of the box `top..bot` to `pos`.
///
/// Re-normalizes the corners and returns the handle now under the pointer.
pub(crate) fn drag_box_edges(top: &mut Pos2, bot: &mut Pos2, handle: BoxHandle, pos: Pos2) -> BoxHandle {
    let (left, right, upper, lower) = handle.edges();
    if left {
        top.x = pos.x;
    }
    if right {
        bot.x = pos.x;
    }
    if upper {
        top.y = pos.y;
    }
    if lower {
        bot.y = pos.y;
    }

    let flip_x = top.x > bot.x;
    let flip_y = top.y > bot.y;
    let (min, max) = (top.min(*bot), top.max(*bot));
    *top = min;
    *bot = max;

    handle.flipped(flip_x, flip_y)
}
