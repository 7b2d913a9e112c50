use egui::{Color32, Modifiers, Pos2, Vec2, pos2};
use vector_paint::clipboard::{Clipboard, MemoryClipboard};
use vector_paint::figure::{Drawable, Figure, FigureKind, Style, factory};
use vector_paint::serialization;
use vector_paint::state::Canvas;
use vector_paint::tools::{ToolEvent, ToolMode, ToolSettings};

// Helper to run a full press-drag-release gesture
fn drag(canvas: &mut Canvas, path: &[Pos2], modifiers: Modifiers) -> Vec<ToolEvent> {
    let mut events = Vec::new();
    let (first, rest) = path.split_first().expect("gesture needs a point");
    events.extend(canvas.pointer_down(*first, modifiers));
    for p in rest {
        events.extend(canvas.pointer_move(*p));
    }
    events.extend(canvas.pointer_up(*rest.last().unwrap_or(first)));
    events
}

fn click(canvas: &mut Canvas, pos: Pos2, modifiers: Modifiers) -> Vec<ToolEvent> {
    drag(canvas, &[pos], modifiers)
}

fn canvas_with_filled_boxes() -> Canvas {
    let mut settings = ToolSettings::default();
    settings.fill_enabled = true;
    let mut canvas = Canvas::new(Vec2::new(400.0, 300.0), settings);
    drag(&mut canvas, &[pos2(10.0, 10.0), pos2(50.0, 50.0)], Modifiers::NONE);
    drag(&mut canvas, &[pos2(100.0, 100.0), pos2(150.0, 140.0)], Modifiers::NONE);
    canvas.set_mode(ToolMode::Select);
    canvas
}

#[test]
fn test_draw_mode_commits_each_box_gesture() {
    let canvas = canvas_with_filled_boxes();
    assert_eq!(canvas.figures().len(), 2);

    let kinds: Vec<_> = canvas.figures().figures().map(|f| f.kind()).collect();
    assert_eq!(kinds, vec![FigureKind::Rectangle, FigureKind::Rectangle]);
}

#[test]
fn test_curve_commit_threshold() {
    let mut canvas = Canvas::default();
    canvas.set_active_figure_kind(FigureKind::CurveLine);

    let events = drag(&mut canvas, &[pos2(0.0, 0.0), pos2(20.0, 0.0)], Modifiers::NONE);
    assert!(events.is_empty());
    assert!(canvas.figures().is_empty());

    let path = [pos2(0.0, 0.0), pos2(20.0, 0.0), pos2(40.0, 20.0), pos2(60.0, 0.0)];
    let events = drag(&mut canvas, &path, Modifiers::NONE);
    assert_eq!(events.len(), 1);

    let (_, figure) = canvas.figures().iter().next().unwrap();
    let Figure::Poly(curve) = figure else {
        panic!("expected a curve, got {figure:?}");
    };
    assert_eq!(curve.points(), &path);
}

#[test]
fn test_mode_switch_clears_selection() {
    let mut canvas = canvas_with_filled_boxes();
    click(&mut canvas, pos2(20.0, 20.0), Modifiers::NONE);
    assert_eq!(canvas.selection().len(), 1);

    canvas.set_mode(ToolMode::Draw);
    assert!(canvas.selection().is_empty());
    assert_eq!(canvas.mode(), ToolMode::Draw);
}

#[test]
fn test_click_selection_replace_and_extend() {
    let mut canvas = canvas_with_filled_boxes();
    let ids: Vec<_> = canvas.figures().iter().map(|(id, _)| id).collect();

    click(&mut canvas, pos2(20.0, 20.0), Modifiers::NONE);
    assert!(canvas.selection().contains(&ids[0]));

    click(&mut canvas, pos2(120.0, 120.0), Modifiers::NONE);
    assert_eq!(canvas.selection().len(), 1);
    assert!(canvas.selection().contains(&ids[1]));

    click(&mut canvas, pos2(20.0, 20.0), Modifiers::SHIFT);
    assert_eq!(canvas.selection().len(), 2);

    // Clicking empty space starts a marquee and drops the selection.
    click(&mut canvas, pos2(300.0, 250.0), Modifiers::NONE);
    assert!(canvas.selection().is_empty());
}

#[test]
fn test_dragging_a_multi_selection_moves_it_together() {
    let mut canvas = canvas_with_filled_boxes();
    drag(&mut canvas, &[pos2(5.0, 5.0), pos2(200.0, 200.0)], Modifiers::NONE);
    assert_eq!(canvas.selection().len(), 2);

    drag(&mut canvas, &[pos2(30.0, 30.0), pos2(40.0, 35.0), pos2(50.0, 40.0)], Modifiers::NONE);

    let tops: Vec<_> = canvas.figures().figures().map(|f| f.top_point()).collect();
    assert_eq!(tops, vec![pos2(30.0, 20.0), pos2(120.0, 110.0)]);
}

#[test]
fn test_resize_through_handle() {
    let mut canvas = canvas_with_filled_boxes();
    click(&mut canvas, pos2(20.0, 20.0), Modifiers::NONE);

    // Drag the bottom-right handle of the first box.
    drag(&mut canvas, &[pos2(50.0, 50.0), pos2(70.0, 80.0)], Modifiers::NONE);

    let (_, figure) = canvas.figures().iter().next().unwrap();
    assert_eq!(figure.top_point(), pos2(10.0, 10.0));
    assert_eq!(figure.bot_point(), pos2(70.0, 80.0));
}

#[test]
fn test_delete_removes_selection() {
    let mut canvas = canvas_with_filled_boxes();
    click(&mut canvas, pos2(120.0, 120.0), Modifiers::NONE);
    assert_eq!(canvas.delete_selected(), 1);
    assert_eq!(canvas.figures().len(), 1);
    assert!(canvas.selection().is_empty());
}

#[test]
fn test_copy_paste_places_first_figure_at_pointer() {
    let mut canvas = canvas_with_filled_boxes();
    drag(&mut canvas, &[pos2(5.0, 5.0), pos2(200.0, 200.0)], Modifiers::NONE);

    let mut clipboard = MemoryClipboard::new();
    assert!(canvas.copy_selection(&mut clipboard));

    canvas.pointer_move(pos2(200.0, 150.0));
    let pasted = canvas.paste(&clipboard);
    assert_eq!(pasted.len(), 2);
    assert_eq!(canvas.figures().len(), 4);

    let first = canvas.figures().get(pasted[0]).unwrap();
    let second = canvas.figures().get(pasted[1]).unwrap();
    assert_eq!(first.top_point(), pos2(200.0, 150.0));
    // Original offset between the two boxes was (90, 90).
    assert_eq!(second.top_point(), pos2(290.0, 240.0));

    let selected: Vec<_> = canvas.figures().selected_ids();
    assert_eq!(selected, pasted);
}

#[test]
fn test_cut_removes_and_paste_restores() {
    let mut canvas = canvas_with_filled_boxes();
    click(&mut canvas, pos2(20.0, 20.0), Modifiers::NONE);

    let mut clipboard = MemoryClipboard::new();
    assert!(canvas.cut_selection(&mut clipboard));
    assert_eq!(canvas.figures().len(), 1);

    canvas.pointer_move(pos2(10.0, 10.0));
    assert_eq!(canvas.paste(&clipboard).len(), 1);
    assert_eq!(canvas.figures().len(), 2);
}

#[test]
fn test_bad_clipboard_is_a_noop_paste() {
    let mut canvas = canvas_with_filled_boxes();

    let garbage = MemoryClipboard::with_text("not json at all");
    assert!(canvas.paste(&garbage).is_empty());

    // One good record followed by a record with an unknown tag.
    let good = factory::create_rectangle(pos2(0.0, 0.0), pos2(5.0, 5.0), Style::default());
    let mut payload: serde_json::Value =
        serde_json::from_str(&serialization::encode_clipboard([&good]).unwrap()).unwrap();
    let mut bad = payload[0].clone();
    bad["type"] = "hexagon".into();
    payload.as_array_mut().unwrap().push(bad);
    let partial = MemoryClipboard::with_text(payload.to_string());
    assert!(canvas.paste(&partial).is_empty());

    let mut empty = MemoryClipboard::new();
    assert!(canvas.paste(&empty).is_empty());
    empty.set_text(String::new());
    assert!(canvas.paste(&empty).is_empty());

    assert_eq!(canvas.figures().len(), 2);
}

#[test]
fn test_edit_mode_hands_topmost_figure_to_editor() {
    let mut canvas = canvas_with_filled_boxes();
    canvas.set_mode(ToolMode::Edit);
    let second = canvas.figures().iter().nth(1).map(|(id, _)| id).unwrap();

    let events = click(&mut canvas, pos2(120.0, 120.0), Modifiers::NONE);
    assert_eq!(events, vec![ToolEvent::EditRequested(second)]);
    assert_eq!(canvas.selection().len(), 1);

    let mut props = canvas.properties(second).unwrap();
    props.style.stroke_width = 7;
    assert!(canvas.apply_properties(second, props));
    assert_eq!(canvas.figures().get(second).unwrap().style().stroke_width, 7);

    assert!(click(&mut canvas, pos2(390.0, 290.0), Modifiers::NONE).is_empty());
    assert!(canvas.selection().is_empty());
}

#[test]
fn test_text_entry_hand_back() {
    let mut canvas = Canvas::default();
    canvas.set_active_figure_kind(FigureKind::TextBox);
    let events = click(&mut canvas, pos2(30.0, 30.0), Modifiers::NONE);
    let [ToolEvent::TextEntryRequested(id)] = events[..] else {
        panic!("expected a text entry request, got {events:?}");
    };
    assert!(canvas.set_text(id, "Hello"));
    assert_eq!(canvas.properties(id).unwrap().text.as_deref(), Some("Hello"));
}

#[test]
fn test_dragging_a_curve_vertex_reshapes_it() {
    let mut canvas = Canvas::default();
    canvas.set_active_figure_kind(FigureKind::CurveLine);
    let path = [pos2(20.0, 20.0), pos2(60.0, 80.0), pos2(100.0, 20.0)];
    drag(&mut canvas, &path, Modifiers::NONE);
    assert_eq!(canvas.figures().len(), 1);

    canvas.set_mode(ToolMode::Select);
    click(&mut canvas, pos2(20.0, 20.0), Modifiers::NONE);
    assert_eq!(canvas.selection().len(), 1);

    // The middle vertex is a handle of the selected curve.
    drag(&mut canvas, &[pos2(60.0, 80.0), pos2(60.0, 120.0)], Modifiers::NONE);

    let (_, figure) = canvas.figures().iter().next().unwrap();
    let Figure::Poly(curve) = figure else {
        panic!("expected a curve, got {figure:?}");
    };
    assert_eq!(
        curve.points(),
        &[pos2(20.0, 20.0), pos2(60.0, 120.0), pos2(100.0, 20.0)]
    );
    assert_eq!(figure.bot_point(), pos2(100.0, 120.0));
}

#[test]
fn test_box_handle_flips_past_the_opposite_edge() {
    let mut canvas = canvas_with_filled_boxes();
    click(&mut canvas, pos2(20.0, 20.0), Modifiers::NONE);

    // Left handle of (10,10)-(50,50), dragged across the right edge and on.
    let path = [pos2(10.0, 30.0), pos2(70.0, 30.0), pos2(90.0, 30.0)];
    drag(&mut canvas, &path, Modifiers::NONE);

    let (_, figure) = canvas.figures().iter().next().unwrap();
    assert_eq!(figure.top_point(), pos2(50.0, 10.0));
    assert_eq!(figure.bot_point(), pos2(90.0, 50.0));
}

#[test]
fn test_pen_changes_outside_draw_mode_reach_the_next_draw_tool() {
    let mut canvas = Canvas::default();
    canvas.set_mode(ToolMode::Select);
    canvas.set_stroke_color(Color32::RED);
    canvas.set_stroke_width(6);
    assert_eq!(canvas.settings().stroke_color, Color32::RED);

    canvas.set_mode(ToolMode::Draw);
    drag(&mut canvas, &[pos2(10.0, 10.0), pos2(60.0, 40.0)], Modifiers::NONE);

    let (_, figure) = canvas.figures().iter().next().unwrap();
    assert_eq!(figure.style().stroke_color, Color32::RED);
    assert_eq!(figure.style().stroke_width, 6);
}

#[test]
fn test_apply_settings_replaces_the_pen() {
    let mut canvas = Canvas::default();
    let mut settings = ToolSettings::default();
    settings.figure_kind = FigureKind::Ellipse;
    settings.stroke_width = 0;
    settings.fill_enabled = true;
    canvas.apply_settings(settings);
    assert_eq!(canvas.settings().stroke_width, 1);

    drag(&mut canvas, &[pos2(10.0, 10.0), pos2(60.0, 40.0)], Modifiers::NONE);

    let (_, figure) = canvas.figures().iter().next().unwrap();
    assert_eq!(figure.kind(), FigureKind::Ellipse);
    assert_eq!(figure.style().stroke_width, 1);
    assert!(figure.style().is_filling);
}
