use egui::{Modifiers, Vec2, pos2};
use vector_paint::error::CodecError;
use vector_paint::state::{CloseDecision, CloseRequest, PersistenceError, Workspace};
use vector_paint::tools::ToolSettings;

fn draw_box(workspace: &mut Workspace) {
    let canvas = &mut workspace.active_mut().unwrap().canvas;
    canvas.pointer_down(pos2(10.0, 10.0), Modifiers::NONE);
    canvas.pointer_move(pos2(60.0, 40.0));
    canvas.pointer_up(pos2(60.0, 40.0));
}

#[test]
fn test_new_documents_are_independent() {
    let settings = ToolSettings::default();
    let mut workspace = Workspace::new();
    assert!(workspace.is_empty());
    assert!(workspace.active().is_none());

    workspace.new_document(320, 240, &settings).unwrap();
    draw_box(&mut workspace);
    let second = workspace.new_document(100, 50, &settings).unwrap();

    assert_eq!(workspace.len(), 2);
    assert_eq!(workspace.active_index(), Some(second));

    let docs = workspace.documents();
    assert_eq!(docs[0].title(), "Drawing 1");
    assert_eq!(docs[1].title(), "Drawing 2");
    assert_eq!(docs[0].canvas.figures().len(), 1);
    assert!(docs[1].canvas.figures().is_empty());
    assert_eq!(docs[1].canvas.size(), Vec2::new(100.0, 50.0));
}

#[test]
fn test_zero_sized_canvas_is_rejected() {
    let settings = ToolSettings::default();
    let mut workspace = Workspace::new();
    workspace.new_document(320, 240, &settings).unwrap();

    let result = workspace.new_document(0, 240, &settings);
    assert!(matches!(
        result,
        Err(CodecError::InvalidCanvasSize { width: 0, height: 240 })
    ));
    assert_eq!(workspace.len(), 1);
    assert_eq!(workspace.active_index(), Some(0));
}

#[test]
fn test_empty_canvas_closes_without_prompt() {
    let mut workspace = Workspace::new();
    workspace.new_document(320, 240, &ToolSettings::default()).unwrap();

    assert_eq!(workspace.request_close(0), Some(CloseRequest::Closed));
    assert!(workspace.is_empty());
    assert_eq!(workspace.active_index(), None);
    assert_eq!(workspace.request_close(0), None);
}

#[test]
fn test_non_empty_canvas_asks_before_closing() {
    let mut workspace = Workspace::new();
    workspace.new_document(320, 240, &ToolSettings::default()).unwrap();
    draw_box(&mut workspace);

    assert_eq!(workspace.request_close(0), Some(CloseRequest::NeedsConfirmation));
    assert_eq!(workspace.len(), 1);

    assert!(!workspace.resolve_close(0, CloseDecision::Cancel).unwrap());
    assert_eq!(workspace.len(), 1);
    assert_eq!(workspace.documents()[0].canvas.figures().len(), 1);

    assert!(workspace.resolve_close(0, CloseDecision::Discard).unwrap());
    assert!(workspace.is_empty());
}

#[test]
fn test_save_on_close_writes_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sketch.json");
    let settings = ToolSettings::default();

    let mut workspace = Workspace::new();
    workspace.new_document(320, 240, &settings).unwrap();
    draw_box(&mut workspace);
    let drawn: Vec<_> = workspace.documents()[0]
        .canvas
        .figures()
        .figures()
        .cloned()
        .collect();

    assert_eq!(workspace.request_close(0), Some(CloseRequest::NeedsConfirmation));
    assert!(workspace.resolve_close(0, CloseDecision::Save(path.clone())).unwrap());
    assert!(workspace.is_empty());
    assert!(path.exists());

    let index = workspace.open(&path, &settings).unwrap();
    let doc = &workspace.documents()[index];
    assert_eq!(doc.title(), "sketch");
    assert_eq!(doc.path(), Some(path.as_path()));
    assert_eq!(doc.canvas.size(), Vec2::new(320.0, 240.0));
    let reloaded: Vec<_> = doc.canvas.figures().figures().cloned().collect();
    assert_eq!(reloaded, drawn);
}

#[test]
fn test_failed_save_keeps_the_document_open() {
    let dir = tempfile::tempdir().unwrap();
    // A directory cannot be written over as a file.
    let path = dir.path().to_path_buf();

    let mut workspace = Workspace::new();
    workspace.new_document(320, 240, &ToolSettings::default()).unwrap();
    draw_box(&mut workspace);

    let result = workspace.resolve_close(0, CloseDecision::Save(path));
    assert!(matches!(result, Err(PersistenceError::Io(_))));
    assert_eq!(workspace.len(), 1);
    assert!(workspace.documents()[0].path().is_none());
}

#[test]
fn test_failed_open_leaves_workspace_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let settings = ToolSettings::default();
    let mut workspace = Workspace::new();
    workspace.new_document(320, 240, &settings).unwrap();

    let result = workspace.open(&dir.path().join("absent.json"), &settings);
    assert!(matches!(result, Err(PersistenceError::Io(_))));
    assert_eq!(workspace.len(), 1);
    assert_eq!(workspace.active_index(), Some(0));
}

#[test]
fn test_closing_keeps_the_active_document() {
    let settings = ToolSettings::default();
    let mut workspace = Workspace::new();
    for _ in 0..3 {
        workspace.new_document(320, 240, &settings).unwrap();
    }
    assert!(workspace.set_active(2));
    assert!(!workspace.set_active(3));

    // Closing an earlier tab shifts the active one down.
    workspace.request_close(0);
    assert_eq!(workspace.active_index(), Some(1));
    assert_eq!(workspace.active().unwrap().title(), "Drawing 3");

    // Closing the active last tab falls back to the new last one.
    workspace.request_close(1);
    assert_eq!(workspace.active_index(), Some(0));
    assert_eq!(workspace.active().unwrap().title(), "Drawing 2");
}

#[test]
fn test_pen_changes_reach_every_canvas() {
    let settings = ToolSettings::default();
    let mut workspace = Workspace::new();
    workspace.new_document(320, 240, &settings).unwrap();
    workspace.new_document(320, 240, &settings).unwrap();

    for canvas in workspace.canvases_mut() {
        canvas.set_stroke_width(7);
    }
    assert!(
        workspace
            .documents()
            .iter()
            .all(|doc| doc.canvas.settings().stroke_width == 7)
    );
}
