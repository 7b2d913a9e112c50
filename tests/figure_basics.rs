use egui::{Color32, Pos2, Vec2, pos2};
use vector_paint::figure::{
    BoxHandle, Drawable, Figure, FigureKind, FigureProperties, FontSpec, HandleId, Style, factory,
};

fn style(filled: bool) -> Style {
    Style {
        stroke_width: 3,
        stroke_color: Color32::RED,
        fill_color: Color32::YELLOW,
        is_filling: filled,
    }
}

fn assert_edges_ordered(figure: &Figure) {
    let (top, bot) = (figure.top_point(), figure.bot_point());
    assert!(top.x <= bot.x && top.y <= bot.y, "inverted bounds {top:?} {bot:?}");
}

#[test]
fn test_edge_invariant_survives_moves_and_resizes() {
    let mut figures = vec![
        factory::create_rectangle(pos2(10.0, 10.0), pos2(60.0, 40.0), style(false)),
        factory::create_ellipse(pos2(80.0, 20.0), pos2(20.0, 90.0), style(true)),
        factory::create_text(pos2(5.0, 5.0), pos2(50.0, 25.0), "hi", FontSpec::default(), style(false)),
        factory::create_curve(vec![pos2(0.0, 50.0), pos2(30.0, 10.0), pos2(70.0, 60.0)], style(false)),
    ];

    let drags = [
        pos2(200.0, -30.0),
        pos2(-15.0, 300.0),
        pos2(35.0, 35.0),
        pos2(0.0, 0.0),
    ];
    for figure in &mut figures {
        for (i, target) in drags.iter().enumerate() {
            let handles = figure.resize_handles();
            let (handle, _) = handles[i % handles.len()];
            figure.drag_handle(handle, *target);
            figure.validate_edges();
            assert_edges_ordered(figure);

            figure.translate(Vec2::new(-7.0, 4.0));
            figure.validate_edges();
            assert_edges_ordered(figure);
        }
    }
}

#[test]
fn test_can_move_respects_canvas_bounds() {
    let canvas = Vec2::new(100.0, 100.0);
    let figure = factory::create_rectangle(pos2(10.0, 10.0), pos2(90.0, 50.0), style(false));

    assert!(figure.can_move(Vec2::new(9.0, 0.0), canvas));
    // 90 + 10 lands exactly on the excluded right edge.
    assert!(!figure.can_move(Vec2::new(10.0, 0.0), canvas));
    assert!(figure.can_move(Vec2::new(-10.0, -10.0), canvas));
    assert!(!figure.can_move(Vec2::new(0.0, -10.5), canvas));
}

#[test]
fn test_poly_hit_test_uses_nearest_vertex() {
    let curve = factory::create_curve(
        vec![pos2(0.0, 0.0), pos2(50.0, 50.0), pos2(100.0, 0.0)],
        style(false),
    );
    assert!(curve.contains_point(pos2(53.0, 46.0), 5.0));
    assert!(!curve.contains_point(pos2(25.0, 25.0), 5.0));
    assert!(curve.contains_point(pos2(100.0, 5.0), 5.0));
    assert!(!curve.contains_point(pos2(100.0, 5.1), 5.0));
}

#[test]
fn test_filled_box_hit_test() {
    let rect = factory::create_rectangle(pos2(10.0, 10.0), pos2(30.0, 30.0), style(true));
    assert!(rect.contains_point(pos2(20.0, 20.0), 2.0));
    assert!(rect.contains_point(pos2(10.0, 30.0), 2.0));
    assert!(!rect.contains_point(pos2(33.0, 20.0), 2.0));
}

#[test]
fn test_box_has_eight_handles_and_poly_one_per_vertex() {
    let rect = factory::create_rectangle(pos2(0.0, 0.0), pos2(10.0, 10.0), style(false));
    let line = factory::create_line(pos2(0.0, 0.0), pos2(10.0, 10.0), style(false));

    assert_eq!(rect.resize_handles().len(), 8);
    assert_eq!(
        rect.handle_at(pos2(10.0, 5.0), 2.0),
        Some(HandleId::Box(BoxHandle::Right))
    );
    assert_eq!(
        line.resize_handles(),
        vec![(HandleId::Vertex(0), pos2(0.0, 0.0)), (HandleId::Vertex(1), pos2(10.0, 10.0))]
    );
}

#[test]
fn test_properties_apply_to_text_only_where_relevant() {
    let mut text = factory::create_text(pos2(0.0, 0.0), pos2(40.0, 20.0), "", FontSpec::default(), style(false));
    let mut rect = factory::create_rectangle(pos2(0.0, 0.0), pos2(40.0, 20.0), style(false));

    let props = FigureProperties {
        style: Style {
            stroke_width: 0,
            ..style(true)
        },
        text: Some("note".to_owned()),
        font: Some(FontSpec::new("Arial", 18.0)),
    };
    text.apply_properties(props.clone());
    rect.apply_properties(props);

    let text_props = text.properties();
    assert_eq!(text_props.text.as_deref(), Some("note"));
    assert_eq!(text_props.font, Some(FontSpec::new("Arial", 18.0)));
    assert_eq!(text_props.style.stroke_width, 1);

    let rect_props = rect.properties();
    assert!(rect_props.style.is_filling);
    assert_eq!(rect_props.text, None);
    assert_eq!(rect.kind(), FigureKind::Rectangle);
}

#[test]
fn test_translate_moves_every_point() {
    let mut line = factory::create_line(pos2(1.0, 2.0), pos2(5.0, 9.0), style(false));
    line.translate(Vec2::new(10.0, -1.0));
    assert_eq!(line.owned_points(), vec![pos2(11.0, 1.0), pos2(15.0, 8.0)]);
    assert_eq!(line.top_point(), pos2(11.0, 1.0));
    assert_eq!(line.bot_point(), Pos2::new(15.0, 8.0));
}
