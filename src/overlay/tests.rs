use super::*;
use crate::draw::SHAPE_ID_ATTR;
use crate::surface::{ElementKind, ElementMetrics, HeadlessHost, PageMetrics, SurfaceSize};
use std::collections::HashSet;

fn create_test_overlay() -> Overlay<HeadlessHost> {
    let options = DrawOptions {
        stroke_color: "red".to_string(),
        stroke_width: 3.0,
        ..DrawOptions::default()
    };
    let mut overlay = Overlay::new(HeadlessHost::default(), options, TextStyle::default())
        .with_ids(IdGenerator::with_session(42));
    overlay.activate();
    overlay
}

fn ev(x: f64, y: f64) -> PointerEvent {
    PointerEvent::new(x, y)
}

/// Press at `from`, move halfway, release at `to`.
fn drag(overlay: &mut Overlay<HeadlessHost>, from: (f64, f64), to: (f64, f64)) {
    overlay.pointer_down(ev(from.0, from.1));
    overlay.pointer_move(ev((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0));
    overlay.pointer_up(ev(to.0, to.1));
}

fn node_count(overlay: &Overlay<HeadlessHost>) -> usize {
    overlay.surface().map(|s| s.node_count()).unwrap_or(0)
}

fn attr(overlay: &Overlay<HeadlessHost>, node: NodeId, name: &str) -> Option<String> {
    overlay
        .surface()
        .and_then(|s| s.attr(node, name))
        .map(str::to_string)
}

/// Places a text region at (`x`, `y`), types `content` and blurs it.
fn place_text(overlay: &mut Overlay<HeadlessHost>, x: f64, y: f64, content: &str) -> Option<Shape> {
    overlay.set_tool(ToolKind::Text);
    overlay.pointer_down(ev(x, y));
    overlay.pointer_up(ev(x, y));
    overlay.text_input(content);
    overlay.focus_lost()
}

#[test]
fn test_activate_mounts_document_sized_surface() {
    let metrics = PageMetrics {
        body: ElementMetrics::uniform(1000.0, 3000.0),
        html: ElementMetrics::uniform(1200.0, 800.0),
    };
    let mut overlay = Overlay::new(
        HeadlessHost::new(metrics),
        DrawOptions::default(),
        TextStyle::default(),
    );
    assert!(!overlay.is_active());

    overlay.activate();
    overlay.activate();

    let surface = overlay.surface().expect("surface mounted");
    assert_eq!(
        surface.size(),
        SurfaceSize {
            width: 1200.0,
            height: 3000.0,
        }
    );
    assert_eq!(surface.pointer_events(), PointerEvents::None);
    assert_eq!(surface.style(surface.root(), "z-index"), Some("9999"));
    assert!(overlay.host().is_listening());
    assert_eq!(overlay.host().mounted_surfaces(), 1);
}

#[test]
fn test_short_gestures_leave_surface_unchanged() {
    let mut overlay = create_test_overlay();
    let short = [
        (ToolKind::Line, (4.0, 0.0)),
        (ToolKind::Arrow, (6.0, 6.0)),
        (ToolKind::MarkedLine, (0.0, 9.0)),
        (ToolKind::Rectangle, (100.0, 4.0)),
    ];

    for (kind, end) in short {
        overlay.set_tool(kind);
        let before = node_count(&overlay);
        overlay.pointer_down(ev(0.0, 0.0));
        overlay.pointer_move(ev(end.0 / 2.0, end.1 / 2.0));
        overlay.pointer_up(ev(end.0, end.1));
        assert_eq!(node_count(&overlay), before, "{kind} left nodes behind");
        assert_eq!(overlay.shape_count(), 0);
    }

    // A freehand press without movement records a single point.
    overlay.set_tool(ToolKind::Freehand);
    overlay.pointer_down(ev(5.0, 5.0));
    overlay.pointer_up(ev(5.0, 5.0));
    assert_eq!(node_count(&overlay), 0);
    assert_eq!(overlay.shape_count(), 0);
}

#[test]
fn test_long_gestures_commit_unique_shapes() {
    let mut overlay = create_test_overlay();
    let mut seen = HashSet::new();

    for (round, kind) in ToolKind::ALL
        .into_iter()
        .filter(|kind| *kind != ToolKind::Text)
        .cycle()
        .take(10)
        .enumerate()
    {
        overlay.set_tool(kind);
        let offset = round as f64 * 50.0;
        drag(&mut overlay, (offset, offset), (offset + 40.0, offset + 30.0));

        assert_eq!(overlay.shape_count(), round + 1);
        let shape = overlay.shapes().pop().unwrap();
        assert_eq!(shape.kind, kind.shape_kind());
        assert_eq!(attr(&overlay, shape.node, SHAPE_ID_ATTR), Some(shape.id.clone()));
        assert!(seen.insert(shape.id), "duplicate shape id");
    }
}

#[test]
fn test_freehand_path_ends_on_last_point() {
    let mut overlay = create_test_overlay();
    overlay.set_tool(ToolKind::Freehand);

    overlay.pointer_down(ev(0.0, 0.0));
    overlay.pointer_move(ev(10.0, 0.0));
    overlay.pointer_up(ev(10.0, 10.0));

    let shape = overlay.shapes().pop().unwrap();
    let data = attr(&overlay, shape.node, "d").unwrap();
    assert!(data.starts_with("M 0 0"));
    assert!(data.ends_with(", 10 10"));
}

#[test]
fn test_rectangle_drag_is_normalised() {
    let mut overlay = create_test_overlay();
    overlay.set_tool(ToolKind::Rectangle);
    drag(&mut overlay, (50.0, 50.0), (10.0, 10.0));

    let shape = overlay.shapes().pop().unwrap();
    assert_eq!(attr(&overlay, shape.node, "x").as_deref(), Some("10"));
    assert_eq!(attr(&overlay, shape.node, "y").as_deref(), Some("10"));
    assert_eq!(attr(&overlay, shape.node, "width").as_deref(), Some("40"));
    assert_eq!(attr(&overlay, shape.node, "height").as_deref(), Some("40"));
}

#[test]
fn test_clear_empties_collection_and_markup() {
    let mut overlay = create_test_overlay();
    drag(&mut overlay, (0.0, 0.0), (100.0, 0.0));
    overlay.set_tool(ToolKind::Arrow);
    drag(&mut overlay, (0.0, 50.0), (100.0, 50.0));
    assert_eq!(overlay.shape_count(), 2);

    overlay.clear();

    assert!(overlay.shapes().is_empty());
    assert!(!overlay.export_markup().contains(SHAPE_ID_ATTR));
}

#[test]
fn test_clear_keeps_draft_in_progress() {
    let mut overlay = create_test_overlay();
    overlay.pointer_down(ev(0.0, 0.0));
    overlay.pointer_move(ev(50.0, 0.0));
    overlay.clear();
    overlay.pointer_up(ev(60.0, 0.0));
    assert_eq!(overlay.shape_count(), 1);
}

#[test]
fn test_remove_unknown_shape_is_noop() {
    let mut overlay = create_test_overlay();
    drag(&mut overlay, (0.0, 0.0), (100.0, 0.0));
    let before = overlay.shapes();

    assert!(!overlay.remove_shape("shape-0-0"));
    assert_eq!(overlay.shapes(), before);

    assert!(overlay.remove_shape(&before[0].id));
    assert!(overlay.shapes().is_empty());
    assert!(!overlay.export_markup().contains(&before[0].id));
}

#[test]
fn test_options_are_captured_per_shape() {
    let mut overlay = create_test_overlay();
    drag(&mut overlay, (0.0, 0.0), (100.0, 0.0));
    overlay.set_options(&OptionsPatch::stroke_color("blue"));
    drag(&mut overlay, (0.0, 50.0), (100.0, 50.0));

    let shapes = overlay.shapes();
    assert_eq!(attr(&overlay, shapes[0].node, "stroke").as_deref(), Some("red"));
    assert_eq!(attr(&overlay, shapes[1].node, "stroke").as_deref(), Some("blue"));
    assert_eq!(overlay.options().stroke_color, "blue");
    assert_eq!(overlay.options().stroke_width, 3.0);
}

#[test]
fn test_invalid_option_values_are_ignored() {
    let mut overlay = create_test_overlay();
    overlay.set_options(&OptionsPatch {
        stroke_color: Some("not a colour;".to_string()),
        stroke_width: Some(-2.0),
        ..OptionsPatch::default()
    });
    assert_eq!(overlay.options().stroke_color, "red");
    assert_eq!(overlay.options().stroke_width, 3.0);
}

#[test]
fn test_marked_line_dot_follows_latest_colour() {
    let mut overlay = create_test_overlay();
    overlay.set_tool(ToolKind::MarkedLine);
    drag(&mut overlay, (0.0, 0.0), (100.0, 0.0));
    overlay.set_options(&OptionsPatch::stroke_color("green"));

    let surface = overlay.surface().unwrap();
    let marker = surface.find_by_id("stickend").unwrap();
    let dot = surface.first_child_of_kind(marker, ElementKind::Circle).unwrap();
    assert_eq!(surface.attr(dot, "fill"), Some("green"));
}

#[test]
fn test_text_commits_on_focus_loss() {
    let mut overlay = create_test_overlay();
    let shape = place_text(&mut overlay, 100.0, 100.0, "hello").expect("text committed");

    assert_eq!(shape.kind, ShapeKind::Text);
    assert_eq!(overlay.shapes(), vec![shape.clone()]);
    assert!(!overlay.is_editing_text());
    assert!(overlay.export_markup().contains(">hello</div>"));
}

#[test]
fn test_empty_text_leaves_surface_unchanged() {
    let mut overlay = create_test_overlay();
    let before = overlay.export_markup();

    assert!(place_text(&mut overlay, 100.0, 100.0, "").is_none());
    assert_eq!(overlay.shape_count(), 0);
    assert_eq!(overlay.export_markup(), before);
}

#[test]
fn test_pointer_up_never_commits_text() {
    let mut overlay = create_test_overlay();
    overlay.set_tool(ToolKind::Text);
    overlay.pointer_down(ev(10.0, 10.0));
    overlay.text_input("typed");
    assert_eq!(overlay.pointer_up(ev(10.0, 10.0)), Dispatch::Handled);
    assert_eq!(overlay.shape_count(), 0);
    assert!(overlay.is_editing_text());
}

#[test]
fn test_click_inside_editor_is_left_to_page() {
    let mut overlay = create_test_overlay();
    overlay.set_tool(ToolKind::Text);
    overlay.pointer_down(ev(100.0, 100.0));
    overlay.pointer_up(ev(100.0, 100.0));
    overlay.text_input("hello");

    assert_eq!(overlay.pointer_down(ev(150.0, 120.0)), Dispatch::Ignored);
    assert!(overlay.is_editing_text());
    assert_eq!(overlay.shape_count(), 0);
}

#[test]
fn test_click_elsewhere_commits_text_first() {
    let mut overlay = create_test_overlay();
    overlay.set_tool(ToolKind::Text);
    overlay.pointer_down(ev(100.0, 100.0));
    overlay.pointer_up(ev(100.0, 100.0));
    overlay.text_input("first");

    assert_eq!(overlay.pointer_down(ev(600.0, 600.0)), Dispatch::Handled);
    overlay.pointer_up(ev(600.0, 600.0));

    assert_eq!(overlay.shape_count(), 1);
    assert!(overlay.is_editing_text());
}

#[test]
fn test_committed_text_drags_with_any_tool() {
    let mut overlay = create_test_overlay();
    let shape = place_text(&mut overlay, 100.0, 100.0, "hello").unwrap();
    overlay.set_tool(ToolKind::Line);
    let nodes = node_count(&overlay);

    assert_eq!(overlay.pointer_down(ev(110.0, 105.0)), Dispatch::Handled);
    assert_eq!(
        overlay.surface().unwrap().pointer_events(),
        PointerEvents::All
    );
    overlay.pointer_move(ev(160.0, 205.0));
    assert_eq!(overlay.pointer_up(ev(210.0, 305.0)), Dispatch::Handled);

    assert_eq!(attr(&overlay, shape.node, "x").as_deref(), Some("150"));
    assert_eq!(attr(&overlay, shape.node, "y").as_deref(), Some("200"));
    assert_eq!(node_count(&overlay), nodes);
    assert_eq!(overlay.shape_count(), 1);
    assert_eq!(
        overlay.surface().unwrap().pointer_events(),
        PointerEvents::None
    );
}

#[test]
fn test_double_click_reopens_without_new_shape() {
    let mut overlay = create_test_overlay();
    let shape = place_text(&mut overlay, 100.0, 100.0, "hello").unwrap();

    assert_eq!(overlay.double_click(ev(120.0, 110.0)), Dispatch::Handled);
    assert!(overlay.is_editing_text());
    overlay.text_input("hello again");
    assert!(overlay.focus_lost().is_none());

    assert_eq!(overlay.shapes(), vec![shape]);
    assert!(overlay.export_markup().contains(">hello again</div>"));
    assert_eq!(overlay.double_click(ev(900.0, 900.0)), Dispatch::Ignored);
}

#[test]
fn test_deactivate_then_reactivate_starts_fresh() {
    let mut overlay = create_test_overlay();
    drag(&mut overlay, (0.0, 0.0), (100.0, 0.0));
    overlay.set_tool(ToolKind::Arrow);
    overlay.pointer_down(ev(0.0, 50.0));
    overlay.pointer_move(ev(80.0, 50.0));

    overlay.deactivate();
    assert!(!overlay.is_active());
    assert!(!overlay.is_drawing());
    assert!(!overlay.host().is_listening());
    assert_eq!(overlay.host().mounted_surfaces(), 0);
    assert_eq!(overlay.export_markup(), "");

    overlay.activate();
    assert!(overlay.shapes().is_empty());
    assert_eq!(node_count(&overlay), 0);
    assert!(!overlay.export_markup().contains(SHAPE_ID_ATTR));

    // The arrow gesture cut short by deactivation does not leak into the
    // new session.
    assert_eq!(overlay.pointer_up(ev(90.0, 50.0)), Dispatch::Ignored);
    assert_eq!(overlay.shape_count(), 0);
}

#[test]
fn test_coordinates_follow_scroll_per_event() {
    let mut overlay = create_test_overlay();
    overlay.pointer_down(ev(10.0, 10.0));
    overlay.host().scroll_to(0.0, 100.0);
    overlay.pointer_up(ev(10.0, 10.0));

    let shape = overlay.shapes().pop().unwrap();
    assert_eq!(attr(&overlay, shape.node, "y1").as_deref(), Some("10"));
    assert_eq!(attr(&overlay, shape.node, "y2").as_deref(), Some("110"));
}

#[test]
fn test_top_offset_shifts_surface_coordinates() {
    let config = Config::from_toml_str("[surface]\ntop_offset = 30.0").unwrap();
    let mut overlay = Overlay::from_config(HeadlessHost::default(), &config);
    overlay.activate();

    drag(&mut overlay, (0.0, 40.0), (50.0, 40.0));
    let shape = overlay.shapes().pop().unwrap();
    assert_eq!(attr(&overlay, shape.node, "y1").as_deref(), Some("10"));
}

#[test]
fn test_pointer_events_enabled_only_during_gesture() {
    let mut overlay = create_test_overlay();
    let mode = |overlay: &Overlay<HeadlessHost>| overlay.surface().unwrap().pointer_events();

    assert_eq!(mode(&overlay), PointerEvents::None);
    overlay.pointer_down(ev(0.0, 0.0));
    assert_eq!(mode(&overlay), PointerEvents::All);
    assert!(overlay.is_drawing());
    overlay.pointer_up(ev(1.0, 0.0));
    assert_eq!(mode(&overlay), PointerEvents::None);
}

#[test]
fn test_inactive_overlay_ignores_everything() {
    let mut overlay = Overlay::new(
        HeadlessHost::default(),
        DrawOptions::default(),
        TextStyle::default(),
    );
    assert_eq!(overlay.pointer_down(ev(0.0, 0.0)), Dispatch::Ignored);
    assert_eq!(overlay.pointer_move(ev(10.0, 0.0)), Dispatch::Ignored);
    assert_eq!(overlay.pointer_up(ev(20.0, 0.0)), Dispatch::Ignored);
    assert_eq!(overlay.text_input("x"), Dispatch::Ignored);
    assert!(overlay.focus_lost().is_none());
    assert!(!overlay.remove_shape("anything"));
    assert_eq!(overlay.export_markup(), "");
    overlay.deactivate();
}

#[test]
fn test_stray_events_are_ignored() {
    let mut overlay = create_test_overlay();
    assert_eq!(overlay.pointer_move(ev(5.0, 5.0)), Dispatch::Ignored);
    assert_eq!(overlay.pointer_up(ev(5.0, 5.0)), Dispatch::Ignored);
    assert_eq!(overlay.text_input("nobody listening"), Dispatch::Ignored);
}

#[test]
fn test_tool_switch_mid_gesture_applies_to_next_gesture() {
    let mut overlay = create_test_overlay();
    overlay.set_tool(ToolKind::Rectangle);
    overlay.pointer_down(ev(0.0, 0.0));
    overlay.set_tool(ToolKind::Line);
    overlay.pointer_move(ev(30.0, 30.0));
    overlay.pointer_up(ev(40.0, 40.0));

    drag(&mut overlay, (0.0, 100.0), (50.0, 100.0));

    let kinds: Vec<ShapeKind> = overlay.shapes().iter().map(|s| s.kind).collect();
    assert_eq!(kinds, vec![ShapeKind::Rectangle, ShapeKind::Line]);
}

#[test]
fn test_unknown_tool_name_keeps_selection() {
    let mut overlay = create_test_overlay();
    overlay.set_tool(ToolKind::Arrow);
    assert!(!overlay.set_tool_by_name("ellipse"));
    assert_eq!(overlay.active_tool(), ToolKind::Arrow);
    assert!(overlay.set_tool_by_name("pencil"));
    assert_eq!(overlay.active_tool(), ToolKind::Freehand);
}

#[test]
fn test_shape_limit_discards_extra_commits() {
    let config = Config::from_toml_str("[drawing]\nmax_shapes = 1").unwrap();
    let mut overlay = Overlay::from_config(HeadlessHost::default(), &config);
    overlay.activate();

    drag(&mut overlay, (0.0, 0.0), (100.0, 0.0));
    let nodes = node_count(&overlay);
    drag(&mut overlay, (0.0, 50.0), (100.0, 50.0));

    assert_eq!(overlay.shape_count(), 1);
    assert_eq!(node_count(&overlay), nodes);
}

#[test]
fn test_config_selects_starting_tool_and_style() {
    let config = Config::from_toml_str(
        r##"
        [drawing]
        default_tool = "rect"
        stroke_color = "orange"
        fill_color = "#00000080"
        "##,
    )
    .unwrap();
    let mut overlay = Overlay::from_config(HeadlessHost::default(), &config);
    overlay.activate();
    assert_eq!(overlay.active_tool(), ToolKind::Rectangle);

    drag(&mut overlay, (0.0, 0.0), (20.0, 20.0));
    let shape = overlay.shapes().pop().unwrap();
    assert_eq!(attr(&overlay, shape.node, "stroke").as_deref(), Some("orange"));
    assert_eq!(attr(&overlay, shape.node, "fill").as_deref(), Some("#00000080"));
}

/// Draws three rectangles in the current session and returns their nodes.
fn draw_rects(overlay: &mut Overlay<HeadlessHost>) -> Vec<NodeId> {
    overlay.set_tool(ToolKind::Rectangle);
    for offset in [0.0, 100.0, 200.0] {
        drag(overlay, (offset, 300.0), (offset + 50.0, 350.0));
    }
    overlay.shapes().iter().map(|shape| shape.node).collect()
}

#[test]
fn test_reactivation_forgets_previous_arrowhead() {
    let mut overlay = create_test_overlay();
    overlay.set_tool(ToolKind::Arrow);
    drag(&mut overlay, (0.0, 0.0), (100.0, 100.0));

    overlay.deactivate();
    overlay.activate();
    let rects = draw_rects(&mut overlay);
    overlay.set_options(&OptionsPatch::stroke_color("blue"));

    let fills: Vec<Option<String>> = rects.iter().map(|&n| attr(&overlay, n, "fill")).collect();
    assert_eq!(fills, vec![Some("transparent".to_string()); 3]);

    // A fresh arrow in the new session is the one that gets recoloured.
    overlay.set_tool(ToolKind::Arrow);
    drag(&mut overlay, (0.0, 0.0), (100.0, 100.0));
    overlay.set_options(&OptionsPatch::stroke_color("green"));
    let line = overlay.shapes().pop().unwrap().node;
    let marker_ref = attr(&overlay, line, "marker-end").unwrap();
    let marker_id = marker_ref
        .trim_start_matches("url(#")
        .trim_end_matches(')')
        .to_string();
    let surface = overlay.surface().unwrap();
    let marker = surface.find_by_id(&marker_id).unwrap();
    let head = surface.first_child_of_kind(marker, ElementKind::Polygon).unwrap();
    assert_eq!(surface.attr(head, "fill"), Some("green"));
}

#[test]
fn test_reactivation_starts_without_marked_line_dot() {
    let mut overlay = create_test_overlay();
    overlay.set_tool(ToolKind::MarkedLine);
    drag(&mut overlay, (0.0, 0.0), (100.0, 0.0));

    overlay.deactivate();
    overlay.activate();
    let rects = draw_rects(&mut overlay);
    overlay.set_options(&OptionsPatch::stroke_color("green"));

    assert!(overlay.surface().unwrap().find_by_id("stickend").is_none());
    for node in rects {
        assert_eq!(attr(&overlay, node, "fill").as_deref(), Some("transparent"));
    }

    overlay.set_tool(ToolKind::MarkedLine);
    drag(&mut overlay, (0.0, 0.0), (100.0, 0.0));
    let surface = overlay.surface().unwrap();
    let marker = surface.find_by_id("stickend").unwrap();
    let dot = surface.first_child_of_kind(marker, ElementKind::Circle).unwrap();
    assert_eq!(surface.attr(dot, "fill"), Some("green"));
}

#[test]
fn test_reactivation_forgets_open_text_editor() {
    let mut overlay = create_test_overlay();
    overlay.set_tool(ToolKind::Text);
    overlay.pointer_down(ev(10.0, 10.0));
    overlay.pointer_up(ev(10.0, 10.0));
    overlay.text_input("unfinished");
    assert!(overlay.is_editing_text());

    overlay.deactivate();
    overlay.activate();
    assert!(!overlay.is_editing_text());
    assert_eq!(overlay.text_input("stray"), Dispatch::Ignored);

    let rects = draw_rects(&mut overlay);
    overlay.set_options(&OptionsPatch::stroke_color("blue"));

    let surface = overlay.surface().unwrap();
    for node in rects {
        assert_eq!(surface.style(node, "color"), None);
        assert_eq!(surface.style(node, "border"), None);
        assert_eq!(surface.attr(node, "fill"), Some("transparent"));
    }
}
