use affviz::desc::parse_viz_json;
use affviz::grid::GridSpec;
use affviz::style::StyleSheet;
use affviz::svg::SvgSurface;
use affviz::viz::Visualizer;

fn svg_viz() -> Visualizer<SvgSurface> {
    Visualizer::new(
        GridSpec::default(),
        StyleSheet::default(),
        SvgSurface::default().with_id("original-grid"),
        SvgSurface::default().with_id("transformed-grid"),
    )
}

fn count(doc: &str, needle: &str) -> usize {
    doc.matches(needle).count()
}

#[test]
fn reference_pane_markup() {
    let viz = svg_viz();
    let doc = viz.reference().to_svg_string();

    assert_eq!(count(&doc, "<line "), 10);
    assert_eq!(count(&doc, r#"class="axis""#), 2);
    assert_eq!(count(&doc, r#"class="grid-line""#), 8);
    assert_eq!(count(&doc, "<polygon "), 1);
    assert!(doc.contains(r#"<polygon points="0,0 1,0 1,1 0,1" class="unit-square"/>"#));
    assert!(doc.contains(r#"<line x1="0" y1="-2" x2="0" y2="2" class="axis"/>"#));
    assert!(doc.contains(r#"<line x1="-2" y1="0" x2="2" y2="0" class="axis"/>"#));
}

#[test]
fn style_comes_before_elements_and_square_is_last() {
    let viz = svg_viz();
    let doc = viz.transformed().to_svg_string();

    let style_at = doc.find("<style>").unwrap();
    let first_line = doc.find("<line ").unwrap();
    let last_axis = doc.rfind(r#"class="axis""#).unwrap();
    let first_axis = doc.find(r#"class="axis""#).unwrap();
    let last_grid = doc.rfind(r#"class="grid-line""#).unwrap();
    let square = doc.find("<polygon ").unwrap();

    assert!(style_at < first_line);
    assert!(last_grid < first_axis);
    assert!(last_axis < square);
}

#[test]
fn scale_edit_redraws_square_and_keeps_reference() {
    let mut viz = svg_viz();
    let reference_before = viz.reference().to_svg_string();

    viz.on_input_changed(&["2", "0", "0", "2", "0", "0"]);
    let doc = viz.transformed().to_svg_string();
    assert!(doc.contains(r#"<polygon points="0,0 2,0 2,2 0,2" class="unit-square"/>"#));
    assert_eq!(count(&doc, "<polygon "), 1);
    assert_eq!(count(&doc, "<style>"), 1);

    viz.on_input_changed(&["1", "0", "0", "1", "0.5", "-1"]);
    let doc = viz.transformed().to_svg_string();
    assert!(doc.contains(r#"<polygon points="0.5,-1 1.5,-1 1.5,0 0.5,0" class="unit-square"/>"#));
    assert!(!doc.contains("2,2"));
    assert_eq!(count(&doc, "<line "), 10);

    assert_eq!(viz.reference().to_svg_string(), reference_before);
}

#[test]
fn rotation_prints_without_negative_zero() {
    let mut viz = svg_viz();
    viz.on_input_changed(&["0", "1", "-1", "0", "0", "0"]);
    let doc = viz.transformed().to_svg_string();
    assert!(!doc.contains("-0,") && !doc.contains("\"-0\""));
    assert!(doc.contains(r#"<polygon points="0,0 0,1 -1,1 -1,0" class="unit-square"/>"#));
}

#[test]
fn config_drives_grid_and_view_box() {
    let desc = parse_viz_json(r#"{ "grid": { "line_count": 3, "spacing": 2 }, "view_box": [-4, -4, 8, 8] }"#).unwrap();
    let viz = Visualizer::from_desc(
        &desc,
        SvgSurface::new(desc.view_box),
        SvgSurface::new(desc.view_box),
    );
    let doc = viz.reference().to_svg_string();
    assert!(doc.contains(r#"viewBox="-4 -4 8 8""#));
    assert_eq!(count(&doc, "<line "), 6);
    assert!(doc.contains(r#"<line x1="-2" y1="-2" x2="-2" y2="2" class="grid-line"/>"#));
}
