use cairo::{Context, Format, ImageSurface};
use sharemark::draw::{Annotation, DrawingSurface, render};
use sharemark::input::{Command, InputState, Tool, ToolSelector};

fn make_input_state(width: i32, height: i32) -> InputState {
    let surface = DrawingSurface::new(width, height).unwrap();
    let styles = sharemark::Config::default().tools.build_styles();
    InputState::new(surface, ToolSelector::new(Tool::Pen, styles), "presenter")
}

fn surface_has_pixels(surface: &mut ImageSurface) -> bool {
    surface
        .data()
        .map(|data| data.iter().any(|byte| *byte != 0))
        .unwrap_or(false)
}

fn scribble(state: &mut InputState, y: f64) {
    state
        .dispatch_all([
            Command::PointerDown { x: 4.0, y },
            Command::PointerMove { x: 20.0, y: y + 3.0 },
            Command::PointerMove { x: 36.0, y },
            Command::PointerUp,
        ])
        .unwrap();
}

#[test]
fn replaying_store_on_foreign_context_matches_overlay() {
    let mut state = make_input_state(48, 48);
    scribble(&mut state, 10.0);
    state.select_tool(Tool::Highlighter);
    scribble(&mut state, 30.0);

    let mut foreign = ImageSurface::create(Format::ARgb32, 48, 48).unwrap();
    {
        let ctx = Context::new(&foreign).unwrap();
        render::render_annotations(&ctx, state.annotations());
    }
    foreign.flush();

    assert!(surface_has_pixels(&mut foreign));
    let expected = foreign.data().unwrap().to_vec();
    assert_eq!(state.surface.pixels().unwrap(), expected);
}

#[test]
fn loaded_document_paints_its_strokes() {
    let annotations: Vec<Annotation> = sharemark::session::parse_annotations(
        br##"{"annotations":[{"id":"x","type":"pen","points":[{"x":1,"y":1}],"strokeColor":"#ff0000","strokeWidth":2,"opacity":1}]}"##,
    )
    .unwrap();

    let mut state = make_input_state(16, 16);
    state.load(annotations).unwrap();

    assert!(state.surface.alpha_at(1, 1).unwrap().unwrap() > 0);
    assert_eq!(state.surface.alpha_at(12, 12).unwrap(), Some(0));
}

#[test]
fn bad_color_renders_black_instead_of_failing() {
    let annotations: Vec<Annotation> = serde_json::from_str(
        r#"[{"id":"odd","points":[{"x":8,"y":8},{"x":12,"y":8}],"strokeColor":"not-a-color","strokeWidth":4}]"#,
    )
    .unwrap();

    let mut state = make_input_state(16, 16);
    state.load(annotations).unwrap();

    let pixels = state.surface.pixels().unwrap();
    let stride = state.surface.stride() as usize;
    let offset = 8 * stride + 10 * 4;
    let pixel = u32::from_ne_bytes([
        pixels[offset],
        pixels[offset + 1],
        pixels[offset + 2],
        pixels[offset + 3],
    ]);
    assert_eq!(pixel >> 24, 0xff);
    assert_eq!(pixel & 0x00ff_ffff, 0);
}

#[test]
fn png_export_writes_file() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("overlay.png");
    let mut state = make_input_state(32, 32);
    scribble(&mut state, 16.0);

    state.surface.write_png(&path).unwrap();

    let mut file = std::fs::File::open(&path).unwrap();
    let mut decoded = ImageSurface::create_from_png(&mut file).unwrap();
    assert_eq!(decoded.width(), 32);
    assert!(surface_has_pixels(&mut decoded));
}
