use super::*;
use crate::draw::{Annotation, DrawingSurface, Point, StrokeStyle};
use crate::input::{InputState, Tool, ToolSelector};
use flate2::{Compression, write::GzEncoder};
use std::io::Write;

fn stroke(id: &str, points: &[(f64, f64)]) -> Annotation {
    let mut annotation = Annotation::begin(
        id.to_string(),
        Tool::Pen,
        Point::new(points[0].0, points[0].1),
        &StrokeStyle::default(),
        "tester",
        1_700_000_000_000,
    );
    for &(x, y) in &points[1..] {
        annotation.points.push(Point::new(x, y));
    }
    annotation
}

fn options_in(dir: &std::path::Path) -> ExportOptions {
    ExportOptions::new(dir.to_path_buf())
}

#[test]
fn save_then_load_preserves_annotations() {
    let temp = tempfile::tempdir().unwrap();
    let options = options_in(temp.path());
    let annotations = vec![
        stroke("a", &[(1.0, 1.0), (5.0, 5.0)]),
        stroke("b", &[(10.0, 10.0)]),
    ];

    let path = save_document(&annotations, &options, None).unwrap();
    assert!(path.starts_with(temp.path()));
    assert!(
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with("annotations-") && name.ends_with(".json"))
    );

    let loaded = load_document(&path, &options).unwrap();
    assert_eq!(loaded, annotations);
}

#[test]
fn saved_document_carries_metadata() {
    let temp = tempfile::tempdir().unwrap();
    let mut options = options_in(temp.path());
    options.source = "meeting".to_string();
    options.quality = "low".to_string();
    let target = temp.path().join("doc.json");

    save_document(&[stroke("a", &[(0.0, 0.0)])], &options, Some(&target)).unwrap();

    let raw = std::fs::read_to_string(&target).unwrap();
    let document: AnnotationDocument = serde_json::from_str(&raw).unwrap();
    assert_eq!(document.metadata.source, "meeting");
    assert_eq!(document.metadata.quality, "low");
    assert_eq!(document.metadata.total_annotations, 1);
    assert!(chrono::DateTime::parse_from_rfc3339(&document.metadata.timestamp).is_ok());

    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(value["metadata"]["totalAnnotations"].is_u64());
    assert_eq!(value["annotations"][0]["type"], "pen");
    assert!(value["annotations"][0]["strokeColor"].is_string());
}

#[test]
fn save_leaves_no_temporary_files() {
    let temp = tempfile::tempdir().unwrap();
    let options = options_in(temp.path());
    let target = temp.path().join("doc.json");

    save_document(&[stroke("a", &[(0.0, 0.0)])], &options, Some(&target)).unwrap();
    save_document(&[stroke("b", &[(1.0, 1.0)])], &options, Some(&target)).unwrap();

    let leftovers: Vec<_> = std::fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().contains(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
    assert!(temp.path().join(".sharemark.lock").exists());

    let loaded = load_document(&target, &options).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, "b");
}

#[test]
fn parse_accepts_bare_array() {
    let json = br##"[{"id":"x","type":"pen","points":[{"x":1,"y":1}],"strokeColor":"#ff0000","strokeWidth":2,"opacity":1}]"##;
    let annotations = parse_annotations(json).unwrap();
    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0].id, "x");
    assert_eq!(annotations[0].stroke_color, "#ff0000");
    assert_eq!(annotations[0].stroke_width, 2.0);
}

#[test]
fn parse_accepts_wrapped_document_without_metadata() {
    let json = br#"{"annotations":[{"id":"y","points":[{"x":3,"y":4}]}]}"#;
    let annotations = parse_annotations(json).unwrap();
    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0].tool, Tool::Pen);
    assert_eq!(annotations[0].points[0], Point::new(3.0, 4.0));
}

#[test]
fn parse_maps_unknown_type_to_pen() {
    let json = br#"[{"id":"z","type":"laser","points":[{"x":0,"y":0}]}]"#;
    let annotations = parse_annotations(json).unwrap();
    assert_eq!(annotations[0].tool, Tool::Pen);
}

#[test]
fn parse_rejects_garbage() {
    assert!(matches!(
        parse_annotations(b"not json"),
        Err(DocumentError::Parse(_))
    ));
    assert!(parse_annotations(br#"{"shapes":[]}"#).is_err());
}

#[test]
fn parse_reads_gzip_payload() {
    let json = br#"[{"id":"g","points":[{"x":1,"y":2}]}]"#;
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(json).unwrap();
    let compressed = encoder.finish().unwrap();

    let annotations = parse_annotations(&compressed).unwrap();
    assert_eq!(annotations[0].id, "g");
}

#[test]
fn compression_on_writes_gzip_and_loads_back() {
    let temp = tempfile::tempdir().unwrap();
    let mut options = options_in(temp.path());
    options.compression = CompressionMode::On;
    let target = temp.path().join("doc.json");
    let annotations = vec![stroke("a", &[(1.0, 1.0), (2.0, 2.0)])];

    save_document(&annotations, &options, Some(&target)).unwrap();

    let raw = std::fs::read(&target).unwrap();
    assert_eq!(&raw[..2], &[0x1f, 0x8b]);
    assert_eq!(load_document(&target, &options).unwrap(), annotations);
}

#[test]
fn auto_compression_respects_threshold() {
    let mut options = ExportOptions::new(std::path::PathBuf::from("/tmp"));
    options.compression = CompressionMode::Auto;
    options.auto_compress_threshold_bytes = 100;
    assert!(!options.should_compress(99));
    assert!(options.should_compress(100));

    options.compression = CompressionMode::Off;
    assert!(!options.should_compress(10_000));
}

#[test]
fn load_refuses_oversized_file() {
    let temp = tempfile::tempdir().unwrap();
    let mut options = options_in(temp.path());
    let target = temp.path().join("doc.json");
    save_document(&[stroke("a", &[(0.0, 0.0)])], &options, Some(&target)).unwrap();

    options.max_file_size_bytes = 16;
    let err = load_document(&target, &options).unwrap_err();
    assert!(err.to_string().contains("exceeds the limit"));
}

#[test]
fn save_refuses_oversized_document() {
    let temp = tempfile::tempdir().unwrap();
    let mut options = options_in(temp.path());
    options.max_file_size_bytes = 16;
    let target = temp.path().join("doc.json");

    assert!(save_document(&[stroke("a", &[(0.0, 0.0)])], &options, Some(&target)).is_err());
    assert!(!target.exists());
}

#[test]
fn load_without_lock_file_succeeds() {
    let temp = tempfile::tempdir().unwrap();
    let options = options_in(temp.path());
    let target = temp.path().join("plain.json");
    std::fs::write(&target, br#"[{"id":"p","points":[{"x":0,"y":0}]}]"#).unwrap();

    assert_eq!(load_document(&target, &options).unwrap().len(), 1);
    assert!(!temp.path().join(".sharemark.lock").exists());
}

#[test]
fn undo_before_save_drops_latest_stroke() {
    let temp = tempfile::tempdir().unwrap();
    let options = options_in(temp.path());
    let surface = DrawingSurface::new(64, 64).unwrap();
    let mut state = InputState::new(surface, ToolSelector::default(), "tester");

    for offset in [5.0, 20.0, 35.0] {
        state.on_pointer_down(Point::new(offset, offset)).unwrap();
        state
            .on_pointer_move(Point::new(offset + 5.0, offset))
            .unwrap();
        state.on_pointer_up();
    }
    let first_two: Vec<String> = state.annotations()[..2]
        .iter()
        .map(|a| a.id.clone())
        .collect();
    state.undo().unwrap();

    let path = save_document(state.annotations(), &options, None).unwrap();
    let loaded = load_document(&path, &options).unwrap();
    assert_eq!(loaded.len(), 2);
    let loaded_ids: Vec<String> = loaded.into_iter().map(|a| a.id).collect();
    assert_eq!(loaded_ids, first_two);
}

#[test]
fn options_from_config_uses_export_section() {
    let temp = tempfile::tempdir().unwrap();
    let config = crate::config::ExportConfig {
        directory: Some(temp.path().to_string_lossy().into_owned()),
        compression: crate::config::CompressionSetting::Auto,
        auto_compress_threshold_kb: 2,
        max_file_size_mb: 3,
        ..Default::default()
    };

    let options = options_from_config(&config).unwrap();
    assert_eq!(options.base_dir, temp.path());
    assert_eq!(options.compression, CompressionMode::Auto);
    assert_eq!(options.auto_compress_threshold_bytes, 2048);
    assert_eq!(options.max_file_size_bytes, 3 * 1024 * 1024);
    assert_eq!(options.source, "screen-share");
}

#[test]
fn lock_file_sits_next_to_target() {
    let options = ExportOptions::new(std::path::PathBuf::from("/base"));
    assert_eq!(
        options.lock_file_path(std::path::Path::new("/other/doc.json")),
        std::path::PathBuf::from("/other/.sharemark.lock")
    );
}

#[test]
fn options_from_config_saturates_huge_limits() {
    let temp = tempfile::tempdir().unwrap();
    let config = crate::config::ExportConfig {
        directory: Some(temp.path().to_string_lossy().into_owned()),
        auto_compress_threshold_kb: u64::MAX,
        max_file_size_mb: u64::MAX,
        ..Default::default()
    };

    let options = options_from_config(&config).unwrap();
    assert_eq!(options.auto_compress_threshold_bytes, u64::MAX);
    assert_eq!(options.max_file_size_bytes, u64::MAX);
}
