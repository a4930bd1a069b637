use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn sharemark_cmd(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sharemark").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", config_home.path());
    cmd
}

const DOCUMENT: &str = r##"{
  "annotations": [
    {"id": "a", "type": "pen", "points": [{"x": 10, "y": 10}, {"x": 30, "y": 10}],
     "strokeColor": "#ff0000", "strokeWidth": 4, "opacity": 1, "timestamp": 1, "author": "alice"},
    {"id": "b", "type": "highlighter", "points": [{"x": 5, "y": 20}],
     "strokeColor": "yellow", "strokeWidth": 10, "opacity": 0.4, "timestamp": 2, "author": "bob"},
    {"id": "c", "type": "pen", "points": [{"x": 1, "y": 1}], "author": "alice"}
  ],
  "metadata": {"timestamp": "2024-01-01T00:00:00Z", "source": "screen-share",
               "quality": "high", "totalAnnotations": 3}
}"##;

#[test]
fn help_prints_about() {
    let temp = TempDir::new().unwrap();
    sharemark_cmd(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Annotation overlay engine for screen sharing",
        ));
}

#[test]
fn no_flags_prints_usage() {
    let temp = TempDir::new().unwrap();
    sharemark_cmd(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("sharemark --render"));
}

#[test]
fn render_requires_output() {
    let temp = TempDir::new().unwrap();
    let doc = temp.path().join("doc.json");
    std::fs::write(&doc, DOCUMENT).unwrap();

    sharemark_cmd(&temp)
        .arg("--render")
        .arg(&doc)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--render requires --output"));
}

#[test]
fn render_writes_png() {
    let temp = TempDir::new().unwrap();
    let doc = temp.path().join("doc.json");
    let png = temp.path().join("out.png");
    std::fs::write(&doc, DOCUMENT).unwrap();

    sharemark_cmd(&temp)
        .arg("--render")
        .arg(&doc)
        .arg("--output")
        .arg(&png)
        .args(["--width", "64", "--height", "48"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered 3 annotations"))
        .stdout(predicate::str::contains("64x48"));

    let bytes = std::fs::read(&png).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
}

#[test]
fn inspect_summarises_document() {
    let temp = TempDir::new().unwrap();
    let doc = temp.path().join("doc.json");
    std::fs::write(&doc, DOCUMENT).unwrap();

    sharemark_cmd(&temp)
        .arg("--inspect")
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::contains("annotations: 3"))
        .stdout(predicate::str::contains("alice: 2"))
        .stdout(predicate::str::contains("highlighter: 1"));
}

#[test]
fn inspect_rejects_malformed_document() {
    let temp = TempDir::new().unwrap();
    let doc = temp.path().join("broken.json");
    std::fs::write(&doc, "{ not json").unwrap();

    sharemark_cmd(&temp)
        .arg("--inspect")
        .arg(&doc)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load annotations"));
}

#[test]
fn replay_saves_resulting_document() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("script.json");
    let output = temp.path().join("result.json");
    std::fs::write(
        &script,
        r#"[
            {"command": "pointer_down", "x": 5, "y": 5},
            {"command": "pointer_move", "x": 15, "y": 5},
            {"command": "pointer_up"},
            {"command": "select_tool", "tool": "highlighter"},
            {"command": "pointer_down", "x": 5, "y": 20},
            {"command": "pointer_up"},
            {"command": "pointer_down", "x": 5, "y": 30},
            {"command": "pointer_up"},
            {"command": "undo"}
        ]"#,
    )
    .unwrap();

    sharemark_cmd(&temp)
        .arg("--replay")
        .arg(&script)
        .arg("--output")
        .arg(&output)
        .args(["--width", "40", "--height", "40"])
        .assert()
        .success()
        .stdout(predicate::str::contains("saved 2 annotations"));

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(saved["metadata"]["totalAnnotations"], 2);
    assert_eq!(saved["annotations"][0]["type"], "pen");
    assert_eq!(saved["annotations"][1]["type"], "highlighter");
}

#[test]
fn init_config_writes_example_once() {
    let temp = TempDir::new().unwrap();
    sharemark_cmd(&temp)
        .arg("--init-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote example config"));
    assert!(temp.path().join("sharemark").join("config.toml").exists());

    sharemark_cmd(&temp)
        .arg("--init-config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn schema_dump_lists_sections() {
    Command::cargo_bin("dump_config_schema")
        .expect("binary exists")
        .assert()
        .success()
        .stdout(predicate::str::contains("keybindings"))
        .stdout(predicate::str::contains("export"));
}
