use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const TWO_LINES: &str = r#"[
    {"op": "activate"},
    {"op": "down", "x": 10, "y": 10},
    {"op": "move", "x": 50, "y": 10},
    {"op": "up", "x": 110, "y": 10},
    {"op": "tool", "kind": "rect"},
    {"op": "down", "x": 200, "y": 200},
    {"op": "up", "x": 260, "y": 240}
]"#;

fn drawover_cmd(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("drawover").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env("HOME", config_home);
    cmd
}

fn write_script(dir: &Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("script.json");
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn drawover_help_prints_usage() {
    let temp = TempDir::new().unwrap();
    drawover_cmd(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Drawing overlay for annotating web pages",
        ));
}

#[test]
fn no_flags_prints_quick_usage() {
    let temp = TempDir::new().unwrap();
    drawover_cmd(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("drawover --replay script.json"));
}

#[test]
fn replay_prints_markup() {
    let temp = TempDir::new().unwrap();
    let script = write_script(temp.path(), TWO_LINES);

    drawover_cmd(temp.path())
        .arg("--replay")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<svg"))
        .stdout(predicate::str::contains("data-shape-id"))
        .stdout(predicate::str::contains("<rect"));
}

#[test]
fn replay_lists_shapes_as_json() {
    let temp = TempDir::new().unwrap();
    let script = write_script(temp.path(), TWO_LINES);

    let output = drawover_cmd(temp.path())
        .arg("--replay")
        .arg(&script)
        .arg("--shapes")
        .output()
        .unwrap();
    assert!(output.status.success());

    let shapes: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let kinds: Vec<&str> = shapes
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["line", "rectangle"]);
}

#[test]
fn replay_writes_output_file() {
    let temp = TempDir::new().unwrap();
    let script = write_script(temp.path(), TWO_LINES);
    let out = temp.path().join("drawing.svg");

    drawover_cmd(temp.path())
        .arg("--replay")
        .arg(&script)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote drawing to"));

    let markup = std::fs::read_to_string(out).unwrap();
    assert!(markup.starts_with("<svg"));
}

#[test]
fn inactive_overlay_has_nothing_to_write() {
    let temp = TempDir::new().unwrap();
    let script = write_script(temp.path(), r#"[{"op": "down", "x": 1, "y": 1}]"#);

    drawover_cmd(temp.path())
        .arg("--replay")
        .arg(&script)
        .arg("--output")
        .arg(temp.path().join("empty.svg"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to export"));
}

#[test]
fn replay_save_uses_configured_directory() {
    let temp = TempDir::new().unwrap();
    let script = write_script(temp.path(), TWO_LINES);
    let export_dir = temp.path().join("exports");
    let config = temp.path().join("custom.toml");
    std::fs::write(
        &config,
        format!(
            "[export]\ndirectory = {:?}\nfilename_template = \"snap\"\n",
            export_dir.to_string_lossy()
        ),
    )
    .unwrap();

    drawover_cmd(temp.path())
        .arg("--config")
        .arg(&config)
        .arg("--replay")
        .arg(&script)
        .arg("--save")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved drawing to"));

    assert!(export_dir.join("snap.svg").exists());
}

#[test]
fn invalid_script_reports_path() {
    let temp = TempDir::new().unwrap();
    let script = write_script(temp.path(), r#"[{"op": "explode"}]"#);

    drawover_cmd(temp.path())
        .arg("--replay")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid script"));
}

#[test]
fn missing_config_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let script = write_script(temp.path(), TWO_LINES);

    drawover_cmd(temp.path())
        .arg("--config")
        .arg(temp.path().join("nope.toml"))
        .arg("--replay")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn bad_page_size_is_rejected() {
    let temp = TempDir::new().unwrap();
    let script = write_script(temp.path(), TWO_LINES);

    drawover_cmd(temp.path())
        .arg("--replay")
        .arg(&script)
        .args(["--page-size", "wide"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected WIDTHxHEIGHT"));
}

#[test]
fn output_requires_replay() {
    let temp = TempDir::new().unwrap();
    drawover_cmd(temp.path())
        .args(["--output", "drawing.svg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "required arguments were not provided",
        ));
}

#[test]
fn init_config_writes_example_once() {
    let temp = TempDir::new().unwrap();

    drawover_cmd(temp.path())
        .arg("--init-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config at"));

    let written = temp.path().join("drawover/config.toml");
    assert!(written.exists());
    let text = std::fs::read_to_string(&written).unwrap();
    assert!(text.contains("[drawing]"));

    drawover_cmd(temp.path())
        .arg("--init-config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn version_includes_build_hash() {
    let temp = TempDir::new().unwrap();
    drawover_cmd(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")))
        .stdout(predicate::str::contains("("));
}
