use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn midisketch_cmd(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("midisketch").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", config_home);
    cmd
}

const SCRIPT: &str = r#"[
    {"type": "down", "x": 20, "y": 20},
    {"type": "move", "x": 60, "y": 40},
    {"type": "controller", "kind": "aftertouch", "channel": 4, "value": 127},
    {"type": "move", "x": 100, "y": 40},
    {"type": "up", "x": 100, "y": 40}
]"#;

fn write_script(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("events.json");
    fs::write(&path, SCRIPT).unwrap();
    path
}

#[test]
fn midisketch_help_prints_usage() {
    let temp = TempDir::new().unwrap();
    midisketch_cmd(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Freehand sketching with line width driven by a MIDI pressure controller",
        ));
}

#[test]
fn no_flags_prints_overview() {
    let temp = TempDir::new().unwrap();
    midisketch_cmd(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("midisketch --script events.json"));
}

#[test]
fn output_requires_script() {
    let temp = TempDir::new().unwrap();
    midisketch_cmd(temp.path())
        .args(["--output", "out.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "required arguments were not provided",
        ));
}

#[test]
fn replay_exports_png_of_configured_size() {
    let temp = TempDir::new().unwrap();
    let script = write_script(temp.path());
    let config = temp.path().join("config.toml");
    fs::write(&config, "[canvas]\nwidth = 160\nheight = 90\n").unwrap();
    let output = temp.path().join("sketch.png");

    midisketch_cmd(temp.path())
        .arg("--no-midi")
        .arg("--config")
        .arg(&config)
        .arg("--script")
        .arg(&script)
        .arg("--output")
        .arg(&output)
        .arg("--supersample")
        .arg("2")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 segments drawn"))
        .stdout(predicate::str::contains("1 width updates"));

    let mut file = fs::File::open(&output).unwrap();
    let image = cairo::ImageSurface::create_from_png(&mut file).unwrap();
    assert_eq!((image.width(), image.height()), (160, 90));
}

#[test]
fn output_without_extension_gets_png() {
    let temp = TempDir::new().unwrap();
    let script = write_script(temp.path());
    let output = temp.path().join("sketch");

    midisketch_cmd(temp.path())
        .arg("--no-midi")
        .arg("--script")
        .arg(&script)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("sketch.png"));

    assert!(temp.path().join("sketch.png").exists());
    assert!(!output.exists());
}

#[test]
fn unsupported_output_format_fails_without_writing() {
    let temp = TempDir::new().unwrap();
    let script = write_script(temp.path());
    let output = temp.path().join("sketch.xyz");

    midisketch_cmd(temp.path())
        .arg("--no-midi")
        .arg("--script")
        .arg(&script)
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported image format"));

    assert!(!output.exists());
}

#[test]
fn jpeg_output_is_written() {
    let temp = TempDir::new().unwrap();
    let script = write_script(temp.path());
    let output = temp.path().join("sketch.jpg");

    midisketch_cmd(temp.path())
        .arg("--no-midi")
        .arg("--script")
        .arg(&script)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("sketch.jpg"));

    let decoded = image::open(&output).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (800, 600));
}

#[test]
fn malformed_script_is_reported() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("broken.json");
    fs::write(&script, r#"[{"type": "down", "x": 1}]"#).unwrap();

    midisketch_cmd(temp.path())
        .arg("--no-midi")
        .arg("--script")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid event script"));
}

#[test]
fn dump_config_schema_prints_json() {
    Command::cargo_bin("dump_config_schema")
        .expect("binary exists")
        .assert()
        .success()
        .stdout(predicate::str::contains("supersample_factor"));
}
