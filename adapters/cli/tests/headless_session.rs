use std::{fs, path::Path, process::Command};

use tempfile::TempDir;

fn session_dir(level: &str, script: &str) -> TempDir {
    let dir = tempfile::tempdir().expect("temporary directory");
    fs::write(dir.path().join("level1.txt"), level).expect("write level");
    fs::write(
        dir.path().join("game.toml"),
        "[levels]\ndirectory = \".\"\ncount = 1\n",
    )
    .expect("write config");
    fs::write(dir.path().join("moves.txt"), script).expect("write script");
    dir
}

fn run(dir: &Path, extra: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_tile-bomber"))
        .arg("--config")
        .arg(dir.join("game.toml"))
        .arg("--script")
        .arg(dir.join("moves.txt"))
        .args(extra)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to launch tile-bomber")
}

#[test]
fn scripted_rescue_reports_victory() {
    let dir = session_dir("P_W\n___\n", "# walk to the princess\ndd\n");
    let output = run(dir.path(), &[]);
    assert!(output.status.success(), "{output:?}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Welcome to Tile Bomber."), "{stdout}");
    assert!(stdout.contains(".@W\n...\n"), "{stdout}");
    assert!(stdout.contains("The princess is saved after 2 frames"), "{stdout}");
}

#[test]
fn quiet_json_run_prints_only_the_report_and_scene() {
    let dir = session_dir("P__\n___\n", "s.q\n");
    let output = run(dir.path(), &["--quiet", "--json", "--idle-frames", "1"]);
    assert!(output.status.success(), "{output:?}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("level 1 |").count(), 1, "{stdout}");
    assert!(stdout.contains("Quit after 5 frames"), "{stdout}");
    assert!(stdout.contains("\"status\": \"Running\""), "{stdout}");
}

#[test]
fn missing_configuration_fails_with_context() {
    let dir = tempfile::tempdir().expect("temporary directory");
    let output = Command::new(env!("CARGO_BIN_EXE_tile-bomber"))
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to launch tile-bomber");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to load configuration"), "{stderr}");
}
