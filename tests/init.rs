use std::process::Command;

#[test]
fn init_creates_valid_toml() {
    let dir = tempfile::tempdir().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_reposcope"))
        .arg("init")
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "reposcope init failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let config_path = dir.path().join(".reposcope.toml");
    assert!(config_path.exists(), ".reposcope.toml should exist");

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[github]"));
    assert!(content.contains("[cache]"));
    assert!(content.contains("[tree]"));

    // Verify it's valid TOML that reposcope-core can parse.
    let _config: reposcope_core::ScopeConfig = toml::from_str(&content).unwrap();
}

#[test]
fn init_refuses_if_exists() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".reposcope.toml"), "# existing").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_reposcope"))
        .arg("init")
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
}

#[test]
fn rejects_malformed_repo_argument() {
    let output = Command::new(env!("CARGO_BIN_EXE_reposcope"))
        .args(["tree", "not-a-repo"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("owner/repo"), "stderr was: {stderr}");
}

#[test]
fn rejects_unknown_tree_style() {
    let output = Command::new(env!("CARGO_BIN_EXE_reposcope"))
        .args(["tree", "octocat/hello", "--style", "dot"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown tree format"), "stderr was: {stderr}");
}
