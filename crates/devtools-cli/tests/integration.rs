//! Integration tests for devtools

use anyhow::Result;
use assert_cmd::{cargo::cargo_bin_cmd, Command};
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

struct Workspace {
    root: TempDir,
    logs: TempDir,
}

impl Workspace {
    fn new() -> Result<Self> {
        Ok(Workspace {
            root: TempDir::new()?,
            logs: TempDir::new()?,
        })
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    fn write(&self, relative: &str, content: &str) -> Result<()> {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path().join(relative)).unwrap_or_default()
    }

    fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("devtools");
        cmd.current_dir(self.path())
            .env("DEVTOOLS_LOG_DIR", self.logs.path())
            .env_remove("DEVTOOLS_CONFIG")
            .env_remove("DEVTOOLS_TEMPLATE")
            .env_remove("RUST_LOG");
        cmd
    }
}

fn vue_project() -> Result<Workspace> {
    let ws = Workspace::new()?;
    ws.write("pages/dev/components/userProfile/avatarUpload.vue", "")?;
    ws.write("pages/dev/simple_card.vue", "")?;
    ws.write("pages/dev/notes.txt", "")?;
    ws.write("._dev_tools/vue/template/public/dev.html", "<div id=\"app\"></div>")?;
    Ok(ws)
}

#[test]
fn test_version() {
    cargo_bin_cmd!("devtools")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("devtools"));
}

#[test]
fn test_help() {
    cargo_bin_cmd!("devtools")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("component navigation manifest"));
}

#[test]
fn test_invalid_command() {
    cargo_bin_cmd!("devtools").arg("invalid").assert().failure();
}

#[test]
fn test_manifest_written_then_unchanged() -> Result<()> {
    let ws = vue_project()?;

    ws.cmd()
        .arg("manifest")
        .assert()
        .success()
        .stderr(predicate::str::contains("Manifest updated"));

    assert_eq!(
        ws.read("public/dev_pages.json"),
        "[\n    {\n        \"name\": \"Components - User Profile - Avatar Upload\",\n        \"url\": \"/dev/components/userProfile/avatarUpload\"\n    },\n    {\n        \"name\": \"Simple Card\",\n        \"url\": \"/dev/simple_card\"\n    }\n]\n"
    );
    assert_eq!(ws.read("public/dev.html"), "<div id=\"app\"></div>");

    ws.cmd()
        .arg("manifest")
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes detected"));
    Ok(())
}

#[test]
fn test_manifest_missing_components_writes_empty_array() -> Result<()> {
    let ws = Workspace::new()?;
    ws.write("web/tools/dev.html", "<html></html>")?;

    ws.cmd()
        .args(["manifest", "web", "--template", "web/tools/dev.html"])
        .assert()
        .success();

    assert_eq!(ws.read("web/public/dev_pages.json"), "[]\n");
    Ok(())
}

#[test]
fn test_manifest_template_from_env() -> Result<()> {
    let ws = vue_project()?;
    ws.write("alt.html", "alt")?;

    ws.cmd()
        .arg("manifest")
        .env("DEVTOOLS_TEMPLATE", ws.path().join("alt.html"))
        .assert()
        .success();

    assert_eq!(ws.read("public/dev.html"), "alt");
    Ok(())
}

#[test]
fn test_manifest_missing_template_fails() -> Result<()> {
    let ws = Workspace::new()?;
    ws.write("pages/dev/card.vue", "")?;

    ws.cmd()
        .arg("manifest")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to copy template"));

    assert!(!ws.path().join("public/dev_pages.json").exists());
    Ok(())
}

#[test]
fn test_check_exit_codes() -> Result<()> {
    let ws = Workspace::new()?;
    ws.write("src/app.js", "console.log('debug');\n")?;
    ws.write("src/clean.js", "export default 1;\n")?;
    ws.write(
        "dev.config.yaml",
        "patterns:\n  - pattern: \"console\\\\.log\"\n    include: [\"src/**/*.js\"]\n",
    )?;

    ws.cmd()
        .arg("check")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("found in"))
        .stdout(predicate::str::contains("src/app.js"));

    ws.write("src/app.js", "export const app = {};\n")?;
    ws.cmd()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("No matches"));
    Ok(())
}

#[test]
fn test_check_missing_config_is_error() -> Result<()> {
    let ws = Workspace::new()?;
    ws.cmd()
        .args(["check", "-d", "."])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Config file not found"));
    Ok(())
}

#[test]
fn test_init_then_check_uses_starter_config() -> Result<()> {
    let ws = Workspace::new()?;
    ws.write("src/main.js", "debugger;\n")?;

    ws.cmd().arg("init").assert().success();
    assert!(ws.read("dev.config.yaml").contains("patterns:"));

    ws.cmd()
        .arg("check")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("src/main.js"));
    Ok(())
}

#[test]
fn test_init_declined_keeps_existing_file() -> Result<()> {
    let ws = Workspace::new()?;
    ws.write("dev.config.yaml", "patterns: []\n")?;

    ws.cmd()
        .arg("init")
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Operation cancelled."));
    assert_eq!(ws.read("dev.config.yaml"), "patterns: []\n");

    ws.cmd().args(["init", "--yes"]).assert().success();
    assert!(ws.read("dev.config.yaml").contains("manifest:"));
    Ok(())
}

#[test]
fn test_sync_no_commit_copies_tree() -> Result<()> {
    let ws = Workspace::new()?;
    ws.write("shared/vue/template/public/dev.html", "<html></html>")?;
    ws.write("shared/.git/HEAD", "ref: refs/heads/main")?;

    ws.cmd()
        .args(["sync", "shared", "--no-commit"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Copied 1 file(s)"));

    assert_eq!(
        ws.read("._dev_tools/vue/template/public/dev.html"),
        "<html></html>"
    );
    assert!(!ws.path().join("._dev_tools/.git").exists());
    Ok(())
}

#[test]
fn test_lint_without_linters_installed() -> Result<()> {
    let ws = Workspace::new()?;
    let empty_path = TempDir::new()?;
    ws.write(
        "dev.config.yaml",
        "python:\n  ignore_paths: [venv]\n  pylint:\n    entrance: [app]\n",
    )?;

    ws.cmd()
        .arg("lint")
        .env("PATH", empty_path.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("mypy not found in PATH"))
        .stdout(predicate::str::contains("pylint (not installed)"));
    Ok(())
}

#[test]
fn test_lint_missing_config_is_error() -> Result<()> {
    let ws = Workspace::new()?;
    ws.cmd()
        .arg("lint")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Config file not found"));
    Ok(())
}

#[test]
fn test_lint_help_lists_watch() {
    cargo_bin_cmd!("devtools")
        .args(["lint", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--watch"));
}
