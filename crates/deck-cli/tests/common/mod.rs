#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

/// A `deck` command isolated from the user's config and environment.
pub fn deck_cmd(workspace: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("deck"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env("DECK_CONFIG", workspace.join("config.toml"));
    cmd.env_remove("DECK_CONTENT_ORIGIN");
    cmd.env("NO_COLOR", "1");
    cmd
}

pub fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Workspace with a `content/` tree holding course `cs101`:
/// `intro` (pattern, 3 slides, the second malformed) and `extras` (directory).
pub fn content_workspace() -> TempDir {
    let dir = tempfile::tempdir().expect("failed to create test workspace");
    let root = dir.path();
    write(
        root,
        "content/cs101/course.json",
        r#"{
            "id": "cs101",
            "title": "Intro to CS",
            "difficulty": "beginner",
            "estimatedDuration": "1 hour",
            "topics": [
                {"id": "intro", "title": "Getting Started", "duration": "10 min", "slideCount": 3},
                {"id": "extras", "title": "Extras", "strategy": "directory"}
            ]
        }"#,
    );
    write(
        root,
        "content/cs101/intro/slide-1.md",
        "---\nid: intro-1\ntitle: Welcome\n---\nHello **there**.\n",
    );
    write(root, "content/cs101/intro/slide-2.md", "---\nid: intro-2\n---\nNo title.\n");
    write(
        root,
        "content/cs101/intro/slide-3.md",
        "---\nid: intro-3\ntitle: Demo\ntype: video\nvideo: demo.mp4\n---\n",
    );
    write(
        root,
        "content/cs101/extras/a-reading.md",
        "---\nid: extra-a\ntitle: Reading\n---\nBooks.\n",
    );
    write(root, "content/cs101/extras/notes.txt", "ignored");
    dir
}

#[allow(dead_code)]
pub fn write_config(root: &Path, body: &str) {
    write(root, "config.toml", body);
}
