// Runs the built binary to pin down exit statuses. None of these reach the
// model: every case stops before the chat request is sent.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn automove(home: &Path, args: &[&Path]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_automove"))
        .args(args)
        .env_remove("TARGET_FOLDER")
        .env_remove("AUTOMOVE_LOG")
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .output()
        .unwrap()
}

fn workspace() -> (TempDir, std::path::PathBuf) {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("videos");
    fs::create_dir_all(root.join("Movies/Action")).unwrap();
    (tmp, root)
}

#[test]
fn missing_file_argument_exits_1() {
    let (tmp, _root) = workspace();
    let out = automove(tmp.path(), &[]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn help_exits_0() {
    let (tmp, _root) = workspace();
    let out = automove(tmp.path(), &[Path::new("--help")]);
    assert_eq!(out.status.code(), Some(0));
}

#[test]
fn non_video_is_skipped_with_exit_0() {
    let (tmp, root) = workspace();
    let doc = tmp.path().join("document.txt");
    fs::write(&doc, b"notes").unwrap();

    let out = automove(tmp.path(), &[doc.as_path(), root.as_path()]);

    assert_eq!(out.status.code(), Some(0));
    assert!(doc.exists());
}

#[test]
fn missing_source_exits_1() {
    let (tmp, root) = workspace();
    let out = automove(tmp.path(), &[tmp.path().join("gone.mp4").as_path(), root.as_path()]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn missing_target_folder_exits_1() {
    let (tmp, _root) = workspace();
    let movie = tmp.path().join("movie.mp4");
    fs::write(&movie, b"frames").unwrap();

    let out = automove(tmp.path(), &[movie.as_path()]);

    assert_eq!(out.status.code(), Some(1));
    assert!(movie.exists());
}
