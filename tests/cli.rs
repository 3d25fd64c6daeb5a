use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Workspace {
    root: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("lib")).unwrap();
        fs::create_dir(root.path().join("kotlin")).unwrap();
        Self { root }
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.root.path().join(rel)
    }

    fn write(&self, rel: &str, content: &str) {
        fs::write(self.path(rel), content).unwrap();
    }

    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("srccat").unwrap();
        cmd.current_dir(self.root.path())
            .env_remove("RUST_LOG")
            .args(["--dir-a", "lib", "--ext-a", ".txt", "--dir-b", "kotlin", "--ext-b", ".log"])
            .args(["--output", "out.txt"]);
        cmd
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn writes_single_block_and_confirms() {
    let ws = Workspace::new();
    ws.write("lib/a.txt", "hello");

    ws.command()
        .args(["--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "All .txt and .log files have been written to out.txt",
        ));

    assert_eq!(read(&ws.path("out.txt")), "Contents of file a.txt:\nhello\n\n");
}

#[test]
fn empty_directories_give_empty_output() {
    let ws = Workspace::new();

    ws.command().arg("-q").assert().success();

    assert!(ws.path("out.txt").exists());
    assert_eq!(read(&ws.path("out.txt")), "");
}

#[test]
fn only_matching_files_are_included() {
    let ws = Workspace::new();
    ws.write("lib/x.txt", "x");
    ws.write("lib/y.csv", "y");
    ws.write("kotlin/z.log", "z");
    ws.write("kotlin/w.txt", "w");

    ws.command().arg("-q").assert().success();

    let output = read(&ws.path("out.txt"));
    assert_eq!(
        output,
        "Contents of file x.txt:\nx\n\nContents of file z.log:\nz\n\n"
    );
}

#[test]
fn missing_directory_fails_without_output() {
    let ws = Workspace::new();
    fs::remove_dir(ws.path("lib")).unwrap();

    ws.command()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("lib"));

    assert!(!ws.path("out.txt").exists());
}

#[test]
fn dry_run_writes_nothing() {
    let ws = Workspace::new();
    ws.write("lib/a.txt", "hello");

    ws.command()
        .args(["--dry-run", "--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a.txt"))
        .stdout(predicate::str::contains("OUTPUT: out.txt"));

    assert!(!ws.path("out.txt").exists());
}

#[test]
fn json_report_lists_files() {
    let ws = Workspace::new();
    ws.write("kotlin/b.log", "beta");

    let assert = ws
        .command()
        .args(["--output-format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let report: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(report["type"], "report");
    assert_eq!(report["phases"][1]["files"][0]["filename"], "b.log");
    assert_eq!(report["phases"][1]["files"][0]["size"], 4);
}

#[test]
fn config_file_supplies_options() {
    let ws = Workspace::new();
    ws.write("lib/main.dart", "void main() {}");
    ws.write(
        "srccat.toml",
        "source_dir_a = \"lib\"\next_a = \".dart\"\nsource_dir_b = \"kotlin\"\next_b = \".kt\"\noutput_path = \"bundle.txt\"\n",
    );

    Command::cargo_bin("srccat")
        .unwrap()
        .current_dir(ws.root.path())
        .arg("-q")
        .assert()
        .success();

    assert_eq!(
        read(&ws.path("bundle.txt")),
        "Contents of file main.dart:\nvoid main() {}\n\n"
    );
}

#[test]
fn invalid_extension_is_config_error() {
    let ws = Workspace::new();

    Command::cargo_bin("srccat")
        .unwrap()
        .current_dir(ws.root.path())
        .args(["--dir-a", "lib", "--ext-a", "", "--dir-b", "kotlin", "--ext-b", ".log"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("ext_a"));
}

#[test]
fn config_error_is_json_when_requested() {
    let ws = Workspace::new();

    let assert = Command::cargo_bin("srccat")
        .unwrap()
        .current_dir(ws.root.path())
        .args(["--dir-a", "lib", "--ext-a", "", "--dir-b", "kotlin", "--ext-b", ".log"])
        .args(["--output-format", "json"])
        .assert()
        .code(2);

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(lines[0]["level"], "error");
    assert!(lines[0]["message"].as_str().unwrap().contains("ext_a"));
    assert_eq!(lines[1]["type"], "suggestion");
}

#[test]
fn rerun_produces_identical_output() {
    let ws = Workspace::new();
    ws.write("lib/a.txt", "alpha\n");
    ws.write("lib/b.txt", "beta");
    ws.write("kotlin/c.log", "gamma");

    ws.command().arg("-q").assert().success();
    let first = fs::read(ws.path("out.txt")).unwrap();

    ws.command().arg("-q").assert().success();
    assert_eq!(first, fs::read(ws.path("out.txt")).unwrap());
}
