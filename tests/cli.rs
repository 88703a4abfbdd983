//! Integration tests for top-level CLI behavior.

use std::path::{Path, PathBuf};
use std::process::Command;

fn run_tether(args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_tether");
    Command::new(bin).args(args).output().expect("failed to run tether binary")
}

fn temp_dir(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tether_cli_{label}"));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_open_doc(root: &Path, name: &str, content: &str) {
    let dir = root.join("Tasks-Open");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(name), content).unwrap();
}

fn write_snapshot(root: &Path) -> PathBuf {
    let yaml = "name: sprint-12
recorded_at: 2024-06-15T10:30:00Z
issues:
- key: PROJ-1
  summary: First issue, reworded
  created: 2024-06-01T09:00:00Z
- key: PROJ-2
  summary: Brand new issue
  created: 2024-06-10T09:00:00Z
";
    let path = root.join("board.snapshot.yaml");
    std::fs::write(&path, yaml).unwrap();
    path
}

#[test]
fn help_lists_both_subcommands() {
    let output = run_tether(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("sync"));
    assert!(stdout.contains("status"));
}

#[test]
fn sync_help_shows_flags() {
    let output = run_tether(&["sync", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("--dry-run"));
    assert!(stdout.contains("--snapshot"));
    assert!(stdout.contains("--vault"));
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let output = run_tether(&["nonsense"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("unrecognized subcommand"));
}

#[test]
fn status_reports_an_empty_vault() {
    let dir = temp_dir("status_empty");
    let output = run_tether(&["status", "--vault", dir.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Open tasks: 0"));
    assert!(stdout.contains("Closed tasks: 0"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn status_counts_linked_and_unlinked_tasks() {
    let dir = temp_dir("status_counts");
    write_open_doc(&dir, "PROJ-1.md", "---\ntrackerKey: PROJ-1\n---\n");
    write_open_doc(&dir, "note.md", "# unlinked note\n");
    let output = run_tether(&["status", "--vault", dir.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Open tasks: 2 (1 linked to tracker)"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn sync_with_missing_snapshot_aborts_without_vault_changes() {
    let dir = temp_dir("sync_missing_snapshot");
    write_open_doc(&dir, "STALE-1.md", "---\ntrackerKey: STALE-1\n---\n");

    let output = run_tether(&[
        "sync",
        "--vault",
        dir.to_str().unwrap(),
        "--snapshot",
        "/nonexistent/board.snapshot.yaml",
    ]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("sync aborted"));
    assert!(dir.join("Tasks-Open/STALE-1.md").exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn sync_applies_close_create_and_update() {
    let dir = temp_dir("sync_full");
    write_open_doc(&dir, "STALE-1.md", "---\ntrackerKey: STALE-1\nsummary: Gone remotely\n---\n");
    write_open_doc(&dir, "PROJ-1.md", "---\ntrackerKey: PROJ-1\nsummary: First issue\n---\n");
    let snapshot = write_snapshot(&dir);

    let output = run_tether(&[
        "sync",
        "--vault",
        dir.to_str().unwrap(),
        "--snapshot",
        snapshot.to_str().unwrap(),
    ]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("Synced 3 of 3 actions."));

    // Close: the stale task moved to the closed collection.
    assert!(!dir.join("Tasks-Open/STALE-1.md").exists());
    assert!(dir.join("Tasks-Closed/STALE-1.md").exists());

    // Create: the new issue materialized as an open task.
    let created = std::fs::read_to_string(dir.join("Tasks-Open/PROJ-2.md")).unwrap();
    assert!(created.contains("trackerKey: PROJ-2"));
    assert!(created.contains("Brand new issue"));

    // Update: the matched document was refreshed from the tracker.
    let updated = std::fs::read_to_string(dir.join("Tasks-Open/PROJ-1.md")).unwrap();
    assert!(updated.contains("First issue, reworded"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn dry_run_prints_the_plan_and_touches_nothing() {
    let dir = temp_dir("sync_dry_run");
    write_open_doc(&dir, "STALE-1.md", "---\ntrackerKey: STALE-1\n---\n");
    let original = "---\ntrackerKey: PROJ-1\nsummary: First issue\n---\n";
    write_open_doc(&dir, "PROJ-1.md", original);
    let snapshot = write_snapshot(&dir);

    let output = run_tether(&[
        "sync",
        "--dry-run",
        "--vault",
        dir.to_str().unwrap(),
        "--snapshot",
        snapshot.to_str().unwrap(),
    ]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("CLOSE  STALE-1"));
    assert!(stdout.contains("CREATE PROJ-2"));
    assert!(stdout.contains("UPDATE PROJ-1"));

    assert!(dir.join("Tasks-Open/STALE-1.md").exists());
    assert!(!dir.join("Tasks-Open/PROJ-2.md").exists());
    assert_eq!(std::fs::read_to_string(dir.join("Tasks-Open/PROJ-1.md")).unwrap(), original);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn sync_exits_nonzero_when_an_action_fails() {
    let dir = temp_dir("sync_partial_failure");
    write_open_doc(&dir, "STALE-1.md", "---\ntrackerKey: STALE-1\n---\n");
    // A closed document with the same name makes the move collide.
    let closed = dir.join("Tasks-Closed");
    std::fs::create_dir_all(&closed).unwrap();
    std::fs::write(closed.join("STALE-1.md"), "previously closed\n").unwrap();
    let snapshot = write_snapshot(&dir);

    let output = run_tether(&[
        "sync",
        "--vault",
        dir.to_str().unwrap(),
        "--snapshot",
        snapshot.to_str().unwrap(),
    ]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!output.status.success());
    assert!(stdout.contains("Synced 2 of 3 actions."));
    assert!(stdout.contains("FAILED close STALE-1"));
    // The other actions still ran.
    assert!(dir.join("Tasks-Open/PROJ-2.md").exists());
    let _ = std::fs::remove_dir_all(&dir);
}
