// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use serde_json::json;

struct Workspace {
    temp_dir: tempfile::TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            temp_dir: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    fn backup_dir(&self) -> PathBuf {
        self.path().join("backups")
    }

    fn media_file(&self) -> PathBuf {
        self.path().join("unwatched.mkv")
    }

    /// One stale item with a media file and one highly rated favorite.
    fn write_library(&self) -> PathBuf {
        fs::write(self.media_file(), b"video").unwrap();
        let input = self.path().join("library.json");
        let library = json!([
            {
                "id": "1",
                "title": "Unwatched",
                "year": 2001,
                "watch_stats": {"view_count": 0, "added_at": "2020-01-01T00:00:00Z"},
                "media_info": {
                    "size_bytes": 20u64 * 1024 * 1024 * 1024,
                    "resolution": "sd",
                    "files": [self.media_file()],
                },
            },
            {
                "id": "2",
                "title": "Favorite",
                "year": 1994,
                "watch_stats": {"view_count": 12, "last_viewed_at": "2020-01-01T00:00:00Z"},
                "media_info": {"size_bytes": 30u64 * 1024 * 1024 * 1024, "resolution": "sd"},
                "ratings": {"imdb": 9.2},
            },
        ]);
        fs::write(&input, serde_json::to_vec_pretty(&library).unwrap()).unwrap();
        input
    }

    fn run(&self, args: &[&str]) -> Output {
        self.run_with_env(&[], args)
    }

    fn run_with_env(&self, vars: &[(&str, &str)], args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_plexiq"))
            .current_dir(self.path())
            .env_clear()
            .env("BACKUP_DIR", self.backup_dir())
            .envs(vars.iter().copied())
            .arg("--config")
            .arg(self.path().join("config.ron"))
            .args(args)
            .output()
            .unwrap()
    }

    fn backup_count(&self, prefix: &str) -> usize {
        fs::read_dir(self.backup_dir())
            .unwrap()
            .filter(|entry| {
                entry
                    .as_ref()
                    .unwrap()
                    .file_name()
                    .to_string_lossy()
                    .starts_with(prefix)
            })
            .count()
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn analyze_prints_report_and_backs_up() {
    let workspace = Workspace::new();
    let input = workspace.write_library();
    let output = workspace.run(&[
        "analyze",
        input.to_str().unwrap(),
        "--show-all",
        "--format",
        "report",
    ]);
    assert!(output.status.success(), "{output:?}");
    let stdout = stdout(&output);
    assert!(stdout.contains("PlexIQ Deletion Analysis Report"));
    assert!(stdout.contains("[1] Unwatched (2001)"));
    assert!(stdout.contains("[2] Favorite (1994)"));
    assert!(stdout.contains("Recommended for deletion: 1"));
    assert_eq!(1, workspace.backup_count("metadata_"));
    assert_eq!(1, workspace.backup_count("analysis_"));
}

#[test]
fn delete_is_a_dry_run_by_default() {
    let workspace = Workspace::new();
    let input = workspace.write_library();
    let output = workspace.run(&["delete", input.to_str().unwrap()]);
    assert!(output.status.success(), "{output:?}");
    assert!(stdout(&output).contains("Dry-run complete"));
    assert!(workspace.media_file().exists());
    assert_eq!(1, workspace.backup_count("delete_dryrun_"));
}

#[test]
fn delete_without_confirmation_fails_and_keeps_files() {
    let workspace = Workspace::new();
    let input = workspace.write_library();
    let output = workspace.run(&["delete", input.to_str().unwrap(), "--execute"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("requires explicit confirmation"));
    assert!(workspace.media_file().exists());
    assert_eq!(1, workspace.backup_count("delete_dryrun_"));
    assert_eq!(0, workspace.backup_count("delete_outcome_"));
}

#[test]
fn confirmed_delete_removes_files_of_admitted_items() {
    let workspace = Workspace::new();
    let input = workspace.write_library();
    let output = workspace.run(&[
        "delete",
        input.to_str().unwrap(),
        "--execute",
        "--confirm",
    ]);
    assert!(output.status.success(), "{output:?}");
    assert!(stdout(&output).contains("Deleted 1 item(s)"));
    assert!(!workspace.media_file().exists());
    assert_eq!(1, workspace.backup_count("delete_executed_"));
    assert_eq!(1, workspace.backup_count("delete_outcome_"));

    let output = workspace.run(&["backup", "list", "--type", "delete_outcome"]);
    assert!(output.status.success(), "{output:?}");
    assert!(stdout(&output).contains("Showing 1 backup(s)"));
}

#[test]
fn invalid_min_score_is_rejected() {
    let workspace = Workspace::new();
    let input = workspace.write_library();
    let output = workspace.run(&["delete", input.to_str().unwrap(), "--min-score", "1.5"]);
    assert!(!output.status.success());
    assert!(workspace.media_file().exists());
}

#[test]
fn invalid_configuration_is_fatal() {
    let workspace = Workspace::new();
    let input = workspace.write_library();
    fs::write(
        workspace.path().join("config.ron"),
        "(scoring: (weights: (play_count: 0.9)))",
    )
    .unwrap();
    let output = workspace.run(&["analyze", input.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("weights must sum to 1.0"));

    let output = workspace.run(&["config", "validate"]);
    assert!(!output.status.success());
}

#[test]
fn unparsable_env_override_is_fatal() {
    let workspace = Workspace::new();
    let input = workspace.write_library();
    let output = workspace.run_with_env(&[("MIN_DELETION_SCORE", "0,9")], &["config", "validate"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("MIN_DELETION_SCORE"));
    assert!(!stdout(&output).contains("Configuration is valid"));

    let output = workspace.run_with_env(
        &[("MIN_DELETION_SCORE", "0,9")],
        &["delete", input.to_str().unwrap(), "--execute", "--confirm"],
    );
    assert!(!output.status.success());
    assert!(workspace.media_file().exists());
}

#[test]
fn config_init_writes_defaults_once() {
    let workspace = Workspace::new();
    let output = workspace.run(&["config", "init"]);
    assert!(output.status.success(), "{output:?}");
    assert!(workspace.path().join("config.ron").is_file());
    assert!(workspace.run(&["config", "validate"]).status.success());
    assert!(!workspace.run(&["config", "init"]).status.success());
}

#[test]
fn restore_verifies_and_exports() {
    let workspace = Workspace::new();
    let input = workspace.write_library();
    assert!(
        workspace
            .run(&["analyze", input.to_str().unwrap()])
            .status
            .success()
    );
    let file_name = fs::read_dir(workspace.backup_dir())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .find(|name| name.starts_with("analysis_"))
        .unwrap();
    let exported = workspace.path().join("exported.json");
    let output = workspace.run(&[
        "backup",
        "restore",
        &file_name,
        "--output",
        exported.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{output:?}");
    let stdout = stdout(&output);
    assert!(stdout.contains("Type: analysis"));
    assert!(stdout.contains("Items: 2"));
    assert!(stdout.contains("Verified: yes"));
    assert!(exported.is_file());
}
