mod common;

use std::fs;

use assert_cmd::Command;
use common::TestWorkspace;
use predicates::prelude::*;

const SAMPLE: &str = "age,score,city\n34,10,Oslo\n28,12,Lima\n45,14,Oslo\n";

#[test]
fn export_stats_writes_one_row_per_column() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("people.csv", SAMPLE);
    let stats_path = workspace.path("stats.csv");

    Command::cargo_bin("csv-profiler")
        .expect("binary exists")
        .args([
            "export",
            "-i",
            input.to_str().expect("utf8 path"),
            "--stats",
            stats_path.to_str().expect("utf8 path"),
        ])
        .assert()
        .success();

    let contents = fs::read_to_string(&stats_path).expect("stats csv");
    let mut lines = contents.lines();
    assert_eq!(
        lines.next(),
        Some("Column,Type,Count,Null Count,Unique Count,Mean,Median,Std Dev,Min,Max,Mode")
    );
    assert_eq!(
        lines.next(),
        Some("age,numeric,3,0,3,35.6667,34.0000,7.0396,28.0000,45.0000,N/A")
    );
    lines.next();
    assert_eq!(
        lines.next(),
        Some("city,categorical,3,0,2,N/A,N/A,N/A,N/A,N/A,Oslo")
    );
}

#[test]
fn export_correlations_writes_the_square_matrix() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("trend.csv", "up,down\n1,6\n2,5\n3,4\n");
    let matrix_path = workspace.path("matrix.csv");

    Command::cargo_bin("csv-profiler")
        .expect("binary exists")
        .args([
            "export",
            "-i",
            input.to_str().expect("utf8 path"),
            "--correlations",
            matrix_path.to_str().expect("utf8 path"),
        ])
        .assert()
        .success();

    let contents = fs::read_to_string(&matrix_path).expect("matrix csv");
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Variable,up,down",
            "up,1.0000,-1.0000",
            "down,-1.0000,1.0000",
        ]
    );
}

#[test]
fn export_without_targets_fails() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("people.csv", SAMPLE);

    Command::cargo_bin("csv-profiler")
        .expect("binary exists")
        .args(["export", "-i", input.to_str().expect("utf8 path")])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Nothing to export; pass --stats and/or --correlations",
        ));
}

#[test]
fn export_correlations_require_two_numeric_columns() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("single.csv", "age,city\n34,Oslo\n28,Lima\n");
    let matrix_path = workspace.path("matrix.csv");

    Command::cargo_bin("csv-profiler")
        .expect("binary exists")
        .args([
            "export",
            "-i",
            input.to_str().expect("utf8 path"),
            "--correlations",
            matrix_path.to_str().expect("utf8 path"),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Correlation export requires at least 2 numeric columns; found 1",
        ));
    assert!(!matrix_path.exists());
}

#[test]
fn export_can_write_both_files_in_one_run() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("people.csv", SAMPLE);
    let stats_path = workspace.path("stats.csv");
    let matrix_path = workspace.path("matrix.csv");

    Command::cargo_bin("csv-profiler")
        .expect("binary exists")
        .args([
            "export",
            "-i",
            input.to_str().expect("utf8 path"),
            "--stats",
            stats_path.to_str().expect("utf8 path"),
            "--correlations",
            matrix_path.to_str().expect("utf8 path"),
        ])
        .assert()
        .success();

    assert!(stats_path.exists());
    assert!(matrix_path.exists());
}
