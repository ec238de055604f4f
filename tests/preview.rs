mod common;

use assert_cmd::Command;
use common::{TestWorkspace, parse_table_row};
use predicates::prelude::*;

#[test]
fn preview_shows_coerced_cells() {
    let workspace = TestWorkspace::new();
    let input = workspace.write(
        "people.csv",
        "age,score,city\n34,1.50,Oslo\n28,,Lima\n",
    );

    let assert = Command::cargo_bin("csv-profiler")
        .expect("binary exists")
        .args(["preview", "-i", input.to_str().expect("utf8 path")])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();

    let mut lines = stdout.lines();
    assert_eq!(
        parse_table_row(lines.next().expect("header row")),
        vec!["age", "score", "city"]
    );
    lines.next();
    // "1.50" coerces to the number 1.5; whole numbers drop the fraction.
    assert_eq!(
        parse_table_row(lines.next().expect("first row")),
        vec!["34", "1.5", "Oslo"]
    );
    // Null cells render blank and collapse out of the parsed row.
    assert_eq!(
        parse_table_row(lines.next().expect("second row")),
        vec!["28", "Lima"]
    );
}

#[test]
fn preview_caps_rows_at_the_requested_count() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("digits.csv", "v\n1\n2\n3\n4\n5\n");

    let assert = Command::cargo_bin("csv-profiler")
        .expect("binary exists")
        .args([
            "preview",
            "-i",
            input.to_str().expect("utf8 path"),
            "--rows",
            "2",
        ])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();

    // Header, separator, and exactly two data rows.
    assert_eq!(stdout.lines().count(), 4);
    assert!(stdout.contains('2'));
    assert!(!stdout.contains('3'));
}

#[test]
fn preview_of_headers_only_input_fails() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("empty.csv", "a,b\n");

    Command::cargo_bin("csv-profiler")
        .expect("binary exists")
        .args(["preview", "-i", input.to_str().expect("utf8 path")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No data rows found"));
}

#[test]
fn preview_reads_stdin_with_explicit_delimiter() {
    Command::cargo_bin("csv-profiler")
        .expect("binary exists")
        .args(["preview", "-i", "-", "--delimiter", ";"])
        .write_stdin("a;b\n1;x\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("x"));
}
