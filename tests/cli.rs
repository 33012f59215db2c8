//! The installed binary: points on stdin, JSON on stdout, exit status.

use std::io::Write;
use std::process::{Command, Output, Stdio};
use serde_json::{json, Value};

const LINE: &str = "[[0], [1], [2], [10], [11], [12]]";

fn run_binary(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_centered-clustering"))
        .args(["-q", "--threads", "2"])
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("binary starts");

    // The binary may exit on bad arguments before reading stdin
    let _ = child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes());

    child.wait_with_output().expect("binary exits")
}

fn stdout(output: &Output) -> &str {
    std::str::from_utf8(&output.stdout).expect("stdout is UTF-8")
}

fn stderr(output: &Output) -> &str {
    std::str::from_utf8(&output.stderr).expect("stderr is UTF-8")
}

fn assert_failed(output: &Output) {
    assert!(!output.status.success(), "expected failure, stdout: {}", stdout(output));
    assert!(output.stdout.is_empty(), "nothing is printed on failure");
}

#[test]
fn seed_in_first_group_prints_its_members() {
    let output = run_binary(&["-n", "2", "--radius", "1.5", "--seed=0"], LINE);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "[0,1,2]\n");
}

#[test]
fn remote_seed_prints_empty_array_and_succeeds() {
    let output = run_binary(&["-n", "2", "--radius", "1.5", "--seed=20"], LINE);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "[]\n");
}

#[test]
fn every_index_kind_prints_the_same_members() {
    for kind in ["auto", "brute-force", "ball-tree"] {
        let output = run_binary(&["-n", "2", "--radius", "1.5", "--seed=11.2", "--index", kind], LINE);
        assert!(output.status.success(), "{}: {}", kind, stderr(&output));
        assert_eq!(stdout(&output), "[3,4,5]\n", "{}", kind);
    }
}

#[test]
fn parallel_waves_print_the_same_members() {
    let output = run_binary(&["-n", "2", "--radius", "1.5", "--seed=0", "--parallel"], LINE);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "[0,1,2]\n");
}

#[test]
fn empty_input_fails() {
    assert_failed(&run_binary(&[], "[]"));
}

#[test]
fn ragged_input_fails() {
    assert_failed(&run_binary(&["-n", "1"], "[[0, 1], [2]]"));
}

#[test]
fn malformed_json_fails() {
    assert_failed(&run_binary(&[], "[[0, 1], [2, \"x\"]]"));
    assert_failed(&run_binary(&[], ""));
}

#[test]
fn negative_seed_is_a_value_not_a_flag() {
    let input = "[[-2], [-1], [0], [10]]";
    for args in [["--seed=-1"].as_slice(), ["--seed", "-1"].as_slice()] {
        let mut all = vec!["-n", "2", "--radius", "1.5"];
        all.extend_from_slice(args);
        let output = run_binary(&all, input);
        assert!(output.status.success(), "{:?}: {}", args, stderr(&output));
        assert_eq!(stdout(&output), "[0,1,2]\n", "{:?}", args);
    }
}

#[test]
fn non_finite_seed_fails() {
    for seed in ["--seed=nan", "--seed=-inf", "--seed=inf"] {
        let output = run_binary(&["-n", "2", "--radius", "1.5", seed], LINE);
        assert_failed(&output);
        assert!(stderr(&output).contains("not finite"), "{}", stderr(&output));
    }
}

#[test]
fn wrong_seed_dimension_fails() {
    assert_failed(&run_binary(&["-n", "2", "--seed=0,0"], LINE));
}

#[test]
fn invalid_parameters_fail() {
    assert_failed(&run_binary(&["-n", "0"], LINE));
    assert_failed(&run_binary(&["--radius", "0"], LINE));
    assert_failed(&run_binary(&["--radius=-1"], LINE));
}

/// Translations spread over 0..100 with a tight group at the origin
const POSES: &str = "[[0, 0, 0, 0, 0, 0], [2, 0, 0, 0, 0, 0], [4, 0, 0, 0, 0, 0], [100, 0, 0, 0, 0, 0]]";

#[test]
fn scale_translations_rescales_before_clustering() {
    // Unscaled, only the origin is within 0.5 of the seed
    let plain = run_binary(&["-n", "2", "--radius", "0.5"], POSES);
    assert!(plain.status.success(), "{}", stderr(&plain));
    assert_eq!(stdout(&plain), "[0]\n");

    // Scaled by pi / 100, the first three poses fall within 0.13 of each other
    let scaled = run_binary(&["-n", "2", "--radius", "0.5", "--scale-translations"], POSES);
    assert!(scaled.status.success(), "{}", stderr(&scaled));
    assert_eq!(stdout(&scaled), "[0,1,2]\n");
}

#[test]
fn scale_translations_needs_three_translation_columns() {
    assert_failed(&run_binary(&["-n", "2", "--scale-translations"], LINE));
}

#[test]
fn sweep_prints_a_facet_document() {
    let output = run_binary(&["-n", "2", "--seed=0", "--sweep", "3,9,2"], LINE);
    assert!(output.status.success(), "{}", stderr(&output));

    let doc: Value = serde_json::from_str(stdout(&output)).unwrap();
    assert_eq!(doc["what"], "clusterings");
    assert_eq!(doc["metadata"]["translations_scaling"], false);
    assert_eq!(doc["metadata"]["min_neighbors"], 2);
    assert_eq!(doc["metadata"]["radii"], json!([0.5, 1.5]));
    assert_eq!(doc["data"], json!([[0], [0, 1, 2]]));
}

#[test]
fn sweep_records_translation_scaling() {
    let output = run_binary(&["-n", "2", "--radius", "0.5", "--scale-translations", "--sweep", "2,2,1"], POSES);
    assert!(output.status.success(), "{}", stderr(&output));

    let doc: Value = serde_json::from_str(stdout(&output)).unwrap();
    assert_eq!(doc["metadata"]["translations_scaling"], 6.2832);
    // radius = 2 / 4 points
    assert_eq!(doc["metadata"]["radii"], json!([0.5]));
    assert_eq!(doc["data"], json!([[0, 1, 2]]));
}

#[test]
fn bad_sweep_range_fails() {
    assert_failed(&run_binary(&["--sweep", "3,9"], LINE));
    assert_failed(&run_binary(&["--sweep", "3,9,0"], LINE));
}
