// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! End-to-end translation tests
//!
//! These tests run full translations against scratch workspaces, both
//! through the library entry point and through the compiled binary.


use similar_asserts::assert_eq;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use taptree::config::Config;
use taptree::translate;
use taptree_parser::TestNode;
use test_utils::{CALC_REPORT, ScratchWorkspace};

/// Config reading `report.tap` and writing `tests.json` inside `workspace`
fn file_config(workspace: &ScratchWorkspace) -> Config {
    Config {
        input: Some(workspace.path().join("report.tap")),
        output: Some(workspace.path().join("tests.json")),
        workspace: Some(workspace.path().to_path_buf()),
        ..Default::default()
    }
}

#[test]
fn test_run_writes_output_file() {
    let workspace = ScratchWorkspace::calc("run_output");

    let stats = translate::run(&file_config(&workspace)).expect("translation should succeed");
    assert_eq!(stats.roots, 1);
    assert_eq!(stats.subtests, 2);
    assert_eq!(stats.bytes, CALC_REPORT.len() as u64);

    let trees = workspace.trees("tests.json");
    let of_two = trees[0].find("sum of two").expect("nested subtest");
    assert_eq!(of_two.line, 4);
    assert_eq!(of_two.file, "test/calc.test.js");
    assert_eq!(of_two.filters(), vec!["sum", "of two"]);
}

#[test]
fn test_run_pretty_output_matches_node_layout() {
    let workspace = ScratchWorkspace::calc("run_pretty");
    translate::run(&file_config(&workspace)).expect("translation should succeed");

    let json = std::fs::read_to_string(workspace.path().join("tests.json")).expect("output");
    assert!(json.starts_with("[\n  {\n    \"label\": \"calc\",\n    \"command\": \"node\",\n"));
}

#[test]
fn test_run_missing_source_writes_nothing() {
    let workspace = ScratchWorkspace::empty("run_missing_source");
    workspace.write("report.tap", CALC_REPORT);

    let err = translate::run(&file_config(&workspace)).unwrap_err();
    assert!(format!("{err:#}").contains("test/calc.test.js"));
    assert!(!workspace.path().join("tests.json").exists());
}

#[test]
fn test_run_relative_to_workspace() {
    let workspace = ScratchWorkspace::calc("run_workspace");
    workspace.write("test/calc.test.js", "\n\n\n\n\n\ntest('sum', t)\n");
    std::fs::create_dir_all(workspace.path().join("out")).expect("create out dir");
    let config = Config {
        output: Some(workspace.path().join("out/tests.json")),
        compact: true,
        ..file_config(&workspace)
    };

    translate::run(&config).expect("translation should succeed");
    let trees = workspace.trees("out/tests.json");
    assert_eq!(trees[0].children[0].line, 7);
    assert_eq!(trees[0].children[0].children[0].line, 1);
}

// ============================================================================
// Binary tests
// ============================================================================

/// Environment variables read by the binary, cleared for every run
const TAPTREE_ENV: [&str; 6] = [
    "RUST_LOG",
    "TAPTREE_WORKSPACE",
    "TAPTREE_TEST_DIR",
    "TAPTREE_EXTENSION",
    "TAPTREE_COMMAND",
    "TAPTREE_RUNNER",
];

fn run_binary(
    workspace: &ScratchWorkspace,
    stdin: &[u8],
    args: &[&str],
    env: &[(&str, &str)],
) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_taptree"));
    command.args(args).current_dir(workspace.path());
    for key in TAPTREE_ENV {
        command.env_remove(key);
    }
    command.envs(env.iter().copied());

    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn taptree");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin)
        .expect("Failed to write report");
    child.wait_with_output().expect("Failed to wait for taptree")
}

fn stdout_trees(output: &Output) -> Vec<TestNode> {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON only")
}

#[test]
fn test_binary_reads_stdin_writes_stdout() {
    let workspace = ScratchWorkspace::calc("binary_stdin");
    let output = run_binary(&workspace, CALC_REPORT.as_bytes(), &[], &[]);

    assert!(output.status.success());
    let trees = stdout_trees(&output);
    assert_eq!(trees.len(), 1);
    assert_eq!(trees[0].label, "calc");
    assert_eq!(trees[0].children[0].label, "sum");
}

#[cfg(unix)]
#[test]
fn test_binary_input_from_stdin_device() {
    let workspace = ScratchWorkspace::calc("binary_dev_stdin");
    let output = run_binary(
        &workspace,
        CALC_REPORT.as_bytes(),
        &["--input", "/dev/stdin"],
        &[],
    );

    assert!(output.status.success());
    assert_eq!(stdout_trees(&output)[0].subtest_count(), 2);
}

#[test]
fn test_binary_orphan_subtest_fails_without_output() {
    let workspace = ScratchWorkspace::calc("binary_orphan");
    let output = run_binary(&workspace, b"    # Subtest: lost\n", &["-q"], &[]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("lost"));
}

#[test]
fn test_binary_empty_report() {
    let workspace = ScratchWorkspace::empty("binary_empty");
    let output = run_binary(&workspace, b"", &["--compact"], &[]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "[]\n");
}

#[test]
fn test_binary_invalid_utf8_warns_and_translates() {
    let workspace = ScratchWorkspace::calc("binary_lossy");
    let report = b"# Subtest: test/calc.test.js\n    # Subtest: s\xffm\n";
    let output = run_binary(&workspace, report, &["-q"], &[]);

    assert!(output.status.success());
    assert_eq!(stdout_trees(&output)[0].children[0].label, "s\u{fffd}m");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not valid UTF-8"), "stderr: {stderr}");
}

// ============================================================================
// Environment variable tests
// ============================================================================

#[test]
fn test_binary_convention_env_vars() {
    let workspace = ScratchWorkspace::empty("binary_env_conventions");
    workspace.write("spec/api.spec.mjs", "\ntest('lists users', t)\n");
    let report = "# Subtest: spec/api.spec.mjs\n    # Subtest: lists users\n";

    let output = run_binary(
        &workspace,
        report.as_bytes(),
        &[],
        &[
            ("TAPTREE_TEST_DIR", "spec"),
            ("TAPTREE_EXTENSION", ".spec.mjs"),
            ("TAPTREE_COMMAND", "bun"),
            ("TAPTREE_RUNNER", "node_modules/.bin/tap"),
        ],
    );

    assert!(output.status.success());
    let trees = stdout_trees(&output);
    assert_eq!(trees[0].label, "api");
    assert_eq!(trees[0].file, "spec/api.spec.mjs");

    let child = &trees[0].children[0];
    assert_eq!(child.command, "bun");
    assert_eq!(child.line, 2);
    assert_eq!(
        child.args,
        vec![
            "node_modules/.bin/tap".to_string(),
            "spec/api.spec.mjs".to_string(),
            "-g".to_string(),
            "lists users".to_string(),
        ]
    );
}

#[test]
fn test_binary_workspace_env_var() {
    let workspace = ScratchWorkspace::calc("binary_env_workspace");
    let elsewhere = ScratchWorkspace::empty("binary_env_cwd");
    let root = workspace.path().to_str().expect("utf-8 temp path");

    // Sources are only found through the workspace, not the working directory
    let output = run_binary(
        &elsewhere,
        CALC_REPORT.as_bytes(),
        &[],
        &[("TAPTREE_WORKSPACE", root)],
    );

    assert!(output.status.success());
    assert_eq!(stdout_trees(&output)[0].children[0].line, 3);
}

#[test]
fn test_binary_flag_overrides_env_var() {
    let workspace = ScratchWorkspace::calc("binary_env_override");
    let output = run_binary(
        &workspace,
        CALC_REPORT.as_bytes(),
        &["--runner", "bin/run.js"],
        &[("TAPTREE_RUNNER", "ignored/run.js")],
    );

    assert!(output.status.success());
    assert_eq!(stdout_trees(&output)[0].args[0], "bin/run.js");
}
