#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;

/// Two failures (function + storage) and one pass.
pub const MIXED_REPORT: &str = r#"{"results":{"total":3,"passed":1,"failed":2,"skipped":0,"passRate":33.3,"duration":1.2},"tests":[{"name":"a","category":"ui","status":"failed","error":"x is not a function"},{"name":"b","category":"app","status":"failed","error":"localStorage is not defined"},{"name":"c","category":"ui","status":"passed"}]}"#;

/// Report as the browser harness writes it: pre-formatted string figures and
/// percentage-string coverage.
pub const HARNESS_REPORT: &str = r#"{"results":{"total":3,"passed":1,"failed":2,"skipped":0,"passRate":"33.3","duration":"1.20","coverage":{"ui":"85%","events":"60%"}},"tests":[{"name":"a","category":"ui","status":"failed","error":"x is not a function"},{"name":"b","category":"app","status":"failed","error":"localStorage is not defined"},{"name":"c","category":"ui","status":"passed"}]}"#;

pub const CLEAN_REPORT: &str = r#"{"results":{"total":0,"passed":0,"failed":0,"skipped":0,"passRate":0,"duration":0},"tests":[]}"#;

#[allow(deprecated)]
pub fn cmd(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("testfix").unwrap();
    cmd.current_dir(cwd).env_remove("RUST_LOG");
    cmd
}

/// Default results directory relative to the working directory.
pub fn results_dir(cwd: &Path) -> PathBuf {
    cwd.join("test").join("test-results")
}

pub fn write_report(dir: &Path, name: &str, json: &str) -> PathBuf {
    std::fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, json).unwrap();
    path
}

pub fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}
