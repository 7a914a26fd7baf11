#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::{
  fs,
  os::unix::fs::PermissionsExt,
  path::{Path, PathBuf},
};
use tempfile::TempDir;

/// Stand-in for a script interpreter running the engine: every packaged
/// file whose contents mention `leak` gets an implied-global report, and
/// the options line is echoed when the engine source asks for it.
const FAKE_INTERPRETER: &str = r#"#!/bin/sh
exec awk '
/^\/\/ echo-options/ { echo = 1 }
echo && /^var JSLINT_OPTIONS = / { print; print "" }
/^jslintOneFile\(/ && /leak/ {
  split($0, parts, "\"")
  print parts[2] " 1: implied global '\''leak'\''"
  print ""
}
'
"#;

struct TestEnv {
  tmp: TempDir,
  interpreter: PathBuf,
  engine: PathBuf,
}

impl TestEnv {
  fn new() -> Self {
    Self::with_engine("var JSLINT = function () {};\n")
  }

  fn with_engine(source: &str) -> Self {
    let tmp = TempDir::new().expect("create temp dir");

    let interpreter = tmp.path().join("fake-js");
    fs::write(&interpreter, FAKE_INTERPRETER).expect("write fake interpreter");
    fs::set_permissions(&interpreter, fs::Permissions::from_mode(0o755)).expect("chmod fake interpreter");

    let engine = tmp.path().join("fulljslint.js");
    fs::write(&engine, source).expect("write engine");

    Self {
      tmp,
      interpreter,
      engine,
    }
  }

  fn file(&self, name: &str, contents: &str) -> String {
    let path = self.tmp.path().join(name);
    fs::write(&path, contents).expect("write source file");
    path.to_str().expect("utf8 path").to_string()
  }

  fn cmd(&self) -> Command {
    let mut cmd = Command::cargo_bin("jslint").unwrap();
    cmd
      .current_dir(self.tmp.path())
      .env_remove("JSLINT_FORMAT")
      .env_remove("JSLINT_LOG")
      .env("JSLINT_ENGINE", &self.engine)
      .env("JSLINT_INTERPRETER", &self.interpreter);
    cmd
  }

  fn path(&self) -> &Path {
    self.tmp.path()
  }
}

#[test]
fn clean_file_prints_nothing_and_exits_zero() {
  let env = TestEnv::new();
  let file = env.file("clean.js", "var a = 1;\n");

  env.cmd().arg(&file).assert().code(0).stdout(predicate::str::is_empty());
}

#[test]
fn implied_global_fails_the_run() {
  let env = TestEnv::new();
  let file = env.file("dirty.js", "leak = \"x\";\n");

  env
    .cmd()
    .arg(&file)
    .assert()
    .code(1)
    .stdout(contains(format!("{file} 1: implied global 'leak'")));
}

#[test]
fn diagnostics_follow_argument_order() {
  let env = TestEnv::new();
  let b = env.file("b.js", "leak();\nleak();\n");
  let a = env.file("a.js", "leak();\n");

  let out = env.cmd().args([&b, &a]).assert().code(1).get_output().stdout.clone();
  let out = String::from_utf8(out).unwrap();
  let b_at = out.find(&format!("{b} 1:")).expect("b reported");
  let a_at = out.find(&format!("{a} 1:")).expect("a reported");
  assert!(b_at < a_at, "{out}");
}

#[test]
fn options_are_passed_through_verbatim() {
  let env = TestEnv::with_engine("// echo-options\n");
  let file = env.file("a.js", "var a;\n");

  env
    .cmd()
    .args(["--options", "{bitwise: false, \"evil\": \"\\\\\"}", &file])
    .assert()
    .code(1)
    .stdout("var JSLINT_OPTIONS = {bitwise: false, \"evil\": \"\\\\\"};\n\n");
}

#[test]
fn missing_options_use_the_engine_sentinel() {
  let env = TestEnv::with_engine("// echo-options\n");
  let file = env.file("a.js", "var a;\n");

  env
    .cmd()
    .arg(&file)
    .assert()
    .stdout(contains("var JSLINT_OPTIONS = undefined;"));
}

#[test]
fn options_after_a_file_are_treated_as_files() {
  let env = TestEnv::new();
  let file = env.file("a.js", "var a;\n");

  env
    .cmd()
    .args([&file, "--options", "{}"])
    .assert()
    .code(2)
    .stdout(predicate::str::is_empty())
    .stderr(contains("--options"));
}

#[test]
fn contents_with_quotes_backslashes_and_newlines_survive_packaging() {
  let env = TestEnv::new();
  let file = env.file("tricky.js", "var s = \"a\\\"b\\\\\";\nleak(\"\\n\");\r\n");

  env
    .cmd()
    .arg(&file)
    .assert()
    .code(1)
    .stdout(contains("implied global 'leak'"));
}

#[test]
fn missing_source_file_aborts_without_output() {
  let env = TestEnv::new();
  let good = env.file("good.js", "leak();\n");

  env
    .cmd()
    .args([good.as_str(), "missing.js"])
    .assert()
    .code(2)
    .stdout(predicate::str::is_empty())
    .stderr(contains("failed to read source file `missing.js`"));
}

#[test]
fn missing_engine_is_reported() {
  let env = TestEnv::new();
  let file = env.file("a.js", "var a;\n");

  env
    .cmd()
    .arg("--engine")
    .arg(env.path().join("nope.js"))
    .arg(&file)
    .assert()
    .code(2)
    .stderr(contains("failed to read engine source"));
}

#[test]
fn missing_interpreter_is_reported() {
  let env = TestEnv::new();
  let file = env.file("a.js", "var a;\n");

  env
    .cmd()
    .args(["--interpreter", "definitely-not-an-interpreter-4c1d", &file])
    .assert()
    .code(2)
    .stderr(contains("failed to launch interpreter"));
}

#[test]
fn glob_patterns_expand_in_sorted_order() {
  let env = TestEnv::new();
  let second = env.file("src-b.js", "leak();\n");
  let first = env.file("src-a.js", "leak();\n");

  let out = env.cmd().arg("src-*.js").assert().code(1).get_output().stdout.clone();
  let out = String::from_utf8(out).unwrap();
  assert!(out.find("src-a.js").unwrap() < out.find("src-b.js").unwrap(), "{out}");
  assert!(!out.contains(&first) && !out.contains(&second), "patterns expand relative to cwd");
}

#[test]
fn json_format_reports_structured_diagnostics() {
  let env = TestEnv::new();
  let file = env.file("dirty.js", "leak();\n");

  let out = env
    .cmd()
    .args(["--format", "json", &file])
    .assert()
    .code(1)
    .get_output()
    .stdout
    .clone();
  let report: serde_json::Value = serde_json::from_slice(&out).expect("valid json output");
  assert_eq!(report["clean"], false);
  assert_eq!(report["diagnostics"][0]["file"], file.as_str());
  assert_eq!(report["diagnostics"][0]["line"], 1);
  assert_eq!(report["diagnostics"][0]["kind"], "implied_global");
}

#[test]
fn json_format_on_clean_run() {
  let env = TestEnv::new();
  let file = env.file("clean.js", "var a;\n");

  env
    .cmd()
    .args(["--format", "json", &file])
    .assert()
    .code(0)
    .stdout(contains("\"clean\": true"));
}

#[test]
fn existing_file_named_like_a_pattern_is_linted_as_named() {
  let env = TestEnv::new();
  env.file("page[id].js", "leak();\n");
  env.file("pagei.js", "var clean;\n");

  env
    .cmd()
    .arg("page[id].js")
    .assert()
    .code(1)
    .stdout(contains("page[id].js 1: implied global 'leak'"))
    .stdout(contains("pagei.js").not());
}
