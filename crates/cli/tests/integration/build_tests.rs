//! `trimbuild build` against a stand-in `go`.

use predicates::prelude::*;

use super::common::TestEnv;

mod dry_run {
  use super::*;

  #[test]
  fn prints_rules_and_command() {
    let env = TestEnv::new();

    env
      .trimbuild_cmd()
      .args(["build", "--dry-run", "--map", "/gopath/pkg/mod/a@v1=gopath/pkg/mod/a/v1", "--project"])
      .arg(env.project())
      .args(["--", "./..."])
      .assert()
      .success()
      .stdout(predicate::str::contains("Trim rules: 2"))
      .stdout(predicate::str::contains("(project)"))
      .stdout(predicate::str::contains("(module)"))
      .stdout(predicate::str::contains("/gopath/pkg/mod/a@v1"))
      .stdout(predicate::str::contains("set -e"))
      .stdout(predicate::str::contains("./..."));

    assert!(!env.go_log().exists(), "dry run must not invoke go");
  }

  #[test]
  fn json_plan() {
    let env = TestEnv::new();
    let work_root = env.work_root();

    let output = env
      .trimbuild_cmd()
      .args(["--output-format", "json", "build", "--dry-run", "--debug", "--project"])
      .arg(env.project())
      .output()
      .unwrap();
    assert!(output.status.success());

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["work_root"], work_root.to_string_lossy().as_ref());
    assert_eq!(
      plan["output"],
      env.project().join("debug.bin").to_string_lossy().as_ref()
    );
    assert_eq!(
      plan["trimpath"],
      format!("{}=>{}", work_root.display(), env.project().display())
    );
    assert_eq!(plan["gcflags"][0], "-N");
    assert_eq!(plan["gcflags"][1], "-l");
  }
}

mod run {
  use super::*;

  #[test]
  fn builds_in_work_root() {
    let env = TestEnv::new();
    let work_root = env.create_work_root();
    let output = env.base().join("out").join("app");
    std::fs::create_dir_all(output.parent().unwrap()).unwrap();

    env
      .trimbuild_cmd()
      .arg("build")
      .arg("--project")
      .arg(env.project())
      .arg("-o")
      .arg(&output)
      .args(["--", "-tags", "netgo"])
      .assert()
      .success()
      .stdout(predicate::str::contains("Built"));

    assert!(output.exists());
    let lines = env.go_log_lines();
    assert_eq!(lines[0], work_root.to_string_lossy());
    assert_eq!(lines[1], "build");
    assert_eq!(lines[3], output.to_string_lossy());
    assert!(lines[4].starts_with("-gcflags=all='-trimpath="));
    assert_eq!(&lines[5..], ["-tags", "netgo"]);
  }

  #[test]
  fn mapping_file_adds_module_rules() {
    let env = TestEnv::new();
    env.create_work_root();
    let mapping = env.write_file(
      "mapping.json",
      r#"{"/gopath/pkg/mod/a@v1": "gopath/pkg/mod/a/v1"}"#,
    );

    env
      .trimbuild_cmd()
      .arg("build")
      .arg("--project")
      .arg(env.project())
      .arg("--mapping")
      .arg(&mapping)
      .assert()
      .success();

    let lines = env.go_log_lines();
    let module_rule = format!(
      "{}=>/gopath/pkg/mod/a@v1",
      env.rewrite_root().join("gopath/pkg/mod/a/v1").display()
    );
    assert!(lines[4].contains(&module_rule), "got {}", lines[4]);
  }

  #[test]
  fn overlay_mirrors_project_first() {
    let env = TestEnv::new();
    env.write_file("proj/.git/HEAD", "ref: refs/heads/main\n");

    env
      .trimbuild_cmd()
      .arg("build")
      .arg("--overlay")
      .args(["--ignore", ".git"])
      .arg("--project")
      .arg(env.project())
      .assert()
      .success();

    let work_root = env.work_root();
    assert!(work_root.join("main.go").exists());
    assert!(!work_root.join(".git").exists());
    assert!(env.project().join("exec.bin").exists());
  }

  #[test]
  fn missing_work_root_fails() {
    let env = TestEnv::new();

    env
      .trimbuild_cmd()
      .arg("build")
      .arg("--project")
      .arg(env.project())
      .assert()
      .failure()
      .stderr(predicate::str::contains("Build failed"));

    assert!(!env.go_log().exists());
  }

  #[test]
  fn compiler_failure_reports_command() {
    let env = TestEnv::new();
    env.create_work_root();
    let go = env.write_go("go-broken", "echo 'undefined: foo' >&2\nexit 2");

    env
      .trimbuild_cmd()
      .arg("build")
      .arg("--go")
      .arg(&go)
      .arg("--project")
      .arg(env.project())
      .assert()
      .failure()
      .stderr(predicate::str::contains("running cmd error"))
      .stderr(predicate::str::contains("undefined: foo"));
  }
}
