#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestEnv {
    _tmp: TempDir,
    pub root: PathBuf,
    pub host: PathBuf,
    pub home: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let root = make_fixture_project(tmp.path());
        let host = tmp.path().join("host");
        fs::create_dir_all(&host).expect("create host root");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");

        Self {
            _tmp: tmp,
            root,
            host,
            home,
        }
    }

    pub fn mark_debian(&self) {
        fs::create_dir_all(self.host.join("etc")).expect("create etc");
        fs::write(self.host.join("etc/debian_version"), "12.5\n").expect("write marker");
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("bastion-dev");
        cmd.env("HOME", &self.home)
            .env("BASTION_DEV_HOST_ROOT", &self.host)
            .env_remove("BASTIONAI_BUILD_AS_ROOT")
            .env_remove("BASTION_DEV_ESCALATED")
            .env_remove("RUST_LOG")
            .arg("--root")
            .arg(&self.root);
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn run_json_failure(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .args(args)
            .assert()
            .failure()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("error json output")
    }

    /// A `sh` script standing in for the proto compiler. It refuses to run
    /// unless the output directory already exists, and logs one line per
    /// argument to `log`.
    pub fn fake_compiler(&self, log: &Path) -> String {
        let script = self.root.join("fake-protoc.sh");
        fs::write(
            &script,
            format!(
                r#"for a in "$@"; do
  case "$a" in
    --python_out=*) [ -d "${{a#--python_out=}}" ] || exit 3 ;;
  esac
done
for a in "$@"; do echo "$a" >> "{}"; done
echo "---" >> "{}"
"#,
                log.display(),
                log.display()
            ),
        )
        .expect("write fake compiler");
        format!("sh {}", script.display())
    }
}

fn make_fixture_project(base: &Path) -> PathBuf {
    let root = base.join("project");
    fs::create_dir_all(root.join("server/src")).expect("create server");
    fs::create_dir_all(root.join("client")).expect("create client");
    fs::create_dir_all(root.join("protos")).expect("create protos");

    fs::write(
        root.join("server/Cargo.toml"),
        "[package]\nname = \"server\"\nversion = \"0.1.0\"\n",
    )
    .expect("write server manifest");
    fs::write(
        root.join("protos/remote_torch.proto"),
        r#"syntax = "proto3";
package remote_torch;

service RemoteTorch {
  rpc Fetch (Reference) returns (Reference);
}

message Reference {
  string identifier = 1;
}
"#,
    )
    .expect("write proto");

    root
}
