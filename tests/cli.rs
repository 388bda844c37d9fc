use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::str::contains;

fn cmd() -> Command {
    cargo_bin_cmd!("bastion-dev")
}

#[test]
fn help_lists_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("build"))
        .stdout(contains("protos"))
        .stdout(contains("doctor"));
}

#[test]
fn unknown_variant_is_rejected() {
    cmd()
        .args(["build", "--variant", "rocm"])
        .assert()
        .failure()
        .stderr(contains("invalid value"));
}

#[test]
fn missing_root_is_an_error() {
    cmd()
        .args(["--root", "/definitely/not/a/project", "env"])
        .assert()
        .failure()
        .stderr(contains("project root not found"));
}

#[test]
fn env_exports_take_no_variant() {
    cmd()
        .args(["env", "--variant", "cuda"])
        .assert()
        .code(2)
        .stderr(contains("unexpected argument"));
}
