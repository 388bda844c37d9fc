use crate::domain::models::{CheckItem, CommandSpec, DoctorReport, Platform};
use crate::services::config::{ProjectLayout, ToolConfig};
use crate::services::platform::{detect, profile};
use crate::services::runner::CommandRunner;
use std::path::{Path, PathBuf};

fn check_exists(name: &str, path: PathBuf) -> CheckItem {
    CheckItem {
        name: name.to_string(),
        status: if path.exists() { "ok" } else { "missing" }.to_string(),
    }
}

fn check_tool(name: &str, runner: &mut dyn CommandRunner, spec: Option<CommandSpec>) -> CheckItem {
    let status = match spec {
        Some(spec) if runner.probe(&spec) => "ok",
        Some(_) => "missing",
        None => "skipped",
    };
    CheckItem {
        name: name.to_string(),
        status: status.to_string(),
    }
}

pub fn doctor(
    host_root: &Path,
    layout: &ProjectLayout,
    cfg: &ToolConfig,
    runner: &mut dyn CommandRunner,
) -> DoctorReport {
    let platform: Option<Platform> = detect(host_root).ok();
    let mut checks = vec![CheckItem {
        name: "platform".to_string(),
        status: if platform.is_some() { "ok" } else { "unsupported" }.to_string(),
    }];

    checks.push(check_tool(
        "package_manager",
        runner,
        platform.map(|p| profile(p).manager_version_spec()),
    ));
    checks.push(check_tool(
        "unzip",
        runner,
        Some(CommandSpec::new("unzip").arg("-v")),
    ));
    checks.push(check_tool(
        "build_tool",
        runner,
        Some(CommandSpec::new(&cfg.build.program).arg("--version")),
    ));
    checks.push(check_tool(
        "proto_compiler",
        runner,
        CommandSpec::from_argv(&cfg.protos.compiler).map(|s| s.arg("--version")),
    ));

    checks.push(check_exists("server_dir", layout.server_dir(cfg)));
    checks.push(check_exists("archive", layout.archive_dir(cfg)));
    let proto_dir = layout.proto_dir(cfg);
    for file in &cfg.protos.files {
        checks.push(check_exists(&format!("proto:{}", file), proto_dir.join(file)));
    }

    let overall = if checks
        .iter()
        .all(|c| c.status == "ok" || c.status == "skipped")
    {
        "ok"
    } else {
        "needs_attention"
    }
    .to_string();

    DoctorReport {
        overall,
        platform,
        checks,
    }
}
