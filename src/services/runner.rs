use crate::domain::models::CommandSpec;
use crate::error::ToolError;
use anyhow::Context;
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Seam between orchestration and real child processes.
pub trait CommandRunner {
    /// Runs to completion with inherited stdio. A non-zero exit is a
    /// `ToolError::ChildFailed` carrying the child's status.
    fn run(&mut self, spec: &CommandSpec) -> anyhow::Result<()>;

    /// Runs silently and reports whether it succeeded.
    fn probe(&mut self, spec: &CommandSpec) -> bool;
}

fn to_command(spec: &CommandSpec) -> Command {
    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args);
    if let Some(dir) = &spec.cwd {
        cmd.current_dir(dir);
    }
    for (k, v) in &spec.env {
        cmd.env(k, v);
    }
    cmd
}

#[derive(Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, spec: &CommandSpec) -> anyhow::Result<()> {
        info!(command = %spec.display(), cwd = ?spec.cwd, "running");
        let status = to_command(spec)
            .status()
            .with_context(|| format!("failed to spawn {}", spec.program))?;
        if status.success() {
            return Ok(());
        }
        Err(ToolError::ChildFailed {
            program: spec.program.clone(),
            code: status.code().unwrap_or(1),
        }
        .into())
    }

    fn probe(&mut self, spec: &CommandSpec) -> bool {
        let ok = to_command(spec)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false);
        debug!(command = %spec.display(), ok, "probe");
        ok
    }
}

/// Records commands instead of spawning them. Backs `--dry-run`.
#[derive(Default)]
pub struct PlanRunner {
    pub steps: Vec<CommandSpec>,
    pub probes: Vec<CommandSpec>,
    /// Answer given to every probe.
    pub probe_answer: bool,
    /// Program whose run fails with this status, for exercising failure paths.
    pub fail: Option<(String, i32)>,
}

impl CommandRunner for PlanRunner {
    fn run(&mut self, spec: &CommandSpec) -> anyhow::Result<()> {
        self.steps.push(spec.clone());
        match &self.fail {
            Some((program, code)) if *program == spec.program => Err(ToolError::ChildFailed {
                program: program.clone(),
                code: *code,
            }
            .into()),
            _ => Ok(()),
        }
    }

    fn probe(&mut self, spec: &CommandSpec) -> bool {
        self.probes.push(spec.clone());
        self.probe_answer
    }
}
