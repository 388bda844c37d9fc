use crate::cli::ArchiveVariant;
use crate::domain::models::{BuildReport, CommandSpec, Escalation, Platform};
use crate::error::{find_tool_error, ToolError};
use crate::services::archive::{ensure_archive, ArchiveFetcher, ArchiveRequest};
use crate::services::packages::ensure_packages;
use crate::services::platform::profile;
use crate::services::privilege::{decide, PrivilegeContext};
use crate::services::runner::CommandRunner;
use std::path::PathBuf;
use tracing::info;

/// Resolved inputs for one bootstrap run.
pub struct BootstrapPlan {
    pub platform: Platform,
    pub variant: ArchiveVariant,
    pub url: String,
    pub sha256: Option<String>,
    pub archive_dir: PathBuf,
    pub archive_zip: PathBuf,
    /// Build command without the libtorch environment.
    pub build: CommandSpec,
    pub build_env: Vec<(String, String)>,
    /// Self re-invocation under the escalation helper.
    pub reinvoke: CommandSpec,
    pub dry_run: bool,
}

pub enum BootstrapOutcome {
    /// The re-invoked child did the work and already reported.
    Delegated,
    Completed(BuildReport),
}

fn escalate(plan: &BootstrapPlan, runner: &mut dyn CommandRunner) -> anyhow::Result<()> {
    info!(
        command = %plan.reinvoke.display(),
        "not running as root, re-invoking with elevated privileges"
    );
    runner.run(&plan.reinvoke).map_err(|e| match find_tool_error(&e) {
        Some(ToolError::ChildFailed { .. }) => e,
        _ => ToolError::Escalation {
            helper: plan.reinvoke.program.clone(),
            reason: format!("{:#}", e),
        }
        .into(),
    })
}

pub fn run_bootstrap(
    plan: &BootstrapPlan,
    privilege: &PrivilegeContext,
    runner: &mut dyn CommandRunner,
    fetcher: &dyn ArchiveFetcher,
) -> anyhow::Result<BootstrapOutcome> {
    let escalation = decide(privilege);
    if escalation == Escalation::Reinvoke && !plan.dry_run {
        escalate(plan, runner)?;
        return Ok(BootstrapOutcome::Delegated);
    }

    let mut steps = Vec::new();
    if escalation == Escalation::Reinvoke {
        steps.push(plan.reinvoke.clone());
    }

    let profile = profile(plan.platform);
    info!(
        platform = ?profile.platform,
        manager = profile.package_manager,
        "checking native dependencies"
    );
    let missing_packages = ensure_packages(profile, runner, &mut steps)?;

    let archive = ensure_archive(
        &ArchiveRequest {
            url: &plan.url,
            sha256: plan.sha256.as_deref(),
            unpack_dir: plan.archive_dir.clone(),
            zip_path: plan.archive_zip.clone(),
            dry_run: plan.dry_run,
        },
        fetcher,
        runner,
        &mut steps,
    )?;

    let build = plan.build.clone().envs(&plan.build_env);
    steps.push(build.clone());
    runner.run(&build)?;

    Ok(BootstrapOutcome::Completed(BuildReport {
        platform: plan.platform,
        variant: plan.variant,
        escalation,
        missing_packages,
        archive,
        archive_dir: plan.archive_dir.clone(),
        steps,
        dry_run: plan.dry_run,
    }))
}
