use crate::domain::models::CommandSpec;
use crate::error::{find_tool_error, ToolError};
use crate::services::platform::PlatformProfile;
use crate::services::runner::CommandRunner;
use tracing::info;

pub fn missing_packages(profile: &PlatformProfile, runner: &mut dyn CommandRunner) -> Vec<String> {
    profile
        .packages
        .iter()
        .filter(|p| !runner.probe(&profile.probe_spec(p)))
        .map(|p| p.to_string())
        .collect()
}

fn run_manager(
    profile: &PlatformProfile,
    runner: &mut dyn CommandRunner,
    spec: &CommandSpec,
) -> anyhow::Result<()> {
    runner.run(spec).map_err(|e| match find_tool_error(&e) {
        Some(ToolError::ChildFailed { code, .. }) => ToolError::PackageInstall {
            manager: profile.package_manager.to_string(),
            code: *code,
        }
        .into(),
        _ => e,
    })
}

/// Installs whatever is missing from the profile's package list.
/// Returns the packages that were missing, and the commands run in `steps`.
pub fn ensure_packages(
    profile: &PlatformProfile,
    runner: &mut dyn CommandRunner,
    steps: &mut Vec<CommandSpec>,
) -> anyhow::Result<Vec<String>> {
    let missing = missing_packages(profile, runner);
    if missing.is_empty() {
        info!(manager = profile.package_manager, "all packages already installed");
        return Ok(missing);
    }
    info!(
        manager = profile.package_manager,
        packages = %missing.join(" "),
        "installing missing packages"
    );
    if let Some(refresh) = profile.refresh_spec() {
        steps.push(refresh.clone());
        run_manager(profile, runner, &refresh)?;
    }
    let install = profile.install_spec(&missing);
    steps.push(install.clone());
    run_manager(profile, runner, &install)?;
    Ok(missing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Platform;
    use crate::services::platform::profile;
    use crate::services::runner::PlanRunner;

    #[test]
    fn nothing_runs_when_everything_is_installed() {
        let mut runner = PlanRunner {
            probe_answer: true,
            ..Default::default()
        };
        let mut steps = Vec::new();
        let missing = ensure_packages(profile(Platform::Debian), &mut runner, &mut steps).unwrap();
        assert!(missing.is_empty());
        assert!(steps.is_empty());
        assert_eq!(runner.probes.len(), profile(Platform::Debian).packages.len());
    }

    #[test]
    fn debian_refreshes_before_install() {
        let mut runner = PlanRunner::default();
        let mut steps = Vec::new();
        let missing = ensure_packages(profile(Platform::Debian), &mut runner, &mut steps).unwrap();
        assert_eq!(missing.len(), profile(Platform::Debian).packages.len());
        assert_eq!(steps[0].display(), "apt-get update");
        assert_eq!(steps[1].program, "apt-get");
        assert!(steps[1].args.contains(&"-y".to_string()));
        assert!(steps[1].args.contains(&"build-essential".to_string()));
    }

    #[test]
    fn install_failure_keeps_manager_status() {
        let mut runner = PlanRunner {
            fail: Some(("yum".to_string(), 100)),
            ..Default::default()
        };
        let mut steps = Vec::new();
        let err = ensure_packages(profile(Platform::Rhel), &mut runner, &mut steps).unwrap_err();
        let tool = find_tool_error(&err).expect("tool error");
        assert_eq!(tool.code(), "PACKAGE_INSTALL");
        assert_eq!(tool.exit_status(), 100);
    }
}
