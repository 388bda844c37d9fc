use crate::domain::constants::{BUILD_AS_ROOT_ENV, ESCALATED_ENV};
use crate::domain::models::{CommandSpec, Escalation};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct PrivilegeContext {
    pub is_root: bool,
    pub override_set: bool,
    pub already_escalated: bool,
}

fn flag_set(name: &str) -> bool {
    std::env::var_os(name).is_some_and(|v| !v.is_empty())
}

impl PrivilegeContext {
    pub fn from_env() -> Self {
        Self {
            is_root: nix::unistd::geteuid().is_root(),
            override_set: flag_set(BUILD_AS_ROOT_ENV),
            already_escalated: flag_set(ESCALATED_ENV),
        }
    }
}

pub fn decide(ctx: &PrivilegeContext) -> Escalation {
    if ctx.is_root {
        Escalation::AlreadyRoot
    } else if ctx.override_set {
        Escalation::Overridden
    } else if ctx.already_escalated {
        Escalation::AlreadyEscalated
    } else {
        Escalation::Reinvoke
    }
}

/// `<helper...> <exe> <args...>` with the re-entry guard set.
pub fn reinvoke_spec<S: AsRef<str>>(helper: &[S], exe: &Path, args: &[String]) -> CommandSpec {
    let exe = exe.to_string_lossy().to_string();
    let spec = match CommandSpec::from_argv(helper) {
        Some(spec) => spec.arg(exe),
        None => CommandSpec::new(exe),
    };
    spec.args(args)
        .envs(&[(ESCALATED_ENV.to_string(), "1".to_string())])
}
