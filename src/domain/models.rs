use crate::cli::ArchiveVariant;
use crate::domain::constants::{DEBIAN_MARKER, RHEL_MARKER};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Serialize)]
pub struct JsonErr {
    pub ok: bool,
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Coarse OS family, keyed off distro marker files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Debian,
    Rhel,
}

impl Platform {
    /// Detection order; the first marker found wins.
    pub const ALL: [Platform; 2] = [Platform::Debian, Platform::Rhel];

    /// Marker path relative to the host filesystem root.
    pub fn marker(self) -> &'static str {
        match self {
            Platform::Debian => DEBIAN_MARKER,
            Platform::Rhel => RHEL_MARKER,
        }
    }
}

/// A child process invocation. Also the unit of a dry-run plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<(String, String)>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: Vec::new(),
        }
    }

    /// Builds a spec from a non-empty argv slice. The first element is the program.
    pub fn from_argv<S: AsRef<str>>(argv: &[S]) -> Option<Self> {
        let (program, rest) = argv.split_first()?;
        Some(Self::new(program.as_ref()).args(rest))
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<S: AsRef<str>>(mut self, args: &[S]) -> Self {
        self.args.extend(args.iter().map(|a| a.as_ref().to_string()));
        self
    }

    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn envs(mut self, vars: &[(String, String)]) -> Self {
        self.env.extend(vars.iter().cloned());
        self
    }

    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Escalation {
    AlreadyRoot,
    Overridden,
    AlreadyEscalated,
    Reinvoke,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchiveStatus {
    Present,
    Downloaded,
    Planned,
}

#[derive(Debug, Serialize)]
pub struct BuildReport {
    pub platform: Platform,
    pub variant: ArchiveVariant,
    pub escalation: Escalation,
    pub missing_packages: Vec<String>,
    pub archive: ArchiveStatus,
    pub archive_dir: PathBuf,
    pub steps: Vec<CommandSpec>,
    pub dry_run: bool,
}

#[derive(Debug, Serialize)]
pub struct StubReport {
    pub out_dir: PathBuf,
    pub invocations: Vec<CommandSpec>,
    pub dry_run: bool,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct EnvVar {
    pub name: String,
    pub value: String,
}

#[derive(Serialize, Clone)]
pub struct CheckItem {
    pub name: String,
    pub status: String,
}

#[derive(Serialize)]
pub struct DoctorReport {
    pub overall: String,
    pub platform: Option<Platform>,
    pub checks: Vec<CheckItem>,
}
