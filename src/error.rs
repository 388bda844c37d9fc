use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum ToolError {
    #[error("unsupported host: neither /{debian} nor /{rhel} found under {}", .root.display())]
    UnsupportedHost {
        root: PathBuf,
        debian: &'static str,
        rhel: &'static str,
    },
    #[error("{manager} failed to install packages (exit status {code})")]
    PackageInstall { manager: String, code: i32 },
    #[error("failed to download {url}: {reason}")]
    Download { url: String, reason: String },
    #[error("privilege escalation via {helper} failed: {reason}")]
    Escalation { helper: String, reason: String },
    #[error("{program} exited with status {code}")]
    ChildFailed { program: String, code: i32 },
    #[error("proto definition not found: {}", .0.display())]
    MissingProto(PathBuf),
}

impl ToolError {
    pub fn code(&self) -> &'static str {
        match self {
            ToolError::UnsupportedHost { .. } => "UNSUPPORTED_HOST",
            ToolError::PackageInstall { .. } => "PACKAGE_INSTALL",
            ToolError::Download { .. } => "DOWNLOAD",
            ToolError::Escalation { .. } => "ESCALATION",
            ToolError::ChildFailed { .. } => "CHILD_FAILED",
            ToolError::MissingProto(_) => "MISSING_PROTO",
        }
    }

    /// Process exit status to surface. Child failures propagate their own status.
    pub fn exit_status(&self) -> i32 {
        match self {
            ToolError::PackageInstall { code, .. } | ToolError::ChildFailed { code, .. } => *code,
            _ => 1,
        }
    }
}

/// Finds the first `ToolError` in an anyhow context chain.
pub fn find_tool_error(err: &anyhow::Error) -> Option<&ToolError> {
    err.chain().find_map(|e| e.downcast_ref::<ToolError>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_status_is_propagated() {
        let err = ToolError::ChildFailed {
            program: "cargo".to_string(),
            code: 101,
        };
        assert_eq!(err.exit_status(), 101);
        assert_eq!(err.code(), "CHILD_FAILED");
    }

    #[test]
    fn tool_error_survives_context() {
        let err = anyhow::Error::new(ToolError::MissingProto(PathBuf::from("x.proto")))
            .context("generating stubs");
        let found = find_tool_error(&err).expect("tool error in chain");
        assert_eq!(found.code(), "MISSING_PROTO");
        assert_eq!(found.exit_status(), 1);
    }
}
