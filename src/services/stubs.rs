use crate::domain::models::{CommandSpec, StubReport};
use crate::error::ToolError;
use crate::services::runner::CommandRunner;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct StubRequest {
    pub compiler: Vec<String>,
    pub proto_dir: PathBuf,
    pub includes: Vec<PathBuf>,
    pub files: Vec<String>,
    pub out_dir: PathBuf,
    pub dry_run: bool,
}

/// One compiler invocation per proto file. Both output flags point at `out_dir`.
pub fn stub_invocation(
    compiler: &[String],
    proto_dir: &Path,
    includes: &[PathBuf],
    input: &Path,
    out_dir: &Path,
) -> anyhow::Result<CommandSpec> {
    let mut spec = CommandSpec::from_argv(compiler).context("proto compiler command is empty")?;
    spec = spec.arg(format!("--proto_path={}", proto_dir.display()));
    for include in includes {
        spec = spec.arg(format!("--proto_path={}", include.display()));
    }
    let out = out_dir.display();
    Ok(spec
        .arg(format!("--python_out={}", out))
        .arg(format!("--grpc_python_out={}", out))
        .arg(input.to_string_lossy()))
}

pub fn generate_stubs(
    req: &StubRequest,
    runner: &mut dyn CommandRunner,
) -> anyhow::Result<StubReport> {
    let out_dir = if req.dry_run {
        req.out_dir.clone()
    } else {
        std::fs::create_dir_all(&req.out_dir)
            .with_context(|| format!("failed to create {}", req.out_dir.display()))?;
        req.out_dir.canonicalize()?
    };

    let mut invocations = Vec::new();
    for file in &req.files {
        let input = req.proto_dir.join(file);
        if !input.is_file() {
            return Err(ToolError::MissingProto(input).into());
        }
        invocations.push(stub_invocation(
            &req.compiler,
            &req.proto_dir,
            &req.includes,
            &input,
            &out_dir,
        )?);
    }

    for spec in &invocations {
        info!(command = %spec.display(), "generating stubs");
        runner.run(spec)?;
    }

    Ok(StubReport {
        out_dir,
        invocations,
        dry_run: req.dry_run,
    })
}
