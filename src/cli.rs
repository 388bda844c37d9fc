use crate::domain::constants::HOST_ROOT_ENV;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "bastion-dev",
    version,
    about = "Bootstrap and stub generation helpers for the BastionAI workspace"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        default_value = ".",
        help = "Project root containing server/, client/ and protos/"
    )]
    pub root: PathBuf,
    #[arg(
        long,
        global = true,
        help = "Config file (defaults to <root>/bastion-dev.toml when present)"
    )]
    pub config: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        env = HOST_ROOT_ENV,
        default_value = "/",
        help = "Filesystem root used to look up distro marker files"
    )]
    pub host_root: PathBuf,
    #[arg(short, long, global = true, action = ArgAction::Count, help = "Increase log verbosity")]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install native dependencies, fetch libtorch and build the server.
    Build {
        #[arg(long, value_enum)]
        variant: Option<ArchiveVariant>,
        #[arg(long, default_value_t = false, help = "Print the command plan without running it")]
        dry_run: bool,
    },
    /// Generate Python gRPC client stubs from the proto definitions.
    Protos {
        #[arg(long, help = "Compiler command line (whitespace separated)")]
        compiler: Option<String>,
        #[arg(
            long,
            default_value_t = false,
            help = "Print the compiler invocations without running them"
        )]
        dry_run: bool,
    },
    /// Print shell exports for LIBTORCH, LD_LIBRARY_PATH and PATH.
    Env,
    /// Report whether the host and workspace are ready for a build.
    Doctor,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveVariant {
    #[default]
    Cpu,
    Cuda,
}
