use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod domain;
mod error;
mod services;

pub use anyhow::Context;
pub use cli::*;
pub use domain::models::*;
pub use error::{find_tool_error, ToolError};
pub use services::archive::{HttpFetcher, NoopFetcher};
pub use services::bootstrap::{run_bootstrap, BootstrapOutcome, BootstrapPlan};
pub use services::config::{load_config, ProjectLayout, ToolConfig};
pub use services::doctor::doctor;
pub use services::environment::{as_pairs, current_build_env, shell_export};
pub use services::output::{print_error, print_out};
pub use services::platform;
pub use services::privilege::{reinvoke_spec, PrivilegeContext};
pub use services::runner::{PlanRunner, SystemRunner};
pub use services::stubs::{generate_stubs, StubRequest};

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "bastion_dev=info",
        1 => "bastion_dev=debug",
        _ => "bastion_dev=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let layout = ProjectLayout::resolve(&cli.root)?;
    let cfg = load_config(&layout.root, cli.config.as_deref())?;

    if commands::handle_bootstrap_commands(cli, &layout, &cfg)? {
        return Ok(());
    }
    if commands::handle_codegen_commands(cli, &layout, &cfg)? {
        return Ok(());
    }
    commands::handle_doctor_command(cli, &layout, &cfg)?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let tool = find_tool_error(&err);
            let code = tool.map(ToolError::code).unwrap_or("ERROR");
            print_error(cli.json, code, &err);
            let status = tool.map(ToolError::exit_status).unwrap_or(1);
            ExitCode::from(status.clamp(1, 255) as u8)
        }
    }
}
