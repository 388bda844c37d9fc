use crate::*;

pub fn handle_bootstrap_commands(
    cli: &Cli,
    layout: &ProjectLayout,
    cfg: &ToolConfig,
) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::Build { variant, dry_run } => {
            let platform = platform::detect(&cli.host_root)?;
            let variant = variant.unwrap_or(cfg.archive.variant);
            let archive_dir = layout.archive_dir(cfg);
            let build_env = current_build_env(&archive_dir);

            let exe = std::env::current_exe().context("cannot locate own executable")?;
            let args: Vec<String> = std::env::args_os()
                .skip(1)
                .map(|a| a.to_string_lossy().to_string())
                .collect();

            let plan = BootstrapPlan {
                platform,
                variant,
                url: cfg.archive.url(variant).to_string(),
                sha256: cfg.archive.sha256(variant).map(str::to_string),
                archive_dir: archive_dir.clone(),
                archive_zip: layout.archive_zip(cfg),
                build: CommandSpec::new(&cfg.build.program)
                    .args(&cfg.build.args)
                    .cwd(layout.server_dir(cfg)),
                build_env: as_pairs(&build_env),
                reinvoke: reinvoke_spec(&cfg.privilege.helper, &exe, &args),
                dry_run: *dry_run,
            };

            let privilege = PrivilegeContext::from_env();
            let outcome = if *dry_run {
                run_bootstrap(&plan, &privilege, &mut PlanRunner::default(), &NoopFetcher)?
            } else {
                run_bootstrap(
                    &plan,
                    &privilege,
                    &mut SystemRunner,
                    &HttpFetcher::default(),
                )?
            };

            let BootstrapOutcome::Completed(report) = outcome else {
                return Ok(true);
            };
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: true,
                        data: report
                    })?
                );
            } else if report.dry_run {
                println!("platform: {:?}", report.platform);
                println!("archive: {:?}", report.archive);
                for step in &report.steps {
                    println!("{}", step.display());
                }
            } else {
                println!(
                    "server built against {} (archive {:?})",
                    report.archive_dir.display(),
                    report.archive
                );
            }
        }
        Commands::Env => {
            let vars = current_build_env(&layout.archive_dir(cfg));
            print_out(cli.json, &vars, shell_export)?;
        }
        _ => return Ok(false),
    }

    Ok(true)
}
