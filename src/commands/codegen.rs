use crate::*;

pub fn handle_codegen_commands(
    cli: &Cli,
    layout: &ProjectLayout,
    cfg: &ToolConfig,
) -> anyhow::Result<bool> {
    let Commands::Protos { compiler, dry_run } = &cli.command else {
        return Ok(false);
    };

    let compiler: Vec<String> = match compiler {
        Some(c) => c.split_whitespace().map(str::to_string).collect(),
        None => cfg.protos.compiler.clone(),
    };
    let req = StubRequest {
        compiler,
        proto_dir: layout.proto_dir(cfg),
        includes: layout.includes(cfg),
        files: cfg.protos.files.clone(),
        out_dir: layout.stub_out_dir(cfg),
        dry_run: *dry_run,
    };

    let report = if *dry_run {
        generate_stubs(&req, &mut PlanRunner::default())?
    } else {
        generate_stubs(&req, &mut SystemRunner)?
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
        for spec in &report.invocations {
            println!("{}", spec.display());
        }
    } else {
        println!(
            "generated stubs for {} proto file(s) in {}",
            report.invocations.len(),
            report.out_dir.display()
        );
    }

    Ok(true)
}

pub fn handle_doctor_command(
    cli: &Cli,
    layout: &ProjectLayout,
    cfg: &ToolConfig,
) -> anyhow::Result<bool> {
    let Commands::Doctor = &cli.command else {
        return Ok(false);
    };

    let report = doctor(&cli.host_root, layout, cfg, &mut SystemRunner);
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut {
                ok: true,
                data: report
            })?
        );
    } else {
        println!("overall: {}", report.overall);
        for c in report.checks {
            println!("{}\t{}", c.name, c.status);
        }
    }

    Ok(true)
}
