use anyhow::Context;
use clap::Parser;
use grainfall::Sandbox;
use grainfall::scenario::{ScenarioDefinition, ScenarioExecutor, ScenarioExecutorConfig};
use grainfall::simulation::ParticleKind;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Sandbox config file (RON); built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run a scenario file (RON) instead of the demo scene
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Number of ticks to run the demo scene for
    #[arg(long, default_value = "256")]
    ticks: u32,

    /// Write a PNG of the final canvas
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Directory for snapshots taken by scenario actions
    #[arg(long, default_value = "snapshots")]
    snapshot_dir: PathBuf,

    /// Draw the brush cursor into snapshots
    #[arg(long)]
    show_cursor: bool,

    /// Write the scenario execution report as JSON
    #[arg(long)]
    report: Option<PathBuf>,

    /// Log every scenario action
    #[arg(long)]
    verbose: bool,

    /// List particle kinds with their hotkeys and colors
    #[arg(long)]
    list_kinds: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.list_kinds {
        list_kinds();
        return Ok(());
    }

    let config = grainfall::config::load_config(args.config.as_deref())?;

    match &args.scenario {
        Some(path) => run_scenario(&args, path, &config),
        None => run_demo(&args, config),
    }
}

fn list_kinds() {
    println!("{:<8} {:<7} {:<20} flags", "kind", "hotkey", "color");
    for kind in ParticleKind::ALL {
        let hotkey = ParticleKind::PAINTABLE
            .iter()
            .position(|k| *k == kind)
            .map(|i| (i + 1).to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<8} {:<7} {:<20} {:?}",
            kind.name(),
            hotkey,
            format!("{:?}", kind.color()),
            kind.flags()
        );
    }
}

fn run_scenario(
    args: &Args,
    path: &std::path::Path,
    config: &grainfall::SandboxConfig,
) -> anyhow::Result<()> {
    let scenario = ScenarioDefinition::from_file(path)?;
    log::info!("Running scenario '{}' from {}", scenario.name, path.display());

    let mut sandbox = scenario.build_sandbox(config)?;
    let mut executor = ScenarioExecutor::with_config(ScenarioExecutorConfig {
        snapshot_dir: args.snapshot_dir.clone(),
        show_cursor: args.show_cursor,
        verbose: args.verbose,
        ..Default::default()
    });
    let report = executor.execute_scenario(&scenario, &mut sandbox)?;

    if let Some(report_path) = &args.report {
        report.save_json(report_path)?;
        log::info!("Report saved to {}", report_path.display());
    }
    if let Some(snapshot) = &args.snapshot {
        save_snapshot(args, &mut sandbox, snapshot)?;
    }

    if !report.passed {
        for failure in &report.verification_failures {
            log::error!("{}", failure.message);
        }
        anyhow::bail!(
            "Scenario '{}' failed {} verification(s)",
            scenario.name,
            report.verification_failures.len()
        );
    }
    Ok(())
}

fn save_snapshot(
    args: &Args,
    sandbox: &mut Sandbox,
    path: &std::path::Path,
) -> anyhow::Result<()> {
    if args.show_cursor {
        grainfall::snapshot::save_snapshot_with_cursor(sandbox, path)
    } else {
        grainfall::snapshot::save_snapshot(sandbox, path)
    }
}

fn run_demo(args: &Args, config: grainfall::SandboxConfig) -> anyhow::Result<()> {
    let mut sandbox = Sandbox::new(config).context("Invalid sandbox config")?;
    grainfall::demo::build_demo_scene(&mut sandbox);
    grainfall::demo::run_ticks(&mut sandbox, args.ticks);

    let counters = sandbox.debug_counters();
    log::info!(
        "Ran {} ticks: {} particles, {} rects, {} moves in the last tick",
        counters.tick_count,
        counters.particles,
        counters.prefab_len,
        counters.moves_last_tick
    );

    if let Some(snapshot) = &args.snapshot {
        save_snapshot(args, &mut sandbox, snapshot)?;
    }
    if let Some(report_path) = &args.report {
        let json = serde_json::to_string_pretty(&counters)
            .context("Failed to serialize debug counters")?;
        std::fs::write(report_path, json)
            .with_context(|| format!("Failed to write report: {}", report_path.display()))?;
    }
    Ok(())
}
