//! wiguard-sim - Wi-Guard attack simulation & dashboard telemetry
//!
//! Usage:
//!   wiguard-sim list
//!   wiguard-sim simulate deauth
//!   wiguard-sim simulate evil_twin --cancel-after 2 --format json
//!   wiguard-sim dashboard --ticks 10 --tick-ms 500
//!   wiguard-sim --seed 42 --config wiguard.json dashboard

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use wiguard_sim::render;
use wiguard_sim::{
    AttackCatalog, DashboardView, Entropy, Result, RunStatus, SimConfig, SimError,
    SimulationController, StartOutcome,
};

#[derive(Parser)]
#[command(name = "wiguard-sim")]
#[command(about = "Synthetic attack simulation and live telemetry for the Wi-Guard dashboard")]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Seed for reproducible output
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the attack catalog
    List,

    /// Run one attack simulation, printing phases as they complete
    Simulate {
        /// Attack id (see `list`)
        attack: String,

        /// Wait before each phase in milliseconds
        #[arg(long)]
        phase_ms: Option<u64>,

        /// Cancel the run after this many phases
        #[arg(long)]
        cancel_after: Option<usize>,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        format: OutputFormat,
    },

    /// Mount the dashboard view and stream telemetry
    Dashboard {
        /// Stop after this many ticks (default: until Ctrl-C)
        #[arg(short, long)]
        ticks: Option<u64>,

        /// Tick period in milliseconds
        #[arg(long)]
        tick_ms: Option<u64>,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        format: OutputFormat,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormat {
    Pretty,
    Json,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wiguard_sim=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => SimConfig::from_json_file(path)?,
        None => SimConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let catalog = Arc::new(AttackCatalog::builtin());

    match cli.command {
        Commands::List => {
            println!("{}", render::render_catalog(&catalog));
            Ok(())
        }
        Commands::Simulate {
            attack,
            phase_ms,
            cancel_after,
            format,
        } => {
            if let Some(ms) = phase_ms {
                config.phase_interval_ms = ms;
            }
            config.validate()?;
            run_simulate(catalog, config, attack, cancel_after, format).await
        }
        Commands::Dashboard {
            ticks,
            tick_ms,
            format,
        } => {
            if let Some(ms) = tick_ms {
                config.tick_interval_ms = ms;
            }
            config.validate()?;
            run_dashboard(config, ticks, format).await
        }
    }
}

async fn run_simulate(
    catalog: Arc<AttackCatalog>,
    config: SimConfig,
    attack: String,
    cancel_after: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let Some(definition) = catalog.get(&attack) else {
        return Err(SimError::UnknownAttack {
            id: attack,
            available: catalog.ids().join(", "),
        });
    };

    if format == OutputFormat::Pretty {
        eprintln!(
            "Simulating {} [{}] - {}",
            definition.name, definition.severity, definition.description
        );
    }

    let mut root = Entropy::from_seed_option(config.seed);
    let mut controller = SimulationController::from_config(catalog.clone(), &config, root.fork());
    let mut rx = controller.subscribe();

    if let StartOutcome::Started { run_id } = controller.start(&attack) {
        info!(%run_id, "Run started from CLI");
    }

    let mut printed = 0usize;
    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let run = rx.borrow_and_update().clone();
                for phase in run.log.iter().skip(printed) {
                    match format {
                        OutputFormat::Pretty => println!("{}", render::render_phase(phase)),
                        OutputFormat::Json => println!("{}", render::to_json(phase)?),
                    }
                }
                printed = printed.max(run.log.len());

                if run.status == RunStatus::Running
                    && cancel_after.is_some_and(|n| run.log.len() >= n)
                {
                    controller.cancel();
                    continue;
                }
                if run.status.is_terminal() {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                controller.cancel();
                break;
            }
        }
    }

    let run = controller.snapshot();
    match format {
        OutputFormat::Pretty => eprintln!("{}", render::render_run_summary(&run)),
        OutputFormat::Json => println!("{}", render::to_json(&run)?),
    }
    Ok(())
}

async fn run_dashboard(config: SimConfig, ticks: Option<u64>, format: OutputFormat) -> Result<()> {
    let root = Entropy::from_seed_option(config.seed);
    let mut view = DashboardView::new(config, root);
    view.on_view_mount();
    let mut rx = view.subscribe_metrics();

    let mut seen = 0u64;
    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let window = rx.borrow_and_update().clone();
                seen += 1;
                match format {
                    OutputFormat::Pretty => println!(
                        "{:20} {}",
                        render::render_activity(&window),
                        render::render_stats(&view.stats())
                    ),
                    OutputFormat::Json => println!("{}", render::to_json(&view.state())?),
                }
                if ticks.is_some_and(|n| seen >= n) {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    view.on_view_unmount();
    Ok(())
}
