//! smarthomed binary.
//!
//! # Usage
//!
//! ```bash
//! # Run the scenario named in smarthome.toml (or ./scenario.toml)
//! smarthomed
//!
//! # Run a specific scenario with another config file
//! smarthomed --config home.toml --scenario scenarios/demo.toml
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use smarthome_adapter_audit_json::JsonAuditLog;
use smarthome_adapter_virtual::DeviceFactory;
use smarthome_app::controller::Controller;
use smarthomed::config::{Config, DEFAULT_CONFIG_FILE};
use smarthomed::scenario::Scenario;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Smart-home controller simulation
#[derive(Parser, Debug)]
#[command(name = "smarthomed")]
#[command(about = "Replays a smart-home scenario against virtual devices")]
#[command(version)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Scenario to run, overriding the configured one
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Write the final audit log to this file
    #[arg(long)]
    audit: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config = Config::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(path) = args.scenario {
        config.scenario.path = path;
    }
    if let Some(path) = args.audit {
        config.audit.path = Some(path);
    }

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::new(&config.logging.filter))
        .init();

    tracing::info!(scenario = %config.scenario.path.display(), "smarthomed starting");

    // Adapters
    let factory = DeviceFactory::default();
    let audit = Arc::new(match &config.audit.path {
        Some(path) => JsonAuditLog::with_path(path),
        None => JsonAuditLog::in_memory(),
    });

    // Controller
    let mut controller = Controller::builder()
        .audit(Arc::clone(&audit))
        .history_cap(config.controller.history_cap)
        .energy_saving_cooldown(config.automation.energy_saving_cooldown)
        .build();

    // Scenario
    let scenario = Scenario::from_file(&config.scenario.path)
        .with_context(|| format!("loading scenario {}", config.scenario.path.display()))?;
    let report = scenario
        .run(&factory, &mut controller)
        .context("running scenario")?;

    for status in &report.reports {
        println!("{status}");
    }

    let records = audit.len().context("counting audit records")?;
    let written = audit.flush().context("flushing audit log")?;
    tracing::info!(
        steps = report.steps_run,
        audit_records = records,
        written,
        "scenario finished"
    );

    Ok(())
}
