//! `ignition run --manifest <path> [--api-level <n>] [--state-dir <dir>] [--json]`

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{Table, Tabled};

use ignition_core::{RunReport, StartupOrchestrator, TraceOutcome};
use ignition_platform::capabilities::Capabilities;
use ignition_platform::channels::register_manifest_channels;
use ignition_platform::deeplink::{deeplink_task, DeepLinkRegistry};
use ignition_platform::manifest;
use ignition_platform::permissions::bootstrap_task;
use ignition_platform::services::{RecordingNotificationService, RecordingSplashHost};
use ignition_platform::splash::splash_task;

/// Simulate one process launch against a startup manifest.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the startup manifest (YAML).
    #[arg(long, short = 'm')]
    pub manifest: PathBuf,

    /// Platform API level reported by the simulated host.
    #[arg(long, default_value_t = 34)]
    pub api_level: u32,

    /// State directory for the permission store (defaults to the home
    /// directory, i.e. ~/.ignition/).
    #[arg(long)]
    pub state_dir: Option<PathBuf>,

    /// Emit the run report as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct TraceRow {
    #[tabled(rename = "Step")]
    name: String,
    #[tabled(rename = "Phase")]
    phase: String,
    #[tabled(rename = "Outcome")]
    outcome: String,
    #[tabled(rename = "ms")]
    duration_ms: u128,
}

impl RunArgs {
    pub fn run(self) -> Result<()> {
        let manifest = manifest::load_manifest(&self.manifest)
            .with_context(|| format!("cannot load manifest '{}'", self.manifest.display()))?;

        let state_dir = match self.state_dir {
            Some(dir) => dir,
            None => dirs::home_dir().ok_or_else(|| anyhow!("cannot determine home directory"))?,
        };

        let caps = Capabilities::from_api_level(self.api_level);
        let splash_host = Arc::new(RecordingSplashHost::new());
        let notifier = Arc::new(RecordingNotificationService::new(&caps));
        let registry = Arc::new(Mutex::new(DeepLinkRegistry::new()));

        let mut orch = StartupOrchestrator::new();
        if let Some(budget_ms) = manifest.startup_budget_ms {
            // Applies to every registered task, not only the splash.
            orch.set_default_budget(Duration::from_millis(budget_ms));
        }
        orch.register(splash_task(manifest.splash.clone(), splash_host))
            .context("register splash task")?;
        register_manifest_channels(&mut orch, &manifest, notifier)
            .context("register notification channels")?;
        orch.register(bootstrap_task(state_dir))
            .context("register permission bootstrap")?;
        orch.register(deeplink_task(registry, manifest.deep_links.clone()))
            .context("register deep-link routes")?;

        let report = orch
            .run(|| tracing::info!("bridge ready"))
            .with_context(|| format!("startup failed for '{}'", manifest.app_id))?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_report(&manifest.app_name, self.api_level, &report);
        }
        Ok(())
    }
}

fn print_report(app_name: &str, api_level: u32, report: &RunReport) {
    println!(
        "{} '{}' started (API {api_level}, {} ms)",
        "✓".green(),
        app_name,
        report.duration_ms
    );

    let rows: Vec<TraceRow> = report
        .trace
        .iter()
        .map(|entry| TraceRow {
            name: entry.name.clone(),
            phase: entry.phase.clone(),
            outcome: outcome_label(entry.outcome),
            duration_ms: entry.duration_ms,
        })
        .collect();
    println!("{}", Table::new(rows));
}

fn outcome_label(outcome: TraceOutcome) -> String {
    match outcome {
        TraceOutcome::Executed => "executed".green().to_string(),
        TraceOutcome::Skipped => "skipped".yellow().to_string(),
        TraceOutcome::Failed => "failed".red().to_string(),
    }
}
