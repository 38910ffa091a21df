// rental-monitor: terminal dashboard for open equipment rentals
mod app;
mod components;
mod config;

use anyhow::{bail, Context};
use app::{App, RenderOutcome};
use chrono::{Local, NaiveDate};
use clap::Parser;
use config::{AppConfig, StyleScope};
use engine::analysis::urgency::UrgencyThresholds;
use engine::data::source::source_from_location;
use engine::RentalStatusService;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "rental-monitor", version, about = "Shows open equipment rentals and their deadlines")]
struct Cli {
    /// JSON config file replacing the built-in default
    #[arg(long)]
    config: Option<PathBuf>,

    /// Spreadsheet URL or local CSV path
    #[arg(long)]
    source: Option<String>,

    /// Report date (YYYY-MM-DD); defaults to the local date
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Urgency threshold preset: weekly or staged
    #[arg(long)]
    thresholds: Option<String>,

    #[arg(long, value_enum)]
    style_scope: Option<StyleScope>,

    #[arg(long)]
    no_color: bool,

    /// Stay open and reload on request
    #[arg(long)]
    watch: bool,
}

impl Cli {
    fn apply(&self, config: &mut AppConfig) -> anyhow::Result<()> {
        if let Some(source) = &self.source {
            config.engine.source.location = source.clone();
        }
        if let Some(name) = &self.thresholds {
            let Some(preset) = UrgencyThresholds::preset(name) else {
                bail!("unknown threshold preset '{}', expected 'weekly' or 'staged'", name);
            };
            config.engine.thresholds = preset;
        }
        if let Some(scope) = self.style_scope {
            config.report.style_scope = scope;
        }
        if self.no_color {
            config.report.color = false;
        }
        Ok(())
    }
}

fn init_tracing(level: &str) {
    // Logs go to stderr so the report on stdout stays readable.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("engine={level},rental_monitor={level},warn")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut app_config = match &cli.config {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load_default()?,
    };
    cli.apply(&mut app_config)?;
    init_tracing(&app_config.logging.level);

    tracing::info!(version = %app_config.version, "Starting rental monitor");

    let engine_settings = &app_config.engine;
    let source = source_from_location(
        &engine_settings.source.location,
        Duration::from_secs(engine_settings.source.timeout_secs),
    )?;
    let service = RentalStatusService::from_settings(engine_settings, source).context("invalid engine settings")?;
    let app = App::new(service, app_config.report.clone(), app_config.palette());

    let fixed_today = cli.today;
    let today = move || fixed_today.unwrap_or_else(|| Local::now().date_naive());
    let mut stdout = std::io::stdout();

    if cli.watch {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        app.run_watch(stdin, &mut stdout, today).await?;
        return Ok(());
    }

    let outcome = app.render(&mut stdout, today()).await?;
    if outcome == RenderOutcome::Failed {
        std::process::exit(1);
    }
    Ok(())
}
