// Dashboard configuration module
pub mod theme; // Urgency colours and how they are painted

// Mirrors assets/config/default.json. A user file given with --config replaces
// the embedded default wholesale; CLI flags then override single fields.
use anyhow::Context;
use engine::config::settings::EngineSettings;
use serde::Deserialize;
use std::path::Path;
use theme::UrgencyPalette;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub version: String,
    pub engine: EngineSettings,
    pub report: ReportSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportSettings {
    pub title: String,
    /// Destinations that get a distribution summary; empty means all.
    #[serde(default)]
    pub sites: Vec<String>,
    #[serde(default)]
    pub style_scope: StyleScope,
    #[serde(default = "default_color")]
    pub color: bool,
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,
    /// Falls back to a palette matching the configured thresholds.
    #[serde(default)]
    pub palette: Option<UrgencyPalette>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

/// Which part of a table row carries the urgency colour.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StyleScope {
    /// Only the remaining-days cell.
    #[default]
    Cell,
    /// The whole row.
    Row,
}

fn default_color() -> bool {
    true
}

fn default_bar_width() -> usize {
    40
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings { level: "info".to_string() }
    }
}

impl AppConfig {
    pub fn load_default() -> anyhow::Result<Self> {
        let config_str = include_str!("../../assets/config/default.json");
        Self::from_json(config_str).context("embedded default configuration is invalid")
    }

    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        Self::from_json(&config_str).with_context(|| format!("invalid config file '{}'", path.display()))
    }

    pub fn from_json(config_str: &str) -> anyhow::Result<Self> {
        let config: AppConfig = serde_json::from_str(config_str)?;
        Ok(config)
    }

    pub fn palette(&self) -> UrgencyPalette {
        self.report
            .palette
            .clone()
            .unwrap_or_else(|| UrgencyPalette::for_thresholds(&self.engine.thresholds))
    }
}
