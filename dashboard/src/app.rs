// One load/render cycle, plus the interactive refresh loop around it.
use crate::components::chart::{bar::render_bar_chart, donut::render_site};
use crate::components::metrics::render_metrics;
use crate::components::table::{render_table, TableStyle};
use crate::config::theme::UrgencyPalette;
use crate::config::ReportSettings;
use chrono::NaiveDate;
use engine::RentalStatusService;
use shared::models::RentalReport;
use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered,
    NoOpenRentals,
    /// Empty sheet: a warning was shown and nothing else.
    Warning,
    /// The load failed; only the error message was shown.
    Failed,
}

pub struct App {
    service: RentalStatusService,
    report: ReportSettings,
    palette: UrgencyPalette,
}

impl App {
    pub fn new(service: RentalStatusService, report: ReportSettings, palette: UrgencyPalette) -> Self {
        App { service, report, palette }
    }

    pub async fn render<W: Write>(&self, out: &mut W, today: NaiveDate) -> io::Result<RenderOutcome> {
        writeln!(out, "{}", self.report.title)?;
        writeln!(out, "{}", "=".repeat(self.report.title.chars().count()))?;

        match self.service.load_report(today).await {
            Ok(report) => self.render_report(out, &report),
            Err(e) => {
                if e.is_warning() {
                    tracing::warn!(error = %e, "Nothing to render");
                    writeln!(out, "⚠ {}", e.user_message())?;
                    Ok(RenderOutcome::Warning)
                } else {
                    tracing::error!(error = %e, "Failed to load rental report");
                    writeln!(out, "❌ {}", e.user_message())?;
                    Ok(RenderOutcome::Failed)
                }
            }
        }
    }

    pub fn render_report<W: Write>(&self, out: &mut W, report: &RentalReport) -> io::Result<RenderOutcome> {
        writeln!(out, "Report date: {}", report.generated_on)?;
        render_metrics(out, &report.summary)?;

        writeln!(out)?;
        writeln!(out, "Rental Details")?;
        let style = TableStyle {
            palette: &self.palette,
            scope: self.report.style_scope,
            color: self.report.color,
        };
        render_table(out, &report.open_rentals, &style)?;

        if !report.has_open_rentals() {
            writeln!(out)?;
            writeln!(out, "ℹ No open rentals: every machine has been returned.")?;
            return Ok(RenderOutcome::NoOpenRentals);
        }

        writeln!(out)?;
        writeln!(out, "Units by Location")?;
        if self.report.sites.is_empty() {
            for (site, agg) in &report.by_destination {
                render_site(out, site, Some(agg))?;
            }
        } else {
            for site in &self.report.sites {
                if !render_site(out, site, report.destination(site))? {
                    tracing::debug!(site = %site, "No open rentals at site, skipping");
                }
            }
        }

        writeln!(out)?;
        writeln!(out, "Units by Equipment Type")?;
        render_bar_chart(out, &report.by_equipment, self.report.bar_width)?;
        Ok(RenderOutcome::Rendered)
    }

    /// Renders, then waits for a command per input line: `r` clears the cache
    /// and reloads, an empty line re-renders, `q` or end of input quits.
    pub async fn run_watch<R, W, F>(&self, input: R, out: &mut W, today: F) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
        F: Fn() -> NaiveDate,
    {
        let mut lines = input.lines();
        loop {
            self.render(out, today()).await?;
            writeln!(out)?;
            write!(out, "[r] refresh data  [enter] redraw  [q] quit > ")?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            match line.trim().to_lowercase().as_str() {
                "q" | "quit" => break,
                "r" | "refresh" => {
                    self.service.refresh().await;
                }
                "" => {}
                other => {
                    writeln!(out, "Unknown command '{}'", other)?;
                }
            }
            writeln!(out)?;
        }
        Ok(())
    }
}
