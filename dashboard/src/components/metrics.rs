use shared::models::ReportSummary;
use shared::utils::format_units;
use std::io::{self, Write};

pub fn render_metrics<W: Write>(out: &mut W, summary: &ReportSummary) -> io::Result<()> {
    writeln!(
        out,
        "Total Units Rented: {}  |  Deadline ≤ {} Days: {} rentals  |  Locations: {}",
        format_units(summary.total_units),
        summary.window_days,
        summary.due_within_window,
        summary.location_count
    )
}
