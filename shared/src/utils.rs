// Label formatting shared by the report renderers.
use chrono::NaiveDate;

pub fn format_units(quantity: u64) -> String {
    format!("{} Unit", quantity)
}

pub fn format_days(days: i64) -> String {
    format!("{} Days", days)
}

/// Formats a percentage that is already rounded to one decimal, e.g. `33.3%`.
pub fn format_percent(percent: f64) -> String {
    format!("{:.1}%", percent)
}

pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Donut slice label: `Excavator / 5 / 50.0%`.
pub fn slice_label(label: &str, value: u64, percent: f64) -> String {
    format!("{} / {} / {}", label, value, format_percent(percent))
}

/// Bar label: `5 Unit (50.0%)`.
pub fn bar_label(value: u64, percent: f64) -> String {
    format!("{} ({})", format_units(value), format_percent(percent))
}
