use shared::models::{RentalRow, ReportSummary};
use std::collections::HashSet;

/// Headline figures over the open rentals.
pub fn summarize(open_rows: &[RentalRow], window_days: i64) -> ReportSummary {
    let locations: HashSet<&str> = open_rows
        .iter()
        .map(|r| r.record.destination.as_str())
        .filter(|d| !d.is_empty())
        .collect();

    ReportSummary {
        total_units: open_rows.iter().map(|r| r.record.quantity as u64).sum(),
        open_count: open_rows.len(),
        due_within_window: open_rows.iter().filter(|r| r.days_remaining <= window_days).count(),
        window_days,
        location_count: locations.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{RentalRecord, Urgency};

    fn row(destination: &str, quantity: u32, days_remaining: i64) -> RentalRow {
        RentalRow {
            record: RentalRecord {
                row_number: 1,
                equipment_type: "Crane".to_string(),
                brand: String::new(),
                model: String::new(),
                quantity,
                origin: String::new(),
                destination: destination.to_string(),
                rental_start: None,
                rental_end: None,
                returned: false,
                reference_number: "-".to_string(),
            },
            days_remaining,
            urgency: Urgency::Normal,
        }
    }

    #[test]
    fn test_summary_counts() {
        let rows = vec![row("ISG", 3, -2), row("IRG", 4, 7), row("ISG", 1, 8), row("", 2, 30)];
        let summary = summarize(&rows, 7);
        assert_eq!(summary.total_units, 10);
        assert_eq!(summary.open_count, 4);
        assert_eq!(summary.due_within_window, 2);
        assert_eq!(summary.window_days, 7);
        assert_eq!(summary.location_count, 2);
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize(&[], 7);
        assert_eq!(summary.total_units, 0);
        assert_eq!(summary.open_count, 0);
        assert_eq!(summary.location_count, 0);
    }
}
