use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One normalized row of the rental sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalRecord {
    /// 1-based position among the sheet's data rows.
    pub row_number: usize,
    pub equipment_type: String,
    pub brand: String,
    pub model: String,
    pub quantity: u32,
    pub origin: String,
    pub destination: String,
    pub rental_start: Option<NaiveDate>,
    pub rental_end: Option<NaiveDate>,
    pub returned: bool,
    pub reference_number: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Urgency {
    // Declared from most to least urgent so `Ord` follows urgency.
    Critical,
    Warning,
    Caution,
    Normal,
}

impl Urgency {
    pub fn label(&self) -> &'static str {
        match self {
            Urgency::Critical => "critical",
            Urgency::Warning => "warning",
            Urgency::Caution => "caution",
            Urgency::Normal => "normal",
        }
    }
}

/// A record enriched with the fields derived for one report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalRow {
    pub record: RentalRecord,
    pub days_remaining: i64,
    pub urgency: Urgency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slice {
    pub label: String,
    pub value: u64,
    /// Share of the group total, rounded to one decimal.
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Aggregation {
    pub total: u64,
    pub slices: Vec<Slice>,
}

impl Aggregation {
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<&Slice> {
        self.slices.iter().find(|s| s.label == label)
    }

    /// Slices ordered by ascending value, label breaking ties.
    pub fn sorted_by_value(&self) -> Vec<Slice> {
        let mut slices = self.slices.clone();
        slices.sort_by(|a, b| a.value.cmp(&b.value).then_with(|| a.label.cmp(&b.label)));
        slices
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_units: u64,
    pub open_count: usize,
    /// Open rows with `days_remaining <= window_days`.
    pub due_within_window: usize,
    pub window_days: i64,
    pub location_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalReport {
    pub generated_on: NaiveDate,
    pub open_rentals: Vec<RentalRow>,
    pub summary: ReportSummary,
    pub by_equipment: Aggregation,
    pub by_destination: Vec<(String, Aggregation)>,
}

impl RentalReport {
    pub fn has_open_rentals(&self) -> bool {
        !self.open_rentals.is_empty()
    }

    pub fn destination(&self, name: &str) -> Option<&Aggregation> {
        self.by_destination
            .iter()
            .find(|(dest, _)| dest == name)
            .map(|(_, agg)| agg)
    }
}
