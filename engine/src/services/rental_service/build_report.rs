// The per-load transform: normalize, derive, filter, sort, aggregate.
use chrono::NaiveDate;
use shared::models::RentalReport;

use crate::analysis::aggregate::{aggregate_by_group, aggregate_two_level, GroupKey, ValueKey};
use crate::analysis::open_rentals::select_open_sorted_by_deadline;
use crate::analysis::remaining::compute_remaining;
use crate::analysis::summary::summarize;
use crate::analysis::UrgencyPolicy;
use crate::data::sheet_parser::{RawSheet, SheetParser};
use crate::error::EngineError;

pub fn handle_build_report(
    sheet: &RawSheet,
    parser: &SheetParser,
    today: NaiveDate,
    policy: &dyn UrgencyPolicy,
    window_days: i64,
) -> Result<RentalReport, EngineError> {
    if sheet.is_empty() {
        tracing::warn!("Rental sheet has no data rows");
        return Err(EngineError::EmptyResult);
    }

    let records = parser.load_and_normalize(sheet)?;
    let total_records = records.len();
    let open_rentals = select_open_sorted_by_deadline(compute_remaining(records, today, policy));

    if open_rentals.is_empty() {
        tracing::info!(records = total_records, "No open rentals; every record is returned");
    }

    let open_records = || open_rentals.iter().map(|r| &r.record);
    let by_equipment = aggregate_by_group(open_records(), GroupKey::EquipmentType, ValueKey::Quantity);
    let by_destination = aggregate_two_level(
        open_records(),
        GroupKey::Destination,
        GroupKey::EquipmentType,
        ValueKey::Quantity,
    );
    let summary = summarize(&open_rentals, window_days);

    tracing::info!(
        %today,
        records = total_records,
        open = open_rentals.len(),
        units = summary.total_units,
        due_soon = summary.due_within_window,
        policy = policy.name(),
        "Built rental report"
    );

    Ok(RentalReport {
        generated_on: today,
        open_rentals,
        summary,
        by_equipment,
        by_destination,
    })
}
