// Days-remaining computation against an injected report date
use super::UrgencyPolicy;
use chrono::NaiveDate;
use shared::models::{RentalRecord, RentalRow};

/// Whole days from `today` until `rental_end`; negative when overdue and 0
/// when the end date is absent.
pub fn days_remaining(rental_end: Option<NaiveDate>, today: NaiveDate) -> i64 {
    rental_end.map_or(0, |end| (end - today).num_days())
}

/// Enriches each record with its days remaining and the urgency `policy`
/// assigns to that value. Records are taken by value; nothing is dropped.
pub fn compute_remaining<P>(records: Vec<RentalRecord>, today: NaiveDate, policy: &P) -> Vec<RentalRow>
where
    P: UrgencyPolicy + ?Sized,
{
    records
        .into_iter()
        .map(|record| {
            let days = days_remaining(record.rental_end, today);
            RentalRow {
                urgency: policy.classify(days),
                days_remaining: days,
                record,
            }
        })
        .collect()
}
