use shared::models::RentalRow;
use std::cmp::Ordering;

/// Keeps rows not yet returned, ordered by rental end date ascending.
/// Rows without an end date go last; ties keep sheet order.
pub fn select_open_sorted_by_deadline(rows: Vec<RentalRow>) -> Vec<RentalRow> {
    let mut open: Vec<RentalRow> = rows.into_iter().filter(|r| !r.record.returned).collect();
    open.sort_by(deadline_order);
    open
}

fn deadline_order(a: &RentalRow, b: &RentalRow) -> Ordering {
    let by_end = match (a.record.rental_end, b.record.rental_end) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_end.then_with(|| a.record.row_number.cmp(&b.record.row_number))
}
