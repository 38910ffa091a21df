// Open-rentals table with urgency styling
use super::pad_right;
use crate::config::theme::UrgencyPalette;
use crate::config::StyleScope;
use shared::models::{RentalRow, Urgency};
use shared::utils::{format_date, format_days, format_units};
use std::io::{self, Write};

const HEADERS: [&str; 10] = [
    "Reference", "Equipment", "Brand", "Model", "Qty", "From", "To", "Start", "End", "Remaining",
];
const REMAINING: usize = HEADERS.len() - 1;
const GAP: &str = "  ";

pub struct TableStyle<'a> {
    pub palette: &'a UrgencyPalette,
    pub scope: StyleScope,
    /// Without colour, urgent rows get a `[label]` marker instead.
    pub color: bool,
}

fn cells(row: &RentalRow, style: &TableStyle) -> [String; 10] {
    let r = &row.record;
    let mut remaining = format_days(row.days_remaining);
    if !style.color && style.palette.background(row.urgency).is_some() {
        remaining = format!("{} [{}]", remaining, row.urgency.label());
    }
    [
        r.reference_number.clone(),
        r.equipment_type.clone(),
        r.brand.clone(),
        r.model.clone(),
        format_units(r.quantity as u64),
        r.origin.clone(),
        r.destination.clone(),
        format_date(r.rental_start),
        format_date(r.rental_end),
        remaining,
    ]
}

pub fn render_table<W: Write>(out: &mut W, rows: &[RentalRow], style: &TableStyle) -> io::Result<()> {
    let body: Vec<[String; 10]> = rows.iter().map(|row| cells(row, style)).collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for line in &body {
        for (w, cell) in widths.iter_mut().zip(line.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let header: Vec<String> = HEADERS.iter().zip(widths).map(|(h, w)| pad_right(h, w)).collect();
    writeln!(out, "{}", header.join(GAP).trim_end())?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(out, "{}", rule.join(GAP))?;

    for (row, line) in rows.iter().zip(body) {
        // The last column is left unpadded so lines carry no trailing blanks.
        let mut padded: Vec<String> = line
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(i, (c, w))| if i == REMAINING { c.clone() } else { pad_right(c, w) })
            .collect();
        let urgency = if style.color { row.urgency } else { Urgency::Normal };
        match style.scope {
            StyleScope::Cell => {
                padded[REMAINING] = style.palette.paint(&padded[REMAINING], urgency);
                writeln!(out, "{}", padded.join(GAP))?;
            }
            StyleScope::Row => {
                writeln!(out, "{}", style.palette.paint(&padded.join(GAP), urgency))?;
            }
        }
    }
    Ok(())
}
