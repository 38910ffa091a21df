// Per-site distribution: one block per destination, a share bar per type
use super::bar_length;
use crate::components::pad_right;
use shared::models::Aggregation;
use shared::utils::{format_units, slice_label};
use std::io::{self, Write};

const SHARE_WIDTH: usize = 20;

/// Renders one site's distribution. Returns `false` without writing anything
/// when the site has no open rentals.
pub fn render_site<W: Write>(out: &mut W, site: &str, aggregation: Option<&Aggregation>) -> io::Result<bool> {
    let Some(agg) = aggregation.filter(|a| !a.is_empty()) else {
        return Ok(false);
    };

    writeln!(out, "[ {} ]  {}", site, format_units(agg.total))?;
    for slice in &agg.slices {
        let filled = bar_length(slice.value, agg.total, SHARE_WIDTH);
        let share = format!("{}{}", "●".repeat(filled), "·".repeat(SHARE_WIDTH - filled));
        writeln!(out, "  {}  {}", pad_right(&share, SHARE_WIDTH), slice_label(&slice.label, slice.value, slice.percent))?;
    }
    Ok(true)
}
