// Horizontal bar chart of units per equipment type, smallest first
use super::bar_length;
use crate::components::{pad_left, pad_right};
use shared::models::Aggregation;
use shared::utils::bar_label;
use std::io::{self, Write};

pub fn render_bar_chart<W: Write>(out: &mut W, aggregation: &Aggregation, width: usize) -> io::Result<()> {
    let slices = aggregation.sorted_by_value();
    let max = slices.iter().map(|s| s.value).max().unwrap_or(0);
    let label_width = slices.iter().map(|s| s.label.chars().count()).max().unwrap_or(0);

    for slice in &slices {
        let bar = "█".repeat(bar_length(slice.value, max, width));
        writeln!(
            out,
            "{}  {}  {}",
            pad_right(&slice.label, label_width),
            pad_right(&bar, width),
            bar_label(slice.value, slice.percent)
        )?;
    }
    writeln!(out, "{}", pad_left(&format!("Total: {} Unit", aggregation.total), label_width + width + 4))
}
