// Terminal renderers for the sections of the rental report
pub mod chart;
pub mod metrics;
pub mod table;

/// Pads `text` with spaces to `width` characters.
pub(crate) fn pad_right(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

pub(crate) fn pad_left(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", " ".repeat(width.saturating_sub(len)), text)
}
