// Text renderings of the distribution charts
pub mod bar;
pub mod donut;

/// Length of a bar for `value` when `max` fills `width` cells. Non-zero
/// values always get at least one cell.
pub(crate) fn bar_length(value: u64, max: u64, width: usize) -> usize {
    if max == 0 || value == 0 {
        return 0;
    }
    let scaled = (value as f64 / max as f64 * width as f64).round() as usize;
    scaled.clamp(1, width.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_length_scales_to_width() {
        assert_eq!(bar_length(10, 10, 40), 40);
        assert_eq!(bar_length(5, 10, 40), 20);
        assert_eq!(bar_length(1, 1000, 40), 1);
        assert_eq!(bar_length(0, 10, 40), 0);
        assert_eq!(bar_length(3, 0, 40), 0);
    }
}
