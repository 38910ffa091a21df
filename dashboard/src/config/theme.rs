// Urgency colours, painted as ANSI true-colour backgrounds.
use engine::analysis::urgency::UrgencyThresholds;
use serde::Deserialize;
use shared::models::Urgency;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UrgencyPalette {
    pub critical: String,
    pub warning: String,
    #[serde(default)]
    pub caution: Option<String>,
    #[serde(default = "default_text")]
    pub text: String,
}

fn default_text() -> String {
    "black".to_string()
}

const RED: &str = "#ffcccc";
const ORANGE: &str = "#ffe0b2";
const YELLOW: &str = "#fff9c4";

impl UrgencyPalette {
    /// Red for critical, yellow for warning.
    pub fn weekly() -> Self {
        Self {
            critical: RED.to_string(),
            warning: YELLOW.to_string(),
            caution: None,
            text: default_text(),
        }
    }

    /// Red, orange, then yellow for caution.
    pub fn staged() -> Self {
        Self {
            critical: RED.to_string(),
            warning: ORANGE.to_string(),
            caution: Some(YELLOW.to_string()),
            text: default_text(),
        }
    }

    pub fn for_thresholds(thresholds: &UrgencyThresholds) -> Self {
        if thresholds.caution.is_some() {
            Self::staged()
        } else {
            Self::weekly()
        }
    }

    pub fn background(&self, urgency: Urgency) -> Option<&str> {
        match urgency {
            Urgency::Critical => Some(&self.critical),
            Urgency::Warning => Some(&self.warning),
            Urgency::Caution => self.caution.as_deref(),
            Urgency::Normal => None,
        }
    }

    /// Wraps `text` in ANSI escapes for `urgency`; unstyled urgencies and
    /// unparsable backgrounds leave the text as is.
    pub fn paint(&self, text: &str, urgency: Urgency) -> String {
        match self.background(urgency).and_then(parse_hex) {
            Some((r, g, b)) => format!("\x1b[48;2;{};{};{}m{}{}\x1b[0m", r, g, b, self.foreground(), text),
            None => text.to_string(),
        }
    }

    /// Escape for the text colour: `black`, `white` or `#rrggbb`. Anything
    /// else keeps the terminal's own foreground.
    fn foreground(&self) -> String {
        match self.text.trim().to_lowercase().as_str() {
            "black" => "\x1b[30m".to_string(),
            "white" => "\x1b[97m".to_string(),
            other => parse_hex(other)
                .map(|(r, g, b)| format!("\x1b[38;2;{};{};{}m", r, g, b))
                .unwrap_or_default(),
        }
    }
}

fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
