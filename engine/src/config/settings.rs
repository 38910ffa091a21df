// Engine settings, deserialized from the `engine` section of the dashboard config
use crate::analysis::urgency::UrgencyThresholds;
use crate::error::EngineError;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct EngineSettings {
    pub source: SourceSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default = "UrgencyThresholds::weekly")]
    pub thresholds: UrgencyThresholds,
    /// Rows with at most this many days left count as "due soon" in the summary.
    #[serde(default = "default_deadline_window_days")]
    pub deadline_window_days: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceSettings {
    /// Spreadsheet URL or path to a local CSV export.
    pub location: String,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataSettings {
    pub csv_delimiter: String, // Should be char, but JSON string is easier
    /// Tried in order; the first format that parses wins.
    pub date_formats: Vec<String>,
}

fn default_deadline_window_days() -> i64 {
    7
}

fn default_cache_ttl_secs() -> u64 {
    60
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for DataSettings {
    fn default() -> Self {
        DataSettings {
            csv_delimiter: ",".to_string(),
            date_formats: vec![
                "%Y-%m-%d".to_string(),
                "%Y-%m-%d %H:%M:%S".to_string(),
                "%Y/%m/%d".to_string(),
                "%m/%d/%Y".to_string(),
                "%d/%m/%Y".to_string(),
                "%d-%m-%Y".to_string(),
                "%d %B %Y".to_string(),
            ],
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            source: SourceSettings {
                location: "rentals.csv".to_string(),
                cache_ttl_secs: default_cache_ttl_secs(),
                timeout_secs: default_timeout_secs(),
            },
            data: DataSettings::default(),
            thresholds: UrgencyThresholds::weekly(),
            deadline_window_days: default_deadline_window_days(),
        }
    }
}

impl DataSettings {
    pub fn delimiter(&self) -> Result<u8, EngineError> {
        match self.csv_delimiter.as_bytes() {
            [b] => Ok(*b),
            _ => Err(EngineError::Config(format!(
                "csv_delimiter must be a single ASCII character, got '{}'",
                self.csv_delimiter
            ))),
        }
    }
}

impl EngineSettings {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.source.location.trim().is_empty() {
            return Err(EngineError::Config("source.location is empty".to_string()));
        }
        if self.data.date_formats.is_empty() {
            return Err(EngineError::Config("data.date_formats is empty".to_string()));
        }
        self.data.delimiter()?;
        self.thresholds.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = EngineSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.data.delimiter().unwrap(), b',');
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let json = r#"{ "source": { "location": "https://example.com/sheet.csv" } }"#;
        let settings: EngineSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.source.cache_ttl_secs, 60);
        assert_eq!(settings.deadline_window_days, 7);
        assert_eq!(settings.thresholds, UrgencyThresholds::weekly());
        assert!(!settings.data.date_formats.is_empty());
    }

    #[test]
    fn test_multichar_delimiter_rejected() {
        let mut settings = EngineSettings::default();
        settings.data.csv_delimiter = ";;".to_string();
        assert!(matches!(settings.validate(), Err(EngineError::Config(_))));
    }

    #[test]
    fn test_blank_location_rejected() {
        let mut settings = EngineSettings::default();
        settings.source.location = "  ".to_string();
        assert!(settings.validate().is_err());
    }
}
