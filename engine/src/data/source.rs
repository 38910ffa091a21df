// Where the rental sheet comes from. Sources are built explicitly and handed to
// the report service; nothing here is global.
use crate::error::EngineError;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Returns the sheet as CSV text.
    async fn fetch(&self) -> Result<String, EngineError>;
    fn describe(&self) -> String;
}

pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvFileSource { path: path.into() }
    }
}

#[async_trait]
impl SheetSource for CsvFileSource {
    async fn fetch(&self) -> Result<String, EngineError> {
        info!(path = %self.path.display(), "Reading rental sheet from file");
        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            error!(path = %self.path.display(), error = %e, "Failed to read rental sheet");
            EngineError::SourceUnavailable(format!("{}: {}", self.path.display(), e))
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

pub struct HttpSheetSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSheetSource {
    /// `url` may be a Google Sheets share link; it is rewritten to the CSV export.
    pub fn new(client: reqwest::Client, url: &str) -> Self {
        HttpSheetSource { client, url: export_url(url) }
    }
}

#[async_trait]
impl SheetSource for HttpSheetSource {
    async fn fetch(&self) -> Result<String, EngineError> {
        info!(url = %self.url, "Fetching rental sheet");
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            error!(url = %self.url, error = %e, "Request for rental sheet failed");
            EngineError::SourceUnavailable(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            error!(url = %self.url, %status, "Rental sheet request returned an error status");
            return Err(EngineError::SourceUnavailable(format!("HTTP {} from {}", status, self.url)));
        }

        response
            .text()
            .await
            .map_err(|e| EngineError::SourceUnavailable(format!("failed to read response body: {}", e)))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Rewrites a Google Sheets link (`.../d/<id>/edit?usp=sharing#gid=0`) to its
/// CSV export URL. Any other URL is returned unchanged.
pub fn export_url(url: &str) -> String {
    const MARKER: &str = "docs.google.com/spreadsheets/d/";
    let Some(start) = url.find(MARKER).map(|i| i + MARKER.len()) else {
        return url.to_string();
    };
    let rest = &url[start..];
    let id_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let id = &rest[..id_end];
    if id.is_empty() || rest[id_end..].starts_with("/export") {
        return url.to_string();
    }

    let mut export = format!("https://docs.google.com/spreadsheets/d/{}/export?format=csv", id);
    if let Some(gid_pos) = rest.find("gid=") {
        let gid: String = rest[gid_pos + 4..].chars().take_while(|c| c.is_ascii_digit()).collect();
        if !gid.is_empty() {
            export.push_str("&gid=");
            export.push_str(&gid);
        }
    }
    export
}

/// Picks an HTTP source for `http(s)://` locations and a file source otherwise.
pub fn source_from_location(location: &str, timeout: Duration) -> Result<Arc<dyn SheetSource>, EngineError> {
    let location = location.trim();
    if location.starts_with("http://") || location.starts_with("https://") {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EngineError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Arc::new(HttpSheetSource::new(client, location)))
    } else {
        Ok(Arc::new(CsvFileSource::new(location)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_export_url_from_share_link() {
        let url = "https://docs.google.com/spreadsheets/d/1BvYyCa0DgJr/edit?usp=sharing";
        assert_eq!(export_url(url), "https://docs.google.com/spreadsheets/d/1BvYyCa0DgJr/export?format=csv");
    }

    #[test]
    fn test_export_url_keeps_gid() {
        let url = "https://docs.google.com/spreadsheets/d/abc123/edit#gid=42";
        assert_eq!(export_url(url), "https://docs.google.com/spreadsheets/d/abc123/export?format=csv&gid=42");
    }

    #[test]
    fn test_export_url_leaves_other_urls_alone() {
        let export = "https://docs.google.com/spreadsheets/d/abc123/export?format=csv";
        assert_eq!(export_url(export), export);
        assert_eq!(export_url("https://example.com/rentals.csv"), "https://example.com/rentals.csv");
    }

    #[test]
    fn test_source_from_location_picks_kind() {
        let http = source_from_location("https://example.com/r.csv", Duration::from_secs(5)).unwrap();
        assert_eq!(http.describe(), "https://example.com/r.csv");
        let file = source_from_location("data/rentals.csv", Duration::from_secs(5)).unwrap();
        assert_eq!(file.describe(), "data/rentals.csv");
    }

    #[tokio::test]
    async fn test_file_source_reads_text() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "Jenis_Mesin,Qty").unwrap();
        let source = CsvFileSource::new(file.path());
        assert_eq!(source.fetch().await.unwrap(), "Jenis_Mesin,Qty");
    }

    #[tokio::test]
    async fn test_missing_file_is_source_unavailable() {
        let source = CsvFileSource::new("definitely_missing_rentals.csv");
        let result = source.fetch().await;
        assert!(matches!(result, Err(EngineError::SourceUnavailable(_))));
    }
}
