// Fetches the raw sheet, going through the TTL cache first.
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

use crate::data::sheet_cache::SheetCache;
use crate::data::sheet_parser::{RawSheet, SheetParser};
use crate::data::source::SheetSource;
use crate::error::EngineError;

pub async fn handle_load_sheet(
    source: &dyn SheetSource,
    cache: Arc<RwLock<SheetCache>>,
    parser: &SheetParser,
    now: Instant,
) -> Result<RawSheet, EngineError> {
    if let Some(sheet) = cache.read().await.get(now) {
        tracing::debug!(source = %source.describe(), rows = sheet.rows.len(), "Serving rental sheet from cache");
        return Ok(sheet);
    }

    let text = source.fetch().await?;
    let sheet = parser.read_raw(&text)?;
    tracing::info!(
        source = %source.describe(),
        columns = sheet.headers.len(),
        rows = sheet.rows.len(),
        "Fetched rental sheet"
    );

    cache.write().await.store(sheet.clone(), now);
    Ok(sheet)
}
