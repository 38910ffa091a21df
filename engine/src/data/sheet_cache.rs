// Short-lived cache of the last fetched sheet.
use super::sheet_parser::RawSheet;
use std::time::{Duration, Instant};

struct CachedSheet {
    sheet: RawSheet,
    fetched_at: Instant,
}

pub struct SheetCache {
    ttl: Duration,
    entry: Option<CachedSheet>,
}

impl SheetCache {
    /// A zero `ttl` disables caching.
    pub fn new(ttl: Duration) -> Self {
        SheetCache { ttl, entry: None }
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// The cached sheet, if it was stored less than `ttl` before `now`.
    pub fn get(&self, now: Instant) -> Option<RawSheet> {
        self.entry
            .as_ref()
            .filter(|e| now.saturating_duration_since(e.fetched_at) < self.ttl)
            .map(|e| e.sheet.clone())
    }

    pub fn store(&mut self, sheet: RawSheet, now: Instant) {
        if self.is_enabled() {
            self.entry = Some(CachedSheet { sheet, fetched_at: now });
        }
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }
}

impl Default for SheetCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(60))
    }
}
