// engine/src/services/rental_service/mod.rs
// RentalStatusService owns the injected source and the sheet cache; the work
// itself lives in the sibling handler modules.

use chrono::NaiveDate;
use shared::models::RentalReport;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::analysis::urgency::UrgencyThresholds;
use crate::config::settings::EngineSettings;
use crate::data::sheet_cache::SheetCache;
use crate::data::sheet_parser::SheetParser;
use crate::data::source::SheetSource;
use crate::error::EngineError;

pub mod build_report;
pub mod load_sheet;

#[derive(Clone)]
pub struct RentalStatusService {
    source: Arc<dyn SheetSource>,
    cache: Arc<RwLock<SheetCache>>,
    parser: SheetParser,
    thresholds: UrgencyThresholds,
    window_days: i64,
}

impl RentalStatusService {
    pub fn new(
        source: Arc<dyn SheetSource>,
        cache: Arc<RwLock<SheetCache>>,
        parser: SheetParser,
        thresholds: UrgencyThresholds,
        window_days: i64,
    ) -> Self {
        RentalStatusService { source, cache, parser, thresholds, window_days }
    }

    pub fn from_settings(settings: &EngineSettings, source: Arc<dyn SheetSource>) -> Result<Self, EngineError> {
        settings.validate()?;
        let parser = SheetParser::new(settings.data.delimiter()?, settings.data.date_formats.clone());
        let cache = SheetCache::new(Duration::from_secs(settings.source.cache_ttl_secs));
        Ok(Self::new(
            source,
            Arc::new(RwLock::new(cache)),
            parser,
            settings.thresholds,
            settings.deadline_window_days,
        ))
    }

    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    /// Builds the report for `today`. Fails with `SourceUnavailable`,
    /// `EmptyResult` or `UnreadableStructure` before any derived data exists.
    pub async fn load_report(&self, today: NaiveDate) -> Result<RentalReport, EngineError> {
        tracing::info!(source = %self.source.describe(), %today, "Loading rental report");
        let sheet = load_sheet::handle_load_sheet(self.source.as_ref(), self.cache.clone(), &self.parser, Instant::now()).await?;
        build_report::handle_build_report(&sheet, &self.parser, today, &self.thresholds, self.window_days)
    }

    /// Drops the cached sheet so the next load fetches again.
    pub async fn refresh(&self) {
        tracing::info!(source = %self.source.describe(), "Clearing cached rental sheet");
        self.cache.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::source::CsvFileSource;
    use async_trait::async_trait;
    use shared::models::Urgency;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    const HEADER: &str = "Jenis_Mesin,Merek,Type,Qty,From,To,Start_Sewa,Akhir_Sewa,Status_Kembali,No_Surat";

    struct StaticSource {
        text: Mutex<Result<String, String>>,
        fetches: AtomicUsize,
    }

    impl StaticSource {
        fn ok(text: &str) -> Arc<Self> {
            Arc::new(StaticSource { text: Mutex::new(Ok(text.to_string())), fetches: AtomicUsize::new(0) })
        }

        fn failing(msg: &str) -> Arc<Self> {
            Arc::new(StaticSource { text: Mutex::new(Err(msg.to_string())), fetches: AtomicUsize::new(0) })
        }

        fn set(&self, text: &str) {
            *self.text.lock().unwrap() = Ok(text.to_string());
        }

        fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SheetSource for StaticSource {
        async fn fetch(&self) -> Result<String, EngineError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.text.lock().unwrap().clone().map_err(EngineError::SourceUnavailable)
        }

        fn describe(&self) -> String {
            "static".to_string()
        }
    }

    fn service(source: Arc<dyn SheetSource>, ttl_secs: u64) -> RentalStatusService {
        let mut settings = EngineSettings::default();
        settings.source.cache_ttl_secs = ttl_secs;
        RentalStatusService::from_settings(&settings, source).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
    }

    fn sample_sheet() -> String {
        format!(
            "{}\n\
             Excavator,Komatsu,PC200,5,Depot, SiteA ,2023-12-01,2024-01-01,FALSE,SJ-01\n\
             Crane,Tadano,GR500,3,Depot,SiteB,2023-12-10,2024-01-20,FALSE,SJ-02\n\
             Crane,Tadano,GR500,7,Depot,SiteB,2023-12-10,2024-01-09,FALSE,\n\
             Genset,Denyo,DCA60,2,Depot,SiteA,2023-11-01,2023-12-01,TRUE,SJ-04\n\
             Forklift,Toyota,8FD,abc,Depot,SiteA,,not a date,FALSE,SJ-05",
            HEADER
        )
    }

    #[tokio::test]
    async fn test_load_report_end_to_end() {
        let report = service(StaticSource::ok(&sample_sheet()), 60).load_report(today()).await.unwrap();

        assert_eq!(report.generated_on, today());
        let refs: Vec<&str> = report.open_rentals.iter().map(|r| r.record.reference_number.as_str()).collect();
        // Sorted by end date, undated row last, returned Genset dropped.
        assert_eq!(refs, vec!["SJ-01", "-", "SJ-02", "SJ-05"]);

        let excavator = &report.open_rentals[0];
        assert_eq!(excavator.record.destination, "SiteA");
        assert_eq!(excavator.record.quantity, 5);
        assert_eq!(excavator.days_remaining, -4);
        assert_eq!(excavator.urgency, Urgency::Critical);

        let forklift = &report.open_rentals[3];
        assert_eq!(forklift.record.quantity, 0);
        assert_eq!(forklift.days_remaining, 0);

        assert_eq!(report.summary.total_units, 15);
        assert_eq!(report.summary.open_count, 4);
        assert_eq!(report.summary.location_count, 2);
        // -4, 4, 0 (undated) are within 7 days; 15 is not.
        assert_eq!(report.summary.due_within_window, 3);

        let site_b = report.destination("SiteB").unwrap();
        assert_eq!(site_b.total, 10);
        assert_eq!(site_b.get("Crane").unwrap().percent, 100.0);
        assert_eq!(report.by_equipment.get("Crane").unwrap().value, 10);
        assert!(report.by_equipment.get("Genset").is_none());
    }

    #[tokio::test]
    async fn test_staged_thresholds_from_settings() {
        let mut settings = EngineSettings::default();
        settings.thresholds = UrgencyThresholds::staged();
        let svc = RentalStatusService::from_settings(&settings, StaticSource::ok(&sample_sheet())).unwrap();
        let report = svc.load_report(today()).await.unwrap();
        let urgencies: Vec<Urgency> = report.open_rentals.iter().map(|r| r.urgency).collect();
        assert_eq!(urgencies, vec![Urgency::Critical, Urgency::Caution, Urgency::Normal, Urgency::Warning]);
    }

    #[tokio::test]
    async fn test_empty_sheet_is_empty_result() {
        let result = service(StaticSource::ok(HEADER), 60).load_report(today()).await;
        assert!(matches!(result, Err(EngineError::EmptyResult)));
    }

    #[tokio::test]
    async fn test_source_failure_is_reported() {
        let result = service(StaticSource::failing("HTTP 503"), 60).load_report(today()).await;
        match result {
            Err(EngineError::SourceUnavailable(msg)) => assert_eq!(msg, "HTTP 503"),
            other => panic!("expected SourceUnavailable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreadable_structure_is_reported() {
        let result = service(StaticSource::ok("name,age\nalice,3"), 60).load_report(today()).await;
        assert!(matches!(result, Err(EngineError::UnreadableStructure(_))));
    }

    #[tokio::test]
    async fn test_all_returned_gives_empty_report() {
        let text = format!("{}\nGenset,,,2,,ISG,,2024-01-01,TRUE,", HEADER);
        let report = service(StaticSource::ok(&text), 60).load_report(today()).await.unwrap();
        assert!(!report.has_open_rentals());
        assert!(report.by_equipment.is_empty());
        assert!(report.by_destination.is_empty());
        assert_eq!(report.summary.total_units, 0);
    }

    #[tokio::test]
    async fn test_cache_serves_repeat_loads_until_refresh() {
        let source = StaticSource::ok(&sample_sheet());
        let svc = service(source.clone(), 60);

        svc.load_report(today()).await.unwrap();
        source.set(&format!("{}\nCrane,,,1,,ISG,,2024-02-01,FALSE,", HEADER));
        let cached = svc.load_report(today()).await.unwrap();
        assert_eq!(source.fetch_count(), 1);
        assert_eq!(cached.open_rentals.len(), 4);

        svc.refresh().await;
        let fresh = svc.load_report(today()).await.unwrap();
        assert_eq!(source.fetch_count(), 2);
        assert_eq!(fresh.open_rentals.len(), 1);
    }

    #[tokio::test]
    async fn test_zero_ttl_always_fetches() {
        let source = StaticSource::ok(&sample_sheet());
        let svc = service(source.clone(), 0);
        svc.load_report(today()).await.unwrap();
        svc.load_report(today()).await.unwrap();
        assert_eq!(source.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_days_remaining_recomputed_per_load() {
        let svc = service(StaticSource::ok(&sample_sheet()), 60);
        let first = svc.load_report(today()).await.unwrap();
        let later = svc.load_report(NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()).await.unwrap();
        assert_eq!(first.open_rentals[0].days_remaining, -4);
        assert_eq!(later.open_rentals[0].days_remaining, -7);
    }

    #[tokio::test]
    async fn test_load_from_csv_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_sheet()).unwrap();
        file.flush().unwrap();
        let svc = service(Arc::new(CsvFileSource::new(file.path())), 60);
        let report = svc.load_report(today()).await.unwrap();
        assert_eq!(report.open_rentals.len(), 4);
        assert_eq!(svc.source_description(), file.path().display().to_string());
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut settings = EngineSettings::default();
        settings.thresholds = UrgencyThresholds { critical: 5, warning: Some(1), caution: None };
        let result = RentalStatusService::from_settings(&settings, StaticSource::ok(HEADER));
        assert!(matches!(result, Err(EngineError::Config(_))));
    }
}
