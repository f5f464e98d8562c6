//! Memories Job - One complete pass for a calendar day
//!
//! Aggregate every past year first, then reconcile with the server. The
//! reconciler only starts once all buckets are final.

use chrono::{Datelike, NaiveDate};
use tracing::info;

use crate::domain::services::aggregator::collect_year_buckets;
use crate::domain::services::reconciler::{MemoryReconciler, ReconcileReport};
use crate::domain::{ExclusionConfig, PipelineError, TargetDate};
use crate::ports::PhotoServer;

/// Settings for a single run
#[derive(Debug, Clone, Default)]
pub struct RunSettings {
    pub exclusions: ExclusionConfig,
    /// Delete every existing memory before creating new ones
    pub cleanup_daily: bool,
    /// Compute buckets only, never write to the server
    pub dry_run: bool,
}

impl RunSettings {
    pub fn new(exclusions: ExclusionConfig) -> Self {
        Self {
            exclusions,
            cleanup_daily: false,
            dry_run: false,
        }
    }

    pub fn with_cleanup_daily(mut self, enabled: bool) -> Self {
        self.cleanup_daily = enabled;
        self
    }

    pub fn with_dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }
}

/// Summary of a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobReport {
    pub target: Option<TargetDate>,
    /// Years searched, newest first
    pub years_scanned: Vec<i32>,
    /// (year, surviving asset count), newest first
    pub buckets: Vec<(i32, usize)>,
    /// `None` for dry runs
    pub reconcile: Option<ReconcileReport>,
}

/// Run the whole pipeline for `today`'s month and day.
pub async fn run_memories_job<S>(
    server: &S,
    settings: &RunSettings,
    today: NaiveDate,
) -> Result<JobReport, PipelineError>
where
    S: PhotoServer + ?Sized,
{
    let target = TargetDate::from(today);
    let current_year = today.year();
    let earliest_year = settings.exclusions.earliest_year();
    info!(day = %target, from = current_year - 1, to = earliest_year, "Starting memories run");

    let buckets =
        collect_year_buckets(server, &settings.exclusions, target, current_year).await?;

    let mut summary: Vec<(i32, usize)> = buckets.iter().map(|(y, v)| (*y, v.len())).collect();
    summary.sort_unstable_by(|a, b| b.0.cmp(&a.0));

    let mut report = JobReport {
        target: Some(target),
        years_scanned: (earliest_year..current_year)
            .rev()
            .filter(|year| target.in_year(*year).is_some())
            .collect(),
        buckets: summary,
        reconcile: None,
    };

    if settings.dry_run {
        for (year, count) in &report.buckets {
            info!(year, entries = count, "Dry run: would create memory");
        }
        return Ok(report);
    }

    let reconciled = MemoryReconciler::new(server, settings.cleanup_daily)
        .reconcile(&buckets, target)
        .await?;
    info!(
        deleted = reconciled.deleted,
        created = reconciled.created.len(),
        "Memories run finished"
    );
    report.reconcile = Some(reconciled);

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MemoryEntry, SearchResult};
    use crate::testing::{at, ymd, FakePhotoServer};

    fn server() -> FakePhotoServer {
        FakePhotoServer::new()
            .with_images(
                ymd(2023, 10, 19),
                vec![
                    SearchResult::new("a", at("2023-10-19T08:00:00+02:00")).with_person("p1", "Alice"),
                    SearchResult::new("b", at("2023-10-19T09:00:00+02:00")).with_person("p2", "Bob"),
                ],
            )
            .with_images(
                ymd(2021, 10, 19),
                vec![SearchResult::new("c", at("2021-10-19T18:00:00-07:00"))],
            )
            .with_asset_tags("b", &["Work"])
            .with_asset_tags("c", &["Trips/Beach"])
            .with_memories(vec![MemoryEntry::new("old")])
    }

    fn settings() -> RunSettings {
        RunSettings::new(
            ExclusionConfig::new()
                .with_excluded_people(["p1"])
                .with_excluded_tags(["Trips"])
                .with_earliest_year(2020),
        )
    }

    #[tokio::test]
    async fn test_full_run() {
        let server = server();
        let report = run_memories_job(&server, &settings().with_cleanup_daily(true), ymd(2024, 10, 19))
            .await
            .unwrap();

        assert_eq!(report.years_scanned, vec![2023, 2022, 2021, 2020]);
        assert_eq!(report.buckets, vec![(2023, 1)]);
        assert_eq!(
            report.reconcile,
            Some(ReconcileReport {
                deleted: 1,
                created: vec![(2023, 1)]
            })
        );

        let created = server.created();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].asset_ids, vec!["b"]);
        assert_eq!(created[0].memory_at.to_rfc3339(), "2023-10-19T00:00:00+00:00");
    }

    #[tokio::test]
    async fn test_dry_run_never_writes() {
        let server = server();
        let report = run_memories_job(
            &server,
            &settings().with_cleanup_daily(true).with_dry_run(true),
            ymd(2024, 10, 19),
        )
        .await
        .unwrap();

        assert_eq!(report.buckets, vec![(2023, 1)]);
        assert!(report.reconcile.is_none());
        assert!(server.created().is_empty());
        assert!(server.deleted().is_empty());
    }

    #[tokio::test]
    async fn test_filter_failure_stops_before_reconcile() {
        let server = server().failing_tags("c");
        let err = run_memories_job(&server, &settings().with_cleanup_daily(true), ymd(2024, 10, 19))
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::AssetTags { .. }));
        assert!(server.deleted().is_empty());
        assert!(server.created().is_empty());
    }

    #[tokio::test]
    async fn test_leap_day_scans_only_leap_years() {
        let server = FakePhotoServer::new().with_images(
            ymd(2020, 2, 29),
            vec![SearchResult::new("leap", at("2020-02-29T10:00:00Z"))],
        );
        let settings = RunSettings::new(ExclusionConfig::new().with_earliest_year(2019));

        let report = run_memories_job(&server, &settings, ymd(2024, 2, 29))
            .await
            .unwrap();

        assert_eq!(report.years_scanned, vec![2020]);
        assert_eq!(server.searched(), vec![ymd(2020, 2, 29)]);
        assert_eq!(report.buckets, vec![(2020, 1)]);
        assert_eq!(server.created().len(), 1);
    }
}
