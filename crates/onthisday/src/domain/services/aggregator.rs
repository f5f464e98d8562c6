//! Year Aggregator
//!
//! Walks the past years for the run's calendar day and groups the assets
//! that survive every filter by year.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::domain::services::filters::{filter_people, filter_tags, retain_day};
use crate::domain::{ExclusionConfig, PipelineError, SearchResult, TargetDate};
use crate::ports::PhotoServer;

/// Surviving assets per year. Only non-empty years are present.
pub type YearBuckets = HashMap<i32, Vec<SearchResult>>;

/// Collect buckets for every year from `current_year - 1` down to the
/// configured earliest year.
///
/// Years are scanned in descending order; the first failing call aborts the
/// scan. Years without the target day (29 February) are skipped.
pub async fn collect_year_buckets<S>(
    server: &S,
    config: &ExclusionConfig,
    target: TargetDate,
    current_year: i32,
) -> Result<YearBuckets, PipelineError>
where
    S: PhotoServer + ?Sized,
{
    let mut buckets = YearBuckets::new();

    for year in (config.earliest_year()..current_year).rev() {
        let Some(date) = target.in_year(year) else {
            debug!(year, day = %target, "Skipping year without the target day");
            continue;
        };

        info!(year, "Processing year");
        let found = server
            .search_day_images(date)
            .await
            .map_err(|source| PipelineError::Search { date, source })?;
        let images = retain_day(found, target.day);
        info!(year, count = images.len(), "Got images for the date");

        let images = filter_people(images, config);
        info!(year, count = images.len(), "After filtering by people");

        let images = filter_tags(server, images, config).await?;
        info!(year, count = images.len(), "After filtering by tags");

        if !images.is_empty() {
            buckets.insert(year, images);
        }
    }

    Ok(buckets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{at, ymd, FakePhotoServer};

    #[tokio::test]
    async fn test_scans_descending_and_keeps_non_empty_years() {
        let server = FakePhotoServer::new()
            .with_images(
                ymd(2023, 10, 19),
                vec![SearchResult::new("a", at("2023-10-19T09:00:00+02:00"))],
            )
            .with_images(
                ymd(2021, 10, 19),
                vec![
                    // Only from the neighbouring day, dropped by the day filter
                    SearchResult::new("b", at("2021-10-20T01:00:00+09:00")),
                ],
            );
        let config = ExclusionConfig::new().with_earliest_year(2020);

        let buckets = collect_year_buckets(&server, &config, TargetDate::new(10, 19), 2024)
            .await
            .unwrap();

        assert_eq!(
            server.searched(),
            vec![ymd(2023, 10, 19), ymd(2022, 10, 19), ymd(2021, 10, 19), ymd(2020, 10, 19)]
        );
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[&2023][0].id, "a");
        assert!(!buckets.contains_key(&2021));
    }

    #[tokio::test]
    async fn test_excluded_assets_leave_no_bucket() {
        let server = FakePhotoServer::new().with_images(
            ymd(2019, 10, 19),
            vec![SearchResult::new("a", at("2019-10-19T09:00:00Z")).with_person("p1", "Alice")],
        );
        let config = ExclusionConfig::new()
            .with_earliest_year(2019)
            .with_excluded_people(["Alice"]);

        let buckets = collect_year_buckets(&server, &config, TargetDate::new(10, 19), 2020)
            .await
            .unwrap();
        assert!(buckets.is_empty());
    }

    #[tokio::test]
    async fn test_skips_missing_leap_day() {
        let server = FakePhotoServer::new();
        let config = ExclusionConfig::new().with_earliest_year(2019);

        collect_year_buckets(&server, &config, TargetDate::new(2, 29), 2024)
            .await
            .unwrap();
        assert_eq!(server.searched(), vec![ymd(2020, 2, 29)]);
    }

    #[tokio::test]
    async fn test_search_failure_aborts() {
        let server = FakePhotoServer::new().failing_search(ymd(2022, 10, 19));
        let config = ExclusionConfig::new().with_earliest_year(2018);

        let err = collect_year_buckets(&server, &config, TargetDate::new(10, 19), 2024)
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Search { date, .. } if date == ymd(2022, 10, 19)));
        assert_eq!(server.searched().len(), 2);
    }

    #[tokio::test]
    async fn test_earliest_year_not_before_current() {
        let server = FakePhotoServer::new();
        let config = ExclusionConfig::new().with_earliest_year(2030);

        let buckets = collect_year_buckets(&server, &config, TargetDate::new(10, 19), 2024)
            .await
            .unwrap();
        assert!(buckets.is_empty());
        assert!(server.searched().is_empty());
    }
}
