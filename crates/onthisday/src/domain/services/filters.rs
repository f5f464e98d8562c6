//! Exclusion Filters
//!
//! Narrow a day's search results down to the assets that may appear in a
//! memory. All filters keep the input order of surviving results.

use tracing::debug;

use crate::domain::{ExclusionConfig, PipelineError, SearchResult};
use crate::ports::PhotoServer;

/// Keep results captured on `day` of the month in their own local time.
///
/// Day searches cover a window wider than one day, so results from the
/// neighbouring days have to be dropped here.
pub fn retain_day(results: Vec<SearchResult>, day: u32) -> Vec<SearchResult> {
    results
        .into_iter()
        .filter(|result| {
            let keep = result.taken_on_day(day);
            if !keep {
                debug!(asset_id = %result.id, local_time = %result.local_time, "Dropping asset from another day");
            }
            keep
        })
        .collect()
}

/// Drop results showing any excluded person, matched by id or by name.
pub fn filter_people(results: Vec<SearchResult>, config: &ExclusionConfig) -> Vec<SearchResult> {
    if config.excluded_people().is_empty() {
        return results;
    }

    results
        .into_iter()
        .filter(|result| {
            let excluded = result
                .people_ids()
                .chain(result.people_names())
                .find(|value| config.excludes_person(value));
            if let Some(person) = excluded {
                debug!(asset_id = %result.id, person = %person, "Excluding asset by person");
            }
            excluded.is_none()
        })
        .collect()
}

/// Hierarchical tag match.
///
/// `pattern` matches `tag` when it is the whole tag or one of its
/// slash-delimited segments: excluding `Trips` hits `Trips`, `Trips/Beach`,
/// `Vacation/Trips` and `A/Trips/B`, but not `TripsAbroad`.
pub fn tag_matches(tag: &str, pattern: &str) -> bool {
    tag == pattern
        || tag.ends_with(&format!("/{pattern}"))
        || tag.starts_with(&format!("{pattern}/"))
        || tag.contains(&format!("/{pattern}/"))
}

fn excluded_tag<'a>(tags: &'a [String], patterns: &'a [String]) -> Option<(&'a str, &'a str)> {
    tags.iter().find_map(|tag| {
        patterns
            .iter()
            .find(|pattern| tag_matches(tag, pattern))
            .map(|pattern| (tag.as_str(), pattern.as_str()))
    })
}

/// Drop results carrying any tag that matches an excluded pattern.
///
/// Tags missing from a search result are fetched from the server one asset
/// at a time and stored on the result. A failed fetch aborts the whole pass.
pub async fn filter_tags<S>(
    server: &S,
    results: Vec<SearchResult>,
    config: &ExclusionConfig,
) -> Result<Vec<SearchResult>, PipelineError>
where
    S: PhotoServer + ?Sized,
{
    let patterns = config.excluded_tags();
    if patterns.is_empty() {
        return Ok(results);
    }

    let mut kept = Vec::with_capacity(results.len());
    for mut result in results {
        if result.tags.is_none() {
            let tags = server
                .fetch_asset_tags(&result.id)
                .await
                .map_err(|e| PipelineError::asset_tags(&result.id, e))?;
            result.tags = Some(tags);
        }

        let tags = result.tags.as_deref().unwrap_or_default();
        match excluded_tag(tags, patterns) {
            Some((tag, pattern)) => {
                debug!(asset_id = %result.id, tag = %tag, pattern = %pattern, "Excluding asset by tag");
            }
            None => kept.push(result),
        }
    }

    Ok(kept)
}
