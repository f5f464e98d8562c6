//! ExclusionConfig - Which assets a run must leave out

use serde::{Deserialize, Serialize};

/// Earliest year scanned when none is configured
pub const DEFAULT_EARLIEST_YEAR: i32 = 2010;

/// Per-run exclusion rules
///
/// People entries match either a person id or a person name. Tag entries are
/// hierarchical patterns, see [`crate::tag_matches`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExclusionConfig {
    #[serde(default)]
    excluded_people: Vec<String>,
    #[serde(default)]
    excluded_tags: Vec<String>,
    /// 0 means unset
    #[serde(default)]
    earliest_year: i32,
}

impl ExclusionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_excluded_people<I, S>(mut self, people: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_people = people.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_excluded_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_earliest_year(mut self, year: i32) -> Self {
        self.earliest_year = year;
        self
    }

    pub fn excluded_people(&self) -> &[String] {
        &self.excluded_people
    }

    pub fn excluded_tags(&self) -> &[String] {
        &self.excluded_tags
    }

    /// First year to scan (inclusive), falling back to [`DEFAULT_EARLIEST_YEAR`]
    pub fn earliest_year(&self) -> i32 {
        if self.earliest_year > 0 {
            self.earliest_year
        } else {
            DEFAULT_EARLIEST_YEAR
        }
    }

    pub fn excludes_person(&self, value: &str) -> bool {
        self.excluded_people.iter().any(|p| p == value)
    }
}
