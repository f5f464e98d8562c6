//! SearchResult - One asset matched by a day search

use chrono::{DateTime, Datelike, FixedOffset};

/// A person recognised in an asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: String,
    pub name: String,
}

impl Person {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// SearchResult - An image asset returned by the server
///
/// People are kept as id/name pairs so both always refer to the same person.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Server-assigned asset id
    pub id: String,
    /// Capture time in the asset's own timezone
    pub local_time: DateTime<FixedOffset>,
    /// Original file path on the server
    pub path: String,
    /// People tagged in the asset
    pub people: Vec<Person>,
    /// Tag values, `None` when the search response did not embed them
    pub tags: Option<Vec<String>>,
}

impl SearchResult {
    pub fn new(id: impl Into<String>, local_time: DateTime<FixedOffset>) -> Self {
        Self {
            id: id.into(),
            local_time,
            path: String::new(),
            people: Vec::new(),
            tags: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_person(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.people.push(Person::new(id, name));
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn people_ids(&self) -> impl Iterator<Item = &str> {
        self.people.iter().map(|p| p.id.as_str())
    }

    pub fn people_names(&self) -> impl Iterator<Item = &str> {
        self.people.iter().map(|p| p.name.as_str())
    }

    /// Whether the asset was captured on `day` of the month, local time
    pub fn taken_on_day(&self, day: u32) -> bool {
        self.local_time.day() == day
    }
}
