//! Shared domain models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One game record in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEntry {
    /// Short identifier (e.g. `g1`). Unique within a catalog.
    pub id: String,
    /// Human-readable game title.
    pub title: String,
    /// Longer description shown truncated in the list and in full in the
    /// details view.
    pub description: String,
    /// Platform string as provided by the source data (e.g. `PC, PS5`).
    pub platform: String,
    /// Calendar release date. No time-of-day semantics.
    pub release_date: NaiveDate,
    /// Release flag carried by the source data. Not authoritative: display
    /// code classifies by comparing `release_date` against the current date,
    /// and this flag is only round-tripped through serialization.
    #[serde(default)]
    pub released: bool,
    /// Opaque cover image URL. Not validated.
    pub image_url: String,
    /// Opaque link to further information. Not validated.
    pub detail_url: String,
}

impl GameEntry {
    /// True iff the release date is strictly in the future relative to
    /// `today`. Callers pass the wall-clock date at render time so the
    /// classification is never cached.
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.release_date > today
    }

    /// Computed release status relative to `today`.
    pub fn status(&self, today: NaiveDate) -> ReleaseStatus {
        if self.is_upcoming(today) {
            ReleaseStatus::Upcoming
        } else {
            ReleaseStatus::Released
        }
    }
}

/// Computed classification of an entry relative to the current date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReleaseStatus {
    /// Release date is today or in the past.
    Released,
    /// Release date is strictly in the future.
    Upcoming,
}

impl ReleaseStatus {
    /// Badge text shown next to an entry.
    pub fn label(&self) -> &'static str {
        match self {
            ReleaseStatus::Released => "Released",
            ReleaseStatus::Upcoming => "Upcoming",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(date: &str) -> GameEntry {
        GameEntry {
            id: "g1".to_string(),
            title: "Sample".to_string(),
            description: "A sample entry".to_string(),
            platform: "PC".to_string(),
            release_date: date.parse().expect("valid date"),
            released: false,
            image_url: "https://example.com/cover.jpg".to_string(),
            detail_url: "#".to_string(),
        }
    }

    #[test]
    fn status_is_computed_from_the_date_not_the_flag() {
        let today: NaiveDate = "2025-06-01".parse().expect("valid date");

        let mut past = entry("2024-10-01");
        past.released = false; // stale flag
        assert_eq!(past.status(today), ReleaseStatus::Released);

        let mut future = entry("2025-11-28");
        future.released = true; // stale flag
        assert_eq!(future.status(today), ReleaseStatus::Upcoming);
    }

    #[test]
    fn release_day_itself_counts_as_released() {
        let today: NaiveDate = "2025-05-06".parse().expect("valid date");
        let same_day = entry("2025-05-06");
        assert!(!same_day.is_upcoming(today));
        assert_eq!(same_day.status(today), ReleaseStatus::Released);
    }
}
