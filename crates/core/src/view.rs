//! Pure view descriptions built from entries and the current date.
//!
//! Frontends render these; nothing here touches a terminal or produces
//! markup. See [`crate::markup`] for the HTML rendering of the same
//! descriptions.

use chrono::NaiveDate;

use crate::models::{GameEntry, ReleaseStatus};

/// Character limit for the list-row description.
pub const DESCRIPTION_LIMIT: usize = 120;

/// Number of rows in the release calendar.
pub const CALENDAR_SIZE: usize = 6;

/// Format a release date for display, e.g. `Dec 5, 2025`.
pub fn format_release_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Cut `text` down to `limit` displayed characters: strings over the limit
/// become `limit - 1` characters plus an ellipsis, strings at or under it
/// pass through unmodified. Counted per character, not per byte.
pub fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() > limit {
        let mut cut: String = text.chars().take(limit.saturating_sub(1)).collect();
        cut.push('…');
        cut
    } else {
        text.to_string()
    }
}

/// One row of the rendered list.
#[derive(Debug, Clone)]
pub struct ListRow {
    /// Identifier used to resolve the entry on activation.
    pub id: String,
    /// Entry title, unmodified.
    pub title: String,
    /// Status badge computed against the render-time date.
    pub status: ReleaseStatus,
    /// Platform string, unmodified.
    pub platform: String,
    /// Formatted release date.
    pub date_label: String,
    /// Description truncated to [`DESCRIPTION_LIMIT`].
    pub summary: String,
    /// Thumbnail URL.
    pub image_url: String,
    /// Inert link target.
    pub detail_url: String,
}

/// The list as produced by one pipeline run.
#[derive(Debug, Clone)]
pub struct ListView {
    /// Rows in display order.
    pub rows: Vec<ListRow>,
}

impl ListView {
    /// Build the list view for one set of pipeline results.
    pub fn build(results: &[GameEntry], today: NaiveDate) -> Self {
        let rows = results
            .iter()
            .map(|entry| ListRow {
                id: entry.id.clone(),
                title: entry.title.clone(),
                status: entry.status(today),
                platform: entry.platform.clone(),
                date_label: format_release_date(entry.release_date),
                summary: truncate(&entry.description, DESCRIPTION_LIMIT),
                image_url: entry.image_url.clone(),
                detail_url: entry.detail_url.clone(),
            })
            .collect();
        Self { rows }
    }

    /// True when there is nothing to show; frontends display a no-results
    /// indicator instead of rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One compact date+title row of the release calendar.
#[derive(Debug, Clone)]
pub struct CalendarRow {
    /// Formatted release date.
    pub date_label: String,
    /// Entry title, unmodified.
    pub title: String,
    /// Raw date, kept for ordering assertions and adapters that format
    /// differently.
    pub date: NaiveDate,
}

/// The soonest-N calendar over the full catalog, independent of view state.
#[derive(Debug, Clone)]
pub struct CalendarView {
    /// Rows ascending by release date, at most [`CALENDAR_SIZE`].
    pub rows: Vec<CalendarRow>,
}

impl CalendarView {
    /// Build the calendar from the full entry sequence. Sorted ascending by
    /// date, truncated to [`CALENDAR_SIZE`]; entries already released stay
    /// eligible.
    pub fn build(entries: &[GameEntry]) -> Self {
        let mut ordered: Vec<&GameEntry> = entries.iter().collect();
        ordered.sort_by(|a, b| a.release_date.cmp(&b.release_date));
        let rows = ordered
            .into_iter()
            .take(CALENDAR_SIZE)
            .map(|entry| CalendarRow {
                date_label: format_release_date(entry.release_date),
                title: entry.title.clone(),
                date: entry.release_date,
            })
            .collect();
        Self { rows }
    }
}

/// Expanded details for one entry, shown in the modal.
#[derive(Debug, Clone)]
pub struct ModalView {
    /// Identifier of the entry being shown.
    pub id: String,
    /// Entry title, unmodified.
    pub title: String,
    /// Platform string, unmodified.
    pub platform: String,
    /// Status computed against the render-time date.
    pub status: ReleaseStatus,
    /// `Release:` for upcoming entries, `Released:` otherwise.
    pub date_heading: &'static str,
    /// Formatted release date.
    pub date_label: String,
    /// Full, untruncated description.
    pub description: String,
    /// Larger cover image URL.
    pub image_url: String,
    /// Inert information link target.
    pub detail_url: String,
}

impl ModalView {
    /// Build the modal content for one entry.
    pub fn build(entry: &GameEntry, today: NaiveDate) -> Self {
        let status = entry.status(today);
        Self {
            id: entry.id.clone(),
            title: entry.title.clone(),
            platform: entry.platform.clone(),
            status,
            date_heading: match status {
                ReleaseStatus::Upcoming => "Release:",
                ReleaseStatus::Released => "Released:",
            },
            date_label: format_release_date(entry.release_date),
            description: entry.description.clone(),
            image_url: entry.image_url.clone(),
            detail_url: entry.detail_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{run, CategoryFilter, ViewState};

    fn entry(id: &str, title: &str, date: &str, description: &str) -> GameEntry {
        GameEntry {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            platform: "PC".to_string(),
            release_date: date.parse().expect("valid date"),
            released: false,
            image_url: String::new(),
            detail_url: String::new(),
        }
    }

    fn today() -> NaiveDate {
        "2025-06-01".parse().expect("valid date")
    }

    #[test]
    fn truncate_leaves_short_and_boundary_strings_alone() {
        let at_limit = "x".repeat(DESCRIPTION_LIMIT);
        assert_eq!(truncate(&at_limit, DESCRIPTION_LIMIT), at_limit);
        assert_eq!(truncate("short", DESCRIPTION_LIMIT), "short");
    }

    #[test]
    fn truncate_cuts_over_limit_strings_to_limit_displayed_units() {
        let over = "x".repeat(DESCRIPTION_LIMIT + 1);
        let cut = truncate(&over, DESCRIPTION_LIMIT);
        assert_eq!(cut.chars().count(), DESCRIPTION_LIMIT);
        assert!(cut.ends_with('…'));
        assert_eq!(
            cut.chars().take_while(|c| *c == 'x').count(),
            DESCRIPTION_LIMIT - 1
        );
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        let over: String = "é".repeat(DESCRIPTION_LIMIT + 1);
        let cut = truncate(&over, DESCRIPTION_LIMIT);
        assert_eq!(cut.chars().count(), DESCRIPTION_LIMIT);
    }

    #[test]
    fn date_label_uses_short_month() {
        let date: NaiveDate = "2025-12-05".parse().expect("valid date");
        assert_eq!(format_release_date(date), "Dec 5, 2025");
    }

    #[test]
    fn list_rows_carry_truncated_summary_and_status() {
        let long = "y".repeat(200);
        let entries = vec![entry("g1", "Future", "2025-12-05", &long)];
        let view = ListView::build(&entries, today());

        assert_eq!(view.rows.len(), 1);
        let row = &view.rows[0];
        assert_eq!(row.status, ReleaseStatus::Upcoming);
        assert_eq!(row.summary.chars().count(), DESCRIPTION_LIMIT);
    }

    #[test]
    fn calendar_shows_at_most_six_rows_ascending() {
        let entries: Vec<GameEntry> = (0..8)
            .map(|i| {
                entry(
                    &format!("g{i}"),
                    &format!("Game {i}"),
                    &format!("2025-0{}-01", 8 - i),
                    "d",
                )
            })
            .collect();

        let view = CalendarView::build(&entries);
        assert_eq!(view.rows.len(), CALENDAR_SIZE);
        for pair in view.rows.windows(2) {
            assert!(pair[0].date <= pair[1].date);
        }
        assert_eq!(view.rows[0].title, "Game 7");
    }

    #[test]
    fn calendar_ignores_view_state_and_small_catalogs_show_everything() {
        let entries = vec![
            entry("g1", "A", "2024-01-01", "d"),
            entry("g2", "B", "2026-01-01", "d"),
        ];

        // A restrictive pipeline state leaves the calendar untouched.
        let state = ViewState {
            category: CategoryFilter::Upcoming,
            ..ViewState::default()
        };
        let filtered = run(&entries, &state, today());
        assert_eq!(filtered.len(), 1);

        let view = CalendarView::build(&entries);
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[0].title, "A");
    }

    #[test]
    fn modal_heading_follows_status() {
        let future = entry("g1", "Future", "2025-12-05", "full text");
        let past = entry("g2", "Past", "2024-10-01", "full text");

        assert_eq!(ModalView::build(&future, today()).date_heading, "Release:");
        assert_eq!(ModalView::build(&past, today()).date_heading, "Released:");
    }

    #[test]
    fn modal_description_is_never_truncated() {
        let long = "z".repeat(500);
        let e = entry("g1", "Long", "2025-12-05", &long);
        assert_eq!(ModalView::build(&e, today()).description.len(), 500);
    }
}
