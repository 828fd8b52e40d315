//! Filter, categorize, and sort entries for display.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::GameEntry;

/// Category restriction applied after the free-text search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryFilter {
    /// Keep everything.
    #[default]
    All,
    /// Keep entries whose release date is today or earlier.
    Released,
    /// Keep entries whose release date is strictly in the future.
    Upcoming,
}

impl CategoryFilter {
    /// Selector text shown in the header.
    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Released => "Released",
            CategoryFilter::Upcoming => "Upcoming",
        }
    }

    /// Next category in the selector cycle.
    pub fn cycle(&self) -> Self {
        match self {
            CategoryFilter::All => CategoryFilter::Released,
            CategoryFilter::Released => CategoryFilter::Upcoming,
            CategoryFilter::Upcoming => CategoryFilter::All,
        }
    }
}

/// Direction of the release-date sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    /// Latest release date first.
    #[default]
    NewestFirst,
    /// Earliest release date first.
    OldestFirst,
}

impl SortDirection {
    /// The opposite direction.
    pub fn toggled(&self) -> Self {
        match self {
            SortDirection::NewestFirst => SortDirection::OldestFirst,
            SortDirection::OldestFirst => SortDirection::NewestFirst,
        }
    }

    /// Toggle-button text reflecting the current direction.
    pub fn label(&self) -> &'static str {
        match self {
            SortDirection::NewestFirst => "Sort: Newest",
            SortDirection::OldestFirst => "Sort: Oldest",
        }
    }
}

/// The mutable filter/search/sort configuration driving the rendered list.
///
/// Owned by whatever drives the render loop and mutated in place by input
/// handlers; every mutation is followed by a fresh [`run`].
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Free-text search. Empty means no filter. Stored trimmed.
    pub query: String,
    /// Current category restriction.
    pub category: CategoryFilter,
    /// Current sort direction.
    pub sort: SortDirection,
}

impl ViewState {
    /// Replace the search query, trimming surrounding whitespace.
    pub fn set_query(&mut self, raw: &str) {
        self.query = raw.trim().to_string();
    }
}

/// Run the pipeline: search filter, then category filter, then sort.
///
/// Pure transformation over the catalog order. An empty result is an empty
/// vector, never an error. Ties on the release date keep catalog order.
pub fn run(entries: &[GameEntry], state: &ViewState, today: NaiveDate) -> Vec<GameEntry> {
    let mut out: Vec<GameEntry> = entries.to_vec();

    let needle = state.query.to_lowercase();
    if !needle.is_empty() {
        out.retain(|entry| matches_query(entry, &needle));
    }

    match state.category {
        CategoryFilter::All => {}
        CategoryFilter::Released => out.retain(|entry| !entry.is_upcoming(today)),
        CategoryFilter::Upcoming => out.retain(|entry| entry.is_upcoming(today)),
    }

    match state.sort {
        SortDirection::NewestFirst => out.sort_by(|a, b| b.release_date.cmp(&a.release_date)),
        SortDirection::OldestFirst => out.sort_by(|a, b| a.release_date.cmp(&b.release_date)),
    }

    out
}

fn matches_query(entry: &GameEntry, needle: &str) -> bool {
    let candidates = [
        entry.title.to_lowercase(),
        entry.platform.to_lowercase(),
        entry.description.to_lowercase(),
    ];
    candidates.iter().any(|value| value.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, title: &str, platform: &str, description: &str, date: &str) -> GameEntry {
        GameEntry {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            platform: platform.to_string(),
            release_date: date.parse().expect("valid date"),
            released: false,
            image_url: String::new(),
            detail_url: String::new(),
        }
    }

    fn sample() -> Vec<GameEntry> {
        vec![
            entry(
                "g1",
                "Shadow Frontier",
                "PC, PS5",
                "Atmospheric action-RPG with dynamic weather and deep story.",
                "2025-12-05",
            ),
            entry(
                "g2",
                "Neon Drift",
                "PC, Xbox",
                "Arcade racing with synthwave soundtrack.",
                "2024-10-01",
            ),
            entry(
                "g3",
                "Galaxy Keepers",
                "PC",
                "Sci-fi strategy with base-building and co-op.",
                "2025-11-28",
            ),
            entry(
                "g4",
                "Retro Brawler X",
                "Switch, PC",
                "2D beat 'em up classic remake.",
                "2025-05-06",
            ),
        ]
    }

    fn today() -> NaiveDate {
        "2025-06-01".parse().expect("valid date")
    }

    fn ids(results: &[GameEntry]) -> Vec<&str> {
        results.iter().map(|entry| entry.id.as_str()).collect()
    }

    #[test]
    fn search_is_case_insensitive() {
        let entries = sample();
        let mut state = ViewState::default();

        state.set_query("SHADOW");
        let upper = run(&entries, &state, today());
        state.set_query("shadow");
        let lower = run(&entries, &state, today());

        assert_eq!(ids(&upper), vec!["g1"]);
        assert_eq!(ids(&upper), ids(&lower));
    }

    #[test]
    fn search_covers_title_platform_and_description() {
        let entries = sample();
        let mut state = ViewState::default();

        state.set_query("xbox");
        assert_eq!(ids(&run(&entries, &state, today())), vec!["g2"]);

        state.set_query("synthwave");
        assert_eq!(ids(&run(&entries, &state, today())), vec!["g2"]);
    }

    #[test]
    fn query_is_trimmed_on_input() {
        let mut state = ViewState::default();
        state.set_query("  neon  ");
        assert_eq!(state.query, "neon");
    }

    #[test]
    fn category_filters_partition_the_catalog() {
        let entries = sample();
        let today = today();

        let all = run(
            &entries,
            &ViewState {
                category: CategoryFilter::All,
                ..ViewState::default()
            },
            today,
        );
        let released = run(
            &entries,
            &ViewState {
                category: CategoryFilter::Released,
                ..ViewState::default()
            },
            today,
        );
        let upcoming = run(
            &entries,
            &ViewState {
                category: CategoryFilter::Upcoming,
                ..ViewState::default()
            },
            today,
        );

        let mut released_ids = ids(&released);
        let mut upcoming_ids = ids(&upcoming);
        assert!(released_ids.iter().all(|id| !upcoming_ids.contains(id)));

        let mut union: Vec<&str> = released_ids.drain(..).chain(upcoming_ids.drain(..)).collect();
        union.sort_unstable();
        let mut all_ids = ids(&all);
        all_ids.sort_unstable();
        assert_eq!(union, all_ids);
    }

    #[test]
    fn worked_example_at_fixed_today() {
        let entries = sample();
        let today = today();

        let upcoming = run(
            &entries,
            &ViewState {
                category: CategoryFilter::Upcoming,
                ..ViewState::default()
            },
            today,
        );
        let mut upcoming_ids = ids(&upcoming);
        upcoming_ids.sort_unstable();
        assert_eq!(upcoming_ids, vec!["g1", "g3"]);

        let released = run(
            &entries,
            &ViewState {
                category: CategoryFilter::Released,
                ..ViewState::default()
            },
            today,
        );
        let mut released_ids = ids(&released);
        released_ids.sort_unstable();
        assert_eq!(released_ids, vec!["g2", "g4"]);
    }

    #[test]
    fn newest_first_is_descending_by_date() {
        let entries = sample();
        let results = run(&entries, &ViewState::default(), today());
        for pair in results.windows(2) {
            assert!(pair[0].release_date >= pair[1].release_date);
        }
        assert_eq!(ids(&results), vec!["g1", "g3", "g4", "g2"]);
    }

    #[test]
    fn toggling_sort_twice_restores_the_ordering() {
        let entries = sample();
        let mut state = ViewState::default();

        let original_run = run(&entries, &state, today());
        let original = ids(&original_run);
        state.sort = state.sort.toggled();
        let flipped_run = run(&entries, &state, today());
        let flipped = ids(&flipped_run);
        state.sort = state.sort.toggled();
        let restored_run = run(&entries, &state, today());
        let restored = ids(&restored_run);

        assert_ne!(original, flipped);
        assert_eq!(original, restored);
    }

    #[test]
    fn equal_dates_keep_catalog_order() {
        let entries = vec![
            entry("a", "Alpha", "PC", "first", "2025-05-06"),
            entry("b", "Beta", "PC", "second", "2025-05-06"),
            entry("c", "Gamma", "PC", "third", "2024-01-01"),
        ];
        let results = run(
            &entries,
            &ViewState {
                sort: SortDirection::OldestFirst,
                ..ViewState::default()
            },
            today(),
        );
        assert_eq!(ids(&results), vec!["c", "a", "b"]);
    }

    #[test]
    fn no_match_yields_an_empty_result() {
        let entries = sample();
        let mut state = ViewState::default();
        state.set_query("zzz-no-match");
        assert!(run(&entries, &state, today()).is_empty());
    }

    #[test]
    fn filter_cycle_visits_every_category() {
        let start = CategoryFilter::All;
        assert_eq!(start.cycle(), CategoryFilter::Released);
        assert_eq!(start.cycle().cycle(), CategoryFilter::Upcoming);
        assert_eq!(start.cycle().cycle().cycle(), CategoryFilter::All);
    }

    #[test]
    fn sort_labels_follow_direction() {
        assert_eq!(SortDirection::NewestFirst.label(), "Sort: Newest");
        assert_eq!(SortDirection::NewestFirst.toggled().label(), "Sort: Oldest");
    }
}
