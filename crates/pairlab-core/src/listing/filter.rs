//! Filter state and the filter/sort transformation.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;
use crate::model::{AnnotationFilter, DatasetAnnotator};

use super::schema::{ListSchema, collate};

/// Sort order of a list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Order in which the API returned the records.
    #[default]
    Original,
    /// By display name, case- and accent-insensitive.
    Name,
    /// Grouped by status.
    Status,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortKey::Original => "original",
            SortKey::Name => "name",
            SortKey::Status => "status",
        })
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "original" | "none" => Ok(SortKey::Original),
            "name" => Ok(SortKey::Name),
            "status" => Ok(SortKey::Status),
            other => Err(Error::other(format!("unknown sort key '{}'", other))),
        }
    }
}

/// User-controlled predicates over a list.
///
/// Transitions return a new value; a `FilterState` is never edited in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState<C> {
    search_term: String,
    flags: BTreeSet<C>,
    sort_key: SortKey,
}

impl<C> Default for FilterState<C> {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            flags: BTreeSet::new(),
            sort_key: SortKey::Original,
        }
    }
}

impl<C: Copy + Ord> FilterState<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn flags(&self) -> impl Iterator<Item = C> + '_ {
        self.flags.iter().copied()
    }

    pub fn is_flag_set(&self, flag: C) -> bool {
        self.flags.contains(&flag)
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    /// The trimmed, case-folded search needle, if any.
    pub fn needle(&self) -> Option<String> {
        let needle = self.search_term.trim().to_lowercase();
        (!needle.is_empty()).then_some(needle)
    }

    pub fn with_search_term(&self, term: impl Into<String>) -> Self {
        Self {
            search_term: term.into(),
            ..self.clone()
        }
    }

    pub fn with_flag(&self, flag: C, on: bool) -> Self {
        let mut flags = self.flags.clone();
        if on {
            flags.insert(flag);
        } else {
            flags.remove(&flag);
        }
        Self {
            flags,
            ..self.clone()
        }
    }

    pub fn toggled(&self, flag: C) -> Self {
        self.with_flag(flag, !self.is_flag_set(flag))
    }

    pub fn with_sort_key(&self, sort_key: SortKey) -> Self {
        Self {
            sort_key,
            ..self.clone()
        }
    }

    /// Clear the search and every flag, keeping the sort order.
    pub fn cleared(&self) -> Self {
        Self {
            sort_key: self.sort_key,
            ..Self::default()
        }
    }
}

/// True when any field contains `needle` (already case-folded).
pub fn matches_search<I>(fields: I, needle: &str) -> bool
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fields
        .into_iter()
        .any(|field| field.as_ref().to_lowercase().contains(needle))
}

/// Filter and sort `records` under `state`.
///
/// The result is a new sequence holding a subset of `records`; the input is
/// left untouched. Sorting is stable.
pub fn apply_filters<R, C>(
    records: &[R],
    state: &FilterState<C>,
    schema: &ListSchema<R, C>,
) -> Vec<R>
where
    R: Clone,
    C: Copy + Ord,
{
    let needle = state.needle();

    let mut result: Vec<R> = records
        .iter()
        .filter(|record| match &needle {
            Some(needle) => matches_search((schema.search_fields)(record), needle),
            None => true,
        })
        .filter(|record| state.flags.is_empty() || state.flags.contains(&(schema.category)(record)))
        .cloned()
        .collect();

    match state.sort_key {
        SortKey::Original => {}
        SortKey::Name => {
            result.sort_by(|a, b| collate(&(schema.name_key)(a), &(schema.name_key)(b)))
        }
        SortKey::Status => result.sort_by_key(|record| (schema.category)(record)),
    }

    result
}

/// Annotators of a dataset matching a search term and an annotation filter.
pub fn filter_dataset_annotators(
    annotators: &[DatasetAnnotator],
    search_term: &str,
    filter: AnnotationFilter,
) -> Vec<DatasetAnnotator> {
    let needle = search_term.trim().to_lowercase();
    annotators
        .iter()
        .filter(|a| filter.accepts(a))
        .filter(|a| {
            needle.is_empty()
                || matches_search(
                    [
                        a.last_name.as_deref(),
                        a.first_name.as_deref(),
                        a.login.as_deref(),
                    ]
                    .into_iter()
                    .flatten(),
                    &needle,
                )
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::schema::{ANNOTATORS, DATASETS};
    use crate::model::{Annotator, AnnotatorStatus, Dataset, DatasetStatus, Task};
    use serde_json::json;

    fn annotator(first: &str, last: &str, login: &str, deleted: bool) -> Annotator {
        Annotator {
            id: None,
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
            login: Some(login.to_string()),
            deleted,
            role: None,
        }
    }

    fn people() -> Vec<Annotator> {
        vec![
            annotator("Alice", "Martin", "amartin", false),
            annotator("Bob", "Dupont", "bdupont", true),
            annotator("émile", "Zola", "ezola", false),
            annotator("Chloé", "Martinez", "cmartinez", true),
        ]
    }

    fn dataset(id: i64, name: Option<&str>, tasks: Option<Vec<Task>>) -> Dataset {
        Dataset {
            id,
            name: name.map(str::to_string),
            description: None,
            file_type: None,
            tasks,
        }
    }

    fn pending_task() -> Task {
        serde_json::from_value(json!({"id": 1})).unwrap()
    }

    #[test]
    fn search_matches_substring_case_insensitively() {
        let state = FilterState::new().with_search_term("  MART ");
        let result = apply_filters(&people(), &state, &ANNOTATORS);
        let logins: Vec<_> = result.iter().filter_map(|a| a.login.as_deref()).collect();
        assert_eq!(logins, vec!["amartin", "cmartinez"]);
    }

    #[test]
    fn search_scenario_keeps_only_alice() {
        let records = vec![
            annotator("Alice", "Martin", "amartin", false),
            annotator("Bob", "Dupont", "bdupont", false),
        ];
        let state = FilterState::new().with_search_term("mart");
        let result = apply_filters(&records, &state, &ANNOTATORS);
        assert_eq!(result, vec![records[0].clone()]);
    }

    #[test]
    fn search_matches_full_name() {
        let state = FilterState::new().with_search_term("alice mar");
        let result = apply_filters(&people(), &state, &ANNOTATORS);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn missing_fields_never_match_nor_fail() {
        let records = vec![
            Annotator::default(),
            annotator("Alice", "Martin", "amartin", false),
        ];
        let state = FilterState::new().with_search_term("a");
        let result = apply_filters(&records, &state, &ANNOTATORS);
        assert_eq!(result.len(), 1);

        let datasets = vec![dataset(1, None, None), dataset(2, Some("News"), None)];
        let state = FilterState::new().with_search_term("news");
        assert_eq!(apply_filters(&datasets, &state, &DATASETS).len(), 1);
    }

    #[test]
    fn active_flag_keeps_only_not_deleted() {
        let state = FilterState::new().with_flag(AnnotatorStatus::Active, true);
        let result = apply_filters(&people(), &state, &ANNOTATORS);
        assert!(result.iter().all(|a| !a.deleted));
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn flags_combine_with_or() {
        let datasets = vec![
            dataset(1, Some("a"), None),
            dataset(2, Some("b"), Some(vec![pending_task()])),
            dataset(3, Some("c"), Some(vec![])),
        ];
        let state = FilterState::new()
            .with_flag(DatasetStatus::Unassigned, true)
            .with_flag(DatasetStatus::InProgress, true);
        assert_eq!(apply_filters(&datasets, &state, &DATASETS).len(), 3);

        let state = FilterState::new().with_flag(DatasetStatus::Completed, true);
        assert!(apply_filters(&datasets, &state, &DATASETS).is_empty());
    }

    #[test]
    fn no_predicates_returns_input_order() {
        let records = people();
        let result = apply_filters(&records, &FilterState::new(), &ANNOTATORS);
        assert_eq!(result, records);
    }

    #[test]
    fn name_sort_uses_first_then_last_name() {
        let state = FilterState::new().with_sort_key(SortKey::Name);
        let result = apply_filters(&people(), &state, &ANNOTATORS);
        let logins: Vec<_> = result.iter().filter_map(|a| a.login.as_deref()).collect();
        assert_eq!(logins, vec!["amartin", "bdupont", "cmartinez", "ezola"]);
    }

    #[test]
    fn status_sort_is_stable() {
        let state = FilterState::new().with_sort_key(SortKey::Status);
        let result = apply_filters(&people(), &state, &ANNOTATORS);
        let logins: Vec<_> = result.iter().filter_map(|a| a.login.as_deref()).collect();
        assert_eq!(logins, vec!["amartin", "ezola", "bdupont", "cmartinez"]);
    }

    #[test]
    fn filtering_is_idempotent_and_a_subset() {
        let records = people();
        let state = FilterState::new()
            .with_search_term("o")
            .with_flag(AnnotatorStatus::Inactive, true)
            .with_sort_key(SortKey::Name);
        let once = apply_filters(&records, &state, &ANNOTATORS);
        let twice = apply_filters(&once, &state, &ANNOTATORS);
        assert_eq!(once, twice);
        assert!(once.iter().all(|r| records.contains(r)));
        assert_eq!(records, people());
    }

    #[test]
    fn state_transitions_return_new_values() {
        let base: FilterState<AnnotatorStatus> = FilterState::new();
        let toggled = base.toggled(AnnotatorStatus::Active);
        assert!(!base.is_flag_set(AnnotatorStatus::Active));
        assert!(toggled.is_flag_set(AnnotatorStatus::Active));
        assert!(!toggled.toggled(AnnotatorStatus::Active).is_flag_set(AnnotatorStatus::Active));

        let sorted = toggled.with_search_term("x").with_sort_key(SortKey::Name);
        let cleared = sorted.cleared();
        assert_eq!(cleared.search_term(), "");
        assert_eq!(cleared.flags().count(), 0);
        assert_eq!(cleared.sort_key(), SortKey::Name);
    }

    #[test]
    fn dataset_annotators_filter_by_search_and_annotation() {
        let annotators: Vec<DatasetAnnotator> = serde_json::from_value(json!([
            {"id": 1, "nom": "Martin", "prenom": "Alice", "login": "amartin",
             "annotations": [{"id": 1, "coupleText": {"id": 2}, "chosenClass": "x"}]},
            {"id": 2, "nom": "Dupont", "prenom": "Bob", "login": "bdupont"},
            {"id": 3}
        ]))
        .unwrap();

        assert_eq!(
            filter_dataset_annotators(&annotators, "", AnnotationFilter::All).len(),
            3
        );
        assert_eq!(
            filter_dataset_annotators(&annotators, "DUP", AnnotationFilter::All)[0].id,
            2
        );
        assert_eq!(
            filter_dataset_annotators(&annotators, "", AnnotationFilter::NotAnnotated).len(),
            2
        );
        assert!(
            filter_dataset_annotators(&annotators, "bob", AnnotationFilter::Annotated).is_empty()
        );
    }
}
