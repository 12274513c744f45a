//! Field accessors that configure the list module for one record type.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt::Debug;

use crate::model::{Annotator, AnnotatorStatus, Dataset, DatasetStatus};

/// Accessor functions describing how a record type is searched, categorised
/// and sorted.
///
/// `C` is the record's category; its `Ord` is the order of a status sort.
pub struct ListSchema<R, C> {
    /// Short name used in logs.
    pub name: &'static str,
    /// Fields matched by the text search. Missing fields are left out.
    pub search_fields: fn(&R) -> Vec<Cow<'_, str>>,
    /// Category tested by the category flags.
    pub category: fn(&R) -> C,
    /// Flag name of a category.
    pub flag_name: fn(&C) -> &'static str,
    /// Key of a name sort.
    pub name_key: fn(&R) -> Cow<'_, str>,
}

impl<R, C> Clone for ListSchema<R, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R, C> Copy for ListSchema<R, C> {}

impl<R, C> Debug for ListSchema<R, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListSchema").field("name", &self.name).finish()
    }
}

/// Datasets: searched by name, categorised by assignment status.
pub const DATASETS: ListSchema<Dataset, DatasetStatus> = ListSchema {
    name: "datasets",
    search_fields: dataset_search_fields,
    category: Dataset::status,
    flag_name: DatasetStatus::flag,
    name_key: dataset_name_key,
};

/// Annotators: searched by first name, last name, full name and login,
/// categorised as active or inactive.
pub const ANNOTATORS: ListSchema<Annotator, AnnotatorStatus> = ListSchema {
    name: "annotators",
    search_fields: annotator_search_fields,
    category: Annotator::status,
    flag_name: AnnotatorStatus::flag,
    name_key: annotator_name_key,
};

fn dataset_search_fields(dataset: &Dataset) -> Vec<Cow<'_, str>> {
    dataset.name.as_deref().map(Cow::Borrowed).into_iter().collect()
}

fn dataset_name_key(dataset: &Dataset) -> Cow<'_, str> {
    Cow::Borrowed(dataset.name())
}

fn annotator_search_fields(annotator: &Annotator) -> Vec<Cow<'_, str>> {
    let mut fields: Vec<Cow<'_, str>> = [
        annotator.first_name.as_deref(),
        annotator.last_name.as_deref(),
        annotator.login.as_deref(),
    ]
    .into_iter()
    .flatten()
    .map(Cow::Borrowed)
    .collect();
    fields.push(Cow::Owned(annotator.full_name()));
    fields
}

fn annotator_name_key(annotator: &Annotator) -> Cow<'_, str> {
    Cow::Owned(annotator.full_name())
}

/// Compare two display names the way a French/English locale would:
/// case and accents are ignored first, then the raw strings break ties.
pub fn collate(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .flat_map(char::to_lowercase)
        .map(fold_accent)
        .cmp(b.chars().flat_map(char::to_lowercase).map(fold_accent));
    primary.then_with(|| a.cmp(b))
}

fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}
