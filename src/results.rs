use crate::loader::LoadOutcome;
use serde::{Serialize, Serializer};
use std::collections::HashSet;

/// Ordered list of unique titles. The first occurrence of a title wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleList {
    titles: Vec<String>,
    seen: HashSet<String>,
}

impl TitleList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a title unless an identical one is already present.
    /// Returns whether it was added.
    pub fn push(&mut self, title: String) -> bool {
        if self.seen.contains(&title) {
            return false;
        }
        self.seen.insert(title.clone());
        self.titles.push(title);
        true
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.titles.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.titles
    }
}

impl<'a> IntoIterator for &'a TitleList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for TitleList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.titles.serialize(serializer)
    }
}

/// Everything one run produced
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeReport {
    /// Page that was scraped
    pub url: String,

    /// Value of the `list` query parameter, if the URL has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_id: Option<String>,

    /// How the scroll loop ended
    pub load: LoadOutcome,

    /// Extracted titles in page order
    pub titles: TitleList,
}

impl ScrapeReport {
    pub fn new(
        url: String,
        playlist_id: Option<String>,
        load: LoadOutcome,
        titles: TitleList,
    ) -> Self {
        Self {
            url,
            playlist_id,
            load,
            titles,
        }
    }
}
