use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::decode::Row;

/// Name to priority mapping built from a row stream.
///
/// Serializes as a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster(HashMap<String, String>);

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a row, overwriting any earlier priority for the same name.
    pub fn apply(&mut self, row: Row) {
        self.0.insert(row.name, row.priority);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> HashMap<String, String> {
        self.0
    }
}

impl From<HashMap<String, String>> for Roster {
    fn from(members: HashMap<String, String>) -> Self {
        Self(members)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Roster {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
