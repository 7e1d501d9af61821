//! Item Bookkeeping
//!
//! Parsing of the host's item list and the persisted seen set, and the
//! unseen count derived from both.

use std::collections::HashSet;

/// Ordered, de-duplicated item identifiers in attribute order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemList {
    ids: Vec<String>,
}

impl ItemList {
    /// Parse a comma-separated attribute value. Returns `None` when no
    /// identifier survives trimming.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut seen = HashSet::new();
        let ids: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .filter(|id| seen.insert(*id))
            .map(str::to_string)
            .collect();

        if ids.is_empty() {
            None
        } else {
            Some(Self { ids })
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Comma-joined form written to the history cookie
    pub fn to_history(&self) -> String {
        self.ids.join(",")
    }

    /// Items not yet acknowledged
    pub fn unseen_count(&self, seen: &SeenSet) -> usize {
        self.iter().filter(|id| !seen.contains(id)).count()
    }
}

/// Identifiers the visitor has already acknowledged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenSet {
    ids: HashSet<String>,
}

impl SeenSet {
    /// Parse the decoded cookie value. Blank tokens are ignored.
    pub fn parse(raw: &str) -> Self {
        let ids = raw
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();
        Self { ids }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl From<&ItemList> for SeenSet {
    fn from(list: &ItemList) -> Self {
        Self {
            ids: list.iter().map(str::to_string).collect(),
        }
    }
}
