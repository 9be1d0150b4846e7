use crate::config::DedupePolicy;

/// Ordered recent-search history, most recent first, without duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentSearches {
    entries: Vec<String>,
}

impl RecentSearches {
    /// Builds a history from a seed list, trimming entries and dropping
    /// blanks and later duplicates
    pub fn new(seed: impl IntoIterator<Item = String>) -> Self {
        let mut entries: Vec<String> = Vec::new();
        for entry in seed {
            let entry = entry.trim();
            if entry.is_empty() || entries.iter().any(|existing| existing == entry) {
                continue;
            }
            entries.push(entry.to_string());
        }
        Self { entries }
    }

    /// Records a submitted term. Returns whether the history changed.
    pub fn record(&mut self, term: &str, policy: DedupePolicy) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return false;
        }

        match self.entries.iter().position(|entry| entry == term) {
            None => {
                self.entries.insert(0, term.to_string());
                true
            }
            Some(_) if policy == DedupePolicy::KeepPosition => false,
            Some(0) => false,
            Some(index) => {
                let existing = self.entries.remove(index);
                self.entries.insert(0, existing);
                true
            }
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
