use rustc_hash::FxHashMap;

/// Result sets keyed by the exact query text. Entries are never evicted; the cache
/// lives exactly as long as the orchestrator that owns it.
#[derive(Debug, Clone)]
pub struct QueryCache<T> {
    entries: FxHashMap<String, Vec<T>>,
}

impl<T> Default for QueryCache<T> {
    fn default() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }
}

impl<T> QueryCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, query: &str) -> Option<&[T]> {
        self.entries.get(query).map(Vec::as_slice)
    }

    pub fn contains(&self, query: &str) -> bool {
        self.entries.contains_key(query)
    }

    /// Stores `options` under `query`, replacing any previous result set.
    pub fn insert(&mut self, query: impl Into<String>, options: Vec<T>) {
        self.entries.insert(query.into(), options);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/cache.rs"]
mod tests;
