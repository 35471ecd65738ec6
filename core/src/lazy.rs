use std::collections::HashSet;
use std::hash::Hash;

/// Bookkeeping for deferred grid thumbnails.
///
/// A key is fetched at most once: `reveal` answers `true` the first time a
/// tracked key becomes visible and untracks it. Failures are reported at
/// most once per key as well.
#[derive(Clone, Debug)]
pub struct LazyTracker<K> {
    deferred: HashSet<K>,
    failed: HashSet<K>,
}

impl<K> LazyTracker<K>
where
    K: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            deferred: HashSet::new(),
            failed: HashSet::new(),
        }
    }

    pub fn track(&mut self, key: K) -> bool {
        self.deferred.insert(key)
    }

    pub fn is_deferred(&self, key: &K) -> bool {
        self.deferred.contains(key)
    }

    pub fn deferred_count(&self) -> usize {
        self.deferred.len()
    }

    pub fn reveal(&mut self, key: &K) -> bool {
        self.deferred.remove(key)
    }

    /// Releases everything at once, for hosts without a visibility observer.
    pub fn reveal_all(&mut self) -> Vec<K> {
        self.deferred.drain().collect()
    }

    pub fn mark_failed(&mut self, key: K) -> bool {
        self.failed.insert(key)
    }
}

impl<K> Default for LazyTracker<K>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
