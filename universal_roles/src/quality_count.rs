//! A map from keys to a pair of counters, one for good events and
//! one for bad events.
use indexmap::IndexMap;
use std::hash::Hash;

/// The good and bad counts of a key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Quality {
    pub good: u32,
    pub bad: u32,
}

/// Good/bad counters keyed by `K`. Counters never decrease.
/// Keys are remembered in the order they were first counted; that order
/// breaks ties in [`QualityCountMap::best_keys`].
#[derive(Debug, Clone)]
pub struct QualityCountMap<K: Hash + Eq> {
    counts: IndexMap<K, Quality>,
}

impl<K: Hash + Eq> Default for QualityCountMap<K> {
    fn default() -> Self {
        Self {
            counts: IndexMap::new(),
        }
    }
}

impl<K: Hash + Eq + Clone> QualityCountMap<K> {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn good(&self, key: &K) -> u32 {
        self.counts.get(key).map(|q| q.good).unwrap_or(0)
    }
    pub fn bad(&self, key: &K) -> u32 {
        self.counts.get(key).map(|q| q.bad).unwrap_or(0)
    }
    pub fn quality(&self, key: &K) -> Quality {
        self.counts.get(key).copied().unwrap_or_default()
    }
    /// Count one good event for `key`.
    pub fn set_good(&mut self, key: &K) {
        self.add_good(key, 1);
    }
    /// Count one bad event for `key`.
    pub fn set_bad(&mut self, key: &K) {
        self.add_bad(key, 1);
    }
    /// Count `n` good events for `key`. Adding zero does not register the key.
    pub fn add_good(&mut self, key: &K, n: u32) {
        if n > 0 {
            self.entry(key).good += n;
        }
    }
    pub fn add_bad(&mut self, key: &K, n: u32) {
        if n > 0 {
            self.entry(key).bad += n;
        }
    }
    fn entry(&mut self, key: &K) -> &mut Quality {
        self.counts.entry(key.clone()).or_default()
    }
    pub fn contains(&self, key: &K) -> bool {
        self.counts.contains_key(key)
    }
    /// The number of distinct keys ever counted.
    pub fn size(&self) -> usize {
        self.counts.len()
    }
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
    /// Keys in the order they were first counted.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.counts.keys()
    }
    /// All keys, best first: most good counts, then fewest bad counts,
    /// then first counted.
    pub fn best_keys(&self) -> Vec<&K> {
        let mut keys: Vec<(&K, &Quality)> = self.counts.iter().collect();
        // Stable, so registration order survives among ties.
        keys.sort_by(|(_, a), (_, b)| b.good.cmp(&a.good).then(a.bad.cmp(&b.bad)));
        keys.into_iter().map(|(key, _)| key).collect()
    }
}
