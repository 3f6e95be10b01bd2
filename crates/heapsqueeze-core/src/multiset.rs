//! Counting multiset.
//!
//! Keys keep their first-insertion order, so iterating a multiset built from
//! a deterministic stream is itself deterministic.

use std::borrow::Borrow;
use std::hash::Hash;

use indexmap::IndexMap;

/// A mapping from key to occurrence count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Multiset<K: Hash + Eq> {
    counts: IndexMap<K, u64>,
}

impl<K: Hash + Eq> Default for Multiset<K> {
    fn default() -> Self {
        Self {
            counts: IndexMap::new(),
        }
    }
}

impl<K: Hash + Eq> Multiset<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `key`.
    pub fn add(&mut self, key: K) {
        self.add_n(key, 1);
    }

    /// Record `n` occurrences of `key`. Adding zero occurrences still
    /// registers the key.
    pub fn add_n(&mut self, key: K, n: u64) {
        *self.counts.entry(key).or_insert(0) += n;
    }

    /// Occurrences of `key`, zero if absent.
    pub fn count<Q>(&self, key: &Q) -> u64
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Distinct keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.counts.keys()
    }

    /// `(key, count)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.counts.iter().map(|(k, &n)| (k, n))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Add every occurrence from `other`.
    pub fn merge(&mut self, other: Multiset<K>) {
        for (key, n) in other.counts {
            self.add_n(key, n);
        }
    }
}
