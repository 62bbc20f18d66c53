//! Insertion-ordered frequency tables.
//!
//! Rankings are stable: among keys with equal counts, the key seen first
//! ranks first. Serialization follows insertion order as well, so the
//! `type_mix` object in the summary lists types as they appear in the
//! catalogue.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Key to occurrence count, remembering the order keys were first seen.
#[derive(Debug, Clone)]
pub struct FrequencyTable<K> {
    entries: Vec<(K, usize)>,
    index: HashMap<K, usize>,
}

impl<K> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Clone + Eq + Hash> FrequencyTable<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence of `key`.
    pub fn increment(&mut self, key: K) {
        self.add(key, 1);
    }

    /// Add `amount` occurrences of `key`.
    pub fn add(&mut self, key: K, amount: usize) {
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1 += amount,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, amount));
            }
        }
    }

    /// Count for `key`, zero when never seen.
    pub fn get<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index
            .get(key)
            .map(|&slot| self.entries[slot].1)
            .unwrap_or(0)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> {
        self.entries.iter().map(|(key, count)| (key, *count))
    }

    /// The `n` most common entries, count descending, first-seen wins ties.
    pub fn top_n(&self, n: usize) -> Vec<(&K, usize)> {
        let mut ranked: Vec<(&K, usize)> = self.iter().collect();
        // sort_by is stable, so equal counts keep insertion order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    /// The single most common entry.
    pub fn most_common(&self) -> Option<(&K, usize)> {
        self.top_n(1).into_iter().next()
    }
}

impl<K: Ord + Clone + Eq + Hash> FrequencyTable<K> {
    /// All entries ordered by key ascending.
    pub fn sorted_by_key(&self) -> Vec<(&K, usize)> {
        let mut sorted: Vec<(&K, usize)> = self.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));
        sorted
    }
}

impl<K: Clone + Eq + Hash> FromIterator<K> for FrequencyTable<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut table = Self::new();
        for key in iter {
            table.increment(key);
        }
        table
    }
}

impl<K: Serialize> Serialize for FrequencyTable<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, count) in &self.entries {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

/// Outer key to an inner frequency table, e.g. country to genre counts.
///
/// Inner tables are created on first use; looking up an absent outer key
/// behaves like an empty table.
#[derive(Debug, Clone)]
pub struct NestedFrequencyTable<K, V> {
    tables: HashMap<K, FrequencyTable<V>>,
}

impl<K, V> Default for NestedFrequencyTable<K, V> {
    fn default() -> Self {
        Self {
            tables: HashMap::new(),
        }
    }
}

impl<K, V> NestedFrequencyTable<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the inner table for `outer`.
    pub(crate) fn entry(&mut self, outer: K) -> &mut FrequencyTable<V> {
        self.tables.entry(outer).or_default()
    }

    /// Add one occurrence of `inner` under `outer`.
    pub fn increment(&mut self, outer: K, inner: V) {
        self.entry(outer).increment(inner);
    }

    /// Inner table for `outer`, if any occurrence was recorded.
    pub fn get<Q>(&self, outer: &Q) -> Option<&FrequencyTable<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.tables.get(outer)
    }

    /// Count of `inner` under `outer`, zero when either is absent.
    pub fn count<Q, R>(&self, outer: &Q, inner: &R) -> usize
    where
        K: Borrow<Q>,
        V: Borrow<R>,
        Q: Hash + Eq + ?Sized,
        R: Hash + Eq + ?Sized,
    {
        self.get(outer).map(|table| table.get(inner)).unwrap_or(0)
    }

    /// Top `n` inner keys under `outer`; empty when `outer` is absent.
    pub fn top_n<Q>(&self, outer: &Q, n: usize) -> Vec<(&V, usize)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(outer).map(|table| table.top_n(n)).unwrap_or_default()
    }

    /// Number of outer keys.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_one_first_seen_wins_tie() {
        let mut table = FrequencyTable::new();
        table.add("A", 3);
        table.add("B", 3);
        table.add("C", 1);

        assert_eq!(table.most_common(), Some((&"A", 3)));
        assert_eq!(table.top_n(2), vec![(&"A", 3), (&"B", 3)]);
    }

    #[test]
    fn test_tie_order_follows_first_insertion_not_last_update() {
        let table: FrequencyTable<&str> = ["B", "A", "A", "B", "C"].into_iter().collect();
        let keys: Vec<&str> = table.top_n(3).into_iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_top_n_larger_than_table() {
        let table: FrequencyTable<i32> = [2020, 2019].into_iter().collect();
        assert_eq!(table.top_n(8).len(), 2);
    }

    #[test]
    fn test_get_and_total() {
        let table: FrequencyTable<String> = ["Movie", "Movie", "TV Show"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(table.get("Movie"), 2);
        assert_eq!(table.get("Special"), 0);
        assert_eq!(table.total(), 3);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_sorted_by_key() {
        let table: FrequencyTable<i32> = [2021, 2019, 2020, 2019].into_iter().collect();
        assert_eq!(table.sorted_by_key(), vec![(&2019, 2), (&2020, 1), (&2021, 1)]);
    }

    #[test]
    fn test_serializes_in_insertion_order() {
        let table: FrequencyTable<String> = ["TV Show", "Movie", "Movie"]
            .into_iter()
            .map(String::from)
            .collect();
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"TV Show":1,"Movie":2}"#);
    }

    #[test]
    fn test_nested_absent_outer_is_empty() {
        let mut nested: NestedFrequencyTable<String, String> = NestedFrequencyTable::new();
        nested.increment("India".into(), "Dramas".into());

        assert_eq!(nested.count("India", "Dramas"), 1);
        assert_eq!(nested.count("Brazil", "Dramas"), 0);
        assert!(nested.top_n("Brazil", 3).is_empty());
        assert_eq!(nested.len(), 1);
    }
}
