//! Associative container with case-insensitive string keys.

use std::collections::HashMap;

/// A `HashMap<String, V>` whose keys are normalized to lowercase on insert and lookup.
#[derive(Debug, Clone)]
pub struct CaseInsensitiveMap<V> {
    inner: HashMap<String, V>,
}

impl<V> Default for CaseInsensitiveMap<V> {
    fn default() -> Self {
        Self {
            inner: HashMap::new(),
        }
    }
}

impl<V> CaseInsensitiveMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    fn normalize(key: &str) -> String {
        key.trim().to_lowercase()
    }

    /// Insert a value, returning the previous value stored under the same folded key.
    pub fn insert(&mut self, key: &str, value: V) -> Option<V> {
        self.inner.insert(Self::normalize(key), value)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.inner.get(&Self::normalize(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(&Self::normalize(key))
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.inner.remove(&Self::normalize(key))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate over `(lowercase key, value)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: AsRef<str>, V> FromIterator<(K, V)> for CaseInsensitiveMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k.as_ref(), v);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_ignore_case() {
        let map: CaseInsensitiveMap<u32> = [("GHz", 9), ("km/s", 3)].into_iter().collect();
        assert_eq!(map.get("ghz"), Some(&9));
        assert_eq!(map.get("GHZ"), Some(&9));
        assert!(map.contains_key("KM/S"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn insert_overwrites_folded_key() {
        let mut map = CaseInsensitiveMap::new();
        assert_eq!(map.insert("MHz", 1), None);
        assert_eq!(map.insert("mhz", 2), Some(1));
        assert_eq!(map.len(), 1);
        assert_eq!(map.remove("MHZ"), Some(2));
        assert!(map.is_empty());
    }
}
