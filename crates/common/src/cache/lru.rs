// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2026 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! A bounded least-recently-used cache built on [`OrderedMap`].
//!
//! The map's order doubles as the recency order: the front holds the least recently used
//! entry and the back the most recently used. Inserting an existing key or reading a key
//! through [`LruCache::get`] moves it to the back, and inserting past capacity evicts from
//! the front.

use std::{borrow::Borrow, fmt::Debug, hash::Hash};

use recency_core::collections::{Iter, Keys, OrderedMap};

use super::LruCacheConfig;

/// A fixed-capacity cache which evicts the least recently used entry when full.
///
/// # Examples
///
/// ```
/// use recency_common::cache::lru::LruCache;
///
/// let mut cache = LruCache::new(2);
/// cache.insert("a", 1);
/// cache.insert("b", 2);
///
/// // Reading "a" makes "b" the least recently used entry
/// assert_eq!(cache.get("a"), Some(&1));
///
/// assert_eq!(cache.insert("c", 3), Some(("b", 2)));
/// assert_eq!(cache.keys().copied().collect::<Vec<_>>(), vec!["a", "c"]);
/// ```
#[derive(Clone, Debug)]
pub struct LruCache<K, V>
where
    K: Clone + Debug + Eq + Hash,
{
    map: OrderedMap<K, V>,
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Clone + Debug + Eq + Hash,
{
    /// Creates a new empty [`LruCache`] holding at most `capacity` entries.
    ///
    /// A zero capacity cache accepts inserts but never retains them.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            map: OrderedMap::new(),
            capacity,
        }
    }

    /// Creates a new empty [`LruCache`] from `config`.
    #[must_use]
    pub fn from_config(config: &LruCacheConfig) -> Self {
        Self::new(config.capacity)
    }

    /// Returns the maximum number of entries.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of entries in the cache.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns whether the cache contains `key`, without refreshing it.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Returns the value for `key` without refreshing it.
    #[must_use]
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key)
    }

    /// Returns the least recently used entry without removing it.
    #[must_use]
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.map.front()
    }

    /// Returns the value for `key`, marking it most recently used.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.map.move_to_back(key) {
            self.map.get(key)
        } else {
            None
        }
    }

    /// Returns a mutable reference to the value for `key`, marking it most recently used.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.map.move_to_back(key) {
            self.map.get_mut(key)
        } else {
            None
        }
    }

    /// Returns a clone of the value for `key`, marking it most recently used.
    ///
    /// Returns `V::default()` and leaves the order untouched if the key is absent.
    pub fn value<Q>(&mut self, key: &Q) -> V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone + Default,
    {
        self.get(key).cloned().unwrap_or_default()
    }

    /// Inserts `key` as the most recently used entry, overwriting any previous value.
    ///
    /// If the cache then holds more than [`capacity`](Self::capacity) entries the least
    /// recently used one is evicted and returned. With zero capacity this is the entry
    /// just inserted.
    pub fn insert(&mut self, key: K, value: V) -> Option<(K, V)> {
        self.map.insert(key, value);

        let mut evicted = None;
        while self.map.len() > self.capacity {
            match self.evict_lru() {
                Some(entry) => evicted = Some(entry),
                None => break,
            }
        }
        evicted
    }

    /// Removes `key`, returning the number of entries removed (0 or 1).
    ///
    /// The recency of the other entries is unchanged.
    pub fn remove<Q>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.remove(key)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        self.map.pop_front()
    }

    /// Removes all entries, keeping the capacity.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Returns the keys from least to most recently used.
    pub fn keys(&self) -> Keys<'_, K, V> {
        self.map.keys()
    }

    /// Returns the entries from least to most recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.map.iter()
    }

    /// Sets the capacity, evicting least recently used entries until the cache fits.
    ///
    /// Growing the capacity never adds or reorders entries.
    pub fn set_capacity(&mut self, capacity: usize) {
        let mut evicted = 0;
        while self.map.len() > capacity && self.evict_lru().is_some() {
            evicted += 1;
        }
        log::debug!(
            "Capacity changed {} -> {capacity}, evicted {evicted}",
            self.capacity
        );
        self.capacity = capacity;
    }

    fn evict_lru(&mut self) -> Option<(K, V)> {
        let entry = self.map.pop_front();
        if let Some((key, _)) = &entry {
            log::trace!("Evicted {key:?}");
        }
        entry
    }
}

impl<'a, K, V> IntoIterator for &'a LruCache<K, V>
where
    K: Clone + Debug + Eq + Hash,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
