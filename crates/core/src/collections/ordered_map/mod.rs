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

//! An insertion-ordered hash map with O(1) insert, lookup, removal, and reordering.
//!
//! [`OrderedMap`] keeps two structures in lockstep:
//!
//! - An index (`AHashMap<K, SlotId>`) from each key to the arena slot holding its entry.
//! - An order sequence, a doubly-linked list threaded through the arena slots from the
//!   oldest entry (front) to the most recently inserted or refreshed entry (back).
//!
//! Inserting a key which is already present overwrites its value and moves the entry to the
//! back without creating a duplicate. Entries keep their arena slot for their whole lifetime,
//! so a [`Position`] obtained for an entry keeps denoting that entry after the entry is moved,
//! and after any *other* entry is removed. Each slot carries a generation which is bumped when
//! the slot is vacated, which turns use of a removed entry's position into a detectable
//! [`PositionError::Stale`] rather than silently aliasing a later occupant.
//!
//! # Examples
//!
//! ```
//! use recency_core::OrderedMap;
//!
//! let mut map = OrderedMap::new();
//! map.insert("a", 1);
//! map.insert("b", 2);
//! map.insert("a", 3); // Moves "a" to the back
//!
//! assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec!["b", "a"]);
//! assert_eq!(map.value(&"a"), 3);
//! assert_eq!(map.value(&"missing"), 0);
//! ```

mod cursor;
mod iter;
mod position;

use std::{
    borrow::Borrow,
    fmt::{Debug, Formatter},
    hash::Hash,
    mem,
};

use ahash::AHashMap;

pub use self::{
    cursor::{Cursor, CursorMut},
    iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut},
    position::{Position, PositionError, SlotId},
};
use crate::correctness::FAILED;

#[derive(Clone, Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Clone, Debug)]
struct Slot<K, V> {
    /// Bumped every time the slot is vacated.
    generation: u32,
    node: Option<Node<K, V>>,
}

/// A hash map which remembers the order in which keys were inserted or last re-inserted.
///
/// See the [module level documentation](crate::collections::ordered_map) for the ordering and position guarantees.
#[derive(Clone)]
pub struct OrderedMap<K, V> {
    index: AHashMap<K, SlotId>,
    slots: Vec<Slot<K, V>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl<K, V> OrderedMap<K, V> {
    /// Creates a new empty [`OrderedMap`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            index: AHashMap::new(),
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
        }
    }

    /// Creates a new empty [`OrderedMap`] with room for at least `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: AHashMap::with_capacity(capacity),
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
        }
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns whether the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the oldest entry.
    #[must_use]
    pub fn front(&self) -> Option<(&K, &V)> {
        self.head.map(|idx| {
            let node = self.node(idx);
            (&node.key, &node.value)
        })
    }

    /// Returns the most recently inserted or refreshed entry.
    #[must_use]
    pub fn back(&self) -> Option<(&K, &V)> {
        self.tail.map(|idx| {
            let node = self.node(idx);
            (&node.key, &node.value)
        })
    }

    /// Returns an iterator over the entries, oldest first.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self)
    }

    /// Returns an iterator over the entries with mutable values, oldest first.
    ///
    /// Mutating a value through the iterator does not reorder its entry.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(self)
    }

    /// Returns an iterator over the keys, oldest first.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    /// Returns an iterator over the values, ordered by their keys' recency.
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }

    /// Returns an iterator over mutable values, ordered by their keys' recency.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut::new(self.iter_mut())
    }

    /// Removes all entries.
    ///
    /// Positions obtained before the call become stale; slots are recycled with new
    /// generations rather than reset.
    pub fn clear(&mut self) {
        self.index.clear();
        self.head = None;
        self.tail = None;

        for slot in &mut self.slots {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
        }

        self.free.clear();
        self.free.extend((0..self.slots.len()).rev());
    }

    /// Exchanges the full contents of this map with `other` in O(1).
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    fn node(&self, idx: usize) -> &Node<K, V> {
        self.slots[idx].node.as_ref().expect(FAILED)
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node<K, V> {
        self.slots[idx].node.as_mut().expect(FAILED)
    }

    fn slot_id(&self, idx: usize) -> SlotId {
        SlotId::new(idx, self.slots[idx].generation)
    }

    fn allocate(&mut self, node: Node<K, V>) -> SlotId {
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx];
            debug_assert!(slot.node.is_none(), "free slot {idx} is occupied");
            slot.node = Some(node);
            return SlotId::new(idx, slot.generation);
        }

        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        SlotId::new(self.slots.len() - 1, 0)
    }

    fn release(&mut self, idx: usize) -> Node<K, V> {
        let slot = &mut self.slots[idx];
        let node = slot.node.take().expect(FAILED);
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(idx);
        node
    }

    fn link_back(&mut self, idx: usize) {
        let tail = self.tail;
        let node = self.node_mut(idx);
        node.prev = tail;
        node.next = None;

        match tail {
            Some(t) => self.node_mut(t).next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
    }

    fn link_front(&mut self, idx: usize) {
        let head = self.head;
        let node = self.node_mut(idx);
        node.prev = None;
        node.next = head;

        match head {
            Some(h) => self.node_mut(h).prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let node = self.node_mut(idx);
        let prev = node.prev.take();
        let next = node.next.take();

        match prev {
            Some(p) => self.node_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.node_mut(n).prev = prev,
            None => self.tail = prev,
        }
    }

    fn relink_back(&mut self, idx: usize) {
        if self.tail != Some(idx) {
            self.unlink(idx);
            self.link_back(idx);
        }
    }

    fn relink_front(&mut self, idx: usize) {
        if self.head != Some(idx) {
            self.unlink(idx);
            self.link_front(idx);
        }
    }

    /// Unlinks and vacates the slot, leaving the index untouched.
    fn detach(&mut self, idx: usize) -> Node<K, V> {
        self.unlink(idx);
        self.release(idx)
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Inserts a key-value pair at the back of the order.
    ///
    /// If the key is already present its value is overwritten and the entry moves to the
    /// back; no duplicate is created and the entry keeps its position handle.
    ///
    /// Returns the position of the entry.
    pub fn insert(&mut self, key: K, value: V) -> Position {
        Position::Entry(self.insert_full(key, value))
    }

    fn insert_full(&mut self, key: K, value: V) -> SlotId {
        if let Some(&id) = self.index.get(&key) {
            self.node_mut(id.index).value = value;
            self.relink_back(id.index);
            return id;
        }

        let id = self.allocate(Node {
            key: key.clone(),
            value,
            prev: None,
            next: None,
        });
        self.link_back(id.index);
        self.index.insert(key, id);
        id
    }

    /// Returns whether the map contains `key`.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Returns a reference to the value for `key` without affecting the order.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.index.get(key)?;
        Some(&self.node(id.index).value)
    }

    /// Returns the stored key and its value without affecting the order.
    #[must_use]
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.index.get(key)?;
        let node = self.node(id.index);
        Some((&node.key, &node.value))
    }

    /// Returns a mutable reference to the value for `key` without affecting the order.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.index.get(key)?.index;
        Some(&mut self.node_mut(idx).value)
    }

    /// Returns a clone of the value for `key`, or `V::default()` if absent.
    #[must_use]
    pub fn value<Q>(&self, key: &Q) -> V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone + Default,
    {
        self.get(key).cloned().unwrap_or_default()
    }

    /// Returns a clone of the value for `key`, or `default` if absent.
    #[must_use]
    pub fn value_or<Q>(&self, key: &Q, default: V) -> V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.get(key).cloned().unwrap_or(default)
    }

    /// Returns a mutable reference to the value for `key`, first inserting `V::default()`
    /// at the back if the key is absent.
    ///
    /// Unlike [`get`](Self::get) this may grow the map. A key which is already present
    /// keeps its place in the order.
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let existing = self.index.get(&key).map(|id| id.index);
        let idx = match existing {
            Some(idx) => idx,
            None => self.insert_full(key, V::default()).index,
        };
        &mut self.node_mut(idx).value
    }

    /// Removes `key`, returning the stored key and value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.index.remove(key)?;
        let node = self.detach(id.index);
        Some((node.key, node.value))
    }

    /// Removes `key`, returning the number of entries removed (0 or 1).
    pub fn remove<Q>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        usize::from(self.remove_entry(key).is_some())
    }

    /// Removes `key` and returns its value, or `V::default()` if absent.
    pub fn take<Q>(&mut self, key: &Q) -> V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Default,
    {
        self.remove_entry(key)
            .map(|(_, value)| value)
            .unwrap_or_default()
    }

    /// Moves the entry for `key` to the back of the order, leaving its value untouched.
    ///
    /// Returns whether the key was present.
    pub fn move_to_back<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(id) = self.index.get(key).copied() else {
            return false;
        };
        self.relink_back(id.index);
        true
    }

    /// Moves the entry for `key` to the front of the order, leaving its value untouched.
    ///
    /// Returns whether the key was present.
    pub fn move_to_front<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(id) = self.index.get(key).copied() else {
            return false;
        };
        self.relink_front(id.index);
        true
    }

    /// Removes and returns the oldest entry.
    pub fn pop_front(&mut self) -> Option<(K, V)> {
        let idx = self.head?;
        let node = self.detach(idx);
        self.index.remove(&node.key);
        Some((node.key, node.value))
    }

    /// Removes and returns the most recently inserted or refreshed entry.
    pub fn pop_back(&mut self) -> Option<(K, V)> {
        let idx = self.tail?;
        let node = self.detach(idx);
        self.index.remove(&node.key);
        Some((node.key, node.value))
    }
}

impl<K, V> Default for OrderedMap<K, V> {
    /// Creates a new default [`OrderedMap`] instance.
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Debug, V: Debug> Debug for OrderedMap<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Two maps are equal when they hold equal entries in the same order.
impl<K: PartialEq, V: PartialEq> PartialEq for OrderedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for OrderedMap<K, V> {}

impl<K, V> Extend<(K, V)> for OrderedMap<K, V>
where
    K: Clone + Eq + Hash,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for OrderedMap<K, V>
where
    K: Clone + Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = Self::with_capacity(iter.size_hint().0);
        map.extend(iter);
        map
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for OrderedMap<K, V>
where
    K: Clone + Eq + Hash,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::{fixture, rstest};

    use super::*;

    fn keys_of<K: Clone, V>(map: &OrderedMap<K, V>) -> Vec<K> {
        map.keys().cloned().collect()
    }

    /// Walks the links in both directions and checks them against the index.
    fn assert_coherent<K: Clone + Debug + Eq + Hash, V>(map: &OrderedMap<K, V>) {
        let forward: Vec<K> = keys_of(map);
        let mut backward: Vec<K> = map.keys().rev().cloned().collect();
        backward.reverse();

        assert_eq!(forward, backward);
        assert_eq!(forward.len(), map.len());
        for key in &forward {
            assert!(map.contains_key(key), "{key:?} missing from index");
        }
        let occupied = map.slots.iter().filter(|slot| slot.node.is_some()).count();
        assert_eq!(occupied, map.len());
        assert_eq!(map.slots.len() - map.free.len(), map.len());
    }

    #[fixture]
    fn abc() -> OrderedMap<String, i32> {
        let mut map = OrderedMap::new();
        map.insert("a".to_string(), 1);
        map.insert("b".to_string(), 2);
        map.insert("c".to_string(), 3);
        map
    }

    #[rstest]
    fn test_new_is_empty() {
        let map: OrderedMap<u32, u32> = OrderedMap::new();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
        assert_eq!(map.front(), None);
        assert_eq!(map.back(), None);
        assert_eq!(map.keys().next(), None);
    }

    #[rstest]
    fn test_contains_key(abc: OrderedMap<String, i32>) {
        assert!(abc.contains_key("a"));
        assert!(abc.contains_key("c"));
        assert!(!abc.contains_key("d"));
    }

    #[rstest]
    fn test_len_after_remove_and_clear() {
        let mut map = OrderedMap::from([(0, 0), (1, 1), (2, 2)]);
        assert_eq!(map.len(), 3);

        map.remove(&2);
        map.remove(&0);
        assert_eq!(map.len(), 1);
        assert_coherent(&map);

        map.clear();
        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
        assert_coherent(&map);
    }

    #[rstest]
    fn test_clear_then_reuse() {
        let mut map = OrderedMap::from([(0, "zero"), (1, "one"), (2, "two")]);
        map.clear();
        map.insert(5, "five");
        map.insert(6, "six");

        assert_eq!(keys_of(&map), vec![5, 6]);
        assert_eq!(map.slots.len(), 3);
        assert_coherent(&map);
    }

    #[rstest]
    fn test_remove_returns_count(abc: OrderedMap<String, i32>) {
        let mut map = abc;
        assert_eq!(map.remove("b"), 1);
        assert!(!map.contains_key("b"));
        assert_eq!(map.len(), 2);

        assert_eq!(map.remove("d"), 0);
        assert_eq!(map.len(), 2);
        assert_eq!(keys_of(&map), vec!["a".to_string(), "c".to_string()]);
    }

    #[rstest]
    fn test_order_after_mixed_operations() {
        let mut map = OrderedMap::new();
        map.insert(2, 2);
        map.insert(1, 1);
        map.insert(0, 0);
        map.remove(&1);
        map.insert(3, 3);
        map.insert(1, 1);
        map.remove(&3);
        map.remove(&2);
        map.insert(5, 5);
        map.remove(&1);
        map.insert(6, 6);

        assert_eq!(keys_of(&map), vec![0, 5, 6]);
        assert_coherent(&map);
    }

    #[rstest]
    fn test_reinsert_moves_to_back_without_duplicate() {
        let mut map = OrderedMap::new();
        map.insert(1, "one");
        map.insert(2, "two");
        map.insert(1, "uno");

        assert_eq!(keys_of(&map), vec![2, 1]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&1), Some(&"uno"));
        assert_coherent(&map);
    }

    #[rstest]
    fn test_reinsert_back_entry_keeps_order() {
        let mut map = OrderedMap::from([(1, 1), (2, 2)]);
        map.insert(2, 20);

        assert_eq!(keys_of(&map), vec![1, 2]);
        assert_eq!(map.value(&2), 20);
        assert_coherent(&map);
    }

    #[rstest]
    fn test_swap() {
        let mut first = OrderedMap::from([(1, 1), (2, 2)]);
        let mut second = OrderedMap::from([(5, 5), (3, 3), (4, 4)]);

        first.swap(&mut second);

        assert_eq!(keys_of(&first), vec![5, 3, 4]);
        assert_eq!(keys_of(&second), vec![1, 2]);
        assert_eq!(first.len(), 3);
        assert_eq!(second.len(), 2);
        assert_eq!(first.value(&3), 3);
        assert_eq!(first.value(&4), 4);
        assert_eq!(first.value(&5), 5);
        assert_eq!(second.value(&1), 1);
        assert_eq!(second.value(&2), 2);
    }

    #[rstest]
    fn test_take() {
        let mut map = OrderedMap::from([(1, 1), (2, 2), (3, 3)]);

        assert_eq!(map.take(&1), 1);
        assert_eq!(map.len(), 2);
        assert_eq!(map.take(&1), 0);
        assert_eq!(map.len(), 2);
    }

    #[rstest]
    fn test_value_and_value_or() {
        let map = OrderedMap::from([(0, 0), (1, 1), (2, 2)]);

        assert_eq!(map.value(&1), 1);
        assert_eq!(map.value(&0), 0);
        assert_eq!(map.value(&2), 2);
        assert_eq!(map.value(&7), 0);
        assert_eq!(map.value_or(&7, -1), -1);
        assert_eq!(map.value_or(&2, -1), 2);
    }

    #[rstest]
    fn test_lookups_do_not_reorder(abc: OrderedMap<String, i32>) {
        let mut map = abc;
        let _ = map.value("a");
        let _ = map.get("a");
        let _ = map.value_or("a", 0);
        if let Some(value) = map.get_mut("a") {
            *value += 10;
        }

        assert_eq!(keys_of(&map), vec!["a", "b", "c"]);
        assert_eq!(map.value("a"), 11);
    }

    #[rstest]
    fn test_values_follow_order() {
        let mut map = OrderedMap::new();
        map.insert(6, 6);
        map.insert(1, 1);
        map.insert(0, 0);
        map.remove(&1);
        map.insert(3, 3);
        map.insert(1, 1);
        map.remove(&0);
        map.insert(5, 5);
        map.remove(&6);
        map.insert(6, 6);

        assert_eq!(map.values().copied().collect::<Vec<_>>(), vec![3, 1, 5, 6]);
    }

    #[rstest]
    fn test_clone_is_independent() {
        let mut original = OrderedMap::from([(3, 3), (2, 2), (1, 1)]);
        let copy = original.clone();

        original.insert(3, 30);
        original.remove(&2);

        assert_eq!(copy.len(), 3);
        assert_eq!(keys_of(&copy), vec![3, 2, 1]);
        assert_eq!(copy.value(&3), 3);
        assert_eq!(keys_of(&original), vec![1, 3]);
    }

    #[rstest]
    fn test_equality_requires_same_order() {
        let first = OrderedMap::from([(3, 3), (2, 2), (1, 1)]);
        let second = OrderedMap::from([(3, 3), (2, 2), (1, 1)]);
        assert_eq!(first, second);

        let mut third = OrderedMap::new();
        third.insert(3, 3);
        third.insert(1, 1);
        third.insert(2, 2);
        third.remove(&1);
        third.insert(1, 1);
        assert_eq!(first, third);

        let reversed = OrderedMap::from([(1, 1), (2, 2), (3, 3)]);
        assert_ne!(first, reversed);
    }

    #[rstest]
    fn test_equality_compares_values() {
        let first = OrderedMap::from([(1, 1), (2, 2)]);
        let second = OrderedMap::from([(1, 1), (2, 3)]);
        assert_ne!(first, second);
    }

    #[rstest]
    fn test_get_or_insert_default() {
        let mut map = OrderedMap::new();
        map.insert("1".to_string(), "1".to_string());
        map.insert("2".to_string(), "2".to_string());
        map.insert("3".to_string(), "3".to_string());

        assert_eq!(map.value("2"), "2");

        map.get_or_insert_default("3".to_string()).push('3');
        assert_eq!(map.value("3"), "33");
        assert_eq!(keys_of(&map), vec!["1", "2", "3"]);

        assert!(map.get_or_insert_default("4".to_string()).is_empty());
        assert_eq!(map.len(), 4);
        assert_eq!(map.back(), Some((&"4".to_string(), &String::new())));
    }

    #[rstest]
    fn test_get_or_insert_default_keeps_position_of_present_key() {
        let mut map = OrderedMap::from([(1, 1), (2, 2)]);
        *map.get_or_insert_default(1) += 1;

        assert_eq!(keys_of(&map), vec![1, 2]);
        assert_eq!(map.value(&1), 2);
    }

    #[rstest]
    fn test_move_to_back_and_front(abc: OrderedMap<String, i32>) {
        let mut map = abc;
        assert!(map.move_to_back("a"));
        assert_eq!(keys_of(&map), vec!["b", "c", "a"]);

        assert!(map.move_to_front("c"));
        assert_eq!(keys_of(&map), vec!["c", "b", "a"]);

        assert!(!map.move_to_back("z"));
        assert!(!map.move_to_front("z"));
        assert_eq!(map.value("a"), 1);
        assert_coherent(&map);
    }

    #[rstest]
    fn test_pop_front_and_back(abc: OrderedMap<String, i32>) {
        let mut map = abc;
        assert_eq!(map.pop_front(), Some(("a".to_string(), 1)));
        assert_eq!(map.pop_back(), Some(("c".to_string(), 3)));
        assert_eq!(map.pop_back(), Some(("b".to_string(), 2)));
        assert_eq!(map.pop_front(), None);
        assert_eq!(map.pop_back(), None);
        assert_coherent(&map);
    }

    #[rstest]
    fn test_front_and_back(abc: OrderedMap<String, i32>) {
        assert_eq!(abc.front(), Some((&"a".to_string(), &1)));
        assert_eq!(abc.back(), Some((&"c".to_string(), &3)));
    }

    #[rstest]
    fn test_slots_are_recycled() {
        let mut map = OrderedMap::new();
        for i in 0..4 {
            map.insert(i, i);
        }
        map.remove(&1);
        map.remove(&2);
        map.insert(10, 10);
        map.insert(11, 11);

        assert_eq!(map.slots.len(), 4);
        assert_eq!(keys_of(&map), vec![0, 3, 10, 11]);
        assert_coherent(&map);
    }

    #[rstest]
    fn test_debug_renders_in_order() {
        let map = OrderedMap::from([(2, "b"), (1, "a")]);
        assert_eq!(format!("{map:?}"), r#"{2: "b", 1: "a"}"#);
    }

    #[rstest]
    fn test_extend_refreshes_existing_keys() {
        let mut map = OrderedMap::from([(1, 1), (2, 2), (3, 3)]);
        map.extend([(1, 10), (4, 4)]);

        assert_eq!(keys_of(&map), vec![2, 3, 1, 4]);
        assert_eq!(map.value(&1), 10);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Insert(u8, u16),
        Remove(u8),
        Take(u8),
        MoveToBack(u8),
        PopFront,
        Clear,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            6 => (0..32u8, any::<u16>()).prop_map(|(k, v)| Op::Insert(k, v)),
            3 => (0..32u8).prop_map(Op::Remove),
            1 => (0..32u8).prop_map(Op::Take),
            2 => (0..32u8).prop_map(Op::MoveToBack),
            1 => Just(Op::PopFront),
            1 => Just(Op::Clear),
        ]
    }

    /// Reference model: a vector of entries, oldest first.
    fn model_apply(model: &mut Vec<(u8, u16)>, op: &Op) {
        match op {
            Op::Insert(k, v) => {
                model.retain(|(key, _)| key != k);
                model.push((*k, *v));
            }
            Op::Remove(k) | Op::Take(k) => model.retain(|(key, _)| key != k),
            Op::MoveToBack(k) => {
                if let Some(i) = model.iter().position(|(key, _)| key == k) {
                    let entry = model.remove(i);
                    model.push(entry);
                }
            }
            Op::PopFront => {
                if !model.is_empty() {
                    model.remove(0);
                }
            }
            Op::Clear => model.clear(),
        }
    }

    proptest! {
        #[rstest]
        fn prop_matches_vec_model(ops in proptest::collection::vec(op_strategy(), 0..200)) {
            let mut map: OrderedMap<u8, u16> = OrderedMap::new();
            let mut model: Vec<(u8, u16)> = Vec::new();

            for op in &ops {
                let len_before = map.len();
                match op {
                    Op::Insert(k, v) => { map.insert(*k, *v); }
                    Op::Remove(k) => {
                        let present = map.contains_key(k);
                        let removed = map.remove(k);
                        prop_assert_eq!(removed, usize::from(present));
                        prop_assert_eq!(map.len(), len_before - removed);
                    }
                    Op::Take(k) => {
                        let expected = map.value(k);
                        prop_assert_eq!(map.take(k), expected);
                    }
                    Op::MoveToBack(k) => { map.move_to_back(k); }
                    Op::PopFront => { map.pop_front(); }
                    Op::Clear => map.clear(),
                }
                model_apply(&mut model, op);

                let entries: Vec<(u8, u16)> = map.iter().map(|(k, v)| (*k, *v)).collect();
                prop_assert_eq!(&entries, &model);
                prop_assert_eq!(map.len(), map.keys().count());
            }
        }

        #[rstest]
        fn prop_equal_iff_same_ordered_entries(
            first in proptest::collection::vec((0..8u8, 0..4u8), 0..20),
            second in proptest::collection::vec((0..8u8, 0..4u8), 0..20),
        ) {
            let a: OrderedMap<u8, u8> = first.into_iter().collect();
            let b: OrderedMap<u8, u8> = second.into_iter().collect();
            let a_entries: Vec<_> = a.iter().collect();
            let b_entries: Vec<_> = b.iter().collect();
            prop_assert_eq!(a == b, a_entries == b_entries);
        }

        #[rstest]
        fn prop_clone_equals_original(
            entries in proptest::collection::vec((0..16u8, any::<u8>()), 0..40),
        ) {
            let map: OrderedMap<u8, u8> = entries.into_iter().collect();
            let copy = map.clone();
            prop_assert_eq!(&copy, &map);
        }
    }
}
