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

//! Stable positions into the order sequence of an [`OrderedMap`].
//!
//! A [`Position`] is a detached, `Copy` handle which denotes either one entry or the end
//! sentinel one past the newest entry. Stepping and offsetting are defined in terms of the
//! order sequence, and an offset of `n` is exactly `n` single steps.
//!
//! A position remains valid until its own entry is removed. Removing other entries, moving
//! the entry (re-insert, [`move_to_back`](OrderedMap::move_to_back)), or mutating its value
//! does not invalidate it.

use std::{
    borrow::Borrow,
    hash::Hash,
    ops::{Index, IndexMut},
};

use super::OrderedMap;
use crate::correctness::{FAILED, offset_within};

/// A generation-tagged handle to an arena slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotId {
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

impl SlotId {
    pub(crate) const fn new(index: usize, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Returns the arena index of the slot.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the generation the slot had when the handle was issued.
    #[must_use]
    pub const fn generation(&self) -> u32 {
        self.generation
    }
}

/// A position in the order sequence of an [`OrderedMap`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Position {
    /// Denotes a single entry.
    Entry(SlotId),
    /// The sentinel one past the newest entry.
    End,
}

impl Position {
    /// Returns whether this is the end sentinel.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        matches!(self, Self::End)
    }

    /// Returns the slot handle, if this position denotes an entry.
    #[must_use]
    pub const fn slot(&self) -> Option<SlotId> {
        match self {
            Self::Entry(id) => Some(*id),
            Self::End => None,
        }
    }
}

/// Misuse of a [`Position`].
///
/// These all indicate a programming error in the caller; the panicking position methods
/// abort with the same conditions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    /// The entry the position denoted has been removed.
    #[error("position refers to an entry which has been removed")]
    Stale,
    /// The end sentinel has no entry.
    #[error("position is the end of the map and has no entry")]
    End,
    /// A backward step was taken from the oldest entry, or from the end of an empty map.
    #[error("cannot step before the first entry")]
    BeforeFront,
    /// A forward step was taken from the end sentinel.
    #[error("cannot step past the end of the map")]
    PastEnd,
}

impl<K, V> OrderedMap<K, V> {
    /// Returns the position of the oldest entry, or [`Position::End`] when empty.
    #[must_use]
    pub fn begin(&self) -> Position {
        self.position_of(self.head)
    }

    /// Returns the end sentinel position.
    #[must_use]
    pub const fn end(&self) -> Position {
        Position::End
    }

    /// Returns whether `position` can still be used with this map.
    ///
    /// The end sentinel is always valid.
    #[must_use]
    pub fn is_valid(&self, position: Position) -> bool {
        match position {
            Position::End => true,
            Position::Entry(_) => self.resolve(position).is_ok(),
        }
    }

    /// Returns the position following `position`.
    ///
    /// # Errors
    ///
    /// Returns an error if `position` is the end sentinel or is stale.
    pub fn try_next_position(&self, position: Position) -> Result<Position, PositionError> {
        if position.is_end() {
            return Err(PositionError::PastEnd);
        }
        let idx = self.resolve(position)?;
        Ok(self.position_of(self.node(idx).next))
    }

    /// Returns the position following `position`; the newest entry is followed by the end.
    ///
    /// # Panics
    ///
    /// Panics if `position` is the end sentinel or is stale.
    #[must_use]
    pub fn next_position(&self, position: Position) -> Position {
        self.try_next_position(position).expect(FAILED)
    }

    /// Returns the position preceding `position`.
    ///
    /// # Errors
    ///
    /// Returns an error if `position` is the oldest entry, is the end of an empty map, or
    /// is stale.
    pub fn try_prev_position(&self, position: Position) -> Result<Position, PositionError> {
        let prev = match position {
            Position::End => self.tail,
            Position::Entry(_) => {
                let idx = self.resolve(position)?;
                self.node(idx).prev
            }
        };
        prev.map(|idx| Position::Entry(self.slot_id(idx)))
            .ok_or(PositionError::BeforeFront)
    }

    /// Returns the position preceding `position`; the end is preceded by the newest entry.
    ///
    /// # Panics
    ///
    /// Panics if `position` is the oldest entry, is the end of an empty map, or is stale.
    #[must_use]
    pub fn prev_position(&self, position: Position) -> Position {
        self.try_prev_position(position).expect(FAILED)
    }

    /// Returns the position `offset` steps away from `position`.
    ///
    /// Positive offsets step towards the end, negative offsets towards the front. The result
    /// is identical to taking `offset.unsigned_abs()` single steps.
    ///
    /// # Errors
    ///
    /// Returns an error if `position` is stale or any step would leave the sequence.
    pub fn try_offset(&self, position: Position, offset: isize) -> Result<Position, PositionError> {
        if !position.is_end() {
            self.resolve(position)?;
        }

        if !offset_within(self.len(), offset) {
            return Err(if offset < 0 {
                PositionError::BeforeFront
            } else {
                PositionError::PastEnd
            });
        }

        let mut current = position;
        for _ in 0..offset.unsigned_abs() {
            current = if offset < 0 {
                self.try_prev_position(current)?
            } else {
                self.try_next_position(current)?
            };
        }
        Ok(current)
    }

    /// Returns the position `offset` steps away from `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is stale or any step would leave the sequence.
    #[must_use]
    pub fn offset(&self, position: Position, offset: isize) -> Position {
        self.try_offset(position, offset).expect(FAILED)
    }

    /// Returns the entry at `position`.
    ///
    /// # Errors
    ///
    /// Returns an error if `position` is the end sentinel or is stale.
    pub fn try_entry_at(&self, position: Position) -> Result<(&K, &V), PositionError> {
        let node = self.node(self.resolve(position)?);
        Ok((&node.key, &node.value))
    }

    /// Returns the entry at `position`, or `None` for the end sentinel or a stale position.
    #[must_use]
    pub fn entry_at(&self, position: Position) -> Option<(&K, &V)> {
        self.try_entry_at(position).ok()
    }

    /// Returns the key at `position`, or `None` for the end sentinel or a stale position.
    #[must_use]
    pub fn key_at(&self, position: Position) -> Option<&K> {
        self.entry_at(position).map(|(key, _)| key)
    }

    /// Returns the value at `position`, or `None` for the end sentinel or a stale position.
    #[must_use]
    pub fn value_at(&self, position: Position) -> Option<&V> {
        self.entry_at(position).map(|(_, value)| value)
    }

    /// Returns a mutable reference to the value at `position`.
    ///
    /// Mutating the value does not reorder the entry.
    ///
    /// # Errors
    ///
    /// Returns an error if `position` is the end sentinel or is stale.
    pub fn try_value_at_mut(&mut self, position: Position) -> Result<&mut V, PositionError> {
        let idx = self.resolve(position)?;
        Ok(&mut self.node_mut(idx).value)
    }

    /// Returns a mutable reference to the value at `position`, or `None` for the end
    /// sentinel or a stale position.
    pub fn value_at_mut(&mut self, position: Position) -> Option<&mut V> {
        self.try_value_at_mut(position).ok()
    }

    fn position_of(&self, idx: Option<usize>) -> Position {
        idx.map_or(Position::End, |idx| Position::Entry(self.slot_id(idx)))
    }

    /// Maps an entry position to its arena index after checking the generation.
    fn resolve(&self, position: Position) -> Result<usize, PositionError> {
        let Position::Entry(id) = position else {
            return Err(PositionError::End);
        };

        match self.slots.get(id.index) {
            Some(slot) if slot.generation == id.generation && slot.node.is_some() => Ok(id.index),
            _ => Err(PositionError::Stale),
        }
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Returns the position of `key`, or [`Position::End`] if absent.
    #[must_use]
    pub fn find<Q>(&self, key: &Q) -> Position
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index
            .get(key)
            .map_or(Position::End, |id| Position::Entry(*id))
    }

    /// Removes the entry at `position`, returning the position of the following entry (or
    /// the end) together with the removed key and value.
    ///
    /// Only positions denoting the removed entry are invalidated.
    ///
    /// # Errors
    ///
    /// Returns an error if `position` is the end sentinel or is stale.
    pub fn try_remove_at(&mut self, position: Position) -> Result<(Position, K, V), PositionError> {
        let idx = self.resolve(position)?;
        let next = self.node(idx).next;
        let node = self.detach(idx);
        self.index.remove(&node.key);
        Ok((self.position_of(next), node.key, node.value))
    }

    /// Removes the entry at `position`, returning the removed key and value, or `None` for
    /// the end sentinel or a stale position.
    pub fn remove_at(&mut self, position: Position) -> Option<(K, V)> {
        self.try_remove_at(position)
            .ok()
            .map(|(_, key, value)| (key, value))
    }

    /// Removes the entry at `position` and returns the position of the following entry.
    ///
    /// # Errors
    ///
    /// Returns an error if `position` is the end sentinel or is stale.
    pub fn try_erase(&mut self, position: Position) -> Result<Position, PositionError> {
        self.try_remove_at(position).map(|(next, _, _)| next)
    }

    /// Removes the entry at `position` and returns the position of the following entry, or
    /// [`Position::End`] if the newest entry was removed.
    ///
    /// # Panics
    ///
    /// Panics if `position` is the end sentinel or is stale.
    pub fn erase(&mut self, position: Position) -> Position {
        self.try_erase(position).expect(FAILED)
    }
}

impl<K, V> Index<Position> for OrderedMap<K, V> {
    type Output = V;

    /// # Panics
    ///
    /// Panics if `position` is the end sentinel or is stale.
    fn index(&self, position: Position) -> &Self::Output {
        self.try_entry_at(position).expect(FAILED).1
    }
}

impl<K, V> IndexMut<Position> for OrderedMap<K, V> {
    /// # Panics
    ///
    /// Panics if `position` is the end sentinel or is stale.
    fn index_mut(&mut self, position: Position) -> &mut Self::Output {
        self.try_value_at_mut(position).expect(FAILED)
    }
}
