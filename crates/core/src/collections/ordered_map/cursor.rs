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

//! Borrowing cursors over the order sequence of an [`OrderedMap`].
//!
//! A [`Cursor`] is a read-only, `Copy` view of one position and supports the stepping
//! arithmetic `+`, `-`, `+=` and `-=` in whole steps. A [`CursorMut`] additionally allows
//! in-place value mutation and removal of the current entry, and converts into a [`Cursor`].
//!
//! Stepping past either boundary panics, the same as the underlying
//! [`OrderedMap::next_position`] and [`OrderedMap::prev_position`].

use std::{
    fmt::{Debug, Formatter},
    hash::Hash,
    ops::{Add, AddAssign, Sub, SubAssign},
    ptr,
};

use super::{OrderedMap, Position, PositionError};

/// A read-only cursor over an [`OrderedMap`].
pub struct Cursor<'a, K, V> {
    map: &'a OrderedMap<K, V>,
    position: Position,
}

impl<'a, K, V> Cursor<'a, K, V> {
    const fn new(map: &'a OrderedMap<K, V>, position: Position) -> Self {
        Self { map, position }
    }

    /// Returns the position the cursor denotes.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns whether the cursor is at the end sentinel.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.position.is_end()
    }

    /// Returns the entry under the cursor, or `None` at the end.
    #[must_use]
    pub fn entry(&self) -> Option<(&'a K, &'a V)> {
        self.map.entry_at(self.position)
    }

    /// Returns the key under the cursor, or `None` at the end.
    #[must_use]
    pub fn key(&self) -> Option<&'a K> {
        self.map.key_at(self.position)
    }

    /// Returns the value under the cursor, or `None` at the end.
    #[must_use]
    pub fn value(&self) -> Option<&'a V> {
        self.map.value_at(self.position)
    }

    /// Moves the cursor one step towards the end.
    ///
    /// # Errors
    ///
    /// Returns an error if the cursor is already at the end; the cursor is left unchanged.
    pub fn try_move_next(&mut self) -> Result<(), PositionError> {
        self.position = self.map.try_next_position(self.position)?;
        Ok(())
    }

    /// Moves the cursor one step towards the front.
    ///
    /// # Errors
    ///
    /// Returns an error if the cursor is at the oldest entry; the cursor is left unchanged.
    pub fn try_move_prev(&mut self) -> Result<(), PositionError> {
        self.position = self.map.try_prev_position(self.position)?;
        Ok(())
    }

    /// Moves the cursor one step towards the end.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is already at the end.
    pub fn move_next(&mut self) {
        self.position = self.map.next_position(self.position);
    }

    /// Moves the cursor one step towards the front.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the oldest entry.
    pub fn move_prev(&mut self) {
        self.position = self.map.prev_position(self.position);
    }
}

impl<K, V> Clone for Cursor<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Cursor<'_, K, V> {}

/// Cursors are equal when they belong to the same map and denote the same position.
impl<K, V> PartialEq for Cursor<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.map, other.map) && self.position == other.position
    }
}

impl<K, V> Eq for Cursor<'_, K, V> {}

impl<K: Debug, V: Debug> Debug for Cursor<'_, K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(Cursor))
            .field("position", &self.position)
            .field("entry", &self.entry())
            .finish()
    }
}

impl<K, V> AddAssign<usize> for Cursor<'_, K, V> {
    /// # Panics
    ///
    /// Panics if a step would pass the end.
    fn add_assign(&mut self, steps: usize) {
        for _ in 0..steps {
            self.move_next();
        }
    }
}

impl<K, V> SubAssign<usize> for Cursor<'_, K, V> {
    /// # Panics
    ///
    /// Panics if a step would pass the oldest entry.
    fn sub_assign(&mut self, steps: usize) {
        for _ in 0..steps {
            self.move_prev();
        }
    }
}

impl<K, V> Add<usize> for Cursor<'_, K, V> {
    type Output = Self;

    fn add(mut self, steps: usize) -> Self::Output {
        self += steps;
        self
    }
}

impl<K, V> Sub<usize> for Cursor<'_, K, V> {
    type Output = Self;

    fn sub(mut self, steps: usize) -> Self::Output {
        self -= steps;
        self
    }
}

/// A cursor over an [`OrderedMap`] which can mutate values and remove entries.
pub struct CursorMut<'a, K, V> {
    map: &'a mut OrderedMap<K, V>,
    position: Position,
}

impl<'a, K, V> CursorMut<'a, K, V> {
    const fn new(map: &'a mut OrderedMap<K, V>, position: Position) -> Self {
        Self { map, position }
    }

    /// Returns the position the cursor denotes.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns whether the cursor is at the end sentinel.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.position.is_end()
    }

    /// Returns the entry under the cursor, or `None` at the end.
    #[must_use]
    pub fn entry(&self) -> Option<(&K, &V)> {
        self.map.entry_at(self.position)
    }

    /// Returns the key under the cursor, or `None` at the end.
    #[must_use]
    pub fn key(&self) -> Option<&K> {
        self.map.key_at(self.position)
    }

    /// Returns the value under the cursor, or `None` at the end.
    #[must_use]
    pub fn value(&self) -> Option<&V> {
        self.map.value_at(self.position)
    }

    /// Returns a mutable reference to the value under the cursor, or `None` at the end.
    ///
    /// The entry is not reordered.
    pub fn value_mut(&mut self) -> Option<&mut V> {
        self.map.value_at_mut(self.position)
    }

    /// Moves the cursor one step towards the end.
    ///
    /// # Errors
    ///
    /// Returns an error if the cursor is already at the end; the cursor is left unchanged.
    pub fn try_move_next(&mut self) -> Result<(), PositionError> {
        self.position = self.map.try_next_position(self.position)?;
        Ok(())
    }

    /// Moves the cursor one step towards the front.
    ///
    /// # Errors
    ///
    /// Returns an error if the cursor is at the oldest entry; the cursor is left unchanged.
    pub fn try_move_prev(&mut self) -> Result<(), PositionError> {
        self.position = self.map.try_prev_position(self.position)?;
        Ok(())
    }

    /// Moves the cursor one step towards the end.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is already at the end.
    pub fn move_next(&mut self) {
        self.position = self.map.next_position(self.position);
    }

    /// Moves the cursor one step towards the front.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the oldest entry.
    pub fn move_prev(&mut self) {
        self.position = self.map.prev_position(self.position);
    }

    /// Returns a read-only cursor at the same position, borrowing this one.
    #[must_use]
    pub fn as_cursor(&self) -> Cursor<'_, K, V> {
        Cursor::new(self.map, self.position)
    }
}

impl<K, V> CursorMut<'_, K, V>
where
    K: Clone + Eq + Hash,
{
    /// Removes the entry under the cursor and moves the cursor to the following entry.
    ///
    /// Returns `None`, leaving the cursor unchanged, when the cursor is at the end.
    pub fn remove_current(&mut self) -> Option<(K, V)> {
        let (next, key, value) = self.map.try_remove_at(self.position).ok()?;
        self.position = next;
        Some((key, value))
    }
}

impl<'a, K, V> From<CursorMut<'a, K, V>> for Cursor<'a, K, V> {
    fn from(cursor: CursorMut<'a, K, V>) -> Self {
        Cursor::new(cursor.map, cursor.position)
    }
}

impl<K: Debug, V: Debug> Debug for CursorMut<'_, K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(CursorMut))
            .field("position", &self.position)
            .field("entry", &self.entry())
            .finish()
    }
}

impl<K, V> OrderedMap<K, V> {
    /// Returns a cursor at `position`.
    #[must_use]
    pub const fn cursor_at(&self, position: Position) -> Cursor<'_, K, V> {
        Cursor::new(self, position)
    }

    /// Returns a cursor at the oldest entry, or at the end when empty.
    #[must_use]
    pub fn cursor_front(&self) -> Cursor<'_, K, V> {
        Cursor::new(self, self.begin())
    }

    /// Returns a cursor at the newest entry, or at the end when empty.
    #[must_use]
    pub fn cursor_back(&self) -> Cursor<'_, K, V> {
        let position = self.try_prev_position(Position::End).unwrap_or(Position::End);
        Cursor::new(self, position)
    }

    /// Returns a cursor at the end sentinel.
    #[must_use]
    pub const fn cursor_end(&self) -> Cursor<'_, K, V> {
        Cursor::new(self, Position::End)
    }

    /// Returns a mutable cursor at `position`.
    pub const fn cursor_mut_at(&mut self, position: Position) -> CursorMut<'_, K, V> {
        CursorMut::new(self, position)
    }

    /// Returns a mutable cursor at the oldest entry, or at the end when empty.
    pub fn cursor_mut_front(&mut self) -> CursorMut<'_, K, V> {
        let position = self.begin();
        CursorMut::new(self, position)
    }

    /// Returns a mutable cursor at the newest entry, or at the end when empty.
    pub fn cursor_mut_back(&mut self) -> CursorMut<'_, K, V> {
        let position = self.try_prev_position(Position::End).unwrap_or(Position::End);
        CursorMut::new(self, position)
    }

    /// Returns a mutable cursor at the end sentinel.
    pub const fn cursor_mut_end(&mut self) -> CursorMut<'_, K, V> {
        CursorMut::new(self, Position::End)
    }
}
