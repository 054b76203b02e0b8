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

//! Shared messages and checks for conditions which indicate a programming error.
//!
//! Checked operations return a typed error; their panicking counterparts call
//! `expect(FAILED)` on the checked result so every fatal misuse reports the same prefix.

/// Message prefix for a failed condition in a panicking operation.
pub const FAILED: &str = "Condition failed";

/// Checks that `offset` steps may be taken from a sequence of `len` entries.
///
/// Offsets are applied one step at a time, so the only hard limit is that the magnitude
/// fits in a `usize`, which `isize::unsigned_abs` guarantees. This returns whether the
/// magnitude could possibly stay in bounds of a sequence with `len` entries plus the end.
#[must_use]
pub const fn offset_within(len: usize, offset: isize) -> bool {
    offset.unsigned_abs() <= len
}
