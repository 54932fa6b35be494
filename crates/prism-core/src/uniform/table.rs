// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Reflection of a linked program into an ordered table, and carrying user
//! values from one link to the next.

use std::collections::HashMap;

use crate::driver::{ProgramHandle, ShaderDriver};
use crate::error::DriverError;
use crate::uniform::{UniformType, UniformValue};

/// The name of the derived clock uniform unless configured otherwise.
pub const DEFAULT_TIME_UNIFORM: &str = "time";

/// The ordered set of active uniforms reflected from one successful link.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UniformTable {
    entries: Vec<UniformValue>,
}

impl UniformTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table from already-built values, keeping their order.
    pub fn from_values(entries: Vec<UniformValue>) -> Self {
        Self { entries }
    }

    /// Reflects the active uniforms of a linked program.
    ///
    /// Every entry starts with the default payload for its type. Arrays are
    /// represented by a single entry under the name the driver reports.
    ///
    /// ## Errors
    /// * `DriverError` - If any driver query fails.
    pub fn reflect<D: ShaderDriver + ?Sized>(
        driver: &mut D,
        program: ProgramHandle,
    ) -> Result<Self, DriverError> {
        let count = driver.active_uniform_count(program)?;
        let mut entries = Vec::with_capacity(count as usize);
        for index in 0..count {
            let info = driver.active_uniform(program, index)?;
            log::trace!(
                "Reflected uniform {index}: '{}' {} @ {:?}",
                info.name,
                info.ty,
                info.location
            );
            entries.push(
                UniformValue::new(info.name, info.ty, info.location)
                    .with_array_size(info.array_size),
            );
        }
        log::debug!("Reflected {} active uniforms from {program:?}", entries.len());
        Ok(Self { entries })
    }

    /// Carries the payloads of `previous` over into this table.
    ///
    /// Equivalent to [`migrate_from_excluding`](Self::migrate_from_excluding)
    /// with [`DEFAULT_TIME_UNIFORM`].
    pub fn migrate_from(&mut self, previous: &UniformTable) -> usize {
        self.migrate_from_excluding(previous, DEFAULT_TIME_UNIFORM)
    }

    /// Carries the payloads of `previous` over into this table.
    ///
    /// Entries are matched on exact name and type tag; locations are ignored and
    /// every entry keeps its own. Each previous entry lands on the first entry of
    /// this table with the same key, so when `previous` repeats a key its last
    /// occurrence wins and later duplicates here keep their defaults. The float
    /// scalar named `time_uniform` (any case) is derived every frame and is never
    /// migrated.
    ///
    /// ## Returns
    /// The number of entries of this table that received a previous payload.
    pub fn migrate_from_excluding(
        &mut self,
        previous: &UniformTable,
        time_uniform: &str,
    ) -> usize {
        let mut targets: HashMap<(&str, UniformType), usize> =
            HashMap::with_capacity(self.entries.len());
        for (position, entry) in self.entries.iter().enumerate() {
            if !entry.is_time_uniform(time_uniform) {
                targets.entry((entry.name(), entry.ty())).or_insert(position);
            }
        }

        let mut received: HashMap<usize, &UniformValue> = HashMap::new();
        for old in &previous.entries {
            if let Some(&position) = targets.get(&(old.name(), old.ty())) {
                received.insert(position, old);
            }
        }

        let migrated = received.len();
        for (position, old) in received {
            self.entries[position].copy_payload_from(old);
        }
        log::debug!(
            "Migrated {migrated} of {} uniforms from the previous link",
            self.entries.len()
        );
        migrated
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry at `index`.
    pub fn get(&self, index: usize) -> Option<&UniformValue> {
        self.entries.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut UniformValue> {
        self.entries.get_mut(index)
    }

    /// The first entry with the given name.
    pub fn find(&self, name: &str) -> Option<&UniformValue> {
        self.entries.iter().find(|u| u.name() == name)
    }

    /// Iterates over the entries in reflection order.
    pub fn iter(&self) -> std::slice::Iter<'_, UniformValue> {
        self.entries.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, UniformValue> {
        self.entries.iter_mut()
    }
}

impl<'a> IntoIterator for &'a UniformTable {
    type Item = &'a UniformValue;
    type IntoIter = std::slice::Iter<'a, UniformValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
