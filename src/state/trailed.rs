//
// matched-map is free software: you can redistribute it and/or modify
// it under the terms of the GNU Lesser General Public License  v3
// as published by the Free Software Foundation.
//
// matched-map is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY.
// See the GNU Lesser General Public License  for more details.
//
// You should have received a copy of the GNU Lesser General Public License
// along with matched-map. If not, see http://www.gnu.org/licenses/lgpl-3.0.en.html
//
// Copyright (c)  2022 by X. Gillard
//

//! This module defines the data structures and utilities that are used to
//! save and restore data from the search trail.
use super::*;

//~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
//~~~~ TRAIL DATA ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
//~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

/// An entry that is used to save/restore data from the trail
#[derive(Debug, Clone, Copy)]
struct TrailEntry<T>
where
    T: Eq + Copy,
{
    /// The identifier of the managed slot
    id: Slot,
    /// At what 'time' was this data modified to the point where it needed being saved ?
    ///
    /// # Note:
    /// This is a monotonic clock indicating the validity timestamp of the data.
    /// A slot only needs to be trailed once per level: the first time it is
    /// modified after a `save_state`.
    clock: usize,
    /// The value that will be restored in the managed slot
    value: T,
}

/// This structure keeps track of the information about one given level: the
/// length of its trail and the count of slots that were managed when the level
/// was started
#[derive(Debug, Clone, Copy)]
struct Level {
    /// the length of the trail at the moment this level was started
    trail_size: usize,
    /// how many slots were accessible at the moment this level was started
    accessible: usize,
}

//~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
//~~~~ REVERSIBLE STORE ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
//~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

/// This is the structure which is in charge of guaranteeing that all slots
/// are properly saved and restored as though they were pushed on a stack
#[derive(Debug, Clone)]
pub struct ReversibleStore<T>
where
    T: Eq + Copy,
{
    /// The current 'time' of the store. It is incremented upon each save
    clock: usize,
    /// The current value of the various managed slots
    current: Vec<TrailEntry<T>>,
    /// The previous values that are saved on the trail
    trail: Vec<TrailEntry<T>>,
    /// The various 'levels' of data that have been saved and restored
    levels: Vec<Level>,
}

impl<T> Default for ReversibleStore<T>
where
    T: Eq + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ReversibleStore<T>
where
    T: Eq + Copy,
{
    /// creates a new empty store
    pub fn new() -> Self {
        Self {
            clock: 0,
            current: vec![],
            trail: vec![],
            levels: vec![],
        }
    }

    /// creates a new managed slot and returns its identifier
    pub fn manage(&mut self, value: T) -> Slot {
        let id = Slot(self.current.len());
        self.current.push(TrailEntry {
            id,
            clock: self.clock,
            value,
        });
        id
    }

    /// retrieves the value of the given slot
    pub fn get(&self, id: Slot) -> T {
        self.current[id.0].value
    }

    /// sets the value of the given slot and returns the new value of that slot
    pub fn set(&mut self, id: Slot, value: T) -> T {
        let curr = self.current[id.0];
        // if the value is unchanged there is no need to do anything
        if value != curr.value {
            if curr.clock < self.clock {
                self.trail.push(curr);
                self.current[id.0] = TrailEntry {
                    id,
                    clock: self.clock,
                    value,
                }
            } else {
                // already trailed at this level: modify it right away
                self.current[id.0].value = value;
            }
        }

        value
    }

    /// returns the number of levels that have been saved and not restored yet
    pub fn depth(&self) -> usize {
        self.levels.len()
    }
}

impl<T> SaveAndRestore for ReversibleStore<T>
where
    T: Eq + Copy,
{
    fn save_state(&mut self) {
        self.clock += 1;
        self.levels.push(Level {
            trail_size: self.trail.len(),
            accessible: self.current.len(),
        })
    }

    fn restore_state(&mut self) {
        let level = self
            .levels
            .pop()
            .expect("cannot pop above the root level of the reversible store");

        for e in self.trail.iter().skip(level.trail_size).rev().copied() {
            self.current[e.id.0] = e;
        }
        self.trail.truncate(level.trail_size);
        self.current.truncate(level.accessible);
    }
}

// #############################################################################
// ### UNIT TESTS ##############################################################
// #############################################################################
