//! The 37 parallel lanes of a transition table.
//!
//! Every lane always has the same length. Growth first reserves room on
//! every lane and only then extends them, so a failed allocation leaves all
//! lanes at their previous length.

use std::mem;

use crate::alphabet::LANE_COUNT;
use crate::error::{Result, TableError};

pub(crate) struct Lanes {
    lanes: [Vec<u32>; LANE_COUNT],
    capacity: usize,
}

impl Lanes {
    /// Allocate every lane zero-filled to `capacity` states.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut lanes = Self::empty();
        lanes.grow_to(capacity)?;
        Ok(lanes)
    }

    pub fn empty() -> Self {
        Self {
            lanes: std::array::from_fn(|_| Vec::new()),
            capacity: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Value at `lane[state]`; slots past the capacity read as zero.
    #[inline]
    pub fn get(&self, lane: usize, state: u32) -> u32 {
        self.lanes[lane].get(state as usize).copied().unwrap_or(0)
    }

    /// Store `value` at `lane[state]`. The caller has already grown the lanes
    /// to cover `state`.
    #[inline]
    pub fn set(&mut self, lane: usize, state: u32, value: u32) {
        debug_assert!((state as usize) < self.capacity);
        self.lanes[lane][state as usize] = value;
    }

    /// Grow every lane to `new_capacity`, zero-filling the new slots.
    ///
    /// Shrinking is never performed; a smaller target is a no-op.
    pub fn grow_to(&mut self, new_capacity: usize) -> Result<()> {
        if new_capacity <= self.capacity {
            return Ok(());
        }
        let additional = new_capacity - self.capacity;

        for lane in self.lanes.iter_mut() {
            lane.try_reserve_exact(additional)
                .map_err(|_| TableError::AllocationFailure {
                    requested: new_capacity,
                })?;
        }
        // Capacity is reserved on every lane, so none of these reallocate.
        for lane in self.lanes.iter_mut() {
            lane.resize(new_capacity, 0);
        }
        self.capacity = new_capacity;
        Ok(())
    }

    /// Free every lane.
    pub fn release(&mut self) {
        for lane in self.lanes.iter_mut() {
            *lane = Vec::new();
        }
        self.capacity = 0;
    }

    /// Heap bytes held by the lanes, including reserved but unused room.
    pub fn reserved_bytes(&self) -> usize {
        self.lanes
            .iter()
            .map(|l| l.capacity() * mem::size_of::<u32>())
            .sum()
    }

    #[cfg(test)]
    pub fn lengths(&self) -> Vec<usize> {
        self.lanes.iter().map(Vec::len).collect()
    }
}
