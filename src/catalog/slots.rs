//! Identity-to-slot tracking for distribution sorts.
//!
//! A distribution pass first assigns elements to buckets by id, then realizes
//! the bucket order in place with swaps. Each swap moves a not-yet-placed
//! element to a new slot, so the index must follow it.

use std::collections::HashMap;

use crate::element::SortArray;
use crate::error::{SortError, SortResult};

/// Maps element ids to their current physical slot.
#[derive(Debug, Default)]
pub(crate) struct SlotIndex {
    slots: HashMap<u32, usize>,
}

impl SlotIndex {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: HashMap::with_capacity(capacity),
        }
    }

    /// Records that element `id` currently sits at `slot`.
    pub(crate) fn record(&mut self, id: u32, slot: usize) {
        self.slots.insert(id, slot);
    }

    /// Current slot of element `id`.
    pub(crate) fn slot_of(&self, id: u32) -> SortResult<usize> {
        self.slots
            .get(&id)
            .copied()
            .ok_or_else(|| SortError::internal(format!("Element id {id} was never assigned a slot")))
    }

    /// Updates the index after `placed` and `displaced` exchanged elements.
    ///
    /// `placed` now holds its final element, whose entry is no longer read.
    /// The element that used to sit there moved to `displaced`.
    pub(crate) fn follow_swap(&mut self, arr: &SortArray, placed: usize, displaced: usize) {
        self.record(arr.get(placed).id, placed);
        self.record(arr.get(displaced).id, displaced);
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }
}
