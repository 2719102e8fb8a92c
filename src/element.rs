//! Elements and the array-under-sort.
//!
//! An [`Element`] carries the sortable `value` and a stable `id`. The `id`
//! never changes while an element moves around, which lets distribution sorts
//! find where an element physically ended up after it was logically assigned
//! to a bucket.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// One column of the visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Element {
    /// Sortable magnitude; also drives column height and color.
    pub value: u32,
    /// Stable identity, unique within one array.
    pub id: u32,
}

impl Element {
    /// Creates a new element.
    #[must_use]
    pub const fn new(value: u32, id: u32) -> Self {
        Self { value, id }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.value, self.id)
    }
}

/// Creates `count` elements with values `0..count` and matching ids.
#[must_use]
pub fn create_elements(count: usize) -> Vec<Element> {
    (0..count)
        .map(|i| {
            let n = u32::try_from(i).unwrap_or(u32::MAX);
            Element::new(n, n)
        })
        .collect()
}

/// Creates elements from raw values, assigning ids by position.
#[must_use]
pub fn elements_from_values(values: &[u32]) -> Vec<Element> {
    values
        .iter()
        .zip(0u32..)
        .map(|(&value, id)| Element::new(value, id))
        .collect()
}

/// Initial arrangement applied when the host resets the array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetPreset {
    /// Uniformly random permutation.
    #[default]
    Shuffle,
    /// Ascending by value.
    Sorted,
    /// Descending by value.
    ReverseSorted,
}

impl ResetPreset {
    /// Rearranges `elements` according to this preset.
    pub fn apply(self, elements: &mut [Element]) {
        match self {
            Self::Shuffle => elements.shuffle(&mut rand::thread_rng()),
            Self::Sorted => elements.sort_by_key(|e| e.value),
            Self::ReverseSorted => elements.sort_by(|a, b| b.value.cmp(&a.value)),
        }
    }
}

impl fmt::Display for ResetPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shuffle => write!(f, "Shuffle"),
            Self::Sorted => write!(f, "Sorted"),
            Self::ReverseSorted => write!(f, "Reverse Sorted"),
        }
    }
}

/// The array-under-sort.
///
/// Phase continuations that run concurrently all hold `&SortArray`, so the
/// cells live behind a `RefCell`. Every borrow is released before the caller
/// can reach a suspension point, which keeps the single-threaded interleaving
/// sound.
#[derive(Debug, Default)]
pub struct SortArray {
    cells: RefCell<Vec<Element>>,
}

impl SortArray {
    /// Wraps `elements` for a run.
    #[must_use]
    pub fn new(elements: Vec<Element>) -> Self {
        Self {
            cells: RefCell::new(elements),
        }
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.borrow().len()
    }

    /// Returns true when the array holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.borrow().is_empty()
    }

    /// Element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> Element {
        self.cells.borrow()[index]
    }

    /// Value at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[must_use]
    pub fn value(&self, index: usize) -> u32 {
        self.cells.borrow()[index].value
    }

    /// Physically exchanges two elements.
    ///
    /// Only hook implementations call this; algorithms go through
    /// [`crate::SortHooks::swap`] so every move is counted.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn exchange(&self, i: usize, j: usize) {
        self.cells.borrow_mut().swap(i, j);
    }

    /// Runs `f` with a read-only view of the cells.
    pub fn with_cells<R>(&self, f: impl FnOnce(&[Element]) -> R) -> R {
        f(&self.cells.borrow())
    }

    /// Copies the current arrangement.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Element> {
        self.cells.borrow().clone()
    }

    /// Current values in order.
    #[must_use]
    pub fn values(&self) -> Vec<u32> {
        self.cells.borrow().iter().map(|e| e.value).collect()
    }

    /// Returns the elements, ending the run's ownership.
    #[must_use]
    pub fn into_inner(self) -> Vec<Element> {
        self.cells.into_inner()
    }
}

impl From<Vec<Element>> for SortArray {
    fn from(elements: Vec<Element>) -> Self {
        Self::new(elements)
    }
}

/// Returns true if `elements` is non-decreasing by value.
#[must_use]
pub fn is_sorted(elements: &[Element]) -> bool {
    elements.windows(2).all(|w| w[0].value <= w[1].value)
}

/// Returns true if `candidate` holds exactly the same `(id, value)` pairs as
/// `original`, in any order.
#[must_use]
pub fn is_permutation_of(candidate: &[Element], original: &[Element]) -> bool {
    if candidate.len() != original.len() {
        return false;
    }
    let mut expected: HashMap<u32, u32> = original.iter().map(|e| (e.id, e.value)).collect();
    for e in candidate {
        match expected.remove(&e.id) {
            Some(value) if value == e.value => {}
            _ => return false,
        }
    }
    expected.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_elements() {
        let elements = create_elements(4);
        assert_eq!(elements.len(), 4);
        assert!(elements.iter().all(|e| e.value == e.id));
        assert!(is_sorted(&elements));
    }

    #[test]
    fn test_reset_presets() {
        let mut elements = create_elements(32);
        ResetPreset::ReverseSorted.apply(&mut elements);
        assert_eq!(elements[0].value, 31);
        assert_eq!(elements[31].value, 0);

        ResetPreset::Shuffle.apply(&mut elements);
        assert!(is_permutation_of(&elements, &create_elements(32)));

        ResetPreset::Sorted.apply(&mut elements);
        assert_eq!(elements, create_elements(32));
    }

    #[test]
    fn test_exchange_keeps_ids_attached() {
        let arr = SortArray::new(elements_from_values(&[7, 3]));
        arr.exchange(0, 1);
        assert_eq!(arr.get(0), Element::new(3, 1));
        assert_eq!(arr.get(1), Element::new(7, 0));
        assert_eq!(arr.values(), vec![3, 7]);
    }

    #[test]
    fn test_is_permutation_of_rejects_duplicates() {
        let original = elements_from_values(&[1, 2, 3]);
        let mut duplicated = original.clone();
        duplicated[2] = duplicated[0];
        assert!(!is_permutation_of(&duplicated, &original));

        let mut reordered = original.clone();
        reordered.reverse();
        assert!(is_permutation_of(&reordered, &original));
    }

    #[test]
    fn test_is_permutation_of_rejects_changed_value() {
        let original = elements_from_values(&[1, 2, 3]);
        let mut changed = original.clone();
        changed[1].value = 9;
        assert!(!is_permutation_of(&changed, &original));
    }
}
