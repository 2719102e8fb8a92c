//! Operation hooks.
//!
//! Every algorithm observes and mutates the array-under-sort exclusively
//! through the four [`SortHooks`] operations. The host supplies the hook
//! implementation and with it counting, pacing, highlighting and the run flag.
//! A hook returns [`SortError::NotRunning`](crate::SortError::NotRunning) once
//! the run flag is cleared, and algorithms propagate it with `?`.

#![allow(async_fn_in_trait)]

use std::fmt;

use crate::element::SortArray;
use crate::error::SortResult;
use crate::operator::Operator;

/// Draw-iteration tag marking hook calls as logically simultaneous.
///
/// A phase is a monotonically increasing iteration number. The compare
/// sub-step of an iteration sorts half a step above its swap sub-step, so a
/// renderer keeps a stage's highlights on screen until the tag advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Phase {
    iteration: u32,
    compare_step: bool,
}

impl Phase {
    /// Swap sub-step of `iteration`.
    #[must_use]
    pub const fn new(iteration: u32) -> Self {
        Self {
            iteration,
            compare_step: false,
        }
    }

    /// Compare sub-step of `iteration` (`iteration + 0.5`).
    #[must_use]
    pub const fn compare(iteration: u32) -> Self {
        Self {
            iteration,
            compare_step: true,
        }
    }

    /// The iteration number.
    #[must_use]
    pub const fn iteration(self) -> u32 {
        self.iteration
    }

    /// Returns true for a compare sub-step.
    #[must_use]
    pub const fn is_compare_step(self) -> bool {
        self.compare_step
    }

    /// Numeric form: `iteration` or `iteration + 0.5`.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.iteration) + if self.compare_step { 0.5 } else { 0.0 }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.compare_step {
            write!(f, "{}.5", self.iteration)
        } else {
            write!(f, "{}", self.iteration)
        }
    }
}

/// The instrumentation primitives every algorithm routes through.
///
/// All four operations may suspend. Implementations must check the run flag
/// on every call and return `NotRunning` when it is cleared.
pub trait SortHooks {
    /// Counts a comparison and evaluates `arr[i].value <op> arr[j].value`.
    async fn compare(
        &self,
        arr: &SortArray,
        i: usize,
        op: Operator,
        j: usize,
        phase: Option<Phase>,
    ) -> SortResult<bool>;

    /// Counts a comparison and evaluates `arr[i].value <op> value`.
    async fn value_compare(
        &self,
        arr: &SortArray,
        i: usize,
        op: Operator,
        value: f64,
        phase: Option<Phase>,
    ) -> SortResult<bool>;

    /// Counts a swap and exchanges `arr[i]` and `arr[j]`.
    async fn swap(&self, arr: &SortArray, i: usize, j: usize, phase: Option<Phase>) -> SortResult<()>;

    /// Counts an auxiliary write touching `arr[i]` without moving data.
    async fn aux_write(&self, arr: &SortArray, i: usize, phase: Option<Phase>) -> SortResult<()>;
}

/// Explicit context threaded through every algorithm.
pub struct SortContext<'a, H> {
    arr: &'a SortArray,
    hooks: &'a H,
    columns: usize,
}

impl<H> Clone for SortContext<'_, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H> Copy for SortContext<'_, H> {}

impl<'a, H: SortHooks> SortContext<'a, H> {
    /// Creates a context over `arr`. `columns` is the logical length the
    /// recursive and gap-based algorithms start from.
    #[must_use]
    pub fn new(arr: &'a SortArray, hooks: &'a H, columns: usize) -> Self {
        Self { arr, hooks, columns }
    }

    /// The array-under-sort.
    #[must_use]
    pub fn array(&self) -> &'a SortArray {
        self.arr
    }

    /// The hook implementation.
    #[must_use]
    pub fn hooks(&self) -> &'a H {
        self.hooks
    }

    /// Physical length of the array.
    #[must_use]
    pub fn len(&self) -> usize {
        self.arr.len()
    }

    /// Returns true if the array is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arr.is_empty()
    }

    /// Logical column count.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Key of `arr[i]`, read without a hook call. Distribution sorts use it
    /// to size their digits and to bucket a slot they just recorded.
    #[must_use]
    pub fn key(&self, i: usize) -> u32 {
        self.arr.value(i)
    }

    /// Untagged comparison of two slots.
    pub async fn compare(&self, i: usize, op: Operator, j: usize) -> SortResult<bool> {
        self.hooks.compare(self.arr, i, op, j, None).await
    }

    /// Comparison of two slots carrying a phase tag.
    pub async fn compare_in(&self, i: usize, op: Operator, j: usize, phase: Option<Phase>) -> SortResult<bool> {
        self.hooks.compare(self.arr, i, op, j, phase).await
    }

    /// Comparison of a slot against a scalar.
    pub async fn value_compare(&self, i: usize, op: Operator, value: f64) -> SortResult<bool> {
        self.hooks.value_compare(self.arr, i, op, value, None).await
    }

    /// Untagged swap.
    pub async fn swap(&self, i: usize, j: usize) -> SortResult<()> {
        self.hooks.swap(self.arr, i, j, None).await
    }

    /// Swap carrying a phase tag.
    pub async fn swap_in(&self, i: usize, j: usize, phase: Option<Phase>) -> SortResult<()> {
        self.hooks.swap(self.arr, i, j, phase).await
    }

    /// Untagged auxiliary write.
    pub async fn aux_write(&self, i: usize) -> SortResult<()> {
        self.hooks.aux_write(self.arr, i, None).await
    }

    /// Compare-exchange: swaps `i` and `j` when `arr[i] <op> arr[j]` holds.
    /// The comparison carries `compare_phase`, the swap `swap_phase`.
    pub async fn exchange_if(
        &self,
        i: usize,
        op: Operator,
        j: usize,
        compare_phase: Option<Phase>,
        swap_phase: Option<Phase>,
    ) -> SortResult<bool> {
        if self.compare_in(i, op, j, compare_phase).await? {
            self.swap_in(i, j, swap_phase).await?;
            return Ok(true);
        }
        Ok(false)
    }
}
