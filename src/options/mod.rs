//! Algorithm identifiers and per-algorithm options.
//!
//! `AlgorithmOptions` is a flat record: every algorithm reads only the fields
//! it cares about and ignores the rest. Options live for the whole session and
//! are edited by the host between runs.

mod validation;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::hooks::Phase;

pub use validation::{
    check_column_count, check_options, check_preconditions, check_radix_base, MAX_COLUMNS, MAX_RADIX_BASE, MIN_COLUMNS,
};

/// Identifier of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Swaps each element backwards until it is in place.
    InsertionSort,
    /// Picks the minimum of the unsorted suffix on every pass.
    SelectionSort,
    /// Bubble sort alternating direction each pass.
    CocktailShakerSort,
    /// Adjacent exchanges until a pass makes no swap.
    BubbleSort,
    /// Alternating odd and even adjacent-pair phases.
    OddEvenSort,
    /// Batcher's odd-even merge network.
    OddEvenMergesort,
    /// Radix sort from the least significant digit.
    RadixSortLsd,
    /// Radix sort from the most significant digit.
    RadixSortMsd,
    /// Median-of-three quicksort.
    QuickSort,
    /// Bubble sort over a shrinking gap.
    CombSort,
    /// Insertion sort over a shrinking gap sequence.
    ShellSort,
    /// Bitonic merge network.
    BitonicSort,
    /// Swaps bullied slots with the first slot not smaller than their bully.
    BullySort,
    /// Partitions around the mean of each range.
    AverageSort,
    /// D-ary heapsort, max- or min-oriented.
    Heapsort,
    /// Bubble sort that also pushes each inversion's smaller element back.
    PushSort,
}

impl Algorithm {
    /// Every catalog entry, in menu order.
    pub const ALL: [Self; 16] = [
        Self::InsertionSort,
        Self::SelectionSort,
        Self::CocktailShakerSort,
        Self::BubbleSort,
        Self::OddEvenSort,
        Self::OddEvenMergesort,
        Self::RadixSortLsd,
        Self::RadixSortMsd,
        Self::QuickSort,
        Self::CombSort,
        Self::ShellSort,
        Self::BitonicSort,
        Self::BullySort,
        Self::AverageSort,
        Self::Heapsort,
        Self::PushSort,
    ];

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::InsertionSort => "Insertion Sort",
            Self::SelectionSort => "Selection Sort",
            Self::CocktailShakerSort => "Cocktail Shaker Sort",
            Self::BubbleSort => "Bubble Sort",
            Self::OddEvenSort => "Odd-Even Sort",
            Self::OddEvenMergesort => "Odd-Even Mergesort",
            Self::RadixSortLsd => "Radix Sort (LSD)",
            Self::RadixSortMsd => "Radix Sort (MSD)",
            Self::QuickSort => "Quick Sort",
            Self::CombSort => "Comb Sort",
            Self::ShellSort => "Shell Sort",
            Self::BitonicSort => "Bitonic Sort",
            Self::BullySort => "Bully Sort",
            Self::AverageSort => "Average Sort",
            Self::Heapsort => "Heapsort",
            Self::PushSort => "Push Sort",
        }
    }

    /// Option fields the algorithm reads, in display order.
    #[must_use]
    pub const fn option_fields(self) -> &'static [OptionField] {
        match self {
            Self::BitonicSort | Self::OddEvenMergesort => &[OptionField::Type, OptionField::Parallel],
            Self::OddEvenSort => &[OptionField::Parallel],
            Self::RadixSortLsd | Self::RadixSortMsd => &[OptionField::Base],
            Self::CombSort => &[OptionField::ShrinkFactor],
            Self::Heapsort => &[OptionField::HeapType, OptionField::ChildCount],
            _ => &[],
        }
    }

    /// Returns true for sorting networks, whose stages go through the phase
    /// scheduler.
    #[must_use]
    pub const fn is_network(self) -> bool {
        matches!(self, Self::OddEvenSort | Self::OddEvenMergesort | Self::BitonicSort)
    }

    /// Returns true if the algorithm only sorts power-of-two lengths with the
    /// given options.
    #[must_use]
    pub fn requires_power_of_two(self, options: &AlgorithmOptions) -> bool {
        match self {
            Self::BitonicSort => true,
            Self::OddEvenMergesort => options.network == NetworkForm::Recursive,
            _ => false,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl FromStr for Algorithm {
    type Err = ValidationError;

    /// Accepts the display name (`"Radix Sort (LSD)"`) or the snake-case id
    /// (`"radix_sort_lsd"`), ignoring case and punctuation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|a| normalize(a.name()) == wanted)
            .ok_or_else(|| ValidationError::UnknownAlgorithm { name: s.to_string() })
    }
}

/// A user-editable field of [`AlgorithmOptions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionField {
    /// [`AlgorithmOptions::network`].
    Type,
    /// [`AlgorithmOptions::base`].
    Base,
    /// [`AlgorithmOptions::shrink_factor`].
    ShrinkFactor,
    /// [`AlgorithmOptions::heap_type`].
    HeapType,
    /// [`AlgorithmOptions::child_count`].
    ChildCount,
    /// [`AlgorithmOptions::parallel`].
    Parallel,
}

/// Iterative or recursive form of a network sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkForm {
    /// Stage/substage loops driven by bit manipulation.
    #[default]
    Iterative,
    /// Divide into halves, sort, then merge.
    Recursive,
}

/// Heap orientation for heapsort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeapType {
    /// Max-heap rooted at index 0, extracting to the back.
    #[default]
    Max,
    /// Min-heap stored reversed, rooted at the last index, extracting to the front.
    Min,
}

/// Per-algorithm options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlgorithmOptions {
    /// Iterative or recursive network form.
    #[serde(rename = "type")]
    pub network: NetworkForm,

    /// Numeric base for radix sorts.
    pub base: u32,

    /// Gap shrink factor for comb sort.
    pub shrink_factor: f64,

    /// Heap orientation for heapsort.
    pub heap_type: HeapType,

    /// Children per heap node.
    pub child_count: usize,

    /// Run independent phase continuations concurrently.
    pub parallel: bool,
}

impl Default for AlgorithmOptions {
    fn default() -> Self {
        Self {
            network: NetworkForm::Iterative,
            base: 4,
            shrink_factor: 1.3,
            heap_type: HeapType::Max,
            child_count: 2,
            parallel: false,
        }
    }
}

impl AlgorithmOptions {
    /// Sets the network form.
    #[must_use]
    pub fn with_network(mut self, network: NetworkForm) -> Self {
        self.network = network;
        self
    }

    /// Sets the radix base.
    #[must_use]
    pub fn with_base(mut self, base: u32) -> Self {
        self.base = base;
        self
    }

    /// Sets the comb sort shrink factor.
    #[must_use]
    pub fn with_shrink_factor(mut self, shrink_factor: f64) -> Self {
        self.shrink_factor = shrink_factor;
        self
    }

    /// Sets heap orientation and arity.
    #[must_use]
    pub fn with_heap(mut self, heap_type: HeapType, child_count: usize) -> Self {
        self.heap_type = heap_type;
        self.child_count = child_count;
        self
    }

    /// Enables or disables concurrent phases.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Phase tag to thread through a hook call: only concurrent runs tag
    /// their operations, sequential runs clear highlights after every call.
    #[must_use]
    pub fn phase_tag(&self, phase: Phase) -> Option<Phase> {
        self.parallel.then_some(phase)
    }
}
