//! The sort catalog.
//!
//! Every entry is a free async function taking a [`SortContext`] and the run's
//! options. Entries observe and move elements only through the context's hook
//! calls and never catch [`SortError::NotRunning`](crate::SortError::NotRunning).
//!
//! Module layout:
//! - `exchange`: insertion, selection, bubble, cocktail shaker
//! - `network`: odd-even transposition, odd-even mergesort, bitonic
//! - `distribution`: LSD and MSD radix
//! - `partition`: quick sort and average sort
//! - `gap`: comb and shell sort
//! - `heap`: d-ary heapsort, max and reversed-min
//! - `bespoke`: bully sort and push sort

mod bespoke;
mod distribution;
mod exchange;
mod gap;
mod heap;
mod network;
mod partition;
mod slots;

use std::future::Future;
use std::pin::Pin;

use log::{debug, warn};

use crate::element::SortArray;
use crate::error::SortResult;
use crate::hooks::{SortContext, SortHooks};
use crate::options::{Algorithm, AlgorithmOptions};

/// Boxed future returned by recursive catalog entries.
pub(crate) type SortFuture<'a> = Pin<Box<dyn Future<Output = SortResult<()>> + 'a>>;

/// The instrumented sorting engine.
///
/// Holds the hook implementation and the column count. The engine keeps no
/// state between runs; only one run may be active at a time, which the host
/// enforces.
#[derive(Debug)]
pub struct SortEngine<H> {
    columns: usize,
    hooks: H,
}

impl<H: SortHooks> SortEngine<H> {
    /// Creates an engine for arrays of `columns` elements.
    #[must_use]
    pub fn new(columns: usize, hooks: H) -> Self {
        Self { columns, hooks }
    }

    /// Updates the column count after the host resized the working set.
    pub fn set_column_count(&mut self, columns: usize) {
        self.columns = columns;
    }

    /// Current column count.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// The hook implementation.
    #[must_use]
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Mutable access to the hook implementation, between runs.
    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    /// Looks up a catalog entry.
    #[must_use]
    pub fn get_algorithm(&self, algorithm: Algorithm) -> SortRoutine<'_, H> {
        SortRoutine { engine: self, algorithm }
    }

    /// Sorts `arr` with `algorithm`.
    ///
    /// # Errors
    ///
    /// Returns [`SortError::NotRunning`](crate::SortError::NotRunning) when the
    /// run was cancelled, or whatever other error a hook produced.
    pub async fn run(&self, algorithm: Algorithm, arr: &SortArray, options: &AlgorithmOptions) -> SortResult<()> {
        let len = arr.len();
        let columns = if self.columns == len {
            len
        } else {
            warn!(
                "Column count {} does not match array length {len}; using {}",
                self.columns,
                self.columns.min(len)
            );
            self.columns.min(len)
        };
        debug!("Dispatching {algorithm} over {len} elements with {options:?}");

        let ctx = SortContext::new(arr, &self.hooks, columns);
        dispatch(algorithm, ctx, options).await
    }
}

/// A catalog entry bound to an engine.
pub struct SortRoutine<'e, H> {
    engine: &'e SortEngine<H>,
    algorithm: Algorithm,
}

impl<H: SortHooks> SortRoutine<'_, H> {
    /// The algorithm this routine runs.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Sorts `arr`.
    ///
    /// # Errors
    ///
    /// See [`SortEngine::run`].
    pub async fn run(&self, arr: &SortArray, options: &AlgorithmOptions) -> SortResult<()> {
        self.engine.run(self.algorithm, arr, options).await
    }
}

async fn dispatch<H: SortHooks>(
    algorithm: Algorithm,
    ctx: SortContext<'_, H>,
    options: &AlgorithmOptions,
) -> SortResult<()> {
    match algorithm {
        Algorithm::InsertionSort => exchange::insertion_sort(ctx).await,
        Algorithm::SelectionSort => exchange::selection_sort(ctx).await,
        Algorithm::CocktailShakerSort => exchange::cocktail_shaker_sort(ctx).await,
        Algorithm::BubbleSort => exchange::bubble_sort(ctx).await,
        Algorithm::OddEvenSort => network::odd_even_sort(ctx, options).await,
        Algorithm::OddEvenMergesort => network::odd_even_mergesort(ctx, options).await,
        Algorithm::BitonicSort => network::bitonic_sort(ctx, options).await,
        Algorithm::RadixSortLsd => distribution::lsd_radix_sort(ctx, options).await,
        Algorithm::RadixSortMsd => distribution::msd_radix_sort(ctx, options).await,
        Algorithm::QuickSort => partition::quick_sort(ctx).await,
        Algorithm::AverageSort => partition::average_sort(ctx).await,
        Algorithm::CombSort => gap::comb_sort(ctx, options).await,
        Algorithm::ShellSort => gap::shell_sort(ctx).await,
        Algorithm::Heapsort => heap::heapsort(ctx, options).await,
        Algorithm::BullySort => bespoke::bully_sort(ctx).await,
        Algorithm::PushSort => bespoke::push_sort(ctx).await,
    }
}
