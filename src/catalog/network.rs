//! Sorting networks.
//!
//! Every compare-exchange of a stage becomes its own [`PhaseTask`], and the
//! stage runs through [`run_phase`]. When `parallel` is set, comparisons are
//! tagged with the stage's compare sub-step and swaps with its swap sub-step.
//!
//! Recursive forms derive the tag from recursion depth. With a non-zero swap
//! delay, sibling branches running concurrently can drift apart and reach the
//! same depth at different times, so highlights may flicker. The final
//! arrangement is unaffected.

use std::cell::Cell;

use crate::error::SortResult;
use crate::hooks::{Phase, SortContext, SortHooks};
use crate::operator::Operator;
use crate::options::{AlgorithmOptions, NetworkForm};
use crate::scheduler::{run_phase, PhaseTask};

use super::SortFuture;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    /// Operator under which a pair `(low, high)` is out of order.
    const fn inversion(self) -> Operator {
        match self {
            Self::Ascending => Operator::Gt,
            Self::Descending => Operator::Lt,
        }
    }
}

/// Compare-exchange task for slots `i < j`.
fn exchange_task<'a, H: SortHooks + 'a>(
    ctx: SortContext<'a, H>,
    i: usize,
    j: usize,
    op: Operator,
    options: &AlgorithmOptions,
    iteration: u32,
) -> PhaseTask<'a> {
    let compare_tag = options.phase_tag(Phase::compare(iteration));
    let swap_tag = options.phase_tag(Phase::new(iteration));
    Box::pin(async move {
        ctx.exchange_if(i, op, j, compare_tag, swap_tag).await?;
        Ok(())
    })
}

fn transposition_pass<'a, H: SortHooks + 'a>(
    ctx: SortContext<'a, H>,
    sorted: &'a Cell<bool>,
    first: usize,
    compare_tag: Option<Phase>,
    swap_tag: Option<Phase>,
) -> PhaseTask<'a> {
    Box::pin(async move {
        for i in (first..ctx.len()).step_by(2) {
            if ctx.exchange_if(i - 1, Operator::Gt, i, compare_tag, swap_tag).await? {
                sorted.set(false);
            }
        }
        Ok(())
    })
}

/// Odd-even transposition sort: each pass runs the pairs starting at odd
/// and at even indices as two phase continuations.
pub(crate) async fn odd_even_sort<H: SortHooks>(ctx: SortContext<'_, H>, options: &AlgorithmOptions) -> SortResult<()> {
    let sorted = Cell::new(false);
    let mut iteration = 0;
    while !sorted.get() {
        sorted.set(true);
        let compare_tag = options.phase_tag(Phase::compare(iteration));
        let swap_tag = options.phase_tag(Phase::new(iteration));
        let passes = vec![
            transposition_pass(ctx, &sorted, 1, compare_tag, swap_tag),
            transposition_pass(ctx, &sorted, 2, compare_tag, swap_tag),
        ];
        run_phase(passes, options.parallel).await?;
        iteration += 1;
    }
    Ok(())
}

pub(crate) async fn odd_even_mergesort<H: SortHooks>(
    ctx: SortContext<'_, H>,
    options: &AlgorithmOptions,
) -> SortResult<()> {
    match options.network {
        NetworkForm::Iterative => iterative_odd_even_mergesort(ctx, options).await,
        NetworkForm::Recursive => recursive_odd_even_mergesort(ctx, options, 0, ctx.columns(), 0).await,
    }
}

/// Batcher's odd-even mergesort as stage loops. Works for any length: pairs
/// that would cross a `2p` block boundary are skipped.
async fn iterative_odd_even_mergesort<H: SortHooks>(
    ctx: SortContext<'_, H>,
    options: &AlgorithmOptions,
) -> SortResult<()> {
    let n = ctx.len();
    let mut iteration = 0;
    let mut p = 1;
    while p < n {
        let mut k = p;
        while k > 0 {
            let mut tasks = Vec::new();
            let mut j = k % p;
            while j + k < n {
                for i in 0..k.min(n - j - k) {
                    let low = i + j;
                    let high = low + k;
                    if low / (2 * p) == high / (2 * p) {
                        tasks.push(exchange_task(ctx, low, high, Operator::Gt, options, iteration));
                    }
                }
                j += 2 * k;
            }
            run_phase(tasks, options.parallel).await?;
            iteration += 1;
            k /= 2;
        }
        p *= 2;
    }
    Ok(())
}

fn recursive_odd_even_mergesort<'a, H: SortHooks + 'a>(
    ctx: SortContext<'a, H>,
    options: &'a AlgorithmOptions,
    start: usize,
    end: usize,
    depth: u32,
) -> SortFuture<'a> {
    Box::pin(async move {
        if end - start <= 1 {
            return Ok(());
        }
        let mid = (start + end) / 2;
        let halves: Vec<PhaseTask<'a>> = vec![
            recursive_odd_even_mergesort(ctx, options, start, mid, depth + 1),
            recursive_odd_even_mergesort(ctx, options, mid, end, depth + 1),
        ];
        run_phase(halves, options.parallel).await?;
        odd_even_merge(ctx, options, start, end, 1, depth).await
    })
}

/// Merges the two sorted halves of `start..end`, looking at every `dist`-th slot.
fn odd_even_merge<'a, H: SortHooks + 'a>(
    ctx: SortContext<'a, H>,
    options: &'a AlgorithmOptions,
    start: usize,
    end: usize,
    dist: usize,
    depth: u32,
) -> SortFuture<'a> {
    Box::pin(async move {
        let step = dist * 2;
        if end - start <= step {
            if start + dist < end {
                exchange_task(ctx, start, start + dist, Operator::Gt, options, depth).await?;
            }
            return Ok(());
        }

        let interleaved: Vec<PhaseTask<'a>> = vec![
            odd_even_merge(ctx, options, start, end, step, depth + 1),
            odd_even_merge(ctx, options, start + dist, end, step, depth + 1),
        ];
        run_phase(interleaved, options.parallel).await?;

        let tasks = (start + dist..end.saturating_sub(dist))
            .step_by(step)
            .map(|i| exchange_task(ctx, i, i + dist, Operator::Gt, options, depth))
            .collect();
        run_phase(tasks, options.parallel).await
    })
}

pub(crate) async fn bitonic_sort<H: SortHooks>(ctx: SortContext<'_, H>, options: &AlgorithmOptions) -> SortResult<()> {
    match options.network {
        NetworkForm::Iterative => iterative_bitonic_sort(ctx, options).await,
        NetworkForm::Recursive => {
            recursive_bitonic_sort(ctx, options, 0, ctx.columns(), Direction::Ascending, 0).await
        }
    }
}

/// Bitonic sort as stage loops. Slot `i` pairs with `i + j` unless bit `j`
/// of `i` is set; bit `k` of `i` picks the direction of its block.
async fn iterative_bitonic_sort<H: SortHooks>(ctx: SortContext<'_, H>, options: &AlgorithmOptions) -> SortResult<()> {
    let n = ctx.len();
    let mut iteration = 0;
    let mut k = 2;
    while k <= n {
        let mut j = k / 2;
        while j > 0 {
            let tasks = (0..n - j)
                .filter(|i| i & j == 0)
                .map(|i| {
                    let direction = if i & k == 0 {
                        Direction::Ascending
                    } else {
                        Direction::Descending
                    };
                    exchange_task(ctx, i, i + j, direction.inversion(), options, iteration)
                })
                .collect();
            run_phase(tasks, options.parallel).await?;
            iteration += 1;
            j /= 2;
        }
        k *= 2;
    }
    Ok(())
}

fn recursive_bitonic_sort<'a, H: SortHooks + 'a>(
    ctx: SortContext<'a, H>,
    options: &'a AlgorithmOptions,
    start: usize,
    end: usize,
    direction: Direction,
    depth: u32,
) -> SortFuture<'a> {
    Box::pin(async move {
        if end - start <= 1 {
            return Ok(());
        }
        let mid = (start + end) / 2;
        let halves: Vec<PhaseTask<'a>> = vec![
            recursive_bitonic_sort(ctx, options, start, mid, Direction::Ascending, depth + 1),
            recursive_bitonic_sort(ctx, options, mid, end, Direction::Descending, depth + 1),
        ];
        run_phase(halves, options.parallel).await?;
        bitonic_merge(ctx, options, start, end, direction, depth).await
    })
}

fn bitonic_merge<'a, H: SortHooks + 'a>(
    ctx: SortContext<'a, H>,
    options: &'a AlgorithmOptions,
    start: usize,
    end: usize,
    direction: Direction,
    depth: u32,
) -> SortFuture<'a> {
    Box::pin(async move {
        if end - start <= 1 {
            return Ok(());
        }
        let mid = (start + end) / 2;
        let half = (end - start) / 2;
        let n = ctx.len();
        let tasks = (start..mid)
            .take_while(|i| i + half < n)
            .map(|i| exchange_task(ctx, i, i + half, direction.inversion(), options, depth))
            .collect();
        run_phase(tasks, options.parallel).await?;

        let halves: Vec<PhaseTask<'a>> = vec![
            bitonic_merge(ctx, options, start, mid, direction, depth + 1),
            bitonic_merge(ctx, options, mid, end, direction, depth + 1),
        ];
        run_phase(halves, options.parallel).await
    })
}
