//! d-ary heapsort in two orientations.
//!
//! The max-heap is rooted at slot 0 and extracts its root to the back. The
//! min-heap is stored reversed: rooted at the last slot, with node `r`
//! (counted from the back) at slot `n - 1 - r`, and extracts its root to the
//! front while the heap shrinks from the left.

use crate::error::{SortResult, ValidationError};
use crate::hooks::{SortContext, SortHooks};
use crate::operator::Operator;
use crate::options::{AlgorithmOptions, HeapType};

use super::SortFuture;

pub(crate) async fn heapsort<H: SortHooks>(ctx: SortContext<'_, H>, options: &AlgorithmOptions) -> SortResult<()> {
    let arity = options.child_count;
    if arity < 2 {
        return Err(ValidationError::InvalidChildCount { count: arity }.into());
    }
    match options.heap_type {
        HeapType::Max => max_heapsort(ctx, arity).await,
        HeapType::Min => min_heapsort(ctx, arity).await,
    }
}

async fn max_heapsort<H: SortHooks>(ctx: SortContext<'_, H>, arity: usize) -> SortResult<()> {
    let n = ctx.len();
    if n < 2 {
        return Ok(());
    }
    for node in (0..=(n - 2) / arity).rev() {
        sift_down_max(ctx, arity, n, node).await?;
    }
    for last in (1..n).rev() {
        ctx.swap(0, last).await?;
        sift_down_max(ctx, arity, last, 0).await?;
    }
    Ok(())
}

/// Restores the max-heap property below `node` within `0..size`.
fn sift_down_max<'a, H: SortHooks + 'a>(ctx: SortContext<'a, H>, arity: usize, size: usize, node: usize) -> SortFuture<'a> {
    Box::pin(async move {
        let mut largest = node;
        let first_child = arity * node + 1;
        for child in first_child..(first_child + arity).min(size) {
            if ctx.compare(child, Operator::Gt, largest).await? {
                largest = child;
            }
        }
        if largest != node {
            ctx.swap(node, largest).await?;
            sift_down_max(ctx, arity, size, largest).await?;
        }
        Ok(())
    })
}

async fn min_heapsort<H: SortHooks>(ctx: SortContext<'_, H>, arity: usize) -> SortResult<()> {
    let n = ctx.len();
    if n < 2 {
        return Ok(());
    }
    for node in (0..=(n - 2) / arity).rev() {
        sift_down_min(ctx, arity, 0, node).await?;
    }
    for front in 0..n - 1 {
        ctx.swap(n - 1, front).await?;
        sift_down_min(ctx, arity, front + 1, 0).await?;
    }
    Ok(())
}

/// Restores the reversed min-heap property below reversed node `node`. The
/// heap occupies `start..n`.
fn sift_down_min<'a, H: SortHooks + 'a>(ctx: SortContext<'a, H>, arity: usize, start: usize, node: usize) -> SortFuture<'a> {
    Box::pin(async move {
        let last = ctx.len() - 1;
        let size = ctx.len() - start;
        let mut smallest = node;
        let first_child = arity * node + 1;
        for child in first_child..(first_child + arity).min(size) {
            if ctx.compare(last - child, Operator::Lt, last - smallest).await? {
                smallest = child;
            }
        }
        if smallest != node {
            ctx.swap(last - node, last - smallest).await?;
            sift_down_min(ctx, arity, start, smallest).await?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testing::{scrambled, sort_values, sorted_copy, CountingHooks};
    use crate::catalog::SortEngine;
    use crate::element::{elements_from_values, SortArray};
    use crate::options::Algorithm;

    #[tokio::test]
    async fn test_all_orientations_and_arities() {
        let values = scrambled(45, 30);
        for heap_type in [HeapType::Max, HeapType::Min] {
            for arity in [2, 3, 5, 8] {
                let options = AlgorithmOptions::default().with_heap(heap_type, arity);
                let (sorted, _) = sort_values(Algorithm::Heapsort, &options, &values).await;
                assert_eq!(sorted, sorted_copy(&values), "{heap_type:?} with {arity} children");
            }
        }
    }

    #[tokio::test]
    async fn test_min_heap_rebuilds_sorted_input() {
        let options = AlgorithmOptions::default().with_heap(HeapType::Min, 2);
        let (sorted, hooks) = sort_values(Algorithm::Heapsort, &options, &[0, 1, 2]).await;
        assert_eq!(sorted, vec![0, 1, 2]);
        assert!(hooks.swaps.get() > 0);
    }

    #[tokio::test]
    async fn test_rejects_unary_heap() {
        let engine = SortEngine::new(3, CountingHooks::default());
        let arr = SortArray::new(elements_from_values(&[2, 1, 0]));
        let options = AlgorithmOptions::default().with_heap(HeapType::Max, 1);
        assert!(engine.run(Algorithm::Heapsort, &arr, &options).await.is_err());
    }
}
