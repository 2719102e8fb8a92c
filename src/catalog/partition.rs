//! Partitioning sorts: quick sort and average sort.

use crate::error::SortResult;
use crate::hooks::{SortContext, SortHooks};
use crate::operator::Operator;

use super::SortFuture;

pub(crate) async fn quick_sort<H: SortHooks>(ctx: SortContext<'_, H>) -> SortResult<()> {
    quick_range(ctx, 0, ctx.columns()).await
}

/// Sorts `lo..hi`. The pivot is the median of the first, middle and last slot,
/// moved to the last slot, followed by a Lomuto partition.
///
/// Only the smaller side recurses; the larger side is taken by the loop, so
/// nesting stays logarithmic even when every key is equal.
fn quick_range<'a, H: SortHooks + 'a>(ctx: SortContext<'a, H>, lo: usize, hi: usize) -> SortFuture<'a> {
    Box::pin(async move {
        let (mut lo, mut hi) = (lo, hi);
        while hi > lo + 1 {
            let end = hi - 1;
            let mid = lo + (end - lo) / 2;

            if ctx.compare(mid, Operator::Lt, lo).await? {
                ctx.swap(lo, mid).await?;
            }
            if ctx.compare(end, Operator::Lt, lo).await? {
                ctx.swap(lo, end).await?;
            }
            if ctx.compare(mid, Operator::Lt, end).await? {
                ctx.swap(mid, end).await?;
            }

            let mut i = lo;
            for j in lo..end {
                if ctx.compare(j, Operator::Lt, end).await? {
                    if i != j {
                        ctx.swap(i, j).await?;
                    }
                    i += 1;
                }
            }
            // Slot `i` already holds a pivot-equal value when it is not greater.
            if i != end && ctx.compare(end, Operator::Lt, i).await? {
                ctx.swap(i, end).await?;
            }

            if i - lo < hi - (i + 1) {
                quick_range(ctx, lo, i).await?;
                lo = i + 1;
            } else {
                quick_range(ctx, i + 1, hi).await?;
                hi = i;
            }
        }
        Ok(())
    })
}

pub(crate) async fn average_sort<H: SortHooks>(ctx: SortContext<'_, H>) -> SortResult<()> {
    average_range(ctx, 0, ctx.columns()).await
}

/// Splits `start..end` around the mean of its values: everything below the
/// mean moves in front of everything at or above it. The smaller side
/// recurses and the larger one is handled by the loop.
fn average_range<'a, H: SortHooks + 'a>(ctx: SortContext<'a, H>, start: usize, end: usize) -> SortFuture<'a> {
    Box::pin(async move {
        let (mut start, mut end) = (start, end);
        while end - start > 1 {
            let mut uniform = true;
            for i in start..end {
                if ctx.compare(start, Operator::Ne, i).await? {
                    uniform = false;
                    break;
                }
            }
            if uniform {
                return Ok(());
            }

            let mut sum: u64 = 0;
            for i in start..end {
                ctx.aux_write(i).await?;
                sum += u64::from(ctx.key(i));
            }
            #[allow(clippy::cast_precision_loss)]
            let mean = sum as f64 / (end - start) as f64;

            // Slots below `mid` end up holding the values below the mean.
            let mut mid = start;
            for i in start..end {
                if ctx.value_compare(i, Operator::Lt, mean).await? {
                    mid += 1;
                }
            }

            let mut j = start;
            for i in mid..end {
                if ctx.value_compare(i, Operator::Lt, mean).await? {
                    while ctx.value_compare(j, Operator::Lt, mean).await? {
                        j += 1;
                    }
                    ctx.swap(i, j).await?;
                    j += 1;
                }
            }

            if mid - start < end - mid {
                average_range(ctx, start, mid).await?;
                start = mid;
            } else {
                average_range(ctx, mid, end).await?;
                end = mid;
            }
        }
        Ok(())
    })
}
