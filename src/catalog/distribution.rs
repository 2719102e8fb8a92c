//! Radix sorts.
//!
//! A pass records every element of the range with an auxiliary write while
//! assigning its id to a bucket, then swaps elements into bucket order.

use std::ops::Range;

use crate::error::SortResult;
use crate::hooks::{SortContext, SortHooks};
use crate::options::{check_radix_base, AlgorithmOptions};

use super::slots::SlotIndex;
use super::SortFuture;

fn radix_base(options: &AlgorithmOptions) -> SortResult<u64> {
    check_radix_base(options.base)?;
    Ok(u64::from(options.base))
}

#[allow(clippy::cast_possible_truncation)]
fn digit(key: u32, divisor: u64, base: u64) -> usize {
    // Always below `base`, which came from a u32.
    ((u64::from(key) / divisor) % base) as usize
}

fn empty_buckets(base: u64) -> Vec<Vec<u32>> {
    (0..base).map(|_| Vec::new()).collect()
}

/// Swaps the elements of `buckets` into consecutive slots from `start`,
/// returning the slot range each bucket ended up in.
async fn place_buckets<H: SortHooks>(
    ctx: SortContext<'_, H>,
    buckets: &[Vec<u32>],
    start: usize,
    slots: &mut SlotIndex,
) -> SortResult<Vec<Range<usize>>> {
    let mut current = start;
    let mut ranges = Vec::with_capacity(buckets.len());
    for bucket in buckets {
        let bucket_start = current;
        for &id in bucket {
            let from = slots.slot_of(id)?;
            if from != current {
                ctx.swap(current, from).await?;
                slots.follow_swap(ctx.array(), current, from);
            }
            current += 1;
        }
        ranges.push(bucket_start..current);
    }
    Ok(ranges)
}

/// Least-significant-digit radix sort. Stable: buckets keep the order in
/// which their elements were found.
pub(crate) async fn lsd_radix_sort<H: SortHooks>(ctx: SortContext<'_, H>, options: &AlgorithmOptions) -> SortResult<()> {
    let base = radix_base(options)?;
    let n = ctx.len();
    let mut slots = SlotIndex::with_capacity(n);
    let mut divisor: u64 = 1;
    loop {
        let mut buckets = empty_buckets(base);
        let mut higher_digits = false;
        slots.clear();
        for i in 0..n {
            ctx.aux_write(i).await?;
            let element = ctx.array().get(i);
            higher_digits |= u64::from(element.value) / divisor >= base;
            buckets[digit(element.value, divisor, base)].push(element.id);
            slots.record(element.id, i);
        }

        // A single full bucket means this digit leaves the order untouched.
        if !buckets.iter().any(|bucket| bucket.len() == n) {
            place_buckets(ctx, &buckets, 0, &mut slots).await?;
        }

        if !higher_digits {
            return Ok(());
        }
        divisor = match divisor.checked_mul(base) {
            Some(next) => next,
            None => return Ok(()),
        };
    }
}

/// Most-significant-digit radix sort, recursing into each bucket on the next
/// lower digit.
pub(crate) async fn msd_radix_sort<H: SortHooks>(ctx: SortContext<'_, H>, options: &AlgorithmOptions) -> SortResult<()> {
    let base = radix_base(options)?;
    let top = ctx.columns();
    let max_key = (0..top).map(|i| ctx.key(i)).max().unwrap_or(0);
    let mut divisor: u64 = 1;
    while u64::from(max_key) / divisor >= base {
        divisor *= base;
    }
    msd_range(ctx, base, 0, top, divisor).await
}

fn msd_range<'a, H: SortHooks + 'a>(
    ctx: SortContext<'a, H>,
    base: u64,
    start: usize,
    end: usize,
    divisor: u64,
) -> SortFuture<'a> {
    Box::pin(async move {
        if end - start <= 1 {
            return Ok(());
        }
        let mut buckets = empty_buckets(base);
        let mut slots = SlotIndex::with_capacity(end - start);
        for i in start..end {
            ctx.aux_write(i).await?;
            let element = ctx.array().get(i);
            buckets[digit(element.value, divisor, base)].push(element.id);
            slots.record(element.id, i);
        }

        let ranges = place_buckets(ctx, &buckets, start, &mut slots).await?;
        if divisor == 1 {
            return Ok(());
        }
        for range in ranges {
            msd_range(ctx, base, range.start, range.end, divisor / base).await?;
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
    use crate::error::{SortError, ValidationError};
    use crate::options::Algorithm;

    #[tokio::test]
    async fn test_lsd_base_four_takes_two_passes() {
        let values = [9, 3, 14, 0, 7, 12, 1, 15, 5, 10, 2, 8, 13, 4, 11, 6];
        let options = AlgorithmOptions::default().with_base(4);
        let (sorted, hooks) = sort_values(Algorithm::RadixSortLsd, &options, &values).await;
        assert_eq!(sorted, (0..16).collect::<Vec<_>>());
        // One auxiliary write per element per pass.
        assert_eq!(hooks.aux_writes.get(), 2 * 16);
        assert_eq!(hooks.comparisons.get(), 0);
    }

    #[tokio::test]
    async fn test_lsd_is_stable() {
        let values = [3, 1, 3, 0, 1, 3, 2, 0];
        let engine = SortEngine::new(values.len(), CountingHooks::default());
        let arr = SortArray::new(elements_from_values(&values));
        engine
            .run(Algorithm::RadixSortLsd, &arr, &AlgorithmOptions::default().with_base(2))
            .await
            .unwrap();
        let ids: Vec<u32> = arr.snapshot().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 7, 1, 4, 6, 0, 2, 5]);
    }

    #[tokio::test]
    async fn test_uniform_digit_skips_placement() {
        let values = [4, 4, 4, 4];
        let (_, hooks) = sort_values(Algorithm::RadixSortLsd, &AlgorithmOptions::default(), &values).await;
        assert_eq!(hooks.swaps.get(), 0);
        assert_eq!(hooks.aux_writes.get(), 8);
    }

    #[tokio::test]
    async fn test_msd_handles_keys_above_length() {
        let values = scrambled(20, 1000);
        for base in [2, 3, 10] {
            let options = AlgorithmOptions::default().with_base(base);
            let (sorted, _) = sort_values(Algorithm::RadixSortMsd, &options, &values).await;
            assert_eq!(sorted, sorted_copy(&values), "base {base}");
        }
    }

    #[tokio::test]
    async fn test_msd_sorted_input_needs_no_swaps() {
        let values: Vec<u32> = (0..27).collect();
        let (_, hooks) = sort_values(Algorithm::RadixSortMsd, &AlgorithmOptions::default().with_base(3), &values).await;
        assert_eq!(hooks.swaps.get(), 0);
        assert!(hooks.aux_writes.get() >= 27 * 3);
    }

    #[tokio::test]
    async fn test_degenerate_base_is_rejected() {
        let engine = SortEngine::new(4, CountingHooks::default());
        let arr = SortArray::new(elements_from_values(&[3, 2, 1, 0]));
        let result = engine
            .run(Algorithm::RadixSortMsd, &arr, &AlgorithmOptions::default().with_base(1))
            .await;
        assert!(matches!(result, Err(SortError::Validation(ValidationError::InvalidBase { base: 1, .. }))));
    }

    #[tokio::test]
    async fn test_oversized_base_is_rejected_before_any_hook() {
        let engine = SortEngine::new(4, CountingHooks::default());
        let arr = SortArray::new(elements_from_values(&[3, 2, 1, 0]));
        for algorithm in [Algorithm::RadixSortLsd, Algorithm::RadixSortMsd] {
            let options = AlgorithmOptions::default().with_base(4_000_000_000);
            let result = engine.run(algorithm, &arr, &options).await;
            assert!(matches!(
                result,
                Err(SortError::Validation(ValidationError::InvalidBase { base: 4_000_000_000, .. }))
            ));
        }
        assert_eq!(engine.hooks().total(), 0);
        assert_eq!(arr.values(), vec![3, 2, 1, 0]);
    }
}
