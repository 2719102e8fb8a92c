//! Bully sort and push sort.
//!
//! Neither has an external reference. Both terminate: every swap resolves at
//! least one inversion, and a pass without swaps over the full range only
//! happens on sorted input.

use crate::error::SortResult;
use crate::hooks::{SortContext, SortHooks};
use crate::operator::Operator;

/// Slot `i` is bullied when its left neighbour is greater and its right
/// neighbour, if any, is not smaller.
async fn is_bullied<H: SortHooks>(ctx: SortContext<'_, H>, i: usize) -> SortResult<bool> {
    if ctx.compare(i - 1, Operator::Le, i).await? {
        return Ok(false);
    }
    if i + 1 < ctx.len() && ctx.compare(i + 1, Operator::Lt, i).await? {
        return Ok(false);
    }
    Ok(true)
}

/// Bully sort.
///
/// A pass walks left to right looking for bullied slots. For each one it
/// picks the smallest bully (the left neighbour, or the right one if that is
/// strictly greater than the victim and smaller than the left), then swaps
/// the victim with the earliest slot from `swap_index` on that is not smaller
/// than that bully. Passes scan up to two past the last bullied slot of the
/// previous pass; a quiet short pass is retried over the full range.
pub(crate) async fn bully_sort<H: SortHooks>(ctx: SortContext<'_, H>) -> SortResult<()> {
    let n = ctx.len();
    let mut sorted_from = n;
    loop {
        let mut swapped = false;
        let mut swap_index = 0;
        let max_i = sorted_from;
        for i in 1..max_i {
            if !is_bullied(ctx, i).await? {
                continue;
            }
            sorted_from = (i + 2).min(n);

            let mut bully = i - 1;
            if i + 1 < n
                && ctx.compare(i, Operator::Lt, i + 1).await?
                && ctx.compare(i + 1, Operator::Lt, bully).await?
            {
                bully = i + 1;
            }

            for j in swap_index..i {
                if ctx.compare(bully, Operator::Gt, j).await? {
                    continue;
                }
                ctx.swap(j, i).await?;
                swapped = true;
                swap_index = j + 1;
                break;
            }
        }

        if !swapped {
            if max_i >= n {
                return Ok(());
            }
            sorted_from = n;
        }
    }
}

/// Push sort.
///
/// Bubbles forward like bubble sort, but each inversion's smaller element is
/// also pushed back through the run of in-order steps seen since the previous
/// inversion. The scan ends at the last inversion of the previous pass.
pub(crate) async fn push_sort<H: SortHooks>(ctx: SortContext<'_, H>) -> SortResult<()> {
    let mut last_inversion = ctx.len().saturating_sub(1);
    loop {
        let mut sorted = true;
        let mut stack_size = 0;
        let end = last_inversion;
        for i in 0..end {
            if ctx.compare(i, Operator::Gt, i + 1).await? {
                last_inversion = i;
                sorted = false;
                ctx.swap(i, i + 1).await?;

                let mut j = i;
                while j >= 1 && i - j < stack_size && ctx.compare(j - 1, Operator::Gt, j).await? {
                    ctx.swap(j - 1, j).await?;
                    j -= 1;
                }
                stack_size = 0;
            } else {
                stack_size += 1;
            }
        }
        if sorted {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::testing::{scrambled, sort_values, sorted_copy};
    use crate::options::{Algorithm, AlgorithmOptions};

    const BESPOKE: [Algorithm; 2] = [Algorithm::BullySort, Algorithm::PushSort];

    #[tokio::test]
    async fn test_sorts_random_and_duplicate_heavy_input() {
        for algorithm in BESPOKE {
            for values in [scrambled(60, 60), scrambled(60, 3), vec![2, 2, 1, 1, 0, 0]] {
                let (sorted, _) = sort_values(algorithm, &AlgorithmOptions::default(), &values).await;
                assert_eq!(sorted, sorted_copy(&values), "{algorithm}");
            }
        }
    }

    #[tokio::test]
    async fn test_sorted_input_needs_no_swaps() {
        let values: Vec<u32> = (0..30).collect();
        for algorithm in BESPOKE {
            let (_, hooks) = sort_values(algorithm, &AlgorithmOptions::default(), &values).await;
            assert_eq!(hooks.swaps.get(), 0, "{algorithm}");
        }
    }

    #[tokio::test]
    async fn test_reversed_input() {
        let values: Vec<u32> = (0..25).rev().collect();
        for algorithm in BESPOKE {
            let (sorted, _) = sort_values(algorithm, &AlgorithmOptions::default(), &values).await;
            assert_eq!(sorted, sorted_copy(&values), "{algorithm}");
        }
    }

    #[tokio::test]
    async fn test_bully_sort_single_victim() {
        // 1 is bullied by 5 and 3; the smaller bully is 3, so the earliest slot
        // holding at least 3 (the 5) trades places with it.
        let (sorted, hooks) = sort_values(Algorithm::BullySort, &AlgorithmOptions::default(), &[0, 5, 1, 3]).await;
        assert_eq!(sorted, vec![0, 1, 3, 5]);
        assert_eq!(hooks.swaps.get(), 2);
    }
}
