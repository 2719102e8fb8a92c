//! Gap-sequence sorts.

use crate::error::{SortResult, ValidationError};
use crate::hooks::{SortContext, SortHooks};
use crate::operator::Operator;
use crate::options::AlgorithmOptions;

/// Ciura's gap sequence (OEIS A102549).
const SHELL_GAPS: [usize; 8] = [701, 301, 132, 57, 23, 10, 4, 1];

/// Comb sort. The gap starts at the column count and shrinks by the shrink
/// factor each pass, never below 1. The run ends after a gap-1 pass that
/// swapped nothing.
pub(crate) async fn comb_sort<H: SortHooks>(ctx: SortContext<'_, H>, options: &AlgorithmOptions) -> SortResult<()> {
    let factor = options.shrink_factor;
    if !factor.is_finite() || factor <= 1.0 {
        return Err(ValidationError::InvalidShrinkFactor { factor }.into());
    }

    let n = ctx.len();
    let mut gap = ctx.columns();
    let mut sorted = false;
    while !sorted {
        gap = shrink(gap, factor);
        if gap <= 1 {
            gap = 1;
            sorted = true;
        }
        for i in gap..n {
            if ctx.compare(i - gap, Operator::Gt, i).await? {
                ctx.swap(i - gap, i).await?;
                sorted = false;
            }
        }
    }
    Ok(())
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn shrink(gap: usize, factor: f64) -> usize {
    (gap as f64 / factor).floor() as usize
}

/// Shell sort over the fixed gap sequence. The gap-insertion loop stops at
/// the first pair already in order.
pub(crate) async fn shell_sort<H: SortHooks>(ctx: SortContext<'_, H>) -> SortResult<()> {
    let columns = ctx.columns();
    for gap in SHELL_GAPS.into_iter().filter(|&gap| gap <= columns) {
        for i in gap..columns {
            let mut j = i;
            while j >= gap {
                if ctx.compare(j - gap, Operator::Le, j).await? {
                    break;
                }
                ctx.swap(j - gap, j).await?;
                j -= gap;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testing::{scrambled, sort_values, sorted_copy};
    use crate::options::Algorithm;

    #[test]
    fn test_shrink_reaches_one() {
        let mut gap = 100;
        let mut passes = 0;
        while gap > 1 {
            gap = shrink(gap, 1.3);
            passes += 1;
        }
        assert!(passes < 20);
        assert_eq!(shrink(1, 1.3), 0);
    }

    #[tokio::test]
    async fn test_comb_sort_terminates_on_random_input() {
        let values = scrambled(100, 100);
        let (sorted, _) = sort_values(Algorithm::CombSort, &AlgorithmOptions::default(), &values).await;
        assert_eq!(sorted, sorted_copy(&values));
    }

    #[tokio::test]
    async fn test_comb_sort_large_factor() {
        let values = scrambled(40, 9);
        let options = AlgorithmOptions::default().with_shrink_factor(50.0);
        let (sorted, _) = sort_values(Algorithm::CombSort, &options, &values).await;
        assert_eq!(sorted, sorted_copy(&values));
    }

    #[tokio::test]
    async fn test_shell_sort_leaves_equal_values() {
        let values = [3; 12];
        let (_, hooks) = sort_values(Algorithm::ShellSort, &AlgorithmOptions::default(), &values).await;
        assert_eq!(hooks.swaps.get(), 0);
    }

    #[tokio::test]
    async fn test_shell_sort_uses_gaps_up_to_length() {
        let values = scrambled(800, 1000);
        let (sorted, _) = sort_values(Algorithm::ShellSort, &AlgorithmOptions::default(), &values).await;
        assert_eq!(sorted, sorted_copy(&values));
    }
}
