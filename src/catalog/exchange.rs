//! Canonical exchange sorts.

use crate::error::SortResult;
use crate::hooks::{SortContext, SortHooks};
use crate::operator::Operator;

pub(crate) async fn insertion_sort<H: SortHooks>(ctx: SortContext<'_, H>) -> SortResult<()> {
    for i in 1..ctx.len() {
        let mut j = i;
        while j > 0 && ctx.compare(j - 1, Operator::Gt, j).await? {
            ctx.swap(j - 1, j).await?;
            j -= 1;
        }
    }
    Ok(())
}

pub(crate) async fn selection_sort<H: SortHooks>(ctx: SortContext<'_, H>) -> SortResult<()> {
    let n = ctx.len();
    for i in 0..n {
        let mut min = i;
        for j in i + 1..n {
            if ctx.compare(j, Operator::Lt, min).await? {
                min = j;
            }
        }
        if min != i {
            ctx.swap(min, i).await?;
        }
    }
    Ok(())
}

/// Bubble sort; the settled suffix grows by one each pass.
pub(crate) async fn bubble_sort<H: SortHooks>(ctx: SortContext<'_, H>) -> SortResult<()> {
    let n = ctx.len();
    let mut sorted_count = 0;
    let mut sorted = false;
    while !sorted {
        sorted = true;
        for i in 1..n.saturating_sub(sorted_count) {
            if ctx.compare(i - 1, Operator::Gt, i).await? {
                ctx.swap(i - 1, i).await?;
                sorted = false;
            }
        }
        sorted_count += 1;
    }
    Ok(())
}

/// Alternating forward and backward passes, shrinking both ends.
pub(crate) async fn cocktail_shaker_sort<H: SortHooks>(ctx: SortContext<'_, H>) -> SortResult<()> {
    let n = ctx.len();
    let mut settled_left = 0;
    let mut settled_right = 0;
    let mut backward = false;
    let mut sorted = false;
    while !sorted {
        sorted = true;
        if backward {
            let mut i = n.saturating_sub(1 + settled_right);
            while i > settled_left {
                if ctx.compare(i - 1, Operator::Gt, i).await? {
                    ctx.swap(i - 1, i).await?;
                    sorted = false;
                }
                i -= 1;
            }
            settled_left += 1;
        } else {
            for i in 1 + settled_left..n.saturating_sub(settled_right) {
                if ctx.compare(i, Operator::Lt, i - 1).await? {
                    ctx.swap(i, i - 1).await?;
                    sorted = false;
                }
            }
            settled_right += 1;
        }
        backward = !backward;
    }
    Ok(())
}
