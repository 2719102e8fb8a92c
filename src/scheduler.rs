//! Phase scheduler.
//!
//! Network sorts group independent compare-exchange continuations into a
//! phase. A phase either runs its continuations one after another, or polls
//! them all on the current task so their hook calls interleave. Nothing here
//! spawns: "concurrent" is cooperative interleaving on one logical thread.

use std::future::{poll_fn, Future};
use std::pin::Pin;
use std::task::Poll;

use crate::error::SortResult;

/// One independent continuation of a phase.
pub type PhaseTask<'a> = Pin<Box<dyn Future<Output = SortResult<()>> + 'a>>;

/// Runs every task of a phase.
///
/// With `concurrent == false` the tasks run strictly in order. Otherwise all
/// tasks are polled round-robin until each has finished. The first error is
/// returned immediately and the remaining continuations are dropped, so a
/// cancelled run unwinds without completing its sibling branches.
///
/// # Errors
///
/// Returns the first error any task produced.
pub async fn run_phase(tasks: Vec<PhaseTask<'_>>, concurrent: bool) -> SortResult<()> {
    if !concurrent || tasks.len() <= 1 {
        for task in tasks {
            task.await?;
        }
        return Ok(());
    }

    let mut slots: Vec<Option<PhaseTask<'_>>> = tasks.into_iter().map(Some).collect();
    poll_fn(|cx| {
        let mut pending = false;
        for slot in &mut slots {
            let Some(task) = slot.as_mut() else {
                continue;
            };
            let poll = task.as_mut().poll(cx);
            match poll {
                Poll::Ready(Ok(())) => *slot = None,
                Poll::Ready(Err(e)) => return Poll::Ready(Err(e)),
                Poll::Pending => pending = true,
            }
        }
        if pending {
            Poll::Pending
        } else {
            Poll::Ready(Ok(()))
        }
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SortError;
    use std::cell::RefCell;

    fn step_task<'a>(log: &'a RefCell<Vec<String>>, name: &'static str, steps: u32) -> PhaseTask<'a> {
        Box::pin(async move {
            for step in 0..steps {
                log.borrow_mut().push(format!("{name}{step}"));
                tokio::task::yield_now().await;
            }
            Ok(())
        })
    }

    #[tokio::test]
    async fn test_sequential_runs_in_order() {
        let log = RefCell::new(Vec::new());
        run_phase(vec![step_task(&log, "a", 2), step_task(&log, "b", 2)], false)
            .await
            .unwrap();
        assert_eq!(log.into_inner(), vec!["a0", "a1", "b0", "b1"]);
    }

    #[tokio::test]
    async fn test_concurrent_interleaves() {
        let log = RefCell::new(Vec::new());
        run_phase(vec![step_task(&log, "a", 2), step_task(&log, "b", 3)], true)
            .await
            .unwrap();
        assert_eq!(log.into_inner(), vec!["a0", "b0", "a1", "b1", "b2"]);
    }

    #[tokio::test]
    async fn test_concurrent_fails_fast() {
        let log = RefCell::new(Vec::new());
        let failing: PhaseTask<'_> = Box::pin(async {
            tokio::task::yield_now().await;
            Err(SortError::NotRunning)
        });
        let result = run_phase(vec![failing, step_task(&log, "b", 5)], true).await;
        assert!(matches!(result, Err(SortError::NotRunning)));
        // The sibling was dropped after its first step.
        assert_eq!(log.into_inner(), vec!["b0"]);
    }

    #[tokio::test]
    async fn test_sequential_stops_at_first_error() {
        let log = RefCell::new(Vec::new());
        let failing: PhaseTask<'_> = Box::pin(async { Err(SortError::NotRunning) });
        let result = run_phase(vec![failing, step_task(&log, "b", 1)], false).await;
        assert!(result.is_err());
        assert!(log.into_inner().is_empty());
    }

    #[tokio::test]
    async fn test_empty_phase() {
        assert!(run_phase(Vec::new(), true).await.is_ok());
    }
}
