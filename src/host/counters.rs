use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// The three instrumented operation kinds. Also names the highlight color a
/// renderer uses for an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// `compare` or `value_compare`.
    Comparison,
    /// `swap`.
    Swap,
    /// `aux_write`.
    AuxWrite,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Comparison => write!(f, "comparison"),
            Self::Swap => write!(f, "swap"),
            Self::AuxWrite => write!(f, "aux write"),
        }
    }
}

/// Per-run operation counters.
///
/// Atomic so a display thread can read them while the run is in flight;
/// only the hooks increment them.
#[derive(Debug, Default)]
pub struct RunCounters {
    comparisons: AtomicU64,
    swaps: AtomicU64,
    aux_writes: AtomicU64,
}

impl RunCounters {
    /// Creates zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Zeroes all counters.
    pub fn reset(&self) {
        self.comparisons.store(0, Ordering::Relaxed);
        self.swaps.store(0, Ordering::Relaxed);
        self.aux_writes.store(0, Ordering::Relaxed);
    }

    /// Counts one operation.
    pub fn record(&self, kind: OperationKind) {
        let counter = match kind {
            OperationKind::Comparison => &self.comparisons,
            OperationKind::Swap => &self.swaps,
            OperationKind::AuxWrite => &self.aux_writes,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Current values.
    #[must_use]
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            comparisons: self.comparisons.load(Ordering::Relaxed),
            swaps: self.swaps.load(Ordering::Relaxed),
            aux_writes: self.aux_writes.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`RunCounters`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CounterSnapshot {
    /// Index and value comparisons.
    pub comparisons: u64,
    /// Element exchanges.
    pub swaps: u64,
    /// Auxiliary writes.
    pub aux_writes: u64,
}

impl CounterSnapshot {
    /// Total number of hook calls.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.comparisons + self.swaps + self.aux_writes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_reset() {
        let counters = RunCounters::new();
        counters.record(OperationKind::Comparison);
        counters.record(OperationKind::Comparison);
        counters.record(OperationKind::Swap);
        counters.record(OperationKind::AuxWrite);

        let snapshot = counters.snapshot();
        assert_eq!(
            snapshot,
            CounterSnapshot {
                comparisons: 2,
                swaps: 1,
                aux_writes: 1,
            }
        );
        assert_eq!(snapshot.total(), 4);

        counters.reset();
        assert_eq!(counters.snapshot(), CounterSnapshot::default());
    }

    #[test]
    fn test_snapshot_json() {
        let json = serde_json::to_value(CounterSnapshot {
            comparisons: 3,
            swaps: 0,
            aux_writes: 7,
        })
        .unwrap();
        assert_eq!(json["aux_writes"], 7);
        assert_eq!(serde_json::to_value(OperationKind::AuxWrite).unwrap(), "aux_write");
    }
}
