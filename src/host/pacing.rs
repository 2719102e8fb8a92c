//! Per-operation pacing.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::counters::OperationKind;

/// Upper end of the logarithmic delay slider.
pub const MAX_TIME_SCALE: f64 = 14.0;

/// Delays applied after each kind of operation, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Delay after a comparison.
    pub compare_ms: u64,
    /// Delay after a swap.
    pub swap_ms: u64,
    /// Delay after an auxiliary write.
    pub aux_write_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            compare_ms: 1,
            swap_ms: 1,
            aux_write_ms: 1,
        }
    }
}

impl PacingConfig {
    /// No delays: runs as fast as the host loop allows.
    #[must_use]
    pub const fn unpaced() -> Self {
        Self {
            compare_ms: 0,
            swap_ms: 0,
            aux_write_ms: 0,
        }
    }

    /// The same delay for every operation.
    #[must_use]
    pub const fn uniform(ms: u64) -> Self {
        Self {
            compare_ms: ms,
            swap_ms: ms,
            aux_write_ms: ms,
        }
    }

    /// Delay configured for `kind`.
    #[must_use]
    pub const fn delay_for(&self, kind: OperationKind) -> Duration {
        let ms = match kind {
            OperationKind::Comparison => self.compare_ms,
            OperationKind::Swap => self.swap_ms,
            OperationKind::AuxWrite => self.aux_write_ms,
        };
        Duration::from_millis(ms)
    }

    /// Returns true if operations of `kind` are slowed down, and therefore
    /// highlighted and voiced.
    #[must_use]
    pub const fn is_paced(&self, kind: OperationKind) -> bool {
        !self.delay_for(kind).is_zero()
    }
}

/// Suspends for `delay`. A zero delay still yields to the runtime so other
/// work is not starved.
pub async fn pace(delay: Duration) {
    if delay.is_zero() {
        tokio::task::yield_now().await;
    } else {
        tokio::time::sleep(delay).await;
    }
}

/// Maps a slider position to milliseconds: `round(2^x) - 1`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn time_scale(x: f64) -> u64 {
    let x = x.clamp(0.0, MAX_TIME_SCALE);
    (x.exp2().round() as u64).saturating_sub(1)
}

/// Slider position for a delay in milliseconds.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn inverse_time_scale(ms: u64) -> f64 {
    ((ms + 1) as f64).log2()
}
