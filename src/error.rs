//! Error types for sortviz.
//!
//! All errors are strongly typed using thiserror. Cancellation is modelled as
//! an error variant so it can travel up arbitrarily deep algorithm call stacks
//! with `?`, but it is not a failure: hosts treat it as a normal way for a run
//! to end.

use thiserror::Error;

use crate::options::Algorithm;

/// Precondition violations a host checks before starting a run.
///
/// The engine itself never validates options; these are produced by
/// [`crate::options::check_preconditions`] and [`crate::Settings::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A network that only handles powers of two was given another length.
    #[error("{algorithm} requires a power-of-two length, got {len}")]
    NonPowerOfTwoLength {
        /// The network that was requested.
        algorithm: Algorithm,
        /// The rejected length.
        len: usize,
    },

    /// Radix base outside `2..=max`.
    #[error("Radix base must be between 2 and {max}, got {base}")]
    InvalidBase {
        /// The rejected base.
        base: u32,
        /// Largest accepted base.
        max: u32,
    },

    /// Comb sort gap shrink factor that would never reach a gap of one.
    #[error("Shrink factor must be a finite number > 1, got {factor}")]
    InvalidShrinkFactor {
        /// The rejected factor.
        factor: f64,
    },

    /// Heap arity below two.
    #[error("Heap child count must be >= 2, got {count}")]
    InvalidChildCount {
        /// The rejected child count.
        count: usize,
    },

    /// Column count a host does not offer.
    #[error("Column count {count} is out of range [{min}, {max}]")]
    ColumnCountOutOfRange {
        /// The rejected count.
        count: usize,
        /// Smallest accepted count.
        min: usize,
        /// Largest accepted count.
        max: usize,
    },

    /// Name that matches no catalog entry.
    #[error("Unknown algorithm '{name}'")]
    UnknownAlgorithm {
        /// The name as given.
        name: String,
    },
}

/// Top-level error type for sortviz.
#[derive(Debug, Error)]
pub enum SortError {
    /// The shared run flag was cleared; the run was cancelled.
    #[error("Run is not active")]
    NotRunning,

    /// A precondition check failed.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Settings could not be read, parsed or written.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong.
        message: String,
    },

    /// A host hook failed for a reason other than cancellation.
    #[error("Hook failed: {message}")]
    Hook {
        /// What went wrong.
        message: String,
    },

    /// Bookkeeping inside an algorithm went out of sync.
    #[error("Internal error: {message}")]
    Internal {
        /// What went wrong.
        message: String,
    },
}

impl SortError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a hook error.
    #[must_use]
    pub fn hook(message: impl Into<String>) -> Self {
        Self::Hook {
            message: message.into(),
        }
    }

    /// Returns true if this is the cooperative cancellation signal.
    #[must_use]
    pub const fn is_cancellation(&self) -> bool {
        matches!(self, Self::NotRunning)
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

/// Result type alias for sortviz operations.
pub type SortResult<T> = Result<T, SortError>;
