//! Precondition checks for a run.
//!
//! The catalog trusts its inputs. Hosts call these before starting a run so
//! that a power-of-two-only network never sees an odd length and a radix sort
//! never sees a degenerate base.

use crate::error::ValidationError;

use super::{Algorithm, AlgorithmOptions};

/// Smallest column count a host offers.
pub const MIN_COLUMNS: usize = 8;

/// Largest column count a host offers.
pub const MAX_COLUMNS: usize = 1024;

/// Largest radix base accepted. A pass allocates one bucket per digit value.
pub const MAX_RADIX_BASE: u32 = 1 << 16;

/// Validate a column count against the range hosts offer.
///
/// # Errors
///
/// Returns [`ValidationError::ColumnCountOutOfRange`] outside `8..=1024`.
pub fn check_column_count(count: usize) -> Result<(), ValidationError> {
    if (MIN_COLUMNS..=MAX_COLUMNS).contains(&count) {
        Ok(())
    } else {
        Err(ValidationError::ColumnCountOutOfRange {
            count,
            min: MIN_COLUMNS,
            max: MAX_COLUMNS,
        })
    }
}

/// Validate a radix base.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidBase`] outside `2..=MAX_RADIX_BASE`.
pub fn check_radix_base(base: u32) -> Result<(), ValidationError> {
    if (2..=MAX_RADIX_BASE).contains(&base) {
        Ok(())
    } else {
        Err(ValidationError::InvalidBase {
            base,
            max: MAX_RADIX_BASE,
        })
    }
}

/// Validate the option fields `algorithm` reads. Unused fields are ignored.
///
/// # Errors
///
/// Returns the first invalid field found.
pub fn check_options(algorithm: Algorithm, options: &AlgorithmOptions) -> Result<(), ValidationError> {
    match algorithm {
        Algorithm::RadixSortLsd | Algorithm::RadixSortMsd => {
            check_radix_base(options.base)?;
        }
        Algorithm::CombSort => {
            let factor = options.shrink_factor;
            if !factor.is_finite() || factor <= 1.0 {
                return Err(ValidationError::InvalidShrinkFactor { factor });
            }
        }
        Algorithm::Heapsort => {
            if options.child_count < 2 {
                return Err(ValidationError::InvalidChildCount {
                    count: options.child_count,
                });
            }
        }
        _ => {}
    }
    Ok(())
}

/// Validate everything a run of `algorithm` over `len` elements needs.
///
/// # Errors
///
/// Returns a [`ValidationError`] describing the violated precondition.
pub fn check_preconditions(
    algorithm: Algorithm,
    options: &AlgorithmOptions,
    len: usize,
) -> Result<(), ValidationError> {
    check_options(algorithm, options)?;
    if algorithm.requires_power_of_two(options) && len > 1 && !len.is_power_of_two() {
        return Err(ValidationError::NonPowerOfTwoLength { algorithm, len });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{HeapType, NetworkForm};

    #[test]
    fn test_rejects_small_base() {
        let options = AlgorithmOptions::default().with_base(1);
        assert_eq!(
            check_options(Algorithm::RadixSortLsd, &options),
            Err(ValidationError::InvalidBase {
                base: 1,
                max: MAX_RADIX_BASE
            })
        );
        // Unused by other algorithms.
        assert!(check_options(Algorithm::QuickSort, &options).is_ok());
    }

    #[test]
    fn test_rejects_huge_base() {
        let options = AlgorithmOptions::default().with_base(4_000_000_000);
        assert_eq!(
            check_options(Algorithm::RadixSortMsd, &options),
            Err(ValidationError::InvalidBase {
                base: 4_000_000_000,
                max: MAX_RADIX_BASE
            })
        );
        assert!(check_radix_base(MAX_RADIX_BASE).is_ok());
        assert!(check_radix_base(MAX_RADIX_BASE + 1).is_err());
        assert!(check_radix_base(2).is_ok());
    }

    #[test]
    fn test_rejects_shrink_factor_at_or_below_one() {
        for factor in [1.0, 0.5, f64::NAN] {
            let options = AlgorithmOptions::default().with_shrink_factor(factor);
            assert!(check_options(Algorithm::CombSort, &options).is_err());
        }
        let options = AlgorithmOptions::default().with_shrink_factor(1.01);
        assert!(check_options(Algorithm::CombSort, &options).is_ok());
    }

    #[test]
    fn test_rejects_unary_heap() {
        let options = AlgorithmOptions::default().with_heap(HeapType::Min, 1);
        assert_eq!(
            check_options(Algorithm::Heapsort, &options),
            Err(ValidationError::InvalidChildCount { count: 1 })
        );
    }

    #[test]
    fn test_power_of_two_lengths() {
        let options = AlgorithmOptions::default();
        assert!(check_preconditions(Algorithm::BitonicSort, &options, 64).is_ok());
        assert!(check_preconditions(Algorithm::BitonicSort, &options, 100).is_err());
        assert!(check_preconditions(Algorithm::OddEvenMergesort, &options, 100).is_ok());

        let recursive = options.with_network(NetworkForm::Recursive);
        assert_eq!(
            check_preconditions(Algorithm::OddEvenMergesort, &recursive, 12),
            Err(ValidationError::NonPowerOfTwoLength {
                algorithm: Algorithm::OddEvenMergesort,
                len: 12,
            })
        );
    }
}
