//! Percentile-clipped range estimation over a scalar tie-point signal.
//!
//! Satellite correspondence data contains mismatches whose errors dwarf the
//! inlier population, so the reporting envelope is clipped at fixed
//! percentiles (1/99 by default) rather than at a standard-deviation
//! multiple: the clip is distribution-agnostic and stable under heavy
//! tails. Summary statistics (mean, std_dev, ...) are always computed over
//! the full, unclipped signal; clipping controls only the envelope. The two
//! computations are kept in separate functions on purpose.

use serde::{Deserialize, Serialize};

use tiepoint_quality_core::QualityError;

/// Default lower clipping percentile.
pub const DEFAULT_LOWER_PCT: f64 = 1.0;
/// Default upper clipping percentile.
pub const DEFAULT_UPPER_PCT: f64 = 99.0;

/// Percentile-clipped reporting envelope of a signal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub lo: f64,
    pub hi: f64,
}

impl Envelope {
    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }

    pub fn contains(&self, v: f64) -> bool {
        self.lo <= v && v <= self.hi
    }
}

/// Summary statistics over the full, unclipped signal.
///
/// Only exists for non-empty signals; `count >= 1` always holds.
/// `std_dev` is the population standard deviation (0 for a single sample).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignalStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub rms: f64,
}

/// Robust range estimate: clipped envelope plus unclipped statistics.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RangeEstimate {
    pub envelope: Envelope,
    pub stats: SignalStats,
}

/// Percentile envelope of `signal` by linear interpolation between order
/// statistics (value at sorted position `p/100 * (N-1)`).
///
/// Requires `0 <= lower_pct < upper_pct <= 100`.
pub fn percentile_envelope(
    signal: &[f64],
    lower_pct: f64,
    upper_pct: f64,
) -> Result<Envelope, QualityError> {
    validate_percentiles(lower_pct, upper_pct)?;
    if signal.is_empty() {
        return Err(QualityError::EmptyInput);
    }

    let sorted = sorted_copy(signal);
    Ok(Envelope {
        lo: percentile_of_sorted(&sorted, lower_pct),
        hi: percentile_of_sorted(&sorted, upper_pct),
    })
}

/// Summary statistics over the full signal, no clipping applied.
pub fn signal_stats(signal: &[f64]) -> Result<SignalStats, QualityError> {
    if signal.is_empty() {
        return Err(QualityError::EmptyInput);
    }

    let count = signal.len();
    let n = count as f64;

    // All folds run over the sorted copy, so any permutation of the same
    // values produces bit-identical statistics.
    let sorted = sorted_copy(signal);
    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    for &v in &sorted {
        sum += v;
        sum_sq += v * v;
    }

    let mean = sum / n;
    let mut var = 0.0;
    for &v in &sorted {
        let d = v - mean;
        var += d * d;
    }
    var /= n;

    let median = percentile_of_sorted(&sorted, 50.0);

    Ok(SignalStats {
        count,
        min: sorted[0],
        max: sorted[count - 1],
        mean,
        median,
        std_dev: var.sqrt(),
        rms: (sum_sq / n).sqrt(),
    })
}

/// Robust range estimate of `signal`: percentile envelope at
/// `[lower_pct, upper_pct]` plus unclipped summary statistics.
pub fn estimate(
    signal: &[f64],
    lower_pct: f64,
    upper_pct: f64,
) -> Result<RangeEstimate, QualityError> {
    let envelope = percentile_envelope(signal, lower_pct, upper_pct)?;
    let stats = signal_stats(signal)?;
    Ok(RangeEstimate { envelope, stats })
}

/// Combine two populations into one display/analysis envelope.
///
/// The bound is `min(primary clipped lo, secondary unclipped min)` and
/// symmetrically for the upper side: the envelope is widened, never
/// narrowed, by the union of the primary's percentiles and the secondary's
/// raw extremes. Typical use: `primary` is the raw match population (whose
/// own outliers the percentile clip suppresses), `secondary` the corrected
/// one.
pub fn combined_envelope(primary: &RangeEstimate, secondary: &RangeEstimate) -> Envelope {
    Envelope {
        lo: primary.envelope.lo.min(secondary.stats.min),
        hi: primary.envelope.hi.max(secondary.stats.max),
    }
}

fn validate_percentiles(lower_pct: f64, upper_pct: f64) -> Result<(), QualityError> {
    if !(0.0..=100.0).contains(&lower_pct) || !(0.0..=100.0).contains(&upper_pct) {
        return Err(QualityError::InvalidParameter(format!(
            "percentiles must lie in [0, 100], got [{lower_pct}, {upper_pct}]"
        )));
    }
    if lower_pct >= upper_pct {
        return Err(QualityError::InvalidParameter(format!(
            "lower percentile {lower_pct} must be below upper percentile {upper_pct}"
        )));
    }
    Ok(())
}

fn sorted_copy(signal: &[f64]) -> Vec<f64> {
    let mut sorted = signal.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Value at sorted position `pct/100 * (N-1)`, linearly interpolated.
fn percentile_of_sorted(sorted: &[f64], pct: f64) -> f64 {
    let last = sorted.len() - 1;
    let pos = pct / 100.0 * last as f64;
    let idx = pos.floor() as usize;
    if idx >= last {
        return sorted[last];
    }
    let frac = pos - idx as f64;
    sorted[idx] + frac * (sorted[idx + 1] - sorted[idx])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn constant_signal_collapses_to_a_point() {
        let est = estimate(&[1.0, 1.0, 1.0], 1.0, 99.0).unwrap();
        assert_eq!(1.0, est.stats.min);
        assert_eq!(1.0, est.stats.max);
        assert_eq!(1.0, est.stats.mean);
        assert_eq!(0.0, est.stats.std_dev);
        assert_eq!(1.0, est.envelope.lo);
        assert_eq!(1.0, est.envelope.hi);
    }

    #[test]
    fn outlier_does_not_shift_unclipped_statistics() {
        // Epipolar errors with one gross mismatch at 100.
        let signal = [0.0, 1.0, 100.0];
        let est = estimate(&signal, 1.0, 99.0).unwrap();

        assert_relative_eq!(est.stats.mean, 101.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(est.stats.std_dev, 46.90652, epsilon = 1e-4);
        assert_eq!(1.0, est.stats.median);

        // For N = 3 the 1/99 clip stays close to the full range.
        assert_relative_eq!(est.envelope.lo, 0.02, epsilon = 1e-12);
        assert_relative_eq!(est.envelope.hi, 98.02, epsilon = 1e-12);
    }

    #[test]
    fn envelope_brackets_mean() {
        let signal = [3.0, -1.0, 4.0, 1.0, -5.0, 9.0, 2.0, 6.0];
        let est = estimate(&signal, 1.0, 99.0).unwrap();
        assert!(est.stats.min <= est.stats.mean);
        assert!(est.stats.mean <= est.stats.max);
        assert!(est.stats.std_dev >= 0.0);
        assert!(est.stats.min <= est.stats.median && est.stats.median <= est.stats.max);
    }

    #[test]
    fn invariant_under_input_order() {
        let a = [5.0, -2.0, 7.5, 0.0, 3.25, -8.0, 1.0];
        let mut b = a;
        b.reverse();
        b.swap(1, 4);

        assert_eq!(
            estimate(&a, 5.0, 95.0).unwrap(),
            estimate(&b, 5.0, 95.0).unwrap()
        );
    }

    #[test]
    fn single_sample_has_zero_std_dev() {
        let est = estimate(&[2.5], 1.0, 99.0).unwrap();
        assert_eq!(0.0, est.stats.std_dev);
        assert_eq!(2.5, est.envelope.lo);
        assert_eq!(2.5, est.envelope.hi);
        assert_eq!(2.5, est.stats.median);
    }

    #[test]
    fn rejects_bad_percentiles() {
        let signal = [1.0, 2.0];
        assert!(matches!(
            estimate(&signal, -1.0, 99.0),
            Err(QualityError::InvalidParameter(_))
        ));
        assert!(matches!(
            estimate(&signal, 1.0, 101.0),
            Err(QualityError::InvalidParameter(_))
        ));
        assert!(matches!(
            estimate(&signal, 60.0, 40.0),
            Err(QualityError::InvalidParameter(_))
        ));
        assert!(matches!(
            estimate(&signal, 50.0, 50.0),
            Err(QualityError::InvalidParameter(_))
        ));
    }

    #[test]
    fn empty_signal_is_an_error() {
        assert_eq!(Err(QualityError::EmptyInput), estimate(&[], 1.0, 99.0));
        assert_eq!(Err(QualityError::EmptyInput), signal_stats(&[]));
        assert_eq!(
            Err(QualityError::EmptyInput),
            percentile_envelope(&[], 1.0, 99.0)
        );
    }

    #[test]
    fn percentile_interpolates_between_order_statistics() {
        let sorted = [0.0, 10.0, 20.0, 30.0];
        assert_relative_eq!(percentile_of_sorted(&sorted, 0.0), 0.0);
        assert_relative_eq!(percentile_of_sorted(&sorted, 50.0), 15.0);
        assert_relative_eq!(percentile_of_sorted(&sorted, 75.0), 22.5);
        assert_relative_eq!(percentile_of_sorted(&sorted, 100.0), 30.0);
    }

    #[test]
    fn combined_envelope_never_narrows() {
        let a = estimate(&[0.0, 1.0, 2.0, 50.0], 1.0, 99.0).unwrap();
        let b = estimate(&[-10.0, 0.5, 1.5], 1.0, 99.0).unwrap();

        let ab = combined_envelope(&a, &b);
        assert!(ab.lo <= a.envelope.lo);
        assert!(ab.lo <= b.envelope.lo);
        assert!(ab.hi >= a.envelope.hi);
        assert!(ab.hi >= b.envelope.hi);

        // Secondary extremes widen past the primary percentile clip.
        assert_eq!(-10.0, ab.lo);
    }
}
