//! Percentile-based correspondence filtering and disparity-range bounds.
//!
//! These helpers mirror the preparation steps that run before dense
//! correlation: drop matches whose epipolar error sits in the extreme tails
//! of the population, then bound the disparity search interval from the
//! surviving matches.

use log::debug;

use tiepoint_quality_core::{CorrespondenceSet, QualityError};

use crate::range::percentile_envelope;

/// Default tail fraction removed per side by [`remove_epipolar_outliers`].
pub const DEFAULT_EPIPOLAR_OUTLIER_PCT: f64 = 0.1;
/// Default lower percentile for [`compute_disparity_range`].
pub const DEFAULT_DISPARITY_LOWER_PCT: f64 = 2.0;
/// Default upper percentile for [`compute_disparity_range`].
pub const DEFAULT_DISPARITY_UPPER_PCT: f64 = 98.0;

/// Keep only correspondences whose epipolar error lies within the
/// `[pct, 100 - pct]` percentile envelope of the set's own error signal.
///
/// Input order is preserved among survivors. `pct` must lie in `(0, 50)`.
pub fn remove_epipolar_outliers(
    set: &CorrespondenceSet,
    pct: f64,
) -> Result<CorrespondenceSet, QualityError> {
    let errors = set.epipolar_errors();
    let envelope = percentile_envelope(&errors, pct, 100.0 - pct)?;

    let filtered: CorrespondenceSet = set
        .iter()
        .zip(&errors)
        .filter(|(_, &e)| envelope.contains(e))
        .map(|(m, _)| *m)
        .collect();

    debug!(
        "epipolar outlier filter: kept {} of {} matches (pct = {pct})",
        filtered.len(),
        set.len()
    );
    Ok(filtered)
}

/// Percentile bounds of the disparity signal, `(minimum, maximum)`.
///
/// This is how the preprocessing stage derives the dense-search interval
/// from filtered matches; downstream analysis treats the resulting bounds
/// as read-only configuration.
pub fn compute_disparity_range(
    set: &CorrespondenceSet,
    lower_pct: f64,
    upper_pct: f64,
) -> Result<(f64, f64), QualityError> {
    let envelope = percentile_envelope(&set.disparities(), lower_pct, upper_pct)?;
    debug!(
        "disparity range over {} matches: [{:.3}, {:.3}] pix",
        set.len(),
        envelope.lo,
        envelope.hi
    );
    Ok((envelope.lo, envelope.hi))
}
