//! Robust statistics over stereo tie points, built on `tiepoint-quality-core`.
//!
//! Two concerns live here:
//! 1. Percentile-based range estimation over a derived scalar signal
//!    (epipolar error, disparity), robust to mismatched correspondences
//!    with errors far outside the inlier population.
//! 2. 2D spatial binning of a signal over left-image coordinates, for
//!    diagnosing systematic geometric errors tile by tile.
//!
//! ## Quickstart
//!
//! ```
//! use tiepoint_quality_core::{Correspondence, CorrespondenceSet};
//! use tiepoint_quality_stats::range;
//!
//! let set = CorrespondenceSet::new(vec![
//!     Correspondence::new(0.0, 0.0, 1.0, 0.0),
//!     Correspondence::new(0.0, 10.0, 1.0, 9.0),
//!     Correspondence::new(0.0, 100.0, 1.0, 0.0),
//! ]);
//!
//! let est = range::estimate(&set.disparities(), 1.0, 99.0).unwrap();
//! assert_eq!(1.0, est.stats.mean);
//! ```

pub mod binning;
pub mod filter;
pub mod range;

pub use binning::{bin2d, BinStatistic, SpatialGrid};
pub use filter::{
    compute_disparity_range, remove_epipolar_outliers, DEFAULT_DISPARITY_LOWER_PCT,
    DEFAULT_DISPARITY_UPPER_PCT, DEFAULT_EPIPOLAR_OUTLIER_PCT,
};
pub use range::{
    combined_envelope, estimate, percentile_envelope, signal_stats, Envelope, RangeEstimate,
    SignalStats, DEFAULT_LOWER_PCT, DEFAULT_UPPER_PCT,
};
