//! Disparity-range estimation and epipolar-quality assessment for
//! rectified satellite stereo pairs.
//!
//! Given sparse tie points from a feature matcher, this crate estimates a
//! robust disparity search interval and the residual epipolar
//! misalignment, globally and per spatial tile, to configure and validate
//! a downstream dense correlation stage.
//!
//! ## Quickstart
//!
//! ```
//! use tiepoint_quality::{
//!     Correspondence, CorrespondenceSet, DisparityBounds, QualityReport,
//!     QualityReportParams,
//! };
//!
//! let matches: CorrespondenceSet = (0..25)
//!     .map(|i| {
//!         let (x, y) = ((i % 5) as f64 * 100.0, (i / 5) as f64 * 100.0);
//!         Correspondence::new(x, y, x + 3.0, y + 0.1)
//!     })
//!     .collect();
//!
//! let report = QualityReport::build(
//!     &matches,
//!     &matches,
//!     DisparityBounds { min: -2.0, max: 8.0 },
//!     &QualityReportParams { bins: (5, 5), ..Default::default() },
//! )?;
//! println!("disparity mean: {:.2}", report.corrected_disparity.stats.mean);
//! # Ok::<(), tiepoint_quality::QualityError>(())
//! ```
//!
//! ## API map
//! - [`core`](tiepoint_quality_core): correspondence container, derived
//!   signals, shared error type, minimal logger.
//! - [`stats`](tiepoint_quality_stats): percentile range estimation,
//!   outlier filtering, disparity-range bounds, 2D spatial binning.
//! - [`QualityReport`]: the assembled output contract.

pub use tiepoint_quality_core as core;
pub use tiepoint_quality_stats as stats;

pub use tiepoint_quality_core::{Correspondence, CorrespondenceSet, QualityError};
pub use tiepoint_quality_stats::{
    bin2d, combined_envelope, compute_disparity_range, estimate, remove_epipolar_outliers,
    BinStatistic, Envelope, RangeEstimate, SignalStats, SpatialGrid,
};

mod report;

pub use report::{
    DisparityBounds, DisparityMaps, EpipolarErrorMaps, QualityReport, QualityReportParams,
};
