//! Quality-report assembly.
//!
//! Combines the scalar range estimates and the spatial maps into the one
//! structure downstream configuration and presentation layers consume.
//! Pure aggregation: every number here comes from the stats crate or is
//! passed through unchanged.

use log::debug;
use serde::{Deserialize, Serialize};

use tiepoint_quality_core::{CorrespondenceSet, QualityError};
use tiepoint_quality_stats::{
    bin2d, combined_envelope, estimate, BinStatistic, Envelope, RangeEstimate, SpatialGrid,
    DEFAULT_LOWER_PCT, DEFAULT_UPPER_PCT,
};

/// Disparity search interval computed by the preprocessing stage.
///
/// Read-only pass-through: the report never recomputes these bounds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisparityBounds {
    pub min: f64,
    pub max: f64,
}

/// Knobs for [`QualityReport::build`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct QualityReportParams {
    /// Lower clipping percentile for range estimates.
    pub lower_pct: f64,
    /// Upper clipping percentile for range estimates.
    pub upper_pct: f64,
    /// Spatial-map resolution `(nx, ny)` over left-image coordinates.
    pub bins: (usize, usize),
}

impl Default for QualityReportParams {
    fn default() -> Self {
        Self {
            lower_pct: DEFAULT_LOWER_PCT,
            upper_pct: DEFAULT_UPPER_PCT,
            bins: (16, 16),
        }
    }
}

/// Spatial maps of the residual epipolar error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EpipolarErrorMaps {
    pub mean: SpatialGrid,
    pub count: SpatialGrid,
}

/// Spatial maps of the disparity signal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisparityMaps {
    pub min: SpatialGrid,
    pub max: SpatialGrid,
    /// Per-cell `max - min`; `None` where the cell holds no matches.
    pub width: SpatialGrid,
}

/// Scalar and spatially-binned quality statistics for one image pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub raw_epipolar_error: RangeEstimate,
    pub corrected_epipolar_error: RangeEstimate,
    pub raw_disparity: RangeEstimate,
    pub corrected_disparity: RangeEstimate,
    /// Shared display envelope over both epipolar-error populations
    /// (raw percentiles widened by corrected extremes).
    pub epipolar_error_envelope: Envelope,
    /// Shared display envelope over both disparity populations.
    pub disparity_envelope: Envelope,
    /// Dense-search interval from the preprocessing stage, pass-through.
    pub disparity_bounds: DisparityBounds,
    pub epipolar_error_maps: EpipolarErrorMaps,
    pub disparity_maps: DisparityMaps,
}

impl QualityReport {
    /// Assemble the report for one image pair.
    ///
    /// Scalar estimates cover both the raw and the corrected sets; spatial
    /// maps cover the corrected set only, binned over its left-image
    /// coordinates. Fails eagerly on empty sets or invalid parameters.
    pub fn build(
        raw: &CorrespondenceSet,
        corrected: &CorrespondenceSet,
        disparity_bounds: DisparityBounds,
        params: &QualityReportParams,
    ) -> Result<Self, QualityError> {
        debug!(
            "building quality report: {} raw / {} corrected matches, bins {:?}",
            raw.len(),
            corrected.len(),
            params.bins
        );

        let (lo, hi) = (params.lower_pct, params.upper_pct);
        let raw_epipolar_error = estimate(&raw.epipolar_errors(), lo, hi)?;
        let corrected_epipolar_error = estimate(&corrected.epipolar_errors(), lo, hi)?;
        let raw_disparity = estimate(&raw.disparities(), lo, hi)?;
        let corrected_disparity = estimate(&corrected.disparities(), lo, hi)?;

        let x = corrected.x_left();
        let y = corrected.y_left();
        let errors = corrected.epipolar_errors();
        let disparities = corrected.disparities();

        let epipolar_error_maps = EpipolarErrorMaps {
            mean: bin2d(&x, &y, &errors, params.bins, BinStatistic::Mean)?,
            count: bin2d(&x, &y, &errors, params.bins, BinStatistic::Count)?,
        };

        let disp_min = bin2d(&x, &y, &disparities, params.bins, BinStatistic::Min)?;
        let disp_max = bin2d(&x, &y, &disparities, params.bins, BinStatistic::Max)?;
        let disp_width = width_grid(&disp_min, &disp_max);

        Ok(Self {
            epipolar_error_envelope: combined_envelope(
                &raw_epipolar_error,
                &corrected_epipolar_error,
            ),
            disparity_envelope: combined_envelope(&raw_disparity, &corrected_disparity),
            raw_epipolar_error,
            corrected_epipolar_error,
            raw_disparity,
            corrected_disparity,
            disparity_bounds,
            epipolar_error_maps,
            disparity_maps: DisparityMaps {
                min: disp_min,
                max: disp_max,
                width: disp_width,
            },
        })
    }
}

/// Per-cell disparity spread; both inputs share edges by construction.
fn width_grid(min: &SpatialGrid, max: &SpatialGrid) -> SpatialGrid {
    let cells = min
        .cells
        .iter()
        .zip(&max.cells)
        .map(|(lo, hi)| match (lo, hi) {
            (Some(lo), Some(hi)) => Some(hi - lo),
            _ => None,
        })
        .collect();

    SpatialGrid {
        nx: min.nx,
        ny: min.ny,
        x_edges: min.x_edges.clone(),
        y_edges: min.y_edges.clone(),
        cells,
    }
}
