//! 2D spatial binning of a tie-point signal over image coordinates.
//!
//! Partitions correspondences into an `nx x ny` grid of equal-width cells
//! spanning the observed coordinate extents, then aggregates a chosen
//! signal per cell. Used to surface systematic geometric errors that a
//! global statistic would average away (e.g. an epipolar-error gradient
//! across the image).

use serde::{Deserialize, Serialize};

use tiepoint_quality_core::QualityError;

/// Per-cell aggregation applied by [`bin2d`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinStatistic {
    /// Arithmetic mean of member values.
    Mean,
    /// Number of members; ignores the value signal.
    Count,
    /// Minimum member value.
    Min,
    /// Maximum member value.
    Max,
}

/// Fixed-resolution 2D histogram of an aggregated signal.
///
/// Cells are stored row-major (`iy * nx + ix`). A cell with no members
/// holds `None`, never a fake zero, except for [`BinStatistic::Count`]
/// where zero is a genuine count.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpatialGrid {
    pub nx: usize,
    pub ny: usize,
    /// Cell boundaries along x, length `nx + 1`; last edge is closed.
    pub x_edges: Vec<f64>,
    /// Cell boundaries along y, length `ny + 1`; last edge is closed.
    pub y_edges: Vec<f64>,
    /// Aggregated cell values, row-major, length `nx * ny`.
    pub cells: Vec<Option<f64>>,
}

impl SpatialGrid {
    /// Aggregate at column `ix`, row `iy`.
    pub fn value(&self, ix: usize, iy: usize) -> Option<f64> {
        self.cells[iy * self.nx + ix]
    }

    /// Cell-center x coordinates for plotting/consumption.
    pub fn x_centers(&self) -> Vec<f64> {
        centers(&self.x_edges)
    }

    /// Cell-center y coordinates for plotting/consumption.
    pub fn y_centers(&self) -> Vec<f64> {
        centers(&self.y_edges)
    }
}

fn centers(edges: &[f64]) -> Vec<f64> {
    edges.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect()
}

/// Bin `value` over `(x, y)` into an `nx x ny` grid and aggregate per cell.
///
/// The three slices are parallel: the i-th value belongs to the i-th
/// coordinate pair. Edges are `bins` equal-width intervals per axis over
/// `[min, max]`; a point exactly at the maximum edge belongs to the last
/// cell. Mean accumulation follows the input order, so identical inputs
/// produce bit-identical grids.
pub fn bin2d(
    x: &[f64],
    y: &[f64],
    value: &[f64],
    bins: (usize, usize),
    statistic: BinStatistic,
) -> Result<SpatialGrid, QualityError> {
    for seq in [y, value] {
        if seq.len() != x.len() {
            return Err(QualityError::ShapeMismatch {
                left: x.len(),
                right: seq.len(),
            });
        }
    }
    let (nx, ny) = bins;
    if nx == 0 || ny == 0 {
        return Err(QualityError::InvalidParameter(format!(
            "bin counts must be positive, got ({nx}, {ny})"
        )));
    }
    if x.is_empty() {
        return Err(QualityError::EmptyInput);
    }

    let x_axis = Axis::from_values(x, nx);
    let y_axis = Axis::from_values(y, ny);

    let mut acc = CellAccumulator::new(nx * ny, statistic);
    for i in 0..x.len() {
        let ix = x_axis.bin_index(x[i]);
        let iy = y_axis.bin_index(y[i]);
        acc.push(iy * nx + ix, value[i]);
    }

    Ok(SpatialGrid {
        nx,
        ny,
        x_edges: x_axis.edges,
        y_edges: y_axis.edges,
        cells: acc.finish(),
    })
}

/// One binning axis: equal-width edges over the observed value range.
struct Axis {
    edges: Vec<f64>,
    min: f64,
    span: f64,
    n: usize,
}

impl Axis {
    fn from_values(values: &[f64], n: usize) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in values {
            min = min.min(v);
            max = max.max(v);
        }
        let span = max - min;

        let mut edges: Vec<f64> = (0..=n)
            .map(|i| min + span * i as f64 / n as f64)
            .collect();
        // Pin the last edge so the closed upper boundary is exact.
        edges[n] = max;

        Self { edges, min, span, n }
    }

    /// Index of the cell containing `v`, with the top edge closed.
    ///
    /// A degenerate axis (all values equal) maps everything to cell 0.
    fn bin_index(&self, v: f64) -> usize {
        if self.span <= 0.0 {
            return 0;
        }
        let t = (v - self.min) / self.span * self.n as f64;
        (t.floor() as usize).min(self.n - 1)
    }
}

struct CellAccumulator {
    statistic: BinStatistic,
    counts: Vec<usize>,
    values: Vec<f64>,
}

impl CellAccumulator {
    fn new(cells: usize, statistic: BinStatistic) -> Self {
        Self {
            statistic,
            counts: vec![0; cells],
            values: vec![0.0; cells],
        }
    }

    fn push(&mut self, cell: usize, v: f64) {
        match self.statistic {
            BinStatistic::Count => {}
            BinStatistic::Mean => self.values[cell] += v,
            BinStatistic::Min => {
                if self.counts[cell] == 0 || v < self.values[cell] {
                    self.values[cell] = v;
                }
            }
            BinStatistic::Max => {
                if self.counts[cell] == 0 || v > self.values[cell] {
                    self.values[cell] = v;
                }
            }
        }
        self.counts[cell] += 1;
    }

    fn finish(self) -> Vec<Option<f64>> {
        match self.statistic {
            BinStatistic::Count => self.counts.iter().map(|&c| Some(c as f64)).collect(),
            BinStatistic::Mean => self
                .counts
                .iter()
                .zip(&self.values)
                .map(|(&c, &s)| (c > 0).then(|| s / c as f64))
                .collect(),
            BinStatistic::Min | BinStatistic::Max => self
                .counts
                .iter()
                .zip(&self.values)
                .map(|(&c, &v)| (c > 0).then_some(v))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn unit_square_corners_fill_a_2x2_count_grid() {
        let x = [0.0, 1.0, 0.0, 1.0];
        let y = [0.0, 0.0, 1.0, 1.0];
        let v = [0.0; 4];

        let grid = bin2d(&x, &y, &v, (2, 2), BinStatistic::Count).unwrap();
        for iy in 0..2 {
            for ix in 0..2 {
                assert_eq!(Some(1.0), grid.value(ix, iy));
            }
        }
    }

    #[test]
    fn counts_sum_to_input_size() {
        let x: Vec<f64> = (0..37).map(|i| (i as f64 * 0.73).sin() * 50.0).collect();
        let y: Vec<f64> = (0..37).map(|i| (i as f64 * 1.19).cos() * 30.0).collect();
        let v = vec![0.0; 37];

        for bins in [(1, 1), (2, 3), (5, 5), (40, 40)] {
            let grid = bin2d(&x, &y, &v, bins, BinStatistic::Count).unwrap();
            let total: f64 = grid.cells.iter().map(|c| c.unwrap()).sum();
            assert_eq!(37.0, total, "bins = {bins:?}");
        }
    }

    #[test]
    fn point_at_max_edge_lands_in_last_cell() {
        let x = [0.0, 5.0, 10.0];
        let y = [0.0, 0.0, 0.0];
        let v = [1.0, 2.0, 3.0];

        let grid = bin2d(&x, &y, &v, (4, 1), BinStatistic::Count).unwrap();
        assert_eq!(Some(1.0), grid.value(3, 0));
        let total: f64 = grid.cells.iter().map(|c| c.unwrap()).sum();
        assert_eq!(3.0, total);
    }

    #[test]
    fn mean_min_max_aggregate_per_cell() {
        // Two points in the left cell, one in the right.
        let x = [0.0, 1.0, 10.0];
        let y = [0.0, 0.0, 0.0];
        let v = [2.0, 4.0, -7.0];

        let mean = bin2d(&x, &y, &v, (2, 1), BinStatistic::Mean).unwrap();
        assert_relative_eq!(mean.value(0, 0).unwrap(), 3.0);
        assert_relative_eq!(mean.value(1, 0).unwrap(), -7.0);

        let min = bin2d(&x, &y, &v, (2, 1), BinStatistic::Min).unwrap();
        assert_eq!(Some(2.0), min.value(0, 0));

        let max = bin2d(&x, &y, &v, (2, 1), BinStatistic::Max).unwrap();
        assert_eq!(Some(4.0), max.value(0, 0));
    }

    #[test]
    fn empty_cells_report_no_data() {
        let x = [0.0, 10.0];
        let y = [0.0, 10.0];
        let v = [1.0, 2.0];

        let grid = bin2d(&x, &y, &v, (2, 2), BinStatistic::Mean).unwrap();
        assert_eq!(Some(1.0), grid.value(0, 0));
        assert_eq!(Some(2.0), grid.value(1, 1));
        assert_eq!(None, grid.value(1, 0));
        assert_eq!(None, grid.value(0, 1));
    }

    #[test]
    fn degenerate_axis_collapses_to_first_cell() {
        let x = [3.0, 3.0, 3.0];
        let y = [0.0, 1.0, 2.0];
        let v = [1.0, 1.0, 1.0];

        let grid = bin2d(&x, &y, &v, (4, 2), BinStatistic::Count).unwrap();
        let total: f64 = grid.cells.iter().map(|c| c.unwrap()).sum();
        assert_eq!(3.0, total);
        assert_eq!(Some(1.0), grid.value(0, 0));
        assert_eq!(Some(2.0), grid.value(0, 1));
    }

    #[test]
    fn exposes_edges_and_centers() {
        let x = [0.0, 4.0];
        let y = [0.0, 2.0];
        let v = [0.0, 0.0];

        let grid = bin2d(&x, &y, &v, (4, 2), BinStatistic::Count).unwrap();
        assert_eq!(vec![0.0, 1.0, 2.0, 3.0, 4.0], grid.x_edges);
        assert_eq!(vec![0.5, 1.5, 2.5, 3.5], grid.x_centers());
        assert_eq!(vec![0.5, 1.5], grid.y_centers());
    }

    #[test]
    fn rejects_mismatched_and_degenerate_inputs() {
        assert_eq!(
            Err(QualityError::ShapeMismatch { left: 2, right: 1 }),
            bin2d(&[0.0, 1.0], &[0.0], &[0.0, 0.0], (2, 2), BinStatistic::Count)
        );
        assert!(matches!(
            bin2d(&[0.0], &[0.0], &[0.0], (0, 2), BinStatistic::Count),
            Err(QualityError::InvalidParameter(_))
        ));
        assert_eq!(
            Err(QualityError::EmptyInput),
            bin2d(&[], &[], &[], (2, 2), BinStatistic::Count)
        );
    }
}
