//! Tie-point correspondences between a rectified image pair.
//!
//! A correspondence pairs one pixel in the left epipolar image with one in
//! the right. After rectification, corresponding points share a row up to a
//! residual vertical offset (the epipolar error), and their horizontal
//! offset is the disparity.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::QualityError;

/// One matched point pair in rectified epipolar geometry.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Correspondence {
    /// Pixel position in the left epipolar image.
    pub left: Point2<f64>,
    /// Pixel position in the right epipolar image.
    pub right: Point2<f64>,
}

impl Correspondence {
    pub fn new(x_left: f64, y_left: f64, x_right: f64, y_right: f64) -> Self {
        Self {
            left: Point2::new(x_left, y_left),
            right: Point2::new(x_right, y_right),
        }
    }

    /// Residual vertical offset after rectification (`y_left - y_right`).
    #[inline]
    pub fn epipolar_error(&self) -> f64 {
        self.left.y - self.right.y
    }

    /// Horizontal offset between the two images (`x_right - x_left`).
    #[inline]
    pub fn disparity(&self) -> f64 {
        self.right.x - self.left.x
    }
}

/// Ordered collection of correspondences for one image pair.
///
/// Order carries no meaning but is preserved so repeated analyses of the
/// same input reproduce bit-identical results. A typical analysis works
/// with two independent sets: the matcher's raw output and the set after
/// right-grid correction; they may differ in length.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrespondenceSet {
    matches: Vec<Correspondence>,
}

impl CorrespondenceSet {
    pub fn new(matches: Vec<Correspondence>) -> Self {
        Self { matches }
    }

    /// Build from the four parallel columns of a match manifest
    /// (`x_left, y_left, x_right, y_right`).
    pub fn from_columns(
        x_left: &[f64],
        y_left: &[f64],
        x_right: &[f64],
        y_right: &[f64],
    ) -> Result<Self, QualityError> {
        for col in [y_left, x_right, y_right] {
            if col.len() != x_left.len() {
                return Err(QualityError::ShapeMismatch {
                    left: x_left.len(),
                    right: col.len(),
                });
            }
        }

        let matches = (0..x_left.len())
            .map(|i| Correspondence::new(x_left[i], y_left[i], x_right[i], y_right[i]))
            .collect();
        Ok(Self { matches })
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Correspondence> {
        self.matches.iter()
    }

    pub fn as_slice(&self) -> &[Correspondence] {
        &self.matches
    }

    /// Epipolar-error signal, one value per correspondence in input order.
    pub fn epipolar_errors(&self) -> Vec<f64> {
        self.matches.iter().map(|m| m.epipolar_error()).collect()
    }

    /// Disparity signal, one value per correspondence in input order.
    pub fn disparities(&self) -> Vec<f64> {
        self.matches.iter().map(|m| m.disparity()).collect()
    }

    /// Left-image x coordinates, in input order.
    pub fn x_left(&self) -> Vec<f64> {
        self.matches.iter().map(|m| m.left.x).collect()
    }

    /// Left-image y coordinates, in input order.
    pub fn y_left(&self) -> Vec<f64> {
        self.matches.iter().map(|m| m.left.y).collect()
    }
}

impl FromIterator<Correspondence> for CorrespondenceSet {
    fn from_iter<T: IntoIterator<Item = Correspondence>>(iter: T) -> Self {
        Self {
            matches: iter.into_iter().collect(),
        }
    }
}
