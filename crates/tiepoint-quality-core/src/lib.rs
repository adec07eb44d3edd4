//! Core types for tie-point quality assessment in rectified stereo pairs.
//!
//! This crate is intentionally small and purely numeric. It does *not*
//! depend on any concrete feature matcher or image type: inputs arrive as
//! already-matched pixel coordinates.

mod correspondence;
mod error;
mod logger;

pub use correspondence::{Correspondence, CorrespondenceSet};
pub use error::QualityError;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
