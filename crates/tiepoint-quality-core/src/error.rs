/// Errors shared by the quality-assessment crates.
///
/// Every failure here is a caller contract violation detected eagerly at
/// the start of an operation; there is no partial-result mode.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum QualityError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("parallel sequences differ in length ({left} vs {right})")]
    ShapeMismatch { left: usize, right: usize },
    #[error("empty input where a non-empty signal is required")]
    EmptyInput,
}
