use thiserror::Error;

use crate::solver_qp::QpStatus;

/// Simplified `Result` using [`SvmError`](crate::SvmError) as error type
pub type Result<T> = std::result::Result<T, SvmError>;

/// Error variants from hyper-parameter construction or model estimation
#[derive(Error, Debug, Clone)]
pub enum SvmError {
    /// The solver tolerance must be positive and finite
    #[error("invalid eps {0}")]
    InvalidEps(f32),
    /// The solver iteration cap must be positive
    #[error("the maximal number of solver iterations must be positive")]
    InvalidMaxIterations,
    /// The support vector threshold must be non-negative
    #[error("invalid support vector threshold {0}")]
    InvalidSupportThreshold(f32),
    /// Classification targets carry the class in their sign
    #[error("invalid label {0}, expected -1 or +1")]
    InvalidLabel(f32),
    /// The dual problem could not be solved to optimality
    #[error("training diverged, the quadratic program finished with status {0}")]
    TrainingDiverged(QpStatus),
    /// The training data admits no meaningful maximal-margin hyperplane
    #[error("degenerate training input: {0}")]
    NumericDegeneracy(String),
    #[error(transparent)]
    BaseCrate(#[from] salix::error::Error),
}
