//! `salix` provides the common building blocks for a small collection of classical
//! supervised learning algorithms.
//!
//! Kin in spirit to Python's `scikit-learn`, it couples in-memory `ndarray` matrices
//! with a set of estimator traits, so every algorithm crate in the workspace exposes
//! the same `fit`/`predict` surface.
//!
//! ## Structure
//!
//! The base crate contains
//!
//! * [`DatasetBase`](struct.DatasetBase.html) and friends, pairing a record matrix with
//!   a target vector, optional sample weights and feature names
//! * the estimator traits [`Fit`](traits/trait.Fit.html),
//!   [`FitWith`](traits/trait.FitWith.html), [`Predict`](traits/trait.Predict.html) and
//!   [`Transformer`](traits/trait.Transformer.html)
//! * the [`ParamGuard`](trait.ParamGuard.html) checking step separating unchecked from
//!   validated hyperparameter sets
//!
//! The algorithms themselves live in the member crates of the workspace, currently
//! `salix-kernel` for kernel matrices, `salix-svm` for maximum-margin classification
//! and `salix-bayes` for the Naive Bayes family.

pub mod dataset;
pub mod error;
pub mod param_guard;
pub mod prelude;
pub mod traits;

pub use dataset::{Dataset, DatasetBase, DatasetView, Float, Label};
pub use error::Error;
pub use param_guard::ParamGuard;
