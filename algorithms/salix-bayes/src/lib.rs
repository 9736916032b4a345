//! # Naive Bayes
//!
//! `salix-bayes` provides pure Rust implementations of Naive Bayes classifiers.
//!
//! ## The Big Picture
//!
//! `salix-bayes` is a crate in the `salix` ecosystem, a collection of classical supervised
//! learning algorithms for Rust.
//!
//! ## Current state
//!
//! `salix-bayes` currently provides an implementation of the following methods:
//!
//! - Gaussian Naive Bayes ([GaussianNb])
//! - Multinomial Naive Bayes ([MultinomialNb])
//! - Bernoulli Naive Bayes ([BernoulliNb])
//!
//! All classifiers estimate one set of distribution parameters and one prior per distinct
//! label, where the parameters of a class are computed from the training records belonging
//! to that class alone. Class state is kept in maps ordered by label, so fitting and
//! prediction visit the classes in sorted order and ties in the posterior resolve to the
//! smallest label.
//!
//! ## Example
//!
//! ```rust
//! use salix::traits::{Fit, Predict};
//! use salix::DatasetView;
//! use salix_bayes::{GaussianNb, Result};
//! use ndarray::array;
//!
//! fn main() -> Result<()> {
//!     let x = array![
//!         [-2., -1.],
//!         [-1., -1.],
//!         [-1., -2.],
//!         [1., 1.],
//!         [1., 2.],
//!         [2., 1.]
//!     ];
//!     let y = array![1, 1, 1, 2, 2, 2];
//!
//!     let ds = DatasetView::new(x.view(), y.view());
//!     let model = GaussianNb::params().fit(&ds)?;
//!     let pred = model.predict(&x);
//!     assert_eq!(pred, y);
//!
//!     Ok(())
//! }
//! ```

mod base_nb;
mod bernoulli_nb;
mod error;
mod gaussian_nb;
mod hyperparams;
mod multinomial_nb;

pub use base_nb::NaiveBayes;
pub use bernoulli_nb::BernoulliNb;
pub use error::{NaiveBayesError, Result};
pub use gaussian_nb::GaussianNb;
pub use hyperparams::{
    BernoulliNbParams, BernoulliNbValidParams, GaussianNbParams, GaussianNbValidParams,
    MultinomialNbParams, MultinomialNbValidParams,
};
pub use multinomial_nb::MultinomialNb;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use salix::{Float, Label};

// Returns a subset of x corresponding to the class specified by the
// elements of y
fn filter<F: Float, L: Label + Ord>(x: ArrayView2<F>, y: ArrayView1<L>, elem: &L) -> Array2<F> {
    // We identify the row numbers corresponding to the class we are interested in
    let index = y
        .into_iter()
        .enumerate()
        .filter(|(_, y)| (*y == elem))
        .map(|(i, _)| i)
        .collect::<Vec<_>>();

    // We subset x to only records corresponding to the class represented in `elem`
    x.select(Axis(0), &index)
}

// Histogram of feature counts for one class, used by the discrete models
#[derive(Debug, Default, Clone, PartialEq)]
struct ClassHistogram<F> {
    class_count: usize,
    prior: F,
    feature_count: Array1<F>,
    feature_log_prob: Array1<F>,
}

impl<F: Float> ClassHistogram<F> {
    // Updates feature counts and log probabilities of the class from a new
    // batch of records, applying additive smoothing `alpha`. With
    // `dist_smoothing` the log probabilities are normalized by the smoothed
    // record count (Bernoulli), otherwise by the smoothed total feature
    // count (multinomial).
    fn update_with_smoothing(&mut self, x_new: ArrayView2<F>, alpha: F, dist_smoothing: bool) {
        if x_new.nrows() == 0 {
            return;
        }

        // unions current batch counts with previous state
        let feature_count_new = x_new.sum_axis(Axis(0));
        let feature_count = if self.class_count > 0 {
            feature_count_new + &self.feature_count
        } else {
            feature_count_new
        };

        // apply smoothing to the accumulated counts
        let feature_count_smoothed = feature_count.clone() + alpha;

        let count = if dist_smoothing {
            F::cast(self.class_count + x_new.nrows()) + alpha * F::cast(2)
        } else {
            feature_count_smoothed.sum()
        };

        // update the state
        self.feature_log_prob = feature_count_smoothed.mapv(|x| x.ln() - count.ln());
        self.feature_count = feature_count;
        self.class_count += x_new.nrows();
    }
}
