//! # Support Vector Machines
//!
//! Support Vector Machines are a major branch of machine learning models and offer classification
//! of labeled datasets. They seek a discriminant which separates the data with the widest possible
//! margin between the positive and the negative class. A support vector lies on the margin,
//! contributes to the discriminant and is therefore important for the classification task. This
//! crate implements the hard-margin flavor of the model: the training data has to be perfectly
//! separable under the chosen kernel and no penalty term softens the margin.
//!
//! More details can be found [here](https://en.wikipedia.org/wiki/Support_vector_machine)
//!
//! ## Kernel Methods
//! Normally the resulting discriminant is linear, but with [Kernel Methods](https://en.wikipedia.org/wiki/Kernel_method)
//! non-linear relations between the input features can be learned in order to improve the
//! performance of the model.
//!
//! For example to learn with a radial basis function kernel you can select it in the
//! hyper-parameter set:
//! ```rust, ignore
//! let model = Svm::params()
//!     .gaussian_kernel(30.0)
//!     .fit(&train)?;
//! ```
//!
//! # The solver
//! Training is phrased as the dual problem of the maximal-margin formulation, a convex quadratic
//! program over one dual weight per training sample:
//!
//! 1. Assemble the quadratic term from the target signs and the kernel matrix
//! 2. Hand the program to the interior-point solver in [`solver_qp`](crate::solver_qp)
//! 3. Read the support vectors off the dual weights and recover the hyperplane
//!
//! The solver reports whether it reached an optimal point. Every other outcome, for example an
//! unbounded objective on data that no hyperplane can separate, surfaces as a
//! [`TrainingDiverged`](SvmError::TrainingDiverged) error instead of a model.
//!
//! # Example
//! Four points in the plane, split along the first coordinate:
//! ```rust
//! use salix::prelude::*;
//! use salix_svm::Svm;
//! use ndarray::array;
//!
//! let records = array![[0.0f64, 0.], [0., 1.], [1., 0.], [1., 1.]];
//! let targets = array![-1.0f64, -1., 1., 1.];
//! let train = Dataset::new(records, targets);
//!
//! let model = Svm::params().fit(&train).unwrap();
//! let pred = model.predict(&train);
//! # assert_eq!(pred, *train.targets());
//! ```
use salix::Float;
use ndarray::{Array1, Array2, ArrayBase, ArrayView1, Data, Ix1};

use std::fmt;
use std::ops::Mul;

mod classification;
pub mod error;
pub mod hyperparams;
pub mod solver_qp;

pub use error::{Result, SvmError};
pub use hyperparams::{SvmParams, SvmValidParams};
use salix_kernel::KernelMethod;
pub use solver_qp::{QpProblem, QpSolution, QpStatus, SolverParams};

/// The discriminant recovered from the dual solution
///
/// With a linear kernel the support vector expansion collapses into a single weight vector over
/// the features. For every other kernel the support vectors themselves have to be retained and the
/// decision function evaluates the kernel against each of them.
#[derive(Clone, Debug, PartialEq)]
pub enum SeparatingHyperplane<F: Float> {
    Linear(Array1<F>),
    WeightedCombination(Array2<F>),
}

/// Fitted Support Vector Machines model
///
/// This is the optimal point of the dual problem and contains the support vectors, the quality of
/// the solution and optionally the linear hyperplane.
pub struct Svm<F: Float> {
    /// Signed dual weight of every support vector
    pub alpha: Vec<F>,
    /// Offset of the decision function
    pub rho: F,
    iterations: usize,
    obj: F,
    // the only thing I need the kernel for after the training is to
    // compute the distances, but for that I only need the kernel method
    // and not the whole inner matrix
    kernel_method: KernelMethod<F>,
    sep_hyperplane: SeparatingHyperplane<F>,
}

impl<F: Float> Svm<F> {
    /// Returns the number of support vectors
    ///
    /// Only samples whose dual weight exceeded the support threshold during training are retained
    /// in the model.
    pub fn nsupport(&self) -> usize {
        self.alpha.len()
    }

    /// Returns the offset `b` of the decision function
    ///
    /// The offset satisfies `b = y_s - w(x_s)` for every support vector `s`, with `w` the
    /// weighted sum of the kernel against the support vectors. It is estimated as the average
    /// over all of them.
    pub fn intercept(&self) -> F {
        -self.rho
    }

    /// Returns the hyperplane normal when the model was trained with a linear kernel
    pub fn weights(&self) -> Option<ArrayView1<'_, F>> {
        match self.sep_hyperplane {
            SeparatingHyperplane::Linear(ref weights) => Some(weights.view()),
            SeparatingHyperplane::WeightedCombination(_) => None,
        }
    }

    /// Sums the inner product of `sample` and every one of the support vectors.
    ///
    /// ## Parameters
    ///
    /// * `sample`: the input sample
    ///
    /// ## Returns
    ///
    /// The sum of all inner products of `sample` and every one of the support vectors, scaled by
    /// their dual weight.
    ///
    /// ## Panics
    ///
    /// If the shape of `sample` is not compatible with the shape of the support vectors
    pub fn weighted_sum<D: Data<Elem = F>>(&self, sample: &ArrayBase<D, Ix1>) -> F {
        match self.sep_hyperplane {
            SeparatingHyperplane::Linear(ref x) => x.mul(sample).sum(),
            SeparatingHyperplane::WeightedCombination(ref supp_vecs) => supp_vecs
                .outer_iter()
                .zip(self.alpha.iter())
                .map(|(x, a)| self.kernel_method.distance(x, sample.view()) * *a)
                .sum(),
        }
    }
}

/// Display solution
///
/// In order to understand the solution of the dual problem the objective, number of iterations and
/// required support vectors are printed here.
impl<F: Float> fmt::Display for Svm<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Exited after {} iterations with obj = {} and {} support vectors",
            self.iterations,
            self.obj,
            self.nsupport()
        )
    }
}
