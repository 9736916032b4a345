//! Hard-margin classification
//!
//! This module ties the pieces together: the targets are validated, the
//! kernel matrix is evaluated on the training records, the dual problem is
//! assembled and handed to the quadratic program solver and the support
//! vectors are read off the dual weights.
use ndarray::{Array1, Array2, ArrayBase, ArrayView1, ArrayView2, Axis, Data, Ix1, Ix2};

use salix::dataset::{AsSingleTargets, DatasetBase};
use salix::traits::{Fit, Predict, PredictInplace, Transformer};
use salix::Float;
use salix_kernel::Kernel;

use super::error::{Result, SvmError};
use super::hyperparams::SvmValidParams;
use super::solver_qp::{solve_qp, QpProblem, QpStatus};
use super::{SeparatingHyperplane, Svm};

/// Fit a maximal-margin classifier on perfectly separable data
///
/// The dual of the hard-margin problem is the quadratic program
/// ```ignore
/// min_a 1/2 a^T Q a - e^T a
/// s.t.  y^T a = 0, a_i >= 0
/// ```
/// with `Q_ij = y_i y_j K(x_i, x_j)`. Samples whose dual weight ends up above
/// the support threshold are the support vectors, every other weight belongs
/// to an interior point and is discarded. The offset is recovered from the
/// margin equality `y_s = w(x_s) + b` of the support vectors, averaged over
/// all of them.
///
/// When the data cannot be separated under the chosen kernel the dual
/// objective is unbounded below and the solver status surfaces as a
/// [`TrainingDiverged`](SvmError::TrainingDiverged) error.
pub fn fit_hard_margin<F: Float>(
    params: &SvmValidParams<F>,
    dataset: ArrayView2<F>,
    kernel: Kernel<F>,
    targets: ArrayView1<F>,
) -> Result<Svm<F>> {
    let nsamples = dataset.nrows();

    if nsamples == 0 || dataset.ncols() == 0 {
        return Err(SvmError::NumericDegeneracy(
            "training set has no samples or no features".to_string(),
        ));
    }

    for target in targets.iter() {
        if *target != F::one() && *target != -F::one() {
            return Err(SvmError::InvalidLabel(target.to_f32().unwrap()));
        }
    }

    let mut p = Array2::zeros((nsamples, nsamples));
    for i in 0..nsamples {
        for j in 0..nsamples {
            p[(i, j)] = targets[i] * targets[j] * kernel.matrix[(i, j)];
        }
    }

    let problem = QpProblem {
        p,
        q: Array1::from_elem(nsamples, -F::one()),
        g: Array2::eye(nsamples) * -F::one(),
        h: Array1::zeros(nsamples),
        a: targets.to_owned().insert_axis(Axis(0)),
        b: Array1::zeros(1),
    };

    let solution = solve_qp(&problem, params.solver_params());
    if solution.status != QpStatus::Optimal {
        return Err(SvmError::TrainingDiverged(solution.status));
    }

    let threshold = params.support_threshold();
    let support = (0..nsamples)
        .filter(|&i| solution.x[i] > threshold)
        .collect::<Vec<_>>();
    if support.is_empty() {
        return Err(SvmError::NumericDegeneracy(
            "no dual weight exceeds the support threshold".to_string(),
        ));
    }

    // fold the target sign into the dual weight of every support vector
    let alpha = support
        .iter()
        .map(|&i| solution.x[i] * targets[i])
        .collect::<Vec<_>>();

    // margin equality of each support vector, averaged for stability
    let mut rho = F::zero();
    for &sample in support.iter() {
        let mut dec = F::zero();
        for (&sv, a) in support.iter().zip(alpha.iter()) {
            dec += *a * kernel.matrix[(sv, sample)];
        }
        rho += dec - targets[sample];
    }
    rho /= F::cast(support.len());

    let sep_hyperplane = if kernel.is_linear() {
        let mut weights = Array1::zeros(dataset.ncols());
        for (&i, a) in support.iter().zip(alpha.iter()) {
            weights.scaled_add(*a, &dataset.row(i));
        }
        SeparatingHyperplane::Linear(weights)
    } else {
        let mut supp_vecs = Array2::zeros((support.len(), dataset.ncols()));
        for (mut row, &i) in supp_vecs.outer_iter_mut().zip(support.iter()) {
            row.assign(&dataset.row(i));
        }
        SeparatingHyperplane::WeightedCombination(supp_vecs)
    };

    log::debug!(
        "fitted maximal-margin hyperplane with {} support vectors in {} iterations",
        support.len(),
        solution.iterations
    );

    Ok(Svm {
        alpha,
        rho,
        iterations: solution.iterations,
        obj: solution.objective,
        kernel_method: kernel.method,
        sep_hyperplane,
    })
}

impl<F: Float, D: Data<Elem = F>, T: AsSingleTargets<Elem = F>> Fit<ArrayBase<D, Ix2>, T, SvmError>
    for SvmValidParams<F>
{
    type Object = Svm<F>;

    /// Fit a maximal-margin classifier on `+1`/`-1` labeled data
    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Self::Object> {
        let kernel = self.kernel_params().transform(dataset.records().view());
        fit_hard_margin(
            self,
            dataset.records().view(),
            kernel,
            dataset.as_single_targets(),
        )
    }
}

/// Predict a probability with a feature vector
impl<F: Float, D: Data<Elem = F>> Predict<ArrayBase<D, Ix1>, F> for Svm<F> {
    fn predict(&self, data: ArrayBase<D, Ix1>) -> F {
        let val = self.weighted_sum(&data) - self.rho;
        // a sample on the decision boundary belongs to the positive class
        if val >= F::zero() {
            F::one()
        } else {
            -F::one()
        }
    }
}

/// Classify observations
///
/// This function takes a number of features and predicts target classes,
/// which are `+1` or `-1`.
impl<F: Float, D: Data<Elem = F>> PredictInplace<ArrayBase<D, Ix2>, Array1<F>> for Svm<F> {
    fn predict_inplace(&self, data: &ArrayBase<D, Ix2>, targets: &mut Array1<F>) {
        assert_eq!(
            data.nrows(),
            targets.len(),
            "The number of data points must match the number of output targets."
        );

        for (data, target) in data.outer_iter().zip(targets.iter_mut()) {
            let val = self.weighted_sum(&data) - self.rho;
            *target = if val >= F::zero() { F::one() } else { -F::one() };
        }
    }

    fn default_target(&self, data: &ArrayBase<D, Ix2>) -> Array1<F> {
        Array1::zeros(data.nrows())
    }
}
