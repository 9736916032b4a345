//! Datasets
//!
//! This module implements the dataset struct and various helper traits to extend its
//! functionality.
use ndarray::{
    Array1, ArrayBase, ArrayView1, ArrayView2, OwnedRepr, Ix1, Ix2, ScalarOperand,
};

use num_traits::{AsPrimitive, FromPrimitive, NumAssignOps, NumCast, Signed};
use rand::distributions::uniform::SampleUniform;

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;
use std::iter::Sum;
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

mod impl_dataset;
mod impl_records;
mod impl_targets;

/// Floating point numbers
///
/// This trait bound multiplexes to the most common assumptions on floating point numbers and
/// implements them for 32bit and 64bit floating points. They are used in records of a dataset
/// and, for numeric classification targets, in the targets as well.
pub trait Float:
    FromPrimitive
    + num_traits::Float
    + PartialOrd
    + Sync
    + Send
    + Default
    + fmt::Display
    + fmt::Debug
    + Signed
    + Sum
    + NumAssignOps
    + AsPrimitive<usize>
    + for<'a> AddAssign<&'a Self>
    + for<'a> MulAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
    + for<'a> DivAssign<&'a Self>
    + num_traits::MulAdd<Output = Self>
    + SampleUniform
    + ScalarOperand
    + approx::AbsDiffEq
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}
impl Float for f64 {}

/// Discrete labels
///
/// Labels are countable, comparable and hashable. Currently null-type (no targets),
/// boolean (binary task) and usize, strings (multi-class tasks) are supported.
pub trait Label: PartialEq + Eq + Hash + Clone {}

impl Label for bool {}
impl Label for usize {}
impl Label for String {}
impl Label for () {}
impl Label for &str {}
impl Label for Option<usize> {}

/// DatasetBase
///
/// This is the fundamental structure of a dataset. It contains a number of records about the data
/// and may contain targets, weights and feature names. In order to keep the type complexity low
/// the dataset base is only generic over the records and targets and introduces a trait bound on
/// the records. `weights` and `feature_names`, on the other hand, are always assumed to be owned
/// and copied when views are created.
///
/// # Fields
///
/// * `records`: a two-dimensional matrix with dimensionality (nsamples, nfeatures), in case of
/// kernel methods a quadratic matrix with dimensionality (nsamples, nsamples)
/// * `targets`: a one-dimensional vector with dimensionality (nsamples)
/// * `weights`: optional weights for each sample with dimensionality (nsamples)
/// * `feature_names`: optional descriptive feature names with dimensionality (nfeatures)
///
/// # Trait bounds
///
/// * `R: Records`: generic over feature matrices or kernel matrices
/// * `T`: generic over any one-dimensional `ndarray` vector which can be used as targets. The
/// `AsSingleTargets` trait bound is omitted here to avoid some repetition in implementation
/// `src/dataset/impl_dataset.rs`
pub struct DatasetBase<R, T>
where
    R: Records,
{
    pub records: R,
    pub targets: T,

    pub weights: Array1<f32>,
    feature_names: Vec<String>,
}

/// Dataset
///
/// The most commonly used typed of dataset. It contains a number of records
/// stored as an `Array2` and a single target variable per record, stored as an
/// `Array1`.
pub type Dataset<D, E> = DatasetBase<ArrayBase<OwnedRepr<D>, Ix2>, ArrayBase<OwnedRepr<E>, Ix1>>;

/// DatasetView
///
/// A read only view of a Dataset
pub type DatasetView<'a, D, E> = DatasetBase<ArrayView2<'a, D>, ArrayView1<'a, E>>;

/// Record trait
pub trait Records: Sized {
    type Elem;

    fn nsamples(&self) -> usize;
    fn nfeatures(&self) -> usize;
}

/// Return a reference to the single target variable
pub trait AsSingleTargets {
    type Elem;

    /// Returns a view on the targets as a one-dimensional array
    fn as_single_targets(&self) -> ArrayView1<'_, Self::Elem>;
}

/// Get the labels in the targets
pub trait Labels {
    type Elem: Label;

    fn label_count(&self) -> HashMap<Self::Elem, usize>;

    fn label_set(&self) -> HashSet<Self::Elem> {
        self.label_count().into_keys().collect()
    }

    fn labels(&self) -> Vec<Self::Elem> {
        self.label_set().into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::param_guard::ParamGuard;
    use crate::traits::{Fit, Predict, PredictInplace};
    use ndarray::{array, Array1, Array2, ArrayView1, ArrayView2};
    use ndarray_rand::rand_distr::Uniform;
    use ndarray_rand::RandomExt;
    use thiserror::Error;

    #[test]
    fn dataset_implements_required_methods() {
        let mut dataset = Dataset::new(array![[1., 2.], [3., 4.]], array![0usize, 1]);

        assert_eq!(dataset.nsamples(), 2);
        assert_eq!(dataset.nfeatures(), 2);
        assert_eq!(dataset.as_single_targets(), array![0usize, 1]);
        assert_eq!(dataset.weights(), None);
        assert_eq!(
            dataset.feature_names(),
            vec!["feature-0".to_string(), "feature-1".to_string()]
        );

        dataset = dataset
            .with_feature_names(vec!["a", "b"])
            .with_weights(array![1., 2.]);

        assert_eq!(dataset.feature_names(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(dataset.weight_for(1), 2.);
        assert_eq!(dataset.weight_for(5), 1.);

        let view = dataset.view();
        assert_eq!(view.nsamples(), 2);
        assert_eq!(view.feature_names(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn dataset_from_random_records() {
        let records = Array2::random((50, 7), Uniform::new(-1., 1.));
        let targets = Array1::from_elem(50, 1usize);
        let dataset = Dataset::from((records, targets));

        assert_eq!(dataset.nsamples(), 50);
        assert_eq!(dataset.nfeatures(), 7);
        assert_eq!(dataset.view().nsamples(), 50);
    }

    #[test]
    fn label_counts_are_consistent() {
        let dataset = Dataset::from((
            array![[1., 2.], [2., 1.], [0., 0.], [2., 2.]],
            array![0usize, 1, 2, 2],
        ));

        let count = dataset.label_count();
        assert_eq!(count.get(&0), Some(&1));
        assert_eq!(count.get(&1), Some(&1));
        assert_eq!(count.get(&2), Some(&2));

        let mut labels = dataset.labels();
        labels.sort_unstable();
        assert_eq!(labels, vec![0, 1, 2]);
    }

    struct MockFittable {
        mock_var: usize,
    }

    struct MockFittableResult {
        mock_var: usize,
    }

    #[derive(Error, Debug)]
    enum MockError {
        #[error(transparent)]
        BaseCrate(#[from] Error),
    }

    impl<'a> Fit<ArrayView2<'a, f64>, ArrayView1<'a, f64>, MockError> for MockFittable {
        type Object = MockFittableResult;

        fn fit(
            &self,
            training_data: &DatasetView<f64, f64>,
        ) -> std::result::Result<Self::Object, MockError> {
            if self.mock_var == 0 {
                Err(MockError::BaseCrate(Error::Parameters("0".to_string())))
            } else {
                Ok(MockFittableResult {
                    mock_var: training_data.nsamples(),
                })
            }
        }
    }

    impl<'b> PredictInplace<ArrayView2<'b, f64>, Array1<f64>> for MockFittableResult {
        fn predict_inplace<'a>(&'a self, x: &'a ArrayView2<'b, f64>, y: &mut Array1<f64>) {
            assert_eq!(
                x.nrows(),
                y.len(),
                "The number of data points must match the number of output targets."
            );
            y.fill(self.mock_var as f64);
        }

        fn default_target(&self, x: &ArrayView2<'b, f64>) -> Array1<f64> {
            Array1::zeros(x.nrows())
        }
    }

    #[test]
    fn fit_and_predict_through_traits() -> std::result::Result<(), MockError> {
        let records = array![[1., 1.], [2., 2.], [3., 3.]];
        let targets = array![1., 2., 3.];
        let dataset = DatasetView::from((records.view(), targets.view()));

        let model = MockFittable { mock_var: 1 }.fit(&dataset)?;
        assert_eq!(model.mock_var, 3);

        let pred: Array1<f64> = model.predict(&dataset);
        assert_eq!(pred, array![3., 3., 3.]);

        Ok(())
    }

    struct MockParams(MockFittable);

    impl ParamGuard for MockParams {
        type Checked = MockFittable;
        type Error = Error;

        fn check_ref(&self) -> std::result::Result<&Self::Checked, Error> {
            if self.0.mock_var == 0 {
                Err(Error::Parameters("mock_var cannot be zero".to_string()))
            } else {
                Ok(&self.0)
            }
        }

        fn check(self) -> std::result::Result<Self::Checked, Error> {
            self.check_ref()?;
            Ok(self.0)
        }
    }

    #[test]
    fn param_check_is_performed_before_fit() {
        let records = array![[1., 1.], [2., 2.]];
        let targets = array![1., 2.];
        let dataset = DatasetView::from((records.view(), targets.view()));

        // the blanket impl routes `fit` through `check_ref` first
        let res: std::result::Result<MockFittableResult, MockError> =
            MockParams(MockFittable { mock_var: 0 }).fit(&dataset);
        assert!(matches!(
            res,
            Err(MockError::BaseCrate(Error::Parameters(_)))
        ));

        let model = MockParams(MockFittable { mock_var: 1 })
            .fit(&dataset)
            .unwrap();
        assert_eq!(model.mock_var, 2);
    }
}
