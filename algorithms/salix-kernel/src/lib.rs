//! ## Kernel methods
//!
//! Kernel methods are a class of algorithms for pattern analysis, whose best known member is the
//! [support vector machine](https://en.wikipedia.org/wiki/Support_vector_machine). They owe their
//! name to the kernel functions, which map the features to some higher-dimensional target space.
//! Common examples for kernel functions are the radial basis function or polynomial kernels.
//!
//! ## Current State
//!
//! salix-kernel currently provides dense kernel matrices for the linear, polynomial, RBF and
//! sigmoid kernels. The kernel matrix can be built from plain record matrices or whole datasets
//! through the `Transformer` trait, and single pairs of samples can be evaluated directly through
//! [`KernelMethod::distance`](enum.KernelMethod.html#method.distance).

use ndarray::prelude::*;
use ndarray::Data;
use std::ops::Mul;

use salix::{dataset::DatasetBase, dataset::Records, traits::Transformer, Float};

/// A dense kernel matrix together with the inner product that built it
///
/// The matrix is quadratic with one row and one column per sample of the data it was built
/// from, storing the inner product of every pair of samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel<F: Float> {
    /// The pairwise inner products with dimensionality (nsamples, nsamples)
    pub matrix: Array2<F>,
    /// The inner product that was used by the kernel
    pub method: KernelMethod<F>,
}

impl<F: Float> Kernel<F> {
    pub fn new(dataset: ArrayView2<F>, params: &KernelParams<F>) -> Kernel<F> {
        Kernel {
            matrix: dense_from_fn(&dataset, &params.method),
            method: params.method,
        }
    }

    /// Generates the default set of parameters for building a kernel.
    /// Use this to initialize a set of parameters to be customized using `KernelParams`'s methods
    pub fn params() -> KernelParams<F> {
        KernelParams {
            method: KernelMethod::Gaussian(F::cast(0.5)),
        }
    }

    /// Whether the kernel is a linear kernel
    pub fn is_linear(&self) -> bool {
        self.method.is_linear()
    }

    /// Performs the matrix product between the kernel matrix and the input
    ///
    /// ## Panics
    ///
    /// If the shapes of kernel and `rhs` are not compatible for multiplication
    pub fn dot(&self, rhs: &ArrayView2<F>) -> Array2<F> {
        self.matrix.dot(rhs)
    }

    /// Gives the size of the side of the square kernel matrix
    pub fn size(&self) -> usize {
        self.matrix.ncols()
    }

    /// Getter for the elements in the diagonal of the kernel matrix
    pub fn diagonal(&self) -> Array1<F> {
        self.matrix.diag().to_owned()
    }
}

impl<F: Float> Records for Kernel<F> {
    type Elem = F;

    fn nsamples(&self) -> usize {
        self.size()
    }

    fn nfeatures(&self) -> usize {
        self.size()
    }
}

/// The inner product definition used by a kernel.
///
/// There are four methods available:
///
/// - Linear: `d(x, x') = <x, x'>`
/// - Polynomial(constant, degree): `d(x, x') = (<x, x'> + constant)^(degree)`
/// - Gaussian(gamma): `d(x, x') = exp(-gamma * norm(x - x')^2)`
/// - Sigmoid(gamma, constant): `d(x, x') = tanh(gamma * <x, x'> + constant)`
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq)]
pub enum KernelMethod<F> {
    /// Euclidean inner product
    Linear,
    /// Polynomial(constant, degree): `(<x, x'> + constant)^(degree)`
    Polynomial(F, F),
    /// Gaussian(gamma): `exp(-gamma * norm(x - x')^2)`
    ///
    /// A `gamma` of zero degenerates to the constant one for every pair of samples.
    Gaussian(F),
    /// Sigmoid(gamma, constant): `tanh(gamma * <x, x'> + constant)`
    Sigmoid(F, F),
}

impl<F: Float> KernelMethod<F> {
    pub fn distance(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F {
        match *self {
            KernelMethod::Linear => a.mul(&b).sum(),
            KernelMethod::Polynomial(c, d) => (a.mul(&b).sum() + c).powf(d),
            KernelMethod::Gaussian(gamma) => {
                let distance = a
                    .iter()
                    .zip(b.iter())
                    .map(|(x, y)| (*x - *y) * (*x - *y))
                    .sum::<F>();

                (-gamma * distance).exp()
            }
            KernelMethod::Sigmoid(gamma, c) => (gamma * a.mul(&b).sum() + c).tanh(),
        }
    }

    pub fn is_linear(&self) -> bool {
        matches!(*self, KernelMethod::Linear)
    }
}

/// Defines the set of parameters needed to build a kernel
#[derive(Debug, Clone, PartialOrd, PartialEq)]
pub struct KernelParams<F> {
    /// The inner product used by the kernel
    method: KernelMethod<F>,
}

impl<F> KernelParams<F> {
    /// Setter for `method`, the inner product used by the kernel
    pub fn method(mut self, method: KernelMethod<F>) -> Self {
        self.method = method;
        self
    }
}

impl<F: Float> Transformer<&Array2<F>, Kernel<F>> for KernelParams<F> {
    /// Builds a kernel from the input data.
    ///
    /// ## Parameters
    ///
    /// - `x`: a matrix of records (#records, #features)
    ///
    /// ## Returns
    ///
    /// A kernel built from `x` according to the parameters on which this method is called
    fn transform(&self, x: &Array2<F>) -> Kernel<F> {
        Kernel::new(x.view(), self)
    }
}

impl<'a, F: Float> Transformer<ArrayView2<'a, F>, Kernel<F>> for KernelParams<F> {
    /// Builds a kernel from a view of the input data.
    ///
    /// ## Parameters
    ///
    /// - `x`: view of a matrix of records (#records, #features)
    ///
    /// ## Returns
    ///
    /// A kernel built from `x` according to the parameters on which this method is called
    fn transform(&self, x: ArrayView2<'a, F>) -> Kernel<F> {
        Kernel::new(x, self)
    }
}

impl<'a, F: Float> Transformer<&ArrayView2<'a, F>, Kernel<F>> for KernelParams<F> {
    /// Builds a kernel from a view of the input data.
    fn transform(&self, x: &ArrayView2<'a, F>) -> Kernel<F> {
        Kernel::new(*x, self)
    }
}

impl<F: Float, T> Transformer<DatasetBase<Array2<F>, T>, DatasetBase<Kernel<F>, T>>
    for KernelParams<F>
{
    /// Builds a new Dataset with the kernel as the records and the same targets as the input one.
    ///
    /// It takes ownership of the original dataset.
    ///
    /// ## Parameters
    ///
    /// - `x`: A dataset with a matrix of records (#records, #features) and any targets
    ///
    /// ## Returns
    ///
    /// A new dataset with:
    ///  - records: a kernel built from `x.records()` according to the parameters on which
    /// this method is called
    ///  - targets: same as `x.targets()`
    fn transform(&self, x: DatasetBase<Array2<F>, T>) -> DatasetBase<Kernel<F>, T> {
        let kernel = Kernel::new(x.records.view(), self);
        x.with_records(kernel)
    }
}

fn dense_from_fn<F: Float, D: Data<Elem = F>>(
    dataset: &ArrayBase<D, Ix2>,
    method: &KernelMethod<F>,
) -> Array2<F> {
    let n_observations = dataset.len_of(Axis(0));
    let mut similarity = Array2::eye(n_observations);

    for i in 0..n_observations {
        for j in 0..n_observations {
            let a = dataset.row(i);
            let b = dataset.row(j);

            similarity[(i, j)] = method.distance(a, b);
        }
    }

    similarity
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use salix::Dataset;
    use std::f64::consts;

    #[test]
    fn autotraits() {
        fn has_autotraits<T: Send + Sync + Sized + Unpin>() {}
        has_autotraits::<Kernel<f64>>();
        has_autotraits::<KernelMethod<f64>>();
        has_autotraits::<KernelParams<f64>>();
    }

    #[test]
    fn dense_from_fn_test() {
        // pts 0 & 1    pts 2 & 3    pts 4 & 5     pts 6 & 7
        // |0.| |0.1| _ |1.| |1.1| _ |2.| |2.1| _  |3.| |3.1|
        // |0.| |0.1|   |1.| |1.1|   |2.| |2.1|    |3.| |3.1|
        let input_mat = vec![
            0., 0., 0.1, 0.1, 1., 1., 1.1, 1.1, 2., 2., 2.1, 2.1, 3., 3., 3.1, 3.1,
        ];
        let input_arr = Array2::from_shape_vec((8, 2), input_mat).unwrap();
        let method: KernelMethod<f64> = KernelMethod::Linear;

        let similarity_matrix = dense_from_fn(&input_arr, &method);

        for i in 0..8 {
            for j in 0..8 {
                assert!(
                    (similarity_matrix.row(i)[j]
                        - method.distance(input_arr.row(i), input_arr.row(j)))
                    .abs()
                        <= f64::EPSILON
                );
            }
        }
    }

    #[test]
    fn gaussian_test() {
        let gauss_1 = KernelMethod::Gaussian(1.);

        let p1 = Array1::from_shape_vec(2, vec![0., 0.]).unwrap();
        let p2 = Array1::from_shape_vec(2, vec![0., 0.]).unwrap();
        let distance = gauss_1.distance(p1.view(), p2.view());
        let expected = 1.;

        assert!(((distance - expected) as f64).abs() <= f64::EPSILON);

        let p1 = Array1::from_shape_vec(2, vec![1., 1.]).unwrap();
        let p2 = Array1::from_shape_vec(2, vec![5., 5.]).unwrap();
        let distance = gauss_1.distance(p1.view(), p2.view());
        let expected = (consts::E).powf(-32.);
        // this fails with e^-31 or e^-33 so f64::EPSILON still holds
        assert!(((distance - expected) as f64).abs() <= f64::EPSILON);

        let gauss_10 = KernelMethod::Gaussian(10.);

        let p1 = Array1::from_shape_vec(2, vec![0., 0.]).unwrap();
        let p2 = Array1::from_shape_vec(2, vec![0., 0.]).unwrap();
        let distance = gauss_10.distance(p1.view(), p2.view());
        let expected = 1.;

        assert!(((distance - expected) as f64).abs() <= f64::EPSILON);

        let p1 = Array1::from_shape_vec(2, vec![1., 1.]).unwrap();
        let p2 = Array1::from_shape_vec(2, vec![2., 2.]).unwrap();
        let distance = gauss_10.distance(p1.view(), p2.view());
        let expected = (consts::E).powf(-20.);

        assert!(((distance - expected) as f64).abs() <= f64::EPSILON);
    }

    #[test]
    fn gaussian_zero_gamma_is_constant_one() {
        let gauss_0: KernelMethod<f64> = KernelMethod::Gaussian(0.);

        let p1 = Array1::from_shape_vec(2, vec![1., 1.]).unwrap();
        let p2 = Array1::from_shape_vec(2, vec![-40., 7.]).unwrap();
        assert_abs_diff_eq!(gauss_0.distance(p1.view(), p2.view()), 1.);

        let input_arr = Array2::from_shape_vec((3, 2), vec![0., 0., 1., 1., 5., -5.]).unwrap();
        let matrix = dense_from_fn(&input_arr, &gauss_0);
        assert_abs_diff_eq!(matrix, Array2::ones((3, 3)));
    }

    #[test]
    fn poly2_test() {
        let pol_0 = KernelMethod::Polynomial(0., 2.);

        let p1 = Array1::from_shape_vec(2, vec![0., 0.]).unwrap();
        let p2 = Array1::from_shape_vec(2, vec![0., 0.]).unwrap();
        let distance = pol_0.distance(p1.view(), p2.view());
        let expected = 0.;

        assert!(((distance - expected) as f64).abs() <= f64::EPSILON);

        let p1 = Array1::from_shape_vec(2, vec![1., 1.]).unwrap();
        let p2 = Array1::from_shape_vec(2, vec![5., 5.]).unwrap();
        let distance = pol_0.distance(p1.view(), p2.view());
        let expected = 100.;
        assert!(((distance - expected) as f64).abs() <= f64::EPSILON);

        let pol_2 = KernelMethod::Polynomial(2., 2.);

        let p1 = Array1::from_shape_vec(2, vec![0., 0.]).unwrap();
        let p2 = Array1::from_shape_vec(2, vec![0., 0.]).unwrap();
        let distance = pol_2.distance(p1.view(), p2.view());
        let expected = 4.;

        assert!(((distance - expected) as f64).abs() <= f64::EPSILON);

        let p1 = Array1::from_shape_vec(2, vec![1., 1.]).unwrap();
        let p2 = Array1::from_shape_vec(2, vec![2., 2.]).unwrap();
        let distance = pol_2.distance(p1.view(), p2.view());
        let expected = 36.;

        assert!(((distance - expected) as f64).abs() <= f64::EPSILON);
    }

    #[test]
    fn sigmoid_test() {
        let sig = KernelMethod::Sigmoid(0.5, 0.);

        let p1 = Array1::from_shape_vec(2, vec![1., 1.]).unwrap();
        let p2 = Array1::from_shape_vec(2, vec![2., 2.]).unwrap();
        let distance = sig.distance(p1.view(), p2.view());
        // tanh(0.5 * 4)
        assert_abs_diff_eq!(distance, 0.9640275800758169, epsilon = 1e-12);

        let sig_shifted = KernelMethod::Sigmoid(0.1, -1.);
        let distance = sig_shifted.distance(p1.view(), p2.view());
        // tanh(0.1 * 4 - 1)
        assert_abs_diff_eq!(distance, -0.5370495669980353, epsilon = 1e-12);

        let p0 = Array1::from_shape_vec(2, vec![0., 0.]).unwrap();
        let distance = sig.distance(p0.view(), p2.view());
        assert_abs_diff_eq!(distance, 0.);
    }

    #[test]
    fn all_methods_are_symmetric() {
        let methods: Vec<KernelMethod<f64>> = vec![
            KernelMethod::Linear,
            KernelMethod::Polynomial(1., 2.),
            KernelMethod::Gaussian(0.1),
            KernelMethod::Sigmoid(0.5, 1.),
        ];

        let input_arr = Array2::from_shape_vec(
            (4, 3),
            vec![0., 1., 2., -1., 0.5, 3., 2., 2., 2., -0.3, 0.7, -4.],
        )
        .unwrap();

        for method in methods {
            let matrix = dense_from_fn(&input_arr, &method);
            for i in 0..4 {
                for j in 0..4 {
                    assert_abs_diff_eq!(matrix[(i, j)], matrix[(j, i)], epsilon = 1e-12);
                    assert_abs_diff_eq!(
                        matrix[(i, j)],
                        method.distance(input_arr.row(i), input_arr.row(j)),
                        epsilon = 1e-12
                    );
                }
            }
        }
    }

    #[test]
    fn gaussian_self_similarity_is_one() {
        let input_arr =
            Array2::from_shape_vec((3, 2), vec![0., 0., 10., -3., 0.5, 0.5]).unwrap();
        let kernel = Kernel::params()
            .method(KernelMethod::Gaussian(2.5))
            .transform(input_arr.view());

        assert_abs_diff_eq!(kernel.diagonal(), Array1::ones(3));
    }

    #[test]
    fn test_kernel_transform_from_array2() {
        let input_vec: Vec<f64> = (0..100).map(|v| v as f64 * 0.1).collect();
        let input = Array2::from_shape_vec((50, 2), input_vec).unwrap();

        let methods = vec![
            KernelMethod::Linear,
            KernelMethod::Gaussian(0.1),
            KernelMethod::Polynomial(1., 2.),
            KernelMethod::Sigmoid(0.1, 0.),
        ];

        for method in methods {
            let kernel_ref = Kernel::new(input.view(), &Kernel::params().method(method));
            let kernel_tr = Kernel::params().method(method).transform(&input);

            assert_abs_diff_eq!(kernel_ref.matrix, kernel_tr.matrix, epsilon = 1e-12);
            assert_eq!(kernel_tr.size(), 50);
            assert_eq!(kernel_tr.nsamples(), 50);
        }
    }

    #[test]
    fn test_kernel_transform_from_dataset() {
        let input_vec: Vec<f64> = (0..100).map(|v| v as f64 * 0.1).collect();
        let input_arr = Array2::from_shape_vec((50, 2), input_vec).unwrap();
        let targets = Array1::from_elem(50, 1usize);
        let input = Dataset::from((input_arr.clone(), targets));

        let kernel_ref = Kernel::new(
            input_arr.view(),
            &Kernel::params().method(KernelMethod::Polynomial(0., 2.)),
        );
        let transformed = Kernel::params()
            .method(KernelMethod::Polynomial(0., 2.))
            .transform(input);

        assert_abs_diff_eq!(kernel_ref.matrix, transformed.records.matrix, epsilon = 1e-12);
        assert_eq!(transformed.targets().len(), 50);
    }

    #[test]
    fn test_kernel_dot() {
        let input_vec: Vec<f64> = (0..100).map(|v| v as f64 * 0.1).collect();
        let vec_to_multiply: Vec<f64> = (0..100).map(|v| v as f64 * 0.3).collect();
        let input_arr = Array2::from_shape_vec((10, 10), input_vec).unwrap();
        let to_multiply = Array2::from_shape_vec((10, 10), vec_to_multiply).unwrap();

        let mul_mat = dense_from_fn(&input_arr, &KernelMethod::Linear).dot(&to_multiply);
        let kernel = Kernel::params()
            .method(KernelMethod::Linear)
            .transform(input_arr.view());
        let mul_ker = kernel.dot(&to_multiply.view());

        assert_abs_diff_eq!(mul_mat, mul_ker, epsilon = 1e-9);
    }
}
