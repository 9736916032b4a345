use crate::solver_qp::SolverParams;
use crate::{Svm, SvmError};
use salix::{Float, ParamGuard};
use salix_kernel::{Kernel, KernelMethod, KernelParams};

/// A verified hyper-parameter set ready for the estimation of a hard-margin
/// support vector machine
///
/// See [`SvmParams`](crate::hyperparams::SvmParams) for more information.
#[derive(Debug, Clone, PartialEq)]
pub struct SvmValidParams<F: Float> {
    solver_params: SolverParams<F>,
    kernel: KernelParams<F>,
    support_threshold: F,
}

impl<F: Float> SvmValidParams<F> {
    pub fn solver_params(&self) -> &SolverParams<F> {
        &self.solver_params
    }

    pub fn kernel_params(&self) -> &KernelParams<F> {
        &self.kernel
    }

    pub fn support_threshold(&self) -> F {
        self.support_threshold
    }
}

/// Hyper-parameters of a hard-margin support vector machine
///
/// The penalty-free maximal-margin formulation has no regularization
/// constant, what remains are the kernel function applied to the records and
/// the knobs of the underlying quadratic program solver.
///
/// # Parameters
///
/// | Name | Default | Purpose |
/// | :--- | :--- | :--- |
/// | `eps` | `1e-7` | Solver tolerance on residuals and complementarity gap |
/// | `max_iterations` | `100` | Cap on interior-point iterations |
/// | `support_threshold` | `1e-4` | Dual weights above this count as support vectors |
/// | kernel | `Linear` | Kernel function evaluated on record pairs |
#[derive(Debug, Clone, PartialEq)]
pub struct SvmParams<F: Float>(SvmValidParams<F>);

impl<F: Float> SvmParams<F> {
    /// Create hyper parameter set
    ///
    /// This creates a `SvmParams` and sets it to the default values:
    ///  * eps of `1e-7`
    ///  * maximal `100` solver iterations
    ///  * support vector threshold of `1e-4`
    ///  * linear kernel
    pub fn new() -> Self {
        Self(SvmValidParams {
            solver_params: SolverParams {
                eps: F::cast(1e-7),
                max_iterations: 100,
            },
            kernel: Kernel::params().method(KernelMethod::Linear),
            support_threshold: F::cast(1e-4),
        })
    }

    /// Set the stopping condition of the solver
    pub fn eps(mut self, new_eps: F) -> Self {
        self.0.solver_params.eps = new_eps;
        self
    }

    /// Set the maximal number of interior-point iterations
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.0.solver_params.max_iterations = max_iterations;
        self
    }

    /// Set the dual weight threshold above which a sample becomes a support vector
    pub fn support_threshold(mut self, threshold: F) -> Self {
        self.0.support_threshold = threshold;
        self
    }

    /// Set the kernel to use for training
    pub fn with_kernel_params(mut self, kernel: KernelParams<F>) -> Self {
        self.0.kernel = kernel;
        self
    }

    /// Set the kernel to use for training
    ///
    /// This parameter specifies a mapping of input records to a new feature
    /// space by means of the distance function between any couple of points.
    pub fn gaussian_kernel(mut self, gamma: F) -> Self {
        self.0.kernel = Kernel::params().method(KernelMethod::Gaussian(gamma));
        self
    }

    /// Set the kernel to use for training
    ///
    /// This parameter specifies a mapping of input records to a new feature
    /// space by means of the distance function between any couple of points.
    pub fn polynomial_kernel(mut self, constant: F, degree: F) -> Self {
        self.0.kernel = Kernel::params().method(KernelMethod::Polynomial(constant, degree));
        self
    }

    /// Set the kernel to use for training
    ///
    /// This parameter specifies a mapping of input records to a new feature
    /// space by means of the distance function between any couple of points.
    pub fn sigmoid_kernel(mut self, gamma: F, constant: F) -> Self {
        self.0.kernel = Kernel::params().method(KernelMethod::Sigmoid(gamma, constant));
        self
    }

    /// Use the linear kernel for training
    pub fn linear_kernel(mut self) -> Self {
        self.0.kernel = Kernel::params().method(KernelMethod::Linear);
        self
    }
}

impl<F: Float> Default for SvmParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> Svm<F> {
    /// Create hyper parameter set
    pub fn params() -> SvmParams<F> {
        SvmParams::new()
    }
}

impl<F: Float> ParamGuard for SvmParams<F> {
    type Checked = SvmValidParams<F>;
    type Error = SvmError;

    fn check_ref(&self) -> Result<&Self::Checked, Self::Error> {
        let eps = self.0.solver_params.eps;
        if eps <= F::zero() || eps.is_nan() || eps.is_infinite() {
            return Err(SvmError::InvalidEps(eps.to_f32().unwrap()));
        }
        if self.0.solver_params.max_iterations == 0 {
            return Err(SvmError::InvalidMaxIterations);
        }
        let threshold = self.0.support_threshold;
        if threshold.is_negative() || threshold.is_nan() {
            return Err(SvmError::InvalidSupportThreshold(threshold.to_f32().unwrap()));
        }
        Ok(&self.0)
    }

    fn check(self) -> Result<Self::Checked, Self::Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}
