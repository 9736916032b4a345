use crate::error::{NaiveBayesError, Result};
use salix::{Float, ParamGuard};
use std::marker::PhantomData;

/// A verified hyper-parameter set ready for the estimation of a
/// [Gaussian Naive Bayes model](crate::gaussian_nb::GaussianNb).
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianNbValidParams<F, L> {
    // Required for calculation stability
    var_smoothing: F,
    // Phantom data for label type
    label: PhantomData<L>,
}

impl<F: Float, L> GaussianNbValidParams<F, L> {
    /// Get the variance smoothing
    pub fn var_smoothing(&self) -> F {
        self.var_smoothing
    }
}

/// A hyper-parameter set during construction
///
/// The parameter set can be verified into a
/// [`GaussianNbValidParams`](crate::hyperparams::GaussianNbValidParams) by calling
/// [ParamGuard::check](Self::check). It is also possible to directly fit a model with
/// [Fit::fit](salix::traits::Fit::fit) or
/// [FitWith::fit_with](salix::traits::FitWith::fit_with) which implicitly verifies the parameter set
/// prior to the model estimation and forwards any error.
///
/// # Parameters
/// | Name | Default | Purpose | Range |
/// | :--- | :--- | :---| :--- |
/// | var_smoothing | `1e-9` | Stabilize variance calculation if ratios are too small in update step | `[0, inf)` |
///
/// # Errors
///
/// The following errors can come from invalid hyper-parameters:
///
/// Returns [`InvalidSmoothing`](NaiveBayesError::InvalidSmoothing) if the smoothing
/// parameter is negative.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianNbParams<F, L>(GaussianNbValidParams<F, L>);

impl<F: Float, L> Default for GaussianNbParams<F, L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float, L> GaussianNbParams<F, L> {
    /// Create new [GaussianNbParams] set with default values for its parameters
    pub fn new() -> Self {
        Self(GaussianNbValidParams {
            var_smoothing: F::cast(1e-9),
            label: PhantomData,
        })
    }

    /// Specifies the portion of the largest variance of all the features that
    /// is added to the variance for calculation stability
    pub fn var_smoothing(mut self, var_smoothing: F) -> Self {
        self.0.var_smoothing = var_smoothing;
        self
    }
}

impl<F: Float, L> ParamGuard for GaussianNbParams<F, L> {
    type Checked = GaussianNbValidParams<F, L>;
    type Error = NaiveBayesError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.var_smoothing.is_negative() || self.0.var_smoothing.is_nan() {
            Err(NaiveBayesError::InvalidSmoothing(
                self.0.var_smoothing.to_f64().unwrap(),
            ))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

/// A verified hyper-parameter set ready for the estimation of a
/// [Multinomial Naive Bayes model](crate::multinomial_nb::MultinomialNb).
#[derive(Debug, Clone, PartialEq)]
pub struct MultinomialNbValidParams<F, L> {
    // Smoothing parameter
    alpha: F,
    // Phantom data for label type
    label: PhantomData<L>,
}

impl<F: Float, L> MultinomialNbValidParams<F, L> {
    /// Get the smoothing parameter
    pub fn alpha(&self) -> F {
        self.alpha
    }
}

/// A hyper-parameter set during construction
///
/// The parameter set can be verified into a
/// [`MultinomialNbValidParams`](crate::hyperparams::MultinomialNbValidParams) by calling
/// [ParamGuard::check](Self::check). It is also possible to directly fit a model with
/// [Fit::fit](salix::traits::Fit::fit) or
/// [FitWith::fit_with](salix::traits::FitWith::fit_with) which implicitly verifies the parameter set
/// prior to the model estimation and forwards any error.
///
/// # Parameters
/// | Name | Default | Purpose | Range |
/// | :--- | :--- | :---| :--- |
/// | alpha | `1` | Additive (Lidstone/Laplace) smoothing applied to the feature counts | `[0, inf)` |
///
/// # Errors
///
/// The following errors can come from invalid hyper-parameters:
///
/// Returns [`InvalidSmoothing`](NaiveBayesError::InvalidSmoothing) if the smoothing
/// parameter is negative.
#[derive(Debug, Clone, PartialEq)]
pub struct MultinomialNbParams<F, L>(MultinomialNbValidParams<F, L>);

impl<F: Float, L> Default for MultinomialNbParams<F, L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float, L> MultinomialNbParams<F, L> {
    /// Create new [MultinomialNbParams] set with default values for its parameters
    pub fn new() -> Self {
        Self(MultinomialNbValidParams {
            alpha: F::one(),
            label: PhantomData,
        })
    }

    /// Specifies the amount of additive smoothing applied to the feature counts
    pub fn alpha(mut self, alpha: F) -> Self {
        self.0.alpha = alpha;
        self
    }
}

impl<F: Float, L> ParamGuard for MultinomialNbParams<F, L> {
    type Checked = MultinomialNbValidParams<F, L>;
    type Error = NaiveBayesError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.alpha.is_negative() || self.0.alpha.is_nan() {
            Err(NaiveBayesError::InvalidSmoothing(
                self.0.alpha.to_f64().unwrap(),
            ))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

/// A verified hyper-parameter set ready for the estimation of a
/// [Bernoulli Naive Bayes model](crate::bernoulli_nb::BernoulliNb).
#[derive(Debug, Clone, PartialEq)]
pub struct BernoulliNbValidParams<F, L> {
    // Smoothing parameter
    alpha: F,
    // Threshold for binarization
    binarize: Option<F>,
    // Phantom data for label type
    label: PhantomData<L>,
}

impl<F: Float, L> BernoulliNbValidParams<F, L> {
    /// Get the smoothing parameter
    pub fn alpha(&self) -> F {
        self.alpha
    }

    /// Get the binarization threshold
    pub fn binarize(&self) -> Option<F> {
        self.binarize
    }
}

/// A hyper-parameter set during construction
///
/// The parameter set can be verified into a
/// [`BernoulliNbValidParams`](crate::hyperparams::BernoulliNbValidParams) by calling
/// [ParamGuard::check](Self::check). It is also possible to directly fit a model with
/// [Fit::fit](salix::traits::Fit::fit) or
/// [FitWith::fit_with](salix::traits::FitWith::fit_with) which implicitly verifies the parameter set
/// prior to the model estimation and forwards any error.
///
/// # Parameters
/// | Name | Default | Purpose | Range |
/// | :--- | :--- | :---| :--- |
/// | alpha | `1` | Additive (Lidstone/Laplace) smoothing applied to the feature counts | `[0, inf)` |
/// | binarize | `Some(0.0)` | Threshold mapping features to booleans, `None` leaves the input untouched | `(-inf, inf)` |
///
/// # Errors
///
/// The following errors can come from invalid hyper-parameters:
///
/// Returns [`InvalidSmoothing`](NaiveBayesError::InvalidSmoothing) if the smoothing
/// parameter is negative.
#[derive(Debug, Clone, PartialEq)]
pub struct BernoulliNbParams<F, L>(BernoulliNbValidParams<F, L>);

impl<F: Float, L> Default for BernoulliNbParams<F, L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float, L> BernoulliNbParams<F, L> {
    /// Create new [BernoulliNbParams] set with default values for its parameters
    pub fn new() -> Self {
        Self(BernoulliNbValidParams {
            alpha: F::one(),
            binarize: Some(F::zero()),
            label: PhantomData,
        })
    }

    /// Specifies the amount of additive smoothing applied to the feature counts
    pub fn alpha(mut self, alpha: F) -> Self {
        self.0.alpha = alpha;
        self
    }

    /// Specifies the binarization threshold, `None` disables binarization
    pub fn binarize(mut self, threshold: Option<F>) -> Self {
        self.0.binarize = threshold;
        self
    }
}

impl<F: Float, L> ParamGuard for BernoulliNbParams<F, L> {
    type Checked = BernoulliNbValidParams<F, L>;
    type Error = NaiveBayesError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.alpha.is_negative() || self.0.alpha.is_nan() {
            Err(NaiveBayesError::InvalidSmoothing(
                self.0.alpha.to_f64().unwrap(),
            ))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{BernoulliNbParams, GaussianNbParams, MultinomialNbParams};
    use crate::error::NaiveBayesError;
    use salix::ParamGuard;

    #[test]
    fn default_params_pass_the_check() {
        GaussianNbParams::<f64, usize>::new().check().unwrap();
        MultinomialNbParams::<f64, usize>::new().check().unwrap();
        BernoulliNbParams::<f64, usize>::new().check().unwrap();
    }

    #[test]
    fn negative_smoothing_is_rejected() {
        let checked = GaussianNbParams::<f64, usize>::new()
            .var_smoothing(-1e-3)
            .check();
        assert!(matches!(checked, Err(NaiveBayesError::InvalidSmoothing(_))));

        let checked = MultinomialNbParams::<f64, usize>::new().alpha(-1.0).check();
        assert!(matches!(checked, Err(NaiveBayesError::InvalidSmoothing(_))));

        let checked = BernoulliNbParams::<f64, usize>::new().alpha(-1.0).check();
        assert!(matches!(checked, Err(NaiveBayesError::InvalidSmoothing(_))));
    }

    #[test]
    fn nan_smoothing_is_rejected() {
        let checked = GaussianNbParams::<f64, usize>::new()
            .var_smoothing(f64::NAN)
            .check();
        assert!(matches!(checked, Err(NaiveBayesError::InvalidSmoothing(_))));
    }
}
