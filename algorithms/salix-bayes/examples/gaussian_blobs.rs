use ndarray::{concatenate, Array1, Array2, Axis};
use ndarray_rand::rand::SeedableRng;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand_xoshiro::Xoshiro256Plus;
use salix::prelude::*;
use salix_bayes::{GaussianNb, Result};

fn main() -> Result<()> {
    let mut rng = Xoshiro256Plus::seed_from_u64(42);

    // two groups of points, well separated along both features
    let records = concatenate(
        Axis(0),
        &[
            Array2::random_using((20, 2), Uniform::new(-1., -0.5), &mut rng).view(),
            Array2::random_using((20, 2), Uniform::new(0.5, 1.), &mut rng).view(),
        ],
    )
    .unwrap();
    let targets = (0..40)
        .map(|i| if i < 20 { 0 } else { 1 })
        .collect::<Array1<usize>>();
    let dataset = Dataset::new(records, targets);

    println!(
        "Fit Gaussian Naive Bayes classifier with #{} training points",
        dataset.nsamples()
    );

    let model = GaussianNb::params().fit(&dataset)?;

    let pred = model.predict(&dataset);
    let errors = pred
        .iter()
        .zip(dataset.as_single_targets().iter())
        .filter(|(pred, target)| pred != target)
        .count();
    println!("{errors} training points misclassified");

    Ok(())
}
