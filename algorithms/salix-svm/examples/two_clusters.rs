use ndarray::{concatenate, Array1, Array2, Axis};
use ndarray_rand::rand::SeedableRng;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand_xoshiro::Xoshiro256Plus;
use salix::prelude::*;
use salix_svm::{error::Result, Svm};

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
        .map(|i| if i < 20 { -1.0 } else { 1.0 })
        .collect::<Array1<f64>>();
    let dataset = Dataset::new(records, targets);

    println!(
        "Fit hard-margin SVM classifier with #{} training points",
        dataset.nsamples()
    );

    let model = Svm::params().linear_kernel().fit(&dataset)?;
    println!("{model}");

    let pred = model.predict(&dataset);
    let errors = pred
        .iter()
        .zip(dataset.as_single_targets().iter())
        .filter(|(pred, target)| pred != target)
        .count();
    println!("{errors} training points misclassified");

    Ok(())
}
