//! End-to-end run of the feature-engineering pipeline on a synthetic grid of
//! planetary integrations, finished off with a small ridge readout standing
//! in for whatever learner consumes the matrices.

#[macro_use]
extern crate log;

use common::{FeatureMatrix, TargetVector};
use feature_maps::{
    median_pairwise_distance, FourierMapper, PolynomialExpander, RandomFeatureMap, ReluProjector,
};
use nalgebra::DMatrix;
use scaling::{scale_pair, ScalingMode};
use sim_table::{extract, Table};

const SEED: Option<u64> = Some(0);

fn main() {
    pretty_env_logger::init();

    let table = integration_grid();
    info!(
        "integration grid: {} runs, {} columns",
        table.num_rows(),
        table.num_columns()
    );

    let extracted = extract(
        &table,
        &["semi_major_axis", "eccentricity", "stellar_mass"],
        "final_ecc",
    )
    .expect("grid columns exist");
    info!(
        "kept {} runs after NaN-target filtering",
        extracted.features.nrows()
    );

    // 80/20 split
    let n = extracted.features.nrows();
    let n_train = n * 4 / 5;
    let x_train = extracted.features.rows(0, n_train).into_owned();
    let x_test = extracted.features.rows(n_train, n - n_train).into_owned();
    let y_train = extracted.targets.rows(0, n_train).into_owned();
    let y_test = extracted.targets.rows(n_train, n - n_train).into_owned();

    // deterministic quadratic expansion of both splits
    let expander = PolynomialExpander::new(2, false, false);
    info!(
        "quadratic expansion: {} -> {} columns",
        x_train.ncols(),
        expander.output_width(x_train.ncols())
    );
    let x_train = expander.expand(&x_train);
    let x_test = expander.expand(&x_test);

    // one random relu layer, generated on train and reapplied to test
    let mut projector = ReluProjector::new(SEED, 200);
    let expansion = projector.generate(&x_train);
    let x_test = projector
        .apply(&x_test, &expansion.projection)
        .expect("column counts match");
    let x_train = expansion.features;

    // scale both splits with statistics fitted on train only
    let scaled = scale_pair(&x_train, &x_test, ScalingMode::Standard).expect("column counts match");

    let readout = fit_ridge(&scaled.train, &y_train, 1e-3);
    info!("train rmse: {:.4}", rmse(&scaled.train, &y_train, &readout));
    info!("test rmse:  {:.4}", rmse(&scaled.test, &y_test, &readout));

    // the fourier alternative, with the bandwidth read off the data
    let sigma = median_pairwise_distance(&x_train);
    let fourier = FourierMapper::new(SEED, 200, sigma).generate(&x_train);
    info!(
        "fourier map with sigma {:.3}: {} x {} features in [-1, 1]",
        sigma,
        fourier.features.nrows(),
        fourier.features.ncols()
    );
}

/// A synthetic stand-in for a grid of planetary integrations: initial orbital
/// elements in, final eccentricity out, NaN where the integration halted.
fn integration_grid() -> Table {
    let mut semi_major_axis = Vec::new();
    let mut eccentricity = Vec::new();
    let mut stellar_mass = Vec::new();
    let mut final_ecc = Vec::new();

    for i in 0..30 {
        for j in 0..10 {
            let a = 0.5 + i as f64 * 0.1;
            let e = j as f64 * 0.08;
            let m = 0.8 + ((i + j) % 5) as f64 * 0.1;

            semi_major_axis.push(a);
            eccentricity.push(e);
            stellar_mass.push(m);
            // close-in eccentric systems go unstable and halt
            if e > 0.6 && a < 1.0 {
                final_ecc.push(f64::NAN);
            } else {
                final_ecc.push((e * (1.0 - 0.3 * (a / m).sin())).clamp(0.0, 1.0));
            }
        }
    }

    Table::new()
        .with_column("semi_major_axis", semi_major_axis)
        .unwrap()
        .with_column("eccentricity", eccentricity)
        .unwrap()
        .with_column("stellar_mass", stellar_mass)
        .unwrap()
        .with_column("final_ecc", final_ecc)
        .unwrap()
}

fn fit_ridge(design: &FeatureMatrix, targets: &TargetVector, coeff: f64) -> TargetVector {
    let reg = DMatrix::from_diagonal_element(design.ncols(), design.ncols(), coeff);
    let p = (design.transpose() * design + reg)
        .try_inverse()
        .expect("regularized gram matrix is invertible");
    p * design.transpose() * targets
}

fn rmse(design: &FeatureMatrix, targets: &TargetVector, readout: &TargetVector) -> f64 {
    let residual = design * readout - targets;
    (residual.norm_squared() / targets.len() as f64).sqrt()
}
