use std::f64::consts::TAU;

use common::{new_rng, standard_normal, FeatureError, FeatureMatrix, Result};
use nalgebra::{DVector, Dim, Matrix};
use nanorand::{Rng, WyRand};

use crate::{Expansion, RandomFeatureMap};

/// The parameters of a generated random Fourier map.
///
/// The weight matrix applies per row and is reusable for any sample count.
/// The phase vector holds one entry per sample of the generating call and is
/// only valid for matrices with that exact row count; reapplying it to a
/// differently sized matrix is a shape mismatch, never a broadcast.
#[derive(Debug, Clone)]
pub struct FourierProjection {
    /// d x k weight matrix with i.i.d. standard normal entries
    pub weights: FeatureMatrix,

    /// Per-sample phases, i.i.d. uniform on [0, 2pi)
    pub phases: DVector<f64>,

    /// The kernel bandwidth the map was generated with
    pub sigma: f64,
}

/// Random Fourier feature map `sin(X·v / sigma + b)`.
///
/// In expectation the inner products of the mapped features approximate an
/// RBF kernel between the original samples, so a linear learner on the
/// mapped matrix behaves like a kernel machine on the original one. Output
/// values always lie in [-1, 1].
pub struct FourierMapper {
    num_features: usize,
    sigma: f64,
    rng: WyRand,
}

impl FourierMapper {
    /// Create a new mapper
    ///
    /// # Arguments:
    /// seed: Reproduces the same weights and phases on every run when `Some`
    /// num_features: k, the output dimensionality
    /// sigma: Kernel bandwidth, something near the median pairwise distance
    /// of the samples (see [`median_pairwise_distance`])
    pub fn new(seed: Option<u64>, num_features: usize, sigma: f64) -> Self {
        Self {
            num_features,
            sigma,
            rng: new_rng(seed),
        }
    }

    /// Combined entry point kept for callers holding loose parameters:
    /// generates when `weights` and `phases` are both absent, applies when
    /// both are present, and rejects the ambiguous in-between.
    pub fn transform(
        &mut self,
        x: &FeatureMatrix,
        weights: Option<&FeatureMatrix>,
        phases: Option<&DVector<f64>>,
    ) -> Result<FeatureMatrix> {
        match (weights, phases) {
            (None, None) => Ok(self.generate(x).features),
            (Some(weights), Some(phases)) => checked_map(x, weights, phases, self.sigma),
            _ => Err(FeatureError::InvalidArgument(
                "supply both weights and phases or neither".to_owned(),
            )),
        }
    }
}

impl RandomFeatureMap for FourierMapper {
    type Projection = FourierProjection;

    fn generate(&mut self, x: &FeatureMatrix) -> Expansion<FourierProjection> {
        debug!(
            "generating fourier map: {} -> {} features, sigma {}",
            x.ncols(),
            self.num_features,
            self.sigma
        );

        let weights: FeatureMatrix = Matrix::from_fn_generic(
            Dim::from_usize(x.ncols()),
            Dim::from_usize(self.num_features),
            |_, _| standard_normal(&mut self.rng),
        );
        let phases: DVector<f64> = Matrix::from_fn_generic(
            Dim::from_usize(x.nrows()),
            Dim::from_usize(1),
            |_, _| self.rng.generate::<f64>() * TAU,
        );

        let features = map(x, &weights, &phases, self.sigma);
        Expansion {
            features,
            projection: FourierProjection {
                weights,
                phases,
                sigma: self.sigma,
            },
        }
    }

    fn apply(&self, x: &FeatureMatrix, projection: &FourierProjection) -> Result<FeatureMatrix> {
        checked_map(x, &projection.weights, &projection.phases, projection.sigma)
    }
}

fn checked_map(
    x: &FeatureMatrix,
    weights: &FeatureMatrix,
    phases: &DVector<f64>,
    sigma: f64,
) -> Result<FeatureMatrix> {
    if x.ncols() != weights.nrows() {
        return Err(FeatureError::ShapeMismatch {
            what: "feature columns",
            expected: weights.nrows(),
            got: x.ncols(),
        });
    }
    if x.nrows() != phases.len() {
        return Err(FeatureError::ShapeMismatch {
            what: "rows",
            expected: phases.len(),
            got: x.nrows(),
        });
    }
    Ok(map(x, weights, phases, sigma))
}

fn map(
    x: &FeatureMatrix,
    weights: &FeatureMatrix,
    phases: &DVector<f64>,
    sigma: f64,
) -> FeatureMatrix {
    let mut out = x * weights;
    for (i, mut row) in out.row_iter_mut().enumerate() {
        for v in row.iter_mut() {
            *v = (*v / sigma + phases[i]).sin();
        }
    }
    out
}

/// Median Euclidean distance between all sample pairs of `x`, a reasonable
/// default bandwidth for [`FourierMapper`]. Falls back to 1.0 when there are
/// fewer than two samples.
pub fn median_pairwise_distance(x: &FeatureMatrix) -> f64 {
    let n = x.nrows();
    if n < 2 {
        return 1.0;
    }
    let mut dists = Vec::with_capacity(n * (n - 1) / 2);
    for i in 0..n {
        for j in i + 1..n {
            dists.push((x.row(i) - x.row(j)).norm());
        }
    }
    dists.sort_by(|a, b| a.total_cmp(b));
    if dists.len() % 2 == 1 {
        dists[dists.len() / 2]
    } else {
        (dists[dists.len() / 2 - 1] + dists[dists.len() / 2]) / 2.0
    }
}
