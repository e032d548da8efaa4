use common::{new_rng, standard_normal, FeatureError, FeatureMatrix, Result};
use nalgebra::{Dim, Matrix};
use nanorand::WyRand;

use crate::{Expansion, RandomFeatureMap};

/// The weight matrix of a generated random ReLU projection. Applies per row,
/// so unlike the Fourier map it is reusable for any sample count.
#[derive(Debug, Clone)]
pub struct ReluProjection {
    /// d x k weight matrix with i.i.d. standard normal entries
    pub weights: FeatureMatrix,
}

/// Random ReLU feature map `max(X·v, 0)`.
///
/// A naive approximation of a wide random first layer of a neural network:
/// each output column is a random linear combination of the inputs with its
/// negative part clamped to zero. Trivial, but it works well for large k.
/// Every output entry is >= 0.
pub struct ReluProjector {
    num_features: usize,
    rng: WyRand,
}

impl ReluProjector {
    /// Create a new projector
    ///
    /// # Arguments:
    /// seed: Reproduces the same weights on every run when `Some`
    /// num_features: k, the output dimensionality
    pub fn new(seed: Option<u64>, num_features: usize) -> Self {
        Self {
            num_features,
            rng: new_rng(seed),
        }
    }
}

impl RandomFeatureMap for ReluProjector {
    type Projection = ReluProjection;

    fn generate(&mut self, x: &FeatureMatrix) -> Expansion<ReluProjection> {
        debug!(
            "generating relu projection: {} -> {} features",
            x.ncols(),
            self.num_features
        );

        let weights: FeatureMatrix = Matrix::from_fn_generic(
            Dim::from_usize(x.ncols()),
            Dim::from_usize(self.num_features),
            |_, _| standard_normal(&mut self.rng),
        );

        let features = map(x, &weights);
        Expansion {
            features,
            projection: ReluProjection { weights },
        }
    }

    fn apply(&self, x: &FeatureMatrix, projection: &ReluProjection) -> Result<FeatureMatrix> {
        if x.ncols() != projection.weights.nrows() {
            return Err(FeatureError::ShapeMismatch {
                what: "feature columns",
                expected: projection.weights.nrows(),
                got: x.ncols(),
            });
        }
        Ok(map(x, &projection.weights))
    }
}

fn map(x: &FeatureMatrix, weights: &FeatureMatrix) -> FeatureMatrix {
    let mut out = x * weights;
    for v in out.iter_mut() {
        if *v < 0.0 {
            *v = 0.0;
        }
    }
    out
}
