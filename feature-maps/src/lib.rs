//! Feature constructions that widen a feature matrix before it is handed to
//! a learner: deterministic polynomial expansion and two randomized
//! kernel-approximation maps.
//!
//! Every transform allocates a new matrix; inputs are never mutated.

#![deny(unused_imports)]
#![warn(missing_docs)]

#[macro_use]
extern crate log;

use common::{FeatureMatrix, Result};

mod fourier;
mod polynomial;
mod relu;

pub use fourier::{median_pairwise_distance, FourierMapper, FourierProjection};
pub use polynomial::PolynomialExpander;
pub use relu::{ReluProjection, ReluProjector};

/// A transformed matrix together with the random parameters that produced it
#[derive(Debug, Clone)]
pub struct Expansion<P> {
    /// The transformed n x k feature matrix
    pub features: FeatureMatrix,

    /// The generated parameters, retained by the caller so that further data
    /// can be mapped consistently
    pub projection: P,
}

/// The two-phase contract shared by the randomized feature maps: a
/// generation pass draws fresh random parameters and transforms the matrix
/// it was given, an apply pass reuses those parameters on other data.
pub trait RandomFeatureMap {
    /// The parameters produced by the generation pass
    type Projection;

    /// Draw fresh random parameters and transform `x` with them
    fn generate(&mut self, x: &FeatureMatrix) -> Expansion<Self::Projection>;

    /// Transform `x` with previously generated parameters
    fn apply(&self, x: &FeatureMatrix, projection: &Self::Projection) -> Result<FeatureMatrix>;
}
