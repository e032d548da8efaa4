//! This crate provides the shared types of the surrogate feature-engineering
//! workspace: matrix aliases, the error taxonomy and the seedable random
//! number plumbing used by every randomized feature map.

#![deny(unused_imports)]
#![warn(missing_docs)]

use nalgebra::{Const, Dyn, Matrix, VecStorage};

mod error;
mod random;

pub use error::FeatureError;
pub use random::{new_rng, standard_normal};

/// An n x d matrix of real-valued features, one sample per row
pub type FeatureMatrix = nalgebra::DMatrix<f64>;

/// A length-n column vector of regression targets, row-aligned with the
/// [`FeatureMatrix`] it was extracted alongside
pub type TargetVector = Matrix<f64, Dyn, Const<1>, VecStorage<f64, Dyn, Const<1>>>;

/// Workspace wide result type
pub type Result<T> = std::result::Result<T, FeatureError>;
